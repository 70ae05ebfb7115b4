use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;

/// Alignment that `malloc` guarantees on every supported target
///
/// `malloc` 在所有支持的目标上保证的对齐
const MALLOC_ALIGN: usize = 2 * mem::size_of::<usize>();

/// The deallocation primitive paired with an allocator family
///
/// # Safety
///
/// `deallocate` must release memory obtained from the matching allocator,
/// and must accept any non-null pointer that allocator returned.
///
/// 与某个分配器家族配对的释放原语
///
/// # 安全性
///
/// `deallocate` 必须释放由配对分配器获得的内存，并接受该分配器返回的任何非空指针
pub unsafe trait Deallocator {
    /// Release `ptr`; never called with null
    ///
    /// 释放 `ptr`；不会以空指针调用
    unsafe fn deallocate(ptr: *mut c_void);
}

/// `libc::free`, the partner of `malloc`/`calloc`/`realloc`
///
/// `libc::free`，与 `malloc`/`calloc`/`realloc` 配对
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CFree;

unsafe impl Deallocator for CFree {
    #[inline(always)]
    unsafe fn deallocate(ptr: *mut c_void) {
        unsafe { libc::free(ptr) }
    }
}

/// Single owner of a block obtained from a C-style allocator
///
/// Like `Box<T>`, but the block is released with the allocator's own
/// deallocation primitive (`free` by default) instead of the Rust global
/// allocator. The deallocator is a zero-sized type parameter, so the handle
/// is exactly pointer-sized.
///
/// The handle is either empty (null) or exclusively owns one block.
/// It does not implement `Clone`, so a block can never have two owners.
/// Dropping the handle frees the block but does **not** run `T`'s destructor.
///
/// 由 C 风格分配器获得的内存块的唯一所有者
///
/// 类似 `Box<T>`，但使用分配器自己的释放原语（默认是 `free`）而非 Rust 全局分配器释放内存。
/// 释放器是零大小的类型参数，因此 handle 恰好与指针等大。
///
/// handle 要么为空（null），要么独占一个内存块。它不实现 `Clone`，所以一个内存块不可能有两个所有者。
/// drop handle 会释放内存块，但**不会**运行 `T` 的析构函数。
///
/// # Examples (示例)
///
/// ```
/// use res_util::UniqueCPtr;
///
/// let mut p = UniqueCPtr::new(41u32).unwrap();
/// *p += 1;
/// assert_eq!(*p, 42);
///
/// // Move ownership out, leaving `p` empty | 转移所有权，`p` 变为空
/// let q = p.take();
/// assert!(p.is_null());
/// assert_eq!(q.as_ref(), Some(&42));
/// ```
///
/// Copying a handle does not compile:
///
/// 复制 handle 无法通过编译：
///
/// ```compile_fail
/// use res_util::UniqueCPtr;
///
/// let a = UniqueCPtr::new(1u8).unwrap();
/// let b = <UniqueCPtr<u8> as Clone>::clone(&a);
/// ```
///
/// ```compile_fail
/// use res_util::UniqueCPtr;
///
/// fn assert_clone<T: Clone>() {}
/// assert_clone::<UniqueCPtr<u8>>();
/// ```
///
/// ```compile_fail
/// use res_util::UniqueCPtr;
///
/// fn assert_copy<T: Copy>() {}
/// assert_copy::<UniqueCPtr<u8>>();
/// ```
///
/// ```compile_fail
/// use res_util::UniqueCPtr;
///
/// let a = UniqueCPtr::new(1u8).unwrap();
/// let b = a;
/// let c = a;
/// ```
pub struct UniqueCPtr<T, D: Deallocator = CFree> {
    ptr: *mut T,
    _dealloc: PhantomData<fn() -> D>,
}

unsafe impl<T: Send, D: Deallocator> Send for UniqueCPtr<T, D> {}
unsafe impl<T: Sync, D: Deallocator> Sync for UniqueCPtr<T, D> {}

impl<T, D: Deallocator> UniqueCPtr<T, D> {
    /// Create an empty handle
    ///
    /// 创建一个空 handle
    #[inline(always)]
    pub const fn null() -> Self {
        Self {
            ptr: ptr::null_mut(),
            _dealloc: PhantomData,
        }
    }

    /// Take ownership of `ptr`
    ///
    /// # Safety
    ///
    /// `ptr` must be null, or a pointer returned by `D`'s allocator family that
    /// is aligned for `T`, points to an initialized `T` and is owned by nothing
    /// else. Use `UniqueCPtr<MaybeUninit<T>>` for uninitialized blocks.
    ///
    /// 接管 `ptr` 的所有权
    ///
    /// # 安全性
    ///
    /// `ptr` 必须为空，或是由 `D` 的分配器家族返回、按 `T` 对齐、指向已初始化的 `T`
    /// 且不被其他任何对象拥有的指针。未初始化的内存块请使用 `UniqueCPtr<MaybeUninit<T>>`。
    #[inline(always)]
    pub const unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr,
            _dealloc: PhantomData,
        }
    }

    /// Observe the owned pointer without affecting ownership
    ///
    /// 观察所拥有的指针，不影响所有权
    #[inline(always)]
    pub const fn get(&self) -> *mut T {
        self.ptr
    }

    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Returns true when the handle owns nothing
    ///
    /// handle 不拥有任何内存时返回 true
    #[inline(always)]
    pub const fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Give up ownership without freeing; the caller must free the result
    ///
    /// 放弃所有权但不释放；调用者负责释放返回的指针
    #[inline]
    pub fn release(&mut self) -> *mut T {
        mem::replace(&mut self.ptr, ptr::null_mut())
    }

    /// Consume the handle and return its pointer without freeing it
    ///
    /// 消耗 handle 并返回指针，不释放内存
    #[inline]
    pub fn into_raw(self) -> *mut T {
        let ptr = self.ptr;
        mem::forget(self);
        ptr
    }

    /// Free the owned block and adopt `ptr`
    ///
    /// Does nothing if `ptr` is the pointer already owned.
    ///
    /// # Safety
    ///
    /// Same contract as [`UniqueCPtr::from_raw`].
    ///
    /// 释放当前内存块并接管 `ptr`
    ///
    /// 如果 `ptr` 就是当前拥有的指针，则不做任何事
    pub unsafe fn reset(&mut self, ptr: *mut T) {
        if ptr == self.ptr {
            return;
        }

        let old = mem::replace(&mut self.ptr, ptr);
        unsafe { Self::free(old) };
    }

    /// Free the owned block, leaving the handle empty
    ///
    /// 释放当前内存块，handle 变为空
    #[inline]
    pub fn clear(&mut self) {
        // Null always satisfies the from_raw contract
        unsafe { self.reset(ptr::null_mut()) }
    }

    /// Move ownership into a new handle, leaving `self` empty
    ///
    /// 将所有权转移到新 handle，`self` 变为空
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            ptr: self.release(),
            _dealloc: PhantomData,
        }
    }

    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
    }

    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        // Non-null pointers are initialized and exclusively ours (from_raw contract)
        unsafe { self.ptr.as_ref() }
    }

    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        unsafe { self.ptr.as_mut() }
    }

    /// Borrow the pointee without checking for null
    ///
    /// # Safety
    ///
    /// The handle must not be empty.
    ///
    /// 不检查空指针地借用所指向的值
    ///
    /// # 安全性
    ///
    /// handle 不能为空
    #[inline(always)]
    pub unsafe fn as_ref_unchecked(&self) -> &T {
        debug_assert!(!self.ptr.is_null());
        unsafe { &*self.ptr }
    }

    /// Mutably borrow the pointee without checking for null
    ///
    /// # Safety
    ///
    /// The handle must not be empty.
    ///
    /// 不检查空指针地可变借用所指向的值
    ///
    /// # 安全性
    ///
    /// handle 不能为空
    #[inline(always)]
    pub unsafe fn as_mut_unchecked(&mut self) -> &mut T {
        debug_assert!(!self.ptr.is_null());
        unsafe { &mut *self.ptr }
    }

    #[inline(always)]
    unsafe fn free(ptr: *mut T) {
        if !ptr.is_null() {
            unsafe { D::deallocate(ptr.cast::<c_void>()) }
        }
    }
}

impl<T> UniqueCPtr<T, CFree> {
    /// Allocate a block with `malloc` and move `value` into it
    ///
    /// Returns `None` if `malloc` fails or `T` needs more alignment than
    /// `malloc` guarantees.
    ///
    /// 使用 `malloc` 分配内存块并将 `value` 移入
    ///
    /// `malloc` 失败或 `T` 的对齐要求超过 `malloc` 的保证时返回 `None`
    pub fn new(value: T) -> Option<Self> {
        if mem::align_of::<T>() > MALLOC_ALIGN {
            return None;
        }

        // malloc(0) may return null; always ask for at least one byte
        let raw = unsafe { libc::malloc(mem::size_of::<T>().max(1)) }.cast::<T>();
        if raw.is_null() {
            return None;
        }

        unsafe {
            raw.write(value);
            Some(Self::from_raw(raw))
        }
    }
}

impl<T, D: Deallocator> Drop for UniqueCPtr<T, D> {
    #[inline]
    fn drop(&mut self) {
        unsafe { Self::free(self.ptr) }
    }
}

impl<T, D: Deallocator> Default for UniqueCPtr<T, D> {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl<T, D: Deallocator> Deref for UniqueCPtr<T, D> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the handle is empty.
    ///
    /// handle 为空时 panic
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => empty_deref(),
        }
    }
}

impl<T, D: Deallocator> DerefMut for UniqueCPtr<T, D> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => empty_deref(),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn empty_deref() -> ! {
    panic!("Dereferenced an empty UniqueCPtr")
}

impl<T, D: Deallocator> PartialEq for UniqueCPtr<T, D> {
    /// Pointer identity, not pointee contents
    ///
    /// 比较指针身份，而非所指向的内容
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T, D: Deallocator> Eq for UniqueCPtr<T, D> {}

impl<T, D: Deallocator> Hash for UniqueCPtr<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<T, D: Deallocator> fmt::Debug for UniqueCPtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UniqueCPtr").field(&self.ptr).finish()
    }
}

impl<T, D: Deallocator> fmt::Pointer for UniqueCPtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.ptr, f)
    }
}
