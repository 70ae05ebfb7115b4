// UniqueCPtr ownership and lifecycle tests
// UniqueCPtr 所有权与生命周期测试

use crate::{CFree, Deallocator, UniqueCPtr};
use std::cell::Cell;
use std::collections::HashSet;
use std::ffi::c_void;
use std::mem::{self, MaybeUninit};

thread_local! {
    static FREED: Cell<usize> = const { Cell::new(0) };
}

/// Deallocator that counts every free before forwarding to `libc::free`
///
/// Each test runs on its own thread, so the counter is per test.
///
/// 每次释放前计数，再转交给 `libc::free` 的释放器
struct CountingFree;

unsafe impl Deallocator for CountingFree {
    unsafe fn deallocate(ptr: *mut c_void) {
        FREED.with(|c| c.set(c.get() + 1));
        unsafe { CFree::deallocate(ptr) }
    }
}

type Counted<T> = UniqueCPtr<T, CountingFree>;

fn freed() -> usize {
    FREED.with(|c| c.get())
}

fn malloc_raw(value: u32) -> *mut u32 {
    UniqueCPtr::new(value).expect("malloc failed").into_raw()
}

fn counted(value: u32) -> Counted<u32> {
    unsafe { Counted::from_raw(malloc_raw(value)) }
}

#[test]
fn test_null_owns_nothing() {
    let p = Counted::<u32>::null();
    assert!(p.is_null());
    assert!(p.get().is_null());
    assert_eq!(p.as_ref(), None);

    drop(p);
    assert_eq!(freed(), 0);

    let d: Counted<u32> = Default::default();
    assert!(d.is_null());
}

#[test]
fn test_drop_frees_once() {
    let p = counted(7);
    assert!(!p.is_null());
    assert_eq!(*p, 7);

    drop(p);
    assert_eq!(freed(), 1);
}

#[test]
fn test_release_returns_pointer_without_freeing() {
    let raw = malloc_raw(5);
    let mut p = unsafe { Counted::from_raw(raw) };

    let released = p.release();
    assert_eq!(released, raw);
    assert!(p.is_null());

    drop(p);
    assert_eq!(freed(), 0);

    // The caller now owns the block
    // 调用者现在拥有该内存块
    unsafe { CFree::deallocate(released.cast()) };
}

#[test]
fn test_into_raw_does_not_free() {
    let p = counted(9);
    let raw = p.into_raw();
    assert_eq!(freed(), 0);
    assert_eq!(unsafe { *raw }, 9);

    // Hand it back to a handle to free it
    // 交回给 handle 释放
    drop(unsafe { Counted::from_raw(raw) });
    assert_eq!(freed(), 1);
}

#[test]
fn test_get_does_not_affect_ownership() {
    let p = counted(3);
    let a = p.get();
    let b = p.get();
    assert_eq!(a, b);
    assert_eq!(p.as_ptr(), a as *const u32);
    assert!(!p.is_null());
    assert_eq!(freed(), 0);
}

#[test]
fn test_clear_twice_frees_once() {
    let mut p = counted(1);

    p.clear();
    assert!(p.is_null());
    assert_eq!(freed(), 1);

    p.clear();
    assert!(p.is_null());
    assert_eq!(freed(), 1);

    drop(p);
    assert_eq!(freed(), 1);
}

#[test]
fn test_reset_with_owned_pointer_is_noop() {
    let mut p = counted(11);
    let raw = p.get();

    unsafe { p.reset(raw) };
    assert_eq!(p.get(), raw);
    assert_eq!(*p, 11);
    assert_eq!(freed(), 0);
}

#[test]
fn test_reset_adopts_new_block() {
    let mut p = counted(1);
    let next = malloc_raw(2);

    unsafe { p.reset(next) };
    assert_eq!(freed(), 1);
    assert_eq!(p.get(), next);
    assert_eq!(*p, 2);

    drop(p);
    assert_eq!(freed(), 2);
}

#[test]
fn test_reset_empty_handle_adopts_without_free() {
    let mut p = Counted::<u32>::null();
    unsafe { p.reset(malloc_raw(4)) };
    assert_eq!(freed(), 0);
    assert_eq!(p.as_ref(), Some(&4));
}

#[test]
#[allow(clippy::self_assignment)]
fn test_self_move_assignment_is_noop() {
    let mut p = counted(21);
    let raw = p.get();

    p = p;

    assert_eq!(freed(), 0);
    assert_eq!(p.get(), raw);
    assert_eq!(*p, 21);
}

#[test]
fn test_move_assignment_frees_old_block() {
    let mut a = counted(1);
    let b = counted(2);
    let b_raw = b.get();

    a = b;
    assert_eq!(freed(), 1);
    assert_eq!(a.get(), b_raw);
    assert_eq!(*a, 2);
}

#[test]
fn test_take_leaves_source_empty() {
    let mut a = counted(8);
    let raw = a.get();

    let b = a.take();
    assert!(a.is_null());
    assert_eq!(b.get(), raw);
    assert_eq!(freed(), 0);

    drop(a);
    assert_eq!(freed(), 0);
    drop(b);
    assert_eq!(freed(), 1);
}

#[test]
fn test_mem_take_uses_null_default() {
    let mut a = counted(8);
    let b = mem::take(&mut a);
    assert!(a.is_null());
    assert!(!b.is_null());
}

#[test]
fn test_swap_exchanges_ownership() {
    let mut a = counted(1);
    let mut b = counted(2);
    let (a_raw, b_raw) = (a.get(), b.get());

    a.swap(&mut b);
    assert_eq!(a.get(), b_raw);
    assert_eq!(b.get(), a_raw);
    assert_eq!((*a, *b), (2, 1));
    assert_eq!(freed(), 0);

    let mut empty = Counted::null();
    a.swap(&mut empty);
    assert!(a.is_null());
    assert_eq!(*empty, 2);
}

#[test]
fn test_equality_is_pointer_identity() {
    let a = counted(1);
    let b = counted(1);

    // Same contents, different blocks
    // 内容相同，内存块不同
    assert_ne!(a, b);

    assert_eq!(Counted::<u32>::null(), Counted::null());
    assert_ne!(a, Counted::null());
}

#[test]
fn test_hash_follows_identity() {
    let a = counted(1);
    let b = counted(1);

    let mut set = HashSet::new();
    assert!(set.insert(a.get()));
    assert!(set.insert(b.get()));

    let mut handles = HashSet::new();
    handles.insert(a);
    handles.insert(b);
    assert_eq!(handles.len(), 2);

    drop(handles);
    assert_eq!(freed(), 2);
}

#[test]
fn test_deref_mut_writes_through() {
    let mut p = counted(1);
    *p += 41;
    assert_eq!(unsafe { *p.get() }, 42);

    if let Some(v) = p.as_mut() {
        *v = 7;
    }
    assert_eq!(unsafe { *p.as_ref_unchecked() }, 7);

    unsafe { *p.as_mut_unchecked() = 9 };
    assert_eq!(*p, 9);
}

#[test]
#[should_panic(expected = "Dereferenced an empty UniqueCPtr")]
fn test_deref_empty_panics() {
    let p = UniqueCPtr::<u32>::null();
    let _value: u32 = *p;
}

#[test]
#[should_panic(expected = "Dereferenced an empty UniqueCPtr")]
fn test_deref_mut_empty_panics() {
    let mut p = UniqueCPtr::<u32>::null();
    *p = 1;
}

#[test]
fn test_handle_is_pointer_sized() {
    assert_eq!(mem::size_of::<UniqueCPtr<u64>>(), mem::size_of::<*mut u64>());
    assert_eq!(mem::size_of::<Counted<[u8; 64]>>(), mem::size_of::<usize>());
}

#[test]
fn test_new_with_struct_value() {
    #[derive(Debug, PartialEq)]
    struct Entry {
        resid: u32,
        flags: u16,
    }

    let p = UniqueCPtr::new(Entry {
        resid: 0x7f01_0000,
        flags: 3,
    })
    .unwrap();

    assert_eq!(p.resid, 0x7f01_0000);
    assert_eq!(p.flags, 3);
}

#[test]
fn test_new_zero_sized() {
    let p = UniqueCPtr::new(()).unwrap();
    assert!(!p.is_null());
    assert_eq!(p.as_ref(), Some(&()));
}

#[test]
fn test_new_rejects_over_aligned() {
    #[repr(align(64))]
    struct Wide(#[allow(dead_code)] u8);

    assert!(UniqueCPtr::new(Wide(1)).is_none());
}

#[test]
fn test_uninit_block_via_maybe_uninit() {
    let raw = unsafe { libc::malloc(mem::size_of::<u64>()) }.cast::<MaybeUninit<u64>>();
    assert!(!raw.is_null());

    let mut p = unsafe { UniqueCPtr::<MaybeUninit<u64>>::from_raw(raw) };
    p.write(0xdead_beef);
    assert_eq!(unsafe { p.assume_init_read() }, 0xdead_beef);
}

#[test]
fn test_debug_and_pointer_format() {
    let p = counted(1);
    let debug = format!("{:?}", p);
    assert!(debug.starts_with("UniqueCPtr("));
    assert_eq!(format!("{:p}", p), format!("{:p}", p.get()));
}

#[test]
fn test_send_to_thread() {
    let p = UniqueCPtr::new(5u32).unwrap();
    let value = std::thread::spawn(move || *p).join().unwrap();
    assert_eq!(value, 5);
}

#[test]
fn test_drop_does_not_run_pointee_destructor() {
    struct Loud;
    impl Drop for Loud {
        fn drop(&mut self) {
            DROPS.with(|c| c.set(c.get() + 1));
        }
    }
    thread_local! {
        static DROPS: Cell<usize> = const { Cell::new(0) };
    }

    let p = UniqueCPtr::new(Loud).unwrap();
    drop(p);
    assert_eq!(DROPS.with(|c| c.get()), 0);
}

#[test]
fn test_clone_call_reaches_pointee_not_handle() {
    // UniqueCPtr has no Clone; `.clone()` auto-derefs to the pointee
    // UniqueCPtr 没有 Clone；`.clone()` 会自动解引用到所指向的值
    // Uncommenting the following line should cause a compile error:
    // 取消注释以下行应该导致编译错误：
    // let _copy = <Counted<u32> as Clone>::clone(&a);
    let a = counted(17);
    let value: u32 = a.clone();
    assert_eq!(value, 17);

    drop(a);
    assert_eq!(freed(), 1);
}
