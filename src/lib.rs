//! Low-level building blocks for resource tables
//!
//! - [`ResId`] and the `*_resid` functions: bit-packed resource identifiers (`0xPPTTEEEE`)
//! - [`UniqueCPtr`]: single owner of a `malloc`ed block, freed with `free`
//! - [`read_utf16_string_from_device`]: decode little-endian UTF-16 from a table buffer
//!
//! 资源表的底层构件
//!
//! - [`ResId`] 与 `*_resid` 函数：按位打包的资源标识符（`0xPPTTEEEE`）
//! - [`UniqueCPtr`]：`malloc` 内存块的唯一所有者，使用 `free` 释放
//! - [`read_utf16_string_from_device`]：从资源表缓冲区解码小端 UTF-16

mod cptr;
mod error;
mod resid;
mod utf16;

pub use cptr::{CFree, Deallocator, UniqueCPtr};
pub use error::ResIdError;
pub use resid::{
    ENTRY_MASK, PACKAGE_MASK, PACKAGE_SHIFT, ResId, TYPE_MASK, TYPE_SHIFT, fix_package_id,
    get_entry_id, get_package_id, get_type_id, is_internal_resid, is_valid_resid, make_resid,
};
pub use utf16::{read_utf16_string_from_device, utf16_string_from_device};
