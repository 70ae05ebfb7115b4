use std::fmt;
use std::str::FromStr;

use crate::error::ResIdError;

/// Mask of the package id field (bits 24-31)
///
/// package id 字段的掩码（第 24-31 位）
pub const PACKAGE_MASK: u32 = 0xff00_0000;

/// Mask of the type id field (bits 16-23)
///
/// type id 字段的掩码（第 16-23 位）
pub const TYPE_MASK: u32 = 0x00ff_0000;

/// Mask of the entry id field (bits 0-15)
///
/// entry id 字段的掩码（第 0-15 位）
pub const ENTRY_MASK: u32 = 0x0000_ffff;

/// Bit offset of the package id field
///
/// package id 字段的位偏移
pub const PACKAGE_SHIFT: u32 = 24;

/// Bit offset of the type id field
///
/// type id 字段的位偏移
pub const TYPE_SHIFT: u32 = 16;

/// Compose a resource id from its three fields
///
/// 由三个字段组合出资源 id
#[inline(always)]
pub const fn make_resid(package_id: u8, type_id: u8, entry_id: u16) -> u32 {
    ((package_id as u32) << PACKAGE_SHIFT) | ((type_id as u32) << TYPE_SHIFT) | entry_id as u32
}

/// Replace the package id (bits 24-31), leaving every other bit untouched
///
/// The `u8` parameter is the field width; wider values must be truncated by the caller.
///
/// 替换 package id（第 24-31 位），其余位保持不变
#[inline(always)]
pub const fn fix_package_id(resid: u32, package_id: u8) -> u32 {
    (resid & !PACKAGE_MASK) | ((package_id as u32) << PACKAGE_SHIFT)
}

/// Extract the package id (bits 24-31)
///
/// 提取 package id（第 24-31 位）
#[inline(always)]
pub const fn get_package_id(resid: u32) -> u8 {
    (resid >> PACKAGE_SHIFT) as u8
}

/// Extract the type id (bits 16-23)
///
/// Type ids are 1-based: 0 is a sentinel meaning "no type", never a real type.
///
/// 提取 type id（第 16-23 位）
///
/// type id 从 1 开始：0 是表示"无类型"的哨兵值，不是真实类型
#[inline(always)]
pub const fn get_type_id(resid: u32) -> u8 {
    (resid >> TYPE_SHIFT) as u8
}

/// Extract the entry id (bits 0-15)
///
/// 提取 entry id（第 0-15 位）
#[inline(always)]
pub const fn get_entry_id(resid: u32) -> u16 {
    (resid & ENTRY_MASK) as u16
}

/// Check whether the id lives in a package's private numbering space
///
/// True when the upper 16 bits are set but the type field is zero.
///
/// 检查 id 是否属于某个 package 的私有编号空间
///
/// 高 16 位非零且 type 字段为零时为真
#[inline(always)]
pub const fn is_internal_resid(resid: u32) -> bool {
    (resid & (PACKAGE_MASK | TYPE_MASK)) != 0 && (resid & TYPE_MASK) == 0
}

/// Check whether both the type and the package fields are non-zero
///
/// The entry field is unconstrained; entry 0 is legal.
///
/// 检查 type 和 package 字段是否都非零
///
/// entry 字段不受约束，entry 0 是合法的
#[inline(always)]
pub const fn is_valid_resid(resid: u32) -> bool {
    (resid & TYPE_MASK) != 0 && (resid & PACKAGE_MASK) != 0
}

/// A resource identifier packed as `0xPPTTEEEE`
///
/// - `PP`: package id
/// - `TT`: type id (1-based, 0 = unset)
/// - `EEEE`: entry id
///
/// 以 `0xPPTTEEEE` 格式打包的资源标识符
///
/// # Examples (示例)
///
/// ```
/// use res_util::ResId;
///
/// let id = ResId::from_parts(0x7f, 0x01, 0x0002);
/// assert_eq!(id.get(), 0x7f01_0002);
/// assert!(id.is_valid());
/// assert_eq!(id.to_string(), "0x7f010002");
/// assert_eq!("0x7f010002".parse::<ResId>(), Ok(id));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResId(u32);

impl ResId {
    #[inline(always)]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub const fn from_parts(package_id: u8, type_id: u8, entry_id: u16) -> Self {
        Self(make_resid(package_id, type_id, entry_id))
    }

    /// Get the raw 32-bit value
    ///
    /// 获取原始的 32 位值
    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn package_id(self) -> u8 {
        get_package_id(self.0)
    }

    /// Type id; 0 means unset
    ///
    /// type id；0 表示未设置
    #[inline(always)]
    pub const fn type_id(self) -> u8 {
        get_type_id(self.0)
    }

    #[inline(always)]
    pub const fn entry_id(self) -> u16 {
        get_entry_id(self.0)
    }

    /// Same id with its package field rewritten
    ///
    /// 重写 package 字段后的同一 id
    #[inline(always)]
    pub const fn with_package_id(self, package_id: u8) -> Self {
        Self(fix_package_id(self.0, package_id))
    }

    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        is_valid_resid(self.0)
    }

    #[inline(always)]
    pub const fn is_internal(self) -> bool {
        is_internal_resid(self.0)
    }
}

impl From<u32> for ResId {
    #[inline(always)]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<ResId> for u32 {
    #[inline(always)]
    fn from(id: ResId) -> Self {
        id.0
    }
}

impl fmt::Display for ResId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Debug for ResId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResId(0x{:08x})", self.0)
    }
}

impl FromStr for ResId {
    type Err = ResIdError;

    /// Parse `0x7f010000`, `0X7F010000` or the bare digits `7f010000`
    ///
    /// 解析 `0x7f010000`、`0X7F010000` 或不带前缀的 `7f010000`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ResIdError::Empty);
        }

        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.is_empty() {
            return Err(ResIdError::MissingDigits);
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ResIdError::InvalidDigit(c));
        }
        if digits.len() > 8 {
            return Err(ResIdError::TooLong);
        }

        // At most 8 validated hex digits always fit in a u32
        // 最多 8 个已校验的十六进制数字，必然能放入 u32
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ResIdError::TooLong)
    }
}
