use std::fmt;

/// Error type for parsing a ResId from text
///
/// 从文本解析 ResId 时的错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResIdError {
    /// Input string is empty
    ///
    /// 输入字符串为空
    Empty,

    /// A `0x` prefix with no digits after it
    ///
    /// 只有 `0x` 前缀，后面没有数字
    MissingDigits,

    /// More than 8 hex digits
    ///
    /// 超过 8 个十六进制数字
    TooLong,

    /// Character that is not a hex digit
    ///
    /// 非十六进制数字的字符
    InvalidDigit(char),
}

impl fmt::Display for ResIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResIdError::Empty => write!(f, "Empty resource id"),
            ResIdError::MissingDigits => write!(f, "Missing hex digits after 0x prefix"),
            ResIdError::TooLong => write!(f, "Resource id has more than 8 hex digits"),
            ResIdError::InvalidDigit(c) => write!(f, "Invalid hex digit {:?}", c),
        }
    }
}

impl std::error::Error for ResIdError {}
