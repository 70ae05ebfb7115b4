/// Append a device-order (little-endian) UTF-16 string to `out`
///
/// Reads at most `len` units of `src`, stopping early at the first NUL unit.
/// Unpaired surrogates become U+FFFD.
///
/// 将设备字节序（小端）的 UTF-16 字符串追加到 `out`
///
/// 最多读取 `src` 的 `len` 个单元，遇到第一个 NUL 单元提前停止。
/// 未配对的代理项转换为 U+FFFD。
///
/// # Examples (示例)
///
/// ```
/// use res_util::read_utf16_string_from_device;
///
/// let units: Vec<u16> = "app_name\0junk".encode_utf16().map(u16::to_le).collect();
/// let mut out = String::from("@string/");
/// read_utf16_string_from_device(&units, units.len(), &mut out);
/// assert_eq!(out, "@string/app_name");
/// ```
pub fn read_utf16_string_from_device(src: &[u16], len: usize, out: &mut String) {
    let units = src
        .iter()
        .take(len)
        .map(|&unit| u16::from_le(unit))
        .take_while(|&unit| unit != 0);

    out.extend(char::decode_utf16(units).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)));
}

/// Owned form of [`read_utf16_string_from_device`]
///
/// [`read_utf16_string_from_device`] 的返回值形式
#[inline]
pub fn utf16_string_from_device(src: &[u16], len: usize) -> String {
    let mut out = String::with_capacity(len.min(src.len()));
    read_utf16_string_from_device(src, len, &mut out);
    out
}
