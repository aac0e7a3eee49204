/// Decode the bytes of a plain-text file as UTF-8.
///
/// A leading byte-order mark is dropped and invalid sequences become U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
