use crate::core::error::FormatError;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Concatenates two byte slices into a freshly allocated buffer.
pub fn concat(first: &[u8], second: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    out.extend_from_slice(first);
    out.extend_from_slice(second);
    out
}

/// Lower-case hex rendering, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 * bytes.len());
    for b in bytes {
        out.push(HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Parses a hex string (either case, no prefix) back into bytes.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, FormatError> {
    if hex.len() % 2 != 0 {
        return Err(FormatError::OddLength(hex.len()));
    }

    if let Some((position, found)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidHexDigit { position, found });
    }

    // Only ASCII hex digits remain past this point.
    let nibble = |c: u8| match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    };

    Ok(hex
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| nibble(pair[0]) << 4 | nibble(pair[1]))
        .collect())
}

/// UTF-16 little-endian bytes of `text`, without a byte order mark.
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}
