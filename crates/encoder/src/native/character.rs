//! Character columns.
//!
//! Non-unicode types are transcoded through the writer's code page, unicode
//! types are written as UTF-16LE without a byte order mark. Fixed-width types
//! are right-padded with spaces to the declared length.

use crate::{
    code_page::CodePage,
    error::EncodingError,
    native::{MAX_LOB_LENGTH, NativeEncoder, check_length},
    sink::Prefix,
};
use bytes::BufMut;
use model::{
    SqlType,
    core::{
        data_type::{ByteLength, CharLength, VarLength},
        utils::encode_utf16le,
    },
};

const SPACE: u8 = b' ';
const UTF16_SPACE: [u8; 2] = [b' ', 0x00];

fn encode_code_page(
    data_type: SqlType,
    code_page: CodePage,
    text: &str,
) -> Result<Vec<u8>, EncodingError> {
    code_page.encode(text).ok_or(EncodingError::Unmappable {
        data_type,
        code_page: code_page.number(),
    })
}

/// Number of UTF-16 code units, which is what `nchar(n)` and `nvarchar(n)`
/// lengths count.
fn utf16_units(text: &str) -> usize {
    text.encode_utf16().count()
}

/// `char(n)`: 2-byte prefix always equal to `n`, payload space-padded.
#[derive(Debug, Clone, Copy)]
pub struct CharEncoder {
    length: ByteLength,
    code_page: CodePage,
}

impl CharEncoder {
    pub fn new(length: ByteLength, code_page: CodePage) -> Self {
        Self { length, code_page }
    }
}

impl NativeEncoder for CharEncoder {
    type Item = str;

    fn data_type(&self) -> SqlType {
        SqlType::Char(self.length)
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&str>) -> Result<(), EncodingError> {
        let Some(text) = value else {
            Prefix::U16.put_null(sink);
            return Ok(());
        };

        let mut payload = encode_code_page(self.data_type(), self.code_page, text)?;
        check_length(self.data_type(), payload.len(), self.length.get())?;
        payload.resize(self.length.get(), SPACE);
        Prefix::U16.put_prefixed(sink, &payload);
        Ok(())
    }
}

/// `nchar(n)`: 2-byte prefix always equal to `2n`, payload padded with
/// UTF-16 spaces.
#[derive(Debug, Clone, Copy)]
pub struct NCharEncoder {
    length: CharLength,
}

impl NCharEncoder {
    pub fn new(length: CharLength) -> Self {
        Self { length }
    }
}

impl NativeEncoder for NCharEncoder {
    type Item = str;

    fn data_type(&self) -> SqlType {
        SqlType::NChar(self.length)
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&str>) -> Result<(), EncodingError> {
        let Some(text) = value else {
            Prefix::U16.put_null(sink);
            return Ok(());
        };

        let units = utf16_units(text);
        check_length(self.data_type(), units, self.length.get())?;
        let mut payload = encode_utf16le(text);
        for _ in units..self.length.get() {
            payload.extend_from_slice(&UTF16_SPACE);
        }
        Prefix::U16.put_prefixed(sink, &payload);
        Ok(())
    }
}

/// `varchar(n)` with a 2-byte prefix, or `varchar(max)` with an 8-byte one.
#[derive(Debug, Clone, Copy)]
pub struct VarCharEncoder {
    length: VarLength<ByteLength>,
    code_page: CodePage,
}

impl VarCharEncoder {
    pub fn new(length: VarLength<ByteLength>, code_page: CodePage) -> Self {
        Self { length, code_page }
    }
}

impl NativeEncoder for VarCharEncoder {
    type Item = str;

    fn data_type(&self) -> SqlType {
        SqlType::VarChar(self.length)
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&str>) -> Result<(), EncodingError> {
        let (prefix, max) = match self.length {
            VarLength::Bounded(length) => (Prefix::U16, length.get()),
            VarLength::Max => (Prefix::U64, MAX_LOB_LENGTH),
        };
        let Some(text) = value else {
            prefix.put_null(sink);
            return Ok(());
        };

        let payload = encode_code_page(self.data_type(), self.code_page, text)?;
        check_length(self.data_type(), payload.len(), max)?;
        prefix.put_prefixed(sink, &payload);
        Ok(())
    }
}

/// `nvarchar(n)` with a 2-byte prefix, or `nvarchar(max)` with an 8-byte one.
/// The prefix counts bytes, twice the number of code units.
#[derive(Debug, Clone, Copy)]
pub struct NVarCharEncoder {
    length: VarLength<CharLength>,
}

impl NVarCharEncoder {
    pub fn new(length: VarLength<CharLength>) -> Self {
        Self { length }
    }
}

impl NativeEncoder for NVarCharEncoder {
    type Item = str;

    fn data_type(&self) -> SqlType {
        SqlType::NVarChar(self.length)
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&str>) -> Result<(), EncodingError> {
        let Some(text) = value else {
            match self.length {
                VarLength::Bounded(_) => Prefix::U16.put_null(sink),
                VarLength::Max => Prefix::U64.put_null(sink),
            }
            return Ok(());
        };

        match self.length {
            VarLength::Bounded(length) => {
                check_length(self.data_type(), utf16_units(text), length.get())?;
                Prefix::U16.put_prefixed(sink, &encode_utf16le(text));
            }
            VarLength::Max => {
                let payload = encode_utf16le(text);
                check_length(self.data_type(), payload.len(), MAX_LOB_LENGTH)?;
                Prefix::U64.put_prefixed(sink, &payload);
            }
        }
        Ok(())
    }
}

/// Legacy `text`: 4-byte prefix, code page payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEncoder {
    code_page: CodePage,
}

impl TextEncoder {
    pub fn new(code_page: CodePage) -> Self {
        Self { code_page }
    }
}

impl NativeEncoder for TextEncoder {
    type Item = str;

    fn data_type(&self) -> SqlType {
        SqlType::Text
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&str>) -> Result<(), EncodingError> {
        let Some(text) = value else {
            Prefix::U32.put_null(sink);
            return Ok(());
        };

        let payload = encode_code_page(self.data_type(), self.code_page, text)?;
        check_length(self.data_type(), payload.len(), MAX_LOB_LENGTH)?;
        Prefix::U32.put_prefixed(sink, &payload);
        Ok(())
    }
}

/// Legacy `ntext`: 4-byte prefix, UTF-16LE payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct NTextEncoder;

impl NativeEncoder for NTextEncoder {
    type Item = str;

    fn data_type(&self) -> SqlType {
        SqlType::NText
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&str>) -> Result<(), EncodingError> {
        let Some(text) = value else {
            Prefix::U32.put_null(sink);
            return Ok(());
        };

        let payload = encode_utf16le(text);
        check_length(self.data_type(), payload.len(), MAX_LOB_LENGTH)?;
        Prefix::U32.put_prefixed(sink, &payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::utils::from_hex;
    use pretty_assertions::assert_eq;

    fn bytes(n: u32) -> ByteLength {
        ByteLength::new(n).unwrap()
    }

    fn chars(n: u32) -> CharLength {
        CharLength::new(n).unwrap()
    }

    #[test]
    fn test_char_pads_with_spaces() {
        let encoder = CharEncoder::new(bytes(10), CodePage::default());
        assert_eq!(
            encoder.encode(Some("KIKOO")).unwrap(),
            from_hex("0a004b494b4f4f2020202020").unwrap()
        );
    }

    #[test]
    fn test_char_exact_length_and_overflow() {
        let encoder = CharEncoder::new(bytes(3), CodePage::default());
        assert_eq!(encoder.encode(Some("abc")).unwrap(), b"\x03\x00abc".to_vec());

        let mut buf = Vec::new();
        let err = encoder.write(&mut buf, Some("abcd")).unwrap_err();
        assert_eq!(
            err,
            EncodingError::ValueTooLong {
                data_type: SqlType::Char(bytes(3)),
                length: 4,
                max: 3,
            }
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_char_uses_code_page() {
        let encoder = CharEncoder::new(bytes(4), CodePage::default());
        assert_eq!(
            encoder.encode(Some("café")).unwrap(),
            from_hex("0400636166e9").unwrap()
        );
        assert!(matches!(
            encoder.encode(Some("日本")),
            Err(EncodingError::Unmappable {
                code_page: 1252,
                ..
            })
        ));
    }

    #[test]
    fn test_nchar_pads_with_utf16_spaces() {
        let encoder = NCharEncoder::new(chars(10));
        assert_eq!(
            encoder.encode(Some("KIKOO")).unwrap(),
            from_hex("14004b0049004b004f004f0020002000200020002000").unwrap()
        );
        assert!(encoder.encode(Some("KIKOOKIKOOK")).is_err());
    }

    #[test]
    fn test_nchar_counts_surrogate_pairs_as_two_units() {
        let encoder = NCharEncoder::new(chars(2));
        let encoded = encoder.encode(Some("😀")).unwrap();
        assert_eq!(&encoded[..2], &[0x04, 0x00]);
        assert!(encoder.encode(Some("a😀")).is_err());
    }

    #[test]
    fn test_varchar_bounded_and_max() {
        let bounded = VarCharEncoder::new(VarLength::Bounded(bytes(5)), CodePage::default());
        assert_eq!(bounded.encode(Some("abc")).unwrap(), b"\x03\x00abc".to_vec());
        assert_eq!(bounded.encode(Some("")).unwrap(), vec![0x00, 0x00]);
        assert!(bounded.encode(Some("abcdef")).is_err());

        let max = VarCharEncoder::new(VarLength::Max, CodePage::default());
        assert_eq!(
            max.encode(Some("abc")).unwrap(),
            from_hex("0300000000000000616263").unwrap()
        );
        assert_eq!(max.encode(None).unwrap(), vec![0xff; 8]);
    }

    #[test]
    fn test_nvarchar_bounded_and_max() {
        let bounded = NVarCharEncoder::new(VarLength::Bounded(chars(3)));
        assert_eq!(
            bounded.encode(Some("ab")).unwrap(),
            vec![0x04, 0x00, b'a', 0, b'b', 0]
        );
        assert!(bounded.encode(Some("abcd")).is_err());

        let max = NVarCharEncoder::new(VarLength::Max);
        assert_eq!(
            max.encode(Some("é")).unwrap(),
            vec![0x02, 0, 0, 0, 0, 0, 0, 0, 0xe9, 0x00]
        );
    }

    #[test]
    fn test_text_and_ntext_use_four_byte_prefix() {
        assert_eq!(
            TextEncoder::default().encode(Some("abc")).unwrap(),
            from_hex("03000000616263").unwrap()
        );
        assert_eq!(
            NTextEncoder.encode(Some("ab")).unwrap(),
            vec![0x04, 0, 0, 0, b'a', 0, b'b', 0]
        );
        assert_eq!(NTextEncoder.encode(None).unwrap(), vec![0xff; 4]);
    }

    #[test]
    fn test_cyrillic_code_page() {
        let encoder = TextEncoder::new(CodePage::from_number(1251).unwrap());
        assert_eq!(
            encoder.encode(Some("Да")).unwrap(),
            vec![0x02, 0, 0, 0, 0xc4, 0xe0]
        );
    }
}
