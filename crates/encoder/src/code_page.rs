use crate::error::ConfigError;
use encoding_rs::Encoding;
use oem_cp::{code_table::ENCODING_TABLE_CP_MAP, encode_string_checked};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Windows code page numbers paired with the single-byte encodings that
/// implement them.
static CODE_PAGES: [(u16, &Encoding); 23] = [
    (866, &encoding_rs::IBM866_INIT),
    (874, &encoding_rs::WINDOWS_874_INIT),
    (1250, &encoding_rs::WINDOWS_1250_INIT),
    (1251, &encoding_rs::WINDOWS_1251_INIT),
    (1252, &encoding_rs::WINDOWS_1252_INIT),
    (1253, &encoding_rs::WINDOWS_1253_INIT),
    (1254, &encoding_rs::WINDOWS_1254_INIT),
    (1255, &encoding_rs::WINDOWS_1255_INIT),
    (1256, &encoding_rs::WINDOWS_1256_INIT),
    (1257, &encoding_rs::WINDOWS_1257_INIT),
    (1258, &encoding_rs::WINDOWS_1258_INIT),
    (10000, &encoding_rs::MACINTOSH_INIT),
    (20866, &encoding_rs::KOI8_R_INIT),
    (21866, &encoding_rs::KOI8_U_INIT),
    (28592, &encoding_rs::ISO_8859_2_INIT),
    (28593, &encoding_rs::ISO_8859_3_INIT),
    (28594, &encoding_rs::ISO_8859_4_INIT),
    (28595, &encoding_rs::ISO_8859_5_INIT),
    (28596, &encoding_rs::ISO_8859_6_INIT),
    (28597, &encoding_rs::ISO_8859_7_INIT),
    (28598, &encoding_rs::ISO_8859_8_INIT),
    (28603, &encoding_rs::ISO_8859_13_INIT),
    (28605, &encoding_rs::ISO_8859_15_INIT),
];

/// DOS (OEM) code pages, the client default of `bcp` when no `-C` is given.
static OEM_CODE_PAGES: [(u16, &str); 15] = [
    (437, "ibm437"),
    (737, "ibm737"),
    (775, "ibm775"),
    (850, "ibm850"),
    (852, "ibm852"),
    (855, "ibm855"),
    (857, "ibm857"),
    (858, "ibm858"),
    (860, "ibm860"),
    (861, "ibm861"),
    (862, "ibm862"),
    (863, "ibm863"),
    (864, "ibm864"),
    (865, "ibm865"),
    (869, "ibm869"),
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Charset {
    Windows(&'static Encoding),
    Oem(&'static str),
}

/// The single-byte code page used for `char`, `varchar` and `text` payloads.
///
/// It must match the collation code page of the target columns. The default is
/// Windows-1252 (Latin1_General collations).
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct CodePage {
    number: u16,
    charset: Charset,
}

impl CodePage {
    pub fn windows_1252() -> Self {
        Self {
            number: 1252,
            charset: Charset::Windows(encoding_rs::WINDOWS_1252),
        }
    }

    /// Windows (ANSI) code pages and the DOS (OEM) pages such as 437 and 850.
    pub fn from_number(number: u16) -> Result<Self, ConfigError> {
        let windows = CODE_PAGES
            .iter()
            .find(|(n, _)| *n == number)
            .map(|(_, encoding)| Charset::Windows(*encoding));
        let oem = || {
            OEM_CODE_PAGES
                .iter()
                .find(|(n, _)| *n == number && ENCODING_TABLE_CP_MAP.contains_key(n))
                .map(|(_, name)| Charset::Oem(*name))
        };

        windows
            .or_else(oem)
            .map(|charset| Self { number, charset })
            .ok_or_else(|| ConfigError::UnsupportedCodePage(number.to_string()))
    }

    /// Resolves a WHATWG encoding label such as `"windows-1251"` or `"latin2"`.
    pub fn from_label(label: &str) -> Result<Self, ConfigError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ConfigError::UnsupportedCodePage(label.to_string()))?;

        CODE_PAGES
            .iter()
            .find(|(_, e)| *e == encoding)
            .map(|(number, encoding)| Self {
                number: *number,
                charset: Charset::Windows(*encoding),
            })
            .ok_or_else(|| ConfigError::UnsupportedCodePage(label.to_string()))
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn name(&self) -> &'static str {
        match self.charset {
            Charset::Windows(encoding) => encoding.name(),
            Charset::Oem(name) => name,
        }
    }

    /// Encodes `text`, or returns `None` when a character has no mapping in
    /// this code page.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self.charset {
            Charset::Windows(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                (!had_errors).then(|| bytes.into_owned())
            }
            Charset::Oem(_) => ENCODING_TABLE_CP_MAP
                .get(&self.number)
                .and_then(|table| encode_string_checked(text, *table)),
        }
    }
}

impl Default for CodePage {
    fn default() -> Self {
        Self::windows_1252()
    }
}

impl TryFrom<u16> for CodePage {
    type Error = ConfigError;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        Self::from_number(number)
    }
}

impl From<CodePage> for u16 {
    fn from(value: CodePage) -> Self {
        value.number
    }
}

impl fmt::Debug for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodePage({}, {})", self.number, self.name())
    }
}

impl fmt::Display for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_windows_1252() {
        let cp = CodePage::default();
        assert_eq!(cp.number(), 1252);
        assert_eq!(cp.encode("café"), Some(b"caf\xe9".to_vec()));
    }

    #[test]
    fn test_lookup_by_number_and_label() {
        assert_eq!(CodePage::from_number(1251).unwrap().name(), "windows-1251");
        assert_eq!(CodePage::from_label("latin2").unwrap().number(), 28592);
        assert!(CodePage::from_number(932).is_err());
        assert_eq!(
            CodePage::from_label("utf-8"),
            Err(ConfigError::UnsupportedCodePage("utf-8".to_string()))
        );
    }

    #[test]
    fn test_oem_code_pages() {
        let us = CodePage::from_number(437).unwrap();
        assert_eq!(us.name(), "ibm437");
        assert_eq!(us.encode("café"), Some(b"caf\x82".to_vec()));
        assert_eq!(us.encode("╔═╗"), Some(vec![0xc9, 0xcd, 0xbb]));
        assert_eq!(us.encode("€"), None);

        let western = CodePage::from_number(850).unwrap();
        assert_eq!(western.encode("Grüße"), Some(b"Gr\x81\xe1e".to_vec()));
        assert_eq!(serde_json::to_string(&western).unwrap(), "850");
    }

    #[test]
    fn test_unmappable_characters_are_reported() {
        assert_eq!(CodePage::default().encode("日本"), None);
        assert_eq!(
            CodePage::from_number(1251).unwrap().encode("Привет").map(|b| b.len()),
            Some(6)
        );
    }

    #[test]
    fn test_serde_as_number() {
        let cp: CodePage = serde_json::from_str("1250").unwrap();
        assert_eq!(cp.number(), 1250);
        assert_eq!(serde_json::to_string(&cp).unwrap(), "1250");
        assert!(serde_json::from_str::<CodePage>("65001").is_err());
    }
}
