use crate::{
    error::EncodingError,
    native::{MAX_LOB_LENGTH, NativeEncoder, check_length},
    sink::Prefix,
};
use bytes::BufMut;
use model::{SqlType, XmlDocument, core::utils::encode_utf16le};

/// `xml`: 8-byte prefix, root element markup as UTF-16LE with no byte order
/// mark and no declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEncoder;

impl NativeEncoder for XmlEncoder {
    type Item = XmlDocument;

    fn data_type(&self) -> SqlType {
        SqlType::Xml
    }

    fn write<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<&XmlDocument>,
    ) -> Result<(), EncodingError> {
        let Some(document) = value else {
            Prefix::U64.put_null(sink);
            return Ok(());
        };

        let payload = encode_utf16le(document.outer_xml());
        check_length(self.data_type(), payload.len(), MAX_LOB_LENGTH)?;
        Prefix::U64.put_prefixed(sink, &payload);
        Ok(())
    }
}
