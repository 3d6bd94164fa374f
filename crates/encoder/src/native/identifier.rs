use crate::{error::EncodingError, native::NativeEncoder, sink::Prefix};
use bytes::BufMut;
use model::SqlType;
use uuid::Uuid;

/// `uniqueidentifier`: `10` followed by the GUID in mixed-endian order.
///
/// The first three groups are little-endian, the last eight bytes are kept in
/// textual order, which is exactly [`Uuid::to_bytes_le`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIdentifierEncoder;

impl NativeEncoder for UniqueIdentifierEncoder {
    type Item = Uuid;

    fn data_type(&self) -> SqlType {
        SqlType::UniqueIdentifier
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&Uuid>) -> Result<(), EncodingError> {
        match value {
            None => Prefix::U8.put_null(sink),
            Some(uuid) => Prefix::U8.put_prefixed(sink, &uuid.to_bytes_le()),
        }
        Ok(())
    }
}
