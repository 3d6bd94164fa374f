use crate::{
    error::EncodingError,
    native::{MAX_LOB_LENGTH, NativeEncoder, check_length},
    sink::Prefix,
};
use bytes::BufMut;
use model::{
    SqlType,
    core::data_type::{ByteLength, VarLength},
};

/// `binary(n)`: 2-byte prefix always equal to `n`, payload zero-padded.
#[derive(Debug, Clone, Copy)]
pub struct BinaryEncoder {
    length: ByteLength,
}

impl BinaryEncoder {
    pub fn new(length: ByteLength) -> Self {
        Self { length }
    }
}

impl NativeEncoder for BinaryEncoder {
    type Item = [u8];

    fn data_type(&self) -> SqlType {
        SqlType::Binary(self.length)
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&[u8]>) -> Result<(), EncodingError> {
        let Some(data) = value else {
            Prefix::U16.put_null(sink);
            return Ok(());
        };

        let length = self.length.get();
        check_length(self.data_type(), data.len(), length)?;
        sink.put_u16_le(length as u16);
        sink.put_slice(data);
        sink.put_bytes(0x00, length - data.len());
        Ok(())
    }
}

/// `varbinary(n)` with a 2-byte prefix, or `varbinary(max)` with an 8-byte one.
#[derive(Debug, Clone, Copy)]
pub struct VarBinaryEncoder {
    length: VarLength<ByteLength>,
}

impl VarBinaryEncoder {
    pub fn new(length: VarLength<ByteLength>) -> Self {
        Self { length }
    }
}

impl NativeEncoder for VarBinaryEncoder {
    type Item = [u8];

    fn data_type(&self) -> SqlType {
        SqlType::VarBinary(self.length)
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&[u8]>) -> Result<(), EncodingError> {
        let (prefix, max) = match self.length {
            VarLength::Bounded(length) => (Prefix::U16, length.get()),
            VarLength::Max => (Prefix::U64, MAX_LOB_LENGTH),
        };
        match value {
            None => prefix.put_null(sink),
            Some(data) => {
                check_length(self.data_type(), data.len(), max)?;
                prefix.put_prefixed(sink, data);
            }
        }
        Ok(())
    }
}
