use crate::{error::EncodingError, native::NativeEncoder, sink::Prefix};
use bytes::BufMut;
use model::{SqlType, ValueKind, core::data_type::FloatBits};

/// `int`: `04` followed by the value as a little-endian i32.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntEncoder;

impl NativeEncoder for IntEncoder {
    type Item = i32;

    fn data_type(&self) -> SqlType {
        SqlType::Int
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&i32>) -> Result<(), EncodingError> {
        match value {
            None => Prefix::U8.put_null(sink),
            Some(v) => Prefix::U8.put_prefixed(sink, &v.to_le_bytes()),
        }
        Ok(())
    }
}

/// `bigint`: `08` followed by the value as a little-endian i64.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntEncoder;

impl NativeEncoder for BigIntEncoder {
    type Item = i64;

    fn data_type(&self) -> SqlType {
        SqlType::BigInt
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&i64>) -> Result<(), EncodingError> {
        match value {
            None => Prefix::U8.put_null(sink),
            Some(v) => Prefix::U8.put_prefixed(sink, &v.to_le_bytes()),
        }
        Ok(())
    }
}

/// `real`: `04` followed by an IEEE-754 single, little-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealEncoder;

impl NativeEncoder for RealEncoder {
    type Item = f32;

    fn data_type(&self) -> SqlType {
        SqlType::Real
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&f32>) -> Result<(), EncodingError> {
        match value {
            None => Prefix::U8.put_null(sink),
            Some(v) => {
                ensure_finite(self.data_type(), v.is_finite(), || v.to_string())?;
                Prefix::U8.put_prefixed(sink, &v.to_le_bytes());
            }
        }
        Ok(())
    }
}

/// `float(n)`: single precision for `n <= 24`, double precision above.
///
/// The caller must hand over a value of the matching precision; the encoder
/// never widens or narrows. Null is the single `FF` marker for both classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatEncoder {
    bits: FloatBits,
}

impl FloatEncoder {
    pub fn new(bits: FloatBits) -> Self {
        Self { bits }
    }

    pub fn write_null<B: BufMut>(&self, sink: &mut B) {
        Prefix::U8.put_null(sink);
    }

    /// Writes through the 4-byte path; fails on a `float(25..=53)` column.
    pub fn write_single<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<f32>,
    ) -> Result<(), EncodingError> {
        if !self.bits.is_single_precision() {
            return Err(self.precision_mismatch(ValueKind::Real));
        }
        match value {
            None => self.write_null(sink),
            Some(v) => {
                ensure_finite(self.data_type(), v.is_finite(), || v.to_string())?;
                Prefix::U8.put_prefixed(sink, &v.to_le_bytes());
            }
        }
        Ok(())
    }

    /// Writes through the 8-byte path; fails on a `float(1..=24)` column.
    pub fn write_double<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<f64>,
    ) -> Result<(), EncodingError> {
        if self.bits.is_single_precision() {
            return Err(self.precision_mismatch(ValueKind::Float));
        }
        match value {
            None => self.write_null(sink),
            Some(v) => {
                ensure_finite(self.data_type(), v.is_finite(), || v.to_string())?;
                Prefix::U8.put_prefixed(sink, &v.to_le_bytes());
            }
        }
        Ok(())
    }

    fn precision_mismatch(&self, found: ValueKind) -> EncodingError {
        EncodingError::PrecisionMismatch {
            data_type: self.data_type(),
            expected: if self.bits.is_single_precision() {
                ValueKind::Real
            } else {
                ValueKind::Float
            },
            found,
        }
    }
}

impl NativeEncoder for FloatEncoder {
    type Item = f64;

    fn data_type(&self) -> SqlType {
        SqlType::Float(self.bits)
    }

    fn write<B: BufMut>(&self, sink: &mut B, value: Option<&f64>) -> Result<(), EncodingError> {
        self.write_double(sink, value.copied())
    }
}

/// The server has no representation for NaN or infinities.
fn ensure_finite(
    data_type: SqlType,
    finite: bool,
    render: impl FnOnce() -> String,
) -> Result<(), EncodingError> {
    if finite {
        Ok(())
    } else {
        Err(EncodingError::OutOfRange {
            data_type,
            value: render(),
        })
    }
}
