//! Length indicators and null markers appended in front of every value.
//!
//! Any [`bytes::BufMut`] is a sink: `Vec<u8>` and `BytesMut` in memory, and
//! [`crate::writer::BcpWriter`] on top of an `std::io::Write`. All multi-byte
//! integers are little-endian.

use bytes::BufMut;

/// Width of the length indicator written in front of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// Fixed-size scalars: int, float, uniqueidentifier, temporal types.
    U8,
    /// Bounded char, varchar, binary, varbinary and their unicode variants.
    U16,
    /// text and ntext.
    U32,
    /// `(max)` variants and xml.
    U64,
}

impl Prefix {
    pub const fn width(self) -> usize {
        match self {
            Prefix::U8 => 1,
            Prefix::U16 => 2,
            Prefix::U32 => 4,
            Prefix::U64 => 8,
        }
    }

    /// Largest length the prefix can carry. The all-ones pattern is reserved
    /// for null.
    pub const fn max_len(self) -> u64 {
        match self {
            Prefix::U8 => u8::MAX as u64 - 1,
            Prefix::U16 => u16::MAX as u64 - 1,
            Prefix::U32 => u32::MAX as u64 - 1,
            Prefix::U64 => u64::MAX - 1,
        }
    }

    /// Appends the null marker: `0xFF` repeated over the prefix width.
    pub fn put_null<B: BufMut>(self, sink: &mut B) {
        sink.put_bytes(0xff, self.width());
    }

    /// Appends `[length][payload]`. The caller has checked the length against
    /// the column type, which is always below [`Prefix::max_len`].
    pub fn put_prefixed<B: BufMut>(self, sink: &mut B, payload: &[u8]) {
        debug_assert!(payload.len() as u64 <= self.max_len());
        match self {
            Prefix::U8 => sink.put_u8(payload.len() as u8),
            Prefix::U16 => sink.put_u16_le(payload.len() as u16),
            Prefix::U32 => sink.put_u32_le(payload.len() as u32),
            Prefix::U64 => sink.put_u64_le(payload.len() as u64),
        }
        sink.put_slice(payload);
    }
}
