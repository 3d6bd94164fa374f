//! Date and time columns.
//!
//! `date`, `time` and `datetime2` count days from 0001-01-01 and time of day
//! in units of `10^-scale` seconds, truncating finer digits. The legacy
//! `datetime` counts days from 1900-01-01 and rounds time of day to the
//! nearest 1/300 second.

use crate::{error::EncodingError, native::NativeEncoder, sink::Prefix};
use bytes::BufMut;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use model::{
    SqlType,
    core::{
        data_type::Scale,
        temporal::{datetime_ticks, exact_scale, scaled_ticks},
    },
};

const DATE_WIDTH: usize = 3;
const DATETIME_WIDTH: u8 = 8;

/// `NaiveDate::num_days_from_ce` of 0001-01-01.
const CE_DAY_ONE: i32 = 1;
/// `NaiveDate::num_days_from_ce` of 1900-01-01.
const DATETIME_EPOCH: i32 = 693_596;

const DATETIME_MIN_YEAR: i32 = 1753;
const MAX_YEAR: i32 = 9999;

/// Days since 0001-01-01, rejecting dates outside years 1 to 9999.
fn days_from_day_one(data_type: SqlType, date: &NaiveDate) -> Result<u32, EncodingError> {
    if !(1..=MAX_YEAR).contains(&date.year()) {
        return Err(EncodingError::OutOfRange {
            data_type,
            value: date.to_string(),
        });
    }
    Ok((date.num_days_from_ce() - CE_DAY_ONE) as u32)
}

/// `date`: `03` followed by the day count as a 3-byte little-endian integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateEncoder;

impl NativeEncoder for DateEncoder {
    type Item = NaiveDate;

    fn data_type(&self) -> SqlType {
        SqlType::Date
    }

    fn write<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<&NaiveDate>,
    ) -> Result<(), EncodingError> {
        let Some(date) = value else {
            Prefix::U8.put_null(sink);
            return Ok(());
        };

        let days = days_from_day_one(self.data_type(), date)?;
        sink.put_u8(DATE_WIDTH as u8);
        sink.put_uint_le(u64::from(days), DATE_WIDTH);
        Ok(())
    }
}

/// `time(s)`: a width byte (3, 4 or 5 depending on `s`) followed by the
/// scaled time of day, little-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeEncoder {
    scale: Scale,
}

impl TimeEncoder {
    pub fn new(scale: Scale) -> Self {
        Self { scale }
    }
}

impl NativeEncoder for TimeEncoder {
    type Item = NaiveTime;

    fn data_type(&self) -> SqlType {
        SqlType::Time(self.scale)
    }

    fn write<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<&NaiveTime>,
    ) -> Result<(), EncodingError> {
        let Some(time) = value else {
            Prefix::U8.put_null(sink);
            return Ok(());
        };

        let width = self.scale.time_width();
        sink.put_u8(width as u8);
        sink.put_uint_le(scaled_ticks(time, self.scale), width);
        Ok(())
    }
}

/// `datetime2(s)`: the `time(s)` payload followed by the `date` payload,
/// behind a single width byte.
///
/// Without a declared scale the smallest scale that represents the value's
/// fraction exactly is used, so whole seconds take 6 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTime2Encoder {
    scale: Option<Scale>,
}

impl DateTime2Encoder {
    pub fn new(scale: Option<Scale>) -> Self {
        Self { scale }
    }
}

impl NativeEncoder for DateTime2Encoder {
    type Item = NaiveDateTime;

    fn data_type(&self) -> SqlType {
        SqlType::DateTime2(self.scale)
    }

    fn write<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<&NaiveDateTime>,
    ) -> Result<(), EncodingError> {
        let Some(datetime) = value else {
            Prefix::U8.put_null(sink);
            return Ok(());
        };

        let days = days_from_day_one(self.data_type(), &datetime.date())?;
        let time = datetime.time();
        let scale = self.scale.unwrap_or_else(|| exact_scale(&time));
        let width = scale.time_width();

        sink.put_u8((width + DATE_WIDTH) as u8);
        sink.put_uint_le(scaled_ticks(&time, scale), width);
        sink.put_uint_le(u64::from(days), DATE_WIDTH);
        Ok(())
    }
}

/// `datetime`: `08`, a signed 4-byte day count from 1900-01-01 and an
/// unsigned 4-byte count of 1/300 second ticks since midnight.
///
/// Only years 1753 to 9999 are representable, checked after rounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeEncoder;

impl DateTimeEncoder {
    /// Rounds `datetime` to the nearest tick, carrying into the next day.
    fn split(&self, datetime: &NaiveDateTime) -> Result<(i32, u32), EncodingError> {
        let out_of_range = || EncodingError::OutOfRange {
            data_type: SqlType::DateTime,
            value: datetime.to_string(),
        };

        let (date, ticks) = datetime_ticks(datetime).ok_or_else(out_of_range)?;
        if !(DATETIME_MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(out_of_range());
        }

        Ok((date.num_days_from_ce() - DATETIME_EPOCH, ticks))
    }
}

impl NativeEncoder for DateTimeEncoder {
    type Item = NaiveDateTime;

    fn data_type(&self) -> SqlType {
        SqlType::DateTime
    }

    fn write<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<&NaiveDateTime>,
    ) -> Result<(), EncodingError> {
        let Some(datetime) = value else {
            Prefix::U8.put_null(sink);
            return Ok(());
        };

        let (days, ticks) = self.split(datetime)?;
        sink.put_u8(DATETIME_WIDTH);
        sink.put_i32_le(days);
        sink.put_u32_le(ticks);
        Ok(())
    }
}
