use crate::core::error::DescriptorError;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

/// Largest declared length, in bytes, of `char`, `varchar`, `binary` and `varbinary`.
pub const MAX_BYTE_LENGTH: u16 = 8000;
/// Largest declared length, in characters, of `nchar` and `nvarchar`.
pub const MAX_CHAR_LENGTH: u16 = 4000;
/// Largest mantissa width accepted by `float(n)`.
pub const MAX_FLOAT_BITS: u8 = 53;
/// Mantissa widths up to this value are stored in single precision.
pub const SINGLE_PRECISION_BITS: u8 = 24;
/// Largest fractional-second scale of `time` and `datetime2`.
pub const MAX_SCALE: u8 = 7;

/// Declared length of a single-byte character or binary column, `1..=8000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteLength(u16);

impl ByteLength {
    pub fn new(length: u32) -> Result<Self, DescriptorError> {
        match u16::try_from(length) {
            Ok(len) if (1..=MAX_BYTE_LENGTH).contains(&len) => Ok(Self(len)),
            _ => Err(DescriptorError::InvalidLength {
                length,
                max: MAX_BYTE_LENGTH,
            }),
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// Declared length of a UTF-16 character column, `1..=4000` code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharLength(u16);

impl CharLength {
    pub fn new(length: u32) -> Result<Self, DescriptorError> {
        match u16::try_from(length) {
            Ok(len) if (1..=MAX_CHAR_LENGTH).contains(&len) => Ok(Self(len)),
            _ => Err(DescriptorError::InvalidLength {
                length,
                max: MAX_CHAR_LENGTH,
            }),
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// Length of a variable-width column: either a declared maximum or `(max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarLength<L> {
    Bounded(L),
    Max,
}

impl<L> VarLength<L> {
    pub fn is_max(&self) -> bool {
        matches!(self, VarLength::Max)
    }
}

/// Requested mantissa width of `float(n)`, `1..=53`.
///
/// The server collapses the width into two storage classes: `1..=24` is stored
/// as a 4-byte single precision value, `25..=53` as an 8-byte double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatBits(u8);

impl FloatBits {
    pub fn new(bits: u32) -> Result<Self, DescriptorError> {
        match u8::try_from(bits) {
            Ok(b) if (1..=MAX_FLOAT_BITS).contains(&b) => Ok(Self(b)),
            _ => Err(DescriptorError::InvalidFloatBits(bits)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_single_precision(self) -> bool {
        self.0 <= SINGLE_PRECISION_BITS
    }

    /// Storage size in bytes of the selected class.
    pub fn storage_size(self) -> u8 {
        if self.is_single_precision() { 4 } else { 8 }
    }
}

impl Default for FloatBits {
    fn default() -> Self {
        Self(MAX_FLOAT_BITS)
    }
}

/// Fractional-second digits kept by `time` and `datetime2`, `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scale(u8);

impl Scale {
    pub fn new(scale: u32) -> Result<Self, DescriptorError> {
        match u8::try_from(scale) {
            Ok(s) if s <= MAX_SCALE => Ok(Self(s)),
            _ => Err(DescriptorError::InvalidScale(scale)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of bytes used by the time-of-day part at this scale.
    pub fn time_width(self) -> usize {
        match self.0 {
            0..=2 => 3,
            3 | 4 => 4,
            _ => 5,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(MAX_SCALE)
    }
}

/// A SQL Server column type together with its parameters.
///
/// Parameters are validated when the descriptor is built, so an existing
/// `SqlType` is always a type the server would accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SqlType {
    Int,
    BigInt,
    Real,
    Float(FloatBits),
    UniqueIdentifier,
    Char(ByteLength),
    NChar(CharLength),
    VarChar(VarLength<ByteLength>),
    NVarChar(VarLength<CharLength>),
    Binary(ByteLength),
    VarBinary(VarLength<ByteLength>),
    Text,
    NText,
    Xml,
    Date,
    Time(Scale),
    DateTime,
    /// `None` keeps the fraction digits the value actually carries.
    DateTime2(Option<Scale>),
}

impl SqlType {
    pub fn float(bits: u32) -> Result<Self, DescriptorError> {
        FloatBits::new(bits).map(SqlType::Float)
    }

    pub fn char(length: u32) -> Result<Self, DescriptorError> {
        ByteLength::new(length).map(SqlType::Char)
    }

    pub fn nchar(length: u32) -> Result<Self, DescriptorError> {
        CharLength::new(length).map(SqlType::NChar)
    }

    pub fn varchar(length: u32) -> Result<Self, DescriptorError> {
        ByteLength::new(length).map(|l| SqlType::VarChar(VarLength::Bounded(l)))
    }

    pub fn nvarchar(length: u32) -> Result<Self, DescriptorError> {
        CharLength::new(length).map(|l| SqlType::NVarChar(VarLength::Bounded(l)))
    }

    pub fn binary(length: u32) -> Result<Self, DescriptorError> {
        ByteLength::new(length).map(SqlType::Binary)
    }

    pub fn varbinary(length: u32) -> Result<Self, DescriptorError> {
        ByteLength::new(length).map(|l| SqlType::VarBinary(VarLength::Bounded(l)))
    }

    pub fn time(scale: u32) -> Result<Self, DescriptorError> {
        Scale::new(scale).map(SqlType::Time)
    }

    pub fn datetime2(scale: u32) -> Result<Self, DescriptorError> {
        Scale::new(scale).map(|s| SqlType::DateTime2(Some(s)))
    }

    /// Renders the type the way it appears in a T-SQL column definition.
    pub fn sql_name(&self) -> Cow<'static, str> {
        match self {
            SqlType::Int => Cow::Borrowed("int"),
            SqlType::BigInt => Cow::Borrowed("bigint"),
            SqlType::Real => Cow::Borrowed("real"),
            SqlType::Float(bits) => Cow::Owned(format!("float({})", bits.get())),
            SqlType::UniqueIdentifier => Cow::Borrowed("uniqueidentifier"),
            SqlType::Char(len) => Cow::Owned(format!("char({})", len.get())),
            SqlType::NChar(len) => Cow::Owned(format!("nchar({})", len.get())),
            SqlType::VarChar(len) => Cow::Owned(format!("varchar({})", render_var_length(len))),
            SqlType::NVarChar(len) => {
                Cow::Owned(format!("nvarchar({})", render_var_length(len)))
            }
            SqlType::Binary(len) => Cow::Owned(format!("binary({})", len.get())),
            SqlType::VarBinary(len) => {
                Cow::Owned(format!("varbinary({})", render_var_length(len)))
            }
            SqlType::Text => Cow::Borrowed("text"),
            SqlType::NText => Cow::Borrowed("ntext"),
            SqlType::Xml => Cow::Borrowed("xml"),
            SqlType::Date => Cow::Borrowed("date"),
            SqlType::Time(scale) => Cow::Owned(format!("time({})", scale.get())),
            SqlType::DateTime => Cow::Borrowed("datetime"),
            SqlType::DateTime2(Some(scale)) => Cow::Owned(format!("datetime2({})", scale.get())),
            SqlType::DateTime2(None) => Cow::Borrowed("datetime2"),
        }
    }

    pub fn is_unicode(&self) -> bool {
        matches!(
            self,
            SqlType::NChar(_) | SqlType::NVarChar(_) | SqlType::NText | SqlType::Xml
        )
    }

    fn parse_length(name: &str, arg: Option<&str>) -> Result<u32, DescriptorError> {
        match arg {
            None => Ok(1),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| DescriptorError::UnknownType(format!("{name}({raw})"))),
        }
    }

    fn is_max(arg: Option<&str>) -> bool {
        arg.is_some_and(|a| a.trim().eq_ignore_ascii_case("max"))
    }

    /// Splits `name(arg)` into its lower-cased name and optional argument.
    fn split_type_name(type_name: &str) -> Result<(String, Option<&str>), DescriptorError> {
        let trimmed = type_name.trim();
        match trimmed.find('(') {
            Some(open) if trimmed.ends_with(')') => {
                let name = trimmed[..open].trim().to_lowercase();
                Ok((name, Some(&trimmed[open + 1..trimmed.len() - 1])))
            }
            Some(_) => Err(DescriptorError::UnknownType(trimmed.to_string())),
            None => Ok((trimmed.to_lowercase(), None)),
        }
    }
}

fn render_var_length<L: Copy + Into<usize>>(len: &VarLength<L>) -> String {
    match len {
        VarLength::Bounded(l) => (*l).into().to_string(),
        VarLength::Max => "max".to_string(),
    }
}

impl From<ByteLength> for usize {
    fn from(value: ByteLength) -> Self {
        value.get()
    }
}

impl From<CharLength> for usize {
    fn from(value: CharLength) -> Self {
        value.get()
    }
}

impl FromStr for SqlType {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = Self::split_type_name(s)?;
        let no_arg = |ty: SqlType| match arg {
            None => Ok(ty),
            Some(_) => Err(DescriptorError::UnknownType(s.trim().to_string())),
        };

        match name.as_str() {
            "int" | "integer" => no_arg(SqlType::Int),
            "bigint" => no_arg(SqlType::BigInt),
            "real" => no_arg(SqlType::Real),
            "float" => match arg {
                None => Ok(SqlType::Float(FloatBits::default())),
                Some(_) => SqlType::float(Self::parse_length(&name, arg)?),
            },
            "uniqueidentifier" => no_arg(SqlType::UniqueIdentifier),
            "char" | "character" => SqlType::char(Self::parse_length(&name, arg)?),
            "nchar" => SqlType::nchar(Self::parse_length(&name, arg)?),
            "varchar" if Self::is_max(arg) => Ok(SqlType::VarChar(VarLength::Max)),
            "varchar" => SqlType::varchar(Self::parse_length(&name, arg)?),
            "nvarchar" if Self::is_max(arg) => Ok(SqlType::NVarChar(VarLength::Max)),
            "nvarchar" => SqlType::nvarchar(Self::parse_length(&name, arg)?),
            "binary" => SqlType::binary(Self::parse_length(&name, arg)?),
            "varbinary" if Self::is_max(arg) => Ok(SqlType::VarBinary(VarLength::Max)),
            "varbinary" => SqlType::varbinary(Self::parse_length(&name, arg)?),
            "text" => no_arg(SqlType::Text),
            "ntext" => no_arg(SqlType::NText),
            "xml" => no_arg(SqlType::Xml),
            "date" => no_arg(SqlType::Date),
            "time" => match arg {
                None => Ok(SqlType::Time(Scale::default())),
                Some(_) => SqlType::time(Self::parse_length(&name, arg)?),
            },
            "datetime" => no_arg(SqlType::DateTime),
            "datetime2" => match arg {
                None => Ok(SqlType::DateTime2(None)),
                Some(_) => SqlType::datetime2(Self::parse_length(&name, arg)?),
            },
            _ => Err(DescriptorError::UnknownType(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for SqlType {
    type Error = DescriptorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SqlType> for String {
    fn from(value: SqlType) -> Self {
        value.sql_name().into_owned()
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql_name())
    }
}
