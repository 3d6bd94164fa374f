use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use model::{SqlType, Value, XmlDocument};
use uuid::Uuid;

/// `nchar(10)`, `char(10)`, `int` holding `KIKOO`, `KIKOO`, `10`.
pub const KIKOO_ROW: &str = concat!(
    "14004b0049004b004f004f0020002000200020002000",
    "0a004b494b4f4f2020202020",
    "040a000000",
);

/// `date` 1753-01-01.
pub const DATE_1753: &str = "03a1c309";

/// `time(7)` 12:35:29.1234567.
pub const TIME_SCALE_7: &str = "050755438a69";

/// `datetime2` 2004-05-23 14:25:10.123456789, stored at scale 7.
pub const DATETIME2_FINE: &str = "08873dd8dc784b2a0b";

/// `datetime` 2004-05-23 14:25:10.123.
pub const DATETIME_2004: &str = "08f09400002da0ed00";

/// `uniqueidentifier` 6F9619FF-8B86-D011-B42D-00C04FC964FF.
pub const GUID: &str = "10ff19966f868b11d0b42d00c04fc964ff";

/// `float` 3.5.
pub const FLOAT_3_5: &str = "080000000000000c40";

/// `varchar(max)` `abc`.
pub const VARCHAR_MAX_ABC: &str = "0300000000000000616263";

/// `xml` `<root/>`, stored as `<root />`.
pub const XML_ROOT: &str = "10000000000000003c0072006f006f00740020002f003e00";

pub fn kikoo_columns() -> Vec<SqlType> {
    vec![
        SqlType::nchar(10).expect("nchar(10)"),
        SqlType::char(10).expect("char(10)"),
        SqlType::Int,
    ]
}

pub fn kikoo_row() -> Vec<Option<Value>> {
    vec![
        Some(Value::Text("KIKOO".to_string())),
        Some(Value::Text("KIKOO".to_string())),
        Some(Value::Int(10)),
    ]
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn datetime(y: i32, m: u32, d: u32, nanos: u32) -> NaiveDateTime {
    date(y, m, d)
        .and_time(NaiveTime::from_hms_nano_opt(14, 25, 10, nanos).expect("valid time"))
}

pub fn guid() -> Uuid {
    Uuid::parse_str("6F9619FF-8B86-D011-B42D-00C04FC964FF").expect("valid uuid")
}

pub fn xml(text: &str) -> XmlDocument {
    XmlDocument::parse(text).expect("well-formed xml")
}

/// One column of every supported type.
pub fn all_columns() -> Vec<SqlType> {
    [
        "int",
        "bigint",
        "real",
        "float",
        "uniqueidentifier",
        "char(4)",
        "nchar(4)",
        "varchar(10)",
        "nvarchar(max)",
        "binary(2)",
        "varbinary(max)",
        "text",
        "ntext",
        "xml",
        "date",
        "time(3)",
        "datetime",
        "datetime2",
    ]
    .iter()
    .map(|name| name.parse().expect("known type"))
    .collect()
}

pub fn all_values() -> Vec<Option<Value>> {
    vec![
        Some(Value::Int(-7)),
        Some(Value::BigInt(1 << 40)),
        Some(Value::Real(0.25)),
        Some(Value::Float(3.5)),
        Some(Value::Uuid(guid())),
        Some(Value::Text("ab".to_string())),
        Some(Value::Text("ab".to_string())),
        Some(Value::Text("café".to_string())),
        Some(Value::Text("Grüße".to_string())),
        Some(Value::Binary(vec![0xca, 0xfe])),
        Some(Value::Binary(vec![0; 3])),
        Some(Value::Text("text".to_string())),
        Some(Value::Text("ntext".to_string())),
        Some(Value::Xml(xml("<root/>"))),
        Some(Value::Date(date(2004, 5, 23))),
        Some(Value::Time(
            NaiveTime::from_hms_milli_opt(14, 25, 10, 123).expect("valid time"),
        )),
        Some(Value::DateTime(datetime(2004, 5, 23, 123_000_000))),
        Some(Value::DateTime(datetime(2004, 5, 23, 0))),
    ]
}

/// [`all_values`] under [`all_columns`], code page 1252, assembled from the
/// per-type layouts.
pub const ALL_TYPES_ROW: &str = concat!(
    "04f9ffffff",
    "080000000000010000",
    "040000803e",
    "080000000000000c40",
    "10ff19966f868b11d0b42d00c04fc964ff",
    "040061622020",
    "08006100620020002000",
    "0400636166e9",
    "0a0000000000000047007200fc00df006500",
    "0200cafe",
    "0300000000000000000000",
    "0400000074657874",
    "0a0000006e007400650078007400",
    "10000000000000003c0072006f006f00740020002f003e00",
    "034b2a0b",
    "04eb151803",
    "08f09400002da0ed00",
    "06c6ca004b2a0b",
);
