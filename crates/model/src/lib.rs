//! Column type descriptors and cell values for SQL Server native bulk-copy files.

pub mod core;

pub use crate::core::{
    data_type::SqlType,
    error::{ConversionError, DescriptorError, FormatError},
    value::{Value, ValueKind},
    xml::XmlDocument,
};
