pub mod data_type;
pub mod error;
pub mod temporal;
pub mod utils;
pub mod value;
pub mod xml;
