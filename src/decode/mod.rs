//! Typed output decoder
//!
//! Converts the delimited text bevent and bgame write to stdout into rows of
//! [`FieldValue`]s, using the column list produced when the query was
//! compiled. Field coercion is best-effort except for bgame's start time,
//! which must merge cleanly with its paired date.

mod decoder;
mod error;
mod value;

pub use decoder::{ColumnKind, OutputDecoder, decode, split_output};
pub use error::DecodeError;
pub use value::{FieldValue, TypedRow};
