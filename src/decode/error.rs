//! Error types for output decoding

use thiserror::Error;

/// Errors raised while decoding tool output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The query matched no games
    #[error("Query returned no rows: no games matched the requested seasons and dates")]
    EmptyResult,

    /// Output did not end with a newline, so the last line may be cut short
    #[error("Output is truncated: last line '{last_line}' is not newline-terminated")]
    TruncatedOutput { last_line: String },

    /// A start time field matching none of the accepted shapes
    #[error(
        "Malformed time '{value}' on line {line}: {reason} \
         (expected 3-digit afternoon HMM, 4-digit HHMM, or 0)"
    )]
    MalformedTime {
        line: usize,
        value: String,
        reason: String,
    },

    /// A line whose field count differs from the requested column count
    #[error("Line {line} has {actual} fields; {expected} columns were requested")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },
}
