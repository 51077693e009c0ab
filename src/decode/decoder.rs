//! Typed decoding of bevent/bgame output
//!
//! The tools write one comma-delimited line per play (bevent) or game
//! (bgame), with string fields quoted and `(none)` for absent values. Output
//! position `i` holds column `columns[i]` of the compiled column list, which
//! decides how the field is coerced.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::query::{
    BGAME_DATE_COLUMN, BGAME_TIME_COLUMN, BGAME_TIMESTAMP_COLUMN, CompiledColumns,
    LinkedColumnMetadata, Tool,
};

use super::error::DecodeError;
use super::value::{FieldValue, TypedRow};

const FIELD_DELIMITER: char = ',';
const NULL_MARKER: &str = "(none)";

const DATE_FORMAT: &str = "%y%m%d";
const DATE_FALLBACK_FORMATS: [&str; 2] = ["%Y%m%d", "%m/%d/%Y"];
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const TIMESTAMP_FALLBACK_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// How a column's raw field becomes a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Best-effort number; empty is missing, anything else passes through
    Integer,
    /// 2-digit-year game date
    Date,
    /// Start time merged with the paired date column
    LinkedTime,
    /// Absolute timestamp string
    Timestamp,
}

impl ColumnKind {
    pub fn for_column(tool: Tool, column: u16) -> Self {
        match (tool, column) {
            (Tool::Bgame, BGAME_DATE_COLUMN) => ColumnKind::Date,
            (Tool::Bgame, BGAME_TIME_COLUMN) => ColumnKind::LinkedTime,
            (Tool::Bgame, BGAME_TIMESTAMP_COLUMN) => ColumnKind::Timestamp,
            _ => ColumnKind::Integer,
        }
    }
}

/// Decoder for one compiled column list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDecoder {
    kinds: Vec<ColumnKind>,
    link: Option<LinkedColumnMetadata>,
}

impl OutputDecoder {
    pub fn new(kinds: Vec<ColumnKind>, link: Option<LinkedColumnMetadata>) -> Self {
        Self { kinds, link }
    }

    pub fn for_columns(compiled: &CompiledColumns) -> Self {
        let kinds = compiled
            .columns
            .iter()
            .map(|column| ColumnKind::for_column(compiled.tool, *column))
            .collect();
        Self::new(kinds, compiled.link)
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Decode a complete, newline-terminated result set
    pub fn decode(&self, raw: &str) -> Result<Vec<TypedRow>, DecodeError> {
        let lines = split_output(raw)?;
        lines
            .iter()
            .enumerate()
            .map(|(index, fields)| self.decode_line(index + 1, fields))
            .collect()
    }

    fn decode_line(&self, line: usize, fields: &[String]) -> Result<TypedRow, DecodeError> {
        if fields.len() != self.kinds.len() {
            return Err(DecodeError::FieldCountMismatch {
                line,
                expected: self.kinds.len(),
                actual: fields.len(),
            });
        }

        let mut values: Vec<FieldValue> = Vec::with_capacity(fields.len());
        for (position, (field, kind)) in fields.iter().zip(&self.kinds).enumerate() {
            let value = match kind {
                ColumnKind::Integer => coerce_number(field),
                ColumnKind::Date => coerce_date(field),
                ColumnKind::Timestamp => coerce_timestamp(field),
                ColumnKind::LinkedTime => {
                    let date = self.linked_date(line, position, field, &values)?;
                    FieldValue::DateTime(merge_date_time(line, date, field)?)
                }
            };
            values.push(value);
        }

        Ok(TypedRow::new(values))
    }

    /// The already decoded date paired with the time at `position`
    fn linked_date(
        &self,
        line: usize,
        position: usize,
        field: &str,
        decoded: &[FieldValue],
    ) -> Result<NaiveDate, DecodeError> {
        let malformed = |reason: String| DecodeError::MalformedTime {
            line,
            value: field.to_string(),
            reason,
        };

        let link = self
            .link
            .ok_or_else(|| malformed("no paired date column was requested".to_string()))?;
        let date_position = link
            .date_position(position)
            .filter(|p| *p < position)
            .ok_or_else(|| {
                malformed(format!(
                    "link offset {} does not point at an earlier column",
                    link.offset
                ))
            })?;

        decoded[date_position].as_date().ok_or_else(|| {
            malformed(format!(
                "paired date at position {} is {}, not a date",
                date_position,
                decoded[date_position].type_name()
            ))
        })
    }
}

/// Decode `raw` against a compiled column list
pub fn decode(raw: &str, compiled: &CompiledColumns) -> Result<Vec<TypedRow>, DecodeError> {
    OutputDecoder::for_columns(compiled).decode(raw)
}

/// Split raw output into lines of cleaned string fields
///
/// Quote characters are stripped and the null marker becomes an empty
/// field. Blank lines, including the one after the final newline, are
/// dropped.
pub fn split_output(raw: &str) -> Result<Vec<Vec<String>>, DecodeError> {
    if raw.trim().is_empty() {
        return Err(DecodeError::EmptyResult);
    }

    if !raw.ends_with('\n') {
        let last_line = raw.lines().last().unwrap_or_default().to_string();
        return Err(DecodeError::TruncatedOutput { last_line });
    }

    Ok(raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.replace('"', "")
                .split(FIELD_DELIMITER)
                .map(|field| {
                    if field.trim().eq_ignore_ascii_case(NULL_MARKER) {
                        String::new()
                    } else {
                        field.to_string()
                    }
                })
                .collect()
        })
        .collect())
}

fn missing_or_text(field: &str) -> FieldValue {
    if field.trim().is_empty() {
        FieldValue::Missing
    } else {
        FieldValue::Text(field.to_string())
    }
}

fn coerce_number(field: &str) -> FieldValue {
    let trimmed = field.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return FieldValue::Integer(n);
    }
    if trimmed.contains('.')
        && let Ok(x) = trimmed.parse::<f64>()
        && x.is_finite()
    {
        return FieldValue::Float(x);
    }
    missing_or_text(field)
}

fn coerce_date(field: &str) -> FieldValue {
    let trimmed = field.trim();
    let primary = (trimmed.len() == 6)
        .then(|| NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok())
        .flatten();

    primary
        .or_else(|| {
            DATE_FALLBACK_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        })
        .map(FieldValue::Date)
        .unwrap_or_else(|| missing_or_text(field))
}

fn coerce_timestamp(field: &str) -> FieldValue {
    let trimmed = field.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            TIMESTAMP_FALLBACK_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(FieldValue::DateTime)
        .unwrap_or_else(|| missing_or_text(field))
}

/// Start time as HHMM
///
/// bgame drops the afternoon offset from 3-digit times (`705` is 7:05 pm)
/// and reports an unknown start as `0`, which is read as 01:00.
fn start_time_hhmm(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match field.len() {
        3 => field.parse::<u32>().ok().map(|t| t + 1200),
        4 => field.parse::<u32>().ok(),
        1 if field == "0" => Some(100),
        _ => None,
    }
}

fn merge_date_time(line: usize, date: NaiveDate, field: &str) -> Result<NaiveDateTime, DecodeError> {
    let trimmed = field.trim();
    let malformed = |reason: &str| DecodeError::MalformedTime {
        line,
        value: field.to_string(),
        reason: reason.to_string(),
    };

    let hhmm = start_time_hhmm(trimmed).ok_or_else(|| malformed("unrecognized shape"))?;
    let time = NaiveTime::from_hms_opt(hhmm / 100, hhmm % 100, 0)
        .ok_or_else(|| malformed("not a valid time of day"))?;
    Ok(date.and_time(time))
}
