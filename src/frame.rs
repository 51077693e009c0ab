//! Named tabular view of decoded rows
//!
//! Pairs each decoded column with its dictionary name and offers the two
//! joins callers commonly want on top of raw rows: the calendar date behind
//! a game id column, and player names behind a player id column.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::decode::{FieldValue, TypedRow};
use crate::query::GameId;
use crate::tables::{BioTable, FieldDictionary};

/// Header of the column [`Frame::insert_game_dates`] adds
pub const GAME_DATE_HEADER: &str = "date";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    headers: Vec<String>,
    rows: Vec<TypedRow>,
}

impl Frame {
    pub fn new(headers: Vec<String>, rows: Vec<TypedRow>) -> Self {
        Self { headers, rows }
    }

    /// Name decoded rows with the dictionary entries of `columns`
    pub fn from_rows(dictionary: &FieldDictionary, columns: &[u16], rows: Vec<TypedRow>) -> Self {
        let headers = columns.iter().map(|c| dictionary.header(*c)).collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TypedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Values of one column, top to bottom
    pub fn column(&self, header: &str) -> Option<Vec<&FieldValue>> {
        let index = self.column_index(header)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }

    /// Add a `date` column after the game id column `header`
    ///
    /// Returns `false` when the frame has no such column. Ids that do not
    /// parse yield `Missing`.
    pub fn insert_game_dates(&mut self, header: &str) -> bool {
        let Some(index) = self.column_index(header) else {
            return false;
        };

        self.headers.insert(index + 1, GAME_DATE_HEADER.to_string());
        self.rows = self
            .rows
            .iter()
            .map(|row| {
                let date = row
                    .get(index)
                    .and_then(FieldValue::as_text)
                    .and_then(|id| GameId::parse(id).ok())
                    .map(|id| FieldValue::Date(id.date()))
                    .unwrap_or(FieldValue::Missing);
                row.with_inserted(index + 1, vec![date])
            })
            .collect();
        true
    }

    /// Add `<header> Last` and `<header> First` after the player id column `header`
    ///
    /// Returns `false` when the frame has no such column. Unknown ids yield `Missing`.
    pub fn insert_names(&mut self, header: &str, bio: &BioTable) -> bool {
        let Some(index) = self.column_index(header) else {
            return false;
        };

        self.headers.insert(index + 1, format!("{} Last", header));
        self.headers.insert(index + 2, format!("{} First", header));
        self.rows = self
            .rows
            .iter()
            .map(|row| {
                let player = row
                    .get(index)
                    .and_then(FieldValue::as_text)
                    .and_then(|id| bio.get(id.trim()));
                let (last, first) = match player {
                    Some(name) => (
                        FieldValue::Text(name.last.clone()),
                        FieldValue::Text(name.first.clone()),
                    ),
                    None => (FieldValue::Missing, FieldValue::Missing),
                };
                row.with_inserted(index + 1, vec![last, first])
            })
            .collect();
        true
    }

    /// One JSON object per row, keyed by header
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row.values())
                    .map(|(header, value)| {
                        (
                            header.clone(),
                            serde_json::to_value(value).unwrap_or(Value::Null),
                        )
                    })
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}
