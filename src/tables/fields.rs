//! Column index -> field name dictionaries for bevent and bgame

use std::collections::BTreeMap;
use std::path::Path;

use crate::query::{ColumnSelection, Tool};

use super::error::{TableError, read_table};

/// Marker bevent's dictionary appends to the fields it reports by default
const DEFAULT_FIELD_MARKER: char = '*';

/// Field names for one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDictionary {
    tool: Tool,
    names: BTreeMap<u16, String>,
}

impl FieldDictionary {
    pub fn new(tool: Tool, names: BTreeMap<u16, String>) -> Self {
        Self { tool, names }
    }

    /// Parse `{"0": "game id*", "1": "visiting team", ...}`
    pub fn from_json(tool: Tool, json: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut names = BTreeMap::new();
        for (key, name) in raw {
            let index = key
                .trim()
                .parse::<u16>()
                .map_err(|_| TableError::InvalidColumnKey {
                    table: tool.to_string(),
                    key: key.clone(),
                })?;
            names.insert(index, name);
        }
        Ok(Self { tool, names })
    }

    pub fn load(tool: Tool, path: &Path) -> Result<Self, TableError> {
        Self::from_json(tool, &read_table(path)?)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn name(&self, column: u16) -> Option<&str> {
        self.names.get(&column).map(String::as_str)
    }

    /// Header for a column: its dictionary name, or the index when unnamed
    pub fn header(&self, column: u16) -> String {
        self.name(column)
            .map(str::to_string)
            .unwrap_or_else(|| column.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Columns queried when the caller names none
    ///
    /// bevent reports only the starred fields by default; bgame reports every field.
    pub fn default_selection(&self) -> ColumnSelection {
        match self.tool {
            Tool::Bevent => self
                .names
                .iter()
                .filter(|(_, name)| name.contains(DEFAULT_FIELD_MARKER))
                .map(|(index, _)| i64::from(*index))
                .collect(),
            Tool::Bgame | Tool::Box => self.names.keys().map(|i| i64::from(*i)).collect(),
        }
    }
}
