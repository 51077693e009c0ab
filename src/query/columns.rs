//! Column set compilation
//!
//! Turns a caller's column selection into the compact `-f` range notation
//! the tools accept (`0-2,5,7-9`), and records the positional metadata the
//! output decoder needs later:
//! - the final sorted column list (output position `i` is column `columns[i]`)
//! - for bgame, the signed distance between the linked date and time columns

use std::collections::BTreeSet;

use super::error::QueryError;
use super::tool::Tool;

/// A caller's requested column indices, sign-normalized and deduplicated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    columns: BTreeSet<u64>,
}

impl ColumnSelection {
    /// Build a selection from raw indices; negative values count as their absolute value
    pub fn new<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            columns: indices.into_iter().map(i64::unsigned_abs).collect(),
        }
    }

    /// Every column the tool reports
    pub fn all(tool: Tool) -> Self {
        let max = tool.max_column().map(i64::from).unwrap_or(-1);
        Self::new(0..=max)
    }

    /// Parse the tools' own range notation, e.g. `0-2,5,7-9`
    ///
    /// A token with a leading minus and no range (`-3`) is a negative single
    /// index and is normalized like any other.
    pub fn parse(tool: Tool, text: &str) -> Result<Self, QueryError> {
        let invalid = |reason: String| QueryError::InvalidColumnSet { tool, reason };
        let max = tool
            .max_column()
            .map(u64::from)
            .ok_or_else(|| invalid("the tool does not accept a column selection".to_string()))?;
        let mut columns = BTreeSet::new();

        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let number = |s: &str| {
                s.trim()
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("'{}' is not a column index", token)))
            };

            if let Some(single) = token.strip_prefix('-') {
                columns.insert(number(single)?);
                continue;
            }

            match token.split_once('-') {
                Some((low, high)) => {
                    let (low, high) = (number(low)?, number(high)?);
                    if low > high {
                        return Err(invalid(format!(
                            "range '{}' runs backwards ({} > {})",
                            token, low, high
                        )));
                    }
                    if high > max {
                        return Err(invalid(format!(
                            "columns run 0 through {}, range '{}' ends at {}",
                            max, token, high
                        )));
                    }
                    columns.extend(low..=high);
                }
                None => {
                    columns.insert(number(token)?);
                }
            }
        }

        Ok(Self { columns })
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn contains(&self, column: u64) -> bool {
        self.columns.contains(&column)
    }

    /// Normalized indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.columns.iter().copied()
    }
}

impl FromIterator<i64> for ColumnSelection {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Signed distance, in sorted-position units, from the date column to the
/// time column it is paired with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedColumnMetadata {
    pub offset: isize,
}

impl LinkedColumnMetadata {
    /// Output position of the paired date, given the time column's position
    pub fn date_position(&self, time_position: usize) -> Option<usize> {
        time_position.checked_add_signed(-self.offset)
    }
}

/// Result of compiling a selection against one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledColumns {
    pub tool: Tool,
    /// Range string passed after `-f`
    pub range: String,
    /// Final sorted column list; position `i` of every output line is `columns[i]`
    pub columns: Vec<u16>,
    /// Present only when both linked columns survive into `columns`
    pub link: Option<LinkedColumnMetadata>,
}

impl CompiledColumns {
    /// `["-f", range]`
    pub fn args(&self) -> Vec<String> {
        vec!["-f".to_string(), self.range.clone()]
    }

    pub fn position_of(&self, column: u16) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

/// Validate and compress a selection for `tool`
pub fn compile(selection: &ColumnSelection, tool: Tool) -> Result<CompiledColumns, QueryError> {
    let invalid = |reason: String| QueryError::InvalidColumnSet { tool, reason };

    let max = tool
        .max_column()
        .ok_or_else(|| invalid("the tool does not accept a column selection".to_string()))?;

    if selection.is_empty() {
        return Err(invalid(format!(
            "at least one column is required (columns run 0 through {})",
            max
        )));
    }

    let out_of_range: Vec<u64> = selection.iter().filter(|c| *c > u64::from(max)).collect();
    if !out_of_range.is_empty() {
        return Err(invalid(format!(
            "columns run 0 through {}, {:?} selected",
            max, out_of_range
        )));
    }

    // Every index is <= max, which fits u16.
    let mut columns: BTreeSet<u16> = selection.iter().map(|c| c as u16).collect();

    if let Some((date, time)) = tool.linked_columns()
        && columns.contains(&time)
    {
        columns.insert(date);
    }

    let columns: Vec<u16> = columns.into_iter().collect();
    let link = link_offset(tool, &columns);

    let range = if columns.len() == usize::from(max) + 1 {
        tool.all_columns_shorthand()
            .map(str::to_string)
            .unwrap_or_else(|| compress_range(&columns))
    } else {
        compress_range(&columns)
    };

    Ok(CompiledColumns {
        tool,
        range,
        columns,
        link,
    })
}

fn link_offset(tool: Tool, columns: &[u16]) -> Option<LinkedColumnMetadata> {
    let (date, time) = tool.linked_columns()?;
    let date_position = columns.iter().position(|c| *c == date)?;
    let time_position = columns.iter().position(|c| *c == time)?;
    Some(LinkedColumnMetadata {
        offset: time_position as isize - date_position as isize,
    })
}

/// Collapse sorted, distinct columns into `low-high` runs joined by commas
pub fn compress_range(columns: &[u16]) -> String {
    let mut segments = Vec::new();
    let mut iter = columns.iter().copied().peekable();

    while let Some(low) = iter.next() {
        let mut high = low;
        while let Some(&next) = iter.peek() {
            if next != high + 1 {
                break;
            }
            high = next;
            iter.next();
        }
        if low == high {
            segments.push(low.to_string());
        } else {
            segments.push(format!("{}-{}", low, high));
        }
    }

    segments.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_runs_and_singletons() {
        assert_eq!(compress_range(&[0, 1, 2, 5, 7, 8, 9]), "0-2,5,7-9");
        assert_eq!(compress_range(&[3]), "3");
        assert_eq!(compress_range(&[3, 5]), "3,5");
        assert_eq!(compress_range(&[3, 4]), "3-4");
    }

    #[test]
    fn test_compile_example_selection() {
        let selection = ColumnSelection::new([9, 0, 8, 2, 1, 7, 5]);
        let compiled = compile(&selection, Tool::Bevent).unwrap();
        assert_eq!(compiled.range, "0-2,5,7-9");
        assert_eq!(compiled.columns, vec![0, 1, 2, 5, 7, 8, 9]);
        assert!(compiled.link.is_none());
    }

    #[test]
    fn test_negative_and_duplicate_indices_normalize() {
        let selection = ColumnSelection::new([-3, 3, 4, -4, 10]);
        let compiled = compile(&selection, Tool::Bevent).unwrap();
        assert_eq!(compiled.columns, vec![3, 4, 10]);
        assert_eq!(compiled.range, "3-4,10");
    }

    #[test]
    fn test_full_range_uses_shorthand() {
        let compiled = compile(&ColumnSelection::all(Tool::Bevent), Tool::Bevent).unwrap();
        assert_eq!(compiled.range, "0-96");
        assert_eq!(compiled.columns.len(), 97);

        let compiled = compile(&ColumnSelection::all(Tool::Bgame), Tool::Bgame).unwrap();
        assert_eq!(compiled.range, "0-84");
    }

    #[test]
    fn test_empty_selection_rejected() {
        let err = compile(&ColumnSelection::default(), Tool::Bgame).unwrap_err();
        assert!(matches!(err, QueryError::InvalidColumnSet { .. }));
        assert!(err.to_string().contains("0 through 84"));
    }

    #[test]
    fn test_out_of_range_rejected_with_offenders() {
        let err = compile(&ColumnSelection::new([0, 85, 90]), Tool::Bgame).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("[85, 90]"));
        assert!(message.contains("0 through 84"));

        assert!(compile(&ColumnSelection::new([96]), Tool::Bevent).is_ok());
        assert!(compile(&ColumnSelection::new([97]), Tool::Bevent).is_err());
    }

    #[test]
    fn test_box_takes_no_columns() {
        assert!(compile(&ColumnSelection::new([0]), Tool::Box).is_err());
    }

    #[test]
    fn test_time_without_date_injects_date() {
        let compiled = compile(&ColumnSelection::new([0, 4, 6]), Tool::Bgame).unwrap();
        assert_eq!(compiled.columns, vec![0, 1, 4, 6]);
        assert_eq!(compiled.range, "0-1,4,6");
        assert_eq!(compiled.link, Some(LinkedColumnMetadata { offset: 1 }));
    }

    #[test]
    fn test_link_offset_counts_positions_between() {
        let compiled = compile(&ColumnSelection::new([1, 2, 3, 4]), Tool::Bgame).unwrap();
        assert_eq!(compiled.link, Some(LinkedColumnMetadata { offset: 3 }));
        assert_eq!(compiled.link.unwrap().date_position(3), Some(0));
    }

    #[test]
    fn test_date_alone_has_no_link() {
        let compiled = compile(&ColumnSelection::new([1, 2]), Tool::Bgame).unwrap();
        assert!(compiled.link.is_none());
    }

    #[test]
    fn test_bevent_never_links() {
        let compiled = compile(&ColumnSelection::new([4]), Tool::Bevent).unwrap();
        assert_eq!(compiled.columns, vec![4]);
        assert!(compiled.link.is_none());
    }

    #[test]
    fn test_parse_range_notation() {
        let selection = ColumnSelection::parse(Tool::Bevent, "0-2, 5,7-9").unwrap();
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 1, 2, 5, 7, 8, 9]);

        let selection = ColumnSelection::parse(Tool::Bevent, "-3,3").unwrap();
        assert_eq!(selection.len(), 1);

        assert!(ColumnSelection::parse(Tool::Bevent, "9-2").is_err());
        assert!(ColumnSelection::parse(Tool::Bevent, "a,b").is_err());
    }

    #[test]
    fn test_parse_rejects_ranges_past_max_before_expanding() {
        for text in ["0-97", "0-4000000000", "5,90-18446744073709551615"] {
            assert!(
                matches!(
                    ColumnSelection::parse(Tool::Bevent, text),
                    Err(QueryError::InvalidColumnSet {
                        tool: Tool::Bevent,
                        ..
                    })
                ),
                "{text}"
            );
        }
        assert!(ColumnSelection::parse(Tool::Bgame, "80-84").is_ok());
        assert!(ColumnSelection::parse(Tool::Bgame, "80-85").is_err());
        assert!(ColumnSelection::parse(Tool::Box, "0").is_err());
    }

    #[test]
    fn test_range_string_round_trips() {
        let selections: [&[i64]; 4] = [&[0], &[0, 1, 2, 5, 7, 8, 9], &[3, 10, 11, 40, 96], &[95, 96]];
        for raw in selections {
            let selection = ColumnSelection::new(raw.iter().copied());
            let compiled = compile(&selection, Tool::Bevent).unwrap();
            let reparsed = ColumnSelection::parse(Tool::Bevent, &compiled.range).unwrap();
            assert_eq!(reparsed, selection, "range {}", compiled.range);
        }
    }
}
