//! Franchise resolution: team code + season -> event file extension

use crate::tables::FranchiseTable;

use super::error::QueryError;

pub struct FranchiseResolver<'a> {
    table: &'a FranchiseTable,
}

impl<'a> FranchiseResolver<'a> {
    pub fn new(table: &'a FranchiseTable) -> Self {
        Self { table }
    }

    /// Fail with `UnknownTeam` when the code is absent
    pub fn check_team(&self, team: &str) -> Result<(), QueryError> {
        if self.table.contains(team) {
            Ok(())
        } else {
            Err(QueryError::UnknownTeam {
                team: team.to_string(),
                known: self.table.len(),
            })
        }
    }

    /// Extension token of the segment covering `year`
    pub fn resolve(&self, team: &str, year: i32) -> Result<&'a str, QueryError> {
        let history = self.table.history(team).ok_or_else(|| QueryError::UnknownTeam {
            team: team.to_string(),
            known: self.table.len(),
        })?;

        history
            .segment_for(year)
            .map(|segment| segment.extension.as_str())
            .ok_or_else(|| QueryError::TeamInactiveForYear {
                team: team.to_string(),
                year,
                active: history.active_years(),
            })
    }
}
