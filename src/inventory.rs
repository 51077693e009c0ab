//! Event file inventory
//!
//! The valid season range is whatever the events directory holds: every
//! `.EVA`/`.EVN` file name carries its season as the first 4-digit run
//! (`2019ATL.EVN`). The earliest and latest seasons found become the
//! [`YearBounds`] handed to the date resolver.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::query::YearBounds;

/// Extensions of per-team, per-season event files
pub const EVENT_FILE_EXTENSIONS: [&str; 2] = ["EVA", "EVN"];

static SEASON_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Error scanning the events directory
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("IO error reading {path}: {reason}")]
    Io { path: PathBuf, reason: String },
    #[error("No event files (.EVA/.EVN) found in {0}")]
    NoEventFiles(PathBuf),
}

/// Seasons with at least one event file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    seasons: BTreeSet<i32>,
}

impl Inventory {
    /// Collect seasons from event file names; other files are ignored
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let seasons = names
            .into_iter()
            .filter_map(|name| season_of(name.as_ref()))
            .collect();
        Self { seasons }
    }

    /// Scan `dir` for event files
    pub fn scan(dir: &Path) -> Result<Self, InventoryError> {
        if !dir.is_dir() {
            return Err(InventoryError::DirectoryNotFound(dir.to_path_buf()));
        }

        let io_error = |e: std::io::Error| InventoryError::Io {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        let inventory = Self::from_file_names(&names);
        debug!(
            "Scanned {} files in {}, {} seasons",
            names.len(),
            dir.display(),
            inventory.seasons.len()
        );
        Ok(inventory)
    }

    pub fn seasons(&self) -> impl Iterator<Item = i32> + '_ {
        self.seasons.iter().copied()
    }

    pub fn contains(&self, season: i32) -> bool {
        self.seasons.contains(&season)
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    /// Earliest and latest seasons, or `None` for an empty inventory
    pub fn bounds(&self) -> Option<YearBounds> {
        let first = *self.seasons.first()?;
        let last = *self.seasons.last()?;
        Some(YearBounds::new(first, last))
    }
}

/// Scan `dir` and derive its year bounds
pub fn scan_bounds(dir: &Path) -> Result<YearBounds, InventoryError> {
    let bounds = Inventory::scan(dir)?
        .bounds()
        .ok_or_else(|| InventoryError::NoEventFiles(dir.to_path_buf()))?;
    info!(
        "Event files in {} cover {} through {}",
        dir.display(),
        bounds.first,
        bounds.last
    );
    Ok(bounds)
}

fn season_of(name: &str) -> Option<i32> {
    let (_, extension) = name.rsplit_once('.')?;
    if !EVENT_FILE_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(extension))
    {
        return None;
    }
    SEASON_REGEX.find(name)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seasons_from_names() {
        let inventory = Inventory::from_file_names([
            "2019ATL.EVN",
            "1977SEA.EVA",
            "2019PIT.evn",
            "TEAM2019",
            "2021ATL.ROS",
            "notes.txt",
        ]);
        assert_eq!(inventory.seasons().collect::<Vec<_>>(), vec![1977, 2019]);
        assert_eq!(inventory.bounds(), Some(YearBounds::new(1977, 2019)));
    }

    #[test]
    fn test_empty_inventory_has_no_bounds() {
        let inventory = Inventory::from_file_names(Vec::<String>::new());
        assert!(inventory.bounds().is_none());
    }

    #[test]
    fn test_floor_applies_to_first_season() {
        let inventory = Inventory::from_file_names(["1850XXX.EVA", "1900BSN.EVN"]);
        assert_eq!(inventory.bounds().unwrap().first, 1876);
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2018ATL.EVN", "2022ATL.EVN", "TEAM2022"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let bounds = scan_bounds(dir.path()).unwrap();
        assert_eq!((bounds.first, bounds.last), (2018, 2022));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            scan_bounds(dir.path()),
            Err(InventoryError::NoEventFiles(_))
        ));
        assert!(matches!(
            scan_bounds(&dir.path().join("missing")),
            Err(InventoryError::DirectoryNotFound(_))
        ));
    }
}
