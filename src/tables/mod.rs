//! Static lookup tables
//!
//! Loaded once from the JSON files in the tables directory and treated as
//! immutable afterwards:
//! - `bevent_fields.json` / `bgame_fields.json` - column dictionaries
//! - `team_extensions.json` - franchise history per team code
//! - `bio_information.json` - player names

mod bio;
mod error;
mod fields;
mod franchise;

use std::path::Path;

use tracing::info;

use crate::query::Tool;

pub use bio::{BioTable, PlayerName};
pub use error::TableError;
pub use fields::FieldDictionary;
pub use franchise::{FranchiseHistory, FranchiseSegment, FranchiseTable};

pub const BEVENT_FIELDS_FILE: &str = "bevent_fields.json";
pub const BGAME_FIELDS_FILE: &str = "bgame_fields.json";
pub const FRANCHISE_FILE: &str = "team_extensions.json";
pub const BIO_FILE: &str = "bio_information.json";

/// Every lookup table the query compiler and frame helpers consult
#[derive(Debug, Clone)]
pub struct Tables {
    pub bevent_fields: FieldDictionary,
    pub bgame_fields: FieldDictionary,
    pub franchises: FranchiseTable,
    pub bio: BioTable,
}

impl Tables {
    /// Load all tables from `dir`
    pub fn load(dir: &Path) -> Result<Self, TableError> {
        let tables = Self {
            bevent_fields: FieldDictionary::load(Tool::Bevent, &dir.join(BEVENT_FIELDS_FILE))?,
            bgame_fields: FieldDictionary::load(Tool::Bgame, &dir.join(BGAME_FIELDS_FILE))?,
            franchises: FranchiseTable::load(&dir.join(FRANCHISE_FILE))?,
            bio: BioTable::load(&dir.join(BIO_FILE))?,
        };

        info!(
            "Loaded {} franchises, {} players, {}/{} bevent/bgame fields from {}",
            tables.franchises.len(),
            tables.bio.len(),
            tables.bevent_fields.len(),
            tables.bgame_fields.len(),
            dir.display()
        );

        Ok(tables)
    }

    /// Tables holding only franchise data; dictionaries and bios are empty
    pub fn with_franchises(franchises: FranchiseTable) -> Self {
        Self {
            bevent_fields: FieldDictionary::new(Tool::Bevent, Default::default()),
            bgame_fields: FieldDictionary::new(Tool::Bgame, Default::default()),
            franchises,
            bio: BioTable::default(),
        }
    }

    /// Field dictionary for a tabular tool
    pub fn fields(&self, tool: Tool) -> Option<&FieldDictionary> {
        match tool {
            Tool::Bevent => Some(&self.bevent_fields),
            Tool::Bgame => Some(&self.bgame_fields),
            Tool::Box => None,
        }
    }
}
