//! Manga Check Common Library
//!
//! CLIから使われる型と、発売日判定・巻数照合の純粋なロジック

pub mod types;
pub mod error;
pub mod date;
pub mod title;
pub mod selector;
pub mod sheet;

pub use types::{CatalogItem, CatalogPage, ReconciliationEntry, TrackedSeries, VolumeCandidate};
pub use error::{Error, Result};
pub use date::{is_past, ReleaseDate};
pub use title::{build_match_target, matches, next_volume, VOLUME_PLACEHOLDER};
pub use selector::{select_candidate, Selection, UnparsedDate};
pub use sheet::{parse_rows, plan_updates, sheet_row, CellUpdate, ParsedSheet, RowWarning};
