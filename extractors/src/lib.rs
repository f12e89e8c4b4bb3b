//! Extractors Crate
//!
//! Builds the static project dataset from the spreadsheet export of
//! project applications.
//!
//! # Architecture
//!
//! - **Types**: dataset records are defined in the `shared-types` crate
//! - **Parsing**: [`CsvParser`] reads the `;`-delimited export
//! - **Assembly**: [`DatasetBuilder`] derives supervisors, tags and metadata
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::ProjectsCsvExtractor;
//!
//! let extractor = ProjectsCsvExtractor::new();
//! let report = extractor.import_file("applications.csv", "data/projects.json")?;
//! println!("added {} projects", report.added);
//! ```

pub mod builder;
pub mod csv_parser;
pub mod projects_csv;
pub mod tags;

pub use builder::DatasetBuilder;
pub use csv_parser::{CsvParser, CsvTable};
pub use projects_csv::{ImportReport, ProjectsCsvExtractor};
pub use tags::{sanitize_tags, MASTER_TAGS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Existing dataset is unreadable: {0}")]
    Dataset(#[from] coursework_core::DatasetError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
