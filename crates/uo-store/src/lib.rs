//! uo-store: persistence and interchange.
//!
//! An append-only SQLite log of evaluation results and upload metadata,
//! CSV table import with required-column validation, and CSV/text export.

pub mod error;
pub mod export;
pub mod import;
pub mod log;

pub use error::{StoreError, StoreResult};
pub use export::{curve_to_csv, report_to_text, series_to_csv};
pub use import::{CsvTable, parse_csv};
pub use log::{ResultLog, ResultRecord, UploadRecord};
