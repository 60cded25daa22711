//! I/O module
//!
//! Handles CSV parsing, template loading and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, summary output)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `templates` - JSON reason template snapshot loading

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;
pub mod templates;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_fine_record, write_summaries_csv, FineCsvRecord};
pub use sync_reader::SyncReader;
pub use templates::load_templates;
