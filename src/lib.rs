//! xlsxrows - Streaming XLSX worksheet reader producing fixed-width rows
//!
//! This crate reads every worksheet of an XLSX workbook in a single forward
//! pass over the worksheet XML and returns the cell values as fixed-width rows
//! of text. No DOM is built; shared strings are loaded once per workbook and
//! each worksheet is parsed by a fresh event-driven state machine.
//!
//! Cell values are decoded according to their encoding: shared-string indices
//! are resolved through the workbook's shared string table, numbers are rounded
//! half-up to an integer (`3.7` becomes `4`, `-2.5` becomes `-3`), and inline
//! strings are taken verbatim. Rows without any value are dropped.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Read all sheets as rows of exactly 3 columns (A, B, C)
//!     let table = xlsxrows::read_rows("students.xlsx", 3)?;
//!
//!     for row in &table {
//!         // Absent cells are `None`, distinct from empty text
//!         println!("{:?}", row.cells());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory input, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use xlsxrows::ReaderBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = ReaderBuilder::new().with_columns(3).build()?;
//! let excel_data: Vec<u8> = vec![]; // Your XLSX file bytes
//! let table = reader.read(Cursor::new(excel_data))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Rendering
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxrows::{OutputFormat, ReaderBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = ReaderBuilder::new()
//!         .with_columns(4)
//!         .with_output_format(OutputFormat::Markdown)
//!         .build()?;
//!
//!     let input = File::open("students.xlsx")?;
//!     let markdown = reader.convert_to_string(input)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Single worksheet
//!
//! Callers that already own a worksheet stream can run the parser directly
//! with [`parse_sheet`] and a [`SharedStringTable`].

mod api;
mod assembler;
mod builder;
mod error;
mod formatter;
mod output;
mod parser;
mod reference;
mod security;
mod types;

// 公開API
pub use api::OutputFormat;
pub use builder::{read_rows, ReaderBuilder, RowReader};
pub use error::{IndexKind, Result, XlsxRowsError};
pub use parser::{parse_sheet, SharedStringTable};
pub use reference::{column_index, column_name};
pub use types::{Row, SheetTable, Table};
