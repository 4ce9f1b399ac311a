//! Report rendering and the export round-trip codec.
//!
//! Two artifacts are built from the same ranked row sequence:
//!
//! - [`table::render_text`]: the fixed five-column display table
//!   (Index, Name, Accession, Mismatch, Alignment) with stacked alignment
//!   blocks; an empty result renders the "No hits found." message
//! - [`export::encode`]: the lossless flat export text (tab-separated,
//!   one header line, alignment blocks flattened to single spaces)
//!
//! [`export::decode`] reverses the flat encoding so a later, independent
//! call can validate and re-split downloaded text. [`store::ExportStore`]
//! is the download boundary: it persists export text byte-for-byte under a
//! prefix + taxid + timestamp name and performs no reinterpretation.

pub mod export;
pub mod store;
pub mod table;
