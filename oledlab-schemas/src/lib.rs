//! Shared record schemas for the OledLab workspace.
//!
//! These are the shapes of the documents the hosting application persists in its
//! cloud document store. Incoming documents are loosely typed (numbers may arrive as
//! strings, with separators, or be missing entirely), so sanitization lives here at
//! the serde boundary: once a record deserializes, downstream code can assume fully
//! populated, finite numeric fields.

pub mod cost;
pub mod file_formats;
pub mod loose;
pub mod lot;
