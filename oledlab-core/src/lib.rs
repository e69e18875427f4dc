//! Numeric core for OLED lot analytics.
//!
//! Three pure, synchronous engines over in-memory lot records: cross-lot impurity
//! peak alignment, multi-step synthesis cost/yield rollup, and Pearson correlation
//! of derived lot factors against device lifetime. The engines hold no state
//! between calls and never perform I/O; storage and reporting live behind the
//! `store` and `report` modules.
//!
//! Error philosophy: the engines feed live-editing forms, so they degrade silently
//! (malformed cells coerce to zero, malformed grids contribute nothing, divisions
//! by zero are defined as zero). Hard errors only exist at the file boundary.

pub mod alignment;
pub mod correlation;
pub mod cost;
pub mod error;
pub mod numeric;
pub mod report;
pub mod store;
