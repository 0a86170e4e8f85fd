//! Output generation.
//!
//! # Submodules
//!
//! - [`xlsx`]: Writes the finished records to a single-sheet workbook
//!
//! # Output Structure
//!
//! ```text
//! | Title | Summary | Link | hi | te |
//! |-------|---------|------|----|----|
//! | ...   | ...     | ...  | .. | .. |
//! ```
//!
//! The file is written once, after every article has been processed, and
//! replaces whatever was at the path before.

pub mod xlsx;
