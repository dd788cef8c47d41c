//! Input sources.
//!
//! This module reads delimited employee files into raw records.

pub mod reader;

pub use reader::{read_all, InputOptions};
