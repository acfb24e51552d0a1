//! Script handling: which files to run, in which order, and how each file splits into
//! statements. Everything here is lexical; statement meaning is never interpreted.

pub mod extractor;
pub mod manifest;
pub mod resolver;

pub use extractor::{extract, extract_file, Extractor, Mode};
pub use manifest::{ChangeLog, Include};
pub use resolver::resolve;
