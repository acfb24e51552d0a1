use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Marks the start and the end of a function body.
pub const DELIMITER: &str = "$$";
/// Ends a statement outside of function bodies.
pub const TERMINATOR: char = ';';
/// Starts a line comment, when it is the first non-whitespace content of a line.
pub const COMMENT: &str = "--";

/// The extractor's parsing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Lines are split on terminators, blank and comment lines are dropped.
    Normal,
    /// Lines are buffered verbatim until the closing delimiter.
    FunctionBody,
}

impl Mode {
    fn toggle(self) -> Self {
        match self {
            Mode::Normal => Mode::FunctionBody,
            Mode::FunctionBody => Mode::Normal,
        }
    }
}

/// A line-at-a-time statement splitter. Feed it lines with `push_line`, which returns a statement
/// whenever one is completed, and call `finish` at end of input to flush any trailing statement.
///
/// A line containing the delimiter flips the mode once, no matter how many delimiters it holds.
/// The flip happens before the line is handled, so the opening delimiter line is buffered
/// verbatim as part of the body while the closing one is handled in normal mode, where its
/// terminator (if any) completes the statement.
#[derive(Debug)]
pub struct Extractor {
    mode: Mode,
    buffer: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Creates a new extractor in normal mode with an empty buffer.
    pub fn new() -> Self {
        Self { mode: Mode::Normal, buffer: String::new() }
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Consumes a single line (without its line ending), returning a completed statement if any.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        if line.contains(DELIMITER) {
            self.mode = self.mode.toggle();
        }
        match self.mode {
            Mode::FunctionBody => {
                self.buffer.push_str(line);
                self.buffer.push('\n');
                None
            }
            Mode::Normal => {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
                    return None;
                }
                if line.contains(TERMINATOR) {
                    self.buffer.push_str(&line.replace(TERMINATOR, ""));
                    Some(std::mem::take(&mut self.buffer))
                } else {
                    self.buffer.push_str(line);
                    self.buffer.push('\n');
                    None
                }
            }
        }
    }

    /// Ends the input, returning the unterminated trailing statement if there is one, without the
    /// line break buffered after its last line. Unbalanced delimiters end up here too.
    pub fn finish(mut self) -> Option<String> {
        if self.buffer.ends_with('\n') {
            self.buffer.pop();
        }
        Some(self.buffer).filter(|buffer| !buffer.is_empty())
    }
}

/// Splits script text into statements, in order of appearance.
pub fn extract(text: &str) -> Vec<String> {
    let mut extractor = Extractor::new();
    let mut statements: Vec<String> =
        text.lines().filter_map(|line| extractor.push_line(line)).collect();
    statements.extend(extractor.finish());
    statements
}

/// Reads a script file line by line and splits it into statements.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| Error::IO(format!("Failed to open {}: {}", path.display(), err)))?;

    let mut extractor = Extractor::new();
    let mut statements = Vec::new();
    for line in BufReader::new(file).lines() {
        let line =
            line.map_err(|err| Error::IO(format!("Failed to read {}: {}", path.display(), err)))?;
        if let Some(statement) = extractor.push_line(&line) {
            statements.push(statement);
        }
    }
    if extractor.mode() == Mode::FunctionBody {
        debug!("{} ends inside a function body", path.display());
    }
    statements.extend(extractor.finish());

    debug!("Extracted {} statements from {}", statements.len(), path.display());
    Ok(statements)
}
