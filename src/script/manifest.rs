use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_derive::Deserialize;

use crate::error::{Error, Result};

/// The manifest file extension.
pub const EXTENSION: &str = "xml";
/// The manifest document's root element.
pub const ROOT: &str = "databaseChangeLog";

/// An ordered changelog of script includes, e.g.:
///
/// ```xml
/// <databaseChangeLog>
///     <include file="tables.sql"/>
///     <include file="functions/audit.sql"/>
/// </databaseChangeLog>
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChangeLog {
    #[serde(rename = "include", default)]
    pub includes: Vec<Include>,
}

/// A single script reference, relative to the manifest's folder.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Include {
    #[serde(rename = "@file")]
    pub file: String,
}

impl ChangeLog {
    /// Parses a changelog document. Anything besides include elements is ignored.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) => {
                    if e.local_name().as_ref() != ROOT.as_bytes() {
                        return Err(Error::Parse(format!(
                            "Expected root element {}, found {}",
                            ROOT,
                            String::from_utf8_lossy(e.local_name().as_ref())
                        )));
                    }
                    break;
                }
                Event::Eof => return Err(Error::Parse("Missing root element".into())),
                _ => {}
            }
        }
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Reads and parses a changelog file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)
            .map_err(|err| Error::IO(format!("Failed to read {}: {}", path.display(), err)))?;
        Self::parse(&xml).map_err(|err| match err {
            Error::Parse(msg) => Error::Parse(format!("{}: {}", path.display(), msg)),
            err => err,
        })
    }

    /// Returns the included file names, in document order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(|include| include.file.as_str())
    }
}

/// Checks whether a file name denotes a manifest.
pub fn is_manifest(name: &Path) -> bool {
    name.extension().map_or(false, |ext| ext == EXTENSION)
}
