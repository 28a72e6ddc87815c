//! Guide sources and loading.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use super::catalogue::RouteGuide;
use super::error::GuideError;
use super::table::parse_table;
use super::text::parse_text;

/// Error returned when parsing an unknown guide format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown guide format {0:?} (expected \"text\" or \"table\")")]
pub struct InvalidGuideFormat(String);

/// How a guide source is authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideFormat {
    /// Line-oriented district/route/segment grammar (keyed routes)
    Text,
    /// CSV table of standalone segments (flat segments)
    Table,
}

impl GuideFormat {
    /// Infer the format from a file extension: `.csv` is a table,
    /// anything else is text.
    pub fn infer(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv { GuideFormat::Table } else { GuideFormat::Text }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuideFormat::Text => "text",
            GuideFormat::Table => "table",
        }
    }
}

impl fmt::Display for GuideFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuideFormat {
    type Err = InvalidGuideFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(GuideFormat::Text),
            "table" | "csv" => Ok(GuideFormat::Table),
            _ => Err(InvalidGuideFormat(s.to_string())),
        }
    }
}

/// Where a guide comes from and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideSource {
    path: PathBuf,
    format: GuideFormat,
}

impl GuideSource {
    pub fn new(path: impl Into<PathBuf>, format: GuideFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// A source whose format is inferred from its extension.
    pub fn inferred(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = GuideFormat::infer(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> GuideFormat {
        self.format
    }
}

/// Read and parse a guide.
///
/// Fails with [`GuideError::NotFound`] when the file cannot be opened or
/// read, and with [`GuideError::Format`] when its contents are unusable.
/// No partial guide is ever returned.
pub fn load(source: &GuideSource) -> Result<RouteGuide, GuideError> {
    let not_found = |e: io::Error| GuideError::NotFound {
        path: source.path.clone(),
        source: e,
    };

    let file = File::open(&source.path).map_err(not_found)?;
    let guide = match source.format {
        GuideFormat::Text => {
            let mut text = String::new();
            BufReader::new(file)
                .read_to_string(&mut text)
                .map_err(|e| match e.kind() {
                    io::ErrorKind::InvalidData => GuideError::format("source is not valid UTF-8"),
                    _ => not_found(e),
                })?;
            parse_text(&text)?
        }
        GuideFormat::Table => parse_table(BufReader::new(file))?,
    };

    info!(
        path = %source.path.display(),
        format = %source.format,
        districts = guide.len(),
        segments = guide.segment_count(),
        "Loaded fare guide"
    );
    Ok(guide)
}
