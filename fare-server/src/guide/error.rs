//! Guide loading errors.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading a fare guide.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// The source could not be opened or read
    #[error("fare guide not found at {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source was read but lacks required structure
    #[error("malformed fare guide{}: {message}", line_suffix(.line))]
    Format { line: Option<u64>, message: String },
}

impl GuideError {
    /// A format error not tied to a particular line.
    pub fn format(message: impl Into<String>) -> Self {
        GuideError::Format {
            line: None,
            message: message.into(),
        }
    }

    /// A format error at a 1-based line number.
    pub fn format_at(line: u64, message: impl Into<String>) -> Self {
        GuideError::Format {
            line: Some(line),
            message: message.into(),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GuideError::format("no district headers found");
        assert_eq!(err.to_string(), "malformed fare guide: no district headers found");

        let err = GuideError::format_at(7, "invalid fare");
        assert_eq!(err.to_string(), "malformed fare guide (line 7): invalid fare");

        let err = GuideError::NotFound {
            path: PathBuf::from("data/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "fare guide not found at data/missing.txt: no such file"
        );
    }
}
