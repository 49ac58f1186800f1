// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// The ways a conversion can fail. Every variant aborts the whole conversion.
#[derive(Debug, PartialEq)]
pub enum ConvertError {
    /// The input Markdown file does not exist.
    InputNotFound { path: PathBuf },
    /// A card body does not split into exactly a front and a back.
    MalformedCard {
        source_path: String,
        /// 1-based line number of the card's `## ` header.
        line: usize,
        header: String,
        /// Number of `---` lines found in the body.
        separators: usize,
    },
    /// Two hierarchy nodes flatten to the same fully-qualified name.
    DuplicateDeckName { name: String },
    /// A deck used by the notes is missing from the deck hierarchy.
    UnknownDeck { name: String },
    /// A deck id that cannot be written as an EDN keyword.
    InvalidDeckId { name: String, id: String },
    Io { path: PathBuf, message: String },
    Archive { path: PathBuf, message: String },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::InputNotFound { path } => write!(
                f,
                "Cannot read markdown file at {} -- file does not exist.",
                path.display()
            ),
            ConvertError::MalformedCard {
                source_path,
                line,
                header,
                separators,
            } => write!(
                f,
                "Card '{header}' must have exactly one '---' line between front and back, found {separators}. Location: {source_path}:{line}"
            ),
            ConvertError::DuplicateDeckName { name } => {
                write!(f, "Duplicate deck name in hierarchy: {name}")
            }
            ConvertError::UnknownDeck { name } => {
                write!(f, "Deck '{name}' is not declared in the deck hierarchy.")
            }
            ConvertError::InvalidDeckId { name, id } => {
                write!(f, "Deck '{name}' has an invalid id: {id:?}")
            }
            ConvertError::Io { path, message } => {
                write!(f, "I/O error on {}: {message}", path.display())
            }
            ConvertError::Archive { path, message } => {
                write!(f, "Failed to write archive {}: {message}", path.display())
            }
        }
    }
}

impl Error for ConvertError {}

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<FromUtf8Error> for ErrorReport {
    fn from(value: FromUtf8Error) -> Self {
        ErrorReport {
            message: format!("UTF-8 conversion error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<ConvertError> for ErrorReport {
    fn from(value: ConvertError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_wraps_convert_error() {
        let err = ConvertError::UnknownDeck {
            name: "Biology".to_string(),
        };
        let report: ErrorReport = err.into();
        assert_eq!(
            report.to_string(),
            "error: Deck 'Biology' is not declared in the deck hierarchy."
        );
    }

    #[test]
    fn test_malformed_card_location() {
        let err = ConvertError::MalformedCard {
            source_path: "notes.md".to_string(),
            line: 3,
            header: "Basic".to_string(),
            separators: 0,
        };
        assert!(err.to_string().ends_with("Location: notes.md:3"));
    }
}
