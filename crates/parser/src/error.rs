use std::fmt::Debug;
use thiserror::Error;

/// Fatal compile failures. Every variant carries the 1-based line number of
/// the offending source line; the compile aborts on the first one raised.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Parse error in line {line}: unable to classify `{text}`")]
    UnclassifiedLine { line: usize, text: String },
    #[error("Parse error in line {line}: `{text}` must be exactly two words: `EventType EventName`")]
    MalformedEventDefinition { line: usize, text: String },
    #[error("Parse error in line {line}: event `{name}` is declared more than once")]
    DuplicateEvent { line: usize, name: String },
    #[error("Parse error in line {line}: `{word}` is a reserved word")]
    ReservedWordMisuse { line: usize, word: String },
    #[error("Parse error in line {line}: unknown event `{name}`")]
    UnknownEvent { line: usize, name: String },
    #[error("Parse error in line {line}: unable to parse value `{text}`")]
    UnparsableValue { line: usize, text: String },
    #[error("Parse error in line {line}: constraint template `{name}` is not supported")]
    UnknownTemplate { line: usize, name: String },
    #[error("Parse error in line {line}: more than three condition segments in `{text}`")]
    TooManyConditionSegments { line: usize, text: String },
    #[error("Parse error in line {line}: unable to parse condition `{text}`: {reason}")]
    UnparsableCondition {
        line: usize,
        text: String,
        reason: String,
    },
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
