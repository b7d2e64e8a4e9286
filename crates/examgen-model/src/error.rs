//! Error taxonomy shared by every examgen crate.
//!
//! Errors are raised where they are detected and propagated unchanged; nothing
//! in the pipeline retries. One failing specification document aborts only
//! that document.

use thiserror::Error;

use crate::examination::Parameter;
use crate::text::Style;

/// Malformed inline markup in a text field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A balanced `<name>...</name>` pair whose name is not a known style.
    #[error("unknown style tag <{name}> at byte {position}")]
    UnknownStyle { name: String, position: usize },
}

/// Invalid or incomplete specification input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A parameter needed by the requested operation is absent.
    #[error("missing required parameter {0}")]
    MissingParameter(Parameter),

    /// A parameter key outside the supported vocabulary.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A parameter value with the wrong shape.
    #[error("invalid value for parameter {parameter}: {reason}")]
    InvalidParameter { parameter: Parameter, reason: String },

    /// More questions requested per variant than the master list holds.
    #[error("limit exceeds question count: limit {limit}, available {available}")]
    LimitExceedsQuestions { limit: usize, available: usize },

    /// A question node whose `type` tag is not recognized.
    #[error("unknown question type '{found}' at {path}")]
    UnknownQuestionType { path: String, found: String },

    /// A question node lacking a required field.
    #[error("missing field '{field}' at {path}")]
    MissingField { path: String, field: &'static str },

    /// A question node field with the wrong type.
    #[error("field '{field}' at {path} must be {expected}")]
    InvalidField {
        path: String,
        field: &'static str,
        expected: &'static str,
    },

    /// The document itself has the wrong shape.
    #[error("invalid specification document: {0}")]
    InvalidDocument(String),
}

/// A notation cannot express part of the examination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The notation has no mapping for a style.
    #[error("{notation} cannot render style {style}")]
    UnsupportedStyle {
        notation: &'static str,
        style: Style,
    },

    /// The notation has no mapping for a question shape.
    #[error("{notation} cannot render question {path}: {reason}")]
    UnsupportedQuestion {
        notation: &'static str,
        path: String,
        reason: String,
    },

    /// Text contains characters the notation cannot carry.
    #[error("{notation} cannot represent text: {reason}")]
    UnrepresentableText {
        notation: &'static str,
        reason: String,
    },

    /// The XML writer failed.
    #[error("xml writer error: {0}")]
    Xml(String),
}

impl RenderError {
    /// Wrap any XML writer failure.
    pub fn xml(error: impl std::fmt::Display) -> Self {
        RenderError::Xml(error.to_string())
    }
}
