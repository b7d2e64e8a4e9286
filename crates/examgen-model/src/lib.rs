//! Immutable examination model: styled text, questions, examinations, and
//! the seeded scrambling that turns one master examination into per-section
//! variants.

pub mod error;
pub mod examination;
pub mod question;
pub mod random;
pub mod text;
mod variant;

pub use error::{ConfigurationError, ParseError, RenderError};
pub use examination::{Examination, Parameter, ParameterValue, Section};
pub use question::{
    AnswerOption, ClosedEnded, CompoundQuestion, OpenEnded, Question, QuestionKind, TrueFalse,
};
pub use random::{LegacyRandom, shuffled};
pub use text::{Style, TextSegment};
