//! Question variants and their seeded scrambling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::random::{LegacyRandom, shuffled};
use crate::text::TextSegment;

/// Type tag of a question node in a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    OpenEnded,
    ClosedEnded,
    TrueFalse,
    Compound,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::OpenEnded => "open-ended",
            QuestionKind::ClosedEnded => "closed-ended",
            QuestionKind::TrueFalse => "true-false",
            QuestionKind::Compound => "compound",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "open-ended" => Ok(QuestionKind::OpenEnded),
            "closed-ended" => Ok(QuestionKind::ClosedEnded),
            "true-false" => Ok(QuestionKind::TrueFalse),
            "compound" => Ok(QuestionKind::Compound),
            _ => Err(format!("unknown question type: {s}")),
        }
    }
}

/// A question answered in free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenEnded {
    statement: TextSegment,
    model_answer: TextSegment,
    points: u32,
    expected_answer_length: String,
}

impl OpenEnded {
    pub fn new(
        statement: TextSegment,
        model_answer: TextSegment,
        points: u32,
        expected_answer_length: impl Into<String>,
    ) -> Self {
        Self {
            statement,
            model_answer,
            points,
            expected_answer_length: expected_answer_length.into(),
        }
    }

    pub fn statement(&self) -> &TextSegment {
        &self.statement
    }

    pub fn model_answer(&self) -> &TextSegment {
        &self.model_answer
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Vertical space reserved for the answer on paper (e.g. `3in`).
    pub fn expected_answer_length(&self) -> &str {
        &self.expected_answer_length
    }
}

/// One selectable answer of a closed-ended question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    is_correct: bool,
    statement: TextSegment,
}

impl AnswerOption {
    pub fn new(is_correct: bool, statement: TextSegment) -> Self {
        Self {
            is_correct,
            statement,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    pub fn statement(&self) -> &TextSegment {
        &self.statement
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedEnded {
    statement: TextSegment,
    points: u32,
    options: Vec<AnswerOption>,
}

impl ClosedEnded {
    pub fn new(statement: TextSegment, points: u32, options: Vec<AnswerOption>) -> Self {
        Self {
            statement,
            points,
            options,
        }
    }

    pub fn statement(&self) -> &TextSegment {
        &self.statement
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct()).count()
    }

    /// Same question with options permuted by `seed`.
    pub fn scrambled(&self, seed: i64) -> Self {
        Self {
            statement: self.statement.clone(),
            points: self.points,
            options: shuffled(&self.options, seed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueFalse {
    statement: TextSegment,
    answer: bool,
    points: u32,
}

impl TrueFalse {
    pub fn new(statement: TextSegment, answer: bool, points: u32) -> Self {
        Self {
            statement,
            answer,
            points,
        }
    }

    pub fn statement(&self) -> &TextSegment {
        &self.statement
    }

    pub fn answer(&self) -> bool {
        self.answer
    }

    pub fn points(&self) -> u32 {
        self.points
    }
}

/// A question made of sub-questions.
///
/// `points` is stored, never derived from the children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundQuestion {
    statement: TextSegment,
    points: u32,
    children: Vec<Question>,
}

impl CompoundQuestion {
    pub fn new(statement: TextSegment, points: u32, children: Vec<Question>) -> Self {
        Self {
            statement,
            points,
            children,
        }
    }

    pub fn statement(&self) -> &TextSegment {
        &self.statement
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn children(&self) -> &[Question] {
        &self.children
    }

    /// Children scrambled with `seed`, then reordered by a generator freshly
    /// seeded with the same value.
    pub fn scrambled(&self, seed: i64) -> Self {
        let mut children: Vec<Question> = self
            .children
            .iter()
            .map(|child| child.scrambled(seed))
            .collect();
        LegacyRandom::new(seed).shuffle(&mut children);
        Self {
            statement: self.statement.clone(),
            points: self.points,
            children,
        }
    }
}

/// Closed set of question shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Question {
    OpenEnded(OpenEnded),
    ClosedEnded(ClosedEnded),
    TrueFalse(TrueFalse),
    Compound(CompoundQuestion),
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::OpenEnded(_) => QuestionKind::OpenEnded,
            Question::ClosedEnded(_) => QuestionKind::ClosedEnded,
            Question::TrueFalse(_) => QuestionKind::TrueFalse,
            Question::Compound(_) => QuestionKind::Compound,
        }
    }

    pub fn header(&self) -> &TextSegment {
        match self {
            Question::OpenEnded(q) => q.statement(),
            Question::ClosedEnded(q) => q.statement(),
            Question::TrueFalse(q) => q.statement(),
            Question::Compound(q) => q.statement(),
        }
    }

    /// Option statements for closed-ended questions; for a compound, one
    /// compound segment per child holding its header and body.
    pub fn body(&self) -> Vec<TextSegment> {
        match self {
            Question::OpenEnded(_) | Question::TrueFalse(_) => Vec::new(),
            Question::ClosedEnded(q) => q
                .options()
                .iter()
                .map(|option| option.statement().clone())
                .collect(),
            Question::Compound(q) => q
                .children()
                .iter()
                .map(|child| {
                    let mut segments = vec![child.header().clone()];
                    segments.extend(child.body());
                    TextSegment::compound(segments)
                })
                .collect(),
        }
    }

    pub fn children(&self) -> &[Question] {
        match self {
            Question::Compound(q) => q.children(),
            _ => &[],
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Question::OpenEnded(q) => q.points(),
            Question::ClosedEnded(q) => q.points(),
            Question::TrueFalse(q) => q.points(),
            Question::Compound(q) => q.points(),
        }
    }

    /// A new question with its internal order permuted by `seed`.
    /// Open-ended and true/false questions come back unchanged.
    pub fn scrambled(&self, seed: i64) -> Question {
        match self {
            Question::OpenEnded(_) | Question::TrueFalse(_) => self.clone(),
            Question::ClosedEnded(q) => Question::ClosedEnded(q.scrambled(seed)),
            Question::Compound(q) => Question::Compound(q.scrambled(seed)),
        }
    }
}

impl From<OpenEnded> for Question {
    fn from(value: OpenEnded) -> Self {
        Question::OpenEnded(value)
    }
}

impl From<ClosedEnded> for Question {
    fn from(value: ClosedEnded) -> Self {
        Question::ClosedEnded(value)
    }
}

impl From<TrueFalse> for Question {
    fn from(value: TrueFalse) -> Self {
        Question::TrueFalse(value)
    }
}

impl From<CompoundQuestion> for Question {
    fn from(value: CompoundQuestion) -> Self {
        Question::Compound(value)
    }
}
