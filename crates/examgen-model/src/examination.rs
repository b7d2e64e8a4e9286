//! Examinations, their parameters, and course sections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::question::Question;
use crate::random::LegacyRandom;
use crate::text::TextSegment;

/// Closed vocabulary of examination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Parameter {
    Course,
    CourseId,
    CourseReferenceNumber,
    Date,
    Instructors,
    Instructions,
    Sections,
    Term,
    TimeLimit,
    Title,
}

impl Parameter {
    pub const ALL: [Parameter; 10] = [
        Parameter::Course,
        Parameter::CourseId,
        Parameter::CourseReferenceNumber,
        Parameter::Date,
        Parameter::Instructors,
        Parameter::Instructions,
        Parameter::Sections,
        Parameter::Term,
        Parameter::TimeLimit,
        Parameter::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Course => "COURSE",
            Parameter::CourseId => "COURSE_ID",
            Parameter::CourseReferenceNumber => "COURSE_REFERENCE_NUMBER",
            Parameter::Date => "DATE",
            Parameter::Instructors => "INSTRUCTORS",
            Parameter::Instructions => "INSTRUCTIONS",
            Parameter::Sections => "SECTIONS",
            Parameter::Term => "TERM",
            Parameter::TimeLimit => "TIME_LIMIT",
            Parameter::Title => "TITLE",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = ConfigurationError;

    /// Parse a parameter key (case-insensitive, `-` accepted for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Parameter::ALL
            .into_iter()
            .find(|parameter| parameter.as_str() == normalized)
            .ok_or_else(|| ConfigurationError::UnknownParameter(s.to_string()))
    }
}

/// A course subdivision receiving its own variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub teaching_assistant: Option<String>,
    pub student_count: Option<u32>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            teaching_assistant: None,
            student_count: None,
        }
    }

    pub fn with_teaching_assistant(mut self, name: impl Into<String>) -> Self {
        self.teaching_assistant = Some(name.into());
        self
    }

    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = Some(count);
        self
    }
}

/// Value bound to a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterValue {
    Text(String),
    /// Every section of the master examination.
    Sections(Vec<Section>),
    /// The section a variant was generated for.
    Section(Section),
    Segments(Vec<TextSegment>),
}

/// One examination: parameter snapshot plus ordered questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examination {
    parameters: BTreeMap<Parameter, ParameterValue>,
    questions: Vec<Question>,
}

impl Examination {
    pub fn new(parameters: BTreeMap<Parameter, ParameterValue>, questions: Vec<Question>) -> Self {
        Self {
            parameters,
            questions,
        }
    }

    pub fn parameters(&self) -> &BTreeMap<Parameter, ParameterValue> {
        &self.parameters
    }

    pub fn parameter(&self, parameter: Parameter) -> Option<&ParameterValue> {
        self.parameters.get(&parameter)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Text value of a parameter, if present and textual.
    pub fn text(&self, parameter: Parameter) -> Option<&str> {
        match self.parameters.get(&parameter) {
            Some(ParameterValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// All sections, treating a bound single section as a list of one.
    pub fn sections(&self) -> Result<Vec<Section>, ConfigurationError> {
        match self.parameters.get(&Parameter::Sections) {
            Some(ParameterValue::Sections(sections)) => Ok(sections.clone()),
            Some(ParameterValue::Section(section)) => Ok(vec![section.clone()]),
            Some(_) => Err(ConfigurationError::InvalidParameter {
                parameter: Parameter::Sections,
                reason: "expected a list of sections".to_string(),
            }),
            None => Err(ConfigurationError::MissingParameter(Parameter::Sections)),
        }
    }

    /// The section a variant is bound to.
    pub fn section(&self) -> Option<&Section> {
        match self.parameters.get(&Parameter::Sections) {
            Some(ParameterValue::Section(section)) => Some(section),
            Some(ParameterValue::Sections(sections)) if sections.len() == 1 => sections.first(),
            _ => None,
        }
    }

    pub fn instructions(&self) -> &[TextSegment] {
        match self.parameters.get(&Parameter::Instructions) {
            Some(ParameterValue::Segments(segments)) => segments,
            _ => &[],
        }
    }

    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(Question::points).sum()
    }

    /// Scramble every question with `seed`, then reorder the questions with
    /// a generator freshly seeded by the same value.
    pub fn scrambled(&self, seed: i64) -> Examination {
        let mut questions: Vec<Question> = self
            .questions
            .iter()
            .map(|question| question.scrambled(seed))
            .collect();
        LegacyRandom::new(seed).shuffle(&mut questions);
        Examination {
            parameters: self.parameters.clone(),
            questions,
        }
    }

    /// Copy bound to one section.
    pub(crate) fn for_section(&self, section: Section, questions: Vec<Question>) -> Examination {
        let mut parameters = self.parameters.clone();
        parameters.insert(Parameter::Sections, ParameterValue::Section(section));
        Examination {
            parameters,
            questions,
        }
    }
}
