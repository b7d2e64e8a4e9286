//! Supported output notations.

use std::fmt;
use std::str::FromStr;

/// A target output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Notation {
    /// Full `exam`-class midterm document.
    LatexMidterm,
    /// Compact `exam`-class quiz sheet.
    LatexQuiz,
    /// Moodle question-bank XML.
    MoodleXml,
}

impl Notation {
    pub const ALL: [Notation; 3] = [Notation::LatexMidterm, Notation::LatexQuiz, Notation::MoodleXml];

    /// Name used on the command line and as the output directory.
    pub fn slug(&self) -> &'static str {
        match self {
            Notation::LatexMidterm => "latex-midterm",
            Notation::LatexQuiz => "latex-quiz",
            Notation::MoodleXml => "moodle-xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Notation::LatexMidterm | Notation::LatexQuiz => "tex",
            Notation::MoodleXml => "xml",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Notation::LatexMidterm => "LaTeX exam with title page, student and course tables",
            Notation::LatexQuiz => "LaTeX quiz sheet with a single name line",
            Notation::MoodleXml => "Moodle XML question bank, one category per section",
        }
    }

    /// Whether the output can be typeset with `pdflatex`.
    pub fn is_latex(&self) -> bool {
        matches!(self, Notation::LatexMidterm | Notation::LatexQuiz)
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Notation::ALL
            .into_iter()
            .find(|notation| notation.slug() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = Notation::ALL.iter().map(Notation::slug).collect();
                format!("unknown notation '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
