//! Notation dispatch and twin rendering.

use tracing::debug;

use examgen_model::{Examination, RenderError};

use crate::latex::{LatexLayout, render_latex};
use crate::moodle::render_moodle;
use crate::notation::Notation;

/// Render one examination in `notation`.
pub fn render(
    exam: &Examination,
    notation: Notation,
    print_solutions: bool,
) -> Result<String, RenderError> {
    match notation {
        Notation::LatexMidterm => render_latex(exam, LatexLayout::Midterm, print_solutions),
        Notation::LatexQuiz => render_latex(exam, LatexLayout::Quiz, print_solutions),
        Notation::MoodleXml => render_moodle(exam, print_solutions),
    }
}

/// Learner-facing and solutions outputs of one examination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTwin {
    pub notation: Notation,
    pub examination: String,
    pub solutions: String,
}

/// Render both halves; either failing fails the pair.
pub fn render_twin(exam: &Examination, notation: Notation) -> Result<RenderedTwin, RenderError> {
    let examination = render(exam, notation, false)?;
    let solutions = render(exam, notation, true)?;
    debug!(
        notation = notation.slug(),
        examination_bytes = examination.len(),
        solutions_bytes = solutions.len(),
        "rendered twin"
    );
    Ok(RenderedTwin {
        notation,
        examination,
        solutions,
    })
}
