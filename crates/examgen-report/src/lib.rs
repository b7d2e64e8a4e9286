//! Examination rendering.
//!
//! Every examination renders twice, once for learners and once with
//! solutions, in any of these notations:
//!
//! - **latex-midterm**: `exam`-class document with title block and tables
//! - **latex-quiz**: compact `exam`-class quiz sheet
//! - **moodle-xml**: Moodle question-bank XML

mod latex;
mod moodle;
mod notation;
mod render;
mod style;
mod writer;

pub use latex::{LatexLayout, LatexStyles, escape_text, render_latex, render_latex_question};
pub use moodle::{MoodleStyles, render_moodle};
pub use notation::Notation;
pub use render::{RenderedTwin, render, render_twin};
pub use style::{StyleTable, render_segment};
pub use writer::{
    WrittenTwin, check_distinct_stems, document_output_dir, section_file_stem, variant_file_stem,
    write_variant,
};
