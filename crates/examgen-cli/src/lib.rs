//! Library side of the `examgen` binary: logging setup, the generation
//! pipeline and pdflatex typesetting.

pub mod generate;
pub mod logging;
pub mod typeset;
pub mod types;
