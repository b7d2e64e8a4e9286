//! LaTeX output for the `exam` document class.
//!
//! Two layouts share the question rendering: a midterm with a title block and
//! student/course tables, and a compact quiz sheet. Solutions twins add the
//! `answers` class option, mark correct options with `\item*`, print
//! `solution` environments and true/false answer letters.

use examgen_model::{
    ClosedEnded, CompoundQuestion, Examination, OpenEnded, Parameter, Question, RenderError,
    Style, TextSegment, TrueFalse,
};

use crate::notation::Notation;
use crate::style::{StyleTable, render_segment};

/// Page layout of a LaTeX document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatexLayout {
    Midterm,
    Quiz,
}

impl LatexLayout {
    fn notation(self) -> Notation {
        match self {
            LatexLayout::Midterm => Notation::LatexMidterm,
            LatexLayout::Quiz => Notation::LatexQuiz,
        }
    }
}

/// Delimiters tried, in order, for `\lstinline`.
const INLINE_DELIMITERS: [char; 5] = ['!', '|', '+', '@', '='];

/// LaTeX style table.
#[derive(Debug, Clone, Copy)]
pub struct LatexStyles {
    notation: Notation,
}

impl LatexStyles {
    pub fn new(notation: Notation) -> Self {
        Self { notation }
    }
}

impl StyleTable for LatexStyles {
    fn notation(&self) -> &'static str {
        self.notation.slug()
    }

    fn line_break(&self) -> &'static str {
        "\n\n"
    }

    fn escape(&self, style: Style, text: &str) -> Result<String, RenderError> {
        Ok(match style {
            Style::Code | Style::Custom => text.to_string(),
            Style::InlineCode => escape_inline(text),
            Style::Bold | Style::Italic | Style::Inherit | Style::NewLine => escape_text(text),
        })
    }

    fn wrap(&self, style: Style, inner: String) -> Result<String, RenderError> {
        Ok(match style {
            Style::Bold => format!("\\textbf{{{inner}}}"),
            Style::Italic => format!("\\textit{{{inner}}}"),
            Style::Code => format!(
                "\\vspace{{0.3cm}}\n\\begin{{lstlisting}}\n{inner}\n\\end{{lstlisting}}\n"
            ),
            Style::InlineCode => {
                let delimiter = INLINE_DELIMITERS
                    .into_iter()
                    .find(|d| !inner.contains(*d))
                    .ok_or_else(|| RenderError::UnrepresentableText {
                        notation: self.notation(),
                        reason: "inline code contains every \\lstinline delimiter (! | + @ =)"
                            .to_string(),
                    })?;
                format!("\\lstinline{delimiter}{inner}{delimiter}")
            }
            Style::Custom | Style::Inherit | Style::NewLine => inner,
        })
    }

    /// `lstlisting` cannot sit inside a command argument or another listing,
    /// and text markup inside it is printed verbatim.
    fn check_styles(&self, styles: &[Style]) -> Result<(), RenderError> {
        let blocks = styles.iter().filter(|style| **style == Style::Code).count();
        let formatted = styles
            .iter()
            .any(|style| matches!(style, Style::Bold | Style::Italic | Style::InlineCode));
        if blocks > 1 || (blocks == 1 && formatted) {
            return Err(RenderError::UnsupportedStyle {
                notation: self.notation(),
                style: Style::Code,
            });
        }
        Ok(())
    }
}

/// Escape LaTeX special characters in running text.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '<' => out.push_str("\\textless{}"),
            '>' => out.push_str("\\textgreater{}"),
            '|' => out.push_str("\\textbar{}"),
            '#' | '&' | '%' | '{' | '}' | '$' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape text placed inside `\lstinline`.
fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '&' | '%' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Render a whole examination.
pub fn render_latex(
    exam: &Examination,
    layout: LatexLayout,
    print_solutions: bool,
) -> Result<String, RenderError> {
    LatexRenderer {
        layout,
        styles: LatexStyles::new(layout.notation()),
        print_solutions,
    }
    .document(exam)
}

/// Render one top-level question, numbered `number` (1-based).
pub fn render_latex_question(
    question: &Question,
    number: usize,
    layout: LatexLayout,
    print_solutions: bool,
) -> Result<String, RenderError> {
    LatexRenderer {
        layout,
        styles: LatexStyles::new(layout.notation()),
        print_solutions,
    }
    .question(question, &format!("Q{number}"), 0)
}

struct LatexRenderer {
    layout: LatexLayout,
    styles: LatexStyles,
    print_solutions: bool,
}

/// Parameters defined as preamble macros, in output order.
const PARAMETER_MACROS: [(Parameter, &str); 8] = [
    (Parameter::Course, "course"),
    (Parameter::CourseId, "coursenumber"),
    (Parameter::CourseReferenceNumber, "crn"),
    (Parameter::Term, "term"),
    (Parameter::Instructors, "instructors"),
    (Parameter::TimeLimit, "timelimit"),
    (Parameter::Title, "examtitle"),
    (Parameter::Date, "examdate"),
];

impl LatexRenderer {
    fn notation(&self) -> &'static str {
        self.styles.notation()
    }

    fn text(&self, segment: &TextSegment) -> Result<String, RenderError> {
        render_segment(&self.styles, segment)
    }

    fn document(&self, exam: &Examination) -> Result<String, RenderError> {
        let has = |parameter: Parameter| exam.text(parameter).is_some();
        let section = exam.section();
        let has_section = section.is_some();
        let has_ta = section.is_some_and(|s| s.teaching_assistant.is_some());

        let mut out = String::new();
        let (size, margin) = match self.layout {
            LatexLayout::Midterm => ("10pt", "1in"),
            LatexLayout::Quiz => ("11pt", "0.5in"),
        };
        let answers = if self.print_solutions { ",answers" } else { "" };
        out.push_str(&format!("\\documentclass[{size},addpoints{answers}]{{exam}}\n\n"));

        out.push_str("% packages\n");
        out.push_str(&format!("\\usepackage[margin={margin}]{{geometry}}\n"));
        out.push_str(PACKAGES);
        if self.layout == LatexLayout::Quiz {
            out.push_str("\\usepackage{upquote}\n");
        }
        out.push_str("\n% choices\n");
        out.push_str(CHOICES);
        out.push_str("\n% true/false\n");
        out.push_str(TRUE_FALSE);
        out.push_str("\n% listings\n");
        out.push_str(LISTINGS);

        out.push_str("\n% parameters\n");
        for (parameter, name) in PARAMETER_MACROS {
            if let Some(value) = exam.text(parameter) {
                out.push_str(&format!("\\newcommand{{\\{name}}}{{{}}}\n", escape_text(value)));
            }
        }
        if let Some(section) = section {
            out.push_str(&format!(
                "\\newcommand{{\\examsection}}{{{}}}\n",
                escape_text(&section.name)
            ));
            if let Some(ta) = &section.teaching_assistant {
                out.push_str(&format!("\\newcommand{{\\sectionta}}{{{}}}\n", escape_text(ta)));
            }
        }

        let left = if has(Parameter::CourseId) {
            "\\scriptsize \\coursenumber{}"
        } else {
            ""
        };
        let page = if has_section {
            "Page \\examsection{}-\\thepage\\ of \\numpages"
        } else {
            "Page \\thepage\\ of \\numpages"
        };
        let center = if has(Parameter::Title) {
            format!("\\scriptsize \\examtitle\\ - {page}")
        } else {
            format!("\\scriptsize {page}")
        };
        let right = if has(Parameter::Date) {
            "\\scriptsize \\examdate"
        } else {
            ""
        };

        out.push_str("\n% page\n\\pagestyle{head}\n");
        match self.layout {
            LatexLayout::Midterm => {
                out.push_str("\\firstpageheader{}{}{}\n");
                out.push_str(&format!("\\runningheader{{{left}}}{{{center}}}{{{right}}}\n"));
                out.push_str("\\runningheadrule\n");
            }
            LatexLayout::Quiz => {
                out.push_str(&format!("\\header{{{left}}}{{{center}}}{{{right}}}\n"));
                out.push_str("\\headrule\n");
            }
        }

        out.push_str("\n\\begin{document}\n");
        match self.layout {
            LatexLayout::Midterm => {
                self.title_block(exam, &mut out);
                student_table(has_section, &mut out);
                course_table(exam, has_ta, &mut out);
            }
            LatexLayout::Quiz => {
                let title = if has(Parameter::Title) {
                    "{\\large\\bfseries \\examtitle}"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "\\noindent\n{title}\\hfill Name:\\enspace\\makebox[6cm]{{\\hrulefill}}\n"
                ));
            }
        }

        let instructions = exam.instructions();
        if !instructions.is_empty() {
            out.push_str("\n% instructions\n\\vspace{0.5cm}\n\\noindent\n");
            out.push_str("{\\large\\bfseries Instructions}\n\\begin{itemize}[noitemsep]\n");
            for instruction in instructions {
                out.push_str(&format!("    \\item {}\n", self.text(instruction)?));
            }
            out.push_str("\\end{itemize}\n");
        }

        out.push_str("\n% questions\n\\vspace{0.5cm}\n");
        if self.layout == LatexLayout::Midterm {
            out.push_str("\\noindent\n{\\large\\bfseries Questions}\n\\vspace{0.5cm}\n");
        }
        out.push_str("\\begin{questions}\n\\bracketedpoints\n\\marksnotpoints\n");
        for (index, question) in exam.questions().iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.question(question, &format!("Q{}", index + 1), 0)?);
        }
        out.push_str("\\end{questions}\n\\end{document}\n");
        Ok(out)
    }

    fn title_block(&self, exam: &Examination, out: &mut String) {
        let lines: Vec<&str> = [(Parameter::Term, "\\term"), (Parameter::Title, "\\examtitle")]
            .into_iter()
            .filter(|(parameter, _)| exam.text(*parameter).is_some())
            .map(|(_, command)| command)
            .collect();
        let has_date = exam.text(Parameter::Date).is_some();
        if lines.is_empty() && !has_date {
            return;
        }
        out.push_str("% title\n\\begin{center}\n");
        if !lines.is_empty() {
            out.push_str("    {\\LARGE\\bfseries\n");
            for line in lines {
                out.push_str(&format!("        {line}\\\\\n"));
            }
            out.push_str("    }\n");
        }
        if has_date {
            out.push_str("    \\vspace{0.2cm}\n    {\\large \\examdate}\n");
        }
        out.push_str("\\end{center}\n");
    }

    fn question(&self, question: &Question, path: &str, depth: usize) -> Result<String, RenderError> {
        let mut out = String::new();
        if depth == 0 {
            out.push_str(&format!("\\question[{}]\n", question.points()));
        }
        match question {
            Question::OpenEnded(q) => self.open_ended(q, &mut out)?,
            Question::ClosedEnded(q) => self.closed_ended(q, path, &mut out)?,
            Question::TrueFalse(q) => self.true_false(q, path, &mut out)?,
            Question::Compound(q) => self.compound(q, path, depth, &mut out)?,
        }
        Ok(out)
    }

    fn open_ended(&self, question: &OpenEnded, out: &mut String) -> Result<(), RenderError> {
        out.push_str(&self.text(question.statement())?);
        out.push('\n');
        if self.print_solutions {
            out.push_str("\\begin{solution}\n");
            out.push_str(&self.text(question.model_answer())?);
            out.push_str("\n\\end{solution}\n");
        } else {
            out.push_str(&format!(
                "\\makeemptybox{{{}}}\n",
                escape_text(question.expected_answer_length())
            ));
        }
        Ok(())
    }

    fn closed_ended(
        &self,
        question: &ClosedEnded,
        path: &str,
        out: &mut String,
    ) -> Result<(), RenderError> {
        out.push_str(&self.text(question.statement())?);
        out.push_str("\n\\begin{items}\n");
        for option in question.options() {
            // `items` reads its body as a macro argument; listings cannot live there.
            self.reject_code(option.statement(), path)?;
            let item = if self.print_solutions && option.is_correct() {
                "\\item*"
            } else {
                "\\item"
            };
            out.push_str(&format!("    {item} {}\n", self.text(option.statement())?));
        }
        out.push_str("\\end{items}\n");
        Ok(())
    }

    fn true_false(&self, question: &TrueFalse, path: &str, out: &mut String) -> Result<(), RenderError> {
        self.reject_code(question.statement(), path)?;
        let answer = match (self.print_solutions, question.answer()) {
            (false, _) => "",
            (true, true) => "T",
            (true, false) => "F",
        };
        out.push_str(&format!(
            "\\TFQuestion{{{answer}}}{{{}}}\n",
            self.text(question.statement())?
        ));
        Ok(())
    }

    fn compound(
        &self,
        question: &CompoundQuestion,
        path: &str,
        depth: usize,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let (environment, item) = match depth {
            0 => ("parts", "part"),
            1 => ("subparts", "subpart"),
            2 => ("subsubparts", "subsubpart"),
            _ => {
                return Err(RenderError::UnsupportedQuestion {
                    notation: self.notation(),
                    path: path.to_string(),
                    reason: "compound questions nest at most three levels".to_string(),
                });
            }
        };
        out.push_str(&self.text(question.statement())?);
        out.push('\n');
        if depth == 0 {
            out.push_str("\\noaddpoints % parts are counted in the question total\n");
        }
        out.push_str(&format!("\\begin{{{environment}}}\n"));
        for (index, child) in question.children().iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!("    \\{item}[{}]\n", child.points()));
            let child_path = format!("{path}.{}", index + 1);
            out.push_str(&self.question(child, &child_path, depth + 1)?);
        }
        out.push_str(&format!("\\end{{{environment}}}\n"));
        if depth == 0 {
            out.push_str("\\addpoints\n");
        }
        Ok(())
    }

    fn reject_code(&self, segment: &TextSegment, path: &str) -> Result<(), RenderError> {
        if segment.has_style(Style::Code) {
            tracing::debug!(path, notation = self.notation(), "code block in argument position");
            return Err(RenderError::UnsupportedStyle {
                notation: self.notation(),
                style: Style::Code,
            });
        }
        Ok(())
    }
}

fn student_table(has_section: bool, out: &mut String) {
    out.push_str("\n% student information\n\\vspace{0.5cm}\n\\noindent\n");
    out.push_str("\\renewcommand{\\arraystretch}{3}\n");
    out.push_str("\\begin{tabularx}{\\textwidth}{|l|X|}\n    \\hline\n");
    out.push_str("    \\textbf{Last Name} & \\\\\n    \\hline\n");
    out.push_str("    \\textbf{First Name} & \\\\\n    \\hline\n");
    if has_section {
        out.push_str("    \\textbf{Section} & \\examsection \\\\\n    \\hline\n");
    }
    out.push_str("    \\textbf{Student Number} & \\\\\n    \\hline\n");
    out.push_str("\\end{tabularx}\n");
}

fn course_table(exam: &Examination, has_ta: bool, out: &mut String) {
    let has = |parameter: Parameter| exam.text(parameter).is_some();
    let mut rows: Vec<(&str, &str)> = Vec::new();
    match (has(Parameter::CourseId), has(Parameter::Course)) {
        (true, true) => rows.push(("Course", "\\coursenumber{} - \\course")),
        (true, false) => rows.push(("Course", "\\coursenumber")),
        (false, true) => rows.push(("Course", "\\course")),
        (false, false) => {}
    }
    if has(Parameter::CourseReferenceNumber) {
        rows.push(("CRN", "\\crn"));
    }
    if has(Parameter::Instructors) {
        rows.push(("Instructors", "\\instructors"));
    }
    if has_ta {
        rows.push(("Teaching Assistant", "\\sectionta"));
    }
    if has(Parameter::TimeLimit) {
        rows.push(("Duration", "\\timelimit"));
    }
    if rows.is_empty() {
        return;
    }
    out.push_str("\n% course information\n\\vspace{0.5cm}\n\\noindent\n");
    out.push_str("\\renewcommand{\\arraystretch}{1.2}\n");
    out.push_str("\\begin{tabularx}{\\textwidth}{|l|X|}\n    \\hline\n");
    for (label, value) in rows {
        out.push_str(&format!("    \\textbf{{{label}}} & {value} \\\\\n    \\hline\n"));
    }
    out.push_str("\\end{tabularx}\n\\renewcommand{\\arraystretch}{1}\n");
}

const PACKAGES: &str = r"\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{amsmath, amssymb}
\usepackage{tabularx}
\usepackage{multicol}
\usepackage{color}
\usepackage[scaled=0.85]{sourcecodepro}
\usepackage{listings}
\usepackage{environ}
\usepackage[normalem]{ulem}
\usepackage{etoolbox}
\usepackage[export]{adjustbox}
\usepackage{enumitem}
";

/// Horizontal answer choices: `\item*` marks the correct one when answers
/// are printed.
const CHOICES: &str = r"\renewcommand{\questionshook}{%
    \setlength{\itemsep}{0.5\baselineskip}
    \setlength{\topsep}{0pt}
    \setlength\partopsep{0pt}
    \setlength\parsep{5pt}
}

\makeatletter
\newlength\choiceitemwidth
\newcounter{choiceitem}%
\def\thechoiceitem{\Alph{choiceitem}}%
\setlength{\fboxsep}{0pt}
\def\makechoicelabel#1{#1\uline{\bfseries \thechoiceitem.}\else\thechoiceitem.\fi\space}
\def\choice@mesureitem#1{\cr\stepcounter{choiceitem}\makechoicelabel#1}%
\def\choicemesureitem{\@ifstar
    {\choice@mesureitem\ifprintanswers \xappto\theanswer{\thechoiceitem}\ignorespaces}%
    {\choice@mesureitem\iffalse}}%
\def\choice@blockitem#1{%
    \ifnum\value{choiceitem}>0\hfill\fi
    \egroup\hskip0pt
    \hbox to \choiceitemwidth\bgroup\hss\refstepcounter{choiceitem}\makechoicelabel#1}
\def\choiceblockitem{\@ifstar
    {\choice@blockitem\ifprintanswers\ignorespaces}%
    {\choice@blockitem\iffalse}}
\def\choice@paraitem#1{%
    \par\noindent\refstepcounter{choiceitem}\makechoicelabel#1\hangindent=1.25em\hangafter=1\relax}%
\def\choiceparaitem{\@ifstar
    {\choice@paraitem\ifprintanswers\ignorespaces}%
    {\choice@paraitem\iffalse}}
\newdimen\qanswd
\newbox\qimgbox
\NewEnviron{items}[1][]{%
    \def\theanswer{}
    \begingroup
    \let\item\choicemesureitem
    \setcounter{choiceitem}{0}%
    \settowidth{\global\choiceitemwidth}{\vbox{\halign{##\hfil\cr\BODY\crcr}}}%
    \endgroup
    \setbox\qimgbox\hbox{#1}%
    \setlist[trivlist]{nosep}
    \trivlist\item\relax%
    \qanswd=\linewidth%
    \advance\qanswd-\wd\qimgbox%
    \begin{minipage}[t]{\qanswd}
        \trivlist\item\relax%
        \parindent0pt%
        \setcounter{choiceitem}{0}%
        \ifdim\choiceitemwidth<0.25\columnwidth
        \choiceitemwidth=0.25\columnwidth
        \let\item\choiceblockitem
        \bgroup\BODY\hfill\egroup
        \else\ifdim\choiceitemwidth<0.5\columnwidth
        \choiceitemwidth=0.5\columnwidth
        \let\item\choiceblockitem
        \bgroup\BODY\hfill\egroup
        \else
        \let\item\choiceparaitem
        \BODY
        \fi\fi
        \endtrivlist
    \end{minipage}%
    \adjustbox{valign=t}{\unhbox\qimgbox}
    \endtrivlist
}
\makeatother
";

/// `\TFQuestion{T|F|}{statement}`; an empty answer prints both choices plain.
const TRUE_FALSE: &str = r"\newcommand*{\TrueFalse}[1]{%
    \ifstrequal{#1}{T}{\textbf{TRUE}\hspace*{14pt}False}{%
        \ifstrequal{#1}{F}{True\hspace*{14pt}\textbf{FALSE}}{True\hspace*{20pt}False}}%
}
\newlength\TFlengthA
\newlength\TFlengthB
\settowidth\TFlengthA{\hspace*{1.16in}}
\newcommand\TFQuestion[2]{%
    \setlength\TFlengthB{\linewidth}%
    \addtolength\TFlengthB{-\TFlengthA}%
    \parbox[t]{\TFlengthA}{\TrueFalse{#1}}\parbox[t]{\TFlengthB}{#2}}
";

const LISTINGS: &str = r"\definecolor{keywords}{RGB}{127,0,85}
\definecolor{comments}{RGB}{63,127,95}
\definecolor{strings}{RGB}{42,0,255}
\definecolor{frame}{RGB}{150,150,150}
\definecolor{numbers}{RGB}{100,100,100}
\lstdefinestyle{code}{
    language=C,
    tabsize=4,
    captionpos=b,
    showspaces=false,
    showtabs=false,
    breaklines=true,
    showstringspaces=false,
    breakatwhitespace=true,
    escapeinside={(*@}{@*)},
    commentstyle=\color{comments},
    keywordstyle=\bfseries\color{keywords},
    stringstyle=\color{strings},
    basicstyle=\small\ttfamily,
    frame=lines,
    rulecolor=\color{frame},
    xleftmargin=2em,
    framexleftmargin=1.5em,
    numbers=left,
    numbersep=10pt,
    numberstyle=\scriptsize\ttfamily\color{numbers}
}
\lstset{style=code}
";

#[cfg(test)]
mod tests {
    use examgen_model::AnswerOption;

    use super::*;

    fn styles() -> LatexStyles {
        LatexStyles::new(Notation::LatexMidterm)
    }

    #[test]
    fn escapes_special_characters_once() {
        assert_eq!(
            escape_text(r"50% of $x_1 & {y}"),
            r"50\% of \$x\_1 \& \{y\}"
        );
        assert_eq!(escape_text(r"a\b~c^"), r"a\textbackslash{}b\textasciitilde{}c\textasciicircum{}");
    }

    #[test]
    fn angle_brackets_and_bars_use_text_symbols() {
        let segment = TextSegment::plain("Vec<String> | a > b");
        assert_eq!(
            render_segment(&styles(), &segment).expect("render"),
            r"Vec\textless{}String\textgreater{} \textbar{} a \textgreater{} b"
        );
    }

    #[test]
    fn code_block_inside_other_markup_is_rejected() {
        for combined in [
            vec![Style::Code, Style::Bold],
            vec![Style::Italic, Style::Code],
            vec![Style::Code, Style::Code],
        ] {
            let segment = TextSegment::simple("let x = 1;", combined);
            assert_eq!(
                render_segment(&styles(), &segment),
                Err(RenderError::UnsupportedStyle {
                    notation: "latex-midterm",
                    style: Style::Code,
                })
            );
        }
        let segment = TextSegment::simple("let x = 1;", vec![Style::Code, Style::NewLine]);
        assert!(render_segment(&styles(), &segment).is_ok());
    }

    #[test]
    fn bold_escapes_before_wrapping() {
        let segment = TextSegment::simple("R&D", vec![Style::Bold]);
        assert_eq!(render_segment(&styles(), &segment).expect("render"), r"\textbf{R\&D}");
    }

    #[test]
    fn nested_styles_escape_once() {
        let segment = TextSegment::simple("a_b", vec![Style::Italic, Style::Bold]);
        assert_eq!(
            render_segment(&styles(), &segment).expect("render"),
            r"\textbf{\textit{a\_b}}"
        );
    }

    #[test]
    fn new_line_starts_a_paragraph() {
        let segment = TextSegment::simple("next", vec![Style::NewLine]);
        assert_eq!(render_segment(&styles(), &segment).expect("render"), "\n\nnext");
    }

    #[test]
    fn inline_code_picks_a_free_delimiter() {
        let segment = TextSegment::simple("a!b", vec![Style::InlineCode]);
        assert_eq!(render_segment(&styles(), &segment).expect("render"), r"\lstinline|a!b|");

        let segment = TextSegment::simple("!|+@=", vec![Style::InlineCode]);
        assert!(matches!(
            render_segment(&styles(), &segment),
            Err(RenderError::UnrepresentableText { .. })
        ));
    }

    #[test]
    fn custom_passes_through() {
        let segment = TextSegment::simple(r"$\alpha$", vec![Style::Custom]);
        assert_eq!(render_segment(&styles(), &segment).expect("render"), r"$\alpha$");
    }

    #[test]
    fn closed_ended_marks_answers_only_in_solutions() {
        let question: Question = ClosedEnded::new(
            TextSegment::plain("Pick"),
            3,
            vec![
                AnswerOption::new(false, TextSegment::plain("a")),
                AnswerOption::new(true, TextSegment::plain("b")),
            ],
        )
        .into();
        let exam = render_latex_question(&question, 1, LatexLayout::Midterm, false).expect("render");
        let solutions =
            render_latex_question(&question, 1, LatexLayout::Midterm, true).expect("render");
        insta::assert_snapshot!(exam, @r"
        \question[3]
        Pick
        \begin{items}
            \item a
            \item b
        \end{items}
        ");
        assert_eq!(solutions, exam.replace("\\item b", "\\item* b"));
    }

    #[test]
    fn open_ended_twin() {
        let question: Question = OpenEnded::new(
            TextSegment::plain("Why?"),
            TextSegment::plain("Because."),
            2,
            "3in",
        )
        .into();
        let exam = render_latex_question(&question, 1, LatexLayout::Quiz, false).expect("render");
        let solutions = render_latex_question(&question, 1, LatexLayout::Quiz, true).expect("render");
        assert_eq!(exam, "\\question[2]\nWhy?\n\\makeemptybox{3in}\n");
        assert_eq!(
            solutions,
            "\\question[2]\nWhy?\n\\begin{solution}\nBecause.\n\\end{solution}\n"
        );
    }

    #[test]
    fn true_false_answer_letter_only_in_solutions() {
        let question: Question = TrueFalse::new(TextSegment::plain("Rust has GC."), false, 1).into();
        let exam = render_latex_question(&question, 1, LatexLayout::Midterm, false).expect("render");
        let solutions =
            render_latex_question(&question, 1, LatexLayout::Midterm, true).expect("render");
        assert_eq!(exam, "\\question[1]\n\\TFQuestion{}{Rust has GC.}\n");
        assert_eq!(solutions, "\\question[1]\n\\TFQuestion{F}{Rust has GC.}\n");
    }

    #[test]
    fn code_in_true_false_is_unsupported() {
        let question: Question =
            TrueFalse::new(TextSegment::simple("loop {}", vec![Style::Code]), true, 1).into();
        assert_eq!(
            render_latex_question(&question, 1, LatexLayout::Midterm, true),
            Err(RenderError::UnsupportedStyle {
                notation: "latex-midterm",
                style: Style::Code,
            })
        );
    }

    #[test]
    fn compound_uses_parts() {
        let question: Question = CompoundQuestion::new(
            TextSegment::plain("Memory"),
            3,
            vec![
                TrueFalse::new(TextSegment::plain("Stack grows down."), true, 1).into(),
                OpenEnded::new(TextSegment::plain("Heap?"), TextSegment::plain("malloc"), 2, "1in")
                    .into(),
            ],
        )
        .into();
        let exam = render_latex_question(&question, 4, LatexLayout::Midterm, false).expect("render");
        insta::assert_snapshot!(exam, @r"
        \question[3]
        Memory
        \noaddpoints % parts are counted in the question total
        \begin{parts}
            \part[1]
        \TFQuestion{}{Stack grows down.}

            \part[2]
        Heap?
        \makeemptybox{1in}
        \end{parts}
        \addpoints
        ");
    }

    #[test]
    fn deep_nesting_is_rejected_with_path() {
        let leaf: Question = TrueFalse::new(TextSegment::plain("t"), true, 1).into();
        let mut question = leaf;
        for _ in 0..4 {
            question = CompoundQuestion::new(TextSegment::plain("c"), 1, vec![question]).into();
        }
        assert_eq!(
            render_latex_question(&question, 2, LatexLayout::Midterm, false),
            Err(RenderError::UnsupportedQuestion {
                notation: "latex-midterm",
                path: "Q2.1.1.1".to_string(),
                reason: "compound questions nest at most three levels".to_string(),
            })
        );
    }
}
