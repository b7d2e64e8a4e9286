//! Per-section variant generation.

use tracing::debug;

use crate::error::ConfigurationError;
use crate::examination::Examination;
use crate::random::shuffled;

impl Examination {
    /// One examination per section, each holding `limit` questions drawn and
    /// scrambled with `seed + index`.
    ///
    /// Fails before producing anything when `limit` exceeds the question count
    /// or the `SECTIONS` parameter is missing.
    pub fn variants(&self, seed: i64, limit: usize) -> Result<Vec<Examination>, ConfigurationError> {
        let available = self.questions().len();
        if limit > available {
            return Err(ConfigurationError::LimitExceedsQuestions { limit, available });
        }
        let sections = self.sections()?;

        let mut variants = Vec::with_capacity(sections.len());
        for (index, section) in sections.into_iter().enumerate() {
            let section_seed = seed.wrapping_add(index as i64);
            let mut subset = shuffled(self.questions(), section_seed);
            subset.truncate(limit);
            debug!(
                section = %section.name,
                seed = section_seed,
                limit,
                "building variant"
            );
            let candidate = self.for_section(section, subset);
            variants.push(candidate.scrambled(section_seed));
        }
        Ok(variants)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::examination::{Parameter, ParameterValue, Section};
    use crate::question::{Question, TrueFalse};
    use crate::text::TextSegment;

    use super::*;

    fn exam(sections: usize, questions: usize) -> Examination {
        let mut parameters = BTreeMap::new();
        parameters.insert(
            Parameter::Sections,
            ParameterValue::Sections(
                (1..=sections)
                    .map(|n| Section::new(format!("S{n}")))
                    .collect(),
            ),
        );
        let questions: Vec<Question> = (0..questions)
            .map(|n| TrueFalse::new(TextSegment::plain(format!("q{n}")), n % 2 == 0, 1).into())
            .collect();
        Examination::new(parameters, questions)
    }

    #[test]
    fn limit_is_checked_first() {
        let exam = Examination::new(BTreeMap::new(), Vec::new());
        assert_eq!(
            exam.variants(0, 1),
            Err(ConfigurationError::LimitExceedsQuestions {
                limit: 1,
                available: 0
            })
        );
        assert_eq!(
            exam.variants(0, 0),
            Err(ConfigurationError::MissingParameter(Parameter::Sections))
        );
    }

    #[test]
    fn zero_limit_gives_empty_variants() {
        let variants = exam(2, 3).variants(5, 0).expect("variants");
        assert_eq!(variants.len(), 2);
        assert!(variants.iter().all(|v| v.questions().is_empty()));
    }

    #[test]
    fn single_section_with_full_limit_matches_scrambled_exam() {
        let master = exam(1, 4);
        let variants = master.variants(1234, 4).expect("variants");
        let headers: Vec<String> = variants[0]
            .questions()
            .iter()
            .map(|q| q.header().text())
            .collect();
        // [q0,q1,q2,q3] -> subset [q0,q1,q3,q2] -> reordered [q0,q1,q2,q3]
        assert_eq!(headers, vec!["q0", "q1", "q2", "q3"]);
        assert_eq!(variants[0].section().map(|s| s.name.as_str()), Some("S1"));
    }
}
