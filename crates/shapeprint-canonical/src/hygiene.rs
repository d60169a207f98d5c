use crate::descriptor::Literal;
use crate::identifiers::ProfileId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters with structural meaning in the fingerprint grammar.
const GRAMMAR_DELIMITERS: [char; 4] = ['(', ')', ',', ':'];

/// Hygiene status for canonicalization attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HygieneStatus {
    /// Every label embedded in the fingerprint is unambiguous.
    Ok,
    /// Some embedded label could collide with another tree's fingerprint;
    /// warnings name the cause.
    Ambiguous,
    /// Canonicalization failed.
    Invalid,
}

/// Stable warning code emitted by canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HygieneWarning(String);

impl HygieneWarning {
    /// Creates a warning from a literal code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the warning code.
    pub fn code(&self) -> &str {
        &self.0
    }
}

/// Hygiene reports produced during canonicalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HygieneReport {
    /// Overall hygiene status.
    pub status: HygieneStatus,
    /// Stable warning codes, each listed once.
    pub warnings: Vec<HygieneWarning>,
    /// Counters such as `nodes`, `max_depth`, `brands`, `scope_boundaries`.
    pub metrics: BTreeMap<String, u64>,
    /// Identifier of the fingerprint grammar that produced the string.
    pub profile_id: ProfileId,
}

impl HygieneReport {
    /// Creates an empty report with status `Ok`.
    pub fn new(profile_id: ProfileId) -> Self {
        Self {
            status: HygieneStatus::Ok,
            warnings: vec![],
            metrics: BTreeMap::new(),
            profile_id,
        }
    }

    pub(crate) fn count(&mut self, metric: &str) {
        *self.metrics.entry(metric.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn observe_depth(&mut self, depth: usize) {
        let entry = self.metrics.entry("max_depth".to_string()).or_insert(0);
        *entry = (*entry).max(depth as u64);
    }

    /// Records a warning when `label` cannot be embedded verbatim without
    /// risking a collision.
    pub(crate) fn check_label(&mut self, label: &str) {
        if label.is_empty() {
            self.flag("EmptyLabel", "empty_labels");
        } else if label.contains(GRAMMAR_DELIMITERS) {
            self.flag("DelimiterInLabel", "delimiter_labels");
        }
    }

    /// Checks a literal's rendered text, and flags string literals whose text
    /// is indistinguishable from a number, boolean or null literal.
    pub(crate) fn check_literal(&mut self, literal: &Literal, text: &str) {
        self.check_label(text);
        if let Literal::Str(s) = literal {
            if renders_as_scalar(s) {
                self.flag("LiteralTypeAmbiguous", "literal_type_ambiguous");
            }
        }
    }

    fn flag(&mut self, code: &str, metric: &str) {
        self.count(metric);
        if !self.warnings.iter().any(|w| w.code() == code) {
            self.warnings.push(HygieneWarning::new(code));
        }
        if self.status == HygieneStatus::Ok {
            self.status = HygieneStatus::Ambiguous;
        }
    }
}

/// Whether some non-string literal renders exactly as `text`.
fn renders_as_scalar(text: &str) -> bool {
    if matches!(text, "NaN" | "Infinity" | "-Infinity") {
        return true;
    }
    match serde_json::from_str::<Literal>(text) {
        Ok(Literal::Str(_)) | Err(_) => false,
        Ok(scalar) => scalar.to_string() == text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_leave_report_clean() {
        let mut report = HygieneReport::new(ProfileId::default());
        report.check_label("email");
        report.check_label("$$.user");
        assert_eq!(report.status, HygieneStatus::Ok);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn delimiters_mark_report_ambiguous_once() {
        let mut report = HygieneReport::new(ProfileId::default());
        report.check_label("a,b");
        report.check_label("x:y");
        assert_eq!(report.status, HygieneStatus::Ambiguous);
        assert_eq!(report.warnings, vec![HygieneWarning::new("DelimiterInLabel")]);
        assert_eq!(report.metrics["delimiter_labels"], 2);
    }

    #[test]
    fn empty_label_is_flagged() {
        let mut report = HygieneReport::new(ProfileId::default());
        report.check_label("");
        assert_eq!(report.status, HygieneStatus::Ambiguous);
        assert_eq!(report.warnings[0].code(), "EmptyLabel");
    }

    #[test]
    fn numeric_looking_strings_are_flagged() {
        for text in ["1", "-3", "2.5", "true", "null", "1e+21", "NaN"] {
            let mut report = HygieneReport::new(ProfileId::default());
            report.check_literal(&Literal::Str(text.into()), text);
            assert_eq!(report.status, HygieneStatus::Ambiguous, "{text}");
            assert_eq!(report.warnings, vec![HygieneWarning::new("LiteralTypeAmbiguous")]);
        }
    }

    #[test]
    fn strings_no_scalar_renders_as_stay_clean() {
        for text in ["1.0", "01", " 1", "1e21", "True", "yes"] {
            let mut report = HygieneReport::new(ProfileId::default());
            report.check_literal(&Literal::Str(text.into()), text);
            assert_eq!(report.status, HygieneStatus::Ok, "{text}");
        }
        let mut report = HygieneReport::new(ProfileId::default());
        report.check_literal(&Literal::Int(1), "1");
        assert_eq!(report.status, HygieneStatus::Ok);
    }
}
