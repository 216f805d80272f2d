//! Conservative override of model verdicts
//!
//! The model's probabilistic judgment is not the final authority when it has
//! itself reported unambiguous risk evidence without a certification mark.
//! This stage is a deterministic, auditable safety net: it can only move a
//! verdict toward haram, never relax one.

use crate::model::{ClassificationVerdict, VerdictStatus};

/// Confidence assigned to an overridden verdict
pub const OVERRIDE_CONFIDENCE: f64 = 0.9;

/// User-facing message attached to an overridden verdict
pub const OVERRIDE_FEEDBACK: &str = "Contains meat ingredients without halal certification.";

/// Immutable lowercase keyword list for risk-ingredient matching
///
/// Built once at startup from configuration; matching is case-insensitive
/// substring containment against detected ingredient names.
#[derive(Debug, Clone)]
pub struct RiskKeywordSet {
    keywords: Vec<String>,
}

impl RiskKeywordSet {
    pub fn new(keywords: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether the ingredient name contains any risk keyword
    pub fn matches(&self, ingredient: &str) -> bool {
        let ingredient = ingredient.to_lowercase();
        self.keywords.iter().any(|k| ingredient.contains(k))
    }
}

/// Apply the conservative override to a parsed verdict
///
/// If at least one detected ingredient matches a risk keyword and no halal
/// mark was asserted, the verdict is forced to haram with the matching
/// ingredients listed in their original order. Otherwise the verdict passes
/// through unchanged. Pure: same input always yields the same output.
pub fn apply_conservative_checks(
    verdict: ClassificationVerdict,
    keywords: &RiskKeywordSet,
) -> ClassificationVerdict {
    let matched: Vec<String> = verdict
        .detected_ingredients
        .iter()
        .filter(|ingredient| keywords.matches(ingredient))
        .cloned()
        .collect();

    if matched.is_empty() || verdict.has_halal_mark {
        return verdict;
    }

    tracing::info!(
        original_status = %verdict.status,
        matched = ?matched,
        "Risk ingredients without halal mark, overriding verdict to haram"
    );

    ClassificationVerdict {
        status: VerdictStatus::Haram,
        confidence: OVERRIDE_CONFIDENCE,
        feedback_message: OVERRIDE_FEEDBACK.to_string(),
        haram_ingredients: matched,
        ..verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::DEFAULT_RISK_KEYWORDS;
    use crate::model::ImageQuality;

    fn default_keywords() -> RiskKeywordSet {
        RiskKeywordSet::new(DEFAULT_RISK_KEYWORDS)
    }

    fn model_verdict(
        status: VerdictStatus,
        detected: &[&str],
        has_halal_mark: bool,
    ) -> ClassificationVerdict {
        ClassificationVerdict {
            status,
            confidence: 0.8,
            reasoning: "model reasoning".to_string(),
            detected_ingredients: detected.iter().map(|s| s.to_string()).collect(),
            haram_ingredients: vec![],
            warnings: vec![],
            has_halal_mark,
            red_packaging: false,
            image_quality: ImageQuality {
                is_blurry: false,
                has_text: true,
                is_ingredient_label: true,
            },
            feedback_message: "model message".to_string(),
        }
    }

    #[test]
    fn test_no_risk_ingredients_passes_through() {
        let verdict = model_verdict(VerdictStatus::Halal, &["wheat flour", "sugar", "salt"], false);
        let result = apply_conservative_checks(verdict.clone(), &default_keywords());
        assert_eq!(result, verdict);
    }

    #[test]
    fn test_meat_without_mark_forces_haram() {
        let verdict = model_verdict(
            VerdictStatus::Halal,
            &["wheat flour", "chicken extract", "salt"],
            false,
        );
        let result = apply_conservative_checks(verdict, &default_keywords());

        assert_eq!(result.status, VerdictStatus::Haram);
        assert_eq!(result.confidence, OVERRIDE_CONFIDENCE);
        assert_eq!(result.feedback_message, OVERRIDE_FEEDBACK);
        assert_eq!(result.haram_ingredients, vec!["chicken extract"]);
    }

    #[test]
    fn test_halal_mark_protects_model_verdict() {
        let verdict = model_verdict(
            VerdictStatus::Halal,
            &["wheat flour", "chicken extract", "salt"],
            true,
        );
        let result = apply_conservative_checks(verdict.clone(), &default_keywords());
        assert_eq!(result, verdict);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let verdict = model_verdict(VerdictStatus::Unknown, &["Beef Gelatin"], false);
        let result = apply_conservative_checks(verdict, &default_keywords());
        assert_eq!(result.status, VerdictStatus::Haram);
        assert_eq!(result.haram_ingredients, vec!["Beef Gelatin"]);
    }

    #[test]
    fn test_matched_order_follows_detected_order() {
        let verdict = model_verdict(
            VerdictStatus::Unknown,
            &["rennet", "sugar", "gelatin", "microbial enzyme"],
            false,
        );
        let result = apply_conservative_checks(verdict, &default_keywords());
        assert_eq!(
            result.haram_ingredients,
            vec!["rennet", "gelatin", "microbial enzyme"]
        );
    }

    #[test]
    fn test_override_is_idempotent() {
        let verdict = model_verdict(
            VerdictStatus::Halal,
            &["chicken extract", "salt"],
            false,
        );
        let keywords = default_keywords();

        let once = apply_conservative_checks(verdict, &keywords);
        let twice = apply_conservative_checks(once.clone(), &keywords);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_subset_invariant_holds_after_override() {
        let verdict = model_verdict(VerdictStatus::Unknown, &["beef stock", "water"], false);
        let result = apply_conservative_checks(verdict, &default_keywords());

        for haram in &result.haram_ingredients {
            assert!(result.detected_ingredients.contains(haram));
        }
    }

    #[test]
    fn test_custom_keyword_set() {
        let keywords = RiskKeywordSet::new(["pork", "lard"]);
        let verdict = model_verdict(VerdictStatus::Halal, &["chicken extract"], false);
        // "chicken" is not in the custom set, so no override
        let result = apply_conservative_checks(verdict.clone(), &keywords);
        assert_eq!(result, verdict);
    }
}
