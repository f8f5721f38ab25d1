use tracing::debug;

use crate::{
    config::ScoringConfig,
    survey::{ResolvedSchema, ResponseRow},
};

/// Upper bound on a response's quality score.
pub const MAX_SCORE: u8 = 5;

/// Heuristic scorer for a single survey response.
///
/// A response scores:
/// 1. A base point for being submitted at all.
/// 2. One point per designated free-text answer whose character count
///    exceeds the configured minimum (blank/missing answers never count).
/// 3. One point, at most once, if the concatenated answers contain any
///    constructive-suggestion keyword.
///
/// The final score is clamped to [`MAX_SCORE`].
pub struct QualityScorer {
    min_text_len: usize,
    keywords: Vec<String>,
}

impl QualityScorer {
    pub fn new(cfg: &ScoringConfig) -> Self {
        Self {
            min_text_len: cfg.min_text_len,
            // Matching is done against the lowercased concatenation.
            keywords: cfg.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn score(&self, row: &ResponseRow, schema: &ResolvedSchema) -> u8 {
        // Base score
        let mut score: u8 = 1;

        let texts: Vec<&str> = schema.text_fields.iter().map(|&i| row.get(i)).collect();

        for text in &texts {
            if !is_missing(text) && text.chars().count() > self.min_text_len {
                score += 1;
            }
        }

        // Keyword bonus is awarded once for the whole concatenated text,
        // not per field.
        let full_text = texts.join(" ").to_lowercase();
        if self.keywords.iter().any(|kw| full_text.contains(kw.as_str())) {
            score += 1;
        }

        let score = score.min(MAX_SCORE);
        debug!("Row scored {}", score);
        score
    }
}

/// The upstream export renders absent answers as blank cells; "nan" is the
/// sentinel its original tooling stringified them to.
fn is_missing(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t.eq_ignore_ascii_case("nan")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaConfig;

    fn scorer() -> QualityScorer {
        QualityScorer::new(&ScoringConfig::default())
    }

    fn schema() -> ResolvedSchema {
        let headers: Vec<String> = (0..8).map(|i| format!("c{}", i)).collect();
        ResolvedSchema::resolve(&headers, &SchemaConfig::default()).unwrap()
    }

    fn row(texts: [&str; 4]) -> ResponseRow {
        let mut cells = vec!["0".to_string(), "FB001".to_string(), "acct".to_string(), "t".to_string()];
        cells.extend(texts.iter().map(|s| s.to_string()));
        ResponseRow::new(cells)
    }

    #[test]
    fn all_blank_answers_score_base_only() {
        assert_eq!(scorer().score(&row(["", "", "", ""]), &schema()), 1);
    }

    #[test]
    fn nan_sentinel_counts_as_missing() {
        assert_eq!(scorer().score(&row(["nan", "nan", "nan", "nan"]), &schema()), 1);
    }

    #[test]
    fn one_long_answer_without_keywords_scores_two() {
        assert_eq!(
            scorer().score(&row(["elevenchars", "", "", ""]), &schema()),
            2
        );
    }

    #[test]
    fn keyword_alone_scores_two() {
        assert_eq!(scorer().score(&row(["建议", "", "", ""]), &schema()), 2);
        assert_eq!(scorer().score(&row(["", "could", "", ""]), &schema()), 2);
    }

    #[test]
    fn keyword_bonus_is_awarded_once() {
        // Two keyword-bearing answers still add a single bonus point.
        assert_eq!(scorer().score(&row(["建议", "希望", "", ""]), &schema()), 2);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(scorer().score(&row(["SHOULD", "", "", ""]), &schema()), 2);
    }

    #[test]
    fn chinese_answers_are_measured_in_characters() {
        // Eleven CJK characters exceed the ten-character minimum even though
        // the byte length check would already pass trivially.
        assert_eq!(
            scorer().score(&row(["界面很好用但是加载太慢了", "", "", ""]), &schema()),
            2
        );
    }

    #[test]
    fn score_clamps_at_five() {
        let long = "this answer suggests an improvement and runs well past ten characters";
        assert_eq!(scorer().score(&row([long, long, long, long]), &schema()), 5);
    }

    #[test]
    fn score_is_always_within_bounds() {
        let samples = [
            ["", "", "", ""],
            ["short", "x", "y", "z"],
            ["a longer answer here", "建议改进一下加载速度和界面", "", ""],
            ["aaaaaaaaaaaa", "bbbbbbbbbbbb", "cccccccccccc", "dddddddddddd"],
        ];
        for texts in samples {
            let s = scorer().score(&row(texts), &schema());
            assert!(s >= 1 && s <= MAX_SCORE);
        }
    }
}
