use std::collections::HashSet;

/// Word-overlap similarity between two pieces of content.
///
/// Both inputs are lowercased and split on whitespace; the score is the size
/// of the shared vocabulary divided by the larger vocabulary. Ranges over
/// `0.0..=1.0`; either input being empty scores `0.0`.
pub fn word_overlap(a: &str, b: &str) -> f32 {
    let wa: HashSet<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let wb: HashSet<String> = b.to_lowercase().split_whitespace().map(String::from).collect();

    if wa.is_empty() || wb.is_empty() {
        return 0.0;
    }

    let shared = wa.intersection(&wb).count();
    shared as f32 / wa.len().max(wb.len()) as f32
}

#[cfg(test)]
mod tests {
    use super::word_overlap;

    #[test]
    fn identical_content_scores_one() {
        assert_eq!(word_overlap("the sky is blue", "the sky is blue"), 1.0);
    }

    #[test]
    fn case_and_order_are_ignored() {
        assert_eq!(word_overlap("Blue Sky", "sky blue"), 1.0);
    }

    #[test]
    fn disjoint_content_scores_zero() {
        assert_eq!(word_overlap("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(word_overlap("", "anything"), 0.0);
        assert_eq!(word_overlap("anything", "   "), 0.0);
    }

    #[test]
    fn partial_overlap_is_fractional() {
        let score = word_overlap("the sky is blue", "the sea is green");
        // shared: "the", "is" out of 4-word vocabularies
        assert!((score - 0.5).abs() < f32::EPSILON);
    }
}
