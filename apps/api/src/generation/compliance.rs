//! Compliance Scanner — literal substring scan of generated copy against a fixed
//! denylist of advertising-law risk phrases. No stemming or normalization.

/// Superlatives, absolute-efficacy claims and regulatory trigger words.
pub const RISKY_PHRASES: [&str; 9] = [
    "최고",
    "100%",
    "완치",
    "무조건",
    "보장",
    "부작용 없",
    "즉시",
    "유일",
    "최초",
];

/// Returns the denylisted phrases found in `text`, in denylist order.
pub fn scan_compliance_risks(text: &str) -> Vec<&'static str> {
    RISKY_PHRASES
        .iter()
        .copied()
        .filter(|phrase| text.contains(phrase))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_copy_has_no_risks() {
        assert!(scan_compliance_risks("무릎 걱정 없이 거실에서 10분").is_empty());
        assert!(scan_compliance_risks("").is_empty());
    }

    #[test]
    fn test_hits_follow_denylist_order_not_text_order() {
        let found = scan_compliance_risks("효과 보장! 만족도 100% 달성");
        assert_eq!(found, vec!["100%", "보장"]);
    }

    #[test]
    fn test_every_denylisted_phrase_is_detected() {
        for phrase in RISKY_PHRASES {
            let text = format!("앞 {phrase} 뒤");
            assert_eq!(scan_compliance_risks(&text), vec![phrase]);
        }
    }

    #[test]
    fn test_partial_phrase_matches_as_substring() {
        assert_eq!(scan_compliance_risks("부작용 없음 확인"), vec!["부작용 없"]);
        assert_eq!(scan_compliance_risks("국내최초출시"), vec!["최초"]);
    }

    #[test]
    fn test_match_is_exact_without_normalization() {
        // spacing variants are not normalized
        assert!(scan_compliance_risks("100 %").is_empty());
        assert!(scan_compliance_risks("부작용없음").is_empty());
    }

    #[test]
    fn test_all_phrases_at_once() {
        let text = RISKY_PHRASES.join(" / ");
        assert_eq!(scan_compliance_risks(&text), RISKY_PHRASES.to_vec());
    }
}
