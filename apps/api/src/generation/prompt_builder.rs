//! Prompt Assembler — deterministic composition of the strategy prompt.
//!
//! Section order: role → search data (optional) → task → input echo →
//! platform rules → compliance → tone → output schema → JSON example.
//! Inputs are not validated here; `StrategyRequest::validate` runs first.

use crate::generation::platform::platform_rules;
use crate::generation::prompts::{
    COMPLIANCE_INSTRUCTIONS, JSON_EXAMPLE, OUTPUT_SCHEMA, ROLE_FRAMING, SEARCH_DATA_HEADER,
    TASK_INSTRUCTIONS,
};
use crate::generation::tone::tone_directive;
use crate::models::strategy::StrategyRequest;

/// Builds the full instruction string for one request.
///
/// `search_data` is the pre-formatted snippet blob; `None` or blank omits the block.
pub fn build_strategy_prompt(request: &StrategyRequest, search_data: Option<&str>) -> String {
    let mut sections: Vec<String> = Vec::with_capacity(9);

    sections.push(ROLE_FRAMING.to_string());

    if let Some(data) = search_data.map(str::trim).filter(|d| !d.is_empty()) {
        sections.push(format!("{SEARCH_DATA_HEADER}\n\n{data}"));
    }

    sections.push(TASK_INSTRUCTIONS.to_string());
    sections.push(input_echo(request));
    sections.push(platform_rules(request.platform).to_string());
    sections.push(COMPLIANCE_INSTRUCTIONS.to_string());
    sections.push(tone_directive(request.tone).to_string());
    sections.push(OUTPUT_SCHEMA.to_string());
    sections.push(JSON_EXAMPLE.to_string());

    sections.join("\n\n")
}

fn input_echo(request: &StrategyRequest) -> String {
    format!(
        "[입력 정보]\n\
         - 제품명: {}\n\
         - 타겟: {}\n\
         - 상세 특징(참고): {}\n\
         - **선택된 매체**: {}\n\
         - **선택된 톤**: {}",
        request.product_name,
        request.target_audience,
        request.product_details,
        request.platform.label(),
        request.tone.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::platform::{BANNER_RULES, SEARCH_AD_RULES};
    use crate::generation::tone::{HARD_DIRECTIVE, LOGICAL_DIRECTIVE};
    use crate::models::strategy::{Platform, Tone};

    fn request(platform: Platform, tone: Tone) -> StrategyRequest {
        StrategyRequest {
            product_name: "다이어트학교 리압스텝퍼".to_string(),
            target_audience: "4050 여성".to_string(),
            product_details: "관절 무리 없음".to_string(),
            platform,
            tone,
            web_search: true,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let req = request(Platform::Feed, Tone::Soft);
        let a = build_strategy_prompt(&req, Some("[1] 제목\n본문\n(출처: https://a.kr)"));
        let b = build_strategy_prompt(&req, Some("[1] 제목\n본문\n(출처: https://a.kr)"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_sections_appear_in_order() {
        let req = request(Platform::Banner, Tone::Hard);
        let prompt = build_strategy_prompt(&req, Some("검색 데이터 본문"));

        let positions: Vec<usize> = [
            ROLE_FRAMING,
            SEARCH_DATA_HEADER,
            "검색 데이터 본문",
            TASK_INSTRUCTIONS,
            "[입력 정보]",
            BANNER_RULES,
            COMPLIANCE_INSTRUCTIONS,
            HARD_DIRECTIVE,
            OUTPUT_SCHEMA,
            JSON_EXAMPLE,
        ]
        .iter()
        .map(|needle| prompt.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_search_block_omitted_without_data() {
        let req = request(Platform::Banner, Tone::Hard);
        assert!(!build_strategy_prompt(&req, None).contains(SEARCH_DATA_HEADER));
        assert!(!build_strategy_prompt(&req, Some("  \n ")).contains(SEARCH_DATA_HEADER));
    }

    #[test]
    fn test_input_echo_uses_labels() {
        let req = request(Platform::Shortform, Tone::Logical);
        let prompt = build_strategy_prompt(&req, None);
        assert!(prompt.contains("- 제품명: 다이어트학교 리압스텝퍼"));
        assert!(prompt.contains("- 타겟: 4050 여성"));
        assert!(prompt.contains("**선택된 매체**: SNS 숏폼 (릴스/틱톡)"));
        assert!(prompt.contains("**선택된 톤**: 논리적 (기능/정보)"));
        assert!(prompt.contains(LOGICAL_DIRECTIVE));
    }

    #[test]
    fn test_unknown_platform_label_builds_search_ad_prompt() {
        let mut req = request(Platform::Banner, Tone::Hard);
        req.platform = Platform::from_label("지하철 광고");
        let prompt = build_strategy_prompt(&req, None);
        assert!(prompt.contains(SEARCH_AD_RULES));
        assert!(!prompt.contains(BANNER_RULES));
    }

    #[test]
    fn test_schema_lists_all_nine_fields() {
        let prompt = build_strategy_prompt(&request(Platform::Feed, Tone::Soft), None);
        for field in crate::models::cep::CEP_FIELDS {
            assert!(prompt.contains(field), "schema is missing {field}");
        }
    }
}
