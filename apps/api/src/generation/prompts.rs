// All LLM prompt fragments for the strategy generator.
// Platform rules and tone directives live next to their mappings in platform.rs / tone.rs.

use serde_json::{json, Value};

use crate::models::cep::CEP_FIELDS;

/// Role framing that opens every prompt.
pub const ROLE_FRAMING: &str = "당신은 대한민국 최고의 퍼포먼스 마케터입니다.";

/// Header for the pre-fetched search data. Followed by the snippet blob.
pub const SEARCH_DATA_HEADER: &str = "\
**[Step 1. 실시간 웹 검색 데이터]**
아래는 제품명과 고객 반응을 웹에서 직접 검색한 결과입니다.
상세페이지 내용, 실제 후기, 불만 사항(Pain Point), 경쟁사 소구점을 파악하는 근거로 활용하세요.";

/// Task framing: derive exactly seven CEPs from facts, not guesses.
pub const TASK_INSTRUCTIONS: &str = "\
**[Step 2. 전략 수립]**
검색된 '실제 데이터'와 아래 입력 정보를 결합하여 **최적의 CEP 7가지**를 도출하세요.
뇌피셜이 아닌, 검색된 팩트에 기반하여 더욱 날카롭고 구체적인 상황을 묘사해야 합니다.

[⚠️ 필수 사고 과정]
1. **Fact Checking**: 검색된 실제 제품의 강점과 고객의 실제 고민을 매칭하십시오.
2. **Winning Point Extraction**: 검색 결과를 통해 파악한 경쟁사의 약점을 공략하는 우리만의 소구점을 찾으십시오.
3. **7W Expansion**: 상황을 아주 구체적으로 그리십시오.
4. **3C Validation**: 빈도, 적합성, 경쟁을 따져 가장 유효한 7개를 선정하십시오.";

/// Advertising-law warning block. Mirrors the denylist in compliance.rs.
pub const COMPLIANCE_INSTRUCTIONS: &str = "\
**[⚠️ 심의/반려 주의 (Compliance Check)]**
- 표시광고법 및 의료법 위반 소지가 있는 단어('최고', '100%', '완치', '무조건', '보장', '부작용 없음')는 절대 사용하지 마세요.
- 과대광고로 계정이 정지될 수 있습니다. 대신 구체적인 묘사나 은유를 사용하세요.";

/// Field names and semantics of each CEP record.
pub const OUTPUT_SCHEMA: &str = "\
[최종 출력 포맷 (JSON)]
반드시 JSON 배열 하나만 출력하세요. 배열의 각 원소는 아래 9개 필드를 가진 객체입니다.
- cep_title: 'CEP N. [상황]과 [동기]를 결합한 직관적인 타이틀'
- situation_summary: 웹 검색 데이터와 7W 분석을 토대로 작성된 구체적인 상황 묘사 (1~2문장)
- thought: 고객의 속마음/동기 (따옴표 포함한 독백)
- trigger_behavior: 검색 키워드 및 행동 패턴 (화살표 활용)
- concept_keyword: 컨셉 키워드 (해시태그)
- ref_keyword: 광고 라이브러리 검색용 대표 키워드 1개 (예: 다이어트)
- hooking_copy: 타겟 저격 후킹 카피 (매체 규격 준수)
- visual_guide: 매체 맞춤형 시각적 가이드. 선택된 매체가 숏폼이면 '영상 연출', 이미지면 '디자인 구성'으로 작성
- landing_section: 랜딩 페이지 구성 아이디어";

/// Literal example of the expected array shape.
pub const JSON_EXAMPLE: &str = r##"```json
[
  {
    "cep_title": "CEP 1. [상황]과 [동기]를 결합한 직관적인 타이틀",
    "situation_summary": "구체적인 상황 묘사",
    "thought": "\"고객의 속마음 독백\"",
    "trigger_behavior": "검색 키워드 → 행동 패턴",
    "concept_keyword": "#컨셉키워드",
    "ref_keyword": "대표키워드",
    "hooking_copy": "후킹 카피",
    "visual_guide": "시각적 가이드",
    "landing_section": "랜딩 섹션 아이디어"
  }
]
```"##;

/// Gemini `responseSchema` for an array of CEP records with all nine string fields.
pub fn cep_response_schema() -> Value {
    let properties: serde_json::Map<String, Value> = CEP_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": CEP_FIELDS,
            "propertyOrdering": CEP_FIELDS,
        }
    })
}
