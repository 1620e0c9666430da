use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names of a CEP record, in the order the model is asked to emit them.
/// Also the CSV column order.
pub const CEP_FIELDS: [&str; 9] = [
    "cep_title",
    "situation_summary",
    "thought",
    "trigger_behavior",
    "concept_keyword",
    "ref_keyword",
    "hooking_copy",
    "visual_guide",
    "landing_section",
];

/// One Category Entry Point produced by the model.
///
/// Missing fields are empty strings; the report layer fills display defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CepRecord {
    pub cep_title: String,
    pub situation_summary: String,
    pub thought: String,
    pub trigger_behavior: String,
    pub concept_keyword: String,
    pub ref_keyword: String,
    pub hooking_copy: String,
    pub visual_guide: String,
    pub landing_section: String,
}

impl CepRecord {
    /// Builds a record from one JSON object, tolerating missing keys and
    /// non-string values (numbers, arrays) by stringifying them.
    pub fn from_object(obj: &serde_json::Map<String, Value>) -> Self {
        let field = |key: &str| -> String {
            match obj.get(key) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
                Some(other) => other.to_string(),
            }
        };

        CepRecord {
            cep_title: field("cep_title"),
            situation_summary: field("situation_summary"),
            thought: field("thought"),
            trigger_behavior: field("trigger_behavior"),
            concept_keyword: field("concept_keyword"),
            ref_keyword: field("ref_keyword"),
            hooking_copy: field("hooking_copy"),
            visual_guide: field("visual_guide"),
            landing_section: field("landing_section"),
        }
    }

    /// Field values in `CEP_FIELDS` order.
    pub fn values(&self) -> [&str; 9] {
        [
            &self.cep_title,
            &self.situation_summary,
            &self.thought,
            &self.trigger_behavior,
            &self.concept_keyword,
            &self.ref_keyword,
            &self.hooking_copy,
            &self.visual_guide,
            &self.landing_section,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_become_empty() {
        let value = json!({"cep_title": "CEP 1. 퇴근 후 무릎 통증"});
        let record = CepRecord::from_object(value.as_object().unwrap());
        assert_eq!(record.cep_title, "CEP 1. 퇴근 후 무릎 통증");
        assert!(record.hooking_copy.is_empty());
        assert!(record.landing_section.is_empty());
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        let value = json!({
            "concept_keyword": ["#홈트", "#무릎보호"],
            "ref_keyword": 7,
            "thought": null
        });
        let record = CepRecord::from_object(value.as_object().unwrap());
        assert_eq!(record.concept_keyword, "#홈트 #무릎보호");
        assert_eq!(record.ref_keyword, "7");
        assert_eq!(record.thought, "");
    }

    #[test]
    fn test_values_follow_field_order() {
        let record = CepRecord {
            cep_title: "t".to_string(),
            landing_section: "l".to_string(),
            ..Default::default()
        };
        let values = record.values();
        assert_eq!(values.len(), CEP_FIELDS.len());
        assert_eq!(values[0], "t");
        assert_eq!(values[8], "l");
    }
}
