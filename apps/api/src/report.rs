//! Report cards — display-ready view of parsed CEP records: defaults for
//! missing fields, compliance warnings, and outbound reference / VOC links.

use serde::Serialize;
use url::form_urlencoded;

use crate::generation::compliance::scan_compliance_risks;
use crate::generation::platform::visual_label;
use crate::models::cep::CepRecord;
use crate::models::strategy::Platform;

const EMPTY_CONTENT: &str = "내용 없음";
const EMPTY_KEYWORD: &str = "키워드 없음";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkButton {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportCard {
    pub title: String,
    pub situation: String,
    pub thought: String,
    pub trigger_behavior: String,
    pub concept_keyword: String,
    pub hooking_copy: String,
    pub compliance_risks: Vec<&'static str>,
    pub compliance_warning: Option<String>,
    pub visual_label: &'static str,
    pub visual_guide: String,
    pub landing_section: String,
    pub reference_links: Vec<LinkButton>,
    pub voc_links: Vec<LinkButton>,
}

/// Design-reference destinations, templated with a single keyword.
const REFERENCE_DESTINATIONS: [(&str, &str); 5] = [
    ("📌 핀터레스트", "https://www.pinterest.co.kr/search/pins/?q={q}"),
    ("📘 Meta 광고", "https://www.facebook.com/ads/library/?ad_type=all&q={q}"),
    ("💚 네이버(Ref)", "https://search.naver.com/search.naver?where=image&query={q}"),
    ("🟥 유튜브", "https://www.youtube.com/results?search_query={q}"),
    ("🎵 틱톡", "https://www.tiktok.com/search?q={q}"),
];

/// Voice-of-customer destinations, templated with "product keyword".
const VOC_DESTINATIONS: [(&str, &str); 3] = [
    ("🟢 네이버 블로그 후기", "https://search.naver.com/search.naver?where=blog&query={q}"),
    ("☕ 네이버 카페 반응", "https://search.naver.com/search.naver?where=article&query={q}"),
    ("📰 관련 뉴스/기사", "https://www.google.com/search?q={q}&tbm=nws"),
];

fn encode_query(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

fn links(destinations: &[(&'static str, &str)], query: &str) -> Vec<LinkButton> {
    let encoded = encode_query(query);
    destinations
        .iter()
        .map(|&(label, template)| LinkButton {
            label,
            url: template.replace("{q}", &encoded),
        })
        .collect()
}

pub fn reference_links(keyword: &str) -> Vec<LinkButton> {
    links(&REFERENCE_DESTINATIONS, keyword)
}

pub fn voc_links(product_name: &str, concept_keyword: &str) -> Vec<LinkButton> {
    links(&VOC_DESTINATIONS, &format!("{product_name} {concept_keyword}"))
}

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|c| !c.trim().is_empty())
        .unwrap_or("")
}

/// Builds one card per record, in order. `index` in titles is 1-based.
pub fn build_report(records: &[CepRecord], product_name: &str, platform: Platform) -> Vec<ReportCard> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| build_card(idx, record, product_name, platform))
        .collect()
}

fn build_card(idx: usize, record: &CepRecord, product_name: &str, platform: Platform) -> ReportCard {
    let risks = scan_compliance_risks(&record.hooking_copy);
    let compliance_warning = (!risks.is_empty())
        .then(|| format!("⚠️ [주의] 심의 반려 위험 단어 감지: {}", risks.join(", ")));

    let ref_keyword = first_non_empty(&[
        record.ref_keyword.as_str(),
        record.concept_keyword.as_str(),
        product_name,
    ]);

    ReportCard {
        title: or_default(&record.cep_title, &format!("CEP {}", idx + 1)),
        situation: or_default(&record.situation_summary, EMPTY_CONTENT),
        thought: format!("\"{}\"", record.thought.replace('"', "")),
        trigger_behavior: or_default(&record.trigger_behavior, EMPTY_CONTENT),
        concept_keyword: or_default(&record.concept_keyword, EMPTY_KEYWORD),
        hooking_copy: record.hooking_copy.clone(),
        compliance_risks: risks,
        compliance_warning,
        visual_label: visual_label(platform),
        visual_guide: record.visual_guide.clone(),
        landing_section: record.landing_section.clone(),
        reference_links: reference_links(ref_keyword),
        voc_links: voc_links(product_name, &record.concept_keyword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> CepRecord {
        CepRecord {
            cep_title: "CEP 1. 비 오는 날 운동 포기".to_string(),
            situation_summary: "장마철 산책을 못 하는 4050 여성".to_string(),
            thought: "\"오늘도 못 걸었네\"".to_string(),
            trigger_behavior: "실내 운동 검색 → 스텝퍼 비교".to_string(),
            concept_keyword: "#실내유산소".to_string(),
            ref_keyword: "홈트 스텝퍼".to_string(),
            hooking_copy: "효과 100% 보장 스텝퍼".to_string(),
            visual_guide: "비 오는 창밖 vs 거실".to_string(),
            landing_section: "후기 섹션".to_string(),
        }
    }

    #[test]
    fn test_empty_record_gets_defaults() {
        let cards = build_report(&[CepRecord::default()], "리압스텝퍼", Platform::Banner);
        let card = &cards[0];
        assert_eq!(card.title, "CEP 1");
        assert_eq!(card.situation, "내용 없음");
        assert_eq!(card.trigger_behavior, "내용 없음");
        assert_eq!(card.concept_keyword, "키워드 없음");
        assert_eq!(card.thought, "\"\"");
        assert!(card.compliance_risks.is_empty());
        assert!(card.compliance_warning.is_none());
    }

    #[test]
    fn test_thought_quotes_are_normalized() {
        let cards = build_report(&[full_record()], "리압스텝퍼", Platform::Feed);
        assert_eq!(cards[0].thought, "\"오늘도 못 걸었네\"");
    }

    #[test]
    fn test_risky_copy_gets_warning() {
        let cards = build_report(&[full_record()], "리압스텝퍼", Platform::Feed);
        assert_eq!(cards[0].compliance_risks, vec!["100%", "보장"]);
        assert_eq!(
            cards[0].compliance_warning.as_deref(),
            Some("⚠️ [주의] 심의 반려 위험 단어 감지: 100%, 보장")
        );
    }

    #[test]
    fn test_reference_links_use_ref_keyword_encoded() {
        let cards = build_report(&[full_record()], "리압스텝퍼", Platform::Feed);
        let links = &cards[0].reference_links;
        assert_eq!(links.len(), 5);
        let encoded = encode_query("홈트 스텝퍼");
        assert!(encoded.contains('+'));
        assert_eq!(
            links[0].url,
            format!("https://www.pinterest.co.kr/search/pins/?q={encoded}")
        );
        assert!(links.iter().all(|l| l.url.contains(&encoded)));
    }

    #[test]
    fn test_reference_keyword_falls_back_to_concept_then_product() {
        let mut record = full_record();
        record.ref_keyword.clear();
        let links = reference_links(first_non_empty(&[
            record.ref_keyword.as_str(),
            record.concept_keyword.as_str(),
            "리압스텝퍼",
        ]));
        assert!(links[4].url.ends_with(&encode_query("#실내유산소")));

        let cards = build_report(&[CepRecord::default()], "리압스텝퍼", Platform::Feed);
        assert!(cards[0].reference_links[3]
            .url
            .ends_with(&encode_query("리압스텝퍼")));
    }

    #[test]
    fn test_voc_links_combine_product_and_concept() {
        let links = voc_links("리압스텝퍼", "#실내유산소");
        assert_eq!(links.len(), 3);
        let encoded = encode_query("리압스텝퍼 #실내유산소");
        assert_eq!(
            links[2].url,
            format!("https://www.google.com/search?q={encoded}&tbm=nws")
        );
    }

    #[test]
    fn test_visual_label_depends_on_platform() {
        let short = build_report(&[full_record()], "p", Platform::Shortform);
        let banner = build_report(&[full_record()], "p", Platform::Banner);
        assert_eq!(short[0].visual_label, "🎬 숏폼 영상 기획(오프닝/연출)");
        assert_eq!(banner[0].visual_label, "🖼️ 상위 이미지");
    }
}
