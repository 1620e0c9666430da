//! Platform formatting rules — character ceilings, forbidden words and
//! stylistic framing per advertising surface.

use crate::models::strategy::Platform;

pub const SHORTFORM_RULES: &str = "\
**[🚨 중요: 숏폼(릴스/틱톡) 매체 규격 준수]**
1. **형식**: 글자가 아닌 '영상 연출(Action)' 위주.
2. **Visual Guide**: 정지 이미지가 아니라, 초반 3초에 시선을 뺏는 구체적인 행동 지시문 작성.
3. **카피**: 자막으로 들어갈 짧은 구어체.";

pub const FEED_RULES: &str = "\
**[🚨 중요: 인스타/페북 피드 매체 규격 준수]**
1. **형식**: 카드뉴스 표지(썸네일).
2. **글자 수 제한**: 가독성을 위해 2줄 이내로 끊어지는 짧고 굵은 헤드라인.";

pub const BANNER_RULES: &str = "\
**[🚨 중요: GFA/카카오 배너 매체 규격 준수]**
1. **글자 수 제한**: 메인 카피는 띄어쓰기 포함 **25자 이내**로 작성하세요. 길어지면 잘립니다.
2. **금지어**: '좋아요', '댓글', '공유' 언급 절대 금지.
3. **스타일**: '뉴스 기사 헤드라인' 또는 '커뮤니티 썰' 느낌의 텍스트형 배너 카피.";

pub const SEARCH_AD_RULES: &str = "\
**[🚨 중요: 검색광고(TDA) 매체 규격 준수]**
1. **글자 수 제한**: 제목 15자 이내.
2. **스타일**: 검색 키워드를 반드시 포함한 신뢰도 높은 문구.";

/// Returns the formatting rules block for the selected platform.
pub fn platform_rules(platform: Platform) -> &'static str {
    match platform {
        Platform::Shortform => SHORTFORM_RULES,
        Platform::Feed => FEED_RULES,
        Platform::Banner => BANNER_RULES,
        Platform::SearchAd => SEARCH_AD_RULES,
    }
}

/// Label for the visual guide field: video direction for short-form, image layout otherwise.
pub fn visual_label(platform: Platform) -> &'static str {
    match platform {
        Platform::Shortform => "🎬 숏폼 영상 기획(오프닝/연출)",
        _ => "🖼️ 상위 이미지",
    }
}
