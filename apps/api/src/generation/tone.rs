//! Tone directives — maps the selected copy intensity to the instruction block
//! appended to the prompt. Total over `Tone`; there is no fallthrough branch.

use crate::models::strategy::Tone;

pub const SOFT_DIRECTIVE: &str =
    "**[💧 톤앤매너: 순한맛]** 고객의 아픔에 공감하고 따뜻한 해결책을 제시하세요.";

pub const LOGICAL_DIRECTIVE: &str =
    "**[💡 톤앤매너: 논리적]** 객관적 사실과 기능적 우위를 강조하세요.";

pub const HARD_DIRECTIVE: &str = "**[🔥 톤앤매너: 극도로 매운맛]** 점잖은 경고 금지. \
    '당신 지금 돈 버리고 있다', '망가지는 중이다' 처럼 손실 회피를 강하게 자극하세요.";

/// Returns the tone directive for the selected tone.
pub fn tone_directive(tone: Tone) -> &'static str {
    match tone {
        Tone::Soft => SOFT_DIRECTIVE,
        Tone::Logical => LOGICAL_DIRECTIVE,
        Tone::Hard => HARD_DIRECTIVE,
    }
}
