use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::ganzhi::Zodiac;

/// Topic keywords and their detail paragraphs. Matched by substring in
/// declared order, first match wins.
pub const TOPIC_DETAILS: &[(&str, &str)] = &[
    (
        "재물",
        "지금은 씨앗을 뿌리는 시기가 아니라 거두는 시기입니다. 묶여있던 자금이 풀리고, 뜻밖의 횡재수가 보입니다. 다만, 남의 말을 듣고 투자하는 것은 금물입니다.",
    ),
    (
        "연애",
        "도화살이 강하게 들어옵니다. 가만히 있어도 주변에 사람이 꼬이는 형국이나, 옥석을 잘 가려야 합니다. 스쳐가는 인연에 마음을 주지 마십시오.",
    ),
    (
        "직장",
        "관운이 비추고 있습니다. 승진이나 이직 제안이 들어올 수 있으며, 윗사람의 인정을 받아 명예가 높아질 운세입니다.",
    ),
    (
        "건강",
        "육체적인 피로보다 정신적인 스트레스가 문제입니다. 머리를 비우는 시간이 필요하며, 특히 소화기 계통을 조심해야 합니다.",
    ),
];

pub const FALLBACK_DETAIL: &str =
    "전반적으로 운기가 상승곡선을 그리고 있습니다. 막혔던 일들이 귀인의 도움으로 하나둘씩 풀려나갈 것입니다.";

pub const CLOSING_ADVICE: &str =
    "💡 개운법(행운을 부르는 법): 이번 달은 동쪽 방향이 길하며, 검은색 옷보다는 밝은색 옷을 입는 것이 기운을 북돋아 줍니다.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneText {
    pub opening_line: String,
    pub detail: &'static str,
}

pub fn opening_lines(name: &str, zodiac: Zodiac) -> [String; 3] {
    [
        format!(
            "천지신명께 비나이다. {} 님의 운세를 살피니, 짙은 안개 속에서 한 줄기 빛이 내리쬐는 형국입니다.",
            name
        ),
        format!(
            "오래 기다리셨습니다. {} 님의 사주에는 {}의 기운이 강하게 서려 있어, 한 번 마음먹은 일은 끝을 보는 성격입니다.",
            name, zodiac
        ),
        "귀하의 운명 흐름을 보니, 마치 거대한 강물이 바다로 흘러가듯 이제야 비로소 제 자리를 찾아가는 시기입니다."
            .to_string(),
    ]
}

pub fn detail_for_topic(topic: &str) -> &'static str {
    TOPIC_DETAILS
        .iter()
        .find(|(key, _)| topic.contains(key))
        .map(|&(_, detail)| detail)
        .unwrap_or(FALLBACK_DETAIL)
}

pub fn compose<R: Rng + ?Sized>(name: &str, zodiac: Zodiac, topic: &str, rng: &mut R) -> FortuneText {
    let lines = opening_lines(name, zodiac);
    let opening_line = lines.choose(rng).cloned().unwrap_or_default();

    FortuneText {
        opening_line,
        detail: detail_for_topic(topic),
    }
}

pub fn headline(name: &str, zodiac: Zodiac, topic: &str) -> String {
    format!("📢 {}님({}띠)의 {} 점사 결과가 나왔습니다.", name, zodiac, topic)
}
