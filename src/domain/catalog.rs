//! Fixed choices offered by the form: birth-time slots, consultation topics
//! and gender.

use serde::{Deserialize, Serialize};

use crate::domain::ganzhi::Branch;

pub const HOUR_SLOT_LABELS: [&str; 12] = [
    "자시(23:30~01:29)",
    "축시(01:30~03:29)",
    "인시(03:30~05:29)",
    "묘시(05:30~07:29)",
    "진시(07:30~09:29)",
    "사시(09:30~11:29)",
    "오시(11:30~13:29)",
    "미시(13:30~15:29)",
    "신시(15:30~17:29)",
    "유시(17:30~19:29)",
    "술시(19:30~21:29)",
    "해시(21:30~23:29)",
];

/// One of the twelve two-hour birth-time slots. Slots map 1:1 onto branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourSlot(usize);

impl HourSlot {
    pub fn new(index: usize) -> Option<Self> {
        (index < HOUR_SLOT_LABELS.len()).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn label(self) -> &'static str {
        HOUR_SLOT_LABELS[self.0]
    }

    pub fn branch(self) -> Branch {
        Branch::from_index(self.0)
    }

    pub fn all() -> impl Iterator<Item = HourSlot> {
        (0..HOUR_SLOT_LABELS.len()).map(HourSlot)
    }
}

pub const TOPICS: [&str; 9] = [
    "🔮 종합/평생 총운",
    "🌅 2026년 신년 운세",
    "💰 금전/재물/횡재운",
    "🏢 직장/승진/명예운",
    "❤️ 짝사랑/썸/연애운",
    "👩‍❤️‍👨 궁합/애정/권태기",
    "💍 결혼/재혼/배우자복",
    "🏥 건강/질병/사고수",
    "🏘️ 부동산/매매/문서운",
];

pub fn is_known_topic(topic: &str) -> bool {
    TOPICS.contains(&topic)
}

/// Collected by the form but never used in any computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "남")]
    Male,
    #[serde(rename = "여")]
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "남",
            Gender::Female => "여",
        }
    }
}
