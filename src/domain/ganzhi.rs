use std::fmt;

use crate::domain::catalog::HourSlot;

/// Heavenly stems, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

pub const STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

const STEM_HANJA: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];
const STEM_HANGUL: [char; 10] = ['갑', '을', '병', '정', '무', '기', '경', '신', '임', '계'];

impl Stem {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps mod 10.
    pub fn from_index(index: usize) -> Stem {
        STEMS[index % STEMS.len()]
    }

    pub fn hanja(self) -> char {
        STEM_HANJA[self.index()]
    }

    pub fn hangul(self) -> char {
        STEM_HANGUL[self.index()]
    }

    pub fn from_hangul(c: char) -> Option<Stem> {
        STEM_HANGUL.iter().position(|&h| h == c).map(Stem::from_index)
    }

    pub fn from_hanja(c: char) -> Option<Stem> {
        STEM_HANJA.iter().position(|&h| h == c).map(Stem::from_index)
    }
}

/// Earthly branches, in cycle order. Slot 0 of the day (23:30~01:29) is `Ja`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

pub const BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

const BRANCH_HANJA: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];
const BRANCH_HANGUL: [char; 12] = [
    '자', '축', '인', '묘', '진', '사', '오', '미', '신', '유', '술', '해',
];

impl Branch {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps mod 12.
    pub fn from_index(index: usize) -> Branch {
        BRANCHES[index % BRANCHES.len()]
    }

    pub fn hanja(self) -> char {
        BRANCH_HANJA[self.index()]
    }

    pub fn hangul(self) -> char {
        BRANCH_HANGUL[self.index()]
    }

    pub fn from_hangul(c: char) -> Option<Branch> {
        BRANCH_HANGUL.iter().position(|&h| h == c).map(Branch::from_index)
    }

    pub fn from_hanja(c: char) -> Option<Branch> {
        BRANCH_HANJA.iter().position(|&h| h == c).map(Branch::from_index)
    }

    pub fn zodiac(self) -> Zodiac {
        ZODIACS[self.index()]
    }
}

/// One stem+branch pair, displayed as its two Hanja characters (e.g. `庚午`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Position in the 60-term cycle, 甲子 = 0.
    pub fn from_cycle_index(index: i64) -> Self {
        let index = index.rem_euclid(60) as usize;
        Self::new(Stem::from_index(index), Branch::from_index(index))
    }

    /// Parses a phonetic label such as `경오`. The first syllable is read as a
    /// stem and the second as a branch, so `신` resolves by position (辛 or 申).
    pub fn from_hangul(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        let stem = Stem::from_hangul(chars.next()?)?;
        let branch = Branch::from_hangul(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(stem, branch))
    }

    pub fn hangul(&self) -> String {
        [self.stem.hangul(), self.branch.hangul()].iter().collect()
    }

    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem.hanja(), self.branch.hanja())
    }
}

/// Hour pillar from the day stem: each day stem fixes the stem of the 子 slot,
/// and the stem advances by one per two-hour slot.
pub fn hour_pillar(day_stem: Stem, slot: HourSlot) -> Pillar {
    let stem_index = ((day_stem.index() % 5) * 2 + slot.index()) % 10;
    Pillar::new(Stem::from_index(stem_index), slot.branch())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

pub const ZODIACS: [Zodiac; 12] = [
    Zodiac::Rat,
    Zodiac::Ox,
    Zodiac::Tiger,
    Zodiac::Rabbit,
    Zodiac::Dragon,
    Zodiac::Snake,
    Zodiac::Horse,
    Zodiac::Goat,
    Zodiac::Monkey,
    Zodiac::Rooster,
    Zodiac::Dog,
    Zodiac::Pig,
];

impl Zodiac {
    pub fn label(&self) -> &'static str {
        match self {
            Zodiac::Rat => "쥐",
            Zodiac::Ox => "소",
            Zodiac::Tiger => "호랑이",
            Zodiac::Rabbit => "토끼",
            Zodiac::Dragon => "용",
            Zodiac::Snake => "뱀",
            Zodiac::Horse => "말",
            Zodiac::Goat => "양",
            Zodiac::Monkey => "원숭이",
            Zodiac::Rooster => "닭",
            Zodiac::Dog => "개",
            Zodiac::Pig => "돼지",
        }
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
