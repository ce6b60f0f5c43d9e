use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::calendar::{CalendarEngine, CalendarError, GanzhiLabels, LunarDate};
use crate::domain::catalog::HourSlot;
use crate::domain::ganzhi::{hour_pillar, Pillar, Zodiac};

pub const MIN_BIRTH_YEAR: i32 = 1930;
pub const MAX_BIRTH_YEAR: i32 = 2026;

/// The only date error text ever shown to the user.
pub const DATE_ERROR_MESSAGE: &str = "날짜가 올바르지 않습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_lunar: bool,
    /// Only meaningful together with `is_lunar`.
    pub is_leap_month: bool,
    pub hour_slot: HourSlot,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid lunar date {year}-{month}-{day} (leap month: {leap})")]
    InvalidLunarDate { year: i32, month: u32, day: u32, leap: bool },
    #[error("invalid solar date {year}-{month}-{day}")]
    InvalidSolarDate { year: i32, month: u32, day: u32 },
    #[error("calendar conversion failed: {0}")]
    ConversionError(String),
}

impl DateError {
    pub fn kind(&self) -> &'static str {
        match self {
            DateError::InvalidLunarDate { .. } => "invalid_lunar_date",
            DateError::InvalidSolarDate { .. } => "invalid_solar_date",
            DateError::ConversionError(_) => "conversion_error",
        }
    }

    pub fn user_message(&self) -> &'static str {
        DATE_ERROR_MESSAGE
    }
}

impl From<CalendarError> for DateError {
    fn from(e: CalendarError) -> Self {
        DateError::ConversionError(e.to_string())
    }
}

pub const PILLAR_TITLES: [&str; 4] = ["년주(조상)", "월주(부모)", "일주(나)", "시주(자식)"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn to_array(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Pillars paired with their display titles, year first.
    pub fn titled(&self) -> impl Iterator<Item = (&'static str, Pillar)> {
        PILLAR_TITLES.into_iter().zip(self.to_array())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub solar_date: NaiveDate,
    pub pillars: FourPillars,
    pub zodiac: Zodiac,
}

pub fn resolve(engine: &dyn CalendarEngine, input: &BirthInput) -> Result<Resolution, DateError> {
    let solar_date = if input.is_lunar {
        let lunar = LunarDate::new(input.year, input.month, input.day, input.is_leap_month);
        engine.lunar_to_solar(lunar).map_err(|e| match e {
            CalendarError::NoSuchLunarDate(_) => DateError::InvalidLunarDate {
                year: input.year,
                month: input.month,
                day: input.day,
                leap: input.is_leap_month,
            },
            other => other.into(),
        })?
    } else {
        NaiveDate::from_ymd_opt(input.year, input.month, input.day).ok_or(
            DateError::InvalidSolarDate {
                year: input.year,
                month: input.month,
                day: input.day,
            },
        )?
    };

    let labels = engine.solar_to_ganzhi(solar_date)?;
    let (year, month, day) = translate_labels(&labels)?;
    let hour = hour_pillar(day.stem, input.hour_slot);

    Ok(Resolution {
        solar_date,
        pillars: FourPillars { year, month, day, hour },
        zodiac: year.branch.zodiac(),
    })
}

fn translate_labels(labels: &GanzhiLabels) -> Result<(Pillar, Pillar, Pillar), DateError> {
    let parse = |unit: &str, label: &str| {
        Pillar::from_hangul(label).ok_or_else(|| {
            DateError::ConversionError(format!("unrecognized {} label {:?}", unit, label))
        })
    };
    Ok((
        parse("year", &labels.year)?,
        parse("month", &labels.month)?,
        parse("day", &labels.day)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ganzhi::{Branch, BRANCHES, STEMS};
    use crate::domain::korean_lunar::KoreanLunarCalendar;

    fn solar(year: i32, month: u32, day: u32, slot: usize) -> BirthInput {
        BirthInput {
            year,
            month,
            day,
            is_lunar: false,
            is_leap_month: false,
            hour_slot: HourSlot::new(slot).unwrap(),
        }
    }

    fn lunar(year: i32, month: u32, day: u32, leap: bool) -> BirthInput {
        BirthInput {
            is_lunar: true,
            is_leap_month: leap,
            ..solar(year, month, day, 0)
        }
    }

    /// Returns fixed labels regardless of the date asked for.
    struct FixedLabels(GanzhiLabels);

    impl CalendarEngine for FixedLabels {
        fn lunar_to_solar(&self, date: LunarDate) -> Result<NaiveDate, CalendarError> {
            NaiveDate::from_ymd_opt(date.year, date.month, date.day)
                .ok_or(CalendarError::NoSuchLunarDate(date))
        }

        fn solar_to_ganzhi(&self, _date: NaiveDate) -> Result<GanzhiLabels, CalendarError> {
            Ok(self.0.clone())
        }
    }

    fn fixed(year: &str, month: &str, day: &str) -> FixedLabels {
        FixedLabels(GanzhiLabels {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
        })
    }

    #[test]
    fn test_resolve_horse_year_at_noon() {
        let engine = KoreanLunarCalendar::new();
        let result = resolve(&engine, &solar(1990, 5, 15, 6)).unwrap();

        let codes: Vec<String> = result.pillars.to_array().iter().map(|p| p.to_string()).collect();
        assert_eq!(codes, vec!["庚午", "辛巳", "庚辰", "壬午"]);
        assert_eq!(result.zodiac, Zodiac::Horse);
        assert_eq!(result.zodiac.label(), "말");
        assert_eq!(result.solar_date, NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
    }

    #[test]
    fn test_resolve_lunar_input() {
        let engine = KoreanLunarCalendar::new();
        let result = resolve(&engine, &lunar(2020, 4, 1, true)).unwrap();
        assert_eq!(result.solar_date, NaiveDate::from_ymd_opt(2020, 5, 23).unwrap());
        assert_eq!(result.pillars.year.to_string(), "庚子");
        assert_eq!(result.zodiac, Zodiac::Rat);
    }

    #[test]
    fn test_leap_flag_ignored_for_solar_input() {
        let engine = KoreanLunarCalendar::new();
        let mut input = solar(1990, 5, 15, 6);
        input.is_leap_month = true;
        assert!(resolve(&engine, &input).is_ok());
    }

    #[test]
    fn test_invalid_solar_date() {
        let engine = KoreanLunarCalendar::new();
        let err = resolve(&engine, &solar(2001, 2, 30, 0)).unwrap_err();
        assert_eq!(err, DateError::InvalidSolarDate { year: 2001, month: 2, day: 30 });
        assert_eq!(err.user_message(), DATE_ERROR_MESSAGE);

        assert!(resolve(&engine, &solar(2000, 2, 29, 0)).is_ok());
        assert!(matches!(
            resolve(&engine, &solar(1999, 2, 29, 0)),
            Err(DateError::InvalidSolarDate { .. })
        ));
    }

    #[test]
    fn test_invalid_lunar_date() {
        let engine = KoreanLunarCalendar::new();
        let err = resolve(&engine, &lunar(1991, 3, 1, true)).unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidLunarDate { year: 1991, month: 3, day: 1, leap: true }
        );
        assert_eq!(err.kind(), "invalid_lunar_date");
        assert_eq!(err.user_message(), DATE_ERROR_MESSAGE);
    }

    #[test]
    fn test_unrecognized_labels_are_conversion_errors() {
        let engine = fixed("경오", "??", "경진");
        let err = resolve(&engine, &solar(1990, 5, 15, 0)).unwrap_err();
        assert!(matches!(err, DateError::ConversionError(ref msg) if msg.contains("month")));
        assert_eq!(err.user_message(), DATE_ERROR_MESSAGE);
    }

    #[test]
    fn test_engine_failure_is_conversion_error() {
        let engine = KoreanLunarCalendar::new();
        let err = resolve(&engine, &solar(2050, 1, 1, 0)).unwrap_err();
        assert_eq!(err.kind(), "conversion_error");
    }

    #[test]
    fn test_hour_pillar_follows_day_label() {
        // 갑 day: the 子 slot starts at 甲, so slot 11 is 乙亥.
        let engine = fixed("갑자", "병인", "갑오");
        let result = resolve(&engine, &solar(1984, 2, 2, 11)).unwrap();
        assert_eq!(result.pillars.hour.to_string(), "乙亥");
        assert_eq!(result.zodiac, Zodiac::Rat);

        // 계 day: the 子 slot starts at 壬.
        let engine = fixed("을축", "무인", "계유");
        let result = resolve(&engine, &solar(1985, 3, 1, 0)).unwrap();
        assert_eq!(result.pillars.hour.to_string(), "壬子");
        assert_eq!(result.zodiac, Zodiac::Ox);
    }

    #[test]
    fn test_zodiac_follows_year_branch() {
        for branch in BRANCHES {
            let label: String = [STEMS[0].hangul(), branch.hangul()].iter().collect();
            let engine = fixed(&label, "병인", "갑자");
            let result = resolve(&engine, &solar(2000, 1, 1, 0)).unwrap();
            assert_eq!(result.zodiac, branch.zodiac());
        }
        assert_eq!(Branch::from_hanja('午').map(|b| b.zodiac()), Some(Zodiac::Horse));
    }

    #[test]
    fn test_every_pillar_is_two_symbols_across_range() {
        let engine = KoreanLunarCalendar::new();
        let mut day = NaiveDate::from_ymd_opt(MIN_BIRTH_YEAR, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(MAX_BIRTH_YEAR, 12, 31).unwrap();
        let mut slot = 0;
        while day <= end {
            let input = BirthInput {
                year: chrono::Datelike::year(&day),
                month: chrono::Datelike::month(&day),
                day: chrono::Datelike::day(&day),
                is_lunar: false,
                is_leap_month: false,
                hour_slot: HourSlot::new(slot).unwrap(),
            };
            let result = resolve(&engine, &input).unwrap();
            let pillars = result.pillars.to_array();
            assert_eq!(pillars.len(), 4);
            for p in pillars {
                let code = p.to_string();
                let mut chars = code.chars();
                assert!(chars.next().and_then(crate::domain::ganzhi::Stem::from_hanja).is_some());
                assert!(chars.next().and_then(Branch::from_hanja).is_some());
                assert!(chars.next().is_none());
            }
            slot = (slot + 1) % 12;
            day += chrono::Duration::days(13);
        }
    }

    #[test]
    fn test_titles_pair_with_pillars() {
        let engine = KoreanLunarCalendar::new();
        let result = resolve(&engine, &solar(1990, 5, 15, 6)).unwrap();
        let titled: Vec<(&str, String)> = result
            .pillars
            .titled()
            .map(|(t, p)| (t, p.to_string()))
            .collect();
        assert_eq!(titled[0], ("년주(조상)", "庚午".to_string()));
        assert_eq!(titled[3], ("시주(자식)", "壬午".to_string()));
    }
}
