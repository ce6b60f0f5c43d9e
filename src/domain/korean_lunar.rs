//! Table-driven lunisolar calendar covering lunar years 1900 through 2039.
//!
//! Each table word packs one lunar year:
//! - bits 15..4: month lengths for months 1..12 (set = 30 days, clear = 29)
//! - bits 3..0: leap month number, 0 when the year has none
//! - bit 16: leap month length (set = 30 days)
//!
//! Lunar 1900-01-01 falls on solar 1900-01-31.
//!
//! Months start on the day of the new moon as reckoned in Korea standard
//! time (UTC+9, UTC+8:30 between 1954 and 1961), so month lengths, several
//! new years and the leap months of 2012 and 2017 differ from tables kept
//! on Beijing time.

use chrono::{Datelike, NaiveDate};

use crate::domain::calendar::{CalendarEngine, CalendarError, GanzhiLabels, LunarDate};
use crate::domain::ganzhi::{Branch, Pillar, Stem};

pub const FIRST_LUNAR_YEAR: i32 = 1900;
pub const LAST_LUNAR_YEAR: i32 = 2039;

/// `num_days_from_ce` of solar 1900-01-31.
const BASE_DAYS_FROM_CE: i32 = 693_626;

/// Offset between chrono's day count and the Julian Day Number.
const JDN_OFFSET: i64 = 1_721_425;

#[rustfmt::skip]
const LUNAR_INFO: [u32; 140] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054e5, 0x0d2a0, 0x0e950, 0x16554, 0x056a0, 0x0aad0, 0x055d2, // 1900
    0x04ae0, 0x0a5d6, 0x0a4d0, 0x0d250, 0x0da95, 0x0b550, 0x056a0, 0x0ada2, 0x095d0, 0x04bb7, // 1910
    0x049b0, 0x0a4b0, 0x0b4b5, 0x06a90, 0x0ad40, 0x0bb54, 0x02b60, 0x095b0, 0x05372, 0x04970, // 1920
    0x06566, 0x0e4a0, 0x0ea50, 0x16a95, 0x05b50, 0x02b60, 0x18ae3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b690, 0x056d0, 0x125b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0d557, // 1940
    0x0b4a0, 0x0b550, 0x15555, 0x04db0, 0x025b0, 0x18573, 0x052b0, 0x0a9b8, 0x06950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05270, 0x07263, 0x0d950, 0x06b57, 0x056a0, // 1960
    0x09ad0, 0x04dd5, 0x04ae0, 0x0a4e0, 0x0d4d4, 0x0d250, 0x0d598, 0x0b540, 0x0d6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a9b4, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0b756, 0x02b60, 0x095b0, // 1980
    0x04b75, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06d98, 0x05ad0, 0x02b60, 0x096e5, 0x092e0, // 1990
    0x0c960, 0x0e954, 0x0d4a0, 0x0da50, 0x07552, 0x056c0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x1b4a3, 0x0b550, 0x055d9, 0x04ba0, 0x0a5b0, 0x05575, 0x052b0, 0x0a950, // 2010
    0x0b954, 0x06aa0, 0x0ad50, 0x06b52, 0x04b60, 0x0a6e6, 0x0a570, 0x05270, 0x06a65, 0x0d930, // 2020
    0x05aa0, 0x0b6a3, 0x096d0, 0x04afb, 0x04ae0, 0x0a4d0, 0x1d0d6, 0x0d250, 0x0d520, 0x0dd45, // 2030
];

#[derive(Debug, Clone, Copy)]
struct YearInfo(u32);

impl YearInfo {
    fn of(year: i32) -> Option<Self> {
        if !(FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR).contains(&year) {
            return None;
        }
        Some(Self(LUNAR_INFO[(year - FIRST_LUNAR_YEAR) as usize]))
    }

    fn leap_month(self) -> Option<u32> {
        match self.0 & 0xf {
            0 => None,
            m => Some(m),
        }
    }

    fn leap_days(self) -> u32 {
        match self.leap_month() {
            None => 0,
            Some(_) if self.0 & 0x10000 != 0 => 30,
            Some(_) => 29,
        }
    }

    fn month_days(self, month: u32) -> u32 {
        if self.0 & (0x10000 >> month) != 0 {
            30
        } else {
            29
        }
    }

    fn year_days(self) -> u32 {
        (1..=12).map(|m| self.month_days(m)).sum::<u32>() + self.leap_days()
    }

    /// Months of the year in order, each regular month followed by its leap
    /// month when there is one.
    fn months(self) -> impl Iterator<Item = (u32, bool, u32)> {
        let leap = self.leap_month();
        (1..=12).flat_map(move |m| {
            let regular = Some((m, false, self.month_days(m)));
            let intercalary = (leap == Some(m)).then(|| (m, true, self.leap_days()));
            regular.into_iter().chain(intercalary)
        })
    }
}

/// Korean lunisolar calendar backed by [`LUNAR_INFO`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KoreanLunarCalendar;

impl KoreanLunarCalendar {
    pub fn new() -> Self {
        Self
    }

    pub fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate, CalendarError> {
        let mut offset = i64::from(date.num_days_from_ce() - BASE_DAYS_FROM_CE);
        if offset < 0 {
            return Err(CalendarError::SolarOutOfRange(date));
        }

        for year in FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR {
            let Some(info) = YearInfo::of(year) else { break };
            let days = i64::from(info.year_days());
            if offset >= days {
                offset -= days;
                continue;
            }
            for (month, is_leap, len) in info.months() {
                let len = i64::from(len);
                if offset < len {
                    return Ok(LunarDate::new(year, month, offset as u32 + 1, is_leap));
                }
                offset -= len;
            }
        }

        Err(CalendarError::SolarOutOfRange(date))
    }

    fn days_before_year(year: i32) -> i64 {
        (FIRST_LUNAR_YEAR..year)
            .filter_map(YearInfo::of)
            .map(|info| i64::from(info.year_days()))
            .sum()
    }
}

impl CalendarEngine for KoreanLunarCalendar {
    fn lunar_to_solar(&self, date: LunarDate) -> Result<NaiveDate, CalendarError> {
        let missing = CalendarError::NoSuchLunarDate(date);
        let info = YearInfo::of(date.year).ok_or(missing.clone())?;

        if !(1..=12).contains(&date.month) {
            return Err(missing);
        }
        if date.is_leap && info.leap_month() != Some(date.month) {
            return Err(missing);
        }
        let len = if date.is_leap {
            info.leap_days()
        } else {
            info.month_days(date.month)
        };
        if !(1..=len).contains(&date.day) {
            return Err(missing);
        }

        let before_month: i64 = info
            .months()
            .take_while(|&(m, leap, _)| (m, leap) != (date.month, date.is_leap))
            .map(|(_, _, len)| i64::from(len))
            .sum();

        let offset = Self::days_before_year(date.year) + before_month + i64::from(date.day) - 1;
        i32::try_from(offset)
            .ok()
            .and_then(|offset| NaiveDate::from_num_days_from_ce_opt(BASE_DAYS_FROM_CE + offset))
            .ok_or(missing)
    }

    /// Year and month pillars follow the lunar year and month (a leap month
    /// shares the pillar of the month it repeats); the day pillar follows the
    /// continuous 60-day count.
    fn solar_to_ganzhi(&self, date: NaiveDate) -> Result<GanzhiLabels, CalendarError> {
        let lunar = self.solar_to_lunar(date)?;

        let year = Pillar::from_cycle_index(i64::from(lunar.year) - 4);
        // Month 1 is always a 寅 month; its stem is fixed by the year stem.
        let month_stem = (year.stem.index() % 5) * 2 + 2 + (lunar.month as usize - 1);
        let month = Pillar::new(
            Stem::from_index(month_stem),
            Branch::from_index(lunar.month as usize + 1),
        );
        let day = Pillar::from_cycle_index(julian_day_number(date) + 49);

        Ok(GanzhiLabels {
            year: year.hangul(),
            month: month.hangul(),
            day: day.hangul(),
        })
    }
}

pub fn julian_day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JDN_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lunar_new_year_dates() {
        let cal = KoreanLunarCalendar::new();
        let cases = [
            (1930, ymd(1930, 1, 30)),
            (1950, ymd(1950, 2, 17)),
            (1970, ymd(1970, 2, 6)),
            (1990, ymd(1990, 1, 27)),
            (2000, ymd(2000, 2, 5)),
            (2020, ymd(2020, 1, 25)),
            (2024, ymd(2024, 2, 10)),
            (2026, ymd(2026, 2, 17)),
            (2027, ymd(2027, 2, 7)),
            (1988, ymd(1988, 2, 18)),
            (1997, ymd(1997, 2, 8)),
        ];
        for (year, solar) in cases {
            let lunar = LunarDate::new(year, 1, 1, false);
            assert_eq!(cal.lunar_to_solar(lunar).unwrap(), solar, "lunar new year {}", year);
            assert_eq!(cal.solar_to_lunar(solar).unwrap(), lunar);
        }
    }

    #[test]
    fn test_solar_to_lunar_known_days() {
        let cal = KoreanLunarCalendar::new();
        assert_eq!(cal.solar_to_lunar(ymd(2000, 1, 1)).unwrap(), LunarDate::new(1999, 11, 25, false));
        assert_eq!(cal.solar_to_lunar(ymd(1990, 5, 15)).unwrap(), LunarDate::new(1990, 4, 21, false));
        assert_eq!(cal.solar_to_lunar(ymd(2020, 6, 1)).unwrap(), LunarDate::new(2020, 4, 10, true));
        assert_eq!(cal.solar_to_lunar(ymd(1900, 1, 31)).unwrap(), LunarDate::new(1900, 1, 1, false));
        assert_eq!(cal.solar_to_lunar(ymd(2040, 2, 11)).unwrap().year, 2039);
    }

    #[test]
    fn test_leap_month_conversion() {
        let cal = KoreanLunarCalendar::new();
        assert_eq!(cal.lunar_to_solar(LunarDate::new(2020, 4, 1, true)).unwrap(), ymd(2020, 5, 23));
        assert_eq!(cal.lunar_to_solar(LunarDate::new(1990, 5, 1, true)).unwrap(), ymd(1990, 6, 23));
        assert_eq!(cal.lunar_to_solar(LunarDate::new(1990, 5, 15, false)).unwrap(), ymd(1990, 6, 7));
        assert_eq!(cal.lunar_to_solar(LunarDate::new(2026, 12, 29, false)).unwrap(), ymd(2027, 2, 5));
    }

    #[test]
    fn test_leap_months_follow_korea_standard_time() {
        let cal = KoreanLunarCalendar::new();
        assert_eq!(cal.lunar_to_solar(LunarDate::new(2017, 5, 1, true)).unwrap(), ymd(2017, 6, 24));
        assert_eq!(cal.lunar_to_solar(LunarDate::new(2017, 5, 29, true)).unwrap(), ymd(2017, 7, 22));
        assert_eq!(cal.lunar_to_solar(LunarDate::new(2012, 3, 1, true)).unwrap(), ymd(2012, 4, 21));
        assert_eq!(cal.solar_to_lunar(ymd(2017, 7, 23)).unwrap(), LunarDate::new(2017, 6, 1, false));
        assert_eq!(cal.solar_to_lunar(ymd(2012, 5, 21)).unwrap(), LunarDate::new(2012, 4, 1, false));

        // Leap months that only exist on Beijing time
        for date in [LunarDate::new(2017, 6, 1, true), LunarDate::new(2012, 4, 1, true)] {
            assert_eq!(cal.lunar_to_solar(date), Err(CalendarError::NoSuchLunarDate(date)));
        }
        assert_eq!(
            cal.lunar_to_solar(LunarDate::new(2017, 5, 30, true)),
            Err(CalendarError::NoSuchLunarDate(LunarDate::new(2017, 5, 30, true)))
        );

        // 2017-07-01 sits in leap 5, so it takes the fifth month's pillar.
        let labels = cal.solar_to_ganzhi(ymd(2017, 7, 1)).unwrap();
        assert_eq!((labels.year.as_str(), labels.month.as_str()), ("정유", "병오"));
    }

    #[test]
    fn test_nonexistent_lunar_dates() {
        let cal = KoreanLunarCalendar::new();
        let missing = [
            // 1991 has no leap month at all
            LunarDate::new(1991, 5, 1, true),
            // 1990's leap month is the fifth, not the fourth
            LunarDate::new(1990, 4, 1, true),
            // 1990 leap 5 is a 29-day month
            LunarDate::new(1990, 5, 30, true),
            LunarDate::new(2000, 13, 1, false),
            LunarDate::new(2000, 1, 0, false),
            LunarDate::new(1899, 1, 1, false),
            LunarDate::new(2040, 1, 1, false),
        ];
        for date in missing {
            assert_eq!(
                cal.lunar_to_solar(date),
                Err(CalendarError::NoSuchLunarDate(date)),
                "{}",
                date
            );
        }
    }

    #[test]
    fn test_out_of_range_solar() {
        let cal = KoreanLunarCalendar::new();
        let early = ymd(1900, 1, 30);
        assert_eq!(cal.solar_to_lunar(early), Err(CalendarError::SolarOutOfRange(early)));
        let late = ymd(2040, 2, 12);
        assert_eq!(cal.solar_to_ganzhi(late), Err(CalendarError::SolarOutOfRange(late)));
    }

    #[test]
    fn test_round_trip_every_day_in_form_range() {
        let cal = KoreanLunarCalendar::new();
        let mut day = ymd(1930, 1, 1);
        let end = ymd(2027, 12, 31);
        while day <= end {
            let lunar = cal.solar_to_lunar(day).unwrap();
            assert_eq!(cal.lunar_to_solar(lunar).unwrap(), day, "{} -> {}", day, lunar);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_ganzhi_labels() {
        let cal = KoreanLunarCalendar::new();

        let labels = cal.solar_to_ganzhi(ymd(1990, 5, 15)).unwrap();
        assert_eq!(labels.to_string(), "경오년 신사월 경진일");

        let labels = cal.solar_to_ganzhi(ymd(2000, 1, 1)).unwrap();
        assert_eq!((labels.year.as_str(), labels.month.as_str(), labels.day.as_str()), ("기묘", "병자", "무오"));

        // The year pillar turns over at lunar new year, not on January 1st.
        let eve = cal.solar_to_ganzhi(ymd(2024, 2, 9)).unwrap();
        assert_eq!((eve.year.as_str(), eve.month.as_str(), eve.day.as_str()), ("계묘", "을축", "계묘"));
        let new_year = cal.solar_to_ganzhi(ymd(2024, 2, 10)).unwrap();
        assert_eq!((new_year.year.as_str(), new_year.month.as_str(), new_year.day.as_str()), ("갑진", "병인", "갑진"));
    }

    #[test]
    fn test_leap_month_shares_regular_month_pillar() {
        let cal = KoreanLunarCalendar::new();
        let regular = cal.solar_to_ganzhi(ymd(2020, 5, 1)).unwrap();
        let leap = cal.solar_to_ganzhi(ymd(2020, 5, 23)).unwrap();
        assert_eq!(cal.solar_to_lunar(ymd(2020, 5, 1)).unwrap(), LunarDate::new(2020, 4, 9, false));
        assert_eq!(regular.month, "신사");
        assert_eq!(leap.month, "신사");
        assert_eq!(leap.day, "병인");
    }

    #[test]
    fn test_julian_day_number() {
        assert_eq!(julian_day_number(ymd(2000, 1, 1)), 2_451_545);
    }
}
