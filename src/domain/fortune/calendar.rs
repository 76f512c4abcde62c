//! 음력 → 양력 변환
//!
//! 모든 프롬프트 문구는 양력 날짜를 기준으로 작성되므로, 음력으로 입력된 생년월일은
//! 프롬프트를 만들기 전에 양력으로 정규화합니다.
//!
//! 변환은 연도별 음력 정보를 압축한 표를 사용합니다. 한 해의 값은 다음과 같이 구성됩니다.
//!
//! - bit 4..=15: 1월~12월의 크기 (1이면 30일, 0이면 29일, 1월이 최상위 비트)
//! - bit 0..=3: 윤달 (0이면 윤달 없음)
//! - bit 16: 윤달의 크기 (1이면 30일)
//!
//! 지원 범위는 음력 1900년 ~ 2100년이며, 음력 1900-01-01은 양력 1900-01-31입니다.

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

/// 지원하는 첫 음력 연도
pub const MIN_LUNAR_YEAR: i32 = 1900;
/// 지원하는 마지막 음력 연도
pub const MAX_LUNAR_YEAR: i32 = 2100;

#[rustfmt::skip]
const LUNAR_YEAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                  // 2100
];

/// 음력 변환 실패 원인
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("날짜 형식이 올바르지 않습니다: {0}")]
    Malformed(String),
    #[error("지원 범위(음력 {MIN_LUNAR_YEAR}~{MAX_LUNAR_YEAR}년)를 벗어난 날짜입니다")]
    OutOfRange,
    #[error("존재하지 않는 음력 월입니다: {0}")]
    InvalidMonth(u32),
    #[error("해당 음력 월에 없는 날짜입니다: {0}")]
    InvalidDay(u32),
}

/// 음력 날짜
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month: false,
        }
    }
}

/// 입력 날짜를 양력 `YYYY-MM-DD`로 정규화합니다.
///
/// 양력 입력은 그대로 돌려줍니다. 음력 변환에 실패하면 경고를 남기고 원본 문자열을
/// 그대로 돌려주며, 호출자에게 오류를 전파하지 않습니다.
pub fn normalize(date: &str, is_lunar: bool) -> String {
    if !is_lunar {
        return date.to_string();
    }

    match parse_ymd(date).and_then(|(y, m, d)| lunar_to_solar(&LunarDate::new(y, m, d))) {
        Ok(solar) => {
            let solar = solar.format("%Y-%m-%d").to_string();
            info!(lunar = %date, solar = %solar, "음력 변환 완료");
            solar
        }
        Err(e) => {
            warn!(date = %date, error = %e, "음력 변환 실패, 원본 날짜 사용");
            date.to_string()
        }
    }
}

/// 음력 날짜를 양력 날짜로 변환합니다.
pub fn lunar_to_solar(lunar: &LunarDate) -> Result<NaiveDate, CalendarError> {
    if !(MIN_LUNAR_YEAR..=MAX_LUNAR_YEAR).contains(&lunar.year) {
        return Err(CalendarError::OutOfRange);
    }
    if !(1..=12).contains(&lunar.month) {
        return Err(CalendarError::InvalidMonth(lunar.month));
    }
    if lunar.is_leap_month && leap_month(lunar.year) != Some(lunar.month) {
        return Err(CalendarError::InvalidMonth(lunar.month));
    }

    let month_length = if lunar.is_leap_month {
        leap_month_days(lunar.year)
    } else {
        month_days(lunar.year, lunar.month)
    };
    if lunar.day == 0 || lunar.day > month_length {
        return Err(CalendarError::InvalidDay(lunar.day));
    }

    let mut offset: i64 = (MIN_LUNAR_YEAR..lunar.year).map(|y| i64::from(year_days(y))).sum();
    for month in 1..lunar.month {
        offset += i64::from(month_days(lunar.year, month));
        if leap_month(lunar.year) == Some(month) {
            offset += i64::from(leap_month_days(lunar.year));
        }
    }
    if lunar.is_leap_month {
        offset += i64::from(month_days(lunar.year, lunar.month));
    }
    offset += i64::from(lunar.day - 1);

    Ok(epoch() + Duration::days(offset))
}

/// 양력 날짜를 음력 날짜로 변환합니다.
pub fn solar_to_lunar(solar: NaiveDate) -> Result<LunarDate, CalendarError> {
    let mut remaining = (solar - epoch()).num_days();
    if remaining < 0 {
        return Err(CalendarError::OutOfRange);
    }

    let mut year = MIN_LUNAR_YEAR;
    loop {
        if year > MAX_LUNAR_YEAR {
            return Err(CalendarError::OutOfRange);
        }
        let days = i64::from(year_days(year));
        if remaining < days {
            break;
        }
        remaining -= days;
        year += 1;
    }

    let leap = leap_month(year);
    for month in 1..=12 {
        let days = i64::from(month_days(year, month));
        if remaining < days {
            return Ok(LunarDate::new(year, month, remaining as u32 + 1));
        }
        remaining -= days;

        if leap == Some(month) {
            let days = i64::from(leap_month_days(year));
            if remaining < days {
                return Ok(LunarDate {
                    year,
                    month,
                    day: remaining as u32 + 1,
                    is_leap_month: true,
                });
            }
            remaining -= days;
        }
    }

    Err(CalendarError::OutOfRange)
}

fn parse_ymd(date: &str) -> Result<(i32, u32, u32), CalendarError> {
    let malformed = || CalendarError::Malformed(date.to_string());

    let parts: Vec<&str> = date.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(malformed());
    };

    Ok((
        year.trim().parse().map_err(|_| malformed())?,
        month.trim().parse().map_err(|_| malformed())?,
        day.trim().parse().map_err(|_| malformed())?,
    ))
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(MIN_LUNAR_YEAR, 1, 31).unwrap_or_default()
}

fn year_info(year: i32) -> u32 {
    LUNAR_YEAR_INFO[(year - MIN_LUNAR_YEAR) as usize]
}

fn leap_month(year: i32) -> Option<u32> {
    match year_info(year) & 0xf {
        0 => None,
        month => Some(month),
    }
}

fn leap_month_days(year: i32) -> u32 {
    match leap_month(year) {
        Some(_) if year_info(year) & 0x10000 != 0 => 30,
        Some(_) => 29,
        None => 0,
    }
}

fn month_days(year: i32, month: u32) -> u32 {
    if year_info(year) & (0x10000 >> month) != 0 {
        30
    } else {
        29
    }
}

fn year_days(year: i32) -> u32 {
    (1..=12).map(|m| month_days(year, m)).sum::<u32>() + leap_month_days(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_pass_solar_dates_through_unchanged() {
        for input in ["1990-01-01", "2000-13-45", "garbage", ""] {
            assert_eq!(normalize(input, false), input);
        }
    }

    #[test]
    fn should_convert_lunar_new_years_day() {
        // 설날
        assert_eq!(normalize("1990-01-01", true), "1990-01-27");
        assert_eq!(normalize("2000-01-01", true), "2000-02-05");
        assert_eq!(normalize("2024-01-01", true), "2024-02-10");
        assert_eq!(normalize("2025-01-01", true), "2025-01-29");
    }

    #[test]
    fn should_convert_lunar_date_from_scenario() {
        assert_eq!(normalize("2000-03-01", true), "2000-04-05");
    }

    #[test]
    fn should_convert_epoch_boundaries() {
        assert_eq!(lunar_to_solar(&LunarDate::new(1900, 1, 1)), Ok(ymd(1900, 1, 31)));
        assert_eq!(lunar_to_solar(&LunarDate::new(2100, 1, 1)), Ok(ymd(2100, 2, 9)));
    }

    #[test]
    fn should_count_leap_month_after_its_regular_month() {
        // 2023년은 윤2월이 있는 해
        assert_eq!(leap_month(2023), Some(2));
        let regular = lunar_to_solar(&LunarDate::new(2023, 2, 1)).unwrap();
        let leap = lunar_to_solar(&LunarDate {
            year: 2023,
            month: 2,
            day: 1,
            is_leap_month: true,
        })
        .unwrap();
        let third = lunar_to_solar(&LunarDate::new(2023, 3, 1)).unwrap();

        assert!(regular < leap && leap < third);
        assert_eq!(
            (leap - regular).num_days(),
            i64::from(month_days(2023, 2))
        );
    }

    #[test]
    fn should_return_original_for_malformed_input() {
        for input in ["", "1990", "1990-01", "1990-01-01-01", "abcd-01-01", "1990-xx-01", "1990/01/01"] {
            assert_eq!(normalize(input, true), input);
        }
    }

    #[test]
    fn should_return_original_for_out_of_range_years() {
        assert_eq!(normalize("1899-12-01", true), "1899-12-01");
        assert_eq!(normalize("2101-01-01", true), "2101-01-01");
        assert_eq!(
            lunar_to_solar(&LunarDate::new(2101, 1, 1)),
            Err(CalendarError::OutOfRange)
        );
    }

    #[test]
    fn should_return_original_for_invalid_month_or_day() {
        assert_eq!(normalize("2000-13-01", true), "2000-13-01");
        assert_eq!(normalize("2000-00-10", true), "2000-00-10");
        assert_eq!(normalize("2000-01-00", true), "2000-01-00");
        assert_eq!(normalize("2000-01-31", true), "2000-01-31");
    }

    #[test]
    fn should_reject_day_thirty_in_short_month() {
        // 1900년 1월은 29일
        assert_eq!(month_days(1900, 1), 29);
        assert_eq!(
            lunar_to_solar(&LunarDate::new(1900, 1, 30)),
            Err(CalendarError::InvalidDay(30))
        );
    }

    #[test]
    fn should_reject_leap_flag_for_month_without_leap() {
        let result = lunar_to_solar(&LunarDate {
            year: 2024,
            month: 5,
            day: 1,
            is_leap_month: true,
        });
        assert_eq!(result, Err(CalendarError::InvalidMonth(5)));
    }

    #[test]
    fn should_round_trip_every_lunar_day_in_range() {
        for year in MIN_LUNAR_YEAR..=MAX_LUNAR_YEAR {
            for month in 1..=12 {
                for day in 1..=month_days(year, month) {
                    let lunar = LunarDate::new(year, month, day);
                    let solar = lunar_to_solar(&lunar).unwrap();
                    assert_eq!(solar_to_lunar(solar), Ok(lunar), "{year}-{month}-{day}");
                }
            }
            if let Some(month) = leap_month(year) {
                for day in 1..=leap_month_days(year) {
                    let lunar = LunarDate {
                        year,
                        month,
                        day,
                        is_leap_month: true,
                    };
                    let solar = lunar_to_solar(&lunar).unwrap();
                    assert_eq!(solar_to_lunar(solar), Ok(lunar));
                }
            }
        }
    }

    #[test]
    fn should_bound_solar_range() {
        assert!(solar_to_lunar(ymd(1900, 1, 30)).is_err());
        assert!(solar_to_lunar(ymd(1900, 1, 31)).is_ok());
        assert!(solar_to_lunar(ymd(2101, 1, 28)).is_ok());
        assert!(solar_to_lunar(ymd(2101, 1, 29)).is_err());
    }
}
