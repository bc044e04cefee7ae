//! 报表时间窗口 — 按营业时区对齐的日历窗口
//!
//! 所有日期→时间戳转换统一在这里完成，repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// 仪表盘时间窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

impl Timeframe {
    /// 解析查询参数值 ("today" | "this week" | "this month" | "this year")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(Self::Today),
            "this week" => Some(Self::ThisWeek),
            "this month" => Some(Self::ThisMonth),
            "this year" => Some(Self::ThisYear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this week",
            Self::ThisMonth => "this month",
            Self::ThisYear => "this year",
        }
    }

    /// 计算窗口边界 (含边界的 Unix millis)
    ///
    /// - today: 当日 00:00:00.000 .. 23:59:59.999
    /// - this week: 周一 00:00 .. 周日 23:59:59.999
    /// - this month: 当月 1 号 .. 月末
    /// - this year: 1 月 1 日 .. 12 月 31 日
    pub fn range(&self, now: DateTime<Utc>, tz: Tz) -> (i64, i64) {
        let today = now.with_timezone(&tz).date_naive();

        let (start_date, end_date) = match self {
            Self::Today => (today, today),
            Self::ThisWeek => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(6))
            }
            Self::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                (first, last_day_of_month(today))
            }
            Self::ThisYear => {
                let year = today.year();
                (
                    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today),
                    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today),
                )
            }
        };

        (day_start_millis(start_date, tz), day_end_millis(end_date, tz))
    }
}

/// 日期 + 时分秒毫秒 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
fn date_hms_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, milli: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_milli_opt(hour, min, sec, milli).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00.000) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_millis(date, 0, 0, 0, 0, tz)
}

/// 日期结束 (23:59:59.999) → Unix millis (业务时区)
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_millis(date, 23, 59, 59, 999, tz)
}

/// 当月最后一天
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    const UTC_TZ: Tz = chrono_tz::UTC;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn millis(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_milli_opt(h, min, s, ms)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn parses_known_timeframes() {
        assert_eq!(Timeframe::parse("today"), Some(Timeframe::Today));
        assert_eq!(Timeframe::parse("this week"), Some(Timeframe::ThisWeek));
        assert_eq!(Timeframe::parse("this month"), Some(Timeframe::ThisMonth));
        assert_eq!(Timeframe::parse("this year"), Some(Timeframe::ThisYear));
        assert_eq!(Timeframe::parse("yesterday"), None);
    }

    #[test]
    fn today_covers_the_whole_calendar_day() {
        let (start, end) = Timeframe::Today.range(at(2025, 3, 15, 12), UTC_TZ);
        assert_eq!(start, millis(2025, 3, 15, 0, 0, 0, 0));
        assert_eq!(end, millis(2025, 3, 15, 23, 59, 59, 999));
    }

    #[test]
    fn week_runs_monday_through_sunday() {
        // 2025-03-15 is a Saturday → week is Mon 03-10 .. Sun 03-16
        let (start, end) = Timeframe::ThisWeek.range(at(2025, 3, 15, 12), UTC_TZ);
        assert_eq!(start, millis(2025, 3, 10, 0, 0, 0, 0));
        assert_eq!(end, millis(2025, 3, 16, 23, 59, 59, 999));

        // A Monday maps onto its own week start
        let (start, _) = Timeframe::ThisWeek.range(at(2025, 3, 10, 0), UTC_TZ);
        assert_eq!(start, millis(2025, 3, 10, 0, 0, 0, 0));
    }

    #[test]
    fn month_covers_first_through_last_day() {
        let (start, end) = Timeframe::ThisMonth.range(at(2025, 2, 14, 9), UTC_TZ);
        assert_eq!(start, millis(2025, 2, 1, 0, 0, 0, 0));
        assert_eq!(end, millis(2025, 2, 28, 23, 59, 59, 999));

        // Leap year February
        let (_, end) = Timeframe::ThisMonth.range(at(2024, 2, 14, 9), UTC_TZ);
        assert_eq!(end, millis(2024, 2, 29, 23, 59, 59, 999));
    }

    #[test]
    fn year_covers_jan_first_through_dec_last() {
        let (start, end) = Timeframe::ThisYear.range(at(2025, 7, 4, 18), UTC_TZ);
        assert_eq!(start, millis(2025, 1, 1, 0, 0, 0, 0));
        assert_eq!(end, millis(2025, 12, 31, 23, 59, 59, 999));
    }

    #[test]
    fn ranges_follow_the_business_timezone() {
        // Manila is UTC+8: 2025-03-15 02:00 UTC is already 03-15 in Manila,
        // and Manila midnight is 03-14 16:00 UTC.
        let manila: Tz = chrono_tz::Asia::Manila;
        let (start, _) = Timeframe::Today.range(at(2025, 3, 15, 2), manila);
        assert_eq!(start, millis(2025, 3, 14, 16, 0, 0, 0));
    }
}
