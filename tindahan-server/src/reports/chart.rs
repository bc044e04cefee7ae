//! 销售图表分桶
//!
//! 每个时间窗口对应一套固定桶：today → 6 个 4 小时段；this week →
//! 周一..周日；this month → `Week 1..ceil(月天数/7)`；this year →
//! Jan..Dec。每笔订单恰好落入一个桶，空桶报 0，输出顺序跟随固定枚举
//! 而非数据顺序 — 所有桶合计恒等于窗口内的 totalIncome。

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;

use super::timeframe::{Timeframe, last_day_of_month};
use crate::money::{to_decimal, to_f64};

/// 一个图表数据点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub total: f64,
}

const FOUR_HOUR_INTERVALS: [&str; 6] = [
    "0:00-4:00",
    "4:00-8:00",
    "8:00-12:00",
    "12:00-16:00",
    "16:00-20:00",
    "20:00-24:00",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 把窗口内订单 `(order_date_millis, order_total)` 累加进固定桶
///
/// `now` 只用于 this month 的桶数 (当月天数)；订单本身已按窗口过滤。
pub fn chart_data(
    timeframe: Timeframe,
    now: DateTime<Utc>,
    tz: Tz,
    orders: &[(i64, f64)],
) -> Vec<ChartPoint> {
    let names: Vec<String> = match timeframe {
        Timeframe::Today => FOUR_HOUR_INTERVALS.iter().map(|s| s.to_string()).collect(),
        Timeframe::ThisWeek => WEEKDAYS.iter().map(|s| s.to_string()).collect(),
        Timeframe::ThisMonth => {
            let days_in_month = last_day_of_month(now.with_timezone(&tz).date_naive()).day();
            let weeks = days_in_month.div_ceil(7);
            (1..=weeks).map(|w| format!("Week {}", w)).collect()
        }
        Timeframe::ThisYear => MONTHS.iter().map(|s| s.to_string()).collect(),
    };

    let mut totals = vec![Decimal::ZERO; names.len()];

    for (order_date, order_total) in orders {
        let Some(local) =
            DateTime::from_timestamp_millis(*order_date).map(|dt| dt.with_timezone(&tz))
        else {
            continue;
        };

        let idx = match timeframe {
            Timeframe::Today => (local.hour() / 4) as usize,
            Timeframe::ThisWeek => local.weekday().num_days_from_monday() as usize,
            Timeframe::ThisMonth => ((local.day() + 6) / 7) as usize - 1,
            Timeframe::ThisYear => local.month0() as usize,
        };

        if let Some(slot) = totals.get_mut(idx) {
            *slot += to_decimal(*order_total);
        }
    }

    names
        .into_iter()
        .zip(totals)
        .map(|(name, total)| ChartPoint {
            name,
            total: to_f64(total),
        })
        .collect()
}
