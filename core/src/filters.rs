// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Stateless predicates over fully specified dates. A rule part acts as a
//! filter when another part is already driving day generation; multiple
//! filters compose by logical AND.

use cadence_ical::WeekDayNum;
use jiff::civil::{Date, Weekday};

use crate::calendar;

pub(crate) type Filter = Box<dyn Fn(Date) -> bool>;

/// Matches dates named by a BYDAY list. Ordinals are resolved against the
/// month, or against the whole year when `weeks_in_year` is set, using the
/// same index arithmetic as the generator: among equal weekdays the n-th
/// from the start sits at day index `(n - 1) * 7`.
pub(crate) fn by_day_filter(by_day: Vec<WeekDayNum>, weeks_in_year: bool) -> Filter {
    Box::new(move |date| {
        let weekday = date.weekday();
        let (length, index) = if weeks_in_year {
            (
                calendar::days_in_year(date.year()) as i32,
                date.day_of_year() as i32 - 1,
            )
        } else {
            (
                calendar::days_in_month(date.year(), date.month()) as i32,
                date.day() as i32 - 1,
            )
        };
        let nth = index / 7 + 1;
        let nth_from_end = -((length - index - 1) / 7 + 1);
        by_day.iter().any(|num| {
            num.day.civil() == weekday
                && (num.ordinal == 0
                    || num.ordinal as i32 == nth
                    || num.ordinal as i32 == nth_from_end)
        })
    })
}

/// Matches dates whose day of month is named by a BYMONTHDAY list, with
/// negative entries resolved against that month's length.
pub(crate) fn by_month_day_filter(by_month_day: Vec<i8>) -> Filter {
    Box::new(move |date| {
        let month_len = calendar::days_in_month(date.year(), date.month());
        let day = date.day();
        by_month_day
            .iter()
            .any(|&d| day == if d < 0 { d + month_len + 1 } else { d })
    })
}

/// Matches dates whose `wkst`-anchored week lies a whole multiple of
/// `interval` weeks from the week containing the series start. Floor
/// division keeps the phase stable for dates before the start.
pub(crate) fn week_interval_filter(interval: i64, wkst: Weekday, dtstart: Date) -> Filter {
    let anchor = calendar::week_start_day_number(dtstart, wkst);
    Box::new(move |date| {
        let weeks = (calendar::week_start_day_number(date, wkst) - anchor).div_euclid(7);
        weeks.rem_euclid(interval) == 0
    })
}
