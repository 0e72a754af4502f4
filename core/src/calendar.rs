// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Gregorian helpers the generators and filters share: day numbering,
//! weekday offsets, and the week-of-year arithmetic behind BYWEEKNO.

use jiff::civil::{Date, Weekday, date};

/// Days since 1970-01-01 for a civil date. Works for any representable
/// year-month-day triple, including days that only exist arithmetically.
pub(crate) fn day_number_ymd(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * ((month + 9) % 12) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Days since 1970-01-01 for a civil date.
pub(crate) fn day_number(d: Date) -> i64 {
    day_number_ymd(d.year() as i64, d.month() as i64, d.day() as i64)
}

pub(crate) fn days_in_month(year: i16, month: i8) -> i8 {
    date(year, month, 1).days_in_month()
}

pub(crate) fn days_in_year(year: i16) -> i16 {
    date(year, 1, 1).days_in_year()
}

/// The date with the given ordinal day of the year, if it exists.
pub(crate) fn date_of_doy(year: i16, doy: i16) -> Option<Date> {
    date(year, 1, 1).with().day_of_year(doy).build().ok()
}

/// Days from `from` forward to the next `to` weekday (0 when equal).
pub(crate) fn weekday_offset(to: Weekday, from: Weekday) -> i32 {
    (to.to_monday_zero_offset() as i32 - from.to_monday_zero_offset() as i32).rem_euclid(7)
}

/// Day number of the start of the week containing `d`, with weeks anchored
/// at `wkst`.
pub(crate) fn week_start_day_number(d: Date, wkst: Weekday) -> i64 {
    day_number(d) - weekday_offset(d.weekday(), wkst) as i64
}

/// Day of year (possibly zero or negative) on which week 1 begins: the
/// earliest week starting on `wkst` that holds at least four days of the
/// year. This is the ISO 8601 rule, shifted to an arbitrary week start.
pub(crate) fn week_one_start(year: i16, wkst: Weekday) -> i32 {
    let jan1 = date(year, 1, 1).weekday();
    let lead = weekday_offset(jan1, wkst);
    if lead <= 3 { 1 - lead } else { 8 - lead }
}

/// Number of `wkst`-anchored weeks that belong to `year`.
pub(crate) fn weeks_in_year(year: i16, wkst: Weekday) -> i32 {
    let start = week_one_start(year, wkst);
    (days_in_year(year) as i32 - 3 - start).div_euclid(7) + 1
}

/// Day of year of the `ordinal`-th `day` weekday of the year; negative
/// ordinals count from the end. `None` when the year has no such instance.
pub(crate) fn nth_weekday_of_year(year: i16, ordinal: i8, day: Weekday) -> Option<i16> {
    let len = days_in_year(year) as i32;
    let ord = ordinal as i32;
    let doy = if ord > 0 {
        let first = 1 + weekday_offset(day, date(year, 1, 1).weekday());
        first + (ord - 1) * 7
    } else {
        let last = len - weekday_offset(date(year, 12, 31).weekday(), day);
        last + (ord + 1) * 7
    };
    (1..=len).contains(&doy).then_some(doy as i16)
}

/// Day of month of the `ordinal`-th `day` weekday of the month; negative
/// ordinals count from the end. `None` when the month has no such instance.
pub(crate) fn nth_weekday_of_month(year: i16, month: i8, ordinal: i8, day: Weekday) -> Option<i8> {
    let len = days_in_month(year, month) as i32;
    let ord = ordinal as i32;
    let dom = if ord > 0 {
        let first = 1 + weekday_offset(day, date(year, month, 1).weekday());
        first + (ord - 1) * 7
    } else {
        let last = len - weekday_offset(date(year, month, len as i8).weekday(), day);
        last + (ord + 1) * 7
    };
    (1..=len).contains(&dom).then_some(dom as i8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_days_from_the_epoch() {
        assert_eq!(day_number(date(1970, 1, 1)), 0);
        assert_eq!(day_number(date(1970, 1, 2)), 1);
        assert_eq!(day_number(date(1969, 12, 31)), -1);
        assert_eq!(day_number(date(2000, 3, 1)), 11_017);
    }

    #[test]
    fn day_numbers_agree_with_weekdays() {
        // 1970-01-01 was a Thursday
        let d = date(1997, 9, 2);
        let days = day_number(d) - day_number(date(1970, 1, 1));
        let weekday_index = (3 + days).rem_euclid(7); // 0 = Monday
        assert_eq!(weekday_index as i8, d.weekday().to_monday_zero_offset());
    }

    #[test]
    fn anchors_week_one_per_iso_rule() {
        // 1997-01-01 was a Wednesday: week 1 starts Dec 30 of 1996
        assert_eq!(week_one_start(1997, Weekday::Monday), -1);
        // 1998-01-01 was a Thursday: week 1 starts Dec 29 of 1997
        assert_eq!(week_one_start(1998, Weekday::Monday), -2);
        // 1999-01-01 was a Friday: week 1 starts Jan 4
        assert_eq!(week_one_start(1999, Weekday::Monday), 4);
    }

    #[test]
    fn counts_weeks_in_year() {
        assert_eq!(weeks_in_year(1997, Weekday::Monday), 52);
        assert_eq!(weeks_in_year(1998, Weekday::Monday), 53);
        assert_eq!(weeks_in_year(2015, Weekday::Monday), 53);
        assert_eq!(weeks_in_year(2016, Weekday::Monday), 52);
    }

    #[test]
    fn finds_nth_weekday_of_month() {
        // September 1997: Fridays on 5, 12, 19, 26
        assert_eq!(
            nth_weekday_of_month(1997, 9, 1, Weekday::Friday),
            Some(5)
        );
        assert_eq!(
            nth_weekday_of_month(1997, 9, -1, Weekday::Friday),
            Some(26)
        );
        assert_eq!(nth_weekday_of_month(1997, 9, 5, Weekday::Friday), None);
    }

    #[test]
    fn finds_nth_weekday_of_year() {
        // the 20th Monday of 1997 is May 19
        let doy = nth_weekday_of_year(1997, 20, Weekday::Monday).unwrap();
        assert_eq!(date_of_doy(1997, doy).unwrap(), date(1997, 5, 19));
        // the last Monday of 1997 is Dec 29
        let doy = nth_weekday_of_year(1997, -1, Weekday::Monday).unwrap();
        assert_eq!(date_of_doy(1997, doy).unwrap(), date(1997, 12, 29));
    }
}
