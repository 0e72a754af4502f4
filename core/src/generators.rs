// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period generators. Each generator owns one field of the shared
//! [`DateCursor`] and, on every call, advances it to the next value inside
//! the enclosing period, or reports that the period is exhausted.

use std::collections::BTreeSet;

use cadence_ical::WeekDayNum;
use jiff::civil::{Date, Weekday, date};

use crate::calendar;
use crate::cursor::DateCursor;

/// Outcome of one generator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The generator wrote the next value into its cursor field.
    Advanced,
    /// No further value exists within the enclosing period; the caller must
    /// advance the next larger generator first.
    Rollover,
}

pub(crate) trait Generator {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step;
}

/// Years in an arithmetic progression from the series start. Rolls over only
/// at the edge of the representable civil range.
pub(crate) struct SerialYear {
    interval: i64,
    next_year: i64,
}

impl SerialYear {
    pub(crate) fn new(interval: i64, dtstart: Date) -> Self {
        SerialYear {
            interval,
            next_year: dtstart.year() as i64,
        }
    }
}

impl Generator for SerialYear {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        if self.next_year > 9999 {
            return Step::Rollover;
        }
        cursor.year = self.next_year as i16;
        self.next_year += self.interval;
        Step::Advanced
    }
}

/// Months in an arithmetic progression anchored at the series start, with
/// the remainder carried across year boundaries so the stride stays
/// continuous.
pub(crate) struct SerialMonth {
    interval: i64,
    year: i16,
    month: i64,
}

impl SerialMonth {
    pub(crate) fn new(interval: i64, dtstart: Date) -> Self {
        SerialMonth {
            interval,
            year: dtstart.year(),
            month: dtstart.month() as i64 - interval,
        }
    }
}

impl Generator for SerialMonth {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        let next = if cursor.year == self.year {
            self.month + self.interval
        } else {
            // months from the last emitted month up to January of the new year
            let between = (cursor.year as i64 - self.year as i64) * 12 - (self.month - 1);
            (self.interval - between.rem_euclid(self.interval)) % self.interval + 1
        };
        if next > 12 {
            return Step::Rollover;
        }
        self.year = cursor.year;
        self.month = next;
        cursor.month = next as i8;
        Step::Advanced
    }
}

/// The explicit months of a BYMONTH list, each year.
pub(crate) struct ByMonth {
    months: Vec<i8>,
    year: Option<i16>,
    index: usize,
}

impl ByMonth {
    pub(crate) fn new(mut months: Vec<i8>) -> Self {
        months.retain(|m| (1..=12).contains(m));
        months.sort_unstable();
        months.dedup();
        ByMonth {
            months,
            year: None,
            index: 0,
        }
    }
}

impl Generator for ByMonth {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        if self.year != Some(cursor.year) {
            self.year = Some(cursor.year);
            self.index = 0;
        }
        let Some(&month) = self.months.get(self.index) else {
            return Step::Rollover;
        };
        self.index += 1;
        cursor.month = month;
        Step::Advanced
    }
}

/// Days with a fixed stride, continuous across month boundaries.
pub(crate) struct SerialDay {
    interval: i64,
    year: i16,
    month: i8,
    day: i64,
    day_number: i64,
}

impl SerialDay {
    pub(crate) fn new(interval: i64, dtstart: Date) -> Self {
        // anchored one stride back so the first step lands on the start day
        SerialDay {
            interval,
            year: dtstart.year(),
            month: dtstart.month(),
            day: dtstart.day() as i64 - interval,
            day_number: calendar::day_number(dtstart) - interval,
        }
    }
}

impl Generator for SerialDay {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        let month_len = calendar::days_in_month(cursor.year, cursor.month) as i64;
        if cursor.year == self.year && cursor.month == self.month {
            let next = self.day + self.interval;
            if next > month_len {
                return Step::Rollover;
            }
            self.day = next;
            self.day_number += self.interval;
            cursor.day = next as i8;
        } else {
            // keep the stride continuous from the last emitted day
            let first = calendar::day_number_ymd(cursor.year as i64, cursor.month as i64, 1);
            let between = first - self.day_number;
            let next = (self.interval - between.rem_euclid(self.interval)) % self.interval + 1;
            if next > month_len {
                return Step::Rollover;
            }
            self.year = cursor.year;
            self.month = cursor.month;
            self.day = next;
            self.day_number = first + next - 1;
            cursor.day = next as i8;
        }
        Step::Advanced
    }
}

/// The days of a BYMONTHDAY list, expanded against each month's length.
pub(crate) struct ByMonthDay {
    by_month_day: Vec<i8>,
    period: Option<(i16, i8)>,
    days: Vec<i8>,
    index: usize,
}

impl ByMonthDay {
    pub(crate) fn new(by_month_day: Vec<i8>) -> Self {
        ByMonthDay {
            by_month_day,
            period: None,
            days: Vec::new(),
            index: 0,
        }
    }

    fn refresh(&mut self, year: i16, month: i8) {
        let month_len = calendar::days_in_month(year, month);
        let days: BTreeSet<i8> = self
            .by_month_day
            .iter()
            .map(|&d| if d < 0 { d + month_len + 1 } else { d })
            .filter(|d| (1..=month_len).contains(d))
            .collect();
        self.days = days.into_iter().collect();
        self.index = 0;
    }
}

impl Generator for ByMonthDay {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        if self.period != Some((cursor.year, cursor.month)) {
            self.period = Some((cursor.year, cursor.month));
            self.refresh(cursor.year, cursor.month);
        }
        let Some(&day) = self.days.get(self.index) else {
            return Step::Rollover;
        };
        self.index += 1;
        cursor.day = day;
        Step::Advanced
    }
}

/// The days matching a BYDAY list. Ordinal entries are resolved against the
/// month, or against the whole year when `weeks_in_year` is set; plain
/// entries always yield every such weekday of the month.
pub(crate) struct ByDay {
    by_day: Vec<WeekDayNum>,
    weeks_in_year: bool,
    period: Option<(i16, i8)>,
    days: Vec<i8>,
    index: usize,
}

impl ByDay {
    pub(crate) fn new(by_day: Vec<WeekDayNum>, weeks_in_year: bool) -> Self {
        ByDay {
            by_day,
            weeks_in_year,
            period: None,
            days: Vec::new(),
            index: 0,
        }
    }

    fn refresh(&mut self, year: i16, month: i8) {
        let month_len = calendar::days_in_month(year, month) as i32;
        let first_dow = date(year, month, 1).weekday();
        let mut days = BTreeSet::new();
        for num in &self.by_day {
            let weekday = num.day.civil();
            if num.ordinal == 0 {
                let mut day = 1 + calendar::weekday_offset(weekday, first_dow);
                while day <= month_len {
                    days.insert(day as i8);
                    day += 7;
                }
            } else if self.weeks_in_year {
                if let Some(doy) = calendar::nth_weekday_of_year(year, num.ordinal, weekday)
                    && let Some(d) = calendar::date_of_doy(year, doy)
                    && d.month() == month
                {
                    days.insert(d.day());
                }
            } else if let Some(day) =
                calendar::nth_weekday_of_month(year, month, num.ordinal, weekday)
            {
                days.insert(day);
            }
        }
        self.days = days.into_iter().collect();
        self.index = 0;
    }
}

impl Generator for ByDay {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        if self.period != Some((cursor.year, cursor.month)) {
            self.period = Some((cursor.year, cursor.month));
            self.refresh(cursor.year, cursor.month);
        }
        let Some(&day) = self.days.get(self.index) else {
            return Step::Rollover;
        };
        self.index += 1;
        cursor.day = day;
        Step::Advanced
    }
}

/// All seven days of each week named by a BYWEEKNO list, clipped to the
/// enclosing year. Only meaningful under a yearly frequency.
pub(crate) struct ByWeekNo {
    by_week_no: Vec<i8>,
    wkst: Weekday,
    period: Option<(i16, i8)>,
    days: Vec<i8>,
    index: usize,
}

impl ByWeekNo {
    pub(crate) fn new(by_week_no: Vec<i8>, wkst: Weekday) -> Self {
        ByWeekNo {
            by_week_no,
            wkst,
            period: None,
            days: Vec::new(),
            index: 0,
        }
    }

    fn refresh(&mut self, year: i16, month: i8) {
        let start_of_week_one = calendar::week_one_start(year, self.wkst);
        let weeks = calendar::weeks_in_year(year, self.wkst);
        let year_len = calendar::days_in_year(year) as i32;
        let mut days = BTreeSet::new();
        for &number in &self.by_week_no {
            let week = if number < 0 {
                weeks + number as i32 + 1
            } else {
                number as i32
            };
            if !(1..=weeks).contains(&week) {
                continue;
            }
            let week_start = start_of_week_one + (week - 1) * 7;
            for offset in 0..7 {
                let doy = week_start + offset;
                if (1..=year_len).contains(&doy)
                    && let Some(d) = calendar::date_of_doy(year, doy as i16)
                    && d.month() == month
                {
                    days.insert(d.day());
                }
            }
        }
        self.days = days.into_iter().collect();
        self.index = 0;
    }
}

impl Generator for ByWeekNo {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        if self.period != Some((cursor.year, cursor.month)) {
            self.period = Some((cursor.year, cursor.month));
            self.refresh(cursor.year, cursor.month);
        }
        let Some(&day) = self.days.get(self.index) else {
            return Step::Rollover;
        };
        self.index += 1;
        cursor.day = day;
        Step::Advanced
    }
}

/// The days named by a BYYEARDAY list; negative entries count back from the
/// end of the year.
pub(crate) struct ByYearDay {
    by_year_day: Vec<i16>,
    period: Option<(i16, i8)>,
    days: Vec<i8>,
    index: usize,
}

impl ByYearDay {
    pub(crate) fn new(by_year_day: Vec<i16>) -> Self {
        ByYearDay {
            by_year_day,
            period: None,
            days: Vec::new(),
            index: 0,
        }
    }

    fn refresh(&mut self, year: i16, month: i8) {
        let year_len = calendar::days_in_year(year);
        let mut days = BTreeSet::new();
        for &yd in &self.by_year_day {
            let doy = if yd < 0 { year_len + yd + 1 } else { yd };
            if (1..=year_len).contains(&doy)
                && let Some(d) = calendar::date_of_doy(year, doy)
                && d.month() == month
            {
                days.insert(d.day());
            }
        }
        self.days = days.into_iter().collect();
        self.index = 0;
    }
}

impl Generator for ByYearDay {
    fn generate(&mut self, cursor: &mut DateCursor) -> Step {
        if self.period != Some((cursor.year, cursor.month)) {
            self.period = Some((cursor.year, cursor.month));
            self.refresh(cursor.year, cursor.month);
        }
        let Some(&day) = self.days.get(self.index) else {
            return Step::Rollover;
        };
        self.index += 1;
        cursor.day = day;
        Step::Advanced
    }
}

#[cfg(test)]
mod tests {
    use cadence_ical::WeekDay;

    use super::*;

    fn drain(generator: &mut dyn Generator, cursor: &mut DateCursor) -> Vec<i8> {
        let mut out = Vec::new();
        while let Step::Advanced = generator.generate(cursor) {
            out.push(cursor.day);
        }
        out
    }

    #[test]
    fn serial_year_follows_the_interval() {
        let mut cursor = DateCursor::new(date(1997, 9, 2));
        let mut years = SerialYear::new(3, date(1997, 9, 2));
        for expected in [1997, 2000, 2003] {
            assert_eq!(years.generate(&mut cursor), Step::Advanced);
            assert_eq!(cursor.year, expected);
        }
    }

    #[test]
    fn serial_year_stops_at_the_civil_range() {
        let mut cursor = DateCursor::new(date(9998, 1, 1));
        let mut years = SerialYear::new(1, date(9998, 1, 1));
        assert_eq!(years.generate(&mut cursor), Step::Advanced);
        assert_eq!(years.generate(&mut cursor), Step::Advanced);
        assert_eq!(years.generate(&mut cursor), Step::Rollover);
    }

    #[test]
    fn serial_month_walks_the_year() {
        let mut cursor = DateCursor::new(date(1997, 9, 2));
        let mut months = SerialMonth::new(1, date(1997, 9, 2));
        let mut seen = Vec::new();
        while let Step::Advanced = months.generate(&mut cursor) {
            seen.push(cursor.month);
        }
        assert_eq!(seen, vec![9, 10, 11, 12]);
        cursor.year = 1998;
        assert_eq!(months.generate(&mut cursor), Step::Advanced);
        assert_eq!(cursor.month, 1);
    }

    #[test]
    fn serial_month_carries_the_stride_across_years() {
        // every 18 months from 1997-09: next lands on 1999-03
        let mut cursor = DateCursor::new(date(1997, 9, 10));
        let mut months = SerialMonth::new(18, date(1997, 9, 10));
        assert_eq!(months.generate(&mut cursor), Step::Advanced);
        assert_eq!(cursor.month, 9);
        assert_eq!(months.generate(&mut cursor), Step::Rollover);
        cursor.year = 1998;
        assert_eq!(months.generate(&mut cursor), Step::Rollover);
        cursor.year = 1999;
        assert_eq!(months.generate(&mut cursor), Step::Advanced);
        assert_eq!(cursor.month, 3);
    }

    #[test]
    fn by_month_restarts_each_year() {
        let mut cursor = DateCursor::new(date(1997, 6, 10));
        let mut months = ByMonth::new(vec![7, 6, 6]);
        assert_eq!(months.generate(&mut cursor), Step::Advanced);
        assert_eq!(cursor.month, 6);
        assert_eq!(months.generate(&mut cursor), Step::Advanced);
        assert_eq!(cursor.month, 7);
        assert_eq!(months.generate(&mut cursor), Step::Rollover);
        cursor.year = 1998;
        assert_eq!(months.generate(&mut cursor), Step::Advanced);
        assert_eq!(cursor.month, 6);
    }

    #[test]
    fn serial_day_strides_across_month_boundaries() {
        // every 10 days from 1997-09-02: 2, 12, 22, then Oct 2
        let mut cursor = DateCursor::new(date(1997, 9, 2));
        let mut days = SerialDay::new(10, date(1997, 9, 2));
        assert_eq!(drain(&mut days, &mut cursor), vec![2, 12, 22]);
        cursor.month = 10;
        assert_eq!(days.generate(&mut cursor), Step::Advanced);
        assert_eq!(cursor.day, 2);
    }

    #[test]
    fn by_month_day_expands_negative_entries() {
        let mut cursor = DateCursor::new(date(1997, 9, 28));
        let mut days = ByMonthDay::new(vec![-3, 1]);
        assert_eq!(drain(&mut days, &mut cursor), vec![1, 28]);
        cursor.month = 10;
        let mut expected = ByMonthDay::new(vec![-3, 1]);
        assert_eq!(drain(&mut expected, &mut cursor), vec![1, 29]);
    }

    #[test]
    fn by_month_day_drops_days_the_month_lacks() {
        let mut cursor = DateCursor::new(date(1997, 2, 1));
        let mut days = ByMonthDay::new(vec![30]);
        assert_eq!(days.generate(&mut cursor), Step::Rollover);
    }

    #[test]
    fn by_day_yields_every_weekday_without_ordinal() {
        // September 1997 Tuesdays: 2, 9, 16, 23, 30
        let mut cursor = DateCursor::new(date(1997, 9, 2));
        let mut days = ByDay::new(
            vec![WeekDayNum {
                ordinal: 0,
                day: WeekDay::Tuesday,
            }],
            false,
        );
        assert_eq!(drain(&mut days, &mut cursor), vec![2, 9, 16, 23, 30]);
    }

    #[test]
    fn by_day_resolves_month_ordinals() {
        // -1FR of September 1997 is the 26th
        let mut cursor = DateCursor::new(date(1997, 9, 5));
        let mut days = ByDay::new(
            vec![WeekDayNum {
                ordinal: -1,
                day: WeekDay::Friday,
            }],
            false,
        );
        assert_eq!(drain(&mut days, &mut cursor), vec![26]);
    }

    #[test]
    fn by_day_resolves_year_ordinals_to_the_owning_month() {
        // the 20th Monday of 1997 is May 19; June has no match
        let mut cursor = DateCursor {
            year: 1997,
            month: 5,
            day: 1,
        };
        let mut days = ByDay::new(
            vec![WeekDayNum {
                ordinal: 20,
                day: WeekDay::Monday,
            }],
            true,
        );
        assert_eq!(drain(&mut days, &mut cursor), vec![19]);
        cursor.month = 6;
        assert_eq!(days.generate(&mut cursor), Step::Rollover);
    }

    #[test]
    fn by_week_no_emits_the_days_of_week_twenty() {
        // week 20 of 1997 runs May 12-18
        let mut cursor = DateCursor {
            year: 1997,
            month: 5,
            day: 1,
        };
        let mut days = ByWeekNo::new(vec![20], Weekday::Monday);
        assert_eq!(
            drain(&mut days, &mut cursor),
            vec![12, 13, 14, 15, 16, 17, 18]
        );
    }

    #[test]
    fn by_week_no_clips_week_one_to_the_year() {
        // week 1 of 1997 begins 1996-12-30; only Jan 1-5 belong to 1997
        let mut cursor = DateCursor {
            year: 1997,
            month: 1,
            day: 1,
        };
        let mut days = ByWeekNo::new(vec![1], Weekday::Monday);
        assert_eq!(drain(&mut days, &mut cursor), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn by_year_day_counts_from_both_ends() {
        let mut cursor = DateCursor {
            year: 1997,
            month: 12,
            day: 1,
        };
        // -1 is Dec 31; 360 is Dec 26
        let mut days = ByYearDay::new(vec![-1, 360]);
        assert_eq!(drain(&mut days, &mut cursor), vec![26, 31]);
    }
}
