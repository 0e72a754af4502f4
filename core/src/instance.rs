// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Instance generators: the day → month → year cascade that turns a
//! generator chain plus filters into a strictly increasing stream of dates.

use std::collections::VecDeque;

use cadence_ical::Frequency;
use jiff::civil::{Date, Weekday};

use crate::calendar;
use crate::cursor::DateCursor;
use crate::filters::Filter;
use crate::generators::{Generator, Step};

/// Consecutive years the cascade may scan without one filter-passing date
/// before a degenerate rule (say BYMONTHDAY=30 inside February) is declared
/// exhausted.
const MAX_EMPTY_YEARS: u32 = 100;

pub(crate) enum InstanceGenerator {
    Serial(SerialInstance),
    BySetPos(BySetPosInstance),
}

impl InstanceGenerator {
    pub(crate) fn next_date(&mut self, cursor: &mut DateCursor) -> Option<Date> {
        match self {
            InstanceGenerator::Serial(serial) => serial.next_date(cursor),
            InstanceGenerator::BySetPos(by_set_pos) => by_set_pos.next_date(cursor),
        }
    }

    /// Jump the year and month generators forward to the period containing
    /// (`year`, `month`). Legal only for position-independent conditions;
    /// returns `false` when the chain exhausts during the jump.
    pub(crate) fn skip_to(&mut self, cursor: &mut DateCursor, year: i16, month: i8) -> bool {
        match self {
            InstanceGenerator::Serial(serial) => serial.skip_to(cursor, year, month),
            InstanceGenerator::BySetPos(by_set_pos) => {
                // buffered selections must drain through the normal path
                if by_set_pos.queue.is_empty() && by_set_pos.pushback.is_none() {
                    by_set_pos.inner.skip_to(cursor, year, month)
                } else {
                    true
                }
            }
        }
    }
}

/// The plain cascade: try the day generator; on rollover advance the month,
/// then the year, and retry. Filters veto completed dates.
pub(crate) struct SerialInstance {
    filters: Vec<Filter>,
    year: Box<dyn Generator>,
    month: Box<dyn Generator>,
    day: Box<dyn Generator>,
    primed: bool,
    empty_years: u32,
    exhausted: bool,
}

impl SerialInstance {
    pub(crate) fn new(
        filters: Vec<Filter>,
        year: Box<dyn Generator>,
        month: Box<dyn Generator>,
        day: Box<dyn Generator>,
    ) -> Self {
        SerialInstance {
            filters,
            year,
            month,
            day,
            primed: false,
            empty_years: 0,
            exhausted: false,
        }
    }

    /// Generate the first year and position the month generator within it.
    /// The cursor starts on the series start date, whose month need not be
    /// one the rule can produce.
    fn prime(&mut self, cursor: &mut DateCursor) -> bool {
        if self.primed {
            return true;
        }
        self.primed = true;
        if let Step::Rollover = self.year.generate(cursor) {
            return false;
        }
        while let Step::Rollover = self.month.generate(cursor) {
            if !self.next_year(cursor) {
                return false;
            }
        }
        true
    }

    fn next_year(&mut self, cursor: &mut DateCursor) -> bool {
        if let Step::Rollover = self.year.generate(cursor) {
            return false;
        }
        self.empty_years += 1;
        self.empty_years <= MAX_EMPTY_YEARS
    }

    pub(crate) fn next_date(&mut self, cursor: &mut DateCursor) -> Option<Date> {
        if self.exhausted || !self.prime(cursor) {
            self.exhausted = true;
            return None;
        }
        loop {
            while let Step::Rollover = self.day.generate(cursor) {
                while let Step::Rollover = self.month.generate(cursor) {
                    if !self.next_year(cursor) {
                        self.exhausted = true;
                        return None;
                    }
                }
            }
            let Some(date) = cursor.to_date() else {
                self.exhausted = true;
                return None;
            };
            if self.filters.iter().all(|filter| filter(date)) {
                self.empty_years = 0;
                return Some(date);
            }
        }
    }

    fn skip_to(&mut self, cursor: &mut DateCursor, year: i16, month: i8) -> bool {
        if self.exhausted || !self.prime(cursor) {
            self.exhausted = true;
            return false;
        }
        if cursor.year < year {
            while cursor.year < year {
                if let Step::Rollover = self.year.generate(cursor) {
                    self.exhausted = true;
                    return false;
                }
            }
            while let Step::Rollover = self.month.generate(cursor) {
                if let Step::Rollover = self.year.generate(cursor) {
                    self.exhausted = true;
                    return false;
                }
            }
        }
        while cursor.year == year && cursor.month < month {
            while let Step::Rollover = self.month.generate(cursor) {
                if let Step::Rollover = self.year.generate(cursor) {
                    self.exhausted = true;
                    return false;
                }
            }
        }
        true
    }
}

/// Buffers every candidate of one set period, then keeps only the listed
/// ordinal positions. The set period is the calendar year, calendar month,
/// or `wkst`-anchored week, by frequency.
pub(crate) struct BySetPosInstance {
    inner: SerialInstance,
    positions: Vec<i32>,
    freq: Frequency,
    wkst: Weekday,
    pushback: Option<Date>,
    queue: VecDeque<Date>,
    last_selected_year: i16,
    done: bool,
}

#[derive(PartialEq, Eq)]
enum SetPeriod {
    Year(i16),
    Month(i16, i8),
    Week(i64),
}

impl BySetPosInstance {
    pub(crate) fn new(
        inner: SerialInstance,
        positions: Vec<i16>,
        freq: Frequency,
        wkst: Weekday,
        start_year: i16,
    ) -> Self {
        BySetPosInstance {
            inner,
            positions: positions.into_iter().map(i32::from).collect(),
            freq,
            wkst,
            pushback: None,
            queue: VecDeque::new(),
            last_selected_year: start_year,
            done: false,
        }
    }

    fn set_period(&self, date: Date) -> SetPeriod {
        match self.freq {
            Frequency::Yearly => SetPeriod::Year(date.year()),
            Frequency::Monthly => SetPeriod::Month(date.year(), date.month()),
            _ => SetPeriod::Week(calendar::week_start_day_number(date, self.wkst)),
        }
    }

    fn next_date(&mut self, cursor: &mut DateCursor) -> Option<Date> {
        loop {
            if let Some(date) = self.queue.pop_front() {
                return Some(date);
            }
            if self.done {
                return None;
            }

            // gather one whole set period
            let first = match self.pushback.take() {
                Some(date) => date,
                None => match self.inner.next_date(cursor) {
                    Some(date) => date,
                    None => {
                        self.done = true;
                        return None;
                    }
                },
            };
            if (first.year() as i32 - self.last_selected_year as i32) > MAX_EMPTY_YEARS as i32 {
                self.done = true;
                return None;
            }
            let period = self.set_period(first);
            let mut buffer = vec![first];
            loop {
                match self.inner.next_date(cursor) {
                    Some(date) if self.set_period(date) == period => buffer.push(date),
                    Some(date) => {
                        self.pushback = Some(date);
                        break;
                    }
                    None => {
                        self.done = true;
                        break;
                    }
                }
            }

            // keep the listed 1-based positions; negatives count from the end
            let len = buffer.len() as i32;
            let mut selected: Vec<Date> = self
                .positions
                .iter()
                .filter_map(|&position| {
                    let index = if position > 0 { position - 1 } else { len + position };
                    usize::try_from(index).ok().and_then(|i| buffer.get(i)).copied()
                })
                .collect();
            selected.sort_unstable();
            selected.dedup();
            if !selected.is_empty() {
                self.last_selected_year = first.year();
            }
            self.queue.extend(selected);
        }
    }
}
