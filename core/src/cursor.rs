// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;

/// The working date a generator chain advances. Each generator owns one
/// field: the year generator writes `year`, the month generator `month`, the
/// day generator `day`. Smaller fields are only meaningful after the owning
/// generator has advanced them for the current enclosing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateCursor {
    pub year: i16,
    pub month: i8,
    pub day: i8,
}

impl DateCursor {
    pub(crate) fn new(d: Date) -> Self {
        DateCursor {
            year: d.year(),
            month: d.month(),
            day: d.day(),
        }
    }

    /// The cursor as a civil date. `None` only if a generator produced a
    /// combination that does not exist on the calendar.
    pub(crate) fn to_date(self) -> Option<Date> {
        Date::new(self.year, self.month, self.day).ok()
    }
}
