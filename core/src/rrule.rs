// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Time;
use jiff::tz::TimeZone;

use crate::conditions::Condition;
use crate::cursor::DateCursor;
use crate::instance::InstanceGenerator;
use crate::occurrence::{Occurrence, RecurrenceIterator, from_utc};

/// The occurrence stream of one recurrence rule.
///
/// Wraps an instance generator with the rule's time zone, the emission time
/// of day, and the terminating condition. Candidates flow raw date →
/// time-of-day → UTC → condition; output is strictly increasing in UTC.
pub struct RRuleIterator {
    tz: TimeZone,
    cursor: DateCursor,
    instance: InstanceGenerator,
    condition: Condition,
    emit_time: Option<Time>,
    /// Next candidate already admitted by the condition.
    pending: Option<Occurrence>,
    /// Next candidate not yet shown to the condition (only set while
    /// skipping pre-start instances during construction).
    staged: Option<Occurrence>,
    done: bool,
    can_shortcut: bool,
}

impl RRuleIterator {
    pub(crate) fn new(
        instance: InstanceGenerator,
        condition: Condition,
        can_shortcut: bool,
        dtstart: Occurrence,
        emit_time: Option<Time>,
        tz: TimeZone,
    ) -> Self {
        let cursor = DateCursor::new(dtstart.date());
        let mut iterator = RRuleIterator {
            tz,
            cursor,
            instance,
            condition,
            emit_time,
            pending: None,
            staged: None,
            done: false,
            can_shortcut,
        };
        // Instances before the series start are not part of the recurrence:
        // drop them without consuming the condition, so COUNT still covers
        // the first real occurrences.
        let start = dtstart.in_utc(&iterator.tz);
        while let Some(candidate) = iterator.next_raw() {
            if candidate >= start {
                iterator.staged = Some(candidate);
                break;
            }
        }
        if iterator.staged.is_none() {
            iterator.done = true;
        }
        iterator
    }

    /// The next candidate in UTC, before the condition has seen it.
    fn next_raw(&mut self) -> Option<Occurrence> {
        let date = self.instance.next_date(&mut self.cursor)?;
        Some(match self.emit_time {
            Some(time) => Occurrence::DateTime(date.to_datetime(time)).in_utc(&self.tz),
            None => Occurrence::Date(date),
        })
    }

    /// Ensure `pending` holds the next admitted occurrence, if any.
    fn fetch(&mut self) {
        if self.pending.is_some() || self.done {
            return;
        }
        let candidate = match self.staged.take() {
            Some(candidate) => Some(candidate),
            None => self.next_raw(),
        };
        match candidate {
            Some(candidate) if self.condition.permits(&candidate) => {
                self.pending = Some(candidate);
            }
            _ => self.done = true,
        }
    }
}

impl Iterator for RRuleIterator {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        self.fetch();
        self.pending.take()
    }
}

impl RecurrenceIterator for RRuleIterator {
    fn peek(&mut self) -> Option<Occurrence> {
        self.fetch();
        self.pending
    }

    fn advance_to(&mut self, instant: Occurrence) {
        if self.done {
            return;
        }
        if let Some(pending) = self.pending
            && pending >= instant
        {
            return;
        }

        // Without a counting condition the condition is position
        // independent, so the year and month generators may seek directly.
        if self.can_shortcut {
            let target = match instant {
                Occurrence::Date(d) => d,
                Occurrence::DateTime(dt) => from_utc(dt, &self.tz).date(),
            };
            if (self.cursor.year, self.cursor.month) < (target.year(), target.month()) {
                self.pending = None;
                self.staged = None;
                if !self
                    .instance
                    .skip_to(&mut self.cursor, target.year(), target.month())
                {
                    self.done = true;
                    return;
                }
            }
        }

        while let Some(occurrence) = self.peek() {
            if occurrence >= instant {
                break;
            }
            self.pending = None;
        }
    }
}
