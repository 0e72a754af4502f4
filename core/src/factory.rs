// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Builds iterators from parsed rules and content blocks: chooses the
//! generator chain and filters for a rule's frequency, installs the
//! terminating condition, and wires inclusions against exclusions.

use cadence_ical::{DateList, DateOrDateTime, Frequency, RecurrenceProperty, RecurrenceRule, WeekDay};
use jiff::civil;
use jiff::tz::TimeZone;

use crate::compound::CompoundIterator;
use crate::conditions::Condition;
use crate::error::{Error, RuleError};
use crate::filters::{self, Filter};
use crate::generators::{ByDay, ByMonth, ByMonthDay, ByWeekNo, ByYearDay, Generator, SerialDay, SerialMonth, SerialYear};
use crate::instance::{BySetPosInstance, InstanceGenerator, SerialInstance};
use crate::occurrence::{Occurrence, RecurrenceIterator, to_utc};
use crate::rdate::DateListIterator;
use crate::rrule::RRuleIterator;

/// How construction reacts to bad content lines: abort on the first one, or
/// log and drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Any bad line fails the whole block.
    Strict,
    /// Bad lines are logged and dropped; iteration proceeds with the rest.
    Lenient,
}

/// Build the full occurrence stream of a recurrence data block: RRULE and
/// RDATE lines are included, EXRULE and EXDATE lines excluded, and the
/// series start itself is always the first inclusion whether or not any
/// rule matches it.
///
/// `dtstart` is wall-clock in `tz`; emitted values are UTC.
///
/// # Errors
/// In strict mode, the first bad line or unsupported rule aborts
/// construction. Lenient construction always succeeds.
pub fn recurrence_iterator(
    rdata: &str,
    dtstart: Occurrence,
    tz: &TimeZone,
    mode: ParseMode,
) -> Result<CompoundIterator, Error> {
    let mut included: Vec<Box<dyn RecurrenceIterator>> = Vec::new();
    let mut excluded: Vec<Box<dyn RecurrenceIterator>> = Vec::new();
    included.push(Box::new(DateListIterator::new(vec![dtstart.in_utc(tz)])));

    for line in cadence_ical::parse_block(rdata) {
        let result = line.map_err(Error::from).and_then(|property| {
            match property {
                RecurrenceProperty::RRule(rule) => {
                    included.push(Box::new(rule_iterator(&rule, dtstart, tz)?));
                }
                RecurrenceProperty::ExRule(rule) => {
                    excluded.push(Box::new(rule_iterator(&rule, dtstart, tz)?));
                }
                RecurrenceProperty::RDate(list) => {
                    included.push(Box::new(date_list_iterator(&list, tz)));
                }
                RecurrenceProperty::ExDate(list) => {
                    excluded.push(Box::new(date_list_iterator(&list, tz)));
                }
            }
            Ok(())
        });
        if let Err(err) = result {
            match mode {
                ParseMode::Strict => return Err(err),
                ParseMode::Lenient => {
                    tracing::warn!(%err, "dropping bad recurrence line");
                }
            }
        }
    }

    Ok(CompoundIterator::new(included, excluded))
}

/// The union of several occurrence streams.
#[must_use]
pub fn join(iterators: Vec<Box<dyn RecurrenceIterator>>) -> CompoundIterator {
    CompoundIterator::new(iterators, Vec::new())
}

/// Everything `included` produces except what `excluded` produces.
/// Exclusions trump inclusions; dates and date-times never match each other.
#[must_use]
pub fn except(
    included: Box<dyn RecurrenceIterator>,
    excluded: Box<dyn RecurrenceIterator>,
) -> CompoundIterator {
    CompoundIterator::new(vec![included], vec![excluded])
}

/// Build the sorted, de-duplicated, UTC-normalized stream of an RDATE or
/// EXDATE list. A `TZID` parameter overrides `tz` for floating date-times;
/// an unknown `TZID` falls back to `tz` with a warning.
#[must_use]
pub fn date_list_iterator(list: &DateList, tz: &TimeZone) -> DateListIterator {
    let list_tz = match list.tz_id.as_deref() {
        Some(id) => match TimeZone::get(id) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(%err, tzid = id, "unknown time zone on date list; using the series zone");
                tz.clone()
            }
        },
        None => tz.clone(),
    };
    let dates = list
        .values
        .iter()
        .map(|&value| date_value_in_utc(value, &list_tz))
        .collect();
    DateListIterator::new(dates)
}

/// Build the occurrence stream of a single rule. Each frequency picks one
/// day generator; the remaining day-constraining parts become filters over
/// its output.
///
/// # Errors
/// Sub-daily frequencies are rejected, never silently elevated.
pub fn rule_iterator(
    rule: &RecurrenceRule,
    dtstart: Occurrence,
    tz: &TimeZone,
) -> Result<RRuleIterator, RuleError> {
    let interval = i64::from(rule.interval.unwrap_or(1).max(1));
    let wkst = rule.wkst.unwrap_or(WeekDay::Monday).civil();
    let start_date = dtstart.date();

    let mut filters: Vec<Filter> = Vec::new();
    let mut month_generator: Option<Box<dyn Generator>> = None;

    let day_generator: Box<dyn Generator> = match rule.freq {
        Frequency::Daily => {
            if !rule.by_day.is_empty() {
                // ordinals count weekdays of the year, matching libical
                filters.push(filters::by_day_filter(rule.by_day.clone(), true));
            }
            if rule.by_month_day.is_empty() {
                Box::new(SerialDay::new(interval, start_date))
            } else {
                Box::new(ByMonthDay::new(rule.by_month_day.clone()))
            }
        }
        Frequency::Weekly => {
            // weeks span month and year boundaries, so there is no week
            // generator; the interval folds into the day stride, or into a
            // filter when BYDAY drives the days
            let day: Box<dyn Generator> = if rule.by_day.is_empty() {
                Box::new(SerialDay::new(interval * 7, start_date))
            } else {
                if interval > 1 {
                    filters.push(filters::week_interval_filter(interval, wkst, start_date));
                }
                Box::new(ByDay::new(rule.by_day.clone(), false))
            };
            if !rule.by_month_day.is_empty() {
                filters.push(filters::by_month_day_filter(rule.by_month_day.clone()));
            }
            day
        }
        Frequency::Yearly if !rule.by_year_day.is_empty() => {
            if !rule.by_day.is_empty() {
                filters.push(filters::by_day_filter(rule.by_day.clone(), true));
            }
            if !rule.by_month_day.is_empty() {
                filters.push(filters::by_month_day_filter(rule.by_month_day.clone()));
            }
            Box::new(ByYearDay::new(rule.by_year_day.clone()))
        }
        Frequency::Yearly | Frequency::Monthly => {
            let yearly = rule.freq == Frequency::Yearly;
            if !rule.by_month_day.is_empty() {
                if !rule.by_day.is_empty() {
                    filters.push(filters::by_day_filter(rule.by_day.clone(), yearly));
                }
                Box::new(ByMonthDay::new(rule.by_month_day.clone()))
            } else if yearly && !rule.by_week_no.is_empty() {
                if !rule.by_day.is_empty() {
                    filters.push(filters::by_day_filter(rule.by_day.clone(), true));
                }
                Box::new(ByWeekNo::new(rule.by_week_no.clone(), wkst))
            } else if !rule.by_day.is_empty() {
                Box::new(ByDay::new(
                    rule.by_day.clone(),
                    yearly && rule.by_month.is_empty(),
                ))
            } else {
                // no day-driving part at all: recur on the start day itself
                if yearly {
                    month_generator = Some(Box::new(ByMonth::new(vec![start_date.month()])));
                }
                Box::new(ByMonthDay::new(vec![start_date.day()]))
            }
        }
        freq => return Err(RuleError::UnsupportedFrequency(freq)),
    };

    if !rule.by_month.is_empty() {
        month_generator = Some(Box::new(ByMonth::new(rule.by_month.clone())));
    }
    let month_generator = month_generator.unwrap_or_else(|| {
        let month_interval = if rule.freq == Frequency::Monthly { interval } else { 1 };
        Box::new(SerialMonth::new(month_interval, start_date))
    });
    let year_interval = if rule.freq == Frequency::Yearly { interval } else { 1 };
    let year_generator: Box<dyn Generator> = Box::new(SerialYear::new(year_interval, start_date));

    let (condition, can_shortcut) = match (rule.count, rule.until) {
        (Some(count), _) if count > 0 => {
            // the counting condition must see every generated instance
            (Condition::Count { remaining: count }, false)
        }
        (_, Some(until)) => (until_condition(until, dtstart, tz), true),
        _ => (Condition::Always, true),
    };

    let serial = SerialInstance::new(filters, year_generator, month_generator, day_generator);
    let instance = if !rule.by_set_pos.is_empty()
        && matches!(
            rule.freq,
            Frequency::Weekly | Frequency::Monthly | Frequency::Yearly
        ) {
        InstanceGenerator::BySetPos(BySetPosInstance::new(
            serial,
            rule.by_set_pos.clone(),
            rule.freq,
            wkst,
            start_date.year(),
        ))
    } else {
        InstanceGenerator::Serial(serial)
    };

    Ok(RRuleIterator::new(
        instance,
        condition,
        can_shortcut,
        dtstart,
        emit_time(rule, dtstart),
        tz.clone(),
    ))
}

/// The clock time stamped onto every emission of a timed series: the start's
/// own time, with any singleton BYHOUR / BYMINUTE / BYSECOND substituted so
/// those parts are honored without expanding below daily frequency.
fn emit_time(rule: &RecurrenceRule, dtstart: Occurrence) -> Option<civil::Time> {
    let Occurrence::DateTime(start) = dtstart else {
        return None;
    };
    let start_time = start.time();
    let lengths = rule.by_hour.len() | rule.by_minute.len() | rule.by_second.len();
    if lengths == 1 {
        return Some(civil::time(
            rule.by_hour.first().copied().unwrap_or(start_time.hour()),
            rule.by_minute
                .first()
                .copied()
                .unwrap_or(start_time.minute()),
            rule.by_second
                .first()
                .copied()
                .map(|s| s.min(59))
                .unwrap_or(start_time.second()),
            0,
        ));
    }
    if lengths != 0 {
        tracing::warn!("multi-valued BYHOUR/BYMINUTE/BYSECOND are not expanded; keeping the series start time");
    }
    Some(start_time)
}

/// Install the UNTIL bound, coercing its type to the series start's type:
/// a date bound against a timed series compares at start of day, a timed
/// bound against an all-day series compares by date.
fn until_condition(until: DateOrDateTime, dtstart: Occurrence, tz: &TimeZone) -> Condition {
    let mut bound = date_value_in_utc(until, tz);
    match (bound, dtstart) {
        (Occurrence::Date(d), Occurrence::DateTime(_)) => {
            tracing::warn!(until = %bound, "UNTIL is a date on a timed series; comparing at start of day");
            bound = Occurrence::DateTime(d.to_datetime(civil::time(0, 0, 0, 0)));
        }
        (Occurrence::DateTime(dt), Occurrence::Date(_)) => {
            tracing::warn!(until = %bound, "UNTIL is a date-time on an all-day series; comparing by date");
            bound = Occurrence::Date(dt.date());
        }
        _ => {}
    }
    Condition::Until(bound)
}

/// A parsed date or date-time value as a UTC occurrence. Date-times marked
/// `Z` are already UTC; floating ones are wall-clock in `tz`.
fn date_value_in_utc(value: DateOrDateTime, tz: &TimeZone) -> Occurrence {
    match value {
        DateOrDateTime::Date(d) => Occurrence::Date(d.civil()),
        DateOrDateTime::DateTime(dt) => {
            let civil = dt.civil();
            Occurrence::DateTime(if dt.time.utc { civil } else { to_utc(civil, tz) })
        }
    }
}
