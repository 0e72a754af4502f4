// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for the expansion integration tests.

#![allow(dead_code)] // not every test binary uses every helper

use cadence_core::{Occurrence, ParseMode, RRuleIterator, recurrence_iterator, rule_iterator};
use cadence_ical::RecurrenceRule;
use jiff::civil;
use jiff::tz::TimeZone;

pub fn utc() -> TimeZone {
    TimeZone::UTC
}

pub fn new_york() -> TimeZone {
    TimeZone::get("America/New_York").expect("tzdb should know America/New_York")
}

pub fn day(year: i16, month: i8, dom: i8) -> Occurrence {
    Occurrence::Date(civil::date(year, month, dom))
}

pub fn at(year: i16, month: i8, dom: i8, hour: i8, minute: i8, second: i8) -> Occurrence {
    Occurrence::DateTime(civil::datetime(year, month, dom, hour, minute, second, 0))
}

/// Build the iterator of a single rule, panicking on parse or rule errors.
pub fn rule_iter(rule: &str, dtstart: Occurrence, tz: &TimeZone) -> RRuleIterator {
    let rule = RecurrenceRule::parse(rule).expect("rule should parse");
    rule_iterator(&rule, dtstart, tz).expect("rule should build")
}

/// Expand a single rule and render up to `limit` occurrences.
pub fn expand_rule(rule: &str, dtstart: Occurrence, tz: &TimeZone, limit: usize) -> Vec<String> {
    rule_iter(rule, dtstart, tz)
        .take(limit)
        .map(|occurrence| occurrence.to_string())
        .collect()
}

/// Expand a whole content block strictly and render up to `limit`
/// occurrences.
pub fn expand_block(rdata: &str, dtstart: Occurrence, tz: &TimeZone, limit: usize) -> Vec<String> {
    recurrence_iterator(rdata, dtstart, tz, ParseMode::Strict)
        .expect("block should build")
        .take(limit)
        .map(|occurrence| occurrence.to_string())
        .collect()
}
