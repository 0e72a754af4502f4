// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content-line handling for recurrence data blocks: unfolding, line
//! splitting, and RRULE / EXRULE / RDATE / EXDATE demultiplexing.

use chumsky::prelude::*;

use crate::error::{ParseError, first_reason};
use crate::keyword::{
    KW_EXDATE, KW_EXRULE, KW_PARAM_TZID, KW_PARAM_VALUE, KW_RDATE, KW_RRULE, KW_VALUE_DATE,
    KW_VALUE_DATE_TIME,
};
use crate::value::RecurrenceRule;
use crate::value::datetime::{DateOrDateTime, date_or_date_time};

/// A parsed recurrence content line.
#[derive(Debug, Clone)]
pub enum RecurrenceProperty {
    /// An inclusion rule.
    RRule(RecurrenceRule),
    /// An exclusion rule.
    ExRule(RecurrenceRule),
    /// An inclusion date list.
    RDate(DateList),
    /// An exclusion date list.
    ExDate(DateList),
}

/// The value of an RDATE or EXDATE content line.
#[derive(Debug, Clone)]
pub struct DateList {
    /// Date or date-time values in declaration order.
    pub values: Vec<DateOrDateTime>,
    /// Time zone parameter, when a `TZID` was present.
    pub tz_id: Option<String>,
}

impl DateList {
    fn parse(property: &'static str, params: &str, value: &str) -> Result<Self, ParseError> {
        let mut tz_id = None;
        let mut date_only = false;
        for param in params.split(';').filter(|p| !p.is_empty()) {
            let Some((key, val)) = param.split_once('=') else {
                return Err(ParseError::malformed(
                    property,
                    format!("malformed parameter {param:?}"),
                ));
            };
            if key.eq_ignore_ascii_case(KW_PARAM_VALUE) {
                if val.eq_ignore_ascii_case(KW_VALUE_DATE) {
                    date_only = true;
                } else if val.eq_ignore_ascii_case(KW_VALUE_DATE_TIME) {
                    date_only = false;
                } else {
                    return Err(ParseError::malformed(
                        property,
                        format!("unsupported value type {val:?}"),
                    ));
                }
            } else if key.eq_ignore_ascii_case(KW_PARAM_TZID) {
                tz_id = Some(val.to_string());
            }
            // other parameters are tolerated and ignored
        }

        let values: Vec<DateOrDateTime> = date_or_date_time()
            .separated_by(just(','))
            .at_least(1)
            .collect()
            .then_ignore(end())
            .parse(value)
            .into_result()
            .map_err(|errs| ParseError::malformed(property, first_reason(&errs)))?;

        if date_only && values.iter().any(|v| !v.is_date()) {
            return Err(ParseError::malformed(
                property,
                "VALUE=DATE list contains a date-time",
            ));
        }

        Ok(DateList { values, tz_id })
    }
}

/// Join folded lines: a line break followed by a single SPACE or TAB
/// continues the previous line (RFC 5545 Section 3.1). Remaining breaks are
/// normalized to `\n`.
#[must_use]
pub fn unfold(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' || c == '\n' {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            match chars.peek() {
                Some(' ' | '\t') => {
                    chars.next();
                }
                _ => out.push('\n'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a recurrence data block into its content lines.
///
/// Each line yields an independent result so the caller can decide whether a
/// bad line aborts the whole block (strict) or is dropped (lenient). Empty
/// input yields no lines.
#[must_use]
pub fn parse_block(src: &str) -> Vec<Result<RecurrenceProperty, ParseError>> {
    unfold(src)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_content_line)
        .collect()
}

fn parse_content_line(line: &str) -> Result<RecurrenceProperty, ParseError> {
    let Some((name, params, value)) = split_line(line) else {
        return Err(ParseError::UnrecognizedLine(line.to_string()));
    };

    if name.eq_ignore_ascii_case(KW_RRULE) {
        RecurrenceRule::parse_named(KW_RRULE, &value.to_ascii_uppercase())
            .map(RecurrenceProperty::RRule)
    } else if name.eq_ignore_ascii_case(KW_EXRULE) {
        RecurrenceRule::parse_named(KW_EXRULE, &value.to_ascii_uppercase())
            .map(RecurrenceProperty::ExRule)
    } else if name.eq_ignore_ascii_case(KW_RDATE) {
        DateList::parse(KW_RDATE, params, value).map(RecurrenceProperty::RDate)
    } else if name.eq_ignore_ascii_case(KW_EXDATE) {
        DateList::parse(KW_EXDATE, params, value).map(RecurrenceProperty::ExDate)
    } else {
        Err(ParseError::UnrecognizedLine(line.to_string()))
    }
}

/// Split a content line into (name, parameters, value). The name ends at the
/// first `;` or `:`; the value starts after the first `:`.
fn split_line(line: &str) -> Option<(&str, &str, &str)> {
    let colon = line.find(':')?;
    let (head, rest) = line.split_at(colon);
    let value = &rest[1..];
    match head.find(';') {
        Some(semi) => Some((&head[..semi], &head[semi + 1..], value)),
        None => Some((head, "", value)),
    }
}
