// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for property values as defined in RFC 5545 Section 3.3.

pub mod datetime;
pub mod rrule;

mod num;

pub use datetime::{DateOrDateTime, ValueDate, ValueDateTime, ValueTime};
pub use rrule::{Frequency, RecurrenceRule, WeekDay, WeekDayNum};
