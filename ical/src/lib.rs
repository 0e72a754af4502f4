// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse and represent the iCalendar recurrence surface: recurrence rule
//! values, date and date-time values, and the RRULE / EXRULE / RDATE /
//! EXDATE content lines they travel in.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro
)]

pub mod content;
pub mod keyword;
pub mod value;

mod error;

pub use crate::content::{DateList, RecurrenceProperty, parse_block, unfold};
pub use crate::error::ParseError;
pub use crate::value::{
    DateOrDateTime, Frequency, RecurrenceRule, ValueDate, ValueDateTime, ValueTime, WeekDay,
    WeekDayNum,
};
