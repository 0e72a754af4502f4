// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! RFC 5545 recurrence expansion: turns parsed recurrence declarations and
//! a series start into lazy, strictly increasing streams of UTC
//! occurrences, with streaming union and exclusion over several streams.

mod calendar;
mod compound;
mod conditions;
mod cursor;
mod error;
mod factory;
mod filters;
mod generators;
mod instance;
mod occurrence;
mod rdate;
mod rrule;

pub use crate::compound::CompoundIterator;
pub use crate::error::{Error, RuleError};
pub use crate::factory::{
    ParseMode, date_list_iterator, except, join, recurrence_iterator, rule_iterator,
};
pub use crate::occurrence::{Occurrence, RecurrenceIterator};
pub use crate::rdate::DateListIterator;
pub use crate::rrule::RRuleIterator;
