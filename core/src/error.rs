// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use cadence_ical::{Frequency, ParseError};
use thiserror::Error;

/// A rule that parsed but cannot be iterated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The engine iterates daily periods and coarser only.
    #[error("cannot iterate more frequently than daily: FREQ={0}")]
    UnsupportedFrequency(Frequency),
}

/// Any failure while building a recurrence iterator from a content block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A content line failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A content line parsed but named an unsupported rule.
    #[error(transparent)]
    Rule(#[from] RuleError),
}
