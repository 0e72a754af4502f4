// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Error raised while parsing a recurrence content line or value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The content line does not begin with a recognized property name.
    #[error("unrecognized content line: {0:?}")]
    UnrecognizedLine(String),

    /// The property value (or a parameter) failed to parse.
    #[error("malformed {property} line: {reason}")]
    Malformed {
        /// Property the value belongs to, e.g. `RRULE`.
        property: &'static str,
        /// Human readable description of the first failure.
        reason: String,
    },
}

impl ParseError {
    pub(crate) fn malformed(property: &'static str, reason: impl Into<String>) -> Self {
        ParseError::Malformed {
            property,
            reason: reason.into(),
        }
    }
}

/// The first parser diagnostic, rendered for the error message.
pub(crate) fn first_reason<T: std::fmt::Display>(errs: &[T]) -> String {
    errs.first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "invalid value".to_string())
}
