// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::occurrence::Occurrence;

/// Decides when a rule's stream ends. The first refusal is final: the
/// iterator marks itself done and never asks again.
pub(crate) enum Condition {
    /// No bound; the stream ends only when its generators do.
    Always,
    /// Permits a fixed number of emissions. Each call consumes one permit,
    /// so every generated instance must pass through exactly once.
    Count {
        /// Emissions still allowed.
        remaining: u32,
    },
    /// Permits candidates up to and including the bound, in UTC.
    Until(Occurrence),
}

impl Condition {
    pub(crate) fn permits(&mut self, candidate: &Occurrence) -> bool {
        match self {
            Condition::Always => true,
            Condition::Count { remaining } => {
                if *remaining == 0 {
                    false
                } else {
                    *remaining -= 1;
                    true
                }
            }
            Condition::Until(until) => candidate <= until,
        }
    }
}
