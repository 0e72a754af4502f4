// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::occurrence::{Occurrence, RecurrenceIterator};

/// Streaming set algebra over occurrence streams: the union of the included
/// iterators minus the union of the excluded ones, each value emitted once.
///
/// Dates and date-times over the same calendar day are distinct values, so
/// an all-day exclusion never cancels a timed inclusion.
pub struct CompoundIterator {
    included: Vec<Box<dyn RecurrenceIterator>>,
    excluded: Vec<Box<dyn RecurrenceIterator>>,
}

impl CompoundIterator {
    pub(crate) fn new(
        included: Vec<Box<dyn RecurrenceIterator>>,
        excluded: Vec<Box<dyn RecurrenceIterator>>,
    ) -> Self {
        CompoundIterator { included, excluded }
    }

    /// The smallest head among the included iterators that no excluded
    /// iterator also produces. Excluded values are consumed from every
    /// iterator carrying them as we pass.
    fn next_head(&mut self) -> Option<Occurrence> {
        loop {
            let head = self
                .included
                .iter_mut()
                .filter_map(|iterator| iterator.peek())
                .min()?;

            let mut is_excluded = false;
            for exclusion in &mut self.excluded {
                exclusion.advance_to(head);
                if exclusion.peek() == Some(head) {
                    is_excluded = true;
                }
            }
            if !is_excluded {
                return Some(head);
            }
            self.consume(head);
        }
    }

    /// Drop `head` from every included iterator currently offering it.
    fn consume(&mut self, head: Occurrence) {
        for iterator in &mut self.included {
            if iterator.peek() == Some(head) {
                iterator.next();
            }
        }
    }
}

impl Iterator for CompoundIterator {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        let head = self.next_head()?;
        self.consume(head);
        Some(head)
    }
}

impl RecurrenceIterator for CompoundIterator {
    fn peek(&mut self) -> Option<Occurrence> {
        self.next_head()
    }

    fn advance_to(&mut self, instant: Occurrence) {
        for iterator in &mut self.included {
            iterator.advance_to(instant);
        }
        for iterator in &mut self.excluded {
            iterator.advance_to(instant);
        }
    }
}
