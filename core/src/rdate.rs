// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::occurrence::{Occurrence, RecurrenceIterator};

/// The occurrence stream of an explicit date list: sorted, de-duplicated,
/// already UTC-normalized by the factory.
#[derive(Debug, Clone)]
pub struct DateListIterator {
    dates: Vec<Occurrence>,
    index: usize,
}

impl DateListIterator {
    pub(crate) fn new(mut dates: Vec<Occurrence>) -> Self {
        dates.sort_unstable();
        dates.dedup();
        DateListIterator { dates, index: 0 }
    }
}

impl Iterator for DateListIterator {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        let date = self.dates.get(self.index).copied()?;
        self.index += 1;
        Some(date)
    }
}

impl RecurrenceIterator for DateListIterator {
    fn peek(&mut self) -> Option<Occurrence> {
        self.dates.get(self.index).copied()
    }

    fn advance_to(&mut self, instant: Occurrence) {
        let at_or_after = self.dates.partition_point(|d| *d < instant);
        self.index = self.index.max(at_or_after);
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn day(y: i16, m: i8, d: i8) -> Occurrence {
        Occurrence::Date(date(y, m, d))
    }

    #[test]
    fn sorts_and_deduplicates() {
        let mut it = DateListIterator::new(vec![
            day(1997, 9, 4),
            day(1997, 9, 2),
            day(1997, 9, 4),
            day(1997, 9, 3),
        ]);
        let all: Vec<_> = (&mut it).collect();
        assert_eq!(
            all,
            vec![day(1997, 9, 2), day(1997, 9, 3), day(1997, 9, 4)]
        );
        assert_eq!(it.peek(), None);
    }

    #[test]
    fn advances_to_the_first_at_or_after() {
        let mut it = DateListIterator::new(vec![
            day(1997, 9, 2),
            day(1997, 9, 10),
            day(1997, 9, 20),
        ]);
        it.advance_to(day(1997, 9, 5));
        assert_eq!(it.peek(), Some(day(1997, 9, 10)));
        // never moves backwards
        it.advance_to(day(1997, 9, 1));
        assert_eq!(it.peek(), Some(day(1997, 9, 10)));
    }
}
