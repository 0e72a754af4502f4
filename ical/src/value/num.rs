// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Small numeric parsers shared by the value grammar.

use chumsky::prelude::*;

pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Exactly `n` ASCII digits folded into an integer.
pub(crate) fn fixed_digits<'src>(n: usize) -> impl Parser<'src, &'src str, i32, Extra<'src>> {
    any()
        .filter(char::is_ascii_digit)
        .repeated()
        .exactly(n)
        .to_slice()
        .map(|s: &str| s.parse::<i32>().unwrap_or_default())
}

/// One to `max` ASCII digits folded into an integer.
pub(crate) fn digits<'src>(max: usize) -> impl Parser<'src, &'src str, i32, Extra<'src>> {
    any()
        .filter(char::is_ascii_digit)
        .repeated()
        .at_least(1)
        .at_most(max)
        .to_slice()
        .map(|s: &str| s.parse::<i32>().unwrap_or_default())
}

/// Unsigned integer constrained to `lo..=hi`.
pub(crate) fn ranged<'src>(
    lo: i32,
    hi: i32,
    max_digits: usize,
    what: &'static str,
) -> impl Parser<'src, &'src str, i32, Extra<'src>> {
    digits(max_digits).try_map(move |v, span| {
        if (lo..=hi).contains(&v) {
            Ok(v)
        } else {
            Err(Rich::custom(span, format!("{what} out of range: {v}")))
        }
    })
}

/// Optionally signed integer whose magnitude is constrained to `lo..=hi`.
pub(crate) fn signed_ranged<'src>(
    lo: i32,
    hi: i32,
    max_digits: usize,
    what: &'static str,
) -> impl Parser<'src, &'src str, i32, Extra<'src>> {
    one_of("+-")
        .or_not()
        .then(ranged(lo, hi, max_digits, what))
        .map(|(sign, v)| if sign == Some('-') { -v } else { v })
}

/// A comma separated, non-empty list.
pub(crate) fn list<'src, T>(
    item: impl Parser<'src, &'src str, T, Extra<'src>>,
) -> impl Parser<'src, &'src str, Vec<T>, Extra<'src>> {
    item.separated_by(just(',')).at_least(1).collect()
}
