// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule values as defined in RFC 5545 Section 3.3.10.

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::error::ParseError;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE,
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY,
    KW_RRULE_FREQ_MONTHLY, KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
    KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{DateOrDateTime, date_or_date_time};
use crate::value::num::{Extra, digits, list, ranged, signed_ranged};

/// Recurrence rule.
///
/// Every rule part except FREQ is optional; list parts are empty when the
/// part was absent.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    /// Frequency of recurrence.
    pub freq: Frequency,
    /// Inclusive end of the recurrence.
    pub until: Option<DateOrDateTime>,
    /// Number of occurrences.
    pub count: Option<u32>,
    /// Interval between recurrences.
    pub interval: Option<u32>,
    /// Second specifier.
    pub by_second: Vec<i8>,
    /// Minute specifier.
    pub by_minute: Vec<i8>,
    /// Hour specifier.
    pub by_hour: Vec<i8>,
    /// Day of week specifier.
    pub by_day: Vec<WeekDayNum>,
    /// Day of month specifier.
    pub by_month_day: Vec<i8>,
    /// Day of year specifier.
    pub by_year_day: Vec<i16>,
    /// Week number specifier.
    pub by_week_no: Vec<i8>,
    /// Month specifier.
    pub by_month: Vec<i8>,
    /// Position within the recurrence set.
    pub by_set_pos: Vec<i16>,
    /// Start day of week.
    pub wkst: Option<WeekDay>,
}

impl RecurrenceRule {
    /// Parse the value of an RRULE content line (the text after `RRULE:`).
    ///
    /// # Errors
    /// Returns a [`ParseError`] describing the first offending rule part.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        Self::parse_named(KW_RRULE, src)
    }

    pub(crate) fn parse_named(property: &'static str, src: &str) -> Result<Self, ParseError> {
        recur()
            .then_ignore(end())
            .parse(src)
            .into_result()
            .map_err(|errs| ParseError::malformed(property, crate::error::first_reason(&errs)))
    }
}

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            Frequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            Frequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            Frequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            Frequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            Frequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            Frequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    /// Convert to `jiff::civil::Weekday`.
    #[must_use]
    pub fn civil(self) -> jiff::civil::Weekday {
        match self {
            WeekDay::Sunday => jiff::civil::Weekday::Sunday,
            WeekDay::Monday => jiff::civil::Weekday::Monday,
            WeekDay::Tuesday => jiff::civil::Weekday::Tuesday,
            WeekDay::Wednesday => jiff::civil::Weekday::Wednesday,
            WeekDay::Thursday => jiff::civil::Weekday::Thursday,
            WeekDay::Friday => jiff::civil::Weekday::Friday,
            WeekDay::Saturday => jiff::civil::Weekday::Saturday,
        }
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDay::Sunday => write!(f, "{KW_DAY_SU}"),
            WeekDay::Monday => write!(f, "{KW_DAY_MO}"),
            WeekDay::Tuesday => write!(f, "{KW_DAY_TU}"),
            WeekDay::Wednesday => write!(f, "{KW_DAY_WE}"),
            WeekDay::Thursday => write!(f, "{KW_DAY_TH}"),
            WeekDay::Friday => write!(f, "{KW_DAY_FR}"),
            WeekDay::Saturday => write!(f, "{KW_DAY_SA}"),
        }
    }
}

/// Day of the week with an ordinal qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayNum {
    /// Ordinal within the enclosing period: positive counts from the start,
    /// negative from the end, 0 means every such weekday.
    pub ordinal: i8,
    /// Day of the week.
    pub day: WeekDay,
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
pub fn recur<'src>() -> impl Parser<'src, &'src str, RecurrenceRule, Extra<'src>> {
    recur_rule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .try_map(build_from_parts)
}

#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(DateOrDateTime),
    Count(u32),
    Interval(u32),
    BySecond(Vec<i8>),
    ByMinute(Vec<i8>),
    ByHour(Vec<i8>),
    ByDay(Vec<WeekDayNum>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<i8>),
    BySetPos(Vec<i16>),
    Wkst(WeekDay),
}

fn build_from_parts<'src>(
    parts: Vec<Part>,
    span: SimpleSpan,
) -> Result<RecurrenceRule, Rich<'src, char>> {
    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut wkst = None;
    let mut by_second = Vec::new();
    let mut by_minute = Vec::new();
    let mut by_hour = Vec::new();
    let mut by_day = Vec::new();
    let mut by_month_day = Vec::new();
    let mut by_year_day = Vec::new();
    let mut by_week_no = Vec::new();
    let mut by_month = Vec::new();
    let mut by_set_pos = Vec::new();

    for part in parts {
        match part {
            Part::Freq(v) => set_once(&mut freq, v, KW_RRULE_FREQ, span)?,
            Part::Until(v) => set_once(&mut until, v, KW_RRULE_UNTIL, span)?,
            Part::Count(v) => set_once(&mut count, v, KW_RRULE_COUNT, span)?,
            Part::Interval(v) => set_once(&mut interval, v, KW_RRULE_INTERVAL, span)?,
            Part::Wkst(v) => set_once(&mut wkst, v, KW_RRULE_WKST, span)?,
            Part::BySecond(v) => fill_once(&mut by_second, v, KW_RRULE_BYSECOND, span)?,
            Part::ByMinute(v) => fill_once(&mut by_minute, v, KW_RRULE_BYMINUTE, span)?,
            Part::ByHour(v) => fill_once(&mut by_hour, v, KW_RRULE_BYHOUR, span)?,
            Part::ByDay(v) => fill_once(&mut by_day, v, KW_RRULE_BYDAY, span)?,
            Part::ByMonthDay(v) => fill_once(&mut by_month_day, v, KW_RRULE_BYMONTHDAY, span)?,
            Part::ByYearDay(v) => fill_once(&mut by_year_day, v, KW_RRULE_BYYEARDAY, span)?,
            Part::ByWeekNo(v) => fill_once(&mut by_week_no, v, KW_RRULE_BYWEEKNO, span)?,
            Part::ByMonth(v) => fill_once(&mut by_month, v, KW_RRULE_BYMONTH, span)?,
            Part::BySetPos(v) => fill_once(&mut by_set_pos, v, KW_RRULE_BYSETPOS, span)?,
        }
    }

    let Some(freq) = freq else {
        return Err(Rich::custom(span, "missing required FREQ part"));
    };
    if until.is_some() && count.is_some() {
        return Err(Rich::custom(span, "UNTIL and COUNT are mutually exclusive"));
    }

    Ok(RecurrenceRule {
        freq,
        until,
        count,
        interval,
        by_second,
        by_minute,
        by_hour,
        by_day,
        by_month_day,
        by_year_day,
        by_week_no,
        by_month,
        by_set_pos,
        wkst,
    })
}

fn set_once<'src, T>(
    slot: &mut Option<T>,
    value: T,
    part: &'static str,
    span: SimpleSpan,
) -> Result<(), Rich<'src, char>> {
    if slot.is_some() {
        return Err(Rich::custom(span, format!("duplicate {part} part")));
    }
    *slot = Some(value);
    Ok(())
}

fn fill_once<'src, T>(
    slot: &mut Vec<T>,
    value: Vec<T>,
    part: &'static str,
    span: SimpleSpan,
) -> Result<(), Rich<'src, char>> {
    if !slot.is_empty() {
        return Err(Rich::custom(span, format!("duplicate {part} part")));
    }
    *slot = value;
    Ok(())
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn recur_rule_part<'src>() -> impl Parser<'src, &'src str, Part, Extra<'src>> {
    let kw = |kw: &'static str| just(kw).ignore_then(just('='));

    choice((
        kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq),
        kw(KW_RRULE_UNTIL)
            .ignore_then(date_or_date_time())
            .map(Part::Until),
        kw(KW_RRULE_COUNT)
            .ignore_then(positive_u32())
            .map(Part::Count),
        kw(KW_RRULE_INTERVAL)
            .ignore_then(positive_u32())
            .map(Part::Interval),
        kw(KW_RRULE_BYSECOND)
            .ignore_then(list(ranged(0, 60, 2, "seconds")))
            .map(|v| Part::BySecond(narrow(v))),
        kw(KW_RRULE_BYMINUTE)
            .ignore_then(list(ranged(0, 59, 2, "minutes")))
            .map(|v| Part::ByMinute(narrow(v))),
        kw(KW_RRULE_BYHOUR)
            .ignore_then(list(ranged(0, 23, 2, "hour")))
            .map(|v| Part::ByHour(narrow(v))),
        kw(KW_RRULE_BYDAY)
            .ignore_then(list(weekdaynum()))
            .map(Part::ByDay),
        kw(KW_RRULE_BYMONTHDAY)
            .ignore_then(list(signed_ranged(1, 31, 2, "month day")))
            .map(|v| Part::ByMonthDay(narrow(v))),
        kw(KW_RRULE_BYYEARDAY)
            .ignore_then(list(signed_ranged(1, 366, 3, "year day")))
            .map(|v| Part::ByYearDay(widen(v))),
        kw(KW_RRULE_BYWEEKNO)
            .ignore_then(list(signed_ranged(1, 53, 2, "week number")))
            .map(|v| Part::ByWeekNo(narrow(v))),
        kw(KW_RRULE_BYMONTH)
            .ignore_then(list(ranged(1, 12, 2, "month")))
            .map(|v| Part::ByMonth(narrow(v))),
        kw(KW_RRULE_BYSETPOS)
            .ignore_then(list(signed_ranged(1, 366, 3, "set position")))
            .map(|v| Part::BySetPos(widen(v))),
        kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst),
    ))
}

fn narrow(values: Vec<i32>) -> Vec<i8> {
    values.into_iter().map(|v| v as i8).collect()
}

fn widen(values: Vec<i32>) -> Vec<i16> {
    values.into_iter().map(|v| v as i16).collect()
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src>() -> impl Parser<'src, &'src str, Frequency, Extra<'src>> {
    choice((
        just(KW_RRULE_FREQ_SECONDLY).to(Frequency::Secondly),
        just(KW_RRULE_FREQ_MINUTELY).to(Frequency::Minutely),
        just(KW_RRULE_FREQ_HOURLY).to(Frequency::Hourly),
        just(KW_RRULE_FREQ_DAILY).to(Frequency::Daily),
        just(KW_RRULE_FREQ_WEEKLY).to(Frequency::Weekly),
        just(KW_RRULE_FREQ_MONTHLY).to(Frequency::Monthly),
        just(KW_RRULE_FREQ_YEARLY).to(Frequency::Yearly),
    ))
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn weekdaynum<'src>() -> impl Parser<'src, &'src str, WeekDayNum, Extra<'src>> {
    signed_ranged(1, 53, 2, "weekday ordinal")
        .or_not()
        .then(weekday())
        .map(|(ordinal, day)| WeekDayNum {
            ordinal: ordinal.unwrap_or(0) as i8,
            day,
        })
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src>() -> impl Parser<'src, &'src str, WeekDay, Extra<'src>> {
    choice((
        just(KW_DAY_SU).to(WeekDay::Sunday),
        just(KW_DAY_MO).to(WeekDay::Monday),
        just(KW_DAY_TU).to(WeekDay::Tuesday),
        just(KW_DAY_WE).to(WeekDay::Wednesday),
        just(KW_DAY_TH).to(WeekDay::Thursday),
        just(KW_DAY_FR).to(WeekDay::Friday),
        just(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}

/// Positive integer (COUNT and INTERVAL reject zero).
fn positive_u32<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> {
    digits(10).try_map(|v, span| {
        if v > 0 {
            Ok(v as u32)
        } else {
            Err(Rich::custom(span, "expected a positive integer"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<RecurrenceRule, ParseError> {
        RecurrenceRule::parse(src)
    }

    #[test]
    fn parses_rrule_freq_only() {
        let freqs = [
            ("FREQ=SECONDLY", Frequency::Secondly),
            ("FREQ=MINUTELY", Frequency::Minutely),
            ("FREQ=HOURLY", Frequency::Hourly),
            ("FREQ=DAILY", Frequency::Daily),
            ("FREQ=WEEKLY", Frequency::Weekly),
            ("FREQ=MONTHLY", Frequency::Monthly),
            ("FREQ=YEARLY", Frequency::Yearly),
        ];

        for (src, expected) in freqs {
            let rule = parse(src).unwrap();
            assert_eq!(rule.freq, expected, "failed for {src}");
            assert!(rule.until.is_none());
            assert!(rule.count.is_none());
            assert!(rule.interval.is_none());
        }
    }

    #[test]
    fn parses_rrule_with_interval_and_count() {
        let rule = parse("FREQ=DAILY;INTERVAL=2;COUNT=10").unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
        assert_eq!(rule.interval, Some(2));
        assert_eq!(rule.count, Some(10));
    }

    #[test]
    fn parses_rrule_with_until_date_time() {
        let rule = parse("FREQ=WEEKLY;UNTIL=19971224T000000Z").unwrap();
        let Some(DateOrDateTime::DateTime(dt)) = rule.until else {
            panic!("expected a date-time UNTIL");
        };
        assert_eq!(
            (dt.date.year, dt.date.month, dt.date.day),
            (1997, 12, 24)
        );
        assert!(dt.time.utc);
    }

    #[test]
    fn parses_rrule_with_until_date() {
        let rule = parse("FREQ=WEEKLY;UNTIL=19971007").unwrap();
        let Some(DateOrDateTime::Date(d)) = rule.until else {
            panic!("expected a date UNTIL");
        };
        assert_eq!((d.year, d.month, d.day), (1997, 10, 7));
    }

    #[test]
    fn parses_rrule_with_byday_ordinals() {
        let rule = parse("FREQ=MONTHLY;BYDAY=1MO,-1FR,WE").unwrap();
        assert_eq!(
            rule.by_day,
            vec![
                WeekDayNum {
                    ordinal: 1,
                    day: WeekDay::Monday
                },
                WeekDayNum {
                    ordinal: -1,
                    day: WeekDay::Friday
                },
                WeekDayNum {
                    ordinal: 0,
                    day: WeekDay::Wednesday
                },
            ]
        );
    }

    #[test]
    fn parses_rrule_with_signed_lists() {
        let rule = parse("FREQ=MONTHLY;BYMONTHDAY=1,15,-1").unwrap();
        assert_eq!(rule.by_month_day, vec![1, 15, -1]);

        let rule = parse("FREQ=YEARLY;BYYEARDAY=1,100,-306").unwrap();
        assert_eq!(rule.by_year_day, vec![1, 100, -306]);

        let rule = parse("FREQ=YEARLY;BYWEEKNO=20,-1").unwrap();
        assert_eq!(rule.by_week_no, vec![20, -1]);
    }

    #[test]
    fn parses_rrule_with_bysetpos_and_wkst() {
        let rule = parse("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1;WKST=SU").unwrap();
        assert_eq!(rule.by_set_pos, vec![-1]);
        assert_eq!(rule.wkst, Some(WeekDay::Sunday));
    }

    #[test]
    fn parses_rrule_handles_reordered_parts() {
        let rule = parse("COUNT=10;INTERVAL=2;FREQ=DAILY").unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
        assert_eq!(rule.count, Some(10));
        assert_eq!(rule.interval, Some(2));
    }

    #[test]
    fn rejects_missing_freq() {
        assert!(parse("INTERVAL=2;COUNT=10").is_err());
    }

    #[test]
    fn rejects_until_and_count_together() {
        assert!(parse("FREQ=DAILY;UNTIL=19971224T000000Z;COUNT=10").is_err());
    }

    #[test]
    fn rejects_duplicate_parts() {
        for src in [
            "FREQ=DAILY;FREQ=WEEKLY",
            "FREQ=DAILY;COUNT=10;COUNT=20",
            "FREQ=WEEKLY;BYDAY=MO;BYDAY=FR",
            "FREQ=DAILY;BYHOUR=9;BYHOUR=10",
        ] {
            assert!(parse(src).is_err(), "duplicate part should fail: {src}");
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(parse("FREQ=MONTHLY;BYMONTHDAY=32").is_err());
        assert!(parse("FREQ=YEARLY;BYMONTH=13").is_err());
        assert!(parse("FREQ=DAILY;BYHOUR=24").is_err());
        assert!(parse("FREQ=DAILY;INTERVAL=0").is_err());
    }
}
