//! Calendar period arithmetic for dashboards and history views.
//!
//! A period is resolved against the studio's local "today" (derived from the
//! configured IANA timezone) into an inclusive [`DateRange`]. Every period
//! also has a previous period used for comparisons on the dashboard.
//!
//! Business days are Monday through Friday. Averages only count business days
//! that have already elapsed, so a month in progress is not diluted by the
//! days still ahead.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Longest accepted custom range, in days (inclusive of both ends).
pub const MAX_CUSTOM_RANGE_DAYS: i64 = 366;

/// Timezone used when settings have not been customised.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

// ---------------------------------------------------------------------------
// Period kinds
// ---------------------------------------------------------------------------

/// Named periods accepted by the `?period=` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Today,
    Yesterday,
    Week,
    LastWeek,
    Month,
    LastMonth,
    Custom,
}

/// First day of the studio's week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn as_str(self) -> &'static str {
        match self {
            WeekStart::Monday => "monday",
            WeekStart::Sunday => "sunday",
        }
    }

    /// Parse the value stored in `system_settings.week_start`.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "monday" => Ok(WeekStart::Monday),
            "sunday" => Ok(WeekStart::Sunday),
            other => Err(format!(
                "Invalid week start '{other}'. Must be one of: monday, sunday"
            )),
        }
    }

    /// Days between the start of the week and `day`.
    fn offset(self, day: Weekday) -> i64 {
        match self {
            WeekStart::Monday => i64::from(day.num_days_from_monday()),
            WeekStart::Sunday => i64::from(day.num_days_from_sunday()),
        }
    }
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!(
                "Range start {start} must not be after range end {end}"
            ));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Number of days in the range, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Iterate every date in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.num_days() as usize)
    }

    /// The part of the range that is not in the future relative to `today`.
    ///
    /// Returns `None` when the whole range lies after `today`.
    pub fn elapsed(&self, today: NaiveDate) -> Option<DateRange> {
        if today < self.start {
            return None;
        }
        Some(DateRange {
            start: self.start,
            end: self.end.min(today),
        })
    }

    /// The window of the same length ending the day before `start`.
    pub fn shift_back(&self) -> DateRange {
        let end = self.start - Duration::days(1);
        let start = end - Duration::days(self.num_days() - 1);
        DateRange { start, end }
    }
}

// ---------------------------------------------------------------------------
// Calendar bounds
// ---------------------------------------------------------------------------

/// The week containing `day`.
pub fn week_bounds(day: NaiveDate, week_start: WeekStart) -> DateRange {
    let start = day - Duration::days(week_start.offset(day.weekday()));
    DateRange {
        start,
        end: start + Duration::days(6),
    }
}

/// The calendar month containing `day`.
pub fn month_bounds(day: NaiveDate) -> DateRange {
    let start = day - Duration::days(i64::from(day.day0()));
    let end = start
        .checked_add_months(Months::new(1))
        .map_or(NaiveDate::MAX, |next| next - Duration::days(1));
    DateRange { start, end }
}

/// Format the `YYYY-MM` key of the month containing `day`.
pub fn month_key(day: NaiveDate) -> String {
    format!("{:04}-{:02}", day.year(), day.month())
}

/// Parse a `YYYY-MM` month key into the full-month range.
pub fn parse_month(key: &str) -> Result<DateRange, String> {
    let invalid = || format!("Invalid month '{key}'. Expected format YYYY-MM");

    let well_formed = key.len() == 7
        && key
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(invalid());
    }
    let first =
        NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
    Ok(month_bounds(first))
}

// ---------------------------------------------------------------------------
// Timezone
// ---------------------------------------------------------------------------

/// Parse an IANA timezone name such as `America/Sao_Paulo`.
pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("Unknown timezone '{name}'"))
}

/// The calendar date at `now` in the studio's timezone.
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

// ---------------------------------------------------------------------------
// Business days
// ---------------------------------------------------------------------------

pub fn is_business_day(day: NaiveDate) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count Monday-to-Friday dates in the range.
pub fn business_days(range: &DateRange) -> i64 {
    range.days().filter(|d| is_business_day(*d)).count() as i64
}

/// Business days of `range` that are on or before `today`.
pub fn elapsed_business_days(range: &DateRange, today: NaiveDate) -> i64 {
    range
        .elapsed(today)
        .map(|r| business_days(&r))
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// A period resolved to concrete dates, with its comparison window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedPeriod {
    pub kind: PeriodKind,
    pub range: DateRange,
    pub previous: DateRange,
}

/// Resolve a period against the studio's local `today`.
///
/// `custom_start` and `custom_end` are only read for [`PeriodKind::Custom`],
/// where both are required and the span is capped at
/// [`MAX_CUSTOM_RANGE_DAYS`].
pub fn resolve(
    kind: PeriodKind,
    today: NaiveDate,
    week_start: WeekStart,
    custom_start: Option<NaiveDate>,
    custom_end: Option<NaiveDate>,
) -> Result<ResolvedPeriod, String> {
    let range = match kind {
        PeriodKind::Today => DateRange::single(today),
        PeriodKind::Yesterday => DateRange::single(today - Duration::days(1)),
        PeriodKind::Week => week_bounds(today, week_start),
        PeriodKind::LastWeek => week_bounds(today - Duration::days(7), week_start),
        PeriodKind::Month => month_bounds(today),
        PeriodKind::LastMonth => month_bounds(month_bounds(today).start - Duration::days(1)),
        PeriodKind::Custom => {
            let (start, end) = match (custom_start, custom_end) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(
                        "A custom period requires both 'start' and 'end' dates".to_string()
                    )
                }
            };
            let range = DateRange::new(start, end)?;
            if range.num_days() > MAX_CUSTOM_RANGE_DAYS {
                return Err(format!(
                    "Custom period cannot exceed {MAX_CUSTOM_RANGE_DAYS} days"
                ));
            }
            range
        }
    };

    Ok(ResolvedPeriod {
        kind,
        range,
        previous: previous_range(kind, &range, week_start),
    })
}

/// The comparison window for a resolved range.
///
/// Calendar periods compare against the previous calendar unit (so a month
/// compares against the whole previous month even when lengths differ);
/// custom ranges compare against the same-length window just before.
pub fn previous_range(kind: PeriodKind, range: &DateRange, week_start: WeekStart) -> DateRange {
    match kind {
        PeriodKind::Today | PeriodKind::Yesterday => {
            DateRange::single(range.start - Duration::days(1))
        }
        PeriodKind::Week | PeriodKind::LastWeek => {
            week_bounds(range.start - Duration::days(7), week_start)
        }
        PeriodKind::Month | PeriodKind::LastMonth => {
            month_bounds(range.start - Duration::days(1))
        }
        PeriodKind::Custom => range.shift_back(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
