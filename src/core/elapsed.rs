//! Calendar-correct elapsed time between two instants.
//!
//! Years and months follow the calendar (an anniversary is reached on the
//! same month/day/time-of-day), everything below a month is a fixed-length
//! duration counted from the last anniversary.

use crate::domain::model::{ElapsedBreakdown, Instant};
use crate::utils::error::{AgeError, Result};
use chrono::{Datelike, Months, NaiveDate, TimeDelta, Timelike};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Breaks `reference - origin` down into years, months, days, hours,
/// minutes and seconds.
///
/// Fails with [`AgeError::InvalidInput`] when `origin` is later than
/// `reference`. Sub-second parts of both instants are ignored.
pub fn compute(reference: Instant, origin: Instant) -> Result<ElapsedBreakdown> {
    let reference = truncate_subsec(reference);
    let origin = truncate_subsec(origin);

    if origin > reference {
        return Err(AgeError::invalid_input(format!(
            "origin {} is later than reference {}",
            origin, reference
        )));
    }

    let mut years = reference.year() - origin.year();
    if (reference.month(), reference.day(), reference.time())
        < (origin.month(), origin.day(), origin.time())
    {
        years -= 1;
    }

    let mut months = reference.month() as i32 - origin.month() as i32;
    if (reference.day(), reference.time()) < (origin.day(), origin.time()) {
        months -= 1;
    }
    if months < 0 {
        months += 12;
    }

    // 月底生日被夾到較短月份的最後一天時，那一天就算已滿週年
    let total_months = years * 12 + months;
    let next = total_months + 1;
    if anniversary(origin, next / 12, (next % 12) as u32).is_ok_and(|t| t <= reference) {
        years = next / 12;
        months = next % 12;
    }

    let last_anniversary = anniversary(origin, years, months as u32)?;
    let remainder = reference.signed_duration_since(last_anniversary).num_seconds();
    if remainder < 0 {
        return Err(AgeError::invalid_input(format!(
            "anniversary {} falls after reference {}",
            last_anniversary, reference
        )));
    }

    let breakdown = ElapsedBreakdown {
        years: years as u32,
        months: months as u32,
        days: (remainder / SECONDS_PER_DAY) as u64,
        hours: ((remainder % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u32,
        minutes: ((remainder % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32,
        seconds: (remainder % SECONDS_PER_MINUTE) as u32,
    };
    tracing::trace!(%origin, %reference, ?breakdown, "computed elapsed breakdown");
    Ok(breakdown)
}

/// `origin` moved forward by whole years and months, keeping its time of day.
/// Days missing from the target month clamp to its last day (Jan 31 + 1 month
/// is Feb 28 or 29).
pub fn anniversary(origin: Instant, years: i32, months: u32) -> Result<Instant> {
    let mut year = origin.year() + years;
    let mut month = origin.month() + months;
    if month > 12 {
        month -= 12;
        year += 1;
    }

    let out_of_range = || {
        AgeError::invalid_input(format!(
            "anniversary {:04}-{:02} of {} is outside the supported calendar",
            year, month, origin
        ))
    };

    let last_day = days_in_month(year, month).ok_or_else(out_of_range)?;
    let date = NaiveDate::from_ymd_opt(year, month, origin.day().min(last_day))
        .ok_or_else(out_of_range)?;
    Ok(date.and_time(origin.time()))
}

/// Number of days in `month` of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month.checked_add(1)?)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

/// Inverse of [`compute`]: calendar-adds the years and months (with the same
/// day clamping), then adds the rest as a fixed duration.
pub fn add_breakdown(origin: Instant, breakdown: &ElapsedBreakdown) -> Option<Instant> {
    let total_months = breakdown.years.checked_mul(12)?.checked_add(breakdown.months)?;
    let anniversary = truncate_subsec(origin).checked_add_months(Months::new(total_months))?;
    anniversary.checked_add_signed(TimeDelta::try_seconds(breakdown.sub_month_seconds())?)
}

fn truncate_subsec(instant: Instant) -> Instant {
    instant.with_nanosecond(0).unwrap_or(instant)
}
