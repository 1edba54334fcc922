//! Ovulation window derivation.
//!
//! Ovulation is assumed to fall a fixed luteal phase (14 days) before the next
//! period; the window spans two days either side of that day.

use chrono::{NaiveDate, TimeDelta};

use crate::domain::OvulationWindow;

/// Days between ovulation and the next period start.
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Half-width of the window around the ovulation estimate.
pub const WINDOW_HALF_WIDTH_DAYS: i64 = 2;

/// Window for a projected next period. `None` if the dates leave the calendar range.
pub fn ovulation_window(next_period: NaiveDate) -> Option<OvulationWindow> {
    let start = next_period.checked_sub_signed(TimeDelta::try_days(LUTEAL_PHASE_DAYS + WINDOW_HALF_WIDTH_DAYS)?)?;
    let end = next_period.checked_sub_signed(TimeDelta::try_days(LUTEAL_PHASE_DAYS - WINDOW_HALF_WIDTH_DAYS)?)?;
    Some(OvulationWindow { start, end })
}
