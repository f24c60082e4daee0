//! Trailing one-month date window used for transaction listing.

// crates.io
use time::error::ComponentRange;
// self
use crate::_prelude::*;

/// Inclusive `[start, end]` date range sent to the transaction listing endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionWindow {
	/// First day of the window.
	pub start: Date,
	/// Last day of the window.
	pub end: Date,
}
impl TransactionWindow {
	/// Window ending on `today` and starting one calendar month earlier.
	///
	/// The day of month is clamped to the length of the previous month, so 2024-03-31 starts on
	/// 2024-02-29 and 2023-03-31 starts on 2023-02-28.
	pub fn trailing_month(today: Date) -> Result<Self, ComponentRange> {
		Ok(Self { start: previous_month(today)?, end: today })
	}
}

fn previous_month(date: Date) -> Result<Date, ComponentRange> {
	let (year, month) = match date.month() {
		Month::January => (date.year() - 1, Month::December),
		month => (date.year(), month.previous()),
	};
	let day = date.day().min(month.length(year));

	Date::from_calendar_date(year, month, day)
}
