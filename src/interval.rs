use range_traits::PartialEnum;
use std::{
	fmt,
	ops::{Bound, RangeBounds, RangeInclusive},
};

/// Closed interval of integers `start..=end`.
///
/// Intervals are never empty: `start <= end` always holds. The only public
/// constructors are [`Interval::new`], [`Interval::singleton`] and
/// [`Interval::from_bounds`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
	pub(crate) start: i64,
	pub(crate) end: i64,
}

impl Interval {
	/// Creates the interval `start..=end`.
	///
	/// Returns `None` if `start > end`.
	pub const fn new(start: i64, end: i64) -> Option<Self> {
		if start <= end {
			Some(Self { start, end })
		} else {
			None
		}
	}

	pub const fn singleton(value: i64) -> Self {
		Self {
			start: value,
			end: value,
		}
	}

	pub const fn start(&self) -> i64 {
		self.start
	}

	pub const fn end(&self) -> i64 {
		self.end
	}

	/// Converts any range of `i64` into an interval.
	///
	/// Returns `None` if the range is empty.
	pub fn from_bounds<R: RangeBounds<i64>>(range: &R) -> Option<Self> {
		let start = match range.start_bound() {
			Bound::Included(s) => *s,
			Bound::Excluded(s) => s.succ()?,
			Bound::Unbounded => i64::MIN,
		};

		let end = match range.end_bound() {
			Bound::Included(e) => *e,
			Bound::Excluded(e) => e.pred()?,
			Bound::Unbounded => i64::MAX,
		};

		Self::new(start, end)
	}

	/// Number of integers in the interval, saturating at `u64::MAX`.
	#[allow(clippy::len_without_is_empty)]
	pub fn len(&self) -> u64 {
		(self.end.wrapping_sub(self.start) as u64).saturating_add(1)
	}

	pub fn contains(&self, value: i64) -> bool {
		self.start <= value && value <= self.end
	}

	pub fn includes(&self, other: &Self) -> bool {
		self.start <= other.start && other.end <= self.end
	}

	pub fn intersects(&self, other: &Self) -> bool {
		self.start <= other.end && other.start <= self.end
	}

	/// Checks if the two intervals overlap or touch, so that their union is an
	/// interval.
	pub fn connected_to(&self, other: &Self) -> bool {
		!ends_before_gap(self, other.start) && !ends_before_gap(other, self.start)
	}

	pub fn intersection(&self, other: &Self) -> Option<Self> {
		Self::new(self.start.max(other.start), self.end.min(other.end))
	}

	/// Smallest interval containing both intervals.
	pub fn hull(&self, other: &Self) -> Self {
		Self {
			start: self.start.min(other.start),
			end: self.end.max(other.end),
		}
	}

	/// Parts of `self` left after removing `other`, below and above it.
	pub fn without(&self, other: &Self) -> (Option<Self>, Option<Self>) {
		let left = other
			.start
			.pred()
			.and_then(|e| Self::new(self.start, e.min(self.end)));
		let right = other
			.end
			.succ()
			.and_then(|s| Self::new(s.max(self.start), self.end));
		(left, right)
	}

	pub fn iter(&self) -> IntervalIter {
		IntervalIter {
			next: Some(self.start),
			end: self.end,
		}
	}
}

/// Checks if `interval` ends at least one missing integer before `value`.
pub(crate) fn ends_before_gap(interval: &Interval, value: i64) -> bool {
	match interval.end.succ() {
		Some(next) => next < value,
		None => false,
	}
}

impl From<Interval> for RangeInclusive<i64> {
	fn from(interval: Interval) -> Self {
		interval.start..=interval.end
	}
}

impl RangeBounds<i64> for Interval {
	fn start_bound(&self) -> Bound<&i64> {
		Bound::Included(&self.start)
	}

	fn end_bound(&self) -> Bound<&i64> {
		Bound::Included(&self.end)
	}
}

impl IntoIterator for Interval {
	type Item = i64;
	type IntoIter = IntervalIter;

	fn into_iter(self) -> IntervalIter {
		self.iter()
	}
}

/// Iterator over the integers of an interval, in ascending order.
#[derive(Clone)]
pub struct IntervalIter {
	next: Option<i64>,
	end: i64,
}

impl Iterator for IntervalIter {
	type Item = i64;

	fn next(&mut self) -> Option<i64> {
		let value = self.next.filter(|v| *v <= self.end)?;
		self.next = value.succ();
		Some(value)
	}
}

impl fmt::Debug for Interval {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}..={}", self.start, self.end)
	}
}

/// `a`, `a, b` for two consecutive values, `a..b` otherwise.
impl fmt::Display for Interval {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.start == self.end {
			write!(f, "{}", self.start)
		} else if self.start.succ() == Some(self.end) {
			write!(f, "{}, {}", self.start, self.end)
		} else {
			write!(f, "{}..{}", self.start, self.end)
		}
	}
}

/// Writes a sequence of runs as `{1..3, 15, 20, 21}`.
pub(crate) fn fmt_runs<I: IntoIterator<Item = Interval>>(
	f: &mut fmt::Formatter,
	runs: I,
) -> fmt::Result {
	write!(f, "{{")?;
	for (i, run) in runs.into_iter().enumerate() {
		if i > 0 {
			write!(f, ", ")?;
		}
		write!(f, "{run}")?;
	}
	write!(f, "}}")
}
