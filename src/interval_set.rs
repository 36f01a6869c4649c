use crate::{
	interval::{ends_before_gap, fmt_runs},
	set::intersect_runs,
	Interval, IntegerSet, Result, SetOperand,
};
use std::{borrow::Cow, fmt, ops::RangeBounds, slice};
use tracing::trace;

/// Set of integers stored as a sorted list of disjoint intervals.
///
/// Intervals are kept in canonical form after every mutation: sorted in
/// ascending order, non-empty, and separated by at least one missing
/// integer. Two adjacent or overlapping intervals are always merged.
///
/// Membership is `O(log k)` and mutation `O(k)` where `k` is the number of
/// intervals, independently of the number of members.
///
/// ```
/// use range_bit_set::{interval_set, IntervalSet};
///
/// let mut set = interval_set![1..4, 15, 20..23];
/// assert_eq!(set.interval_count(), 3);
///
/// set.insert_range(4..15);
/// assert_eq!(set.interval_count(), 2);
/// assert_eq!(set.to_string(), "{1..15, 20..22}");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
	intervals: Vec<Interval>,
}

impl IntervalSet {
	/// Create a new empty set.
	pub const fn new() -> Self {
		Self {
			intervals: Vec::new(),
		}
	}

	pub fn interval_count(&self) -> usize {
		self.intervals.len()
	}

	/// Canonical intervals of the set, in ascending order.
	pub fn intervals(&self) -> &[Interval] {
		&self.intervals
	}

	/// Number of members, saturating at `u64::MAX`.
	pub fn len(&self) -> u64 {
		self.intervals
			.iter()
			.fold(0u64, |len, interval| len.saturating_add(interval.len()))
	}

	pub fn is_empty(&self) -> bool {
		self.intervals.is_empty()
	}

	pub fn first(&self) -> Option<i64> {
		self.intervals.first().map(|interval| interval.start)
	}

	pub fn last(&self) -> Option<i64> {
		self.intervals.last().map(|interval| interval.end)
	}

	pub fn iter(&self) -> Iter {
		Iter {
			intervals: self.intervals.iter(),
			current: None,
		}
	}

	/// Index of the first interval that does not end before `value`.
	fn search(&self, value: i64) -> usize {
		self.intervals.partition_point(|interval| interval.end < value)
	}

	/// Index of the interval containing `value`, if any.
	fn position(&self, value: i64) -> Option<usize> {
		let i = self.search(value);
		match self.intervals.get(i) {
			Some(interval) if interval.start <= value => Some(i),
			_ => None,
		}
	}

	pub fn contains(&self, value: i64) -> bool {
		self.position(value).is_some()
	}

	/// Checks if every integer of `interval` is a member.
	pub fn covers(&self, interval: Interval) -> bool {
		match self.position(interval.start) {
			Some(i) => interval.end <= self.intervals[i].end,
			None => false,
		}
	}

	/// Number of members inside `interval`.
	pub fn count_interval(&self, interval: Interval) -> u64 {
		self.intervals[self.search(interval.start)..]
			.iter()
			.map_while(|i| i.intersection(&interval))
			.fold(0u64, |count, i| count.saturating_add(i.len()))
	}

	/// Adds a value to the set.
	///
	/// Returns whether the value was newly inserted.
	pub fn insert(&mut self, value: i64) -> bool {
		if self.contains(value) {
			false
		} else {
			self.insert_interval(Interval::singleton(value));
			true
		}
	}

	/// Adds every value of the given range to the set.
	pub fn insert_range<R: RangeBounds<i64>>(&mut self, range: R) {
		if let Some(interval) = Interval::from_bounds(&range) {
			self.insert_interval(interval)
		}
	}

	/// Adds every value of `interval` to the set.
	///
	/// The interval is merged with the first stored interval it is connected
	/// to, then every following interval that becomes connected is coalesced
	/// into it.
	pub fn insert_interval(&mut self, interval: Interval) {
		// first interval that does not end strictly before the gap preceding `interval`.
		let i = self
			.intervals
			.partition_point(|stored| ends_before_gap(stored, interval.start));

		match self.intervals.get_mut(i) {
			Some(stored) if stored.connected_to(&interval) => {
				*stored = stored.hull(&interval);
				let merged = *stored;

				let mut j = i + 1;
				let mut end = merged.end;
				while let Some(next) = self.intervals.get(j) {
					if !merged.connected_to(next) {
						break;
					}

					end = end.max(next.end);
					j += 1
				}

				if j > i + 1 {
					trace!(start = merged.start, end, coalesced = j - i - 1, "coalesce intervals");
					self.intervals[i].end = end;
					self.intervals.drain(i + 1..j);
				}
			}
			_ => self.intervals.insert(i, interval),
		}
	}

	/// Removes a value from the set, if present.
	///
	/// Returns whether the value was a member.
	pub fn discard(&mut self, value: i64) -> bool {
		if self.contains(value) {
			self.remove_interval(Interval::singleton(value));
			true
		} else {
			false
		}
	}

	/// Removes every value of the given range from the set.
	pub fn remove_range<R: RangeBounds<i64>>(&mut self, range: R) {
		if let Some(interval) = Interval::from_bounds(&range) {
			self.remove_interval(interval)
		}
	}

	/// Removes every value of `interval` from the set.
	///
	/// The first and last intersected intervals are truncated (or split when
	/// they are the same), the ones in between are deleted.
	pub fn remove_interval(&mut self, interval: Interval) {
		let i = self.search(interval.start);
		let j = self
			.intervals
			.partition_point(|stored| stored.start <= interval.end);

		if i >= j {
			return;
		}

		let (left, _) = self.intervals[i].without(&interval);
		let (_, right) = self.intervals[j - 1].without(&interval);

		if left.is_some() && right.is_some() && i + 1 == j {
			trace!(start = interval.start, end = interval.end, "split interval");
		}

		self.intervals.splice(i..j, left.into_iter().chain(right));
	}

	/// Removes and returns the lowest member.
	pub fn pop_first(&mut self) -> Option<i64> {
		let first = self.intervals.first_mut()?;
		let value = first.start;
		if first.start < first.end {
			first.start += 1
		} else {
			self.intervals.remove(0);
		}

		Some(value)
	}

	pub fn clear(&mut self) {
		self.intervals.clear()
	}

	pub(crate) fn union_with(&mut self, other: &Self) {
		if self.intervals.is_empty() {
			self.intervals.clone_from(&other.intervals)
		} else {
			for interval in &other.intervals {
				self.insert_interval(*interval)
			}
		}
	}

	/// Trims the set to the envelope of `other`, then removes each gap
	/// between two intervals of `other`.
	pub(crate) fn intersect_with(&mut self, other: &Self) {
		intersect_runs(self, other.intervals.iter().copied())
	}

	pub(crate) fn difference_with(&mut self, other: &Self) {
		for interval in &other.intervals {
			if self.intervals.is_empty() {
				break;
			}

			self.remove_interval(*interval)
		}
	}

	/// Replaces the set with `(other - self) | (self - other)`.
	///
	/// `other - self` is computed into a new set before `self` is modified,
	/// so that it never observes a partially updated `self`.
	pub(crate) fn symmetric_difference_with(&mut self, other: &Self) {
		let mut added = other.clone();
		added.difference_with(self);
		self.difference_with(other);
		self.union_with(&added)
	}

	/// Checks that every interval of `self` lies inside a single interval of
	/// `other`.
	pub(crate) fn is_subset_of(&self, other: &Self) -> bool {
		if self.len() > other.len() {
			return false;
		}

		self.intervals.iter().all(|interval| other.covers(*interval))
	}

	pub(crate) fn is_disjoint_from(&self, other: &Self) -> bool {
		let (smaller, larger) = if self.intervals.len() <= other.intervals.len() {
			(self, other)
		} else {
			(other, self)
		};

		smaller.intervals.iter().all(|interval| {
			match larger.intervals.get(larger.search(interval.start)) {
				Some(next) => next.start > interval.end,
				None => true,
			}
		})
	}

	/// Canonical runs of `operand`, borrowed when it is already an
	/// `IntervalSet`.
	///
	/// The cost depends on the number of runs of the operand, not on their
	/// width.
	pub(crate) fn resolve<'a>(operand: &'a SetOperand, container: &'static str) -> Result<Cow<'a, Self>> {
		match operand {
			SetOperand::IntervalMember(set) => Ok(Cow::Borrowed(*set)),
			other => {
				let mut set = Self::new();
				other.for_each_run(container, |interval| set.insert_interval(interval))?;
				Ok(Cow::Owned(set))
			}
		}
	}
}

impl IntegerSet for IntervalSet {
	const NAME: &'static str = "IntervalSet";

	type Iter<'a> = Iter<'a>;
	type Runs<'a> = std::iter::Copied<slice::Iter<'a, Interval>>;

	fn contains(&self, value: i64) -> bool {
		self.contains(value)
	}

	fn covers(&self, interval: Interval) -> bool {
		self.covers(interval)
	}

	fn count_interval(&self, interval: Interval) -> u64 {
		self.count_interval(interval)
	}

	fn len(&self) -> u64 {
		self.len()
	}

	fn iter(&self) -> Iter {
		self.iter()
	}

	fn runs(&self) -> Self::Runs<'_> {
		self.intervals.iter().copied()
	}

	fn first(&self) -> Option<i64> {
		self.first()
	}

	fn insert(&mut self, value: i64) -> bool {
		self.insert(value)
	}

	fn insert_interval(&mut self, interval: Interval) {
		self.insert_interval(interval)
	}

	fn discard(&mut self, value: i64) -> bool {
		self.discard(value)
	}

	fn remove_interval(&mut self, interval: Interval) {
		self.remove_interval(interval)
	}

	fn pop_first(&mut self) -> Option<i64> {
		self.pop_first()
	}

	fn clear(&mut self) {
		self.clear()
	}

	fn update<'o, I>(&mut self, others: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>,
	{
		for other in others {
			let other: SetOperand = other.into();
			match other {
				SetOperand::IntervalMember(set) => self.union_with(set),
				other => other.for_each_run(Self::NAME, |interval| self.insert_interval(interval))?,
			}
		}

		Ok(())
	}

	fn intersection_update<'o, I>(&mut self, others: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>,
	{
		for other in others {
			let other: SetOperand = other.into();
			let other = Self::resolve(&other, Self::NAME)?;
			self.intersect_with(&other)
		}

		Ok(())
	}

	fn difference_update<'o, I>(&mut self, others: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>,
	{
		for other in others {
			let other: SetOperand = other.into();
			match other {
				SetOperand::IntervalMember(set) => self.difference_with(set),
				other => other.for_each_run(Self::NAME, |interval| self.remove_interval(interval))?,
			}
		}

		Ok(())
	}

	fn symmetric_difference_update<'o, O>(&mut self, other: O) -> Result<()>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		let other = Self::resolve(&other, Self::NAME)?;
		self.symmetric_difference_with(&other);
		Ok(())
	}

	fn is_subset<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		match &other {
			SetOperand::BitmaskMember(set) => Ok(self.runs().all(|interval| set.covers(interval))),
			operand => Ok(self.is_subset_of(&*Self::resolve(operand, Self::NAME)?)),
		}
	}

	fn is_superset<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		match &other {
			SetOperand::BitmaskMember(set) => Ok(set.runs().all(|interval| self.covers(interval))),
			operand => Ok(Self::resolve(operand, Self::NAME)?.is_subset_of(self)),
		}
	}

	fn is_disjoint<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		match &other {
			SetOperand::BitmaskMember(set) => Ok(set.runs().all(|interval| self.count_interval(interval) == 0)),
			operand => Ok(self.is_disjoint_from(&*Self::resolve(operand, Self::NAME)?)),
		}
	}
}

impl FromIterator<i64> for IntervalSet {
	fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
		let mut result = Self::new();
		result.extend(iter);
		result
	}
}

impl Extend<i64> for IntervalSet {
	fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
		for value in iter {
			self.insert_interval(Interval::singleton(value))
		}
	}
}

impl From<Interval> for IntervalSet {
	fn from(interval: Interval) -> Self {
		Self {
			intervals: vec![interval],
		}
	}
}

impl<'a> IntoIterator for &'a IntervalSet {
	type Item = i64;
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Iter<'a> {
		self.iter()
	}
}

/// Iterator over the members of an [`IntervalSet`], in ascending order.
#[derive(Clone)]
pub struct Iter<'a> {
	intervals: slice::Iter<'a, Interval>,
	current: Option<crate::interval::IntervalIter>,
}

impl<'a> Iterator for Iter<'a> {
	type Item = i64;

	fn next(&mut self) -> Option<i64> {
		loop {
			if let Some(value) = self.current.as_mut().and_then(Iterator::next) {
				return Some(value);
			}

			self.current = Some(self.intervals.next()?.iter());
		}
	}
}

impl fmt::Display for IntervalSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt_runs(f, self.intervals.iter().copied())
	}
}

impl fmt::Debug for IntervalSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(&self.intervals).finish()
	}
}
