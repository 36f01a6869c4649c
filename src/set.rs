use crate::{BitmaskSet, Error, Interval, IntervalSet, Result, SetOperand};
use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
};

/// Operations shared by every integer set representation.
///
/// Both [`IntervalSet`] and [`BitmaskSet`] implement this trait and agree
/// on the result of every operation, whatever the representation of the
/// operands.
///
/// Algebra operations accept any number of [`SetOperand`]s. Operands are
/// processed in order: when one of them is invalid, the error is returned
/// and the operands before it stay applied.
pub trait IntegerSet: Clone + Default {
	/// Type name reported in errors.
	const NAME: &'static str;

	type Iter<'a>: Iterator<Item = i64>
	where
		Self: 'a;

	type Runs<'a>: Iterator<Item = Interval>
	where
		Self: 'a;

	fn contains(&self, value: i64) -> bool;

	/// Checks if every integer of `interval` is a member.
	fn covers(&self, interval: Interval) -> bool;

	/// Number of members inside `interval`.
	fn count_interval(&self, interval: Interval) -> u64;

	/// Number of members, saturating at `u64::MAX`.
	fn len(&self) -> u64;

	fn is_empty(&self) -> bool {
		self.first().is_none()
	}

	/// Members in ascending order.
	fn iter(&self) -> Self::Iter<'_>;

	/// Maximal runs of consecutive members, in ascending order.
	fn runs(&self) -> Self::Runs<'_>;

	/// Lowest member.
	fn first(&self) -> Option<i64>;

	fn insert(&mut self, value: i64) -> bool;

	fn insert_interval(&mut self, interval: Interval);

	fn discard(&mut self, value: i64) -> bool;

	fn remove_interval(&mut self, interval: Interval);

	fn pop_first(&mut self) -> Option<i64>;

	fn clear(&mut self);

	/// Removes a member.
	///
	/// Fails with [`Error::MissingElement`] if `value` is not a member.
	fn remove(&mut self, value: i64) -> Result<()> {
		if self.discard(value) {
			Ok(())
		} else {
			Err(Error::missing(value))
		}
	}

	/// Removes and returns the lowest member.
	///
	/// Fails with [`Error::MissingElement`] if the set is empty.
	fn pop(&mut self) -> Result<i64> {
		self.pop_first().ok_or_else(Error::empty)
	}

	/// Builds a set from any number of operands.
	fn from_operands<'o, I>(operands: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>,
	{
		let mut result = Self::default();
		result.update(operands)?;
		Ok(result)
	}

	/// Adds the members of every operand.
	fn update<'o, I>(&mut self, others: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>;

	/// Keeps only the members found in every operand.
	fn intersection_update<'o, I>(&mut self, others: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>;

	/// Removes the members of every operand.
	fn difference_update<'o, I>(&mut self, others: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>;

	/// Keeps the members found either in `self` or in `other`, but not both.
	///
	/// The members of `other` missing from `self` are collected before `self`
	/// is modified.
	fn symmetric_difference_update<'o, O>(&mut self, other: O) -> Result<()>
	where
		O: Into<SetOperand<'o>>;

	fn union<'o, I>(&self, others: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>,
	{
		let mut result = self.clone();
		result.update(others)?;
		Ok(result)
	}

	fn intersection<'o, I>(&self, others: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>,
	{
		let mut result = self.clone();
		result.intersection_update(others)?;
		Ok(result)
	}

	fn difference<'o, I>(&self, others: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<SetOperand<'o>>,
	{
		let mut result = self.clone();
		result.difference_update(others)?;
		Ok(result)
	}

	fn symmetric_difference<'o, O>(&self, other: O) -> Result<Self>
	where
		O: Into<SetOperand<'o>>,
	{
		let mut result = self.clone();
		result.symmetric_difference_update(other)?;
		Ok(result)
	}

	/// Checks if every member of `self` is in `other`.
	fn is_subset<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>;

	/// Checks if every member of `other` is in `self`.
	fn is_superset<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>;

	/// Checks if `self` and `other` have no member in common.
	fn is_disjoint<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>;

	/// Number of values of `other` that are members of `self`.
	///
	/// Values of a `GenericIterable` are counted as many times as they
	/// appear in it.
	fn count<'o, O>(&self, other: O) -> Result<u64>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		let mut count = 0u64;
		other.for_each_run(Self::NAME, |interval| {
			count = count.saturating_add(self.count_interval(interval))
		})?;
		Ok(count)
	}
}

/// Hashes a set through its canonical runs.
///
/// Every representation hashes with this function, so that two sets with the
/// same members have the same hash.
pub fn hash_runs<I, H>(runs: I, state: &mut H)
where
	I: IntoIterator<Item = Interval>,
	H: Hasher,
{
	let mut count = 0usize;
	for run in runs {
		run.start.hash(state);
		run.end.hash(state);
		count += 1
	}

	state.write_usize(count)
}

/// Keeps only the members of `set` lying inside `runs`.
///
/// `runs` must be ascending and disjoint. The envelope of `runs` and each gap
/// between two runs are removed from `set`, so the cost depends on the
/// number of runs and on the stored representation of `set`, never on the
/// width of the runs.
pub(crate) fn intersect_runs<S, I>(set: &mut S, runs: I)
where
	S: IntegerSet,
	I: IntoIterator<Item = Interval>,
{
	// start of the next gap, `None` once past `i64::MAX`.
	let mut gap_start = Some(i64::MIN);
	for run in runs {
		if set.is_empty() {
			return;
		}

		let gap = gap_start
			.zip(run.start.checked_sub(1))
			.and_then(|(start, end)| Interval::new(start, end));
		if let Some(gap) = gap {
			set.remove_interval(gap)
		}

		gap_start = run.end.checked_add(1)
	}

	if let Some(gap) = gap_start.and_then(|start| Interval::new(start, i64::MAX)) {
		set.remove_interval(gap)
	}
}

fn runs_subset<A: IntegerSet, B: IntegerSet>(a: &A, b: &B) -> bool {
	a.runs().all(|run| b.covers(run))
}

/// Subset partial order of two sets.
fn subset_cmp<A: IntegerSet, B: IntegerSet>(a: &A, b: &B) -> Option<Ordering> {
	match a.len().cmp(&b.len()) {
		Ordering::Equal => a.runs().eq(b.runs()).then_some(Ordering::Equal),
		Ordering::Less => runs_subset(a, b).then_some(Ordering::Less),
		Ordering::Greater => runs_subset(b, a).then_some(Ordering::Greater),
	}
}

impl Hash for IntervalSet {
	fn hash<H: Hasher>(&self, state: &mut H) {
		hash_runs(self.runs(), state)
	}
}

impl Hash for BitmaskSet {
	fn hash<H: Hasher>(&self, state: &mut H) {
		hash_runs(self.runs(), state)
	}
}

impl PartialOrd for IntervalSet {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match self.len().cmp(&other.len()) {
			Ordering::Equal => (self == other).then_some(Ordering::Equal),
			Ordering::Less => self.is_subset_of(other).then_some(Ordering::Less),
			Ordering::Greater => other.is_subset_of(self).then_some(Ordering::Greater),
		}
	}
}

impl PartialOrd for BitmaskSet {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match self.len().cmp(&other.len()) {
			Ordering::Equal => (self == other).then_some(Ordering::Equal),
			Ordering::Less => self.is_subset_of(other).then_some(Ordering::Less),
			Ordering::Greater => other.is_subset_of(self).then_some(Ordering::Greater),
		}
	}
}

impl PartialEq<BitmaskSet> for IntervalSet {
	fn eq(&self, other: &BitmaskSet) -> bool {
		self.runs().eq(other.runs())
	}
}

impl PartialEq<IntervalSet> for BitmaskSet {
	fn eq(&self, other: &IntervalSet) -> bool {
		self.runs().eq(other.runs())
	}
}

impl PartialOrd<BitmaskSet> for IntervalSet {
	fn partial_cmp(&self, other: &BitmaskSet) -> Option<Ordering> {
		subset_cmp(self, other)
	}
}

impl PartialOrd<IntervalSet> for BitmaskSet {
	fn partial_cmp(&self, other: &IntervalSet) -> Option<Ordering> {
		subset_cmp(self, other)
	}
}

/// Integer set of either representation.
///
/// Equality, ordering and hashing only depend on the members, so sets of
/// both representations can be mixed in one hash-based collection.
#[derive(Clone, Debug)]
pub enum AnySet {
	Interval(IntervalSet),
	Bitmask(BitmaskSet),
}

impl AnySet {
	pub fn len(&self) -> u64 {
		match self {
			Self::Interval(set) => set.len(),
			Self::Bitmask(set) => set.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Self::Interval(set) => set.is_empty(),
			Self::Bitmask(set) => set.is_empty(),
		}
	}

	pub fn contains(&self, value: i64) -> bool {
		match self {
			Self::Interval(set) => set.contains(value),
			Self::Bitmask(set) => set.contains(value),
		}
	}

	/// Members in ascending order.
	pub fn iter(&self) -> Box<dyn Iterator<Item = i64> + '_> {
		match self {
			Self::Interval(set) => Box::new(set.iter()),
			Self::Bitmask(set) => Box::new(set.iter()),
		}
	}
}

impl From<IntervalSet> for AnySet {
	fn from(set: IntervalSet) -> Self {
		Self::Interval(set)
	}
}

impl From<BitmaskSet> for AnySet {
	fn from(set: BitmaskSet) -> Self {
		Self::Bitmask(set)
	}
}

impl PartialEq for AnySet {
	fn eq(&self, other: &Self) -> bool {
		self.partial_cmp(other) == Some(Ordering::Equal)
	}
}

impl Eq for AnySet {}

impl PartialOrd for AnySet {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Self::Interval(a), Self::Interval(b)) => a.partial_cmp(b),
			(Self::Interval(a), Self::Bitmask(b)) => a.partial_cmp(b),
			(Self::Bitmask(a), Self::Interval(b)) => a.partial_cmp(b),
			(Self::Bitmask(a), Self::Bitmask(b)) => a.partial_cmp(b),
		}
	}
}

impl Hash for AnySet {
	fn hash<H: Hasher>(&self, state: &mut H) {
		match self {
			Self::Interval(set) => set.hash(state),
			Self::Bitmask(set) => set.hash(state),
		}
	}
}
