use crate::{
	interval::fmt_runs, set::intersect_runs, Interval, IntegerSet, IntervalSet, Result,
	SetOperand,
};
use btree_slab::generic::{
	map::{self, BTreeMap},
	Node,
};
use std::{borrow::Cow, fmt, iter::Peekable, ops::RangeBounds};
use tracing::trace;

/// Number of consecutive integers stored in each bucket.
pub const BITS_PER_BUCKET: u32 = 62;

const WIDTH: i64 = BITS_PER_BUCKET as i64;

pub type DefaultBucketContainer = slab::Slab<Node<i64, u64>>;

type Buckets = BTreeMap<i64, u64, DefaultBucketContainer>;

/// Bucket index and bit offset of `value`.
fn locate(value: i64) -> (i64, u32) {
	(value.div_euclid(WIDTH), value.rem_euclid(WIDTH) as u32)
}

/// Value stored at `bit` in `bucket`.
///
/// The lowest bucket starts below `i64::MIN`, wrapping arithmetic gives the
/// right value for every bit that is in range.
fn value_of(bucket: i64, bit: u32) -> i64 {
	bucket.wrapping_mul(WIDTH).wrapping_add(i64::from(bit))
}

/// Checks that `mask` is a non-empty bucket mask whose bits all map to
/// values in range.
pub(crate) fn is_valid_bucket(bucket: i64, mask: u64) -> bool {
	mask != 0
		&& mask >> BITS_PER_BUCKET == 0
		&& [mask.trailing_zeros(), 63 - mask.leading_zeros()]
			.into_iter()
			.all(|bit| locate(value_of(bucket, bit)) == (bucket, bit))
}

/// Mask with the bits `lo..=hi` set.
fn span_mask(lo: u32, hi: u32) -> u64 {
	(u64::MAX >> (63 - (hi - lo))) << lo
}

/// Set of integers stored as bitmasks.
///
/// Values are grouped in buckets of [`BITS_PER_BUCKET`] consecutive
/// integers. Each non-empty bucket is stored as a bitmask in a B-tree,
/// indexed by `value div 62`. Empty buckets are never stored.
///
/// ```
/// use range_bit_set::BitmaskSet;
///
/// let mut set = BitmaskSet::new();
/// for value in [70, 1, 200, 62] {
/// 	set.insert(value);
/// }
///
/// assert_eq!(set.iter().collect::<Vec<_>>(), [1, 62, 70, 200]);
/// assert_eq!(set.bucket_count(), 3);
/// ```
#[derive(Clone)]
pub struct BitmaskSet {
	buckets: Buckets,
}

impl Default for BitmaskSet {
	fn default() -> Self {
		Self::new()
	}
}

impl BitmaskSet {
	/// Create a new empty set.
	pub fn new() -> Self {
		Self {
			buckets: BTreeMap::new(),
		}
	}

	pub fn bucket_count(&self) -> usize {
		self.buckets.len()
	}

	fn mask(&self, bucket: i64) -> u64 {
		self.buckets.get(&bucket).copied().unwrap_or(0)
	}

	/// Replaces the mask of a bucket, removing the bucket if `mask` is zero.
	fn set_mask(&mut self, bucket: i64, mask: u64) {
		if mask == 0 {
			self.buckets.remove(&bucket);
		} else {
			match self.buckets.get_mut(&bucket) {
				Some(stored) => *stored = mask,
				None => {
					self.buckets.insert(bucket, mask);
				}
			}
		}
	}

	/// Part of `interval` lying in `bucket`, as a mask.
	///
	/// The bucket must overlap `interval`.
	fn clip(bucket: i64, interval: Interval) -> u64 {
		let (first, lo) = locate(interval.start);
		let (last, hi) = locate(interval.end);
		let lo = if bucket == first { lo } else { 0 };
		let hi = if bucket == last { hi } else { BITS_PER_BUCKET - 1 };
		span_mask(lo, hi)
	}

	/// Calls `f` with the bucket and mask of every part of `interval`.
	fn for_each_span(interval: Interval, mut f: impl FnMut(i64, u64)) {
		let (first, lo) = locate(interval.start);
		let (last, hi) = locate(interval.end);
		let top = BITS_PER_BUCKET - 1;

		if first == last {
			f(first, span_mask(lo, hi))
		} else {
			f(first, span_mask(lo, top));
			for bucket in first + 1..last {
				f(bucket, span_mask(0, top))
			}
			f(last, span_mask(0, hi))
		}
	}

	/// Number of members.
	pub fn len(&self) -> u64 {
		self.buckets
			.iter()
			.map(|(_, mask)| u64::from(mask.count_ones()))
			.sum()
	}

	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	pub fn first(&self) -> Option<i64> {
		self.buckets
			.iter()
			.next()
			.map(|(bucket, mask)| value_of(*bucket, mask.trailing_zeros()))
	}

	pub fn iter(&self) -> Iter {
		Iter {
			buckets: self.buckets.iter(),
			bucket: 0,
			mask: 0,
		}
	}

	/// Maximal runs of consecutive members, in ascending order.
	pub fn runs(&self) -> Runs {
		Runs {
			members: self.iter().peekable(),
		}
	}

	pub fn contains(&self, value: i64) -> bool {
		let (bucket, bit) = locate(value);
		self.mask(bucket) & (1 << bit) != 0
	}

	/// Checks if every integer of `interval` is a member.
	///
	/// Only the stored buckets overlapping `interval` are visited.
	pub fn covers(&self, interval: Interval) -> bool {
		let (first, _) = locate(interval.start);
		let (last, _) = locate(interval.end);

		let mut expected = first;
		for (bucket, mask) in self.buckets.range(first..=last) {
			let span = Self::clip(*bucket, interval);
			if *bucket != expected || mask & span != span {
				return false;
			}

			expected += 1
		}

		expected > last
	}

	/// Number of members inside `interval`.
	pub fn count_interval(&self, interval: Interval) -> u64 {
		let (first, _) = locate(interval.start);
		let (last, _) = locate(interval.end);
		self.buckets
			.range(first..=last)
			.map(|(bucket, mask)| u64::from((mask & Self::clip(*bucket, interval)).count_ones()))
			.sum()
	}

	/// Adds a value to the set.
	///
	/// Returns whether the value was newly inserted.
	pub fn insert(&mut self, value: i64) -> bool {
		let (bucket, bit) = locate(value);
		let mask = self.mask(bucket);
		let updated = mask | (1 << bit);
		self.set_mask(bucket, updated);
		updated != mask
	}

	/// Adds every value of the given range to the set.
	pub fn insert_range<R: RangeBounds<i64>>(&mut self, range: R) {
		if let Some(interval) = Interval::from_bounds(&range) {
			self.insert_interval(interval)
		}
	}

	/// Adds every value of `interval` to the set, one bucket at a time.
	pub fn insert_interval(&mut self, interval: Interval) {
		Self::for_each_span(interval, |bucket, span| {
			let mask = self.mask(bucket);
			self.set_mask(bucket, mask | span)
		})
	}

	/// Removes a value from the set, if present.
	///
	/// Returns whether the value was a member.
	pub fn discard(&mut self, value: i64) -> bool {
		let (bucket, bit) = locate(value);
		let mask = self.mask(bucket);
		let updated = mask & !(1 << bit);
		if updated != mask {
			self.set_mask(bucket, updated);
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
	/// Only the stored buckets overlapping `interval` are visited.
	pub fn remove_interval(&mut self, interval: Interval) {
		let (first, _) = locate(interval.start);
		let (last, _) = locate(interval.end);
		let touched: Vec<(i64, u64)> = self
			.buckets
			.range(first..=last)
			.map(|(bucket, mask)| (*bucket, *mask))
			.collect();

		for (bucket, mask) in touched {
			self.set_mask(bucket, mask & !Self::clip(bucket, interval))
		}
	}

	/// Removes and returns the lowest member.
	pub fn pop_first(&mut self) -> Option<i64> {
		let (bucket, mask) = self
			.buckets
			.iter()
			.next()
			.map(|(bucket, mask)| (*bucket, *mask))?;
		let bit = mask.trailing_zeros();
		self.set_mask(bucket, mask & (mask - 1));
		Some(value_of(bucket, bit))
	}

	pub fn clear(&mut self) {
		self.buckets.clear()
	}

	/// Stored buckets and their masks, in ascending bucket order.
	pub(crate) fn buckets(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
		self.buckets.iter().map(|(bucket, mask)| (*bucket, *mask))
	}

	/// Adds the members of `mask` to `bucket`.
	pub(crate) fn merge_bucket(&mut self, bucket: i64, mask: u64) {
		let stored = self.mask(bucket);
		self.set_mask(bucket, stored | mask)
	}

	pub(crate) fn union_with(&mut self, other: &Self) {
		for (bucket, mask) in other.buckets.iter() {
			match self.buckets.get_mut(bucket) {
				Some(stored) => *stored |= mask,
				None => {
					trace!(bucket, "create bucket");
					self.buckets.insert(*bucket, *mask);
				}
			}
		}
	}

	pub(crate) fn intersect_with(&mut self, other: &Self) {
		for (bucket, mask) in self.buckets().collect::<Vec<_>>() {
			let kept = mask & other.mask(bucket);
			if kept != mask {
				if kept == 0 {
					trace!(bucket, "drop bucket");
				}

				self.set_mask(bucket, kept)
			}
		}
	}

	pub(crate) fn difference_with(&mut self, other: &Self) {
		for (bucket, mask) in other.buckets.iter() {
			let stored = self.mask(*bucket);
			if stored & mask != 0 {
				let kept = stored & !mask;
				if kept == 0 {
					trace!(bucket, "drop bucket");
				}

				self.set_mask(*bucket, kept)
			}
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

	pub(crate) fn is_subset_of(&self, other: &Self) -> bool {
		self.buckets.len() <= other.buckets.len()
			&& self
				.buckets
				.iter()
				.all(|(bucket, mask)| other.mask(*bucket) & mask == *mask)
	}

	pub(crate) fn is_disjoint_from(&self, other: &Self) -> bool {
		let (smaller, larger) = if self.buckets.len() <= other.buckets.len() {
			(self, other)
		} else {
			(other, self)
		};

		smaller
			.buckets
			.iter()
			.all(|(bucket, mask)| larger.mask(*bucket) & mask == 0)
	}

	fn resolve<'a>(operand: &'a SetOperand) -> Result<Cow<'a, Self>> {
		match operand {
			SetOperand::BitmaskMember(set) => Ok(Cow::Borrowed(*set)),
			other => {
				let mut set = Self::new();
				other.for_each_run(Self::NAME, |interval| set.insert_interval(interval))?;
				Ok(Cow::Owned(set))
			}
		}
	}
}

impl IntegerSet for BitmaskSet {
	const NAME: &'static str = "BitmaskSet";

	type Iter<'a> = Iter<'a>;
	type Runs<'a> = Runs<'a>;

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

	fn runs(&self) -> Runs {
		self.runs()
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
				SetOperand::BitmaskMember(set) => self.union_with(set),
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
			match &other {
				SetOperand::BitmaskMember(set) => self.intersect_with(set),
				operand => {
					let runs = IntervalSet::resolve(operand, Self::NAME)?;
					intersect_runs(self, runs.intervals().iter().copied())
				}
			}
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
				SetOperand::BitmaskMember(set) => self.difference_with(set),
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
		let other = Self::resolve(&other)?;
		self.symmetric_difference_with(&other);
		Ok(())
	}

	fn is_subset<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		match &other {
			SetOperand::BitmaskMember(set) => Ok(self.is_subset_of(set)),
			operand => {
				let runs = IntervalSet::resolve(operand, Self::NAME)?;
				Ok(self.runs().all(|interval| runs.covers(interval)))
			}
		}
	}

	fn is_superset<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		match &other {
			SetOperand::BitmaskMember(set) => Ok(set.is_subset_of(self)),
			operand => {
				let runs = IntervalSet::resolve(operand, Self::NAME)?;
				Ok(runs.intervals().iter().all(|interval| self.covers(*interval)))
			}
		}
	}

	fn is_disjoint<'o, O>(&self, other: O) -> Result<bool>
	where
		O: Into<SetOperand<'o>>,
	{
		let other: SetOperand = other.into();
		match &other {
			SetOperand::BitmaskMember(set) => Ok(self.is_disjoint_from(set)),
			operand => {
				let runs = IntervalSet::resolve(operand, Self::NAME)?;
				Ok(self.runs().all(|interval| runs.count_interval(interval) == 0))
			}
		}
	}
}

impl PartialEq for BitmaskSet {
	fn eq(&self, other: &Self) -> bool {
		self.buckets.len() == other.buckets.len()
			&& self
				.buckets
				.iter()
				.zip(other.buckets.iter())
				.all(|(a, b)| a == b)
	}
}

impl Eq for BitmaskSet {}

impl FromIterator<i64> for BitmaskSet {
	fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
		let mut result = Self::new();
		result.extend(iter);
		result
	}
}

impl Extend<i64> for BitmaskSet {
	fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
		for value in iter {
			self.insert(value);
		}
	}
}

impl From<Interval> for BitmaskSet {
	fn from(interval: Interval) -> Self {
		let mut result = Self::new();
		result.insert_interval(interval);
		result
	}
}

impl<'a> IntoIterator for &'a BitmaskSet {
	type Item = i64;
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Iter<'a> {
		self.iter()
	}
}

/// Iterator over the members of a [`BitmaskSet`], in ascending order.
pub struct Iter<'a> {
	buckets: map::Iter<'a, i64, u64, DefaultBucketContainer>,
	bucket: i64,
	mask: u64,
}

impl<'a> Iterator for Iter<'a> {
	type Item = i64;

	fn next(&mut self) -> Option<i64> {
		while self.mask == 0 {
			let (bucket, mask) = self.buckets.next()?;
			self.bucket = *bucket;
			self.mask = *mask;
		}

		let bit = self.mask.trailing_zeros();
		self.mask &= self.mask - 1;
		Some(value_of(self.bucket, bit))
	}
}

/// Iterator over the maximal runs of consecutive members of a
/// [`BitmaskSet`].
pub struct Runs<'a> {
	members: Peekable<Iter<'a>>,
}

impl<'a> Iterator for Runs<'a> {
	type Item = Interval;

	fn next(&mut self) -> Option<Interval> {
		let start = self.members.next()?;
		let mut end = start;
		while let Some(next) = self.members.next_if(|next| end.checked_add(1) == Some(*next)) {
			end = next
		}

		Some(Interval { start, end })
	}
}

impl fmt::Display for BitmaskSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt_runs(f, self.runs())
	}
}

impl fmt::Debug for BitmaskSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map()
			.entries(
				self.buckets
					.iter()
					.map(|(bucket, mask)| (bucket, format!("{mask:#064b}"))),
			)
			.finish()
	}
}
