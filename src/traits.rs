//! Implementations of the [`cc_traits`] collection traits, so that both
//! sets can be used by code generic over collections.
use crate::{BitmaskSet, IntervalSet};
use cc_traits::{Clear, Collection, Insert, Len, Remove};

macro_rules! impl_collection_traits {
	($($ty:ty),*) => {
		$(
			impl Collection for $ty {
				type Item = i64;
			}

			impl Len for $ty {
				/// Number of members, saturating at `usize::MAX`.
				fn len(&self) -> usize {
					usize::try_from(<$ty>::len(self)).unwrap_or(usize::MAX)
				}

				fn is_empty(&self) -> bool {
					<$ty>::is_empty(self)
				}
			}

			impl Insert for $ty {
				type Output = bool;

				fn insert(&mut self, value: i64) -> bool {
					<$ty>::insert(self, value)
				}
			}

			impl<'a> Remove<&'a i64> for $ty {
				fn remove(&mut self, value: &'a i64) -> Option<i64> {
					<$ty>::discard(self, *value).then_some(*value)
				}
			}

			impl Clear for $ty {
				fn clear(&mut self) {
					<$ty>::clear(self)
				}
			}
		)*
	};
}

impl_collection_traits!(IntervalSet, BitmaskSet);

#[cfg(test)]
mod tests {
	use super::*;

	fn fill<S>(set: &mut S, values: &[i64]) -> usize
	where
		S: Insert<Item = i64, Output = bool>,
	{
		values.iter().filter(|v| set.insert(**v)).count()
	}

	fn drain_odd<S>(set: &mut S, values: &[i64]) -> Vec<i64>
	where
		S: for<'a> Remove<&'a i64, Item = i64>,
	{
		values
			.iter()
			.filter(|v| *v % 2 != 0)
			.filter_map(|v| set.remove(v))
			.collect()
	}

	fn check<S>()
	where
		S: Default
			+ Len
			+ Clear
			+ Insert<Item = i64, Output = bool>
			+ for<'a> Remove<&'a i64, Item = i64>,
	{
		let mut set = S::default();
		assert_eq!(fill(&mut set, &[3, 1, 4, 1, 5, 9, 2, 6]), 7);
		assert_eq!(Len::len(&set), 7);
		assert_eq!(drain_odd(&mut set, &[1, 3, 7]), [1, 3]);
		assert_eq!(Len::len(&set), 5);
		Clear::clear(&mut set);
		assert!(Len::is_empty(&set));
	}

	#[test]
	fn interval_set_collection() {
		check::<IntervalSet>()
	}

	#[test]
	fn bitmask_set_collection() {
		check::<BitmaskSet>()
	}
}
