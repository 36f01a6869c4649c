//! Set algebra operators.
use crate::{set::intersect_runs, BitmaskSet, IntegerSet, IntervalSet};
use std::ops::{
	BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign,
};

macro_rules! impl_set_ops {
	($($ty:ty),*) => {
		$(
			impl BitOr for &$ty {
				type Output = $ty;

				fn bitor(self, rhs: Self) -> $ty {
					let mut result = self.clone();
					result.union_with(rhs);
					result
				}
			}

			impl BitOrAssign<&$ty> for $ty {
				fn bitor_assign(&mut self, rhs: &$ty) {
					self.union_with(rhs)
				}
			}

			impl BitAnd for &$ty {
				type Output = $ty;

				fn bitand(self, rhs: Self) -> $ty {
					let mut result = self.clone();
					result.intersect_with(rhs);
					result
				}
			}

			impl BitAndAssign<&$ty> for $ty {
				fn bitand_assign(&mut self, rhs: &$ty) {
					self.intersect_with(rhs)
				}
			}

			impl Sub for &$ty {
				type Output = $ty;

				fn sub(self, rhs: Self) -> $ty {
					let mut result = self.clone();
					result.difference_with(rhs);
					result
				}
			}

			impl SubAssign<&$ty> for $ty {
				fn sub_assign(&mut self, rhs: &$ty) {
					self.difference_with(rhs)
				}
			}

			impl BitXor for &$ty {
				type Output = $ty;

				fn bitxor(self, rhs: Self) -> $ty {
					let mut result = self.clone();
					result.symmetric_difference_with(rhs);
					result
				}
			}

			impl BitXorAssign<&$ty> for $ty {
				fn bitxor_assign(&mut self, rhs: &$ty) {
					self.symmetric_difference_with(rhs)
				}
			}
		)*
	};
}

impl_set_ops!(IntervalSet, BitmaskSet);

/// Operators between the two representations. The result has the type of
/// the left operand.
macro_rules! impl_cross_set_ops {
	($(($lhs:ty, $rhs:ty)),*) => {
		$(
			impl BitOr<&$rhs> for &$lhs {
				type Output = $lhs;

				fn bitor(self, rhs: &$rhs) -> $lhs {
					let mut result = self.clone();
					result |= rhs;
					result
				}
			}

			impl BitOrAssign<&$rhs> for $lhs {
				fn bitor_assign(&mut self, rhs: &$rhs) {
					for run in rhs.runs() {
						self.insert_interval(run)
					}
				}
			}

			impl BitAnd<&$rhs> for &$lhs {
				type Output = $lhs;

				fn bitand(self, rhs: &$rhs) -> $lhs {
					let mut result = self.clone();
					result &= rhs;
					result
				}
			}

			impl BitAndAssign<&$rhs> for $lhs {
				fn bitand_assign(&mut self, rhs: &$rhs) {
					intersect_runs(self, rhs.runs())
				}
			}

			impl Sub<&$rhs> for &$lhs {
				type Output = $lhs;

				fn sub(self, rhs: &$rhs) -> $lhs {
					let mut result = self.clone();
					result -= rhs;
					result
				}
			}

			impl SubAssign<&$rhs> for $lhs {
				fn sub_assign(&mut self, rhs: &$rhs) {
					for run in rhs.runs() {
						if self.is_empty() {
							break;
						}

						self.remove_interval(run)
					}
				}
			}

			impl BitXor<&$rhs> for &$lhs {
				type Output = $lhs;

				fn bitxor(self, rhs: &$rhs) -> $lhs {
					let mut result = self.clone();
					result ^= rhs;
					result
				}
			}

			impl BitXorAssign<&$rhs> for $lhs {
				fn bitxor_assign(&mut self, rhs: &$rhs) {
					let mut other = <$lhs>::new();
					for run in rhs.runs() {
						other.insert_interval(run)
					}

					self.symmetric_difference_with(&other)
				}
			}
		)*
	};
}

impl_cross_set_ops!((IntervalSet, BitmaskSet), (BitmaskSet, IntervalSet));

#[cfg(test)]
mod tests {
	use crate::{BitmaskSet, Interval, IntervalSet};

	fn intervals<I: IntoIterator<Item = i64>>(values: I) -> IntervalSet {
		values.into_iter().collect()
	}

	fn bitmask<I: IntoIterator<Item = i64>>(values: I) -> BitmaskSet {
		values.into_iter().collect()
	}

	#[test]
	fn interval_operators() {
		let a = intervals(0..10);
		let b = intervals(5..15);

		assert_eq!(&a | &b, intervals(0..15));
		assert_eq!(&a & &b, intervals(5..10));
		assert_eq!(&a - &b, intervals(0..5));
		assert_eq!(&a ^ &b, intervals((0..5).chain(10..15)));

		let mut c = a.clone();
		c ^= &b;
		c -= &intervals([0, 14]);
		assert_eq!(c, intervals((1..5).chain(10..14)));
	}

	#[test]
	fn bitmask_operators() {
		let a = bitmask(50..130);
		let b = bitmask(120..200);

		assert_eq!(&a | &b, bitmask(50..200));
		assert_eq!(&a & &b, bitmask(120..130));
		assert_eq!(&a - &b, bitmask(50..120));
		assert_eq!(&a ^ &b, bitmask((50..120).chain(130..200)));

		let mut c = a.clone();
		c &= &b;
		c |= &bitmask([-1]);
		assert_eq!(c.iter().next(), Some(-1));
		assert_eq!(c.len(), 11);
	}

	#[test]
	fn mixed_operators() {
		let a = intervals(0..100);
		let b = bitmask((50..150).chain([-7]));

		assert_eq!(&a | &b, intervals((0..150).chain([-7])));
		assert_eq!(&b | &a, bitmask((0..150).chain([-7])));
		assert_eq!(&a & &b, intervals(50..100));
		assert_eq!(&b & &a, bitmask(50..100));
		assert_eq!(&a - &b, intervals(0..50));
		assert_eq!(&b - &a, bitmask((100..150).chain([-7])));
		assert_eq!(&a ^ &b, intervals((0..50).chain(100..150).chain([-7])));
		assert_eq!(&b ^ &a, bitmask((0..50).chain(100..150).chain([-7])));

		let mut c = bitmask([3, 500]);
		c &= &IntervalSet::from(Interval::new(0, i64::MAX).unwrap());
		assert_eq!(c, bitmask([3, 500]));
		c -= &IntervalSet::from(Interval::new(i64::MIN, 100).unwrap());
		assert_eq!(c, bitmask([500]));
	}
}
