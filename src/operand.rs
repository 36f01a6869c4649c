use crate::{AnySet, BitmaskSet, Element, Error, Interval, IntervalSet, Result};
use std::{
	num::NonZeroI64,
	ops::Range,
};

/// Half-open range literal `start..stop` with a step, following the usual
/// slice conventions: `stop` is excluded, a negative step counts down.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RangeLiteral {
	pub start: i64,
	pub stop: i64,
	step: NonZeroI64,
}

impl RangeLiteral {
	pub const fn new(start: i64, stop: i64) -> Self {
		Self {
			start,
			stop,
			step: match NonZeroI64::new(1) {
				Some(one) => one,
				None => unreachable!(),
			},
		}
	}

	pub const fn with_step(self, step: NonZeroI64) -> Self {
		Self { step, ..self }
	}

	pub fn step(&self) -> i64 {
		self.step.get()
	}

	/// Runs of consecutive values described by this literal, in the order the
	/// literal enumerates them.
	///
	/// A step of `1` or `-1` gives at most one run, any other step gives one
	/// singleton per value.
	pub fn runs(&self) -> RangeRuns {
		match self.step.get() {
			1 => RangeRuns::Contiguous(self.stop.checked_sub(1).and_then(|end| Interval::new(self.start, end))),
			-1 => RangeRuns::Contiguous(self.stop.checked_add(1).and_then(|start| Interval::new(start, self.start))),
			step => RangeRuns::Stepped {
				next: Some(self.start),
				stop: self.stop,
				step,
			},
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = i64> {
		self.runs().flatten()
	}
}

impl From<Range<i64>> for RangeLiteral {
	fn from(range: Range<i64>) -> Self {
		Self::new(range.start, range.end)
	}
}

/// Iterator over the runs of a [`RangeLiteral`].
pub enum RangeRuns {
	Contiguous(Option<Interval>),
	Stepped { next: Option<i64>, stop: i64, step: i64 },
}

impl Iterator for RangeRuns {
	type Item = Interval;

	fn next(&mut self) -> Option<Interval> {
		match self {
			Self::Contiguous(run) => run.take(),
			Self::Stepped { next, stop, step } => {
				let (stop, step) = (*stop, *step);
				let value = next.filter(|v| if step > 0 { *v < stop } else { *v > stop })?;
				*next = value.checked_add(step);
				Some(Interval::singleton(value))
			}
		}
	}
}

/// Operand of a set operation.
///
/// Every operation accepting operands matches them exhaustively before
/// dispatching to the representation specific algorithm.
pub enum SetOperand<'a> {
	Integer(i64),
	IntervalMember(&'a IntervalSet),
	BitmaskMember(&'a BitmaskSet),
	/// Arbitrary values, each of which must be an integer.
	GenericIterable(Vec<Box<dyn Element + 'a>>),
	RangeLiteral(RangeLiteral),
}

impl<'a> SetOperand<'a> {
	pub fn iterable<I>(items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Element + 'a,
	{
		items.into_iter().collect()
	}

	/// Feeds the operand to `f` as a sequence of intervals.
	///
	/// Runs are fed in ascending order for every variant but
	/// `GenericIterable` and stepped down `RangeLiteral`s.
	pub(crate) fn for_each_run<F>(&self, container: &'static str, mut f: F) -> Result<()>
	where
		F: FnMut(Interval),
	{
		match self {
			Self::Integer(value) => f(Interval::singleton(*value)),
			Self::IntervalMember(set) => set.intervals().iter().copied().for_each(f),
			Self::BitmaskMember(set) => set.runs().for_each(f),
			Self::GenericIterable(items) => {
				for item in items {
					let value = item
						.to_integer()
						.ok_or_else(|| Error::invalid_element(&**item, container))?;
					f(Interval::singleton(value))
				}
			}
			Self::RangeLiteral(range) => range.runs().for_each(f),
		}

		Ok(())
	}
}

impl<'a, T: Element + 'a> FromIterator<T> for SetOperand<'a> {
	fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
		Self::GenericIterable(
			items
				.into_iter()
				.map(|item| Box::new(item) as Box<dyn Element + 'a>)
				.collect(),
		)
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),*) => {
		$(
			impl<'a> From<$ty> for SetOperand<'a> {
				fn from(value: $ty) -> Self {
					Self::Integer(i64::from(value))
				}
			}
		)*
	};
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl<'a> From<&'a IntervalSet> for SetOperand<'a> {
	fn from(set: &'a IntervalSet) -> Self {
		Self::IntervalMember(set)
	}
}

impl<'a> From<&'a BitmaskSet> for SetOperand<'a> {
	fn from(set: &'a BitmaskSet) -> Self {
		Self::BitmaskMember(set)
	}
}

impl<'a> From<&'a AnySet> for SetOperand<'a> {
	fn from(set: &'a AnySet) -> Self {
		match set {
			AnySet::Interval(set) => Self::IntervalMember(set),
			AnySet::Bitmask(set) => Self::BitmaskMember(set),
		}
	}
}

impl<'a> From<RangeLiteral> for SetOperand<'a> {
	fn from(range: RangeLiteral) -> Self {
		Self::RangeLiteral(range)
	}
}

impl<'a> From<Range<i64>> for SetOperand<'a> {
	fn from(range: Range<i64>) -> Self {
		Self::RangeLiteral(range.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn collect(range: RangeLiteral) -> Vec<i64> {
		range.iter().collect()
	}

	#[test]
	fn range_literal_unit_steps() {
		assert_eq!(collect(RangeLiteral::new(1, 4)), [1, 2, 3]);
		assert_eq!(collect(RangeLiteral::new(4, 1)), Vec::<i64>::new());
		assert_eq!(collect(RangeLiteral::new(4, 4)), Vec::<i64>::new());

		let down = RangeLiteral::new(4, 1).with_step(NonZeroI64::new(-1).unwrap());
		assert_eq!(down.runs().collect::<Vec<_>>(), [Interval::new(2, 4).unwrap()]);
	}

	#[test]
	fn range_literal_steps() {
		let step = |s| NonZeroI64::new(s).unwrap();
		assert_eq!(collect(RangeLiteral::new(0, 10).with_step(step(3))), [0, 3, 6, 9]);
		assert_eq!(collect(RangeLiteral::new(10, 0).with_step(step(-4))), [10, 6, 2]);
		assert_eq!(collect(RangeLiteral::new(0, 10).with_step(step(-2))), Vec::<i64>::new());
		assert_eq!(
			collect(RangeLiteral::new(i64::MAX - 1, i64::MAX).with_step(step(5))),
			[i64::MAX - 1]
		);
	}

	#[test]
	fn generic_iterable_rejects_non_integers() {
		let operand: SetOperand = vec![Box::new(1) as Box<dyn Element>, Box::new("two")]
			.into_iter()
			.collect();
		let mut seen = Vec::new();
		let err = operand
			.for_each_run("IntervalSet", |run| seen.push(run))
			.unwrap_err();

		assert_eq!(seen, [Interval::singleton(1)]);
		assert!(matches!(
			err,
			Error::InvalidElement {
				type_name: "str",
				container: "IntervalSet",
				..
			}
		));
	}
}
