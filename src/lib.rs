//! Dynamic sets of `i64` integers, with two interchangeable representations.
//!
//! An [`IntervalSet`] stores its members as a sorted list of disjoint,
//! non-adjacent intervals. It is compact for sets made of long runs of
//! consecutive integers.
//! A [`BitmaskSet`] stores its members as bitmasks of
//! [`BITS_PER_BUCKET`] integers, kept in a
//! [`btree-slab`](https://crates.io/crates/btree-slab) B-tree. It is compact
//! for dense sets without long runs.
//!
//! ## Usage
//!
//! Both types implement the [`IntegerSet`] trait and behave similarly to
//! the standard `BTreeSet<i64>`.
//!
//! ```
//! use range_bit_set::{interval_set, IntervalSet};
//!
//! let mut set = interval_set![1..4, 15, 20..23];
//! set.insert_range(4..15);
//! assert_eq!(set.interval_count(), 2);
//! assert_eq!(set.to_string(), "{1..15, 20..22}");
//! assert!(set.contains(12));
//! assert!(!set.contains(19));
//! ```
//!
//! Members can be iterated in ascending order whatever the representation:
//!
//! ```
//! use range_bit_set::BitmaskSet;
//!
//! let set: BitmaskSet = [70, 1, 200, 62].into_iter().collect();
//! assert_eq!(set.iter().collect::<Vec<_>>(), [1, 62, 70, 200]);
//! ```
//!
//! ## Set algebra
//!
//! Algebra operations of the [`IntegerSet`] trait accept any number of
//! [`SetOperand`]s: integers, sets of either representation, range
//! literals, or arbitrary values that must all be integers.
//!
//! ```
//! use range_bit_set::{BitmaskSet, Error, IntegerSet, IntervalSet, SetOperand};
//!
//! let a: IntervalSet = (0..100).collect();
//! let b: BitmaskSet = (50..150).collect();
//!
//! let c = a.intersection([&b])?;
//! assert_eq!(c.len(), 50);
//! assert_eq!(c, b.intersection([&a])?);
//!
//! let d = a.union([SetOperand::Integer(200), SetOperand::from(300..303)])?;
//! assert_eq!(d.len(), 104);
//!
//! let err = a.union([SetOperand::iterable(["five"])]).unwrap_err();
//! assert!(matches!(err, Error::InvalidElement { .. }));
//! # Ok::<(), Error>(())
//! ```
//!
//! Two sets can also be combined with the `|`, `&`, `-` and `^`
//! operators, whatever their representations. The result has the type of
//! the left operand.
//!
//! ```
//! use range_bit_set::{bitmask_set, interval_set};
//!
//! let a = interval_set![0..10];
//! let b = bitmask_set![8, 9, 10, 11];
//! assert_eq!(&a | &b, interval_set![0..12]);
//! assert_eq!(&b - &a, bitmask_set![10, 11]);
//! ```
//!
//! ## Comparison
//!
//! Sets are compared by members, including across representations.
//! `PartialOrd` implements the subset order.
//!
//! ```
//! use range_bit_set::{bitmask_set, interval_set};
//!
//! let a = interval_set![1..4];
//! let b = bitmask_set![1, 2, 3];
//! assert_eq!(a, b);
//! assert!(interval_set![1, 3] < b);
//! assert_eq!(interval_set![0].partial_cmp(&b), None);
//! ```
pub mod bitmask;
mod element;
mod error;
mod interval;
pub mod interval_set;
mod macros;
mod operand;
mod ops;
mod set;
mod traits;

#[cfg(feature = "serde")]
mod serde;

pub use bitmask::{BitmaskSet, BITS_PER_BUCKET};
pub use element::Element;
pub use error::{format_invalid_type, Error, Result};
pub use interval::{Interval, IntervalIter};
pub use interval_set::IntervalSet;
pub use operand::{RangeLiteral, RangeRuns, SetOperand};
pub use set::{hash_runs, AnySet, IntegerSet};
