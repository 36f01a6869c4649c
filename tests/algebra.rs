use range_bit_set::{
	bitmask_set, interval_set, BitmaskSet, Element, Error, IntegerSet, Interval, IntervalSet,
	RangeLiteral, SetOperand,
};
use std::num::NonZeroI64;

#[test]
fn difference_with_single_member() {
	let full: IntervalSet = (1..11).collect();
	let set = full.difference([&interval_set![5]]).unwrap();

	assert_eq!(set.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 6, 7, 8, 9, 10]);
	assert_eq!(set.len(), 9);
	assert_ne!(set, full);
	assert_eq!(full.len(), 10);
}

#[test]
fn intersection_agrees_across_representations() {
	let expected: IntervalSet = (5..11).collect();

	let a: IntervalSet = (1..11).collect();
	let b: IntervalSet = (5..16).collect();
	assert_eq!(a.intersection([&b]).unwrap(), expected);

	let a: BitmaskSet = (1..11).collect();
	let b: BitmaskSet = (5..16).collect();
	assert_eq!(a.intersection([&b]).unwrap(), expected);

	let mixed = interval_set![1..11].intersection([&bitmask_set![5..16]]).unwrap();
	assert_eq!(mixed, expected);
}

#[test]
fn subsets() {
	let small = interval_set![1, 2, 3];
	let large = interval_set![1, 2, 3, 4, 5];

	assert!(small.is_subset(&large).unwrap());
	assert!(!large.is_subset(&small).unwrap());
	assert!(large.is_superset(&small).unwrap());
	assert!(small.is_subset(&bitmask_set![0..10]).unwrap());
	assert!(bitmask_set![2, 3].is_subset(&small).unwrap());
	assert!(!bitmask_set![2, 30].is_subset(&small).unwrap());
	assert!(small.is_subset(RangeLiteral::new(1, 4)).unwrap());
	assert!(small.is_superset(SetOperand::iterable([1u8, 3])).unwrap());
}

#[test]
fn disjoint() {
	let a = interval_set![0..10, 20..30];
	let b = bitmask_set![10..20, 30];

	assert!(a.is_disjoint(&b).unwrap());
	assert!(b.is_disjoint(&a).unwrap());
	assert!(!a.is_disjoint(SetOperand::Integer(25)).unwrap());
	assert!(a.is_disjoint(IntervalSet::new().iter().collect::<SetOperand>()).unwrap());
}

#[test]
fn symmetric_difference() {
	let a = interval_set![0..10];
	let b = bitmask_set![5..15];

	let c = a.symmetric_difference(&b).unwrap();
	assert_eq!(c, interval_set![0..5, 10..15]);

	let d = b.symmetric_difference(&a).unwrap();
	assert_eq!(c, d);

	let mut e = a.clone();
	e.symmetric_difference_update(&a.clone()).unwrap();
	assert!(e.is_empty());
}

#[test]
fn update_with_many_operands() {
	let mut set = BitmaskSet::new();
	let block = interval_set![100..105];
	let operands: Vec<SetOperand> = vec![
		SetOperand::Integer(-7),
		(&block).into(),
		RangeLiteral::new(10, 0)
			.with_step(NonZeroI64::new(-3).unwrap())
			.into(),
		SetOperand::iterable(vec![42u64, 43]),
	];

	set.update(operands).unwrap();

	assert_eq!(
		set.iter().collect::<Vec<_>>(),
		[-7, 1, 4, 7, 10, 42, 43, 100, 101, 102, 103, 104]
	);
}

#[test]
fn invalid_operand_keeps_earlier_operands() {
	let mut set = IntervalSet::new();
	let err = set
		.update([
			SetOperand::Integer(1),
			SetOperand::iterable(vec![
				Box::new(2) as Box<dyn Element>,
				Box::new(2.5f64) as Box<dyn Element>,
				Box::new(3) as Box<dyn Element>,
			]),
			SetOperand::Integer(4),
		])
		.unwrap_err();

	assert_eq!(set, interval_set![1, 2]);
	assert_eq!(
		err.to_string(),
		"unsupported value 2.5 of type `f64` for a `IntervalSet`, must be an integer"
	);
	assert!(matches!(
		err,
		Error::InvalidElement {
			type_name: "f64",
			container: "IntervalSet",
			..
		}
	));
}

#[test]
fn non_integer_operands_are_rejected_everywhere() {
	let set = bitmask_set![1..4];
	let strings = || SetOperand::iterable(["a"]);

	assert!(set.union([strings()]).is_err());
	assert!(set.intersection([strings()]).is_err());
	assert!(set.difference([strings()]).is_err());
	assert!(set.symmetric_difference(strings()).is_err());
	assert!(set.is_subset(strings()).is_err());
	assert!(set.is_superset(strings()).is_err());
	assert!(set.is_disjoint(strings()).is_err());
	assert!(set.count(strings()).is_err());
	assert!(BitmaskSet::from_operands([strings()]).is_err());
	assert_eq!(set.len(), 3);
}

#[test]
fn count() {
	let a = interval_set![0..100];
	let b = bitmask_set![0..100];

	assert_eq!(a.count(&bitmask_set![50..150]).unwrap(), 50);
	assert_eq!(b.count(&interval_set![50..150]).unwrap(), 50);
	assert_eq!(a.count(SetOperand::Integer(5)).unwrap(), 1);
	assert_eq!(b.count(SetOperand::Integer(500)).unwrap(), 0);
	assert_eq!(a.count(RangeLiteral::new(-10, 10)).unwrap(), 10);
	assert_eq!(b.count(SetOperand::iterable([1, 1, 2, 200])).unwrap(), 3);
}

#[test]
fn from_operands() {
	let a = IntervalSet::from_operands([RangeLiteral::new(1, 4), RangeLiteral::new(20, 23)]).unwrap();
	let b = BitmaskSet::from_operands([&a]).unwrap();

	assert_eq!(a, b);
	assert_eq!(b.to_string(), "{1..3, 20..22}");
}

#[test]
fn wide_operands_on_bitmask_sets() {
	let set = bitmask_set![5, -3, 1000];
	let everything = IntervalSet::from(Interval::new(i64::MIN, i64::MAX).unwrap());

	assert_eq!(
		bitmask_set![5].intersection([RangeLiteral::new(0, i64::MAX)]).unwrap(),
		bitmask_set![5]
	);
	assert_eq!(
		set.intersection([RangeLiteral::new(i64::MIN, 0)]).unwrap(),
		bitmask_set![-3]
	);
	assert_eq!(set.intersection([&everything]).unwrap(), set);
	assert_eq!(
		set.intersection([&interval_set![-10..10], &everything]).unwrap(),
		bitmask_set![5, -3]
	);

	assert!(set.is_subset(RangeLiteral::new(i64::MIN, i64::MAX)).unwrap());
	assert!(set.is_subset(&everything).unwrap());
	assert!(!set.is_subset(RangeLiteral::new(0, i64::MAX)).unwrap());
	assert!(!set.is_superset(RangeLiteral::new(0, i64::MAX)).unwrap());
	assert!(set.is_superset(RangeLiteral::new(5, 6)).unwrap());
	assert!(!set.is_disjoint(RangeLiteral::new(0, i64::MAX)).unwrap());
	assert!(set.is_disjoint(RangeLiteral::new(1001, i64::MAX)).unwrap());

	assert_eq!(set.count(RangeLiteral::new(i64::MIN, i64::MAX)).unwrap(), 3);
	assert_eq!(
		set.difference([RangeLiteral::new(-(1 << 60), 1 << 60)]).unwrap(),
		BitmaskSet::new()
	);
	assert!(set.difference([&everything]).unwrap().is_empty());
}

fn primes_until<S: IntegerSet>(limit: i64) -> S {
	let mut sieve = S::from_operands([RangeLiteral::new(2, limit + 1)]).unwrap();
	let mut p = 2;
	while p * p <= limit {
		if sieve.contains(p) {
			let multiples = RangeLiteral::new(p * p, limit + 1).with_step(NonZeroI64::new(p).unwrap());
			sieve.difference_update([multiples]).unwrap();
		}
		p += 1;
	}
	sieve
}

#[test]
fn prime_sieve() {
	let a: IntervalSet = primes_until(100);
	let b: BitmaskSet = primes_until(100);

	assert_eq!(a, b);
	assert_eq!(a.len(), 25);
	assert_eq!(
		b.iter().take(10).collect::<Vec<_>>(),
		[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
	);
	assert_eq!(IntegerSet::len(&primes_until::<BitmaskSet>(1000)), 168);
}
