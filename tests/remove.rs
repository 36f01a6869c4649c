use range_bit_set::{bitmask_set, interval_set, Error, IntegerSet, Interval};

#[test]
fn remove_range() {
	let mut set = interval_set![0..10];

	set.remove_range(1..9);

	assert_eq!(set.interval_count(), 2);
	assert!(set.contains(0));
	assert!(!set.contains(1));
	assert!(!set.contains(8));
	assert!(set.contains(9));
	assert!(!set.contains(10));
}

#[test]
fn remove_range_across_intervals() {
	let mut set = interval_set![0..5, 10..15, 20..25, 30];

	set.remove_range(3..=21);

	assert_eq!(
		set.intervals(),
		[
			Interval::new(0, 2).unwrap(),
			Interval::new(22, 24).unwrap(),
			Interval::singleton(30)
		]
	);
}

#[test]
fn discard_and_remove() {
	let mut a = interval_set![1..4];
	let mut b = bitmask_set![1..4];

	assert!(a.discard(2));
	assert!(!a.discard(2));
	assert!(b.discard(2));
	assert!(!b.discard(2));
	assert_eq!(a, b);

	assert_eq!(IntegerSet::remove(&mut a, 3), Ok(()));
	assert_eq!(
		IntegerSet::remove(&mut b, 7),
		Err(Error::MissingElement { value: Some(7) })
	);
	assert_eq!(a.to_string(), "{1}");
}

#[test]
fn pop_until_empty() {
	let mut set = bitmask_set![5];

	assert_eq!(set.pop(), Ok(5));
	assert!(set.is_empty());
	assert_eq!(set.pop(), Err(Error::MissingElement { value: None }));

	let mut set = interval_set![-2..1];
	assert_eq!(set.pop(), Ok(-2));
	assert_eq!(set.pop(), Ok(-1));
	assert_eq!(set.pop(), Ok(0));
	assert!(set.pop().is_err());
}

#[test]
fn clear() {
	let mut a = interval_set![1..100, 200];
	let mut b = bitmask_set![1..100, 200];

	a.clear();
	b.clear();

	assert!(a.is_empty());
	assert!(b.is_empty());
	assert_eq!(b.bucket_count(), 0);
}

#[test]
fn clones_are_independent() {
	let mut a = interval_set![1..10, 20];
	let a_copy = a.clone();
	a.remove_range(3..6);
	a.insert(100);
	assert_eq!(a_copy, interval_set![1..10, 20]);
	assert_ne!(a, a_copy);

	let mut b = bitmask_set![1..10, 200];
	let mut b_copy = b.clone();
	b.remove_range(3..6);
	b_copy.insert(-1);
	assert_eq!(b, bitmask_set![1..3, 6..10, 200]);
	assert_eq!(b_copy, bitmask_set![-1, 1..10, 200]);
	assert_eq!(b.bucket_count(), 2);
	assert_eq!(b_copy.bucket_count(), 3);
}
