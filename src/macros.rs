/// Builds an [`IntervalSet`](crate::IntervalSet) from integer literals and
/// half-open ranges of literals.
///
/// ```
/// use range_bit_set::interval_set;
///
/// let set = interval_set![1..4, 15, 20..23];
/// assert_eq!(set.to_string(), "{1..3, 15, 20..22}");
/// ```
#[macro_export]
macro_rules! interval_set {
	($($items:tt)*) => {{
		#[allow(unused_mut)]
		let mut set = $crate::IntervalSet::new();
		$crate::__set_items!(set; $($items)*);
		set
	}};
}

/// Builds a [`BitmaskSet`](crate::BitmaskSet) from integer literals and
/// half-open ranges of literals.
///
/// ```
/// use range_bit_set::bitmask_set;
///
/// let set = bitmask_set![70, 1, 200, 62, -3..0];
/// assert_eq!(set.iter().collect::<Vec<_>>(), [-3, -2, -1, 1, 62, 70, 200]);
/// ```
#[macro_export]
macro_rules! bitmask_set {
	($($items:tt)*) => {{
		#[allow(unused_mut)]
		let mut set = $crate::BitmaskSet::new();
		$crate::__set_items!(set; $($items)*);
		set
	}};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __set_items {
	($set:ident;) => {};
	($set:ident; $start:literal .. $stop:literal $(, $($rest:tt)*)?) => {
		$set.insert_range($start..$stop);
		$crate::__set_items!($set; $($($rest)*)?);
	};
	($set:ident; $value:literal $(, $($rest:tt)*)?) => {
		$set.insert($value);
		$crate::__set_items!($set; $($($rest)*)?);
	};
}
