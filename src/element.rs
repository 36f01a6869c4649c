use std::fmt::Debug;

/// Values that can be offered as set members.
///
/// This is the integer predicate used at the operand boundary: a value is a
/// valid member iff [`Element::to_integer`] returns `Some`. Integers that do
/// not fit in an `i64` are rejected like any other non-integer value.
pub trait Element: Debug {
	fn to_integer(&self) -> Option<i64>;

	/// Name of the value's type, used in error messages.
	///
	/// Defaults to the type name without its module path.
	fn type_name(&self) -> &'static str {
		short_type_name(std::any::type_name::<Self>())
	}
}

/// Strips the module path of a non-generic type name.
fn short_type_name(name: &'static str) -> &'static str {
	match name.rfind("::") {
		Some(i) if !name.contains('<') && !name.starts_with('&') => &name[i + 2..],
		_ => name,
	}
}

macro_rules! impl_lossless_element {
	($($ty:ty),*) => {
		$(
			impl Element for $ty {
				fn type_name(&self) -> &'static str {
					stringify!($ty)
				}

				fn to_integer(&self) -> Option<i64> {
					Some(i64::from(*self))
				}
			}
		)*
	};
}

macro_rules! impl_checked_element {
	($($ty:ty),*) => {
		$(
			impl Element for $ty {
				fn type_name(&self) -> &'static str {
					stringify!($ty)
				}

				fn to_integer(&self) -> Option<i64> {
					i64::try_from(*self).ok()
				}
			}
		)*
	};
}

macro_rules! impl_non_integer_element {
	($($ty:ty),*) => {
		$(
			impl Element for $ty {
				fn type_name(&self) -> &'static str {
					stringify!($ty)
				}

				fn to_integer(&self) -> Option<i64> {
					None
				}
			}
		)*
	};
}

impl_lossless_element!(i8, i16, i32, i64, u8, u16, u32);
impl_checked_element!(isize, usize, u64, i128, u128);
impl_non_integer_element!(f32, f64, bool, char, str, String, ());

/// References report the name of the referenced type.
impl<'a, T: Element + ?Sized> Element for &'a T {
	fn to_integer(&self) -> Option<i64> {
		(**self).to_integer()
	}

	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}
}

impl<T: Element + ?Sized> Element for Box<T> {
	fn to_integer(&self) -> Option<i64> {
		(**self).to_integer()
	}

	fn type_name(&self) -> &'static str {
		(**self).type_name()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn integers() {
		assert_eq!(5u8.to_integer(), Some(5));
		assert_eq!((-5i32).to_integer(), Some(-5));
		assert_eq!(u64::MAX.to_integer(), None);
		assert_eq!((i64::MAX as u64).to_integer(), Some(i64::MAX));
		assert_eq!((&7i64).to_integer(), Some(7));
	}

	#[test]
	fn non_integers() {
		assert_eq!(1.0f64.to_integer(), None);
		assert_eq!(true.to_integer(), None);
		assert_eq!("1".to_integer(), None);
		assert_eq!(String::from("1").to_integer(), None);
		assert_eq!(1.5f32.type_name(), "f32");
	}

	#[test]
	fn short_type_names() {
		assert_eq!(String::from("1").type_name(), "String");
		assert_eq!((&String::new()).type_name(), "String");
		assert_eq!("1".type_name(), "str");
		assert_eq!((&&7u64).type_name(), "u64");
		assert_eq!(Box::new(1.5f64).type_name(), "f64");

		#[derive(Debug)]
		struct Custom;

		impl Element for Custom {
			fn to_integer(&self) -> Option<i64> {
				None
			}
		}

		assert_eq!(Custom.type_name(), "Custom");
		assert_eq!(short_type_name("alloc::vec::Vec<i64>"), "alloc::vec::Vec<i64>");
	}
}
