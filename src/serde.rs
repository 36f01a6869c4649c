use serde::{
	de::Error,
	ser::{SerializeMap, SerializeSeq, SerializeTuple},
	Deserialize, Serialize,
};

use crate::{
	bitmask::is_valid_bucket, BitmaskSet, Interval, IntervalSet, BITS_PER_BUCKET,
};

impl Serialize for Interval {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut t = serializer.serialize_tuple(2)?;
		t.serialize_element(&self.start)?;
		t.serialize_element(&self.end)?;
		t.end()
	}
}

impl<'de> Deserialize<'de> for Interval {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct Visitor;

		impl<'de> serde::de::Visitor<'de> for Visitor {
			type Value = Interval;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(formatter, "an interval")
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::SeqAccess<'de>,
			{
				let start = seq
					.next_element()?
					.ok_or_else(|| A::Error::custom("missing start bound"))?;
				let end = seq
					.next_element()?
					.ok_or_else(|| A::Error::custom("missing end bound"))?;
				Interval::new(start, end)
					.ok_or_else(|| A::Error::custom("start bound greater than end bound"))
			}
		}

		deserializer.deserialize_tuple(2, Visitor)
	}
}

impl Serialize for IntervalSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.interval_count()))?;

		for interval in self.intervals() {
			seq.serialize_element(interval)?;
		}

		seq.end()
	}
}

impl<'de> Deserialize<'de> for IntervalSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct Visitor;

		impl<'de> serde::de::Visitor<'de> for Visitor {
			type Value = IntervalSet;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(formatter, "an interval set")
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::SeqAccess<'de>,
			{
				let mut result = IntervalSet::new();

				while let Some(interval) = seq.next_element::<Interval>()? {
					result.insert_interval(interval);
				}

				Ok(result)
			}
		}

		deserializer.deserialize_seq(Visitor)
	}
}

impl Serialize for BitmaskSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.bucket_count()))?;

		for (bucket, mask) in self.buckets() {
			map.serialize_entry(&bucket, &mask)?;
		}

		map.end()
	}
}

impl<'de> Deserialize<'de> for BitmaskSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct Visitor;

		impl<'de> serde::de::Visitor<'de> for Visitor {
			type Value = BitmaskSet;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(formatter, "a map of {BITS_PER_BUCKET} bit buckets")
			}

			fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::MapAccess<'de>,
			{
				let mut result = BitmaskSet::new();

				while let Some((bucket, mask)) = map.next_entry::<i64, u64>()? {
					if !is_valid_bucket(bucket, mask) {
						return Err(A::Error::custom(format_args!(
							"invalid mask {mask:#b} for bucket {bucket}"
						)));
					}

					result.merge_bucket(bucket, mask);
				}

				Ok(result)
			}
		}

		deserializer.deserialize_map(Visitor)
	}
}
