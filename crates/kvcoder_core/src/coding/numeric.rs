use std::fmt;

/// Smallest float that no longer fits a signed 64-bit integer (2^63).
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
/// Exclusive magnitude bound for the 128-bit exact-conversion intermediate (2^127).
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Classified numeric source, the input of every coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
	/// Signed integer widened to 64 bits.
	Signed(i64),
	/// Unsigned integer widened to 64 bits.
	Unsigned(u64),
	/// Floating-point value widened to 64 bits.
	Float(f64),
}

impl Numeric {
	/// Widen to `f64`, possibly losing precision for large integers.
	pub fn as_f64(self) -> f64 {
		match self {
			Self::Signed(v) => v as f64,
			Self::Unsigned(v) => v as f64,
			Self::Float(v) => v,
		}
	}

	fn as_i128(self) -> Option<i128> {
		match self {
			Self::Signed(v) => Some(i128::from(v)),
			Self::Unsigned(v) => Some(i128::from(v)),
			Self::Float(_) => None,
		}
	}
}

impl fmt::Display for Numeric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Signed(v) => write!(f, "{v}"),
			Self::Unsigned(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
		}
	}
}

/// Rule for rounding a floating-point source to an integral value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingRule {
	/// Nearest integer, ties away from zero (schoolbook rounding).
	ToNearestOrAwayFromZero,
	/// Nearest integer, ties to the even neighbour.
	ToNearestOrEven,
	/// Toward positive infinity.
	Up,
	/// Toward negative infinity.
	Down,
	/// Truncate the fractional part.
	TowardZero,
	/// Away from zero.
	AwayFromZero,
}

impl RoundingRule {
	/// Round `value` to an integral `f64`; NaN and infinities pass through.
	pub fn apply(self, value: f64) -> f64 {
		match self {
			Self::ToNearestOrAwayFromZero => value.round(),
			Self::ToNearestOrEven => value.round_ties_even(),
			Self::Up => value.ceil(),
			Self::Down => value.floor(),
			Self::TowardZero => value.trunc(),
			Self::AwayFromZero => {
				if value.is_sign_negative() {
					value.floor()
				} else {
					value.ceil()
				}
			}
		}
	}
}

/// Policy applied when decoding an integer from a numeric source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntStrategy {
	/// Accept only sources exactly representable in the target width.
	#[default]
	Exact,
	/// Round floating sources with the rule, then require exact representability.
	Rounding(RoundingRule),
	/// Optionally round floating sources, then clamp out-of-range values to the target bounds.
	Clamping(Option<RoundingRule>),
}

impl fmt::Display for IntStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Exact => f.write_str("exact"),
			Self::Rounding(rule) => write!(f, "rounding({rule:?})"),
			Self::Clamping(Some(rule)) => write!(f, "clamping({rule:?})"),
			Self::Clamping(None) => f.write_str("clamping"),
		}
	}
}

/// Fixed-width integer that a [`Numeric`] source can be coerced into.
pub trait CoerceInteger: Copy + Sized {
	/// Diagnostic name of the width.
	const NAME: &'static str;
	/// Smallest representable value.
	const MIN: i128;
	/// Largest representable value.
	const MAX: i128;

	/// Narrow from the 128-bit intermediate when in range.
	fn from_i128(value: i128) -> Option<Self>;
}

macro_rules! coerce_integer {
	($($ty:ty => $name:literal),* $(,)?) => {
		$(
			impl CoerceInteger for $ty {
				const NAME: &'static str = $name;
				const MIN: i128 = <$ty>::MIN as i128;
				const MAX: i128 = <$ty>::MAX as i128;

				fn from_i128(value: i128) -> Option<Self> {
					<$ty>::try_from(value).ok()
				}
			}
		)*
	};
}

coerce_integer!(
	i8 => "int8",
	i16 => "int16",
	i32 => "int32",
	i64 => "int64",
	u8 => "uint8",
	u16 => "uint16",
	u32 => "uint32",
	u64 => "uint64",
);

/// Coerce `source` into `T` under `strategy`; `None` when the policy rejects the value.
pub fn coerce<T: CoerceInteger>(source: Numeric, strategy: IntStrategy) -> Option<T> {
	match (source, strategy) {
		(Numeric::Float(value), IntStrategy::Exact) => exact_float(value),
		(Numeric::Float(value), IntStrategy::Rounding(rule)) => exact_float(rule.apply(value)),
		(Numeric::Float(value), IntStrategy::Clamping(rule)) => clamp_float(value, rule),
		(_, IntStrategy::Exact | IntStrategy::Rounding(_)) => source.as_i128().and_then(T::from_i128),
		(_, IntStrategy::Clamping(_)) => source.as_i128().and_then(clamp_i128),
	}
}

fn exact_float<T: CoerceInteger>(value: f64) -> Option<T> {
	if !value.is_finite() || value.fract() != 0.0 || value.abs() >= I128_BOUND {
		return None;
	}
	T::from_i128(value as i128)
}

// Floats clamp through a signed 64-bit intermediate before narrowing.
fn clamp_float<T: CoerceInteger>(value: f64, rule: Option<RoundingRule>) -> Option<T> {
	let rounded = rule.map_or(value, |rule| rule.apply(value));
	if rounded.is_nan() {
		return None;
	}
	if rounded >= I64_UPPER {
		return clamp_i128(i128::from(i64::MAX));
	}
	if rounded < -I64_UPPER {
		return clamp_i128(i128::from(i64::MIN));
	}
	if rounded.fract() != 0.0 {
		return None;
	}
	clamp_i128(i128::from(rounded as i64))
}

fn clamp_i128<T: CoerceInteger>(value: i128) -> Option<T> {
	T::from_i128(value.clamp(T::MIN, T::MAX))
}

#[cfg(test)]
mod tests;
