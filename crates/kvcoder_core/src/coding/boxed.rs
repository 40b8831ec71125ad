use std::fmt;

use crate::coding::Numeric;

/// Storage class of a native numeric box.
///
/// Mirrors the scalar encodings a platform number object can carry. The boolean
/// class shares its bit pattern with [`NumberClass::Char`], so only the tag tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberClass {
	/// Boolean flag stored as a signed byte.
	Bool,
	/// Signed 8-bit integer.
	Char,
	/// Unsigned 8-bit integer.
	UChar,
	/// Signed 16-bit integer.
	Short,
	/// Unsigned 16-bit integer.
	UShort,
	/// Signed 32-bit integer.
	Int,
	/// Unsigned 32-bit integer.
	UInt,
	/// Signed 64-bit integer.
	LongLong,
	/// Unsigned 64-bit integer.
	ULongLong,
	/// 32-bit float.
	Float,
	/// 64-bit float.
	Double,
}

impl NumberClass {
	/// Short diagnostic name.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Char => "char",
			Self::UChar => "uchar",
			Self::Short => "short",
			Self::UShort => "ushort",
			Self::Int => "int",
			Self::UInt => "uint",
			Self::LongLong => "longlong",
			Self::ULongLong => "ulonglong",
			Self::Float => "float",
			Self::Double => "double",
		}
	}
}

/// Native numeric box whose integer-vs-floating identity is resolved by [`BoxedNumber::classify`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxedNumber {
	class: NumberClass,
	bits: u64,
}

impl BoxedNumber {
	/// Build a box from a storage class and its raw bits.
	///
	/// Signed classes store the two's-complement value sign-extended to 64 bits;
	/// float classes store `f64::to_bits` of the widened value.
	pub const fn from_raw(class: NumberClass, bits: u64) -> Self {
		Self { class, bits }
	}

	/// Boolean-class box.
	pub const fn boolean(flag: bool) -> Self {
		Self {
			class: NumberClass::Bool,
			bits: flag as u64,
		}
	}

	/// Storage class tag.
	pub const fn class(&self) -> NumberClass {
		self.class
	}

	/// Raw storage bits.
	pub const fn bits(&self) -> u64 {
		self.bits
	}

	/// Classify the box as exactly one numeric kind.
	///
	/// Returns `None` for the boolean class so flags never decode as `0`/`1`.
	pub fn classify(&self) -> Option<Numeric> {
		match self.class {
			NumberClass::Bool => None,
			NumberClass::Char | NumberClass::Short | NumberClass::Int | NumberClass::LongLong => Some(Numeric::Signed(self.bits as i64)),
			NumberClass::UChar | NumberClass::UShort | NumberClass::UInt | NumberClass::ULongLong => Some(Numeric::Unsigned(self.bits)),
			NumberClass::Float | NumberClass::Double => Some(Numeric::Float(f64::from_bits(self.bits))),
		}
	}

	/// Boolean payload when the box carries the boolean class.
	pub fn as_flag(&self) -> Option<bool> {
		match self.class {
			NumberClass::Bool => Some(self.bits != 0),
			_ => None,
		}
	}
}

impl fmt::Debug for BoxedNumber {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.as_flag(), self.classify()) {
			(Some(flag), _) => write!(f, "BoxedNumber({}: {flag})", self.class.name()),
			(None, Some(Numeric::Signed(v))) => write!(f, "BoxedNumber({}: {v})", self.class.name()),
			(None, Some(Numeric::Unsigned(v))) => write!(f, "BoxedNumber({}: {v})", self.class.name()),
			(None, Some(Numeric::Float(v))) => write!(f, "BoxedNumber({}: {v})", self.class.name()),
			(None, None) => write!(f, "BoxedNumber({}: {:#x})", self.class.name(), self.bits),
		}
	}
}

impl fmt::Display for BoxedNumber {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.as_flag(), self.classify()) {
			(Some(flag), _) => write!(f, "{flag}"),
			(None, Some(Numeric::Signed(v))) => write!(f, "{v}"),
			(None, Some(Numeric::Unsigned(v))) => write!(f, "{v}"),
			(None, Some(Numeric::Float(v))) => write!(f, "{v}"),
			(None, None) => write!(f, "{:#x}", self.bits),
		}
	}
}

macro_rules! boxed_from_signed {
	($($ty:ty => $class:ident),* $(,)?) => {
		$(
			impl From<$ty> for BoxedNumber {
				fn from(value: $ty) -> Self {
					Self::from_raw(NumberClass::$class, i64::from(value) as u64)
				}
			}
		)*
	};
}

macro_rules! boxed_from_unsigned {
	($($ty:ty => $class:ident),* $(,)?) => {
		$(
			impl From<$ty> for BoxedNumber {
				fn from(value: $ty) -> Self {
					Self::from_raw(NumberClass::$class, u64::from(value))
				}
			}
		)*
	};
}

boxed_from_signed!(i8 => Char, i16 => Short, i32 => Int, i64 => LongLong);
boxed_from_unsigned!(u8 => UChar, u16 => UShort, u32 => UInt, u64 => ULongLong);

impl From<f32> for BoxedNumber {
	fn from(value: f32) -> Self {
		Self::from_raw(NumberClass::Float, f64::from(value).to_bits())
	}
}

impl From<f64> for BoxedNumber {
	fn from(value: f64) -> Self {
		Self::from_raw(NumberClass::Double, value.to_bits())
	}
}

impl From<bool> for BoxedNumber {
	fn from(value: bool) -> Self {
		Self::boolean(value)
	}
}
