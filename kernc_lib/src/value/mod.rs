//! Dynamically typed scalars as produced by the literal lexer.
//!
//! A [`Value`] holds exactly one of the C scalar types the kernel language knows about. Mixed
//! arithmetic follows one deterministic rule: the result kind is the operand kind with the larger
//! bit value in [`ValueKind`], see [`ValueKind::promote`].

mod lex;
mod ops;

pub use lex::{load, load_binary, load_hex};
pub use ops::*;

use std::fmt::Display;

/// The discriminant of a [`Value`].
///
/// WARNING: the bit values encode the promotion order, generated code depends on it.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    None = 1 << 0,
    Bool = 1 << 1,
    Int8 = 1 << 2,
    UInt8 = 1 << 3,
    Int16 = 1 << 4,
    UInt16 = 1 << 5,
    Int32 = 1 << 6,
    UInt32 = 1 << 7,
    Int64 = 1 << 8,
    UInt64 = 1 << 9,
    Float = 1 << 10,
    Double = 1 << 11,
    Pointer = 1 << 12,
}

impl ValueKind {
    pub const SIGNED: u16 = Self::Int8.bits() | Self::Int16.bits() | Self::Int32.bits() | Self::Int64.bits();
    pub const UNSIGNED: u16 =
        Self::UInt8.bits() | Self::UInt16.bits() | Self::UInt32.bits() | Self::UInt64.bits();
    pub const INTEGER: u16 = Self::SIGNED | Self::UNSIGNED;
    pub const FLOATING: u16 = Self::Float.bits() | Self::Double.bits();

    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// The kind both operands of a binary operator are converted to.
    ///
    /// This is the kind with the larger bit value, not the usual arithmetic conversions: `int8`
    /// with `uint8` gives `uint8` and `uint32` with `int64` gives `int64`.
    pub fn promote(a: ValueKind, b: ValueKind) -> ValueKind {
        if a.bits() > b.bits() {
            a
        } else {
            b
        }
    }

    pub fn is_signed(self) -> bool {
        self.bits() & Self::SIGNED != 0
    }

    pub fn is_unsigned(self) -> bool {
        self.bits() & Self::UNSIGNED != 0
    }

    pub fn is_integer(self) -> bool {
        self.bits() & Self::INTEGER != 0
    }

    pub fn is_floating(self) -> bool {
        self.bits() & Self::FLOATING != 0
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::None => "none",
            ValueKind::Bool => "bool",
            ValueKind::Int8 => "int8",
            ValueKind::UInt8 => "uint8",
            ValueKind::Int16 => "int16",
            ValueKind::UInt16 => "uint16",
            ValueKind::Int32 => "int32",
            ValueKind::UInt32 => "uint32",
            ValueKind::Int64 => "int64",
            ValueKind::UInt64 => "uint64",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Pointer => "pointer",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar value, or `None` when lexing or evaluation produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    /// An opaque address, never dereferenced.
    Pointer(usize),
}

/// A precondition of a value operation was violated.
///
/// These are never recovered from inside the value layer: the caller should have checked the
/// operand kinds before applying the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    NotSet,
    FloatOperand {
        operator: &'static str,
        kind: ValueKind,
    },
    BoolOperand {
        operator: &'static str,
    },
    DivisionByZero {
        operator: &'static str,
    },
}

impl Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::NotSet => write!(f, "value type not set"),
            ValueError::FloatOperand { operator, kind } => {
                write!(f, "cannot apply operator {operator} to {kind} type")
            }
            ValueError::BoolOperand { operator } => {
                write!(f, "cannot apply operator {operator} to bool type")
            }
            ValueError::DivisionByZero { operator } => {
                write!(f, "integer division by zero in operator {operator}")
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// A native scalar a [`Value`] can be converted to with a C-style cast.
pub trait Scalar: Copy {
    fn from_bool(value: bool) -> Self;
    fn from_i64(value: i64) -> Self;
    fn from_u64(value: u64) -> Self;
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            fn from_bool(value: bool) -> Self {
                u8::from(value) as $ty
            }

            fn from_i64(value: i64) -> Self {
                value as $ty
            }

            fn from_u64(value: u64) -> Self {
                value as $ty
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }
        }
    )*};
}

impl_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl Scalar for bool {
    fn from_bool(value: bool) -> Self {
        value
    }

    fn from_i64(value: i64) -> Self {
        value != 0
    }

    fn from_u64(value: u64) -> Self {
        value != 0
    }

    fn from_f64(value: f64) -> Self {
        value != 0.0
    }
}

macro_rules! impl_from_native {
    ($($ty:ty => $variant:ident),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    )*};
}

impl_from_native!(
    bool => Bool,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double
);

impl Value {
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Value::Pointer(ptr as usize)
    }

    /// Lexes `source` as a single literal, see [`load`].
    pub fn load_str(source: &str) -> Self {
        let mut cursor = source;
        load(&mut cursor, true)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::None => ValueKind::None,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int8(_) => ValueKind::Int8,
            Value::UInt8(_) => ValueKind::UInt8,
            Value::Int16(_) => ValueKind::Int16,
            Value::UInt16(_) => ValueKind::UInt16,
            Value::Int32(_) => ValueKind::Int32,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::Int64(_) => ValueKind::Int64,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Pointer(_) => ValueKind::Pointer,
        }
    }

    /// Converts the payload to `T` the way a C cast would. Pointers convert through their address.
    pub fn to<T: Scalar>(&self) -> Result<T, ValueError> {
        Ok(match *self {
            Value::None => return Err(ValueError::NotSet),
            Value::Bool(v) => T::from_bool(v),
            Value::Int8(v) => T::from_i64(v.into()),
            Value::UInt8(v) => T::from_u64(v.into()),
            Value::Int16(v) => T::from_i64(v.into()),
            Value::UInt16(v) => T::from_u64(v.into()),
            Value::Int32(v) => T::from_i64(v.into()),
            Value::UInt32(v) => T::from_u64(v.into()),
            Value::Int64(v) => T::from_i64(v),
            Value::UInt64(v) => T::from_u64(v),
            Value::Float(v) => T::from_f64(v.into()),
            Value::Double(v) => T::from_f64(v),
            Value::Pointer(addr) => T::from_u64(addr as u64),
        })
    }

    /// Also true for the kind `None`, which is the "not a value" state.
    pub fn is_nan(&self) -> bool {
        self.kind() == ValueKind::None
    }

    pub fn is_bool(&self) -> bool {
        self.kind() == ValueKind::Bool
    }

    pub fn is_signed(&self) -> bool {
        self.kind().is_signed()
    }

    pub fn is_unsigned(&self) -> bool {
        self.kind().is_unsigned()
    }

    pub fn is_integer(&self) -> bool {
        self.kind().is_integer()
    }

    pub fn is_float(&self) -> bool {
        self.kind().is_floating()
    }

    pub fn is_pointer(&self) -> bool {
        self.kind() == ValueKind::Pointer
    }

    /// Byte width of the held type.
    pub fn size_of(&self) -> Result<usize, ValueError> {
        use std::mem::size_of;
        Ok(match self {
            Value::None => return Err(ValueError::NotSet),
            Value::Bool(_) => size_of::<bool>(),
            Value::Int8(_) => size_of::<i8>(),
            Value::UInt8(_) => size_of::<u8>(),
            Value::Int16(_) => size_of::<i16>(),
            Value::UInt16(_) => size_of::<u16>(),
            Value::Int32(_) => size_of::<i32>(),
            Value::UInt32(_) => size_of::<u32>(),
            Value::Int64(_) => size_of::<i64>(),
            Value::UInt64(_) => size_of::<u64>(),
            Value::Float(_) => size_of::<f32>(),
            Value::Double(_) => size_of::<f64>(),
            Value::Pointer(_) => size_of::<usize>(),
        })
    }
}

/// Writes a float so that it lexes back as a float: an exponent form always gets a fraction.
fn fmt_floating(f: &mut std::fmt::Formatter<'_>, repr: String) -> std::fmt::Result {
    match repr.find('e') {
        Some(index) if !repr[..index].contains('.') => {
            write!(f, "{}.0{}", &repr[..index], &repr[index..])
        }
        _ => f.write_str(&repr),
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Value::None => write!(f, "NaN"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}L"),
            Value::UInt64(v) => write!(f, "{v}L"),
            Value::Float(v) => fmt_floating(f, format!("{v:?}")),
            Value::Double(v) => fmt_floating(f, format!("{v:?}")),
            Value::Pointer(addr) => write!(f, "{addr:#x}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn promotion_follows_bit_order() {
        use ValueKind::*;

        let test = [
            ((Int8, UInt8), UInt8),
            ((UInt8, Int16), Int16),
            ((UInt32, Int64), Int64),
            ((Int64, UInt64), UInt64),
            ((UInt64, Float), Float),
            ((Bool, None), Bool),
            ((Double, Pointer), Pointer),
            ((Int32, Int32), Int32),
        ];

        for ((a, b), expected) in test {
            assert_eq!(ValueKind::promote(a, b), expected);
            assert_eq!(ValueKind::promote(b, a), expected);
        }
    }

    #[test]
    fn kind_masks() {
        assert!(Value::Int16(-1).is_signed());
        assert!(!Value::Int16(-1).is_unsigned());
        assert!(Value::UInt64(1).is_unsigned());
        assert!(Value::UInt64(1).is_integer());
        assert!(!Value::Bool(true).is_integer());
        assert!(Value::Float(1.0).is_float());
        assert!(Value::Double(1.0).is_float());
        assert!(Value::None.is_nan());
        assert!(!Value::Double(f64::NAN).is_nan());
        assert!(Value::from_ptr(&3u8 as *const u8).is_pointer());
    }

    #[test]
    fn c_style_casts() {
        assert_eq!(Value::Int32(-1).to::<u8>(), Ok(255));
        assert_eq!(Value::Int8(-1).to::<u64>(), Ok(u64::MAX));
        assert_eq!(Value::UInt32(300).to::<i8>(), Ok(44));
        assert_eq!(Value::Double(2.75).to::<i32>(), Ok(2));
        assert_eq!(Value::Double(0.5).to::<bool>(), Ok(true));
        assert_eq!(Value::Bool(true).to::<f32>(), Ok(1.0));
        assert_eq!(Value::UInt16(0).to::<bool>(), Ok(false));
        assert_eq!(Value::Pointer(0x10).to::<u32>(), Ok(16));
        assert_eq!(Value::None.to::<i32>(), Err(ValueError::NotSet));
    }

    #[test]
    fn to_string() {
        let test = [
            (Value::Bool(true), "true"),
            (Value::Bool(false), "false"),
            (Value::Int8(-3), "-3"),
            (Value::UInt32(7), "7"),
            (Value::Int64(-12), "-12L"),
            (Value::UInt64(12), "12L"),
            (Value::Double(1.5), "1.5"),
            (Value::Double(3.0), "3.0"),
            (Value::Double(1e300), "1.0e300"),
            (Value::Float(2.5e-7), "2.5e-7"),
            (Value::Double(f64::INFINITY), "inf"),
            (Value::Float(f32::NEG_INFINITY), "-inf"),
            (Value::Pointer(255), "0xff"),
            (Value::None, "NaN"),
        ];

        for (value, s) in &test {
            assert_eq!(&value.to_string(), s);
        }
    }

    #[test]
    fn sizes() {
        assert_eq!(Value::Bool(true).size_of(), Ok(1));
        assert_eq!(Value::UInt16(1).size_of(), Ok(2));
        assert_eq!(Value::Float(1.0).size_of(), Ok(4));
        assert_eq!(Value::Int64(1).size_of(), Ok(8));
        assert_eq!(Value::None.size_of(), Err(ValueError::NotSet));
    }
}
