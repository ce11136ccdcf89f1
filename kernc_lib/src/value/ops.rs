use super::{Value, ValueError, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mult,
    Add,
    Sub,
    Div,
    Mod,
    BitAnd,
    BitOr,
    Xor,
    ShiftLeft,
    ShiftRight,
    LessThan,
    LessThanEq,
    Equal,
    NotEqual,
    GreaterThanEq,
    GreaterThan,
    And,
    Or,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 18] = [
        BinaryOp::Mult,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::Xor,
        BinaryOp::ShiftLeft,
        BinaryOp::ShiftRight,
        BinaryOp::LessThan,
        BinaryOp::LessThanEq,
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::GreaterThanEq,
        BinaryOp::GreaterThan,
        BinaryOp::And,
        BinaryOp::Or,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Mult => "*",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Xor => "^",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanEq => "<=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::GreaterThanEq => ">=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Only the arithmetic and bitwise operators have a compound assignment form (`+=`, `<<=`).
    pub fn has_assign_form(self) -> bool {
        matches!(
            self,
            BinaryOp::Mult
                | BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Div
                | BinaryOp::Mod
                | BinaryOp::BitAnd
                | BinaryOp::BitOr
                | BinaryOp::Xor
                | BinaryOp::ShiftLeft
                | BinaryOp::ShiftRight
        )
    }

    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            BinaryOp::Mult
                | BinaryOp::Add
                | BinaryOp::BitAnd
                | BinaryOp::BitOr
                | BinaryOp::Xor
                | BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::And
                | BinaryOp::Or
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Positive,
    Negative,
    Tilde,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Positive => "+",
            UnaryOp::Negative => "-",
            UnaryOp::Tilde => "~",
        }
    }
}

macro_rules! integer_op {
    ($op:expr, $a:expr, $b:expr, $ty:ty, $variant:ident) => {{
        let x: $ty = $a.to()?;
        let y: $ty = $b.to()?;
        let division_by_zero = ValueError::DivisionByZero {
            operator: $op.symbol(),
        };
        Ok(match $op {
            BinaryOp::Mult => Value::$variant(x.wrapping_mul(y)),
            BinaryOp::Add => Value::$variant(x.wrapping_add(y)),
            BinaryOp::Sub => Value::$variant(x.wrapping_sub(y)),
            BinaryOp::Div if y == 0 => return Err(division_by_zero),
            BinaryOp::Div => Value::$variant(x.wrapping_div(y)),
            BinaryOp::Mod if y == 0 => return Err(division_by_zero),
            BinaryOp::Mod => Value::$variant(x.wrapping_rem(y)),
            BinaryOp::BitAnd => Value::$variant(x & y),
            BinaryOp::BitOr => Value::$variant(x | y),
            BinaryOp::Xor => Value::$variant(x ^ y),
            BinaryOp::ShiftLeft => Value::$variant(x.wrapping_shl(y as u32)),
            BinaryOp::ShiftRight => Value::$variant(x.wrapping_shr(y as u32)),
            BinaryOp::LessThan => Value::Bool(x < y),
            BinaryOp::LessThanEq => Value::Bool(x <= y),
            BinaryOp::Equal => Value::Bool(x == y),
            BinaryOp::NotEqual => Value::Bool(x != y),
            BinaryOp::GreaterThanEq => Value::Bool(x >= y),
            BinaryOp::GreaterThan => Value::Bool(x > y),
            BinaryOp::And => Value::Bool(x != 0 && y != 0),
            BinaryOp::Or => Value::Bool(x != 0 || y != 0),
        })
    }};
}

macro_rules! floating_op {
    ($op:expr, $a:expr, $b:expr, $ty:ty, $variant:ident) => {{
        let x: $ty = $a.to()?;
        let y: $ty = $b.to()?;
        Ok(match $op {
            BinaryOp::Mult => Value::$variant(x * y),
            BinaryOp::Add => Value::$variant(x + y),
            BinaryOp::Sub => Value::$variant(x - y),
            BinaryOp::Div => Value::$variant(x / y),
            BinaryOp::Mod
            | BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::Xor
            | BinaryOp::ShiftLeft
            | BinaryOp::ShiftRight => {
                return Err(ValueError::FloatOperand {
                    operator: $op.symbol(),
                    kind: ValueKind::$variant,
                })
            }
            BinaryOp::LessThan => Value::Bool(x < y),
            BinaryOp::LessThanEq => Value::Bool(x <= y),
            BinaryOp::Equal => Value::Bool(x == y),
            BinaryOp::NotEqual => Value::Bool(x != y),
            BinaryOp::GreaterThanEq => Value::Bool(x >= y),
            BinaryOp::GreaterThan => Value::Bool(x > y),
            BinaryOp::And => Value::Bool(x != 0.0 && y != 0.0),
            BinaryOp::Or => Value::Bool(x != 0.0 || y != 0.0),
        })
    }};
}

impl Value {
    /// Applies `op` at the width of `ValueKind::promote(a.kind(), b.kind())`.
    ///
    /// ```
    /// # use kernc_lib::value::*;
    /// let sum = Value::binary(BinaryOp::Add, Value::UInt8(200), Value::Int8(100));
    /// assert_eq!(sum, Ok(Value::UInt8(44)));
    /// ```
    pub fn binary(op: BinaryOp, a: Value, b: Value) -> Result<Value, ValueError> {
        match ValueKind::promote(a.kind(), b.kind()) {
            ValueKind::None | ValueKind::Pointer => Ok(Value::None),
            ValueKind::Bool => {
                // bool arithmetic happens in int and is converted back
                let result: Result<Value, ValueError> = integer_op!(op, a, b, i32, Int32);
                result.map(|value| match value {
                    Value::Int32(i) => Value::Bool(i != 0),
                    other => other,
                })
            }
            ValueKind::Int8 => integer_op!(op, a, b, i8, Int8),
            ValueKind::UInt8 => integer_op!(op, a, b, u8, UInt8),
            ValueKind::Int16 => integer_op!(op, a, b, i16, Int16),
            ValueKind::UInt16 => integer_op!(op, a, b, u16, UInt16),
            ValueKind::Int32 => integer_op!(op, a, b, i32, Int32),
            ValueKind::UInt32 => integer_op!(op, a, b, u32, UInt32),
            ValueKind::Int64 => integer_op!(op, a, b, i64, Int64),
            ValueKind::UInt64 => integer_op!(op, a, b, u64, UInt64),
            ValueKind::Float => floating_op!(op, a, b, f32, Float),
            ValueKind::Double => floating_op!(op, a, b, f64, Double),
        }
    }

    /// `self op= rhs`. The result kind replaces the kind `self` had before.
    ///
    /// An operation without a result (pointer operands) leaves `self` untouched.
    pub fn assign(&mut self, op: BinaryOp, rhs: Value) -> Result<Value, ValueError> {
        let value = Value::binary(op, *self, rhs)?;
        if !value.is_nan() {
            *self = value;
        }
        Ok(value)
    }

    pub fn unary(op: UnaryOp, a: Value) -> Result<Value, ValueError> {
        use Value::*;

        Ok(match (op, a) {
            (_, None | Pointer(_)) => None,
            (UnaryOp::Not, a) => Bool(!a.to::<bool>()?),
            (UnaryOp::Positive, a) => a,
            (UnaryOp::Negative, a) => match a {
                // bool negates as the int it promotes to
                Bool(b) => Int32(-i32::from(b)),
                Int8(x) => Int8(x.wrapping_neg()),
                UInt8(x) => UInt8(x.wrapping_neg()),
                Int16(x) => Int16(x.wrapping_neg()),
                UInt16(x) => UInt16(x.wrapping_neg()),
                Int32(x) => Int32(x.wrapping_neg()),
                UInt32(x) => UInt32(x.wrapping_neg()),
                Int64(x) => Int64(x.wrapping_neg()),
                UInt64(x) => UInt64(x.wrapping_neg()),
                Float(x) => Float(-x),
                Double(x) => Double(-x),
                None | Pointer(_) => None,
            },
            (UnaryOp::Tilde, a) => match a {
                Bool(b) => Bool(!b),
                Int8(x) => Int8(!x),
                UInt8(x) => UInt8(!x),
                Int16(x) => Int16(!x),
                UInt16(x) => UInt16(!x),
                Int32(x) => Int32(!x),
                UInt32(x) => UInt32(!x),
                Int64(x) => Int64(!x),
                UInt64(x) => UInt64(!x),
                Float(_) | Double(_) => {
                    return Err(ValueError::FloatOperand {
                        operator: op.symbol(),
                        kind: a.kind(),
                    })
                }
                None | Pointer(_) => None,
            },
        })
    }

    fn step(&mut self, operator: &'static str, delta: i8) -> Result<(), ValueError> {
        use Value::*;

        let delta = i64::from(delta);
        *self = match *self {
            Bool(_) => return Err(ValueError::BoolOperand { operator }),
            Int8(x) => Int8(x.wrapping_add(delta as i8)),
            UInt8(x) => UInt8(x.wrapping_add(delta as u8)),
            Int16(x) => Int16(x.wrapping_add(delta as i16)),
            UInt16(x) => UInt16(x.wrapping_add(delta as u16)),
            Int32(x) => Int32(x.wrapping_add(delta as i32)),
            UInt32(x) => UInt32(x.wrapping_add(delta as u32)),
            Int64(x) => Int64(x.wrapping_add(delta)),
            UInt64(x) => UInt64(x.wrapping_add(delta as u64)),
            Float(x) => Float(x + delta as f32),
            Double(x) => Double(x + delta as f64),
            None | Pointer(_) => *self,
        };
        Ok(())
    }

    /// `++self`, returns the new value.
    pub fn increment(&mut self) -> Result<Value, ValueError> {
        self.step("++", 1)?;
        Ok(*self)
    }

    /// `--self`, returns the new value.
    pub fn decrement(&mut self) -> Result<Value, ValueError> {
        self.step("--", -1)?;
        Ok(*self)
    }

    /// `self++`, returns the old value.
    pub fn post_increment(&mut self) -> Result<Value, ValueError> {
        let old = *self;
        self.step("++", 1)?;
        Ok(old)
    }

    /// `self--`, returns the old value.
    pub fn post_decrement(&mut self) -> Result<Value, ValueError> {
        let old = *self;
        self.step("--", -1)?;
        Ok(old)
    }
}

macro_rules! binary_fns {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        pub fn $name(a: Value, b: Value) -> Result<Value, ValueError> {
            Value::binary(BinaryOp::$op, a, b)
        }
    )*};
}

binary_fns!(
    mult => Mult,
    add => Add,
    sub => Sub,
    div => Div,
    modulo => Mod,
    bit_and => BitAnd,
    bit_or => BitOr,
    xor => Xor,
    shift_left => ShiftLeft,
    shift_right => ShiftRight,
    less_than => LessThan,
    less_than_eq => LessThanEq,
    equal => Equal,
    not_equal => NotEqual,
    greater_than_eq => GreaterThanEq,
    greater_than => GreaterThan,
    and => And,
    or => Or,
);

macro_rules! assign_fns {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        pub fn $name(a: &mut Value, b: Value) -> Result<Value, ValueError> {
            a.assign(BinaryOp::$op, b)
        }
    )*};
}

assign_fns!(
    mult_assign => Mult,
    add_assign => Add,
    sub_assign => Sub,
    div_assign => Div,
    mod_assign => Mod,
    bit_and_assign => BitAnd,
    bit_or_assign => BitOr,
    xor_assign => Xor,
    shift_left_assign => ShiftLeft,
    shift_right_assign => ShiftRight,
);

pub fn not(a: Value) -> Result<Value, ValueError> {
    Value::unary(UnaryOp::Not, a)
}

pub fn positive(a: Value) -> Result<Value, ValueError> {
    Value::unary(UnaryOp::Positive, a)
}

pub fn negative(a: Value) -> Result<Value, ValueError> {
    Value::unary(UnaryOp::Negative, a)
}

pub fn tilde(a: Value) -> Result<Value, ValueError> {
    Value::unary(UnaryOp::Tilde, a)
}

pub fn left_increment(a: &mut Value) -> Result<Value, ValueError> {
    a.increment()
}

pub fn left_decrement(a: &mut Value) -> Result<Value, ValueError> {
    a.decrement()
}

pub fn right_increment(a: &mut Value) -> Result<Value, ValueError> {
    a.post_increment()
}

pub fn right_decrement(a: &mut Value) -> Result<Value, ValueError> {
    a.post_decrement()
}
