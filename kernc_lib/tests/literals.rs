use kernc_lib::value::{self, Value, ValueKind};

fn lex(input: &str) -> (Value, &str) {
    let mut cursor = input;
    let value = value::load(&mut cursor, true);
    (value, cursor)
}

#[test]
fn lexes_decimal_literals() {
    macro_rules! check_literals {
        ($($($lit:expr),+ => $val:expr),+) => {
            $($(pretty_assertions::assert_eq!(lex($lit), ($val, ""), "lexing `{}`", $lit);)+)+
        };
    }

    check_literals! {
        "0" => Value::Int32(0),
        "42", "+42" => Value::Int32(42),
        "-42", "- 42" => Value::Int32(-42),
        "42u", "42U" => Value::UInt32(42),
        "42l", "42L", "42LL" => Value::Int64(42),
        "42ul", "42LU", "42ULL" => Value::UInt64(42),
        "-1u" => Value::UInt32(u32::MAX),
        "4294967296" => Value::Int32(0)
    };
}

#[test]
fn lexes_floating_literals() {
    macro_rules! check_literals {
        ($($($lit:expr),+ => $val:expr),+) => {
            $($(pretty_assertions::assert_eq!(lex($lit), ($val, ""), "lexing `{}`", $lit);)+)+
        };
    }

    check_literals! {
        "1.5", "1.50" => Value::Double(1.5),
        ".5", "0.5" => Value::Double(0.5),
        "3." => Value::Double(3.0),
        "-2.25" => Value::Double(-2.25),
        "1.5f", "1.5F" => Value::Float(1.5),
        "2f" => Value::Float(2.0),
        "1.5e3" => Value::Double(1500.0),
        "1.5e-1" => Value::Double(0.15),
        "1.5e3f" => Value::Float(1500.0)
    };
}

#[test]
fn lexes_radix_literals_by_digit_count() {
    macro_rules! check_literals {
        ($($($lit:expr),+ => $val:expr),+) => {
            $($(pretty_assertions::assert_eq!(lex($lit), ($val, ""), "lexing `{}`", $lit);)+)+
        };
    }

    check_literals! {
        "0x0", "0X0" => Value::UInt8(0),
        "0x00" => Value::UInt16(0),
        "0x7f", "0x7F", "0X7f" => Value::UInt16(0x7F),
        "0x0001" => Value::UInt32(1),
        "0x00000001" => Value::UInt64(1),
        "-0x1" => Value::Int8(-1),
        "-0x10" => Value::Int16(-16),
        "0b1" => Value::UInt8(1),
        "0b1111111" => Value::UInt8(127),
        "0b11111111" => Value::UInt16(255),
        "-0b1111111" => Value::Int16(-127)
    };
}

#[test]
fn leaves_the_rest_in_the_cursor() {
    assert_eq!(lex("12 + 3"), (Value::Int32(12), " + 3"));
    assert_eq!(lex("0x1FL"), (Value::UInt16(31), "L"));
    assert_eq!(lex("truely"), (Value::Bool(true), "ly"));
    assert_eq!(lex("7)"), (Value::Int32(7), ")"));
}

#[test]
fn rejects_non_literals() {
    for input in ["", "x", "-", ".", "0x", "0bz", "u"] {
        let mut cursor = input;
        assert!(value::load(&mut cursor, true).is_nan(), "lexing `{input}`");
        assert_eq!(cursor, input, "cursor moved lexing `{input}`");
    }

    let mut cursor = "-5";
    assert!(value::load(&mut cursor, false).is_nan());
    assert_eq!(cursor, "-5");
}

#[test]
fn printed_values_lex_back() {
    let values = [
        Value::Int32(-3),
        Value::Int64(-3),
        Value::Double(0.1),
        Value::Double(1e300),
        Value::Double(-2.0),
        Value::Bool(false),
    ];
    for value in values {
        let text = value.to_string();
        assert_eq!(lex(&text), (value, ""), "lexing `{text}`");
        assert_eq!(Value::load_str(&text), value);
    }
}

#[test]
fn extremes_round_trip_at_their_own_width() {
    macro_rules! check_round_trip {
        ($($ty:ty => [$($val:expr),+]),+) => {
            $($(
                let value = Value::from($val);
                let text = value.to_string();
                assert_eq!(
                    Value::load_str(&text).to::<$ty>(),
                    value.to::<$ty>(),
                    "round-tripping `{}`",
                    text
                );
            )+)+
        };
    }

    check_round_trip! {
        bool => [true, false],
        i8 => [i8::MIN, i8::MAX, 0i8],
        u8 => [u8::MIN, u8::MAX],
        i16 => [i16::MIN, i16::MAX],
        u16 => [u16::MIN, u16::MAX],
        i32 => [i32::MIN, i32::MAX],
        u32 => [u32::MIN, u32::MAX],
        i64 => [i64::MIN, i64::MAX],
        u64 => [u64::MIN, u64::MAX],
        f32 => [f32::MIN, f32::MAX, f32::MIN_POSITIVE, f32::EPSILON, -0.0f32, 0.1f32],
        f64 => [f64::MIN, f64::MAX, f64::MIN_POSITIVE, f64::EPSILON, 0.1f64]
    };
}

#[test]
fn unsigned_values_lex_back_as_signed() {
    let (value, _) = lex(&Value::UInt64(3).to_string());
    assert_eq!(value.kind(), ValueKind::Int64);
    let (value, _) = lex(&Value::UInt16(3).to_string());
    assert_eq!(value.kind(), ValueKind::Int32);
}
