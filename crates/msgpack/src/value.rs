//! The MessagePack value domain.

use crate::MsgPackError;

/// A decoded or to-be-encoded MessagePack value.
///
/// `Int` and `UInt` are two views of one logical integer domain covering
/// [-2^63, 2^64-1]; equality compares them numerically, so
/// `Int(5) == UInt(5)`. Map entries preserve insertion order and may
/// contain duplicate keys; the codec never deduplicates.
#[derive(Debug, Clone)]
pub enum PackValue {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<PackValue>),
    Map(Vec<(PackValue, PackValue)>),
    /// Application extension: signed 8-bit tag plus opaque payload.
    Ext(i8, Vec<u8>),
}

impl PartialEq for PackValue {
    fn eq(&self, other: &Self) -> bool {
        use PackValue::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Int(a), UInt(b)) | (UInt(b), Int(a)) => *a >= 0 && *a as u64 == *b,
            (Float32(a), Float32(b)) => a == b,
            (Float64(a), Float64(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Bin(a), Bin(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Ext(t1, p1), Ext(t2, p2)) => t1 == t2 && p1 == p2,
            _ => false,
        }
    }
}

impl From<bool> for PackValue {
    fn from(b: bool) -> Self {
        PackValue::Bool(b)
    }
}

impl From<i64> for PackValue {
    fn from(i: i64) -> Self {
        PackValue::Int(i)
    }
}

impl From<i32> for PackValue {
    fn from(i: i32) -> Self {
        PackValue::Int(i as i64)
    }
}

impl From<u64> for PackValue {
    fn from(u: u64) -> Self {
        PackValue::UInt(u)
    }
}

impl From<u32> for PackValue {
    fn from(u: u32) -> Self {
        PackValue::UInt(u as u64)
    }
}

impl From<f32> for PackValue {
    fn from(f: f32) -> Self {
        PackValue::Float32(f)
    }
}

impl From<f64> for PackValue {
    fn from(f: f64) -> Self {
        PackValue::Float64(f)
    }
}

impl From<&str> for PackValue {
    fn from(s: &str) -> Self {
        PackValue::Str(s.to_owned())
    }
}

impl From<String> for PackValue {
    fn from(s: String) -> Self {
        PackValue::Str(s)
    }
}

impl From<Vec<u8>> for PackValue {
    fn from(b: Vec<u8>) -> Self {
        PackValue::Bin(b)
    }
}

impl From<Vec<PackValue>> for PackValue {
    fn from(arr: Vec<PackValue>) -> Self {
        PackValue::Array(arr)
    }
}

/// Construction boundary for integers from a wider source type.
///
/// This is the single place where the [-2^63, 2^64-1] domain is
/// enforced; values inside it become `Int` or `UInt` and the encoder
/// never re-checks.
impl TryFrom<i128> for PackValue {
    type Error = MsgPackError;

    fn try_from(i: i128) -> Result<Self, Self::Error> {
        if i < i64::MIN as i128 || i > u64::MAX as i128 {
            return Err(MsgPackError::Overflow);
        }
        if i < 0 {
            Ok(PackValue::Int(i as i64))
        } else {
            Ok(PackValue::UInt(i as u64))
        }
    }
}

impl From<serde_json::Value> for PackValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => PackValue::Nil,
            serde_json::Value::Bool(b) => PackValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PackValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    PackValue::UInt(u)
                } else {
                    // serde_json numbers are i64, u64, or finite f64
                    PackValue::Float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => PackValue::Str(s),
            serde_json::Value::Array(arr) => {
                PackValue::Array(arr.into_iter().map(PackValue::from).collect())
            }
            serde_json::Value::Object(obj) => PackValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (PackValue::Str(k), PackValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_views_compare_numerically() {
        assert_eq!(PackValue::Int(5), PackValue::UInt(5));
        assert_eq!(PackValue::UInt(5), PackValue::Int(5));
        assert_ne!(PackValue::Int(-1), PackValue::UInt(u64::MAX));
        assert_ne!(PackValue::UInt(1 << 63), PackValue::Int(i64::MIN));
    }

    #[test]
    fn float_widths_are_distinct() {
        assert_ne!(PackValue::Float32(1.0), PackValue::Float64(1.0));
    }

    #[test]
    fn i128_boundary_construction() {
        assert_eq!(
            PackValue::try_from(-(1i128 << 63)).unwrap(),
            PackValue::Int(i64::MIN)
        );
        assert_eq!(
            PackValue::try_from((1i128 << 64) - 1).unwrap(),
            PackValue::UInt(u64::MAX)
        );
        assert_eq!(
            PackValue::try_from(-(1i128 << 63) - 1),
            Err(MsgPackError::Overflow)
        );
        assert_eq!(
            PackValue::try_from(1i128 << 64),
            Err(MsgPackError::Overflow)
        );
    }

    #[test]
    fn json_conversion_preserves_structure() {
        let v = PackValue::from(json!({"a": [1, -2, true, null], "b": "x"}));
        assert_eq!(
            v,
            PackValue::Map(vec![
                (
                    PackValue::Str("a".into()),
                    PackValue::Array(vec![
                        PackValue::Int(1),
                        PackValue::Int(-2),
                        PackValue::Bool(true),
                        PackValue::Nil,
                    ]),
                ),
                (PackValue::Str("b".into()), PackValue::Str("x".into())),
            ])
        );
    }

    #[test]
    fn json_u64_above_i64_becomes_uint() {
        let v = PackValue::from(json!(u64::MAX));
        assert_eq!(v, PackValue::UInt(u64::MAX));
    }
}
