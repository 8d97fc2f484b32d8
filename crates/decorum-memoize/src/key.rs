//! Argument signatures used as memoization keys.

use decorum_core::{CallArgs, CallError, Value};

/// A hashable projection of a single argument value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    None,
    Bool(bool),
    Int(i64),
    /// Bit pattern of a non-integral float.
    Float(u64),
    Str(String),
    Tuple(Vec<KeyPart>),
}

impl KeyPart {
    /// Projects `value` into a key, failing for values that have no stable
    /// identity by content (lists, maps, opaque objects).
    pub fn from_value(value: &Value) -> Result<Self, CallError> {
        Ok(match value {
            Value::None => KeyPart::None,
            Value::Bool(b) => KeyPart::Bool(*b),
            Value::Int(i) => KeyPart::Int(*i),
            Value::Float(x) => float_key(*x),
            Value::Str(s) => KeyPart::Str(s.clone()),
            Value::Tuple(items) => KeyPart::Tuple(
                items
                    .iter()
                    .map(KeyPart::from_value)
                    .collect::<Result<_, _>>()?,
            ),
            other => {
                return Err(CallError::UnhashableArgument { kind: other.kind() });
            }
        })
    }
}

// Integral floats share keys with the equal int, and -0.0 with 0.0, so
// values that compare equal hit the same entry.
fn float_key(x: f64) -> KeyPart {
    if x.is_nan() {
        return KeyPart::Float(f64::NAN.to_bits());
    }
    if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        return KeyPart::Int(x as i64);
    }
    KeyPart::Float(x.to_bits())
}

/// The normalized form of a call's arguments.
///
/// Positional arguments keep their order; named arguments are sorted by
/// name, so two calls that pass the same named values in a different order
/// produce the same signature.
///
/// # Examples
///
/// ```
/// use decorum_core::CallArgs;
/// use decorum_memoize::ArgSignature;
///
/// let a = ArgSignature::from_args(&CallArgs::new().kwarg("x", 1).kwarg("y", 2)).unwrap();
/// let b = ArgSignature::from_args(&CallArgs::new().kwarg("y", 2).kwarg("x", 1)).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgSignature {
    positional: Vec<KeyPart>,
    named: Vec<(String, KeyPart)>,
}

impl ArgSignature {
    pub fn from_args(args: &CallArgs) -> Result<Self, CallError> {
        let positional = args
            .args()
            .iter()
            .map(KeyPart::from_value)
            .collect::<Result<Vec<_>, _>>()?;

        let mut named = args
            .kwargs()
            .iter()
            .map(|(name, value)| Ok((name.clone(), KeyPart::from_value(value)?)))
            .collect::<Result<Vec<_>, CallError>>()?;
        named.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self { positional, named })
    }
}
