//! Validated numeric attributes.

use crate::error::CallError;

/// A floating point attribute that can never hold a negative value.
///
/// Models a property with a validating setter: reads are plain, writes are
/// checked, and a rejected write leaves the previous value in place.
///
/// # Examples
///
/// ```
/// use decorum_core::NonNegative;
///
/// let mut radius = NonNegative::new("radius", 5.0).unwrap();
/// radius.set(2.0).unwrap();
/// assert_eq!(radius.get(), 2.0);
///
/// assert!(radius.set(-1.0).unwrap_err().is_negative_value());
/// assert_eq!(radius.get(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonNegative {
    field: &'static str,
    value: f64,
}

impl NonNegative {
    /// Creates the attribute, rejecting a negative initial value.
    pub fn new(field: &'static str, value: f64) -> Result<Self, CallError> {
        check(field, value)?;
        Ok(Self { field, value })
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    /// Replaces the value if it is non-negative.
    pub fn set(&mut self, value: f64) -> Result<(), CallError> {
        check(self.field, value)?;
        self.value = value;
        Ok(())
    }

    pub fn field(&self) -> &'static str {
        self.field
    }
}

fn check(field: &'static str, value: f64) -> Result<(), CallError> {
    // NaN fails the comparison too.
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CallError::NegativeValue { field, value })
    }
}
