use std::fmt;

use serde::Serialize;

use crate::error::{HarnessError, Result};

/// One argument a parameterized case is run against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Int,
    Float,
}

impl ArgumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Float => "floating-point",
        }
    }
}

impl ArgumentValue {
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Self::Int(_) => ArgumentKind::Int,
            Self::Float(_) => ArgumentKind::Float,
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) if v.is_nan() => write!(f, "nan"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for ArgumentValue {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        }
    )*};
}

impl_from_int!(i32, i64, u32, usize);

impl From<f64> for ArgumentValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// A Rust type a run routine can take its argument as.
pub trait Argument: Sized {
    const KIND: ArgumentKind;

    fn from_value(value: ArgumentValue) -> Result<Self>;
}

fn kind_mismatch(expected: ArgumentKind, value: ArgumentValue) -> HarnessError {
    HarnessError::MixedArgumentKinds {
        expected: expected.name(),
        found: value.kind().name(),
    }
}

impl Argument for i64 {
    const KIND: ArgumentKind = ArgumentKind::Int;

    fn from_value(value: ArgumentValue) -> Result<Self> {
        match value {
            ArgumentValue::Int(v) => Ok(v),
            v => Err(kind_mismatch(Self::KIND, v)),
        }
    }
}

impl Argument for usize {
    const KIND: ArgumentKind = ArgumentKind::Int;

    fn from_value(value: ArgumentValue) -> Result<Self> {
        let v = i64::from_value(value)?;
        usize::try_from(v).map_err(|_| {
            HarnessError::precondition(format!("argument {v} is not a valid size"))
        })
    }
}

impl Argument for f64 {
    const KIND: ArgumentKind = ArgumentKind::Float;

    fn from_value(value: ArgumentValue) -> Result<Self> {
        match value {
            ArgumentValue::Float(v) => Ok(v),
            v => Err(kind_mismatch(Self::KIND, v)),
        }
    }
}

/// An ordered, non-empty list of arguments sharing one kind.
///
/// Duplicates are kept and run independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSweep {
    values: Vec<ArgumentValue>,
}

impl ArgumentSweep {
    pub fn builder() -> ArgumentSweepBuilder {
        ArgumentSweepBuilder::default()
    }

    pub fn from_values<T: Into<ArgumentValue>>(
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self> {
        values
            .into_iter()
            .fold(Self::builder(), |b, v| b.add(v))
            .build()
    }

    pub fn kind(&self) -> ArgumentKind {
        self.values[0].kind()
    }

    pub fn values(&self) -> &[ArgumentValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ArgumentValue> + '_ {
        self.values.iter().copied()
    }
}

/// Chained declaration of an [`ArgumentSweep`], in call order.
///
/// ```
/// use libcbench::ArgumentSweep;
///
/// let sweep = ArgumentSweep::builder().add(8).add(64).add(512).build().unwrap();
/// assert_eq!(sweep.len(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ArgumentSweepBuilder {
    values: Vec<ArgumentValue>,
}

impl ArgumentSweepBuilder {
    pub fn add(mut self, value: impl Into<ArgumentValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Append `lo, lo * mult, lo * mult^2, ...` up to and including `hi`.
    pub fn range(mut self, lo: i64, hi: i64, mult: i64) -> Self {
        let mut v = lo;
        while v <= hi && v > 0 {
            self.values.push(ArgumentValue::Int(v));
            if mult <= 1 {
                break;
            }
            v = match v.checked_mul(mult) {
                Some(next) => next,
                None => break,
            };
        }
        self
    }

    pub fn build(self) -> Result<ArgumentSweep> {
        let Some(first) = self.values.first() else {
            return Err(HarnessError::EmptySweep);
        };
        let kind = first.kind();
        if let Some(v) = self.values.iter().find(|v| v.kind() != kind) {
            return Err(kind_mismatch(kind, *v));
        }
        Ok(ArgumentSweep {
            values: self.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_call_order_and_duplicates() {
        let sweep = ArgumentSweep::builder()
            .add(512)
            .add(8)
            .add(8)
            .build()
            .unwrap();
        assert_eq!(
            sweep.values(),
            &[
                ArgumentValue::Int(512),
                ArgumentValue::Int(8),
                ArgumentValue::Int(8)
            ]
        );
        assert_eq!(sweep.kind(), ArgumentKind::Int);
    }

    #[test]
    fn empty_sweep_is_rejected() {
        assert_eq!(
            ArgumentSweep::builder().build(),
            Err(HarnessError::EmptySweep)
        );
    }

    #[test]
    fn mixed_kinds_are_rejected() {
        let err = ArgumentSweep::builder().add(1).add(2.0).build().unwrap_err();
        assert_eq!(
            err,
            HarnessError::MixedArgumentKinds {
                expected: "integer",
                found: "floating-point"
            }
        );
    }

    #[test]
    fn range_multiplies_up_to_the_bound() {
        let sweep = ArgumentSweep::builder().range(8, 512, 8).build().unwrap();
        let values: Vec<_> = sweep.iter().collect();
        assert_eq!(
            values,
            vec![
                ArgumentValue::Int(8),
                ArgumentValue::Int(64),
                ArgumentValue::Int(512)
            ]
        );
    }

    #[test]
    fn float_labels() {
        assert_eq!(ArgumentValue::Float(1234.0).to_string(), "1234");
        assert_eq!(ArgumentValue::Float(f64::NAN).to_string(), "nan");
        assert_eq!(ArgumentValue::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(ArgumentValue::Int(-3).to_string(), "-3");
    }

    #[test]
    fn typed_extraction_checks_kind() {
        assert_eq!(i64::from_value(ArgumentValue::Int(7)), Ok(7));
        assert_eq!(usize::from_value(ArgumentValue::Int(7)), Ok(7));
        assert!(usize::from_value(ArgumentValue::Int(-1)).is_err());
        assert!(f64::from_value(ArgumentValue::Int(7)).is_err());
        assert_eq!(f64::from_value(ArgumentValue::Float(0.5)), Ok(0.5));
    }
}
