//! Runtime capability sets for vector element types
//!
//! Every pairing of element types `(T, U)` that takes part in a vector
//! operation declares which arithmetic it supports through [`Supports`].
//! Operations query that set once, before touching any component, and fail
//! with [`VectorError::OperationNotSupported`] when the capability is absent.
//!
//! All primitive numeric types declare the full set against themselves.
//! Custom element types (unit wrappers, counters, indices) declare only what
//! makes sense for them, even when a std operator impl exists for interop.

use std::any::type_name;
use std::fmt;

use super::errors::{Result, VectorError};

/// A single arithmetic capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Add,
    Sub,
    Mul,
    Div,
}

impl Capability {
    const fn bit(self) -> u8 {
        match self {
            Capability::Add => 0b0001,
            Capability::Sub => 0b0010,
            Capability::Mul => 0b0100,
            Capability::Div => 0b1000,
        }
    }

    /// Lowercase operation name
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Add => "addition",
            Capability::Sub => "subtraction",
            Capability::Mul => "multiplication",
            Capability::Div => "division",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of capabilities declared by an element pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    /// No arithmetic at all
    pub const NONE: Self = Self(0);
    /// Addition, subtraction, multiplication and division
    pub const ALL: Self = Self(0b1111);

    /// Returns this set extended with `capability`
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Whether `capability` is part of the set
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }
}

/// Declares the arithmetic an element type supports against `Rhs`
pub trait Supports<Rhs = Self> {
    const CAPABILITIES: Capabilities;
}

macro_rules! full_arithmetic {
    ($($t:ty),* $(,)?) => {
        $(
            impl Supports<$t> for $t {
                const CAPABILITIES: Capabilities = Capabilities::ALL;
            }
        )*
    };
}

full_arithmetic!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Checks that `L` supports `operation` against `R`
pub fn require<L, R>(operation: Capability) -> Result<()>
where
    L: Supports<R>,
{
    if <L as Supports<R>>::CAPABILITIES.contains(operation) {
        Ok(())
    } else {
        Err(VectorError::OperationNotSupported {
            operation,
            lhs: type_name::<L>(),
            rhs: type_name::<R>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Label;

    impl Supports for Label {
        const CAPABILITIES: Capabilities = Capabilities::NONE.with(Capability::Add);
    }

    #[test]
    fn test_capability_set() {
        let set = Capabilities::NONE
            .with(Capability::Mul)
            .with(Capability::Div);
        assert!(set.contains(Capability::Mul));
        assert!(set.contains(Capability::Div));
        assert!(!set.contains(Capability::Add));
        assert!(!set.contains(Capability::Sub));

        assert_eq!(Capabilities::default(), Capabilities::NONE);
        for cap in [
            Capability::Add,
            Capability::Sub,
            Capability::Mul,
            Capability::Div,
        ] {
            assert!(Capabilities::ALL.contains(cap));
        }
    }

    #[test]
    fn test_require_primitives() {
        assert!(require::<f64, f64>(Capability::Div).is_ok());
        assert!(require::<i32, i32>(Capability::Sub).is_ok());
        assert!(require::<u8, u8>(Capability::Mul).is_ok());
    }

    #[test]
    fn test_require_reports_types() {
        assert!(require::<Label, Label>(Capability::Add).is_ok());

        let err = require::<Label, Label>(Capability::Div).unwrap_err();
        match err {
            VectorError::OperationNotSupported { operation, lhs, rhs } => {
                assert_eq!(operation, Capability::Div);
                assert!(lhs.ends_with("Label"));
                assert!(rhs.ends_with("Label"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
