//! # Vector algebra
//!
//! A single generic, fixed-dimension vector value type used for positions,
//! velocities, accelerations and forces throughout the crate.
//!
//! ## Capability-checked arithmetic
//!
//! Every operation is generic over the element types of both operands and
//! produces the natural result type of the underlying operation: scaling a
//! `Vec2<T>` by an `S` gives a `Vec2<<T as Mul<S>>::Output>`. Before computing,
//! each operation queries the [`Supports`] capability set of the element
//! pairing and fails with [`VectorError::OperationNotSupported`] if the
//! pairing does not declare the operation.
//!
//! ## Pure and in-place forms
//!
//! Binary operations return new values (`add`, `sub`, `scale`, `normalized`).
//! Their mutating counterparts are separate, explicitly named methods
//! (`add_in_place`, `sub_in_place`, `scale_in_place`, `normalize`). No std
//! operator is overloaded, so every fallible step is visible at the call site.
//!
//! ## Examples
//!
//! ```rust
//! use orbitsim::vector::Vec2;
//!
//! let position = Vec2::new(3.0, 4.0);
//! assert_eq!(position.magnitude().unwrap(), 5.0);
//!
//! let unit = position.normalized().unwrap();
//! assert!((unit.magnitude().unwrap() - 1.0).abs() < 1e-15);
//!
//! // The zero vector normalizes to itself
//! let zero = Vec2::new(0.0, 0.0);
//! assert_eq!(zero.normalized().unwrap(), zero);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::SVector;
use num_traits::{AsPrimitive, Zero};

pub mod capability;
pub mod errors;

pub use self::capability::{require, Capabilities, Capability, Supports};
pub use self::errors::{Result, VectorError};

/// Fixed-dimension numeric vector over element type `T`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<T, const D: usize> {
    components: [T; D],
}

/// Two-dimensional vector
pub type Vec2<T> = Vector<T, 2>;

/// Three-dimensional vector
pub type Vec3<T> = Vector<T, 3>;

impl<T: Copy, const D: usize> Vector<T, D> {
    /// Creates a vector from its components
    pub const fn from_components(components: [T; D]) -> Self {
        Self { components }
    }

    /// Component array
    pub fn components(&self) -> &[T; D] {
        &self.components
    }

    /// Number of components
    pub const fn dimension(&self) -> usize {
        D
    }

    fn map<R>(&self, f: impl Fn(T) -> R) -> Vector<R, D> {
        Vector {
            components: std::array::from_fn(|i| f(self.components[i])),
        }
    }

    fn zip_with<U: Copy, R>(&self, rhs: &Vector<U, D>, f: impl Fn(T, U) -> R) -> Vector<R, D> {
        Vector {
            components: std::array::from_fn(|i| f(self.components[i], rhs.components[i])),
        }
    }
}

impl<T: Copy + Zero, const D: usize> Vector<T, D> {
    /// The zero vector
    pub fn zeros() -> Self {
        Self {
            components: [T::zero(); D],
        }
    }

    /// Whether every component is zero
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|c| c.is_zero())
    }
}

#[allow(clippy::should_implement_trait)]
impl<T: Copy, const D: usize> Vector<T, D> {
    /// Component-wise sum
    pub fn add<U>(&self, rhs: &Vector<U, D>) -> Result<Vector<<T as Add<U>>::Output, D>>
    where
        U: Copy,
        T: Add<U> + Supports<U>,
    {
        require::<T, U>(Capability::Add)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Component-wise difference `self - rhs`
    pub fn sub<U>(&self, rhs: &Vector<U, D>) -> Result<Vector<<T as Sub<U>>::Output, D>>
    where
        U: Copy,
        T: Sub<U> + Supports<U>,
    {
        require::<T, U>(Capability::Sub)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Multiplies every component by `factor`
    pub fn scale<S>(&self, factor: S) -> Result<Vector<<T as Mul<S>>::Output, D>>
    where
        S: Copy,
        T: Mul<S> + Supports<S>,
    {
        require::<T, S>(Capability::Mul)?;
        Ok(self.map(|a| a * factor))
    }

    /// Divides every component by `divisor`
    ///
    /// Fails with [`VectorError::DivisionByZero`] when `divisor` is zero.
    pub fn scale_div<S>(&self, divisor: S) -> Result<Vector<<T as Div<S>>::Output, D>>
    where
        S: Copy + Zero,
        T: Div<S> + Supports<S>,
    {
        require::<T, S>(Capability::Div)?;
        if divisor.is_zero() {
            return Err(VectorError::DivisionByZero);
        }
        Ok(self.map(|a| a / divisor))
    }

    /// Component-wise product
    pub fn mul_components<U>(&self, rhs: &Vector<U, D>) -> Result<Vector<<T as Mul<U>>::Output, D>>
    where
        U: Copy,
        T: Mul<U> + Supports<U>,
    {
        require::<T, U>(Capability::Mul)?;
        Ok(self.zip_with(rhs, |a, b| a * b))
    }

    /// Component-wise quotient
    ///
    /// Fails with [`VectorError::DivisionByZero`] if any component of `rhs`
    /// is zero; nothing is computed in that case.
    pub fn div_components<U>(&self, rhs: &Vector<U, D>) -> Result<Vector<<T as Div<U>>::Output, D>>
    where
        U: Copy + Zero,
        T: Div<U> + Supports<U>,
    {
        require::<T, U>(Capability::Div)?;
        if rhs.components.iter().any(|c| c.is_zero()) {
            return Err(VectorError::DivisionByZero);
        }
        Ok(self.zip_with(rhs, |a, b| a / b))
    }

    /// Sum of pairwise component products
    pub fn dot<U, P>(&self, rhs: &Vector<U, D>) -> Result<P>
    where
        U: Copy,
        T: Mul<U, Output = P> + Supports<U>,
        P: Add<Output = P> + Zero + Supports,
    {
        require::<T, U>(Capability::Mul)?;
        require::<P, P>(Capability::Add)?;
        Ok(self
            .components
            .iter()
            .zip(rhs.components.iter())
            .fold(P::zero(), |acc, (&a, &b)| acc + a * b))
    }

    /// Sum of squared components, without the square root
    pub fn magnitude_squared<P>(&self) -> Result<P>
    where
        T: Mul<Output = P> + Supports,
        P: Add<Output = P> + Zero + Supports,
    {
        self.dot(self)
    }

    /// Euclidean length
    pub fn magnitude<P>(&self) -> Result<f64>
    where
        T: Mul<Output = P> + Supports,
        P: Add<Output = P> + Zero + Supports + AsPrimitive<f64>,
    {
        let squared: P = self.magnitude_squared()?;
        let squared: f64 = squared.as_();
        Ok(squared.sqrt())
    }

    /// Squared length of `other - self`
    pub fn distance_squared<P>(&self, other: &Self) -> Result<P>
    where
        T: Sub<Output = T> + Mul<Output = P> + Supports,
        P: Add<Output = P> + Zero + Supports,
    {
        other.sub(self)?.magnitude_squared()
    }

    /// Length of `other - self`
    pub fn distance<P>(&self, other: &Self) -> Result<f64>
    where
        T: Sub<Output = T> + Mul<Output = P> + Supports,
        P: Add<Output = P> + Zero + Supports + AsPrimitive<f64>,
    {
        other.sub(self)?.magnitude()
    }

    /// Unit vector in the same direction
    ///
    /// A zero-length vector is returned unchanged rather than reported as an
    /// error.
    pub fn normalized<P>(&self) -> Result<Self>
    where
        T: Mul<Output = P> + Div<f64, Output = T> + Supports + Supports<f64>,
        P: Add<Output = P> + Zero + Supports + AsPrimitive<f64>,
    {
        let magnitude = self.magnitude()?;
        if magnitude == 0.0 {
            return Ok(*self);
        }
        self.scale_div(magnitude)
    }

    /// Normalizes in place, leaving a zero-length vector untouched
    pub fn normalize<P>(&mut self) -> Result<()>
    where
        T: Mul<Output = P> + Div<f64, Output = T> + Supports + Supports<f64>,
        P: Add<Output = P> + Zero + Supports + AsPrimitive<f64>,
    {
        *self = self.normalized()?;
        Ok(())
    }

    /// Adds `rhs` into `self`
    pub fn add_in_place<U>(&mut self, rhs: &Vector<U, D>) -> Result<()>
    where
        U: Copy,
        T: Add<U, Output = T> + Supports<U>,
    {
        *self = self.add(rhs)?;
        Ok(())
    }

    /// Subtracts `rhs` from `self`
    pub fn sub_in_place<U>(&mut self, rhs: &Vector<U, D>) -> Result<()>
    where
        U: Copy,
        T: Sub<U, Output = T> + Supports<U>,
    {
        *self = self.sub(rhs)?;
        Ok(())
    }

    /// Multiplies `self` by `factor`
    pub fn scale_in_place<S>(&mut self, factor: S) -> Result<()>
    where
        S: Copy,
        T: Mul<S, Output = T> + Supports<S>,
    {
        *self = self.scale(factor)?;
        Ok(())
    }
}

impl<T: Copy> Vector<T, 2> {
    /// Creates a 2D vector
    pub const fn new(x: T, y: T) -> Self {
        Self { components: [x, y] }
    }

    pub fn x(&self) -> T {
        self.components[0]
    }

    pub fn y(&self) -> T {
        self.components[1]
    }
}

impl<T: Copy + Neg<Output = T>> Vector<T, 2> {
    /// Perpendicular vector `(-y, x)`, rotated a quarter turn counter-clockwise
    pub fn orthogonal(&self) -> Self {
        Self::new(-self.y(), self.x())
    }
}

impl<T: Copy> Vector<T, 3> {
    /// Creates a 3D vector
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self {
            components: [x, y, z],
        }
    }

    pub fn x(&self) -> T {
        self.components[0]
    }

    pub fn y(&self) -> T {
        self.components[1]
    }

    pub fn z(&self) -> T {
        self.components[2]
    }

    /// Cross product `self × rhs`
    pub fn cross<P>(&self, rhs: &Self) -> Result<Vector<P, 3>>
    where
        T: Mul<Output = P> + Supports,
        P: Sub<Output = P> + Supports,
    {
        require::<T, T>(Capability::Mul)?;
        require::<P, P>(Capability::Sub)?;
        let [ax, ay, az] = self.components;
        let [bx, by, bz] = rhs.components;
        Ok(Vector {
            components: [ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx],
        })
    }
}

impl<const D: usize> Vector<f64, D> {
    /// Converts to a nalgebra column vector
    pub fn to_nalgebra(&self) -> SVector<f64, D> {
        SVector::from(self.components)
    }

    /// Creates from a nalgebra column vector
    pub fn from_nalgebra(vector: SVector<f64, D>) -> Self {
        Self::from_components(std::array::from_fn(|i| vector[i]))
    }
}

impl<T: fmt::Display, const D: usize> fmt::Display for Vector<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", component)?;
        }
        write!(f, ")")
    }
}
