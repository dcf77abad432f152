use crate::error::{Error, Result};
use crate::rings::rational::Rational;
use num_traits::{One, Zero};
use std::ops::{Add, Mul, Sub};

/// Numeric kind the Gaussian elimination runs in.
pub trait Field:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + std::fmt::Debug
    + std::fmt::Display
{
    fn checked_div(&self, rhs: &Self) -> Result<Self>;
}

/// Everything a `Matrix<T>` needs from `T`.
///
/// `Field` is where `determinant_elimination` does its divisions. Exact kinds
/// are their own field; integers are lifted to `f64` and rounded back.
pub trait Element:
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + std::fmt::Debug
    + std::fmt::Display
{
    type Field: Field;

    fn to_field(&self) -> Self::Field;
    fn from_field(value: Self::Field) -> Self;
}

impl Field for Rational {
    fn checked_div(&self, rhs: &Rational) -> Result<Rational> {
        self.divide(rhs)
    }
}

impl Element for Rational {
    type Field = Rational;

    fn to_field(&self) -> Rational {
        *self
    }

    fn from_field(value: Rational) -> Rational {
        value
    }
}

macro_rules! float_element {
    ($($t:ty),*) => {$(
        impl Field for $t {
            fn checked_div(&self, rhs: &$t) -> Result<$t> {
                if rhs.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                Ok(self / rhs)
            }
        }

        impl Element for $t {
            type Field = $t;

            fn to_field(&self) -> $t {
                *self
            }

            fn from_field(value: $t) -> $t {
                value
            }
        }
    )*};
}

macro_rules! integer_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            type Field = f64;

            fn to_field(&self) -> f64 {
                *self as f64
            }

            fn from_field(value: f64) -> $t {
                value.round() as $t
            }
        }
    )*};
}

float_element!(f32, f64);
integer_element!(i32, i64);

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
