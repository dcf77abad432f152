//! Dense matrices over integers, floats and exact fractions, with two
//! determinant algorithms that can be checked against each other.

pub mod error;
pub mod matrix {
    pub mod determinant;
    pub mod element;
    pub mod matrix;
}
pub mod rings {
    pub mod rational;
}

pub use error::{Error, Result};
pub use matrix::element::{Element, Field};
pub use matrix::matrix::Matrix;
pub use rings::rational::Rational;
