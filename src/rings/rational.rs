use crate::error::{Error, Result};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

/// Exact fraction `n / d`.
///
/// Every constructor and every operation returns a reduced value: `d > 0`,
/// `gcd(|n|, d) == 1`, and zero is stored as `0 / 1`. Because the
/// representation is canonical, the derived `PartialEq` compares values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    n: i64,
    d: i64,
}

impl Rational {
    /// Canonicalizing constructor. A zero denominator is read as `1`.
    pub fn reduce(n: i64, d: i64) -> Self {
        Self::from_wide(n as i128, d as i128)
    }

    pub fn from_integer(i: i64) -> Self {
        Self { n: i, d: 1 }
    }

    /// Parses `"<integer>.<digits>"`. The fractional digits take the sign of
    /// the integer part, so `"-4.75"` is `-19/4`.
    pub fn from_decimal_str(s: &str) -> Result<Self> {
        let (int_part, frac_part) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| Error::parse(s, "missing fractional separator"))?;

        if frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::parse(s, "fractional part is not a number"));
        }
        let int: i64 = int_part
            .parse()
            .map_err(|_| Error::parse(s, "integer part is not a number"))?;

        let scale = u32::try_from(frac_part.len())
            .ok()
            .and_then(|k| 10i128.checked_pow(k))
            .filter(|scale| *scale <= i64::MAX as i128)
            .ok_or_else(|| Error::parse(s, "too many fractional digits"))?;
        let frac: i128 = frac_part
            .parse()
            .map_err(|_| Error::parse(s, "fractional part is not a number"))?;

        let frac = if int_part.starts_with('-') { -frac } else { frac };
        Self::try_from_wide(int as i128 * scale + frac, scale)
            .ok_or_else(|| Error::parse(s, "value out of range"))
    }

    /// Converts through the six-digit decimal rendering of `f`.
    pub fn from_float(f: f64) -> Result<Self> {
        if !f.is_finite() {
            return Err(Error::parse(&f.to_string(), "not a finite number"));
        }
        Self::from_decimal_str(&format!("{:.6}", f))
    }

    pub fn numerator(&self) -> i64 {
        self.n
    }

    pub fn denominator(&self) -> i64 {
        self.d
    }

    pub fn is_negative(&self) -> bool {
        self.n < 0
    }

    pub fn abs(&self) -> Self {
        Self {
            n: self.n.abs(),
            d: self.d,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.d == 1
    }

    pub fn add(&self, rhs: &Rational) -> Rational {
        if self.d == rhs.d {
            return Self::from_wide(self.n as i128 + rhs.n as i128, self.d as i128);
        }
        Self::from_wide(
            self.n as i128 * rhs.d as i128 + rhs.n as i128 * self.d as i128,
            self.d as i128 * rhs.d as i128,
        )
    }

    pub fn sub(&self, rhs: &Rational) -> Rational {
        if self.d == rhs.d {
            return Self::from_wide(self.n as i128 - rhs.n as i128, self.d as i128);
        }
        Self::from_wide(
            self.n as i128 * rhs.d as i128 - rhs.n as i128 * self.d as i128,
            self.d as i128 * rhs.d as i128,
        )
    }

    pub fn multiply(&self, rhs: &Rational) -> Rational {
        Self::from_wide(
            self.n as i128 * rhs.n as i128,
            self.d as i128 * rhs.d as i128,
        )
    }

    pub fn divide(&self, rhs: &Rational) -> Result<Rational> {
        Ok(self.multiply(&rhs.recip()?))
    }

    pub fn recip(&self) -> Result<Rational> {
        if self.n == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::reduce(self.d, self.n))
    }

    fn from_wide(n: i128, d: i128) -> Self {
        match Self::try_from_wide(n, d) {
            Some(r) => r,
            None => panic!("rational overflow: {} / {} does not fit in i64", n, d),
        }
    }

    fn try_from_wide(n: i128, d: i128) -> Option<Self> {
        if n == 0 {
            return Some(Self::zero());
        }
        let d = if d == 0 { 1 } else { d };
        let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };

        let g = n.gcd(&d);
        Some(Self {
            n: i64::try_from(n / g).ok()?,
            d: i64::try_from(d / g).ok()?,
        })
    }
}

impl From<i64> for Rational {
    fn from(i: i64) -> Self {
        Self::from_integer(i)
    }
}

impl From<i32> for Rational {
    fn from(i: i32) -> Self {
        Self::from_integer(i as i64)
    }
}

/// Accepts `"n/d"`, decimal `"i.f"` and plain integer forms.
impl FromStr for Rational {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((num, den)) = s.split_once('/') {
            let n: i64 = num
                .trim()
                .parse()
                .map_err(|_| Error::parse(s, "invalid numerator"))?;
            let d: i64 = den
                .trim()
                .parse()
                .map_err(|_| Error::parse(s, "invalid denominator"))?;
            if d == 0 {
                return Err(Error::parse(s, "zero denominator"));
            }
            return Ok(Self::reduce(n, d));
        }
        if s.contains('.') {
            return Self::from_decimal_str(s);
        }
        s.parse()
            .map(Self::from_integer)
            .map_err(|_| Error::parse(s, "invalid number"))
    }
}

impl ops::Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        Rational::add(&self, &rhs)
    }
}

impl ops::Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        Rational::sub(&self, &rhs)
    }
}

impl ops::Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        self.multiply(&rhs)
    }
}

impl ops::Div for Rational {
    type Output = Rational;

    fn div(self, rhs: Rational) -> Rational {
        if rhs.is_zero() {
            panic!("Denominator cannot be zero");
        }
        Self::from_wide(
            self.n as i128 * rhs.d as i128,
            self.d as i128 * rhs.n as i128,
        )
    }
}

impl ops::Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Self::from_wide(-(self.n as i128), self.d as i128)
    }
}

impl One for Rational {
    fn one() -> Rational {
        Self { n: 1, d: 1 }
    }
}

impl Zero for Rational {
    fn zero() -> Rational {
        Self { n: 0, d: 1 }
    }

    fn is_zero(&self) -> bool {
        self.n == 0
    }
}

/// Mixed form: `"4 + 3/4"`, `"-4 - 3/4"`, `"3/4"`, `"15"`, `"0"`.
impl Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.n < 0 { "-" } else { "" };
        let (whole, rem) = self.n.unsigned_abs().div_rem(&(self.d as u64));

        match (whole, rem) {
            (whole, 0) => write!(f, "{}{}", sign, whole),
            (0, rem) => write!(f, "{}{}/{}", sign, rem, self.d),
            (whole, rem) if self.n < 0 => write!(f, "-{} - {}/{}", whole, rem, self.d),
            (whole, rem) => write!(f, "{} + {}/{}", whole, rem, self.d),
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, rhs: &Rational) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Ord for Rational {
    fn cmp(&self, rhs: &Rational) -> Ordering {
        let a = self.n as i128 * rhs.d as i128;
        let b = rhs.n as i128 * self.d as i128;
        a.cmp(&b)
    }
}

impl std::iter::Sum<Rational> for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::zero(), |acc, r| acc + r)
    }
}

impl std::iter::Product<Rational> for Rational {
    fn product<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::one(), |acc, r| acc * r)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
