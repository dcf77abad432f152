use crate::error::{Error, Result};
use crate::matrix::element::{Element, Field};
use crate::matrix::matrix::Matrix;
use log::{debug, trace};
use num_traits::{One, Zero};

impl<T: Element> Matrix<T> {
    /// Laplace expansion along the first row.
    ///
    /// Exact for every element kind, but factorial in the dimension: meant
    /// for small inputs and for cross-checking `determinant_elimination`.
    pub fn determinant_cofactor(&self) -> Result<T> {
        self.check_square()?;

        let rows: Vec<usize> = (0..self.rows).collect();
        let cols: Vec<usize> = (0..self.cols).collect();
        Ok(self.expand(&rows, &cols))
    }

    /// Gaussian elimination with partial pivoting.
    ///
    /// Runs in `T::Field`: rationals stay exact, integers go through `f64`
    /// and the diagonal product is rounded back. A zero pivot is replaced by
    /// the first non-zero row below it (flipping the sign); a column with no
    /// such row means the determinant is zero.
    pub fn determinant_elimination(&self) -> Result<T> {
        self.check_square()?;

        let n = self.rows;
        let mut cells: Vec<T::Field> = self.cells.iter().map(|x| x.to_field()).collect();
        let mut negate = false;

        for j in 0..n {
            if cells[j * n + j].is_zero() {
                match (j + 1..n).find(|&r| !cells[r * n + j].is_zero()) {
                    Some(r) => {
                        debug!("zero pivot at ({}, {}), swapping rows {} and {}", j, j, j, r);
                        for k in 0..n {
                            cells.swap(j * n + k, r * n + k);
                        }
                        negate = !negate;
                    }
                    None => {
                        debug!("column {} has no pivot, matrix is singular", j);
                        return Ok(T::zero());
                    }
                }
            }

            let pivot = cells[j * n + j].clone();
            for i in j + 1..n {
                if cells[i * n + j].is_zero() {
                    continue;
                }
                let multiplier = cells[i * n + j].checked_div(&pivot)?;
                trace!("row {} -= ({}) * row {}", i, multiplier, j);

                for k in 0..n {
                    let value = cells[i * n + k].clone()
                        - multiplier.clone() * cells[j * n + k].clone();
                    cells[i * n + k] = value;
                }
            }
        }

        let det = (0..n).fold(<T::Field as One>::one(), |acc, i| acc * cells[i * n + i].clone());
        let det = if negate { <T::Field as Zero>::zero() - det } else { det };
        Ok(T::from_field(det))
    }

    /// Copy of the matrix without `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix<T>> {
        self.check_index(row, col)?;
        if self.rows == 1 || self.cols == 1 {
            return Err(Error::InvalidShape {
                rows: self.rows - 1,
                cols: self.cols - 1,
            });
        }

        Ok(Matrix {
            rows: self.rows - 1,
            cols: self.cols - 1,
            cells: (0..self.rows)
                .filter(|&r| r != row)
                .flat_map(|r| {
                    (0..self.cols)
                        .filter(move |&c| c != col)
                        .map(move |c| self.at(r, c))
                })
                .collect(),
        })
    }

    fn check_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    // Determinant of the view keeping only `rows` x `cols` of `self`.
    fn expand(&self, rows: &[usize], cols: &[usize]) -> T {
        match (rows, cols) {
            ([], _) => T::one(),
            ([r], [c]) => self.at(*r, *c),
            ([r0, r1], [c0, c1]) => {
                self.at(*r0, *c0) * self.at(*r1, *c1) - self.at(*r0, *c1) * self.at(*r1, *c0)
            }
            ([top, rest @ ..], _) => {
                let mut det = T::zero();
                let mut minor_cols = Vec::with_capacity(cols.len() - 1);

                for (j, &col) in cols.iter().enumerate() {
                    let element = self.at(*top, col);
                    if element.is_zero() {
                        continue;
                    }

                    minor_cols.clear();
                    minor_cols.extend(cols.iter().copied().filter(|&c| c != col));
                    let term = element * self.expand(rest, &minor_cols);
                    trace!("cofactor ({}, {}) of a {}x{} view", top, col, rows.len(), cols.len());

                    det = if j % 2 == 0 { det + term } else { det - term };
                }
                det
            }
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::rational::Rational;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn int_matrix(lines: &[&[i64]]) -> Matrix<i64> {
        Matrix::from_list(lines.iter().map(|l| l.to_vec()).collect()).unwrap()
    }

    fn to_rational(m: &Matrix<i64>) -> Matrix<Rational> {
        m.map(Rational::from_integer)
    }

    fn make_test_matrix() -> Matrix<i64> {
        int_matrix(&[
            &[77, 88, 99, 12, 42],
            &[61, 47, 8, 19, 41],
            &[1, 22, 13, 74, 55],
            &[3, 17, 58, 3, 32],
            &[91, 27, 49, 4, 65],
        ])
    }

    fn random_square(rng: &mut StdRng, n: usize) -> Matrix<i64> {
        let mut m = Matrix::new(n, n).unwrap();
        for i in 0..n {
            for j in 0..n {
                // plenty of zeros so that pivot swaps actually happen
                let value = if rng.gen_bool(0.3) { 0 } else { rng.gen_range(-20..=20) };
                m.set(i, j, value).unwrap();
            }
        }
        m
    }

    #[test]
    fn test_determinant_classic() {
        let a = make_test_matrix();
        assert_eq!(a.determinant_cofactor(), Ok(-546499540));
        assert_eq!(
            to_rational(&a).determinant_cofactor(),
            Ok(Rational::from_integer(-546499540))
        );

        let b = int_matrix(&[&[4, 7], &[3, 2]]);
        assert_eq!(b.determinant_cofactor(), Ok(4 * 2 - 3 * 7));
        assert_eq!(
            to_rational(&b).determinant_cofactor(),
            Ok(Rational::from_integer(-13))
        );
    }

    #[test]
    fn test_determinant() {
        let a = make_test_matrix();
        assert_eq!(a.determinant_elimination(), Ok(-546499540));
        assert_eq!(
            to_rational(&a).determinant_elimination(),
            Ok(Rational::from_integer(-546499540))
        );

        let b = int_matrix(&[&[4, 7], &[3, 2]]);
        assert_eq!(b.determinant_elimination(), Ok(-13));
    }

    #[test]
    fn test_small_dimensions() {
        let m = int_matrix(&[&[-7]]);
        assert_eq!(m.determinant_cofactor(), Ok(-7));
        assert_eq!(m.determinant_elimination(), Ok(-7));

        let m = Matrix::<Rational>::identity(4).unwrap();
        assert_eq!(m.determinant_cofactor(), Ok(Rational::one()));
        assert_eq!(m.determinant_elimination(), Ok(Rational::one()));
    }

    #[test]
    fn test_not_square() {
        let m = Matrix::<Rational>::new(2, 3).unwrap();
        assert_eq!(
            m.determinant_cofactor(),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        );
        assert_eq!(
            m.determinant_elimination(),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_zero_pivot() {
        let m = int_matrix(&[&[0, 1], &[1, 0]]);
        assert_eq!(m.determinant_elimination(), Ok(-1));

        let m = int_matrix(&[&[0, 2, 1], &[3, 0, 4], &[1, 5, 0]]);
        assert_eq!(m.determinant_cofactor(), Ok(23));
        assert_eq!(m.determinant_elimination(), Ok(23));
        assert_eq!(to_rational(&m).determinant_elimination(), Ok(Rational::from_integer(23)));

        // the zero pivot only shows up after the first column is eliminated
        let m = int_matrix(&[&[1, 2, 3], &[2, 4, 7], &[1, 3, 5]]);
        assert_eq!(m.determinant_cofactor(), Ok(-1));
        assert_eq!(m.determinant_elimination(), Ok(-1));
        assert_eq!(to_rational(&m).determinant_elimination(), Ok(Rational::from_integer(-1)));
    }

    #[test]
    fn test_singular() {
        let m = int_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        assert_eq!(m.determinant_cofactor(), Ok(0));
        assert_eq!(to_rational(&m).determinant_elimination(), Ok(Rational::zero()));

        let m = int_matrix(&[&[0, 2, 3], &[0, 5, 6], &[0, 8, 1]]);
        assert_eq!(m.determinant_cofactor(), Ok(0));
        assert_eq!(m.determinant_elimination(), Ok(0));
    }

    #[test]
    fn test_rational_entries() {
        let m = Matrix::from_list(vec![
            vec![Rational::reduce(1, 2), Rational::reduce(2, 3), Rational::reduce(-1, 4)],
            vec![Rational::reduce(3, 5), Rational::zero(), Rational::reduce(7, 2)],
            vec![Rational::from_integer(-2), Rational::reduce(1, 6), Rational::reduce(5, 3)],
        ])
        .unwrap();
        let want = Rational::reduce(-113, 20);
        assert_eq!(m.determinant_cofactor(), Ok(want));
        assert_eq!(m.determinant_elimination(), Ok(want));
        assert_eq!(want.to_string(), "-5 - 13/20");
    }

    #[test]
    fn test_float_entries() {
        let m = Matrix::from_list(vec![vec![1.5f64, 2.0], vec![0.5, 4.0]]).unwrap();
        assert_relative_eq!(m.determinant_cofactor().unwrap(), 5.0);
        assert_relative_eq!(m.determinant_elimination().unwrap(), 5.0);

        let m = make_test_matrix().map(|x| x as f64);
        assert_relative_eq!(
            m.determinant_elimination().unwrap(),
            -546499540.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_cross_check() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let n = rng.gen_range(1..=5);
            let m = random_square(&mut rng, n);
            let classic = m.determinant_cofactor().unwrap();

            assert_eq!(m.determinant_elimination(), Ok(classic), "{}", m);
            assert_eq!(
                to_rational(&m).determinant_elimination(),
                Ok(Rational::from_integer(classic)),
                "{}",
                m
            );
        }
    }

    #[test]
    fn test_cross_check_rational() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let n = rng.gen_range(1..=4);
            let mut m = Matrix::<Rational>::new(n, n).unwrap();
            for i in 0..n {
                for j in 0..n {
                    let value = Rational::reduce(rng.gen_range(-9..=9), rng.gen_range(1..=6));
                    m.set(i, j, value).unwrap();
                }
            }
            assert_eq!(m.determinant_cofactor(), m.determinant_elimination(), "{}", m);
        }
    }

    #[test]
    fn test_transpose_keeps_determinant() {
        let m = to_rational(&make_test_matrix());
        assert_eq!(
            m.transpose().determinant_elimination(),
            m.determinant_elimination()
        );
    }

    #[test]
    fn test_minor() {
        let m = int_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        assert_eq!(m.minor(0, 1).unwrap().to_list(), vec![vec![4, 6], vec![7, 9]]);
        assert_eq!(m.minor(2, 2).unwrap().to_list(), vec![vec![1, 2], vec![4, 5]]);
        assert!(matches!(m.minor(3, 0), Err(Error::IndexOutOfRange { .. })));

        let row = int_matrix(&[&[1, 2, 3]]);
        assert!(matches!(row.minor(0, 0), Err(Error::InvalidShape { .. })));

        // expansion along the first row through owned minors agrees with the views
        let m = make_test_matrix();
        let expanded: i64 = (0..5)
            .map(|j| {
                let sign = if j % 2 == 0 { 1 } else { -1 };
                sign * m.get(0, j).unwrap() * m.minor(0, j).unwrap().determinant_cofactor().unwrap()
            })
            .sum();
        assert_eq!(expanded, -546499540);
    }
}
