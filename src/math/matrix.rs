use rand::prelude::*;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Mul};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Uniform samples in [-1, 1).
    pub fn random(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    /// Builds a matrix from row vectors. An empty `data` yields a 0×0 matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data
        }
    }

    /// Wraps a single vector as a 1×n row matrix.
    pub fn row(values: &[f64]) -> Matrix {
        Matrix::from_data(vec![values.to_vec()])
    }

    /// True when every row has exactly `cols` entries.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        // i-k-j order walks `rhs` row by row, which matters for wide image inputs.
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i][k];
                if a == 0.0 {
                    continue;
                }
                let rhs_row = &rhs.data[k];
                for j in 0..rhs.cols {
                    res.data[i][j] += a * rhs_row[j];
                }
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_times_matrix() {
        let x = Matrix::row(&[1.0, 2.0]);
        let w = Matrix::from_data(vec![vec![1.0, 0.0, 2.0], vec![0.5, 1.0, -1.0]]);
        let out = &x * &w;
        assert_eq!(out.rows, 1);
        assert_eq!(out.cols, 3);
        assert_eq!(out.data[0], vec![2.0, 2.0, 0.0]);
    }

    #[test]
    fn add_is_elementwise() {
        let a = Matrix::row(&[1.0, 2.0]);
        let b = Matrix::row(&[0.5, -2.0]);
        assert_eq!((&a + &b).data[0], vec![1.5, 0.0]);
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn mul_rejects_mismatched_shapes() {
        let _ = &Matrix::zeros(1, 3) * &Matrix::zeros(2, 2);
    }

    #[test]
    fn random_stays_in_range() {
        let m = Matrix::random(8, 8);
        assert!(m.is_well_formed());
        assert!(m.data.iter().flatten().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn empty_data_is_zero_by_zero() {
        let m = Matrix::from_data(vec![]);
        assert_eq!((m.rows, m.cols), (0, 0));
    }
}
