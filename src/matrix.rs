use std::ops::AddAssign;
use std::ops::Index;
use std::ops::IndexMut;

use num::Num;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// Row-major matrix backed by a single contiguous buffer.
///
/// Connection weights use one row per source node and one column per
/// destination node, which is also the order of the weight file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Matrix<T>
where
    T: MatrixItem,
{
    pub rows: usize,
    pub cols: usize,
    pub items: Vec<T>,
}

impl<T> Matrix<T>
where
    T: MatrixItem,
{
    pub fn new(rows: usize, cols: usize) -> Self {
        let items = vec![T::default(); rows * cols];

        Self { rows, cols, items }
    }

    pub fn with_items<J: Into<Vec<T>>>(items: J, rows: usize, cols: usize) -> Self {
        let items = items.into();
        if items.len() != rows * cols {
            panic!("Cannot build a {rows}x{cols} matrix from {} items.", items.len());
        }

        Self { rows, cols, items }
    }

    pub fn set_items(&mut self, input: &[T]) {
        if input.len() != self.items.len() {
            panic!("Input mismatch while setting data to matrix.");
        }

        self.items.copy_from_slice(input);
    }

    pub fn fill(&mut self, value: T) {
        for item in self.items.iter_mut() {
            *item = value;
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        if row >= self.rows {
            panic!("Row out of bounds while indexing matrix.");
        }

        &self.items[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        if row >= self.rows {
            panic!("Row out of bounds while indexing matrix.");
        }

        &mut self.items[row * self.cols..(row + 1) * self.cols]
    }
}

impl<T> Matrix<T>
where
    T: MatrixItem + SampleUniform,
{
    /// Draws every item uniformly from `[min, max]`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, min: T, max: T) {
        for item in self.items.iter_mut() {
            *item = rng.gen_range(min..=max);
        }
    }
}

pub trait MatrixItem
where
    Self: std::fmt::Debug + Default + Clone + Copy + PartialOrd + Num + AddAssign,
{
}

impl MatrixItem for f32 {}
impl MatrixItem for f64 {}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: MatrixItem,
{
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        if row >= self.rows || col >= self.cols {
            panic!("Index out of bounds while indexing matrix.");
        }

        &self.items[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: MatrixItem,
{
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        if row >= self.rows || col >= self.cols {
            panic!("Index out of bounds while indexing matrix.");
        }

        &mut self.items[row * self.cols + col]
    }
}
