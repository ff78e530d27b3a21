use std::num::NonZeroUsize;

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{Result, TrainError};

/// A fixed-order, re-iterable collection of paired samples.
///
/// A `Dataset` only *provides access* to its samples: one feature row and one
/// scalar label per sample. It does not batch lazily loaded data, shuffle, or
/// interpret the labels in any way; iteration order is the row order it was
/// built with, every time.
pub struct Dataset {
    x: Array2<f32>,
    y: Array1<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one row per sample.
    /// * `y` - The label vector, one entry per sample.
    ///
    /// # Errors
    /// Returns `TrainError::ShapeMismatch` if `x` and `y` disagree on the
    /// number of samples.
    pub fn new(x: Array2<f32>, y: Array1<f32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(TrainError::ShapeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        Ok(Self { x, y })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Returns `true` if the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of features per sample.
    pub fn features(&self) -> usize {
        self.x.ncols()
    }

    /// Returns a view of the full feature matrix.
    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    /// Returns a view of the full label vector.
    pub fn y(&self) -> ArrayView1<'_, f32> {
        self.y.view()
    }

    /// Returns an iterator of `(features, labels)` mini-batches in row order.
    ///
    /// The last batch may be shorter than `batch_size`. Calling `batches`
    /// again restarts iteration from the first row.
    pub fn batches(&self, batch_size: NonZeroUsize) -> Batches<'_> {
        Batches {
            x: self.x.view(),
            y: self.y.view(),
            batch_size: batch_size.get(),
            row: 0,
        }
    }
}

/// Iterator over a dataset's mini-batches. See [`Dataset::batches`].
#[derive(Clone)]
pub struct Batches<'a> {
    x: ArrayView2<'a, f32>,
    y: ArrayView1<'a, f32>,
    batch_size: usize,
    row: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = (ArrayView2<'a, f32>, ArrayView1<'a, f32>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.x.nrows() {
            return None;
        }

        let end = (self.row + self.batch_size).min(self.x.nrows());
        let xb = self.x.slice_move(s![self.row..end, ..]);
        let yb = self.y.slice_move(s![self.row..end]);
        self.row = end;

        Some((xb, yb))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dataset(rows: usize) -> Dataset {
        let x = Array2::from_shape_fn((rows, 2), |(i, j)| (i * 2 + j) as f32);
        let y = Array1::from_shape_fn(rows, |i| (i % 2) as f32);
        Dataset::new(x, y).unwrap()
    }

    #[test]
    fn test_rejects_mismatched_labels() {
        let x = Array2::<f32>::zeros((3, 2));
        let y = Array1::<f32>::zeros(4);

        assert!(matches!(
            Dataset::new(x, y),
            Err(TrainError::ShapeMismatch { what: "labels", got: 4, expected: 3 })
        ));
    }

    #[test]
    fn test_batches_cover_all_rows_in_order() {
        let ds = dataset(5);
        let batch_size = NonZeroUsize::new(2).unwrap();

        let batches: Vec<_> = ds.batches(batch_size).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].0.nrows(), 2);
        assert_eq!(batches[1].0.nrows(), 2);
        assert_eq!(batches[2].0.nrows(), 1, "last batch may be short");

        // Row order must be the construction order.
        assert_eq!(batches[0].0[[0, 0]], 0.);
        assert_eq!(batches[1].0[[0, 0]], 4.);
        assert_eq!(batches[2].0[[0, 0]], 8.);
        assert_eq!(batches[2].1[0], 0.);
    }

    #[test]
    fn test_batches_restart_identically() {
        let ds = dataset(4);
        let batch_size = NonZeroUsize::new(3).unwrap();

        let first: Vec<_> = ds.batches(batch_size).map(|(x, _)| x.to_owned()).collect();
        let second: Vec<_> = ds.batches(batch_size).map(|(x, _)| x.to_owned()).collect();

        assert_eq!(first, second);
    }
}
