use std::{f32, num::NonZeroUsize};

use ndarray::{Array2, ArrayView2, Axis, s};
use rand::Rng;

use crate::error::{NnErr, Result};

/// An in-memory supervised dataset: one input row per target row.
pub struct Dataset {
    x: Array2<f32>,
    y: Array2<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Returns
    /// An error if `x` and `y` disagree on the number of rows.
    pub fn new(x: Array2<f32>, y: Array2<f32>) -> Result<Self> {
        if x.nrows() != y.nrows() {
            return Err(NnErr::ShapeMismatch {
                what: "dataset targets",
                got: y.dim(),
                expected: (x.nrows(), y.ncols()),
            });
        }

        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView2<'_, f32> {
        self.y.view()
    }

    /// Yields `(input, target)` mini-batches: non-overlapping contiguous
    /// slices in original row order, the last one possibly shorter.
    pub fn batches(
        &self,
        batch_size: NonZeroUsize,
    ) -> impl Iterator<Item = (ArrayView2<'_, f32>, ArrayView2<'_, f32>)> {
        let size = batch_size.get();
        (0..self.len()).step_by(size).map(move |start| {
            let end = (start + size).min(self.len());
            (
                self.x.slice(s![start..end, ..]),
                self.y.slice(s![start..end, ..]),
            )
        })
    }
}

/// Samples `n` points uniformly from the unit square. A point belongs to
/// class 1 when it falls inside the disc of squared radius `1/sqrt(2*pi)`
/// centered at `(0.5, 0.5)`, and to class 0 otherwise; targets are one-hot
/// over the two classes. Points outside the disc are rare (roughly 2.4%).
pub fn generate_disc_set<R: Rng>(n: usize, rng: &mut R) -> Result<Dataset> {
    let radius_sq = 1. / (2. * f32::consts::PI).sqrt();

    let x = Array2::from_shape_simple_fn((n, 2), || rng.random::<f32>());
    let mut y = Array2::zeros((n, 2));
    for (point, mut target) in x.axis_iter(Axis(0)).zip(y.axis_iter_mut(Axis(0))) {
        let dist_sq = (point[0] - 0.5).powi(2) + (point[1] - 0.5).powi(2);
        let class = usize::from(dist_sq < radius_sq);
        target[class] = 1.;
    }

    Dataset::new(x, y)
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn rejects_row_count_mismatch() {
        let x = Array2::zeros((3, 2));
        let y = Array2::zeros((2, 2));

        assert!(matches!(
            Dataset::new(x, y),
            Err(NnErr::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn batches_cover_all_rows_in_order() {
        let x = array![[0.], [1.], [2.], [3.], [4.]];
        let y = x.clone();
        let dataset = Dataset::new(x, y).unwrap();

        let batch_size = NonZeroUsize::new(2).unwrap();
        let batches: Vec<_> = dataset.batches(batch_size).collect();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].0, array![[0.], [1.]]);
        assert_eq!(batches[1].0, array![[2.], [3.]]);
        // the final batch is partial
        assert_eq!(batches[2].0, array![[4.]]);
    }

    #[test]
    fn oversized_batch_yields_the_whole_dataset() {
        let x = array![[0.], [1.]];
        let dataset = Dataset::new(x.clone(), x).unwrap();

        let batch_size = NonZeroUsize::new(10).unwrap();
        let batches: Vec<_> = dataset.batches(batch_size).collect();

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].0.nrows(), 2);
    }

    #[test]
    fn disc_targets_are_one_hot_and_consistent() {
        let mut rng = StdRng::seed_from_u64(3);
        let dataset = generate_disc_set(200, &mut rng).unwrap();
        let radius_sq = 1. / (2. * f32::consts::PI).sqrt();

        assert_eq!(dataset.len(), 200);
        for (point, target) in dataset
            .x()
            .axis_iter(Axis(0))
            .zip(dataset.y().axis_iter(Axis(0)))
        {
            let dist_sq = (point[0] - 0.5).powi(2) + (point[1] - 0.5).powi(2);
            let class = usize::from(dist_sq < radius_sq);
            assert_eq!(target[class], 1.);
            assert_eq!(target[1 - class], 0.);
        }
    }

    #[test]
    fn disc_generation_is_deterministic_under_a_seed() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);

        let first = generate_disc_set(50, &mut a).unwrap();
        let second = generate_disc_set(50, &mut b).unwrap();

        assert_eq!(first.x(), second.x());
        assert_eq!(first.y(), second.y());
    }
}
