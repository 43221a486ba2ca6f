use std::num::NonZeroUsize;

use ndarray::{ArrayView1, Axis};

use crate::{arch::Sequential, dataset::Dataset, error::Result};

/// Counts the rows of `dataset` whose predicted class (argmax of the model
/// output) disagrees with the target class (argmax of the one-hot target),
/// running the model batch by batch without touching its backward caches.
pub fn count_errors(
    model: &Sequential,
    dataset: &Dataset,
    batch_size: NonZeroUsize,
) -> Result<usize> {
    let mut errors = 0;

    for (x, y) in dataset.batches(batch_size) {
        let y_pred = model.predict(x)?;
        for (pred, target) in y_pred.axis_iter(Axis(0)).zip(y.axis_iter(Axis(0))) {
            if argmax(pred) != argmax(target) {
                errors += 1;
            }
        }
    }

    Ok(errors)
}

/// Index of the largest element; ties go to the earlier index.
fn argmax(row: ArrayView1<f32>) -> usize {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }
    best
}
