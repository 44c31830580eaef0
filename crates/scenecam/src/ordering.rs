//! Deterministic ordering of the final camera list.

use std::cmp::Ordering;

use scenecam_core::{Camera, CameraOrdering};

/// Sorts cameras with the chosen total order.
///
/// The sort is stable, so equal keys keep their generation order and output
/// is reproducible run to run.
pub fn sort_cameras(cameras: &mut [Camera], ordering: CameraOrdering) {
    match ordering {
        CameraOrdering::Unsorted => {}
        CameraOrdering::ScoreDescending => {
            cameras.sort_by(|a, b| {
                b.value
                    .total_cmp(&a.value)
                    .then_with(|| compare_labels(a, b))
            });
        }
        CameraOrdering::LabelAscending => {
            cameras.sort_by(compare_labels);
        }
    }
}

/// Lexicographic label order; unlabeled cameras sort last.
fn compare_labels(a: &Camera, b: &Camera) -> Ordering {
    match (&a.label, &b.label) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
