// Change detection between the persisted top-N and a fresh ranking
use marketrank_core::{ScoredProduct, TopSnapshot};

/// Whether `current` differs from the `previous` top-N.
///
/// Comparison is positional: index `i` of both lists must name the same
/// product with the exact same score. A missing snapshot or a length
/// mismatch always counts as a change.
pub fn detect_change(previous: Option<&TopSnapshot>, current: &[ScoredProduct]) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    if previous.entries.len() != current.len() {
        return true;
    }

    previous
        .entries
        .iter()
        .zip(current)
        .any(|(old, new)| old.product_id != *new.id() || old.score != new.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketrank_core::{ProductRecord, SnapshotEntry};

    fn scored(id: u64, score: f64) -> ScoredProduct {
        ScoredProduct::new(ProductRecord::new(id, format!("p{}", id), 1.0), score)
    }

    fn snapshot(entries: &[(u64, f64)]) -> TopSnapshot {
        TopSnapshot::new(
            entries
                .iter()
                .map(|&(id, score)| SnapshotEntry { product_id: id.into(), score })
                .collect(),
            0,
        )
    }

    #[test]
    fn test_no_previous() {
        assert!(detect_change(None, &[scored(1, 10.0)]));
    }

    #[test]
    fn test_identical() {
        let prev = snapshot(&[(1, 75.0), (2, 32.0)]);
        assert!(!detect_change(Some(&prev), &[scored(1, 75.0), scored(2, 32.0)]));
    }

    #[test]
    fn test_score_changed() {
        let prev = snapshot(&[(1, 75.0), (2, 32.0)]);
        assert!(detect_change(Some(&prev), &[scored(1, 75.0), scored(2, 32.5)]));
    }

    #[test]
    fn test_reordered_same_set() {
        let prev = snapshot(&[(1, 50.0), (2, 50.0)]);
        assert!(detect_change(Some(&prev), &[scored(2, 50.0), scored(1, 50.0)]));
    }

    #[test]
    fn test_length_mismatch() {
        let prev = snapshot(&[(1, 75.0)]);
        assert!(detect_change(Some(&prev), &[scored(1, 75.0), scored(2, 32.0)]));

        let prev = snapshot(&[(1, 75.0), (2, 32.0)]);
        assert!(detect_change(Some(&prev), &[scored(1, 75.0)]));
    }

    #[test]
    fn test_nan_in_snapshot_forces_change() {
        let prev = snapshot(&[(1, f64::NAN)]);
        assert!(detect_change(Some(&prev), &[scored(1, 75.0)]));
    }
}
