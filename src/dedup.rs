//! GPS-space duplicate suppression across overlapping source images
//!
//! The same physical plant is usually detected in several overlapping
//! images; this pass keeps the most confident observation and discards the
//! rest within a distance threshold.

use std::collections::HashSet;

use crate::types::GpsDetection;

/// Mean Earth radius in meters, for haversine distance
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two positions, in meters
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Suppresses near-duplicate detections, returning the ids to discard
///
/// Detections are visited in confidence-descending order (stable on ties).
/// Each still-active detection wins and suppresses every later still-active
/// detection within `threshold_m`. Suppression is transitive through the
/// winner only: a point suppressed by a winner is excluded from all further
/// comparison, so chains do not merge into connected clusters. This exact
/// cascade is load-bearing for downstream behavior; do not replace it with
/// connected-components clustering.
///
/// Surviving detections are never mutated or merged. O(n^2); fine at
/// per-orthophoto detection counts. Must run single-threaded per set, since
/// every step depends on earlier suppression decisions.
pub fn suppress(detections: &[GpsDetection], threshold_m: f64) -> HashSet<String> {
    let mut order: Vec<usize> = (0..detections.len()).collect();
    // sort_by is stable, so equal confidences keep input order.
    order.sort_by(|&a, &b| {
        detections[b]
            .confidence
            .partial_cmp(&detections[a].confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut suppressed_idx = vec![false; detections.len()];
    let mut suppressed_ids = HashSet::new();

    for (pos, &winner) in order.iter().enumerate() {
        if suppressed_idx[winner] {
            continue;
        }

        for &later in &order[pos + 1..] {
            if suppressed_idx[later] {
                continue;
            }

            let distance = haversine_distance_m(
                detections[winner].latitude,
                detections[winner].longitude,
                detections[later].latitude,
                detections[later].longitude,
            );

            if distance <= threshold_m {
                suppressed_idx[later] = true;
                suppressed_ids.insert(detections[later].id.clone());
            }
        }
    }

    suppressed_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GpsDetection;

    #[test]
    fn test_haversine_sanity() {
        assert_eq!(haversine_distance_m(47.0, 11.0, 47.0, 11.0), 0.0);

        // One degree of latitude is roughly 111.2 km.
        let d = haversine_distance_m(47.0, 11.0, 48.0, 11.0);
        assert!((d - 111_195.0).abs() < 100.0);

        // Sub-meter scale stays accurate.
        let d = haversine_distance_m(0.0, 0.0, 0.0, 0.0000045);
        assert!((d - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_lower_confidence_duplicate_suppressed() {
        let detections = vec![
            GpsDetection::new("a", 0.0, 0.0, 0.9),
            GpsDetection::new("b", 0.0, 0.0000005, 0.5),
        ];

        let suppressed = suppress(&detections, 1.0);
        assert_eq!(suppressed.len(), 1);
        assert!(suppressed.contains("b"));
    }

    #[test]
    fn test_confidence_order_beats_input_order() {
        let detections = vec![
            GpsDetection::new("weak", 0.0, 0.0, 0.4),
            GpsDetection::new("strong", 0.0, 0.0000005, 0.95),
        ];

        let suppressed = suppress(&detections, 1.0);
        assert!(suppressed.contains("weak"));
        assert!(!suppressed.contains("strong"));
    }

    #[test]
    fn test_distant_detections_untouched() {
        let detections = vec![
            GpsDetection::new("a", 0.0, 0.0, 0.9),
            GpsDetection::new("b", 0.0, 0.001, 0.8),
            GpsDetection::new("c", 0.001, 0.0, 0.7),
        ];

        // All pairwise distances exceed 1 m by far.
        assert!(suppress(&detections, 1.0).is_empty());
    }

    #[test]
    fn test_greedy_cascade_not_connected_components() {
        // Collinear chain, ~0.9 m spacing with a 1 m threshold:
        // B is within range of A; C is within range of B only.
        let step = 0.9 / 111_195.0;
        let detections = vec![
            GpsDetection::new("a", 0.0, 0.0, 0.9),
            GpsDetection::new("b", step, 0.0, 0.8),
            GpsDetection::new("c", 2.0 * step, 0.0, 0.7),
        ];

        // A wins and suppresses B. C is out of A's range, and B is already
        // suppressed so it cannot suppress C; yet C's own turn comes after B
        // was removed, leaving C a winner.
        let suppressed = suppress(&detections, 1.0);
        assert!(suppressed.contains("b"));
        assert!(!suppressed.contains("c"));
        assert_eq!(suppressed.len(), 1);
    }

    #[test]
    fn test_tie_break_is_stable() {
        let detections = vec![
            GpsDetection::new("first", 0.0, 0.0, 0.5),
            GpsDetection::new("second", 0.0, 0.0000005, 0.5),
        ];

        // Equal confidence: input order decides, the earlier one wins.
        let suppressed = suppress(&detections, 1.0);
        assert!(suppressed.contains("second"));
        assert!(!suppressed.contains("first"));
    }
}
