//! Overlap spreading for resolved repositories.
//!
//! Many owners share a city, and identical coordinates would stack markers
//! on top of each other. Entries are bucketed by coordinates rounded to two
//! decimal places; the first entry of a bucket keeps its position and each
//! later one is pushed diagonally by a growing multiple of the step.

use std::collections::HashMap;

use crate::domain::models::{Coordinates, EnrichedRepository};

/// Offset added per prior occurrence in the same bucket, in degrees.
pub const DEFAULT_OFFSET_STEP_DEGREES: f64 = 0.5;

/// Bucket key: coordinates rounded to two decimal places, scaled to integers
/// so that -0.00 and 0.00 land together.
#[allow(clippy::cast_possible_truncation)]
fn bucket_key(coords: Coordinates) -> (i64, i64) {
    ((coords.lat * 100.0).round() as i64, (coords.lon * 100.0).round() as i64)
}

/// Drop unresolved entries and spread the remaining overlapping ones.
///
/// Input order is preserved and decides which entry of a bucket stays put.
/// Offsets are computed from the original (unshifted) coordinates only.
pub fn spread_overlapping(
    entries: Vec<EnrichedRepository>,
    step_degrees: f64,
) -> Vec<EnrichedRepository> {
    let mut seen: HashMap<(i64, i64), u32> = HashMap::new();

    entries
        .into_iter()
        .filter_map(|mut entry| {
            let coords = entry.owner.location?;
            let occurrences = seen.entry(bucket_key(coords)).or_insert(0);
            if *occurrences > 0 {
                entry.owner.location = Some(coords.offset(f64::from(*occurrences) * step_degrees));
            }
            *occurrences += 1;
            Some(entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{OwnerRef, RepositorySummary};
    use proptest::prelude::*;

    fn repo(id: u64, location: Option<(f64, f64)>) -> EnrichedRepository {
        let summary = RepositorySummary {
            id,
            name: format!("repo-{id}"),
            full_name: format!("owner-{id}/repo-{id}"),
            description: None,
            stargazers_count: 5000,
            forks_count: 100,
            language: Some("Rust".to_string()),
            html_url: format!("https://github.com/owner-{id}/repo-{id}"),
            owner: OwnerRef {
                login: format!("owner-{id}"),
                avatar_url: String::new(),
                html_url: String::new(),
                profile_url: String::new(),
            },
        };
        EnrichedRepository::from_summary(summary, location.map(|(lat, lon)| Coordinates::new(lat, lon)))
    }

    fn assert_close(actual: Coordinates, lat: f64, lon: f64) {
        assert!((actual.lat - lat).abs() < 1e-9, "lat {} != {lat}", actual.lat);
        assert!((actual.lon - lon).abs() < 1e-9, "lon {} != {lon}", actual.lon);
    }

    #[test]
    fn test_second_entry_in_bucket_is_offset() {
        let out = spread_overlapping(
            vec![repo(1, Some((40.7128, -74.0060))), repo(2, Some((40.7128, -74.0060)))],
            DEFAULT_OFFSET_STEP_DEGREES,
        );

        assert_close(out[0].owner.location.unwrap(), 40.7128, -74.0060);
        assert_close(out[1].owner.location.unwrap(), 41.2128, -73.5060);
    }

    #[test]
    fn test_offset_grows_with_occurrence() {
        let out = spread_overlapping(
            vec![
                repo(1, Some((51.5074, -0.1278))),
                repo(2, Some((51.5074, -0.1278))),
                repo(3, Some((51.5074, -0.1278))),
            ],
            DEFAULT_OFFSET_STEP_DEGREES,
        );

        assert_close(out[2].owner.location.unwrap(), 52.5074, 0.8722);
    }

    #[test]
    fn test_rounding_groups_nearby_points() {
        let out = spread_overlapping(
            vec![repo(1, Some((48.8566, 2.3522))), repo(2, Some((48.8700, 2.3522)))],
            DEFAULT_OFFSET_STEP_DEGREES,
        );

        // 48.86 vs 48.87
        assert_close(out[1].owner.location.unwrap(), 48.8700, 2.3522);

        let out = spread_overlapping(
            vec![repo(1, Some((48.8566, 2.3522))), repo(2, Some((48.8591, 2.3489)))],
            DEFAULT_OFFSET_STEP_DEGREES,
        );
        assert_close(out[1].owner.location.unwrap(), 49.3591, 2.8489);
    }

    #[test]
    fn test_unresolved_entries_are_dropped_without_consuming_slots() {
        let out = spread_overlapping(
            vec![repo(1, None), repo(2, Some((35.0, 139.0))), repo(3, None)],
            DEFAULT_OFFSET_STEP_DEGREES,
        );

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
        assert_close(out[0].owner.location.unwrap(), 35.0, 139.0);
    }

    #[test]
    fn test_buckets_are_independent() {
        let out = spread_overlapping(
            vec![
                repo(1, Some((10.0, 10.0))),
                repo(2, Some((20.0, 20.0))),
                repo(3, Some((10.0, 10.0))),
                repo(4, Some((20.0, 20.0))),
            ],
            DEFAULT_OFFSET_STEP_DEGREES,
        );

        let ids: Vec<u64> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_close(out[2].owner.location.unwrap(), 10.5, 10.5);
        assert_close(out[3].owner.location.unwrap(), 20.5, 20.5);
    }

    proptest! {
        #[test]
        fn prop_preserves_order_of_resolved_entries(
            points in prop::collection::vec(
                prop::option::of((-80.0f64..80.0, -170.0f64..170.0)),
                0..40,
            )
        ) {
            let input: Vec<EnrichedRepository> = points
                .iter()
                .enumerate()
                .map(|(i, p)| repo(i as u64, *p))
                .collect();
            let expected: Vec<u64> = input
                .iter()
                .filter(|r| r.owner.location.is_some())
                .map(|r| r.id)
                .collect();

            let out = spread_overlapping(input, DEFAULT_OFFSET_STEP_DEGREES);
            let ids: Vec<u64> = out.iter().map(|r| r.id).collect();

            prop_assert_eq!(ids, expected);
            prop_assert!(out.iter().all(|r| r.owner.location.is_some()));
        }

        #[test]
        fn prop_first_in_each_bucket_is_unchanged(
            points in prop::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 1..40)
        ) {
            let input: Vec<EnrichedRepository> = points
                .iter()
                .enumerate()
                .map(|(i, p)| repo(i as u64, Some(*p)))
                .collect();

            let out = spread_overlapping(input.clone(), DEFAULT_OFFSET_STEP_DEGREES);

            let mut firsts = std::collections::HashSet::new();
            for (before, after) in input.iter().zip(out.iter()) {
                let original = before.owner.location.unwrap();
                if firsts.insert(bucket_key(original)) {
                    prop_assert_eq!(after.owner.location, Some(original));
                } else {
                    prop_assert_ne!(after.owner.location, Some(original));
                }
            }
        }
    }
}
