//! Immutable merge of route computation results into a held list.

use std::collections::HashMap;

use crate::domain::models::{RoutePatch, TripRequest};

/// Fold successful route patches into `current` by record id.
///
/// Produces a new list with the same length and id order as `current`.
/// A record whose id matches a patch is replaced by a new record carrying
/// the patch's geometry, with the patch's extra fields spread over the
/// record's opaque fields (patch fields win). Records without a matching
/// patch pass through unchanged, so downstream change detection only
/// observes a difference on records that were actually updated. Neither
/// `current` nor `patches` is mutated.
///
/// Patches whose id does not occur in `current` are ignored.
pub fn merge_patches(current: &[TripRequest], patches: &[RoutePatch]) -> Vec<TripRequest> {
    let by_id: HashMap<&_, &RoutePatch> = patches.iter().map(|p| (&p.id, p)).collect();

    current
        .iter()
        .map(|record| match by_id.get(&record.id) {
            Some(patch) => apply_patch(record, patch),
            None => record.clone(),
        })
        .collect()
}

/// Whether any patch targets a record present in `current`.
///
/// A merge that would match nothing leaves the held list untouched, so
/// callers use this to skip publication entirely.
pub fn any_match(current: &[TripRequest], patches: &[RoutePatch]) -> bool {
    patches
        .iter()
        .any(|p| current.iter().any(|r| r.id == p.id))
}

fn apply_patch(record: &TripRequest, patch: &RoutePatch) -> TripRequest {
    let mut updated = record.clone();
    updated.geometry = Some(patch.geometry.clone());
    for (key, value) in &patch.extra {
        updated.extra.insert(key.clone(), value.clone());
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RequestId;

    fn trip(id: &str) -> TripRequest {
        TripRequest::new(id, "Avignon", "Brest")
    }

    fn patch(id: &str, geometry: &str) -> RoutePatch {
        RoutePatch {
            id: RequestId::new(id),
            geometry: geometry.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_matched_record_gains_geometry() {
        let current = vec![trip("1"), trip("2")];
        let merged = merge_patches(&current, &[patch("1", "poly1")]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].geometry.as_deref(), Some("poly1"));
        assert_eq!(merged[1], current[1]);
    }

    #[test]
    fn test_order_and_length_preserved() {
        let current = vec![trip("c"), trip("a"), trip("b")];
        let merged = merge_patches(&current, &[patch("a", "p"), patch("zzz", "p")]);

        let ids: Vec<_> = merged.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_patches_is_identity() {
        let current = vec![trip("1")];
        let merged = merge_patches(&current, &[]);
        assert_eq!(merged, current);
        assert!(!any_match(&current, &[]));
    }

    #[test]
    fn test_patch_fields_take_precedence() {
        let mut record = trip("1");
        record
            .extra
            .insert("distanceKm".to_string(), serde_json::json!(1.0));

        let mut p = patch("1", "poly");
        p.extra
            .insert("distanceKm".to_string(), serde_json::json!(42.0));
        p.extra
            .insert("durationMin".to_string(), serde_json::json!(55));

        let merged = merge_patches(&[record], &[p]);
        assert_eq!(merged[0].extra.get("distanceKm").unwrap(), 42.0);
        assert_eq!(merged[0].extra.get("durationMin").unwrap(), 55);
    }

    #[test]
    fn test_unmatched_patch_detection() {
        let current = vec![trip("1")];
        assert!(!any_match(&current, &[patch("2", "p")]));
        assert!(any_match(&current, &[patch("2", "p"), patch("1", "p")]));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let current = vec![trip("1")];
        let patches = vec![patch("1", "poly")];
        let _ = merge_patches(&current, &patches);

        assert!(current[0].geometry.is_none());
        assert_eq!(patches[0].geometry, "poly");
    }
}
