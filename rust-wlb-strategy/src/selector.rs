//! Upstream face selection.
//!
//! A face is sampled from the weighted distribution over the prefix's
//! candidates, then the table is scanned from the sampled position for the
//! first eligible face, wrapping around once. Eligible means: not the
//! ingress face, and forwarding to it would not violate the PIT entry's
//! scope.

use crate::config::SamplerMode;
use crate::face_table::WeightedFaceTable;
use crate::tables::face::Faces;
use crate::tables::pit::PitEntry;
use log::{debug, warn};
use rand::Rng;
use rust_wlb_common::types::{FaceId, INVALID_FACE_ID};

/// Picks an upstream face for an Interest that arrived on `in_face`.
///
/// Returns `None` when no candidate is eligible; the caller rejects the
/// pending Interest then.
pub(crate) fn select_upstream<R: Rng>(
    rng: &mut R,
    mode: SamplerMode,
    table: &WeightedFaceTable,
    faces: &Faces,
    in_face: FaceId,
    pit_entry: &PitEntry,
) -> Option<FaceId> {
    if table.is_empty() {
        debug!("no candidate faces for {}", pit_entry.name());
        return None;
    }

    let mut ids = Vec::with_capacity(table.len() + 1);
    let mut weights = Vec::with_capacity(table.len());
    for face in table.iter_by_id() {
        ids.push(face.face_id());
        weights.push(face.weight());
    }
    ids.push(INVALID_FACE_ID);

    let sampled = sample_position(rng, mode, &ids, &weights);
    debug!("sampled position {} ({})", sampled, ids[sampled]);

    let eligible = |candidate: FaceId| {
        candidate != in_face
            && faces
                .get(candidate)
                .is_some_and(|face| !pit_entry.violates_scope(face))
    };

    let selected = scan_from(&ids[..ids.len() - 1], sampled, eligible);
    match selected {
        Some(face) => debug!("selected {}", face),
        None => warn!("no face selected for forwarding {}", pit_entry.name()),
    }
    selected
}

/// Draws a position from the weighted distribution over the candidates.
///
/// `ids` is ascending and terminated by the sentinel; `weights` holds one
/// entry per real id. In id-spaced mode each candidate's mass is its
/// weight times the id interval it owns. Zero total mass falls back to
/// position 0.
fn sample_position<R: Rng>(
    rng: &mut R,
    mode: SamplerMode,
    ids: &[FaceId],
    weights: &[f64],
) -> usize {
    debug_assert!(ids.len() == weights.len() + 1);

    let masses: Vec<f64> = match mode {
        SamplerMode::Categorical => weights.to_vec(),
        SamplerMode::IdSpaced => weights
            .iter()
            .enumerate()
            .map(|(i, w)| w * (ids[i + 1].0 - ids[i].0) as f64)
            .collect(),
    };

    let total: f64 = masses.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let threshold = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, mass) in masses.iter().enumerate() {
        cumulative += mass;
        if cumulative > threshold {
            return i;
        }
    }
    masses.len() - 1
}

/// Scans for the first eligible candidate starting at `start`, then wraps
/// around over the positions before it.
fn scan_from(
    candidates: &[FaceId],
    start: usize,
    eligible: impl Fn(FaceId) -> bool,
) -> Option<FaceId> {
    let forward = candidates[start..].iter();
    let wrapped = candidates[..start].iter();
    forward.chain(wrapped).copied().find(|&c| eligible(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rust_wlb_common::name::Name;
    use rust_wlb_common::packet::Interest;
    use rust_wlb_common::types::FaceScope;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn ids(raw: &[u64]) -> Vec<FaceId> {
        let mut ids: Vec<FaceId> = raw.iter().copied().map(FaceId).collect();
        ids.push(INVALID_FACE_ID);
        ids
    }

    fn pit_entry(name: &str) -> PitEntry {
        let interest = Interest::new(Name::from_string(name).unwrap(), 1);
        PitEntry::new(&interest)
    }

    fn world(candidates: &[(u64, FaceScope)]) -> (WeightedFaceTable, Faces) {
        use crate::tables::face::Face;
        let mut table = WeightedFaceTable::new();
        let mut faces = Faces::new();
        for &(id, scope) in candidates {
            table.insert(FaceId(id));
            faces.insert(Face::new(FaceId(id), scope)).unwrap();
        }
        (table, faces)
    }

    #[test]
    fn zero_total_mass_falls_back_to_position_zero() {
        let mut r = rng(1);
        let position = sample_position(&mut r, SamplerMode::Categorical, &ids(&[10, 20]), &[0.0, 0.0]);
        assert_eq!(position, 0);
    }

    #[test]
    fn categorical_sampling_never_lands_on_a_zero_weight_face() {
        let mut r = rng(2);
        for _ in 0..200 {
            let position =
                sample_position(&mut r, SamplerMode::Categorical, &ids(&[10, 20, 30]), &[0.0, 1.0, 0.0]);
            assert_eq!(position, 1);
        }
    }

    #[test]
    fn categorical_sampling_covers_positive_weights() {
        let mut r = rng(3);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let position =
                sample_position(&mut r, SamplerMode::Categorical, &ids(&[10, 20]), &[0.5, 0.5]);
            seen[position] = true;
        }
        assert!(seen[0] && seen[1]);
    }

    #[test]
    fn id_spaced_mass_scales_with_the_id_gap() {
        // Face 20 owns the interval up to the sentinel, dwarfing face 10's
        // ten-unit interval even at equal weight.
        let mut r = rng(4);
        let landed_on_wide: usize = (0..100)
            .filter(|_| {
                sample_position(&mut r, SamplerMode::IdSpaced, &ids(&[10, 20]), &[1.0, 1.0]) == 1
            })
            .count();
        assert!(landed_on_wide > 95, "landed on wide interval {landed_on_wide}/100");
    }

    #[test]
    fn scan_starts_at_the_sampled_position() {
        let candidates = [FaceId(10), FaceId(20), FaceId(30)];
        let picked = scan_from(&candidates, 1, |_| true);
        assert_eq!(picked, Some(FaceId(20)));
    }

    #[test]
    fn scan_skips_ineligible_and_moves_forward() {
        let candidates = [FaceId(10), FaceId(20), FaceId(30)];
        let picked = scan_from(&candidates, 0, |c| c != FaceId(10));
        assert_eq!(picked, Some(FaceId(20)));
    }

    #[test]
    fn scan_wraps_around_to_earlier_positions() {
        let candidates = [FaceId(10), FaceId(20), FaceId(30)];
        let picked = scan_from(&candidates, 2, |c| c != FaceId(30));
        assert_eq!(picked, Some(FaceId(10)));
    }

    #[test]
    fn scan_boundary_positions() {
        let candidates = [FaceId(10), FaceId(20), FaceId(30)];
        // First position, only the last face eligible
        assert_eq!(
            scan_from(&candidates, 0, |c| c == FaceId(30)),
            Some(FaceId(30))
        );
        // Last position, only the first face eligible
        assert_eq!(
            scan_from(&candidates, 2, |c| c == FaceId(10)),
            Some(FaceId(10))
        );
        // Nothing eligible anywhere
        assert_eq!(scan_from(&candidates, 1, |_| false), None);
    }

    #[test]
    fn empty_table_selects_nothing() {
        let (table, faces) = world(&[]);
        let pit = pit_entry("/a/x");
        let mut r = rng(5);
        let picked = select_upstream(
            &mut r,
            SamplerMode::Categorical,
            &table,
            &faces,
            FaceId(1),
            &pit,
        );
        assert!(picked.is_none());
    }

    #[test]
    fn lone_ingress_face_selects_nothing() {
        let (table, faces) = world(&[(10, FaceScope::NonLocal)]);
        let pit = pit_entry("/a/x");
        let mut r = rng(6);
        let picked = select_upstream(
            &mut r,
            SamplerMode::Categorical,
            &table,
            &faces,
            FaceId(10),
            &pit,
        );
        assert!(picked.is_none());
    }

    #[test]
    fn all_zero_weights_still_select_an_eligible_face() {
        let (mut table, faces) = world(&[(10, FaceScope::NonLocal), (20, FaceScope::NonLocal)]);
        table.update_delay(FaceId(10), crate::weighted_face::MAX_DELAY_MS);
        table.update_delay(FaceId(20), crate::weighted_face::MAX_DELAY_MS);
        let pit = pit_entry("/a/x");
        let mut r = rng(7);
        let picked = select_upstream(
            &mut r,
            SamplerMode::Categorical,
            &table,
            &faces,
            FaceId(1),
            &pit,
        );
        assert_eq!(picked, Some(FaceId(10)));
    }

    #[test]
    fn scope_violating_faces_are_skipped() {
        let (table, faces) = world(&[(10, FaceScope::NonLocal), (20, FaceScope::Local)]);
        let pit = pit_entry("/localhost/svc/x");
        for seed in 0..16 {
            let mut r = rng(seed);
            let picked = select_upstream(
                &mut r,
                SamplerMode::Categorical,
                &table,
                &faces,
                FaceId(1),
                &pit,
            );
            assert_eq!(picked, Some(FaceId(20)));
        }
    }

    #[test]
    fn ingress_face_is_never_returned() {
        let (table, faces) = world(&[(10, FaceScope::NonLocal), (20, FaceScope::NonLocal)]);
        let pit = pit_entry("/a/x");
        for seed in 0..16 {
            let mut r = rng(seed);
            let picked = select_upstream(
                &mut r,
                SamplerMode::Categorical,
                &table,
                &faces,
                FaceId(20),
                &pit,
            );
            assert_eq!(picked, Some(FaceId(10)));
        }
    }

    #[test]
    fn unregistered_faces_are_ineligible() {
        // Face 20 is in the table but no longer registered with the host
        let (mut table, faces) = world(&[(10, FaceScope::NonLocal)]);
        table.insert(FaceId(20));
        let pit = pit_entry("/a/x");
        for seed in 0..16 {
            let mut r = rng(seed);
            let picked = select_upstream(
                &mut r,
                SamplerMode::Categorical,
                &table,
                &faces,
                FaceId(1),
                &pit,
            );
            assert_eq!(picked, Some(FaceId(10)));
        }
    }
}
