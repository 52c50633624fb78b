use super::types::{FoldRole, PlannedStep};
use crate::models::{DocumentClass, ExtractionMode};
use crate::pipeline::extraction::mode_for;

/// Order a batch and decide mode and fold role per document.
///
/// Aadhaar documents go first in upload order, then everything else in
/// upload order. Without any Aadhaar the upload order is kept. Only the first
/// position can be primary, and a non-Aadhaar document is primary only when
/// the batch has no Aadhaar at all.
pub fn plan_processing(classes: &[DocumentClass]) -> Vec<PlannedStep> {
    let aadhaar_in_batch = contains_aadhaar(classes);

    let order: Vec<usize> = if aadhaar_in_batch {
        let (aadhaar, rest): (Vec<usize>, Vec<usize>) =
            (0..classes.len()).partition(|&i| classes[i] == DocumentClass::Aadhaar);
        aadhaar.into_iter().chain(rest).collect()
    } else {
        (0..classes.len()).collect()
    };

    order
        .into_iter()
        .enumerate()
        .map(|(position, original_index)| {
            let class = classes[original_index];
            let is_aadhaar = class == DocumentClass::Aadhaar;
            let is_primary = position == 0 && (is_aadhaar || !aadhaar_in_batch);

            let mode = if is_aadhaar {
                ExtractionMode::Full
            } else {
                mode_for(class, is_primary)
            };

            let role = if is_aadhaar {
                FoldRole::Aadhaar
            } else if is_primary {
                FoldRole::SoleSource
            } else {
                FoldRole::Secondary {
                    class,
                    aadhaar_in_batch,
                }
            };

            PlannedStep {
                position,
                original_index,
                class,
                is_primary,
                mode,
                role,
            }
        })
        .collect()
}

pub fn contains_aadhaar(classes: &[DocumentClass]) -> bool {
    classes.contains(&DocumentClass::Aadhaar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use DocumentClass::*;

    #[test]
    fn empty_batch_has_empty_plan() {
        assert!(plan_processing(&[]).is_empty());
    }

    #[test]
    fn aadhaar_moves_to_front() {
        let plan = plan_processing(&[Pan, Aadhaar, VoterId, Aadhaar]);
        let order: Vec<usize> = plan.iter().map(|s| s.original_index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);

        assert!(plan[0].is_primary);
        assert!(!plan[1].is_primary);
        assert_eq!(plan[1].mode, ExtractionMode::Full);
        assert_eq!(plan[1].role, FoldRole::Aadhaar);
        assert_eq!(plan[2].mode, ExtractionMode::PanOnly);
        assert_eq!(plan[3].mode, ExtractionMode::VoterOnly);
        assert_eq!(
            plan[3].role,
            FoldRole::Secondary {
                class: VoterId,
                aadhaar_in_batch: true
            }
        );
    }

    #[test]
    fn without_aadhaar_first_upload_is_sole_source() {
        let plan = plan_processing(&[VoterId, DrivingLicense, Other]);
        assert_eq!(plan[0].original_index, 0);
        assert!(plan[0].is_primary);
        assert_eq!(plan[0].mode, ExtractionMode::Full);
        assert_eq!(plan[0].role, FoldRole::SoleSource);
        assert_eq!(plan[1].mode, ExtractionMode::DlOnly);
        assert_eq!(plan[2].mode, ExtractionMode::Full);
        assert_eq!(
            plan[2].role,
            FoldRole::Secondary {
                class: Other,
                aadhaar_in_batch: false
            }
        );
    }

    #[test]
    fn positions_are_sequential() {
        let plan = plan_processing(&[Other, Aadhaar, Pan]);
        let positions: Vec<usize> = plan.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(plan.iter().filter(|s| s.is_primary).count(), 1);
    }
}
