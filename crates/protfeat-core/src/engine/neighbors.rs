use crate::core::models::ids::{ResidueId, ResidueKey};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::identifiers::BACKBONE_CA;
use crate::engine::config::{NeighborConfig, NeighborPolicy};
use kiddo::{KdTree, SquaredEuclidean};
use tracing::{debug, instrument};

/// A query residue and the non-bonded residue chosen as its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborPair {
    pub query: ResidueId,
    pub neighbor: ResidueId,
}

#[derive(Debug, Clone, Copy)]
struct Center {
    residue_id: ResidueId,
    key: ResidueKey,
}

/// Sequence-adjacent residues of one chain are covalently bonded.
pub fn is_bonded(a: &ResidueKey, b: &ResidueKey) -> bool {
    a.chain_id == b.chain_id && (a.residue_number - b.residue_number).abs() == 1
}

/// Nearest-neighbor search over the CA atoms of one model's standard residues.
pub struct NeighborFinder {
    centers: Vec<Center>,
    positions: Vec<[f64; 3]>,
    tree: KdTree<f64, 3>,
}

impl NeighborFinder {
    /// Indexes every standard residue that has a CA atom.
    ///
    /// Hetero groups and solvent are never centers; standard residues
    /// without a CA are left out of the index.
    pub fn new(system: &MolecularSystem) -> Self {
        let mut centers = Vec::new();
        let mut positions = Vec::new();

        for (residue_id, residue) in system.residues_iter() {
            if !residue.is_standard() {
                continue;
            }
            let (Some(ca), Some(key)) = (
                system.atom_position(residue_id, BACKBONE_CA),
                system.residue_key(residue_id),
            ) else {
                debug!(residue = residue.number, "Residue has no CA atom; not indexed.");
                continue;
            };
            centers.push(Center { residue_id, key });
            positions.push([ca.x, ca.y, ca.z]);
        }

        let tree: KdTree<f64, 3> = (&positions).into();
        Self {
            centers,
            positions,
            tree,
        }
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Picks one non-bonded neighbor per indexed residue.
    ///
    /// Each residue's `k` nearest centers are retrieved, its own entry is
    /// removed and the rest are inspected nearest first. Candidates on the
    /// same chain at residue number ±1 are rejected. Among the survivors the
    /// policy decides which one is kept; residues with no survivor yield no
    /// pair. Equidistant candidates come back in k-d tree order.
    #[instrument(skip_all, name = "neighbor_search")]
    pub fn find_pairs(&self, config: &NeighborConfig) -> Vec<NeighborPair> {
        let k = config.k.min(self.centers.len());
        if k == 0 {
            return Vec::new();
        }

        let pairs: Vec<NeighborPair> = self
            .centers
            .iter()
            .enumerate()
            .filter_map(|(index, center)| {
                let mut found = self
                    .tree
                    .nearest_n::<SquaredEuclidean>(&self.positions[index], k);

                match found.iter().position(|hit| hit.item as usize == index) {
                    Some(own) => {
                        found.remove(own);
                    }
                    None => {
                        found.pop();
                    }
                }

                let mut survivors = found
                    .iter()
                    .map(|hit| &self.centers[hit.item as usize])
                    .filter(|candidate| !is_bonded(&center.key, &candidate.key));

                let chosen = match config.policy {
                    NeighborPolicy::LastSurviving => survivors.last(),
                    NeighborPolicy::ClosestNonBonded => survivors.next(),
                };

                chosen.map(|candidate| NeighborPair {
                    query: center.residue_id,
                    neighbor: candidate.residue_id,
                })
            })
            .collect();

        debug!(
            centers = self.centers.len(),
            pairs = pairs.len(),
            "Neighbor search finished."
        );
        pairs
    }
}
