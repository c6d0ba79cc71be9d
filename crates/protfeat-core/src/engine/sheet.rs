use crate::core::models::assignment::{AssignmentTable, HBondKind};
use crate::core::models::ids::ResidueKey;
use crate::core::models::secondary::{Segment, SheetEdgeKind, SheetGraph};
use crate::engine::config::SheetConfig;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument, trace};

/// Builds one hydrogen-bond graph per beta sheet.
pub struct SheetGraphBuilder<'a> {
    table: &'a AssignmentTable,
    config: SheetConfig,
}

impl<'a> SheetGraphBuilder<'a> {
    pub fn new(table: &'a AssignmentTable, config: SheetConfig) -> Self {
        Self { table, config }
    }

    /// Builds the graphs of every sheet label found among strand segments,
    /// sorted by label.
    ///
    /// Consecutive residues of a strand are joined by backbone edges. Each
    /// node then gets one edge per hydrogen bond whose energy is strictly
    /// below the configured limit and whose partner belongs to the same sheet.
    #[instrument(skip_all, name = "sheet_graph_builder")]
    pub fn build(&self, segments: &[Segment]) -> Vec<SheetGraph> {
        let mut strands_by_sheet: BTreeMap<char, Vec<&Segment>> = BTreeMap::new();
        for segment in segments {
            if let Some(label) = segment.sheet_label() {
                strands_by_sheet.entry(label).or_default().push(segment);
            }
        }

        let sheets: Vec<SheetGraph> = strands_by_sheet
            .into_iter()
            .map(|(label, strands)| self.build_sheet(label, &strands))
            .collect();
        debug!(sheets = sheets.len(), "Built sheet graphs.");
        sheets
    }

    fn build_sheet(&self, label: char, strands: &[&Segment]) -> SheetGraph {
        let nodes: Vec<ResidueKey> = strands
            .iter()
            .flat_map(|strand| strand.residues.iter().copied())
            .collect();
        let members: HashSet<ResidueKey> = nodes.iter().copied().collect();
        let mut graph = SheetGraph::new(label, nodes.clone());

        for strand in strands {
            for window in strand.residues.windows(2) {
                graph.add_edge(window[0], window[1], SheetEdgeKind::Backbone);
            }
        }

        for node in &nodes {
            let Some(record) = self.table.get(node) else {
                continue;
            };
            for kind in HBondKind::ALL {
                if record.hbond(kind).energy >= self.config.hbond_energy_limit {
                    continue;
                }
                match self.table.resolve_partner(record, kind) {
                    Some(partner) if members.contains(&partner) => {
                        graph.add_edge(*node, partner, SheetEdgeKind::HBond(kind));
                    }
                    partner => {
                        trace!(from = %node, ?partner, %kind, "Dropping hydrogen bond outside sheet.");
                    }
                }
            }
        }
        graph
    }
}
