use super::assignment::HBondKind;
use super::ids::ResidueKey;
use std::fmt;

/// The structural class of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Helix,
    Strand { sheet_label: char },
    /// Any non-helix, non-strand run. `class_symbol` is the collapsed
    /// assignment symbol (`G`, `I`, `T` or blank).
    Loop { class_symbol: char },
}

/// A run of consecutive residues of one chain sharing a structural class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub residues: Vec<ResidueKey>,
}

impl Segment {
    pub fn new(kind: SegmentKind, residues: Vec<ResidueKey>) -> Self {
        Self { kind, residues }
    }

    pub fn sheet_label(&self) -> Option<char> {
        match self.kind {
            SegmentKind::Strand { sheet_label } => Some(sheet_label),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetEdgeKind {
    /// Peptide bond between consecutive residues of one strand.
    Backbone,
    HBond(HBondKind),
}

impl fmt::Display for SheetEdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetEdgeKind::Backbone => f.write_str("backbone"),
            SheetEdgeKind::HBond(kind) => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetEdge {
    pub from: ResidueKey,
    pub to: ResidueKey,
    pub kind: SheetEdgeKind,
}

/// Directed multigraph of one beta sheet.
///
/// Nodes are the residues of every strand carrying the sheet label, in strand
/// order. Edges keep their insertion order and may repeat between the same
/// pair of residues with different kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGraph {
    pub sheet_label: char,
    nodes: Vec<ResidueKey>,
    edges: Vec<SheetEdge>,
}

impl SheetGraph {
    pub(crate) fn new(sheet_label: char, nodes: Vec<ResidueKey>) -> Self {
        Self {
            sheet_label,
            nodes,
            edges: Vec::new(),
        }
    }

    pub(crate) fn add_edge(&mut self, from: ResidueKey, to: ResidueKey, kind: SheetEdgeKind) {
        self.edges.push(SheetEdge { from, to, kind });
    }

    pub fn nodes(&self) -> &[ResidueKey] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SheetEdge] {
        &self.edges
    }

    pub fn contains(&self, key: &ResidueKey) -> bool {
        self.nodes.contains(key)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges_of_kind(&self, kind: SheetEdgeKind) -> impl Iterator<Item = &SheetEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Targets of the outgoing edges of `key` with the given kind.
    pub fn neighbors_by_type(&self, key: &ResidueKey, kind: SheetEdgeKind) -> Vec<ResidueKey> {
        self.edges
            .iter()
            .filter(|e| e.from == *key && e.kind == kind)
            .map(|e| e.to)
            .collect()
    }

    /// Number of hydrogen-bond edges of any kind.
    pub fn hbond_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|e| matches!(e.kind, SheetEdgeKind::HBond(_)))
            .count()
    }
}
