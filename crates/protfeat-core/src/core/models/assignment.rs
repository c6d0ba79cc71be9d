use super::ids::ResidueKey;
use std::collections::HashMap;
use std::fmt;

/// The four backbone hydrogen-bond columns of an assignment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HBondKind {
    NhToO1,
    OToNh1,
    NhToO2,
    OToNh2,
}

impl HBondKind {
    /// Column order of the assignment output.
    pub const ALL: [HBondKind; 4] = [
        HBondKind::NhToO1,
        HBondKind::OToNh1,
        HBondKind::NhToO2,
        HBondKind::OToNh2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HBondKind::NhToO1 => "nh_to_o1",
            HBondKind::OToNh1 => "o_to_nh1",
            HBondKind::NhToO2 => "nh_to_o2",
            HBondKind::OToNh2 => "o_to_nh2",
        }
    }

    fn index(&self) -> usize {
        match self {
            HBondKind::NhToO1 => 0,
            HBondKind::OToNh1 => 1,
            HBondKind::NhToO2 => 2,
            HBondKind::OToNh2 => 3,
        }
    }
}

impl fmt::Display for HBondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hydrogen-bond partner given as a sequential-number offset and its energy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HBondDescriptor {
    pub offset: i64,
    pub energy: f64,
}

impl HBondDescriptor {
    pub fn new(offset: i64, energy: f64) -> Self {
        Self { offset, energy }
    }
}

/// One per-residue row of the secondary-structure assignment output.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRecord {
    /// Sequential number, counting chain breaks as extra entries.
    pub sequence_number: i64,
    pub key: ResidueKey,
    /// Structure symbol (`H`, `E`, `B`, `G`, `I`, `T`, `S` or blank).
    pub symbol: char,
    pub bridge_labels: [char; 2],
    pub bridge_partners: [i64; 2],
    pub sheet_label: char,
    /// Descriptors in [`HBondKind::ALL`] order.
    pub hbonds: [HBondDescriptor; 4],
}

impl AssignmentRecord {
    pub fn hbond(&self, kind: HBondKind) -> HBondDescriptor {
        self.hbonds[kind.index()]
    }
}

/// Assignment records keyed by residue, with the sequential-number index
/// used to resolve hydrogen-bond partners.
#[derive(Debug, Clone, Default)]
pub struct AssignmentTable {
    records: HashMap<ResidueKey, AssignmentRecord>,
    key_map: HashMap<i64, ResidueKey>,
}

impl AssignmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record, replacing any earlier record for the same residue.
    pub fn insert(&mut self, record: AssignmentRecord) {
        self.key_map.insert(record.sequence_number, record.key);
        self.records.insert(record.key, record);
    }

    pub fn get(&self, key: &ResidueKey) -> Option<&AssignmentRecord> {
        self.records.get(key)
    }

    pub fn key_for_sequence_number(&self, sequence_number: i64) -> Option<ResidueKey> {
        self.key_map.get(&sequence_number).copied()
    }

    /// Residue on the other end of one of `record`'s hydrogen bonds.
    pub fn resolve_partner(&self, record: &AssignmentRecord, kind: HBondKind) -> Option<ResidueKey> {
        let descriptor = record.hbond(kind);
        self.key_for_sequence_number(record.sequence_number + descriptor.offset)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: i64, number: isize, hbonds: [HBondDescriptor; 4]) -> AssignmentRecord {
        AssignmentRecord {
            sequence_number: seq,
            key: ResidueKey::new('A', number),
            symbol: 'E',
            bridge_labels: ['a', ' '],
            bridge_partners: [0, 0],
            sheet_label: 'A',
            hbonds,
        }
    }

    #[test]
    fn hbond_returns_descriptor_in_column_order() {
        let r = record(
            1,
            10,
            [
                HBondDescriptor::new(1, -0.1),
                HBondDescriptor::new(2, -0.2),
                HBondDescriptor::new(3, -0.3),
                HBondDescriptor::new(4, -0.4),
            ],
        );
        assert_eq!(r.hbond(HBondKind::NhToO1).offset, 1);
        assert_eq!(r.hbond(HBondKind::OToNh1).offset, 2);
        assert_eq!(r.hbond(HBondKind::NhToO2).offset, 3);
        assert_eq!(r.hbond(HBondKind::OToNh2).offset, 4);
    }

    #[test]
    fn resolve_partner_uses_sequential_number_offsets() {
        let mut table = AssignmentTable::new();
        table.insert(record(
            5,
            20,
            [
                HBondDescriptor::new(2, -2.0),
                HBondDescriptor::new(-10, -1.0),
                HBondDescriptor::default(),
                HBondDescriptor::default(),
            ],
        ));
        table.insert(record(7, 23, Default::default()));

        let r = table.get(&ResidueKey::new('A', 20)).unwrap().clone();
        assert_eq!(
            table.resolve_partner(&r, HBondKind::NhToO1),
            Some(ResidueKey::new('A', 23))
        );
        assert_eq!(table.resolve_partner(&r, HBondKind::OToNh1), None);
        assert_eq!(
            table.resolve_partner(&r, HBondKind::NhToO2),
            Some(ResidueKey::new('A', 20))
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn kind_names_match_assignment_columns() {
        let names: Vec<_> = HBondKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["nh_to_o1", "o_to_nh1", "nh_to_o2", "o_to_nh2"]);
    }
}
