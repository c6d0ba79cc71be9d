use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
}

/// Canonical residue identity shared by the structure model and the
/// secondary-structure assignment records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: char,
    pub residue_number: isize,
}

impl ResidueKey {
    pub fn new(chain_id: char, residue_number: isize) -> Self {
        Self {
            chain_id,
            residue_number,
        }
    }

    /// Key of the residue `offset` positions away in the same chain.
    pub fn offset(&self, offset: isize) -> Self {
        Self {
            chain_id: self.chain_id,
            residue_number: self.residue_number + offset,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.residue_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_chain_and_shifts_number() {
        let key = ResidueKey::new('B', 10);
        assert_eq!(key.offset(1), ResidueKey::new('B', 11));
        assert_eq!(key.offset(-1), ResidueKey::new('B', 9));
    }

    #[test]
    fn keys_order_by_chain_then_number() {
        let mut keys = vec![
            ResidueKey::new('B', 1),
            ResidueKey::new('A', 5),
            ResidueKey::new('A', 2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                ResidueKey::new('A', 2),
                ResidueKey::new('A', 5),
                ResidueKey::new('B', 1),
            ]
        );
    }

    #[test]
    fn display_formats_chain_and_number() {
        assert_eq!(ResidueKey::new('A', -3).to_string(), "A:-3");
    }
}
