use phf::{Set, phf_set};

static WATER_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "D2O", "TIP", "TIP3", "TIP4", "SOL", "SPC",
};

pub const BACKBONE_N: &str = "N";
pub const BACKBONE_CA: &str = "CA";
pub const BACKBONE_C: &str = "C";

pub fn is_water_residue(residue_name: &str) -> bool {
    WATER_RESIDUE_NAMES.contains(residue_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_water_residue_recognizes_common_solvent_names() {
        assert!(is_water_residue("HOH"));
        assert!(is_water_residue("WAT"));
        assert!(is_water_residue("DOD"));
        assert!(is_water_residue("TIP3"));
    }

    #[test]
    fn is_water_residue_trims_whitespace_and_is_case_sensitive() {
        assert!(is_water_residue(" HOH "));
        assert!(!is_water_residue("hoh"));
    }

    #[test]
    fn is_water_residue_returns_false_for_amino_acids_and_ligands() {
        assert!(!is_water_residue("ALA"));
        assert!(!is_water_residue("HEM"));
        assert!(!is_water_residue(""));
    }
}
