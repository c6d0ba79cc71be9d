use thiserror::Error;

pub const DEFAULT_NEIGHBOR_COUNT: usize = 4;
pub const DEFAULT_HBOND_ENERGY_LIMIT: f64 = -1.5;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Neighbor query size must be at least 2 (got {0})")]
    NeighborCountTooSmall(usize),
    #[error("Hydrogen-bond energy limit must be finite (got {0})")]
    NonFiniteEnergyLimit(f64),
}

/// Which non-bonded candidate a residue keeps as its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborPolicy {
    /// The farthest candidate that survives the covalent-bond filter.
    #[default]
    LastSurviving,
    /// The nearest candidate that survives the covalent-bond filter.
    ClosestNonBonded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborConfig {
    /// Number of nearest centers queried per residue, the residue itself included.
    pub k: usize,
    pub policy: NeighborPolicy,
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_NEIGHBOR_COUNT,
            policy: NeighborPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetConfig {
    /// Hydrogen bonds must be strictly below this energy to become edges.
    pub hbond_energy_limit: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            hbond_energy_limit: DEFAULT_HBOND_ENERGY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureConfig {
    pub neighbors: NeighborConfig,
    pub sheet: SheetConfig,
}

#[derive(Default)]
pub struct FeatureConfigBuilder {
    neighbor_count: Option<usize>,
    neighbor_policy: Option<NeighborPolicy>,
    hbond_energy_limit: Option<f64>,
}

impl FeatureConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = Some(k);
        self
    }
    pub fn neighbor_policy(mut self, policy: NeighborPolicy) -> Self {
        self.neighbor_policy = Some(policy);
        self
    }
    pub fn hbond_energy_limit(mut self, limit: f64) -> Self {
        self.hbond_energy_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<FeatureConfig, ConfigError> {
        let k = self.neighbor_count.unwrap_or(DEFAULT_NEIGHBOR_COUNT);
        if k < 2 {
            return Err(ConfigError::NeighborCountTooSmall(k));
        }
        let hbond_energy_limit = self
            .hbond_energy_limit
            .unwrap_or(DEFAULT_HBOND_ENERGY_LIMIT);
        if !hbond_energy_limit.is_finite() {
            return Err(ConfigError::NonFiniteEnergyLimit(hbond_energy_limit));
        }

        Ok(FeatureConfig {
            neighbors: NeighborConfig {
                k,
                policy: self.neighbor_policy.unwrap_or_default(),
            },
            sheet: SheetConfig { hbond_energy_limit },
        })
    }
}
