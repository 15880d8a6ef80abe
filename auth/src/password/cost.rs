use argon2::Params;

use super::errors::PasswordError;

/// Work factor for password hashing.
///
/// Wraps validated Argon2id parameters. `iterations` is the tunable cost
/// factor; memory and parallelism widen the cost along the other axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCost {
    params: Params,
}

impl HashCost {
    /// Build a validated hashing cost.
    ///
    /// # Arguments
    /// * `iterations` - Argon2 time cost (number of passes over memory)
    /// * `memory_kib` - Argon2 memory cost in KiB
    /// * `parallelism` - Number of lanes
    ///
    /// # Errors
    /// * `InvalidCost` - Parameters are outside the range Argon2 accepts
    pub fn new(iterations: u32, memory_kib: u32, parallelism: u32) -> Result<Self, PasswordError> {
        Params::new(memory_kib, iterations, parallelism, None)
            .map(|params| Self { params })
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))
    }

    pub fn iterations(&self) -> u32 {
        self.params.t_cost()
    }

    pub fn memory_kib(&self) -> u32 {
        self.params.m_cost()
    }

    pub fn parallelism(&self) -> u32 {
        self.params.p_cost()
    }

    pub(crate) fn params(&self) -> Params {
        self.params.clone()
    }
}

impl Default for HashCost {
    /// OWASP baseline for Argon2id: 19 MiB, 2 iterations, 1 lane.
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
