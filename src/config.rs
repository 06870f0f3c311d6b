//! Run configuration
//!
//! [`EngineConfig`] bundles every tunable of a run. Defaults come from
//! [`crate::interpreter::constants`]; the binary overrides them from the
//! command line. `Engine::new` and `RunController::new` call
//! [`EngineConfig::validate`] and refuse configurations that fail it.

use crate::interpreter::constants::{
    ADDRESS_SPACE, DEFAULT_STEP_BUDGET, DEFAULT_YIELD_INTERVAL, SNAPSHOT_CAPACITY, TAPE_LEN,
};
use crate::parser::ValidationPolicy;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("address space ({address_space}) must be at least the tape length ({tape_len})")]
    AddressSpaceTooSmall { address_space: usize, tape_len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub tape_len: usize,
    pub address_space: usize,
    pub step_budget: u64,
    pub snapshot_capacity: usize,
    /// Steps between cancellation checks; lower values cancel faster
    pub yield_interval: u64,
    pub policy: ValidationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tape_len: TAPE_LEN,
            address_space: ADDRESS_SPACE,
            step_budget: DEFAULT_STEP_BUDGET,
            snapshot_capacity: SNAPSHOT_CAPACITY,
            yield_interval: DEFAULT_YIELD_INTERVAL,
            policy: ValidationPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_step_budget(mut self, step_budget: u64) -> Self {
        self.step_budget = step_budget;
        self
    }

    pub fn with_yield_interval(mut self, yield_interval: u64) -> Self {
        self.yield_interval = yield_interval;
        self
    }

    pub fn with_snapshot_capacity(mut self, snapshot_capacity: usize) -> Self {
        self.snapshot_capacity = snapshot_capacity;
        self
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tape_len == 0 {
            return Err(ConfigError::Zero { field: "tape_len" });
        }
        if self.step_budget == 0 {
            return Err(ConfigError::Zero {
                field: "step_budget",
            });
        }
        if self.snapshot_capacity == 0 {
            return Err(ConfigError::Zero {
                field: "snapshot_capacity",
            });
        }
        if self.yield_interval == 0 {
            return Err(ConfigError::Zero {
                field: "yield_interval",
            });
        }
        if self.address_space < self.tape_len {
            return Err(ConfigError::AddressSpaceTooSmall {
                address_space: self.address_space,
                tape_len: self.tape_len,
            });
        }
        Ok(())
    }
}
