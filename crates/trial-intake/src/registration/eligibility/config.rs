use serde::Serialize;

use super::super::domain::{MAX_AGE, MIN_AGE};
use super::regions;

/// Approved metropolitan trial site keyed by a two-digit pincode prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialSite {
    pub prefix: &'static str,
    pub city: &'static str,
}

/// Dials for the eligibility engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityConfig {
    pub min_age: u8,
    pub max_age: u8,
    pub sites: Vec<TrialSite>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_age: MIN_AGE,
            max_age: MAX_AGE,
            sites: regions::approved_trial_sites(),
        }
    }
}
