//! Eligibility evaluation for stored registrations.
//!
//! The stored flag comes from exactly two inputs, age range and pincode
//! region, so it stays reproducible from the record alone. The advisory
//! screening in [`screening`] layers richer guidance (health keywords, upper
//! age caution) on top without feeding back into the flag.

mod config;
mod regions;
mod screening;

pub use config::{EligibilityConfig, TrialSite};
pub use regions::{approved_trial_sites, normalize_region_code, REGION_PREFIX_DIGITS};
pub use screening::{compose_advisory, ScreeningAdvisory};

use super::domain::Registrant;
use super::validation::PINCODE_DIGITS;

/// Stateless evaluator deriving the stored eligibility flag.
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn age_eligible(&self, age: u8) -> bool {
        (self.config.min_age..=self.config.max_age).contains(&age)
    }

    /// Look up the approved trial site for a pincode, if any.
    pub fn resolve_site(&self, pincode: &str) -> Option<&TrialSite> {
        let normalized = regions::normalize_region_code(pincode);
        if normalized.len() != PINCODE_DIGITS {
            return None;
        }

        let prefix = &normalized[..REGION_PREFIX_DIGITS];
        self.config.sites.iter().find(|site| site.prefix == prefix)
    }

    pub fn region_eligible(&self, pincode: &str) -> bool {
        self.resolve_site(pincode).is_some()
    }

    /// Derive the stored flag. Pure in age and pincode; nothing else
    /// contributes.
    pub fn decide(&self, registrant: &Registrant) -> bool {
        self.age_eligible(registrant.age) && self.region_eligible(&registrant.pincode)
    }

    /// Build the advisory outcome shown with the confirmation. Never touches
    /// the stored flag.
    pub fn screen(&self, registrant: &Registrant) -> ScreeningAdvisory {
        let reasons = screening::collect_reasons(registrant, self);
        screening::compose_advisory(reasons)
    }
}
