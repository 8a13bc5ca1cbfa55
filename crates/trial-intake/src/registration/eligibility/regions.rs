use super::config::TrialSite;

/// Leading pincode digits that select the trial-site region.
pub const REGION_PREFIX_DIGITS: usize = 2;

/// Strip everything but ASCII digits. Idempotent, so normalizing an already
/// normalized code is a no-op.
pub fn normalize_region_code(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Metropolitan regions with active trial sites.
///
/// The prefixes cover the postal circles around each metro; two entries may
/// share a city where adjacent circles feed the same site.
pub fn approved_trial_sites() -> Vec<TrialSite> {
    vec![
        TrialSite { prefix: "11", city: "Delhi" },
        TrialSite { prefix: "40", city: "Mumbai" },
        TrialSite { prefix: "56", city: "Bangalore" },
        TrialSite { prefix: "57", city: "Bangalore" },
        TrialSite { prefix: "60", city: "Chennai" },
        TrialSite { prefix: "70", city: "Kolkata" },
        TrialSite { prefix: "50", city: "Hyderabad" },
        TrialSite { prefix: "38", city: "Ahmedabad" },
        TrialSite { prefix: "20", city: "Noida" },
        TrialSite { prefix: "41", city: "Pune" },
        TrialSite { prefix: "30", city: "Jaipur" },
        TrialSite { prefix: "22", city: "Lucknow" },
        TrialSite { prefix: "12", city: "Gurgaon" },
        TrialSite { prefix: "14", city: "Chandigarh" },
        TrialSite { prefix: "16", city: "Chandigarh" },
        TrialSite { prefix: "15", city: "Amritsar" },
        TrialSite { prefix: "80", city: "Patna" },
        TrialSite { prefix: "75", city: "Bhubaneswar" },
        TrialSite { prefix: "64", city: "Coimbatore" },
        TrialSite { prefix: "62", city: "Madurai" },
        TrialSite { prefix: "68", city: "Kochi" },
    ]
}
