use serde::Serialize;

use super::super::domain::Registrant;
use super::super::validation::PINCODE_DIGITS;
use super::EligibilityEngine;
use crate::notify::MessageTone;

/// Ages above this get a safety caution even though the stored flag allows
/// them.
const SAFETY_REVIEW_MAX_AGE: u8 = 85;

const HEALTH_NOTE_DETAIL_MIN: usize = 10;

/// Health conditions that route a registrant to individual medical review.
const EXCLUSIONARY_KEYWORDS: [&str; 18] = [
    "pregnant",
    "pregnancy",
    "breastfeeding",
    "nursing",
    "severe mental illness",
    "psychosis",
    "schizophrenia",
    "active cancer",
    "chemotherapy",
    "radiation therapy",
    "organ transplant",
    "immunocompromised",
    "hiv positive",
    "severe liver disease",
    "kidney failure",
    "dialysis",
    "recent surgery",
    "hospitalized currently",
];

/// Advisory outcome shown with the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreeningAdvisory {
    pub tone: MessageTone,
    pub message: String,
    pub reasons: Vec<String>,
}

pub(super) fn collect_reasons(registrant: &Registrant, engine: &EligibilityEngine) -> Vec<String> {
    let mut reasons = Vec::new();

    if registrant.age < engine.config().min_age {
        reasons.push(format!(
            "Participants must be at least {} years old",
            engine.config().min_age
        ));
    }
    if registrant.age > SAFETY_REVIEW_MAX_AGE {
        reasons.push(
            "Participants must be 85 years old or younger for safety considerations".to_string(),
        );
    }

    let normalized = super::regions::normalize_region_code(&registrant.pincode);
    if normalized.len() != PINCODE_DIGITS {
        reasons.push("Pincode must be a valid 6-digit number".to_string());
    } else if !engine.region_eligible(&registrant.pincode) {
        reasons.push(format!(
            "Clinical trials are not currently available in your area (pincode: {})",
            registrant.pincode
        ));
    }

    let note = registrant.health_note.trim();
    if note.chars().count() < HEALTH_NOTE_DETAIL_MIN {
        reasons.push(
            "Please provide detailed health information (minimum 10 characters)".to_string(),
        );
    } else {
        let lowered = note.to_lowercase();
        for keyword in EXCLUSIONARY_KEYWORDS {
            if lowered.contains(keyword) {
                reasons.push(
                    "Current health status may require specialized medical evaluation before \
                     trial participation"
                        .to_string(),
                );
                break;
            }
        }
    }

    reasons
}

/// Turn screening reasons into the banner shown to the registrant.
///
/// A lone location or health-status reason softens to a warning with
/// follow-up guidance; anything else with reasons is a hard error.
pub fn compose_advisory(reasons: Vec<String>) -> ScreeningAdvisory {
    if reasons.is_empty() {
        return ScreeningAdvisory {
            tone: MessageTone::Success,
            message: "Congratulations! You meet our initial eligibility criteria for clinical \
                      trial participation. Our clinical research team will review your \
                      information and contact you within 5-7 business days to discuss specific \
                      trials that may be suitable for you."
                .to_string(),
            reasons,
        };
    }

    if reasons.len() == 1 && reasons[0].contains("area") {
        let message = format!(
            "{}. We are continuously expanding our trial locations. Please check back in the \
             future or contact us if you're willing to travel to a nearby location.",
            reasons[0]
        );
        return ScreeningAdvisory {
            tone: MessageTone::Warning,
            message,
            reasons,
        };
    }

    if reasons.len() == 1 && reasons[0].contains("health status") {
        let message = format!(
            "{}. This doesn't disqualify you from all trials. Our medical team will review \
             your case individually and may contact you for trials with different eligibility \
             criteria.",
            reasons[0]
        );
        return ScreeningAdvisory {
            tone: MessageTone::Warning,
            message,
            reasons,
        };
    }

    let message = format!(
        "We're unable to proceed with your application at this time. {}. Please contact our \
         clinical trials information center at 1-800-TRIALS-1 if you have questions about \
         eligibility requirements.",
        reasons.join("; ")
    );
    ScreeningAdvisory {
        tone: MessageTone::Error,
        message,
        reasons,
    }
}
