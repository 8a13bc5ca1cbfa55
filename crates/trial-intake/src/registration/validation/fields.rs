use super::super::domain::{MAX_AGE, MIN_AGE};
use super::FieldVerdict;

/// Digits expected in an Indian mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Digits expected in an Indian postal pincode.
pub const PINCODE_DIGITS: usize = 6;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const HEALTH_NOTE_MIN_CHARS: usize = 10;
const HEALTH_NOTE_MAX_CHARS: usize = 500;

/// Keep only ASCII digits, truncated to `max` characters. Running the
/// formatter over its own output returns the same string.
pub fn format_digits(raw: &str, max: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

pub fn format_mobile(raw: &str) -> String {
    format_digits(raw, MOBILE_DIGITS)
}

pub fn format_pincode(raw: &str) -> String {
    format_digits(raw, PINCODE_DIGITS)
}

pub(crate) fn parse_age(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok()
}

pub fn validate_full_name(raw: &str) -> FieldVerdict {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldVerdict::fail("Name is required");
    }

    let length = trimmed.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        return FieldVerdict::fail("Name must be between 2 and 100 characters");
    }

    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return FieldVerdict::fail("Name can only contain letters and spaces");
    }

    FieldVerdict::pass()
}

pub fn validate_email(raw: &str) -> FieldVerdict {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldVerdict::fail("Email is required");
    }

    if plausible_email(trimmed) {
        FieldVerdict::pass()
    } else {
        FieldVerdict::fail("Please enter a valid email address")
    }
}

/// Counts digits after stripping separators, so `98765 43210` and
/// `9876543210` are both accepted.
pub fn validate_mobile(raw: &str) -> FieldVerdict {
    if raw.trim().is_empty() {
        return FieldVerdict::fail("Mobile number is required");
    }

    let digits: usize = raw.chars().filter(|c| c.is_ascii_digit()).count();
    if digits == MOBILE_DIGITS {
        FieldVerdict::pass()
    } else {
        FieldVerdict::fail("Please enter a valid 10-digit mobile number")
    }
}

pub fn validate_pincode(raw: &str) -> FieldVerdict {
    if raw.trim().is_empty() {
        return FieldVerdict::fail("Pincode is required");
    }

    let digits: usize = raw.chars().filter(|c| c.is_ascii_digit()).count();
    if digits == PINCODE_DIGITS {
        FieldVerdict::pass()
    } else {
        FieldVerdict::fail("Please enter a valid 6-digit pincode")
    }
}

pub fn validate_age(raw: &str) -> FieldVerdict {
    if raw.trim().is_empty() {
        return FieldVerdict::fail("Age is required");
    }

    match parse_age(raw) {
        Some(age) if age < MIN_AGE => {
            FieldVerdict::fail("You must be at least 18 years old to register")
        }
        Some(age) if age > MAX_AGE => FieldVerdict::fail("Please enter a valid age"),
        Some(_) => FieldVerdict::pass(),
        None => FieldVerdict::fail("Please enter a valid age"),
    }
}

pub fn validate_health_note(raw: &str) -> FieldVerdict {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldVerdict::fail("Health information is required");
    }

    let length = trimmed.chars().count();
    if (HEALTH_NOTE_MIN_CHARS..=HEALTH_NOTE_MAX_CHARS).contains(&length) {
        FieldVerdict::pass()
    } else {
        FieldVerdict::fail("Please provide between 10 and 500 characters")
    }
}

fn plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((_, tld)) => {
            domain.split('.').all(|label| !label.is_empty())
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}
