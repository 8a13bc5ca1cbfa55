use std::fmt::Write as _;

use crate::registration::{OutboundNotification, RegistrationRecord};

/// Template key recorded on every acknowledgement dispatch.
pub const ACKNOWLEDGEMENT_TEMPLATE: &str = "registration_acknowledgement";

const ACKNOWLEDGEMENT_SUBJECT: &str = "Clinical Trials - Thank You for Your Interest";

/// City mentioned in the acknowledgement body, keyed by the first three
/// pincode digits. Falls back to a generic phrase for unmapped codes.
const REGION_CITIES: [(&str, &str); 10] = [
    ("110", "New Delhi"),
    ("400", "Mumbai"),
    ("560", "Bangalore"),
    ("600", "Chennai"),
    ("700", "Kolkata"),
    ("500", "Hyderabad"),
    ("380", "Ahmedabad"),
    ("201", "Ghaziabad"),
    ("411", "Pune"),
    ("302", "Jaipur"),
];

const REGION_FALLBACK: &str = "your area";

pub fn region_city(pincode: &str) -> &'static str {
    match pincode.get(..3) {
        Some(prefix) => REGION_CITIES
            .iter()
            .find(|(key, _)| *key == prefix)
            .map(|(_, city)| *city)
            .unwrap_or(REGION_FALLBACK),
        None => REGION_FALLBACK,
    }
}

/// Render the acknowledgement e-mail for one stored registration.
pub fn acknowledgement(record: &RegistrationRecord) -> OutboundNotification {
    let city = region_city(&record.registrant.pincode);

    OutboundNotification {
        template: ACKNOWLEDGEMENT_TEMPLATE.to_string(),
        registration_id: record.id.clone(),
        recipient: record.registrant.email.clone(),
        subject: ACKNOWLEDGEMENT_SUBJECT.to_string(),
        html_body: render_acknowledgement_html(&record.registrant.full_name, city),
    }
}

fn render_acknowledgement_html(full_name: &str, city: &str) -> String {
    let mut html = String::new();

    writeln!(html, "<h2>Thank You for Your Interest in Clinical Trials</h2>")
        .expect("write headline");
    writeln!(html, "<p>Dear {},</p>", escape_html(full_name)).expect("write greeting");
    writeln!(
        html,
        "<p>We have received your registration and our clinical research team is reviewing \
         trial opportunities in {}.</p>",
        city
    )
    .expect("write region line");
    writeln!(html, "<p>What happens next:</p>").expect("write next-steps heading");
    writeln!(html, "<ul>").expect("write list open");
    writeln!(
        html,
        "<li>Our team reviews your information within 5-7 business days</li>"
    )
    .expect("write review item");
    writeln!(
        html,
        "<li>We match you with trials suited to your health profile</li>"
    )
    .expect("write match item");
    writeln!(
        html,
        "<li>A coordinator contacts you to discuss participation details</li>"
    )
    .expect("write contact item");
    writeln!(html, "</ul>").expect("write list close");
    writeln!(
        html,
        "<p>Questions? Call our information center at 1-800-TRIALS-1.</p>"
    )
    .expect("write helpline");
    writeln!(html, "<p>Warm regards,<br>The Clinical Trials Team</p>").expect("write signature");

    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{Registrant, RegistrationId};
    use chrono::TimeZone;

    fn record(pincode: &str) -> RegistrationRecord {
        RegistrationRecord {
            id: RegistrationId("reg-000101".to_string()),
            registrant: Registrant {
                full_name: "Jane Doe".to_string(),
                email: "jane.doe@example.com".to_string(),
                mobile: "9876543210".to_string(),
                pincode: pincode.to_string(),
                age: 34,
                health_note: "No chronic conditions, not on medication".to_string(),
            },
            eligible: true,
            notified: false,
            submitted_at: chrono::Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn region_city_maps_known_prefixes() {
        assert_eq!(region_city("560034"), "Bangalore");
        assert_eq!(region_city("110025"), "New Delhi");
        assert_eq!(region_city("999999"), "your area");
        assert_eq!(region_city("56"), "your area");
    }

    #[test]
    fn acknowledgement_fills_recipient_and_subject() {
        let notification = acknowledgement(&record("560034"));

        assert_eq!(notification.template, ACKNOWLEDGEMENT_TEMPLATE);
        assert_eq!(notification.registration_id.0, "reg-000101");
        assert_eq!(notification.recipient, "jane.doe@example.com");
        assert_eq!(notification.subject, ACKNOWLEDGEMENT_SUBJECT);
        assert!(notification.html_body.contains("Dear Jane Doe,"));
        assert!(notification.html_body.contains("Bangalore"));
        assert!(notification.html_body.contains("5-7 business days"));
    }

    #[test]
    fn html_body_escapes_registrant_name() {
        let mut record = record("400021");
        record.registrant.full_name = "Jane <script>".to_string();

        let notification = acknowledgement(&record);
        assert!(notification.html_body.contains("Jane &lt;script&gt;"));
        assert!(!notification.html_body.contains("<script>"));
    }
}
