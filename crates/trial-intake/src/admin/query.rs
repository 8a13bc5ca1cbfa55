use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::registration::RegistrationRecord;

/// Eligibility facet on the admin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityFilter {
    Eligible,
    NotEligible,
}

/// Columns the admin table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    RegistrationId,
    FullName,
    Email,
    Mobile,
    Pincode,
    Age,
    Eligible,
    Notified,
    SubmittedAt,
}

impl SortColumn {
    pub const fn label(self) -> &'static str {
        match self {
            SortColumn::RegistrationId => "registration_id",
            SortColumn::FullName => "full_name",
            SortColumn::Email => "email",
            SortColumn::Mobile => "mobile",
            SortColumn::Pincode => "pincode",
            SortColumn::Age => "age",
            SortColumn::Eligible => "eligible",
            SortColumn::Notified => "notified",
            SortColumn::SubmittedAt => "submitted_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active ordering of the admin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl TableSort {
    /// Dashboard default: newest submissions first.
    pub const fn default_order() -> Self {
        Self {
            column: SortColumn::SubmittedAt,
            direction: SortDirection::Descending,
        }
    }

    /// Clicking the active column flips direction; clicking a new column
    /// starts ascending.
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.toggled(),
            }
        } else {
            Self {
                column,
                direction: SortDirection::Ascending,
            }
        }
    }
}

impl Default for TableSort {
    fn default() -> Self {
        Self::default_order()
    }
}

/// Query-string parameters accepted by the admin listing and export routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub eligibility: Option<EligibilityFilter>,
    #[serde(default)]
    pub sort: Option<SortColumn>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
}

impl AdminQuery {
    pub fn table_sort(&self) -> TableSort {
        match self.sort {
            Some(column) => TableSort {
                column,
                direction: self.direction.unwrap_or(SortDirection::Ascending),
            },
            None => TableSort::default_order(),
        }
    }
}

/// Keep only the records matching the pincode fragment and eligibility facet.
pub fn filter_records(
    records: Vec<RegistrationRecord>,
    query: &AdminQuery,
) -> Vec<RegistrationRecord> {
    let pincode_needle = query
        .pincode
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty());

    records
        .into_iter()
        .filter(|record| {
            let pincode_matches = pincode_needle
                .map(|needle| record.registrant.pincode.contains(needle))
                .unwrap_or(true);
            let eligibility_matches = match query.eligibility {
                Some(EligibilityFilter::Eligible) => record.eligible,
                Some(EligibilityFilter::NotEligible) => !record.eligible,
                None => true,
            };
            pincode_matches && eligibility_matches
        })
        .collect()
}

/// Case-insensitive string ordering that compares embedded digit runs by
/// numeric value, so `reg-000002` sorts before `reg-000010`.
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let mut i = 0;
    let mut j = 0;

    while i < a_chars.len() && j < b_chars.len() {
        let ca = a_chars[i];
        let cb = b_chars[j];

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let a_run = digit_run(&a_chars, &mut i);
            let b_run = digit_run(&b_chars, &mut j);
            let ordering = compare_digit_runs(&a_run, &b_run);
            if ordering != Ordering::Equal {
                return ordering;
            }
        } else {
            let ordering = ca.to_lowercase().cmp(cb.to_lowercase());
            if ordering != Ordering::Equal {
                return ordering;
            }
            i += 1;
            j += 1;
        }
    }

    (a_chars.len() - i).cmp(&(b_chars.len() - j))
}

fn digit_run(chars: &[char], index: &mut usize) -> String {
    let start = *index;
    while *index < chars.len() && chars[*index].is_ascii_digit() {
        *index += 1;
    }
    chars[start..*index].iter().collect()
}

/// Compare digit runs numerically without parsing, so runs longer than any
/// integer type still order correctly. More leading zeros breaks ties last.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        .then_with(|| a.len().cmp(&b.len()))
}

fn compare_by_column(
    a: &RegistrationRecord,
    b: &RegistrationRecord,
    column: SortColumn,
) -> Ordering {
    match column {
        SortColumn::RegistrationId => natural_compare(&a.id.0, &b.id.0),
        SortColumn::FullName => natural_compare(&a.registrant.full_name, &b.registrant.full_name),
        SortColumn::Email => natural_compare(&a.registrant.email, &b.registrant.email),
        SortColumn::Mobile => natural_compare(&a.registrant.mobile, &b.registrant.mobile),
        SortColumn::Pincode => natural_compare(&a.registrant.pincode, &b.registrant.pincode),
        SortColumn::Age => a.registrant.age.cmp(&b.registrant.age),
        SortColumn::Eligible => a.eligible.cmp(&b.eligible),
        SortColumn::Notified => a.notified.cmp(&b.notified),
        SortColumn::SubmittedAt => a.submitted_at.cmp(&b.submitted_at),
    }
}

/// Order records in place. Descending reverses the stable ascending sort, so
/// toggling a column reverses the displayed rows exactly.
pub fn sort_records(records: &mut [RegistrationRecord], sort: TableSort) {
    records.sort_by(|a, b| compare_by_column(a, b, sort.column));
    if sort.direction == SortDirection::Descending {
        records.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{Registrant, RegistrationId};
    use chrono::TimeZone;

    fn record(suffix: u32, name: &str, pincode: &str, age: u8, minute: u32) -> RegistrationRecord {
        RegistrationRecord {
            id: RegistrationId(format!("reg-{suffix:06}")),
            registrant: Registrant {
                full_name: name.to_string(),
                email: format!("user{suffix}@example.com"),
                mobile: format!("98765432{suffix:02}"),
                pincode: pincode.to_string(),
                age,
                health_note: "No chronic conditions reported".to_string(),
            },
            eligible: age >= 18,
            notified: false,
            submitted_at: chrono::Utc
                .with_ymd_and_hms(2026, 3, 14, 9, minute, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn natural_compare_orders_digit_runs_numerically() {
        assert_eq!(natural_compare("reg-2", "reg-10"), Ordering::Less);
        assert_eq!(natural_compare("reg-000010", "reg-000002"), Ordering::Greater);
        assert_eq!(natural_compare("site9", "site10"), Ordering::Less);
    }

    #[test]
    fn natural_compare_ignores_case_for_letters() {
        assert_eq!(natural_compare("alice", "Bob"), Ordering::Less);
        assert_eq!(natural_compare("ALICE", "alice"), Ordering::Equal);
    }

    #[test]
    fn natural_compare_breaks_leading_zero_ties_by_run_length() {
        assert_eq!(natural_compare("7", "007"), Ordering::Less);
        assert_eq!(natural_compare("007", "007"), Ordering::Equal);
    }

    #[test]
    fn toggle_flips_direction_on_same_column() {
        let sort = TableSort::default_order().toggle(SortColumn::SubmittedAt);
        assert_eq!(sort.direction, SortDirection::Ascending);

        let again = sort.toggle(SortColumn::SubmittedAt);
        assert_eq!(again.direction, SortDirection::Descending);
    }

    #[test]
    fn toggle_starts_ascending_on_new_column() {
        let sort = TableSort::default_order().toggle(SortColumn::Age);
        assert_eq!(sort.column, SortColumn::Age);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn descending_is_exact_reverse_of_ascending() {
        let mut ascending = vec![
            record(1, "Asha", "560034", 34, 0),
            record(2, "Vikram", "110025", 34, 1),
            record(3, "Meera", "400021", 52, 2),
        ];
        let mut descending = ascending.clone();

        sort_records(
            &mut ascending,
            TableSort {
                column: SortColumn::Age,
                direction: SortDirection::Ascending,
            },
        );
        sort_records(
            &mut descending,
            TableSort {
                column: SortColumn::Age,
                direction: SortDirection::Descending,
            },
        );

        let reversed: Vec<_> = ascending.iter().rev().map(|r| r.id.0.clone()).collect();
        let actual: Vec<_> = descending.iter().map(|r| r.id.0.clone()).collect();
        assert_eq!(actual, reversed);
    }

    #[test]
    fn default_order_lists_newest_submissions_first() {
        let mut records = vec![
            record(1, "Asha", "560034", 34, 0),
            record(2, "Vikram", "110025", 41, 5),
            record(3, "Meera", "400021", 52, 2),
        ];

        sort_records(&mut records, TableSort::default_order());

        let ids: Vec<_> = records.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, ["reg-000002", "reg-000003", "reg-000001"]);
    }

    #[test]
    fn filter_matches_pincode_fragments_and_eligibility() {
        let records = vec![
            record(1, "Asha", "560034", 34, 0),
            record(2, "Vikram", "110025", 17, 1),
            record(3, "Meera", "560011", 52, 2),
        ];

        let by_pincode = filter_records(
            records.clone(),
            &AdminQuery {
                pincode: Some("56".to_string()),
                ..AdminQuery::default()
            },
        );
        assert_eq!(by_pincode.len(), 2);

        let not_eligible = filter_records(
            records,
            &AdminQuery {
                eligibility: Some(EligibilityFilter::NotEligible),
                ..AdminQuery::default()
            },
        );
        assert_eq!(not_eligible.len(), 1);
        assert_eq!(not_eligible[0].id.0, "reg-000002");
    }

    #[test]
    fn blank_pincode_filter_matches_everything() {
        let records = vec![record(1, "Asha", "560034", 34, 0)];
        let filtered = filter_records(
            records,
            &AdminQuery {
                pincode: Some("   ".to_string()),
                ..AdminQuery::default()
            },
        );
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn table_sort_falls_back_to_default_order() {
        assert_eq!(AdminQuery::default().table_sort(), TableSort::default_order());

        let explicit = AdminQuery {
            sort: Some(SortColumn::Age),
            ..AdminQuery::default()
        };
        assert_eq!(
            explicit.table_sort(),
            TableSort {
                column: SortColumn::Age,
                direction: SortDirection::Ascending,
            }
        );
    }
}
