use crate::infra::{
    default_eligibility_config, InMemoryRegistrationRepository, RecordingDispatcher,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use trial_intake::admin::{
    export_csv, export_filename, filter_records, sort_records, AdminQuery, EligibilityFilter,
    SelectionState, TableSort,
};
use trial_intake::catalog::{TrialCatalogClient, TrialQuery};
use trial_intake::config::AppConfig;
use trial_intake::error::AppError;
use trial_intake::notify::{MessageTone, NoticeBoard, NOTICE_TTL_SECONDS};
use trial_intake::registration::{
    RegistrationForm, RegistrationService, RegistrationServiceError, SubmissionReceipt,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Submission date for the seeded registrations (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the full CSV export instead of a one-line summary.
    #[arg(long)]
    pub(crate) include_export: bool,
    /// Skip the bulk acknowledgement portion of the demo.
    #[arg(long)]
    pub(crate) skip_notifications: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Keep only registrations whose pincode contains this fragment.
    #[arg(long)]
    pub(crate) pincode: Option<String>,
    /// Keep only eligible or not-eligible registrations.
    #[arg(long, value_enum)]
    pub(crate) eligibility: Option<EligibilityArg>,
    /// Date stamped into the download filename (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Write the CSV to this path instead of stdout.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub(crate) enum EligibilityArg {
    Eligible,
    NotEligible,
}

impl From<EligibilityArg> for EligibilityFilter {
    fn from(value: EligibilityArg) -> Self {
        match value {
            EligibilityArg::Eligible => EligibilityFilter::Eligible,
            EligibilityArg::NotEligible => EligibilityFilter::NotEligible,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct TrialsArgs {
    /// Intervention search expression (defaults to the cell and gene therapy search)
    #[arg(long)]
    pub(crate) intervention: Option<String>,
    /// Restrict results to one lead sponsor
    #[arg(long)]
    pub(crate) sponsor: Option<String>,
    /// Studies requested per registry page
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
    /// Print at most this many studies
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

type DemoService = RegistrationService<InMemoryRegistrationRepository, RecordingDispatcher>;

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        include_export,
        skip_notifications,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let intake_start = submissions_start(today);

    println!("Clinical trial intake demo");
    println!("Submission date: {today}");

    let repository = Arc::new(InMemoryRegistrationRepository::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = RegistrationService::new(
        repository,
        dispatcher.clone(),
        default_eligibility_config(),
    );

    println!("\nIntake: seeded interest submissions");
    let receipts = seed_registrations(&service, intake_start)?;
    for receipt in &receipts {
        println!(
            "- {} {} | pincode {} | age {} | {} | advisory: {}",
            receipt.record.id.0,
            receipt.record.registrant.full_name,
            receipt.record.registrant.pincode,
            receipt.record.registrant.age,
            receipt.record.eligibility_label(),
            receipt.advisory.tone.label()
        );
        for reason in &receipt.advisory.reasons {
            println!("    reason: {reason}");
        }
    }

    println!("\nValidation: a submission that never reaches storage");
    render_rejected_submission(&service, intake_start);

    let stats = service.stats()?;
    println!("\nAdmin dashboard");
    println!(
        "- {} total | {} eligible | {} not eligible | {} notified",
        stats.total, stats.eligible, stats.not_eligible, stats.notified
    );

    let mut rows = filter_records(service.list()?, &AdminQuery::default());
    sort_records(&mut rows, TableSort::default_order());
    println!("Newest submissions first:");
    for record in &rows {
        println!(
            "  - {} | {} | {} | {}",
            record.submitted_at.format("%Y-%m-%d %H:%M"),
            record.registrant.full_name,
            record.registrant.pincode,
            record.eligibility_label()
        );
    }

    let bangalore = filter_records(
        service.list()?,
        &AdminQuery {
            pincode: Some("56".to_string()),
            ..AdminQuery::default()
        },
    );
    println!(
        "Filter: pincode contains \"56\" keeps {} of {} rows",
        bangalore.len(),
        rows.len()
    );

    if !skip_notifications {
        println!("\nBulk acknowledgements");
        let mut selection = SelectionState::new();
        selection.select_all(rows.iter().filter(|record| record.eligible).map(|record| &record.id));
        println!(
            "- {} rows selected | bulk actions {}",
            selection.selected_count(),
            if selection.bulk_actions_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );

        let run = service.notify_selected(&selection.selected_ids())?;
        println!(
            "- sent {} | failed {} | skipped {}",
            run.sent, run.failed, run.skipped
        );
        for mail in dispatcher.sent().iter().take(2) {
            println!("  - {} <- {}", mail.recipient, mail.subject);
        }

        let mut board = NoticeBoard::new();
        let posted_at = submissions_start(today);
        board.post(
            "bulk_notifications",
            MessageTone::Success,
            format!("Successfully sent {} acknowledgement emails.", run.sent),
            posted_at,
        );
        if let Some(notice) = board.active("bulk_notifications", posted_at) {
            println!("- notice [{}] {}", notice.tone.label(), notice.message);
        }
        let dismissed = board
            .active(
                "bulk_notifications",
                posted_at + chrono::Duration::seconds(NOTICE_TTL_SECONDS),
            )
            .is_none();
        println!("- banner auto-dismisses after {NOTICE_TTL_SECONDS}s: {dismissed}");

        let again = service.notify_selected(&selection.selected_ids())?;
        println!(
            "- second run skips already acknowledged rows: sent {} | skipped {}",
            again.sent, again.skipped
        );
        selection.clear();
        println!(
            "- selection cleared | bulk actions {}",
            if selection.bulk_actions_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );
    }

    println!("\nCSV export");
    let mut rows = filter_records(service.list()?, &AdminQuery::default());
    sort_records(&mut rows, TableSort::default_order());
    let csv = export_csv(&rows)?;
    let filename = export_filename(today);
    if include_export {
        println!("{csv}");
    }
    println!("- {} rows -> {}", rows.len(), filename);

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        pincode,
        eligibility,
        date,
        output,
    } = args;

    let repository = Arc::new(InMemoryRegistrationRepository::default());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = RegistrationService::new(repository, dispatcher, default_eligibility_config());

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    seed_registrations(&service, submissions_start(date))?;

    let query = AdminQuery {
        pincode,
        eligibility: eligibility.map(EligibilityFilter::from),
        ..AdminQuery::default()
    };
    let mut records = filter_records(service.list()?, &query);
    sort_records(&mut records, query.table_sort());

    let csv = export_csv(&records)?;
    let filename = export_filename(date);

    match output {
        Some(path) => {
            std::fs::write(&path, csv.as_bytes())?;
            println!("Wrote {} registrations to {}", records.len(), path.display());
        }
        None => {
            println!("Download filename: {filename}");
            print!("{csv}");
        }
    }

    Ok(())
}

pub(crate) fn run_trials(args: TrialsArgs) -> Result<(), AppError> {
    let TrialsArgs {
        intervention,
        sponsor,
        page_size,
        limit,
    } = args;

    let config = AppConfig::load()?;
    let client = TrialCatalogClient::new(&config.catalog);

    let mut query = TrialQuery::cell_therapy(sponsor);
    if let Some(intervention) = intervention {
        query.intervention = intervention;
    }
    if let Some(page_size) = page_size {
        query.page_size = page_size;
    }

    println!(
        "Searching {} for \"{}\"",
        config.catalog.base_url, query.intervention
    );
    let trials = client.fetch_trials(&query)?;
    println!("Found {} unique studies", trials.len());

    let shown = limit.unwrap_or(trials.len()).min(trials.len());
    for trial in trials.iter().take(shown) {
        let status = trial.overall_status.as_deref().unwrap_or("UNKNOWN");
        let phases = if trial.phases.is_empty() {
            "-".to_string()
        } else {
            trial.phases.join("/")
        };
        println!("- {} | {} | {} | {}", trial.nct_id, status, phases, trial.title);
        if let Some(sponsor) = &trial.lead_sponsor {
            println!("  sponsor: {sponsor}");
        }
        if !trial.conditions.is_empty() {
            println!("  conditions: {}", trial.conditions.join(", "));
        }
    }
    if trials.len() > shown {
        println!("... {} more not shown", trials.len() - shown);
    }

    Ok(())
}

fn submissions_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(9, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or_else(Utc::now)
}

fn render_rejected_submission(service: &DemoService, submitted_at: DateTime<Utc>) {
    let form = RegistrationForm {
        full_name: "A1".to_string(),
        email: "ravi.example.com".to_string(),
        mobile: "12345".to_string(),
        pincode: "12345".to_string(),
        age: "17".to_string(),
        health_note: "fine".to_string(),
    };

    match service.submit(form, submitted_at) {
        Ok(receipt) => println!("- unexpectedly stored {}", receipt.record.id.0),
        Err(RegistrationServiceError::Rejected(rejection)) => {
            println!("- blocked: {}", rejection.banner);
            println!("  focus moves to '{}'", rejection.focus_field);
            for error in &rejection.errors {
                println!("  - {}: {}", error.field, error.message);
            }
        }
        Err(other) => println!("- submission failed: {other}"),
    }
}

/// Interest submissions condensed from the portal's sample data: four clean
/// approved-region registrants, one outside every trial region, and two that
/// trip the advisory screening.
fn sample_forms() -> Vec<RegistrationForm> {
    [
        (
            "Rajesh Kumar",
            "rajesh.kumar@example.com",
            "9845123456",
            "560034",
            "42",
            "Type 2 diabetes managed with metformin. HbA1c levels stable.",
        ),
        (
            "Priya Sharma",
            "priya.sharma@example.com",
            "9876543210",
            "110025",
            "34",
            "Hypertension controlled with medication. No other significant history.",
        ),
        (
            "Meera Iyer",
            "meera.iyer@example.com",
            "9123456789",
            "600028",
            "51",
            "Rheumatoid arthritis treated with methotrexate. Joint pain well controlled.",
        ),
        (
            "Kavya Nair",
            "kavya.nair@example.com",
            "9432109876",
            "682020",
            "29",
            "PCOS diagnosed three years ago. Managed with lifestyle changes and metformin.",
        ),
        (
            "Ravi Gupta",
            "ravi.gupta@example.com",
            "8876543210",
            "999999",
            "35",
            "Generally good health. No chronic conditions. Regular exercise routine.",
        ),
        (
            "Suresh Malhotra",
            "suresh.malhotra@example.com",
            "8654321098",
            "400001",
            "52",
            "Currently undergoing chemotherapy for colon cancer. Treatment started two months ago.",
        ),
        (
            "Manish Agarwal",
            "manish.agarwal@example.com",
            "8432109876",
            "800020",
            "88",
            "Multiple comorbidities including diabetes, hypertension, and heart disease.",
        ),
    ]
    .into_iter()
    .map(
        |(full_name, email, mobile, pincode, age, health_note)| RegistrationForm {
            full_name: full_name.to_string(),
            email: email.to_string(),
            mobile: mobile.to_string(),
            pincode: pincode.to_string(),
            age: age.to_string(),
            health_note: health_note.to_string(),
        },
    )
    .collect()
}

fn seed_registrations(
    service: &DemoService,
    start: DateTime<Utc>,
) -> Result<Vec<SubmissionReceipt>, AppError> {
    sample_forms()
        .into_iter()
        .enumerate()
        .map(|(offset, form)| {
            let submitted_at = start + chrono::Duration::minutes(offset as i64);
            service.submit(form, submitted_at).map_err(AppError::from)
        })
        .collect()
}
