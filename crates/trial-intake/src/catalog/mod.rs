//! Read-only client for the ClinicalTrials.gov v2 registry. Pages through
//! the `/studies` endpoint and condenses each study into a [`TrialSummary`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CatalogConfig;

/// Search expression used when no intervention is given explicitly.
const DEFAULT_INTERVENTION: &str = "cell therapy OR gene therapy OR CAR-T";

const DEFAULT_PAGE_SIZE: usize = 100;

/// Parameters for one registry search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialQuery {
    pub intervention: String,
    pub sponsor: Option<String>,
    pub page_size: usize,
}

impl TrialQuery {
    /// Default search: cell and gene therapy trials, optionally narrowed to
    /// one sponsor.
    pub fn cell_therapy(sponsor: Option<String>) -> Self {
        Self {
            intervention: DEFAULT_INTERVENTION.to_string(),
            sponsor,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The fields of a study the portal surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialSummary {
    pub nct_id: String,
    pub title: String,
    pub overall_status: Option<String>,
    pub phases: Vec<String>,
    pub conditions: Vec<String>,
    pub lead_sponsor: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("registry returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("registry request failed: {0}")]
    Transport(String),
    #[error("registry response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudiesPage {
    #[serde(default)]
    studies: Vec<Study>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Study {
    protocol_section: Option<ProtocolSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProtocolSection {
    identification_module: Option<IdentificationModule>,
    status_module: Option<StatusModule>,
    design_module: Option<DesignModule>,
    conditions_module: Option<ConditionsModule>,
    sponsor_collaborators_module: Option<SponsorModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentificationModule {
    nct_id: Option<String>,
    brief_title: Option<String>,
    official_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusModule {
    overall_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DesignModule {
    #[serde(default)]
    phases: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConditionsModule {
    #[serde(default)]
    conditions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SponsorModule {
    lead_sponsor: Option<SponsorRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SponsorRef {
    name: Option<String>,
}

/// Blocking HTTP client for the trial registry.
#[derive(Clone)]
pub struct TrialCatalogClient {
    base_url: String,
    agent: Arc<ureq::Agent>,
}

impl TrialCatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build();

        Self {
            base_url: config.base_url.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Point the client at an alternate registry endpoint, such as a local
    /// mock server.
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
        }
    }

    fn studies_url(&self) -> String {
        format!("{}/studies", self.base_url.trim_end_matches('/'))
    }

    /// Walk every result page and collect unique studies in registry order.
    /// Stops on an empty page even when the registry hands back another
    /// page token.
    pub fn fetch_trials(&self, query: &TrialQuery) -> Result<Vec<TrialSummary>, CatalogError> {
        let mut summaries = Vec::new();
        let mut seen = HashSet::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(query, page_token.as_deref())?;
            if page.studies.is_empty() {
                break;
            }

            for study in page.studies {
                if let Some(summary) = summarize(study) {
                    if seen.insert(summary.nct_id.clone()) {
                        summaries.push(summary);
                    }
                }
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::info!(total = summaries.len(), "trial catalog fetch complete");
        Ok(summaries)
    }

    fn fetch_page(
        &self,
        query: &TrialQuery,
        page_token: Option<&str>,
    ) -> Result<StudiesPage, CatalogError> {
        let url = self.studies_url();
        let mut request = self
            .agent
            .get(&url)
            .query("query.intr", &query.intervention)
            .query("pageSize", &query.page_size.to_string())
            .query("format", "json")
            .query("countTotal", "true");

        if let Some(sponsor) = query.sponsor.as_deref() {
            request = request.query("query.spons", sponsor);
        }
        if let Some(token) = page_token {
            request = request.query("pageToken", token);
        }

        tracing::debug!(url = %url, page_token = ?page_token, "requesting registry page");
        let response = request.call().map_err(map_error)?;
        response
            .into_json::<StudiesPage>()
            .map_err(|err| CatalogError::Decode(err.to_string()))
    }
}

fn map_error(err: ureq::Error) -> CatalogError {
    match err {
        ureq::Error::Status(status, response) => CatalogError::Api {
            status,
            message: response
                .into_string()
                .unwrap_or_else(|_| "response body unavailable".to_string()),
        },
        ureq::Error::Transport(transport) => CatalogError::Transport(transport.to_string()),
    }
}

/// Flatten the nested wire format; studies without an NCT id are dropped.
fn summarize(study: Study) -> Option<TrialSummary> {
    let protocol = study.protocol_section?;
    let identification = protocol.identification_module?;
    let nct_id = identification.nct_id?;
    let title = identification
        .brief_title
        .or(identification.official_title)
        .unwrap_or_else(|| nct_id.clone());

    Some(TrialSummary {
        nct_id,
        title,
        overall_status: protocol.status_module.and_then(|m| m.overall_status),
        phases: protocol.design_module.map(|m| m.phases).unwrap_or_default(),
        conditions: protocol
            .conditions_module
            .map(|m| m.conditions)
            .unwrap_or_default(),
        lead_sponsor: protocol
            .sponsor_collaborators_module
            .and_then(|m| m.lead_sponsor)
            .and_then(|s| s.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn fetch_parses_single_page_of_studies() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/studies")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("countTotal".into(), "true".into()),
                Matcher::UrlEncoded("pageSize".into(), "100".into()),
                Matcher::UrlEncoded(
                    "query.intr".into(),
                    "cell therapy OR gene therapy OR CAR-T".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "studies": [
                        {
                            "protocolSection": {
                                "identificationModule": {
                                    "nctId": "NCT00000001",
                                    "briefTitle": "CAR-T Therapy for Relapsed Lymphoma"
                                },
                                "statusModule": {"overallStatus": "RECRUITING"},
                                "designModule": {"phases": ["PHASE2"]},
                                "conditionsModule": {"conditions": ["Lymphoma"]},
                                "sponsorCollaboratorsModule": {
                                    "leadSponsor": {"name": "Acme Biotech"}
                                }
                            }
                        },
                        {}
                    ]
                }"#,
            )
            .create();

        let client = TrialCatalogClient::with_base_url(server.url());
        let trials = client
            .fetch_trials(&TrialQuery::cell_therapy(None))
            .expect("fetch succeeds");

        mock.assert();
        assert_eq!(trials.len(), 1);
        assert_eq!(trials[0].nct_id, "NCT00000001");
        assert_eq!(trials[0].title, "CAR-T Therapy for Relapsed Lymphoma");
        assert_eq!(trials[0].overall_status.as_deref(), Some("RECRUITING"));
        assert_eq!(trials[0].phases, ["PHASE2"]);
        assert_eq!(trials[0].lead_sponsor.as_deref(), Some("Acme Biotech"));
    }

    #[test]
    fn sponsor_filter_is_sent_when_present() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/studies")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("query.spons".into(), "Acme Biotech".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"studies": []}"#)
            .create();

        let client = TrialCatalogClient::with_base_url(server.url());
        let trials = client
            .fetch_trials(&TrialQuery::cell_therapy(Some("Acme Biotech".to_string())))
            .expect("fetch succeeds");

        mock.assert();
        assert!(trials.is_empty());
    }

    #[test]
    fn pagination_follows_tokens_and_dedups_by_nct_id() {
        let mut server = Server::new();
        let page_one = server
            .mock("GET", "/studies")
            .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
                "format".into(),
                "json".into(),
            )]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "studies": [
                        {"protocolSection": {"identificationModule": {"nctId": "NCT00000001"}}},
                        {"protocolSection": {"identificationModule": {"nctId": "NCT00000002"}}}
                    ],
                    "nextPageToken": "tok-2"
                }"#,
            )
            .create();
        let page_two = server
            .mock("GET", "/studies")
            .match_query(Matcher::UrlEncoded("pageToken".into(), "tok-2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "studies": [
                        {"protocolSection": {"identificationModule": {"nctId": "NCT00000002"}}},
                        {"protocolSection": {"identificationModule": {"nctId": "NCT00000003"}}}
                    ]
                }"#,
            )
            .create();

        let client = TrialCatalogClient::with_base_url(server.url());
        let trials = client
            .fetch_trials(&TrialQuery::cell_therapy(None))
            .expect("fetch succeeds");

        page_one.assert();
        page_two.assert();

        let ids: Vec<_> = trials.iter().map(|t| t.nct_id.as_str()).collect();
        assert_eq!(ids, ["NCT00000001", "NCT00000002", "NCT00000003"]);
    }

    #[test]
    fn empty_page_stops_pagination_even_with_token() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/studies")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"studies": [], "nextPageToken": "tok-9"}"#)
            .create();

        let client = TrialCatalogClient::with_base_url(server.url());
        let trials = client
            .fetch_trials(&TrialQuery::cell_therapy(None))
            .expect("fetch succeeds");

        mock.assert();
        assert!(trials.is_empty());
    }

    #[test]
    fn http_error_surfaces_status_and_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/studies")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("registry exploded")
            .create();

        let client = TrialCatalogClient::with_base_url(server.url());
        let err = client
            .fetch_trials(&TrialQuery::cell_therapy(None))
            .expect_err("status error should surface");

        match err {
            CatalogError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("registry exploded"));
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }
}
