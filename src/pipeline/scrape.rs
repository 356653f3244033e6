use tracing::{info, warn};

use super::PipelineError;
use crate::serp::{OrganicHit, SearchClient, SearchOutcome};
use crate::store::{NewRow, ResultStore};
use crate::template::{self, PlaceholderPolicy};

pub struct ScrapeRequest<'a> {
    pub entities: &'a [String],
    pub template: &'a str,
    pub policy: PlaceholderPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityStatus {
    Found { hits: usize },
    NoResults,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOutcome {
    pub entity: String,
    pub query: String,
    pub status: EntityStatus,
}

#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub outcomes: Vec<EntityOutcome>,
    /// Rows collected across all entities, in entity then hit order.
    pub rows: Vec<NewRow>,
    /// Store ids assigned to `rows`, index-aligned.
    pub ids: Vec<i64>,
}

impl ScrapeReport {
    pub fn count(&self, pred: impl Fn(&EntityStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Search every entity in order, then persist all collected hits in one batch.
///
/// Per-entity failures and empty result pages are recorded in the report and never stop
/// the loop. Only template validation and store failures abort.
pub async fn scrape(
    search: &impl SearchClient,
    store: &ResultStore,
    req: &ScrapeRequest<'_>,
) -> Result<ScrapeReport, PipelineError> {
    template::validate(req.template, req.policy)?;
    if !template::has_placeholder(req.template) {
        warn!(template = %req.template, "template has no {{entity}} placeholder; every entity gets the same query");
    }

    let mut report = ScrapeReport::default();

    for entity in req.entities {
        let query = template::expand(req.template, entity);
        info!(%entity, %query, "searching");

        let status = match search.search(&query).await {
            Ok(SearchOutcome::Hits(hits)) => {
                let count = hits.len();
                report.rows.extend(hits.into_iter().map(|hit| to_row(entity, hit)));
                EntityStatus::Found { hits: count }
            }
            Ok(SearchOutcome::NoResults) => {
                warn!(%query, "no results found");
                EntityStatus::NoResults
            }
            Err(e) => {
                warn!(%entity, error = %e, "search failed (continuing with remaining entities)");
                EntityStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        report.outcomes.push(EntityOutcome {
            entity: entity.clone(),
            query,
            status,
        });
    }

    if !report.rows.is_empty() {
        report.ids = store.insert_all(&report.rows).await?;
        info!(rows = report.ids.len(), "results saved to database");
    }

    Ok(report)
}

fn to_row(entity: &str, hit: OrganicHit) -> NewRow {
    NewRow {
        entity: entity.to_string(),
        url: hit.link,
        title: hit.title,
        snippet: hit.snippet,
    }
}

pub fn format_summary(report: &ScrapeReport) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        match &outcome.status {
            EntityStatus::Found { hits } => {
                out.push_str(&format!("ok      {} ({hits} results)\n", outcome.entity));
            }
            EntityStatus::NoResults => {
                out.push_str(&format!("warning No results found for query: {}\n", outcome.query));
            }
            EntityStatus::Failed { reason } => {
                out.push_str(&format!(
                    "error   Error during web search for {}: {reason}\n",
                    outcome.entity
                ));
            }
        }
    }

    let found = report.count(|s| matches!(s, EntityStatus::Found { .. }));
    let empty = report.count(|s| matches!(s, EntityStatus::NoResults));
    let failed = report.count(|s| matches!(s, EntityStatus::Failed { .. }));
    out.push_str(&format!(
        "\n{} entities: {found} with results, {empty} without, {failed} failed; {} rows saved\n",
        report.outcomes.len(),
        report.ids.len()
    ));
    out
}
