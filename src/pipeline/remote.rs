use serde_json::Value;
use tracing::{info, warn};

use super::PipelineError;
use crate::inference::{InferenceBackend, TrainingRecord};
use crate::store::ResultStore;
use crate::template::{self, PlaceholderPolicy};

#[derive(Debug)]
pub enum TrainOutcome {
    /// Store was empty; nothing was sent.
    NoData,
    Trained { records: Vec<TrainingRecord> },
}

/// Submit every stored row to the inference endpoint as one training request.
pub async fn train(
    backend: &impl InferenceBackend,
    store: &ResultStore,
) -> Result<TrainOutcome, PipelineError> {
    let rows = store.scan_all().await?;
    if rows.is_empty() {
        warn!("no data available for training");
        return Ok(TrainOutcome::NoData);
    }

    let records: Vec<TrainingRecord> = rows.into_iter().map(TrainingRecord::from).collect();
    info!(records = records.len(), "submitting training data");
    backend.train(&records).await?;
    info!("training completed successfully");
    Ok(TrainOutcome::Trained { records })
}

pub struct QueryRequest<'a> {
    pub template: &'a str,
    pub policy: PlaceholderPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Answered { results: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub entity: String,
    pub query: String,
    pub status: QueryStatus,
}

#[derive(Debug, Default)]
pub struct QueryReport {
    pub outcomes: Vec<QueryOutcome>,
    /// Results from every successful call, concatenated in entity order.
    pub results: Vec<Value>,
}

/// Query the endpoint once per distinct stored entity.
///
/// The template is validated before the store or the network is touched.
pub async fn query(
    backend: &impl InferenceBackend,
    store: &ResultStore,
    req: &QueryRequest<'_>,
) -> Result<QueryReport, PipelineError> {
    template::validate(req.template, req.policy)?;

    let entities = store.scan_distinct_entities().await?;
    let mut report = QueryReport::default();

    for entity in entities {
        let query = template::expand(req.template, &entity);
        info!(%entity, %query, "querying inference API");

        let status = match backend.query(&query).await {
            Ok(results) => {
                let count = results.len();
                report.results.extend(results);
                QueryStatus::Answered { results: count }
            }
            Err(e) => {
                warn!(%entity, error = %e, "query failed (continuing with remaining entities)");
                QueryStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        report.outcomes.push(QueryOutcome {
            entity,
            query,
            status,
        });
    }

    Ok(report)
}

pub fn format_query_report(report: &QueryReport) -> Result<String, serde_json::Error> {
    let mut out = String::new();

    for outcome in &report.outcomes {
        if let QueryStatus::Failed { reason } = &outcome.status {
            out.push_str(&format!("error   {}: {reason}\n", outcome.query));
        }
    }

    if report.outcomes.is_empty() {
        out.push_str("No stored entities to query. Run `scrape` first.\n");
    } else if report.results.is_empty() {
        out.push_str("No query results.\n");
    } else {
        out.push_str("## Query Results\n\n");
        out.push_str(&serde_json::to_string_pretty(&report.results)?);
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::InferenceError;
    use crate::store::NewRow;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockBackend {
        query_responses: Mutex<VecDeque<Result<Vec<Value>, InferenceError>>>,
        train_fails_with: Mutex<Option<InferenceError>>,
        trained: Mutex<Vec<Vec<TrainingRecord>>>,
        queries: Mutex<Vec<String>>,
    }

    impl MockBackend {
        fn with_query_responses(responses: Vec<Result<Vec<Value>, InferenceError>>) -> Self {
            Self {
                query_responses: Mutex::new(responses.into()),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.trained.lock().unwrap().len() + self.queries.lock().unwrap().len()
        }
    }

    impl InferenceBackend for MockBackend {
        async fn train(&self, records: &[TrainingRecord]) -> Result<(), InferenceError> {
            self.trained.lock().unwrap().push(records.to_vec());
            match self.train_fails_with.lock().unwrap().take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn query(&self, text: &str) -> Result<Vec<Value>, InferenceError> {
            self.queries.lock().unwrap().push(text.to_string());
            self.query_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(vec![]))
        }
    }

    async fn store_with(entities: &[&str]) -> ResultStore {
        let store = ResultStore::open(":memory:").await.unwrap();
        for (i, entity) in entities.iter().enumerate() {
            store
                .insert(&NewRow {
                    entity: entity.to_string(),
                    url: format!("https://example.com/{i}"),
                    title: format!("{entity} page"),
                    snippet: "N/A".into(),
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn train_with_empty_store_makes_no_call() {
        let store = store_with(&[]).await;
        let backend = MockBackend::default();

        let outcome = train(&backend, &store).await.unwrap();

        assert!(matches!(outcome, TrainOutcome::NoData));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn train_submits_all_rows_once() {
        let store = store_with(&["Acme", "Acme", "Beta"]).await;
        let backend = MockBackend::default();

        let outcome = train(&backend, &store).await.unwrap();

        let TrainOutcome::Trained { records } = outcome else {
            panic!("expected Trained");
        };
        assert_eq!(records.len(), 3);
        let trained = backend.trained.lock().unwrap();
        assert_eq!(trained.len(), 1);
        assert_eq!(trained[0][2].entity, "Beta");
        assert_eq!(trained[0][0].url, "https://example.com/0");
    }

    #[tokio::test]
    async fn train_failure_is_reported() {
        let store = store_with(&["Acme"]).await;
        let backend = MockBackend::default();
        *backend.train_fails_with.lock().unwrap() = Some(InferenceError::Status {
            status: 500,
            body: "boom".into(),
        });

        let err = train(&backend, &store).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Inference(InferenceError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn query_without_placeholder_is_rejected_before_any_call() {
        let store = store_with(&["Acme"]).await;
        let backend = MockBackend::default();

        let err = query(
            &backend,
            &store,
            &QueryRequest {
                template: "Retrieve info.",
                policy: PlaceholderPolicy::Require,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::Template(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn query_runs_once_per_distinct_entity_and_combines_results() {
        let store = store_with(&["Acme", "Acme", "Beta"]).await;
        let backend = MockBackend::with_query_responses(vec![
            Ok(vec![json!({"url": "https://acme.com"})]),
            Ok(vec![json!({"url": "https://beta.io"}), json!({"url": "https://beta.dev"})]),
        ]);

        let report = query(
            &backend,
            &store,
            &QueryRequest {
                template: "Retrieve URLs for {entity}.",
                policy: PlaceholderPolicy::Require,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            *backend.queries.lock().unwrap(),
            ["Retrieve URLs for Acme.", "Retrieve URLs for Beta."]
        );
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[2]["url"], "https://beta.dev");
    }

    #[tokio::test]
    async fn query_failure_does_not_stop_remaining_entities() {
        let store = store_with(&["Acme", "Beta"]).await;
        let backend = MockBackend::with_query_responses(vec![
            Err(InferenceError::Status {
                status: 429,
                body: "slow down".into(),
            }),
            Ok(vec![json!("beta result")]),
        ]);

        let report = query(
            &backend,
            &store,
            &QueryRequest {
                template: "{entity}",
                policy: PlaceholderPolicy::Require,
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            &report.outcomes[0].status,
            QueryStatus::Failed { reason } if reason.contains("429")
        ));
        assert_eq!(report.outcomes[1].status, QueryStatus::Answered { results: 1 });
        assert_eq!(report.results, vec![json!("beta result")]);
    }

    #[test]
    fn report_lists_failures_and_results() {
        let report = QueryReport {
            outcomes: vec![
                QueryOutcome {
                    entity: "Acme".into(),
                    query: "URLs for Acme".into(),
                    status: QueryStatus::Failed {
                        reason: "inference API error: 500, boom".into(),
                    },
                },
                QueryOutcome {
                    entity: "Beta".into(),
                    query: "URLs for Beta".into(),
                    status: QueryStatus::Answered { results: 1 },
                },
            ],
            results: vec![json!({"url": "https://beta.io"})],
        };

        let text = format_query_report(&report).unwrap();
        assert!(text.contains("URLs for Acme: inference API error: 500, boom"));
        assert!(text.contains("## Query Results"));
        assert!(text.contains("https://beta.io"));
    }

    #[test]
    fn report_for_empty_store_says_so() {
        let text = format_query_report(&QueryReport::default()).unwrap();
        assert!(text.contains("No stored entities"));
    }
}
