//! Cross-resource search over messages, contacts and calls.
//!
//! A search fans out to three independent upstream list calls and merges the
//! hits. Each branch is fault-tolerant on its own: a failed branch is logged
//! and contributes nothing, it never fails the request.

use crate::client::AsyncOpenPhoneClient;
use crate::error::{AdapterError, AdapterResult, OpenPhoneApiResult};
use crate::metrics::Metrics;
use crate::models::search_result::call_participants;
use crate::models::{ListQuery, ResourceType, SearchResult, UpstreamPage};
use crate::tools::require_field;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default number of results when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Number of resource kinds the limit is split across.
const SEARCH_KINDS: usize = 3;

/// Parameters for a search request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query
    pub query: Option<String>,

    /// Maximum number of results to return (default: 10)
    pub limit: Option<usize>,
}

/// Merged search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,

    /// Hits found across all kinds before truncation to the limit
    pub total: usize,
}

/// Search tools for querying all upstream resource kinds at once.
#[derive(Clone)]
pub struct SearchTools {
    client: Arc<dyn AsyncOpenPhoneClient>,
    metrics: Metrics,
}

impl SearchTools {
    pub fn new(client: Arc<dyn AsyncOpenPhoneClient>) -> Self {
        Self::with_metrics(client, Metrics::new())
    }

    /// Use a shared metrics handle for search and skipped-branch counts.
    pub fn with_metrics(client: Arc<dyn AsyncOpenPhoneClient>, metrics: Metrics) -> Self {
        Self { client, metrics }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run a search across messages, contacts and calls.
    ///
    /// The limit is split evenly (rounding up) across the three kinds, which
    /// are queried concurrently. Results keep per-source order (messages,
    /// contacts, calls) and are truncated to the limit; `total` is the count
    /// before truncation.
    pub async fn search(&self, params: SearchParams) -> AdapterResult<SearchResponse> {
        let query = require_field(params.query, "query")?;
        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        if limit == 0 {
            return Err(AdapterError::Validation(
                "limit must be at least 1".to_string(),
            ));
        }

        self.metrics.record_search();
        let per_kind = partition_limit(limit);
        tracing::debug!(query = %query, limit, per_kind, "Searching upstream resources");

        let (messages, contacts, calls) = futures::future::join3(
            self.search_messages(&query, per_kind),
            self.search_contacts(&query, per_kind),
            self.search_calls(&query, per_kind),
        )
        .await;

        let messages = self.tolerate(ResourceType::Message, messages);
        let contacts = self.tolerate(ResourceType::Contact, contacts);
        let calls = self.tolerate(ResourceType::Call, calls);

        let total = messages.len() + contacts.len() + calls.len();
        let results: Vec<SearchResult> = messages
            .into_iter()
            .chain(contacts)
            .chain(calls)
            .take(limit)
            .collect();

        tracing::info!(
            query = %query,
            total,
            returned = results.len(),
            "Search completed"
        );

        Ok(SearchResponse { results, total })
    }

    async fn search_messages(
        &self,
        query: &str,
        per_kind: usize,
    ) -> OpenPhoneApiResult<Vec<SearchResult>> {
        let list_query = ListQuery::new(per_kind).with_search(Some(query.to_string()));
        let page = self.client.list_messages(&list_query).await?;
        Ok(page.data.iter().map(SearchResult::from_message).collect())
    }

    async fn search_contacts(
        &self,
        query: &str,
        per_kind: usize,
    ) -> OpenPhoneApiResult<Vec<SearchResult>> {
        let list_query = ListQuery::new(per_kind).with_search(Some(query.to_string()));
        let page = self.client.list_contacts(&list_query).await?;
        Ok(page.data.iter().map(SearchResult::from_contact).collect())
    }

    /// Calls have no server-side text filter, so matching happens here.
    async fn search_calls(
        &self,
        query: &str,
        per_kind: usize,
    ) -> OpenPhoneApiResult<Vec<SearchResult>> {
        let page: UpstreamPage = self.client.list_calls(&ListQuery::new(per_kind)).await?;
        Ok(page
            .data
            .iter()
            .filter(|call| call_matches(call, query))
            .map(SearchResult::from_call)
            .collect())
    }

    fn tolerate(
        &self,
        kind: ResourceType,
        result: OpenPhoneApiResult<Vec<SearchResult>>,
    ) -> Vec<SearchResult> {
        result.unwrap_or_else(|e| {
            tracing::warn!(kind = %kind, "Search branch failed, skipping: {}", e);
            self.metrics.record_skipped_branch(kind);
            Vec::new()
        })
    }
}

/// Per-kind share of a search limit, rounded up.
pub fn partition_limit(limit: usize) -> usize {
    limit.div_ceil(SEARCH_KINDS)
}

/// Whether `query` is a case-sensitive substring of any call participant.
pub fn call_matches(call: &serde_json::Value, query: &str) -> bool {
    call_participants(call)
        .iter()
        .any(|participant| participant.contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partition_limit() {
        assert_eq!(partition_limit(10), 4);
        assert_eq!(partition_limit(9), 3);
        assert_eq!(partition_limit(1), 1);
        assert_eq!(partition_limit(2), 1);
    }

    #[test]
    fn test_call_matches_substring() {
        let call = json!({"participants": ["+15551234567", "+15559876543"]});
        assert!(call_matches(&call, "1234"));
        assert!(call_matches(&call, "+1555987"));
        assert!(!call_matches(&call, "0000"));
    }

    #[test]
    fn test_call_matches_is_case_sensitive() {
        let call = json!({"participants": ["Front Desk"]});
        assert!(call_matches(&call, "Desk"));
        assert!(!call_matches(&call, "desk"));
    }

    #[test]
    fn test_call_without_participants_never_matches() {
        assert!(!call_matches(&json!({"id": "AC1"}), "1"));
    }
}
