//! Sequential detail enrichment for listed identifiers.

use tracing::{info, instrument, warn};

use hubscope_core::{ModelId, ModelRecord};

use super::api::HubApiClient;

/// Enriches listed identifiers with per-model detail metadata.
///
/// Lookups run one at a time, in listing order. A model whose lookup
/// fails is dropped with a warning; the output contains successful
/// records only, so aggregation never sees partial data.
pub struct ModelEnricher {
    api: HubApiClient,
}

impl ModelEnricher {
    /// Creates an enricher over the given API client.
    pub fn new(api: HubApiClient) -> Self {
        Self { api }
    }

    /// Looks up details for every identifier, keeping only successes.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn enrich(&self, ids: &[ModelId]) -> Vec<ModelRecord> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let record = self.api.model_detail(id).await;
            if record.is_success() {
                records.push(record);
            } else {
                warn!(
                    model = %id,
                    error = record.error.as_deref().unwrap_or("unknown"),
                    "Dropping model that failed enrichment"
                );
            }
        }
        info!(enriched = records.len(), "Enrichment complete");
        records
    }
}
