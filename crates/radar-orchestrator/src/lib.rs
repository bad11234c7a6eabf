use std::sync::Arc;

use chrono::Utc;
use radar_core::{RadarError, RadarProfile, StatementSource, StatementTable};
use ratio_engine::RatioEngine;
use score_engine::ScoreEngine;
use serde_json::json;

/// Linear rating pipeline: fetch statements, derive metrics, score axes.
///
/// Holds no mutable state, so one pipeline can rate independent companies
/// concurrently.
pub struct RadarPipeline {
    source: Arc<dyn StatementSource>,
    ratio_engine: RatioEngine,
    score_engine: ScoreEngine,
}

impl RadarPipeline {
    pub fn new(source: Arc<dyn StatementSource>) -> Self {
        Self {
            source,
            ratio_engine: RatioEngine::new(),
            score_engine: ScoreEngine::new(),
        }
    }

    /// Rate one company end to end.
    pub async fn rate(&self, symbol: &str) -> Result<RadarProfile, RadarError> {
        tracing::info!(symbol, "rating company fundamentals");
        let table = self.source.fetch_statements(symbol).await?;
        self.rate_table(symbol, &table)
    }

    /// Rate a company from an already-fetched statement table.
    pub fn rate_table(
        &self,
        symbol: &str,
        table: &StatementTable,
    ) -> Result<RadarProfile, RadarError> {
        let derived = self.ratio_engine.derive(table);
        let axes = self.score_engine.score(table, &derived)?;

        let mut metrics = serde_json::Map::new();
        for axis in &axes {
            for member in &axis.members {
                metrics.insert(
                    member.metric.name().to_string(),
                    json!({ "value": member.value, "score": member.score }),
                );
            }
        }
        tracing::debug!(
            symbol,
            fiscal_years = table.n_years(),
            "rated company across five axes"
        );

        Ok(RadarProfile {
            label: symbol.to_uppercase(),
            computed_at: Utc::now(),
            axes,
            metrics: serde_json::Value::Object(metrics),
        })
    }
}
