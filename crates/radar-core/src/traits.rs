use crate::{RadarError, StatementTable};
use async_trait::async_trait;

/// Trait for statement retrieval collaborators (data providers).
///
/// Implementations return one aligned, most-recent-first table of annual
/// statements per symbol. A symbol the provider does not know must map to
/// `RadarError::SymbolNotFound` so the presentation layer can surface it.
#[async_trait]
pub trait StatementSource: Send + Sync {
    async fn fetch_statements(&self, symbol: &str) -> Result<StatementTable, RadarError>;
}
