// Repository trait for fee history data access
use crate::domain::fee_history::{ChartDuration, FeeHistoryRaw};
use async_trait::async_trait;

#[async_trait]
pub trait FeeHistoryRepository: Send + Sync {
    /// Fetch raw fee samples covering `duration`
    async fn fetch_fee_history(&self, duration: ChartDuration) -> anyhow::Result<FeeHistoryRaw>;
}
