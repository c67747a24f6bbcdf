//! Exchange-rate service abstractions

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RateService: Send + Sync {
    /// Units of `to` per one unit of `from`.
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<f64>;

    /// Converts `amount` of `from` into `to`. The remote service owns the
    /// arithmetic; nothing is computed locally.
    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<f64>;
}
