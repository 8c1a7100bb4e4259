use prometheus::Registry;
use tokio_util::sync::CancellationToken;

use crate::collector::DdmCollector;

pub mod health;
pub mod metrics;

pub use health::health;
pub use metrics::{exporter_metrics, index, scrape};

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub collector: DdmCollector,
    /// Только собственные метрики экспортера, без опроса устройства
    pub exporter_registry: Registry,
    /// Метрики устройства вместе с up и duration
    pub scrape_registry: Registry,
    pub shutdown: CancellationToken,
}
