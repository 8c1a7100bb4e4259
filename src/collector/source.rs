use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::types::DdmReport;
use crate::error::Result;

/// Источник показаний DDM для коллектора.
///
/// Реализуется SNMP клиентом и тестовыми заглушками.
#[async_trait]
pub trait DiagnosticsSource: Send + Sync {
    /// Опрашивает устройство и возвращает показания по портам.
    ///
    /// # Errors
    ///
    /// Ошибка означает, что опрос целиком не удался; частичных результатов нет.
    async fn fetch_diagnostics(&self, cancel: &CancellationToken) -> Result<DdmReport>;
}
