use prometheus::Registry;

use crate::collector::DdmCollector;

/// Реестр собственных метрик экспортера и реестр метрик устройства.
///
/// Первый отдаётся на `/metrics` и не вызывает опроса: там `up`,
/// длительность последнего опроса и метрики процесса. Второй отдаётся на
/// `/scrape` и содержит весь коллектор.
pub fn setup_registries(collector: &DdmCollector) -> prometheus::Result<(Registry, Registry)> {
    let exporter_registry = Registry::new();
    exporter_registry.register(Box::new(collector.up().clone()))?;
    exporter_registry.register(Box::new(collector.scrape_duration().clone()))?;

    // метрики процесса есть только на linux
    #[cfg(target_os = "linux")]
    exporter_registry.register(Box::new(
        prometheus::process_collector::ProcessCollector::for_self(),
    ))?;

    let scrape_registry = Registry::new();
    scrape_registry.register(Box::new(collector.clone()))?;

    Ok((exporter_registry, scrape_registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{DdmReport, DiagnosticsSource};
    use crate::config::LabelMode;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    struct Empty;

    #[async_trait]
    impl DiagnosticsSource for Empty {
        async fn fetch_diagnostics(&self, _cancel: &CancellationToken) -> Result<DdmReport> {
            Ok(DdmReport::default())
        }
    }

    fn names(registry: &Registry) -> Vec<String> {
        registry
            .gather()
            .iter()
            .map(|family| family.name().to_string())
            .collect()
    }

    #[test]
    fn exporter_registry_has_no_port_families() {
        let collector = DdmCollector::new(Arc::new(Empty), "192.168.1.1", LabelMode::Port).unwrap();
        let (exporter, scrape) = setup_registries(&collector).unwrap();

        let exporter = names(&exporter);
        assert!(exporter.contains(&"tplink_ddm_exporter_up".to_string()));
        assert!(exporter.contains(&"tplink_ddm_scrape_duration_seconds".to_string()));
        assert!(!exporter.iter().any(|name| name.starts_with("tplink_sfp_")));

        assert!(names(&scrape).contains(&"tplink_ddm_exporter_up".to_string()));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn exporter_registry_exposes_process_metrics() {
        let collector = DdmCollector::new(Arc::new(Empty), "192.168.1.1", LabelMode::Port).unwrap();
        let (exporter, _) = setup_registries(&collector).unwrap();

        let names = names(&exporter);
        assert!(
            names.iter().any(|name| name.starts_with("process_")),
            "no process families in {names:?}"
        );
    }
}
