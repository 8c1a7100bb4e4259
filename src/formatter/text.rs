use anyhow::{Context, Result};
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Registry, TextEncoder};

/// Текстовый формат экспозиции Prometheus
pub struct TextFormatter;

impl TextFormatter {
    pub fn content_type() -> String {
        TextEncoder::new().format_type().to_string()
    }

    pub fn encode(families: &[MetricFamily]) -> Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(families, &mut buf)
            .context("Не удалось закодировать метрики")?;
        String::from_utf8(buf).context("Метрики не в UTF-8")
    }

    pub fn encode_registry(registry: &Registry) -> Result<String> {
        Self::encode(&registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Gauge;

    #[test]
    fn encodes_registered_gauge() {
        let registry = Registry::new();
        let gauge = Gauge::new("tplink_ddm_exporter_up", "Was the last scrape successful").unwrap();
        registry.register(Box::new(gauge.clone())).unwrap();
        gauge.set(1.0);

        let text = TextFormatter::encode_registry(&registry).unwrap();

        assert!(text.contains("# TYPE tplink_ddm_exporter_up gauge"));
        assert!(text.contains("tplink_ddm_exporter_up 1"));
        assert!(TextFormatter::content_type().starts_with("text/plain"));
    }
}
