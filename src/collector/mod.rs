use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, GaugeVec, Opts};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub mod aligner;
pub mod source;
pub mod types;

pub use aligner::align;
pub use source::DiagnosticsSource;
pub use types::{DdmReport, DiagnosticReading, RawWalk};

use crate::config::LabelMode;
use crate::error::Result;

const MILLIAMPS_PER_AMPERE: f64 = 1000.0;

/// Коллектор DDM метрик одного коммутатора.
///
/// Клоны разделяют одни и те же gauge: один клон регистрируется в
/// `prometheus::Registry`, другой запускает опросы из HTTP обработчика.
#[derive(Clone)]
pub struct DdmCollector {
    source: Arc<dyn DiagnosticsSource>,
    target: String,
    labels: LabelMode,

    up: Gauge,
    scrape_duration: Gauge,
    temperature: GaugeVec,
    voltage: GaugeVec,
    bias_current: GaugeVec,
    tx_power: GaugeVec,
    rx_power: GaugeVec,

    /// Сброс и заполнение gauge не должны перемешиваться с чтением снимка
    publish: Arc<Mutex<()>>,
}

impl DdmCollector {
    pub fn new(
        source: Arc<dyn DiagnosticsSource>,
        target: impl Into<String>,
        labels: LabelMode,
    ) -> prometheus::Result<Self> {
        let label_names: &[&str] = match labels {
            LabelMode::Port => &["port"],
            LabelMode::Device => &["device", "target", "port"],
        };

        let port_gauge = |name: &str, help: &str| GaugeVec::new(Opts::new(name, help), label_names);

        Ok(Self {
            source,
            target: target.into(),
            labels,
            up: Gauge::new(
                "tplink_ddm_exporter_up",
                "Was the last scrape successful (1 = yes, 0 = no)",
            )?,
            scrape_duration: Gauge::new(
                "tplink_ddm_scrape_duration_seconds",
                "Duration of the last scrape in seconds",
            )?,
            temperature: port_gauge("tplink_sfp_temperature_celsius", "SFP temperature in Celsius")?,
            voltage: port_gauge("tplink_sfp_voltage_volts", "SFP voltage in volts")?,
            bias_current: port_gauge(
                "tplink_sfp_bias_current_amperes",
                "SFP bias current in amperes",
            )?,
            tx_power: port_gauge("tplink_sfp_tx_power_dbm", "SFP TX power in dBm")?,
            rx_power: port_gauge("tplink_sfp_rx_power_dbm", "SFP RX power in dBm")?,
            publish: Arc::new(Mutex::new(())),
        })
    }

    /// Gauge успешности последнего опроса, для реестра собственных метрик
    pub fn up(&self) -> &Gauge {
        &self.up
    }

    pub fn scrape_duration(&self) -> &Gauge {
        &self.scrape_duration
    }

    /// Опрашивает устройство и обновляет метрики.
    ///
    /// При ошибке `up` становится 0, а значения портов от прошлого удачного
    /// опроса остаются как есть. При успехе все пять наборов сбрасываются и
    /// заполняются заново, так что пропавшие порты исчезают из выдачи.
    pub async fn scrape(&self, cancel: &CancellationToken) -> Result<usize> {
        let start = Instant::now();

        let report = match self.source.fetch_diagnostics(cancel).await {
            Ok(report) => report,
            Err(e) => {
                warn!(target_addr = %self.target, error = %e, "опрос DDM не удался");
                let _guard = self.lock();
                self.up.set(0.0);
                self.scrape_duration.set(start.elapsed().as_secs_f64());
                return Err(e);
            }
        };

        let ports = report.readings.len();
        let elapsed = {
            let _guard = self.lock();
            self.reset();
            for reading in &report.readings {
                self.publish_reading(&report.sys_name, reading);
            }
            self.up.set(1.0);
            let elapsed = start.elapsed().as_secs_f64();
            self.scrape_duration.set(elapsed);
            elapsed
        };
        info!(target_addr = %self.target, ports, elapsed, "опрос DDM завершён");

        Ok(ports)
    }

    fn reset(&self) {
        self.temperature.reset();
        self.voltage.reset();
        self.bias_current.reset();
        self.tx_power.reset();
        self.rx_power.reset();
    }

    fn publish_reading(&self, device: &str, reading: &DiagnosticReading) {
        let values: Vec<&str> = match self.labels {
            LabelMode::Port => vec![reading.port.as_str()],
            LabelMode::Device => vec![device, self.target.as_str(), reading.port.as_str()],
        };

        self.temperature.with_label_values(values.as_slice()).set(reading.temperature_c);
        self.voltage.with_label_values(values.as_slice()).set(reading.voltage_v);
        self.bias_current
            .with_label_values(values.as_slice())
            .set(reading.bias_current_ma / MILLIAMPS_PER_AMPERE);
        self.tx_power.with_label_values(values.as_slice()).set(reading.tx_power_dbm);
        self.rx_power.with_label_values(values.as_slice()).set(reading.rx_power_dbm);
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.publish.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn metrics(&self) -> [&dyn Collector; 7] {
        [
            &self.up,
            &self.scrape_duration,
            &self.temperature,
            &self.voltage,
            &self.bias_current,
            &self.tx_power,
            &self.rx_power,
        ]
    }
}

impl Collector for DdmCollector {
    /// Набор дескрипторов не зависит от результата опросов
    fn desc(&self) -> Vec<&Desc> {
        self.metrics().into_iter().flat_map(|m| m.desc()).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let _guard = self.lock();
        self.metrics().into_iter().flat_map(|m| m.collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdmError;
    use async_trait::async_trait;

    struct Failing;

    #[async_trait]
    impl DiagnosticsSource for Failing {
        async fn fetch_diagnostics(&self, _cancel: &CancellationToken) -> Result<DdmReport> {
            Err(DdmError::ContextCanceled)
        }
    }

    #[test]
    fn describes_seven_families() {
        let collector = DdmCollector::new(Arc::new(Failing), "192.168.1.1", LabelMode::Port).unwrap();

        let names: Vec<&str> = collector.desc().iter().map(|d| d.fq_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "tplink_ddm_exporter_up",
                "tplink_ddm_scrape_duration_seconds",
                "tplink_sfp_temperature_celsius",
                "tplink_sfp_voltage_volts",
                "tplink_sfp_bias_current_amperes",
                "tplink_sfp_tx_power_dbm",
                "tplink_sfp_rx_power_dbm",
            ]
        );
    }

    #[test]
    fn device_mode_declares_extra_labels() {
        let collector = DdmCollector::new(Arc::new(Failing), "192.168.1.1", LabelMode::Device).unwrap();

        let descs = collector.desc();
        assert_eq!(descs[2].variable_labels, ["device", "target", "port"]);
    }

    #[tokio::test]
    async fn failure_sets_up_to_zero() {
        let collector = DdmCollector::new(Arc::new(Failing), "192.168.1.1", LabelMode::Port).unwrap();
        collector.up().set(1.0);

        let result = collector.scrape(&CancellationToken::new()).await;

        assert!(result.is_err());
        assert_eq!(collector.up().get(), 0.0);
        assert!(collector.scrape_duration().get() >= 0.0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failure_waits_for_reader_to_finish() {
        let collector = DdmCollector::new(Arc::new(Failing), "192.168.1.1", LabelMode::Port).unwrap();
        collector.up().set(1.0);
        collector.scrape_duration().set(-1.0);

        // читатель снимка держит блокировку
        let guard = collector.lock();
        let task = tokio::spawn({
            let collector = collector.clone();
            async move { collector.scrape(&CancellationToken::new()).await }
        });

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(collector.up().get(), 1.0);
        assert_eq!(collector.scrape_duration().get(), -1.0);

        drop(guard);
        assert!(task.await.unwrap().is_err());
        assert_eq!(collector.up().get(), 0.0);
        assert!(collector.scrape_duration().get() >= 0.0);
    }
}
