use anyhow::{Context, Result};
use std::path::Path;

pub mod settings;

pub use settings::{LabelMode, Settings, SnmpSettings};

/// Значения из командной строки и окружения, перекрывающие файл.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<String>,
    pub community: Option<String>,
    pub listen_addr: Option<String>,
    pub log_level: Option<String>,
    pub labels: Option<LabelMode>,
}

/// Главная конфигурация приложения
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub settings: Settings,
}

impl AppConfig {
    /// Загружает конфигурацию из YAML файла, без файла берутся значения по умолчанию
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Не удалось прочитать файл: {}", path.display()))?;
                Self::parse(&content)
                    .with_context(|| format!("Не удалось загрузить конфигурацию {}", path.display()))?
            }
            None => Settings::default(),
        };

        Ok(Self { settings })
    }

    fn parse(content: &str) -> Result<Settings> {
        // пустой файл для serde_yml это null, а не пустой маппинг
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yml::from_str(content).context("Не удалось распарсить YAML")
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        let s = &mut self.settings;
        if let Some(target) = overrides.target {
            s.target = target;
        }
        if let Some(community) = overrides.community {
            s.community = community;
        }
        if let Some(addr) = overrides.listen_addr {
            s.listen_addr = addr;
        }
        if let Some(level) = overrides.log_level {
            s.log_level = level;
        }
        if let Some(labels) = overrides.labels {
            s.labels = labels;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.settings;
        if s.target.trim().is_empty() {
            anyhow::bail!("target не задан");
        }
        if s.snmp.timeout_secs == 0 {
            anyhow::bail!("snmp.timeout_secs должен быть больше нуля");
        }
        if s.snmp.max_repetitions == 0 {
            anyhow::bail!("snmp.max_repetitions должен быть больше нуля");
        }
        Ok(())
    }
}
