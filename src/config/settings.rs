use serde::Deserialize;

/// Настройки экспортера. Все поля необязательны в YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Адрес коммутатора, `host` или `host:port`
    pub target: String,
    /// Community string SNMPv2c
    pub community: String,
    /// Адрес HTTP сервера
    pub listen_addr: String,
    pub log_level: String,
    /// Набор лейблов для метрик портов
    pub labels: LabelMode,
    pub snmp: SnmpSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnmpSettings {
    /// Порт агента, если в target он не указан
    pub port: u16,
    /// Таймаут на создание сессии и на каждый запрос (секунды)
    pub timeout_secs: u64,
    /// Количество повторов запроса при ошибках транспорта
    pub retries: u32,
    pub max_repetitions: u32,
}

/// Лейблы метрик портов.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Только `port`
    #[default]
    Port,
    /// `device`, `target` и `port`, для нескольких коммутаторов в одном процессе
    Device,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target: "192.168.2.96".to_string(),
            community: "public".to_string(),
            listen_addr: "0.0.0.0:9116".to_string(),
            log_level: "info".to_string(),
            labels: LabelMode::Port,
            snmp: SnmpSettings::default(),
        }
    }
}

impl Default for SnmpSettings {
    fn default() -> Self {
        Self {
            port: 161,
            timeout_secs: 10,
            retries: 3,
            max_repetitions: 10,
        }
    }
}
