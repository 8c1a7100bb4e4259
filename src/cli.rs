use clap::Parser;
use std::path::PathBuf;

use tplink_ddm_exporter::LabelMode;
use tplink_ddm_exporter::config::Overrides;

#[derive(Debug, Parser)]
#[command(name = "tplink-ddm-exporter", version, about = "Prometheus exporter for TP-Link SFP DDM readings")]
pub struct Cli {
    /// YAML файл конфигурации
    #[arg(long, env = "DDM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Адрес коммутатора
    #[arg(long, env = "SNMP_TARGET")]
    pub target: Option<String>,

    /// Community string SNMPv2c
    #[arg(long, env = "SNMP_COMMUNITY", hide_env_values = true)]
    pub community: Option<String>,

    /// Адрес HTTP сервера
    #[arg(long = "addr", env = "LISTEN_ADDR")]
    pub listen_addr: Option<String>,

    /// Уровень логов (debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Набор лейблов для метрик портов
    #[arg(long, value_enum)]
    pub labels: Option<LabelMode>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            target: self.target.clone(),
            community: self.community.clone(),
            listen_addr: self.listen_addr.clone(),
            log_level: self.log_level.clone(),
            labels: self.labels,
        }
    }
}
