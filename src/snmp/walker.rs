use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::oid::{DdmColumn, SYS_NAME, parse_oid};
use super::v2c::SnmpClientV2c;
use crate::collector::{DdmReport, DiagnosticsSource, RawWalk, align};
use crate::config::SnmpSettings;
use crate::error::{DdmError, Result};

/// Опрашивает DDM таблицу одного коммутатора по SNMPv2c.
#[derive(Debug, Clone)]
pub struct SnmpWalker {
    target: String,
    community: String,
    settings: SnmpSettings,
}

impl SnmpWalker {
    pub fn new(target: impl Into<String>, community: impl Into<String>, settings: SnmpSettings) -> Self {
        Self {
            target: target.into(),
            community: community.into(),
            settings,
        }
    }

    /// Адрес агента с портом по умолчанию, если он не указан
    fn address(&self) -> String {
        let target = self.target.trim();
        if target.parse::<SocketAddr>().is_ok() {
            return target.to_string();
        }
        match target.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.settings.port),
            Ok(IpAddr::V4(ip)) => format!("{}:{}", ip, self.settings.port),
            Err(_) => match target.rsplit_once(':') {
                Some((_, port)) if port.parse::<u16>().is_ok() => target.to_string(),
                _ => format!("{}:{}", target, self.settings.port),
            },
        }
    }

    /// Обходит все шесть колонок за одну сессию.
    ///
    /// Отмена проверяется только до начала работы: уже идущий обход
    /// доходит до конца или до таймаута.
    pub async fn walk(&self, cancel: &CancellationToken) -> Result<RawWalk> {
        if cancel.is_cancelled() {
            return Err(DdmError::ContextCanceled);
        }

        let address = self.address();
        let mut client = SnmpClientV2c::new(&address, self.community.as_bytes(), &self.settings)
            .await
            .map_err(|e| DdmError::ConnectFailed {
                target: address.clone(),
                reason: format!("{:#}", e),
            })?;

        let mut walk = RawWalk::default();
        for column in DdmColumn::ALL {
            let walk_failed = |e: anyhow::Error| DdmError::WalkFailed {
                column: column.name(),
                reason: format!("{:#}", e),
            };

            let root = parse_oid(column.oid()).map_err(walk_failed)?;
            let values = client.walk_strings(&root).await.map_err(walk_failed)?;
            debug!(column = column.name(), rows = values.len(), "колонка получена");

            match column {
                DdmColumn::Port => walk.ports = values,
                DdmColumn::Temperature => walk.temperatures = values,
                DdmColumn::Voltage => walk.voltages = values,
                DdmColumn::BiasCurrent => walk.bias_currents = values,
                DdmColumn::TxPower => walk.tx_powers = values,
                DdmColumn::RxPower => walk.rx_powers = values,
            }
        }

        walk.sys_name = match parse_oid(SYS_NAME) {
            Ok(oid) => match client.get_string(&oid).await {
                Ok(name) => Some(name.trim().to_string()),
                Err(e) => {
                    warn!(addr = %address, error = %format!("{:#}", e), "не удалось получить sysName");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "невалидный OID sysName");
                None
            }
        };

        Ok(walk)
    }
}

#[async_trait]
impl DiagnosticsSource for SnmpWalker {
    async fn fetch_diagnostics(&self, cancel: &CancellationToken) -> Result<DdmReport> {
        let walk = self.walk(cancel).await?;
        let readings = align(&walk);

        Ok(DdmReport {
            sys_name: walk.sys_name.unwrap_or_default(),
            readings,
        })
    }
}
