use anyhow::{Context, Result};
use snmp2::Oid;

/// Корень таблицы tpDdmStatus из TP-Link enterprise MIB
pub const DDM_STATUS_ENTRY: &str = "1.3.6.1.4.1.11863.6.96.1.7.1.1";

/// SNMPv2-MIB::sysName.0
pub const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";

/// Колонки DDM таблицы, которые обходятся при каждом опросе.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdmColumn {
    Port,
    Temperature,
    Voltage,
    BiasCurrent,
    TxPower,
    RxPower,
}

impl DdmColumn {
    pub const ALL: [DdmColumn; 6] = [
        DdmColumn::Port,
        DdmColumn::Temperature,
        DdmColumn::Voltage,
        DdmColumn::BiasCurrent,
        DdmColumn::TxPower,
        DdmColumn::RxPower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DdmColumn::Port => "port",
            DdmColumn::Temperature => "temperature",
            DdmColumn::Voltage => "voltage",
            DdmColumn::BiasCurrent => "bias_current",
            DdmColumn::TxPower => "tx_power",
            DdmColumn::RxPower => "rx_power",
        }
    }

    pub fn oid(self) -> &'static str {
        match self {
            DdmColumn::Port => "1.3.6.1.4.1.11863.6.96.1.7.1.1.1",
            DdmColumn::Temperature => "1.3.6.1.4.1.11863.6.96.1.7.1.1.2",
            DdmColumn::Voltage => "1.3.6.1.4.1.11863.6.96.1.7.1.1.3",
            DdmColumn::BiasCurrent => "1.3.6.1.4.1.11863.6.96.1.7.1.1.4",
            DdmColumn::TxPower => "1.3.6.1.4.1.11863.6.96.1.7.1.1.5",
            DdmColumn::RxPower => "1.3.6.1.4.1.11863.6.96.1.7.1.1.6",
        }
    }
}

pub fn parse_oid(s: &str) -> Result<Oid<'static>> {
    let parts: Result<Vec<u64>, _> = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.context(format!("Невалидный OID: {}", s))?;
    Oid::from(&parts).map_err(|e| anyhow::anyhow!("Не удалось создать Oid из '{}': {:?}", s, e))
}
