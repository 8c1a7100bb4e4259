//! Экспортер DDM показаний SFP модулей коммутаторов TP-Link.
//!
//! Коммутатор опрашивается по SNMPv2c при каждом запросе `/scrape`,
//! результат отдаётся в текстовом формате Prometheus.

pub mod collector;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;
pub mod parser;
pub mod registry;
pub mod routes;
pub mod snmp;

pub use collector::{DdmCollector, DdmReport, DiagnosticReading, DiagnosticsSource};
pub use config::{AppConfig, LabelMode};
pub use error::{DdmError, ParseError};
pub use snmp::SnmpWalker;
