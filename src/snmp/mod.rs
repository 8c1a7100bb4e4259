pub mod oid;
pub mod v2c;
pub mod walker;

pub use oid::{DdmColumn, parse_oid};
pub use v2c::SnmpClientV2c;
pub use walker::SnmpWalker;
