use tracing::{debug, warn};

use super::types::{DiagnosticReading, RawWalk};
use crate::parser::{parse_number, parse_port};

/// Склеивает колонки в показания по портам.
///
/// Колонка портов задаёт количество и порядок строк. Строка с битым портом
/// выбрасывается целиком. Короткая колонка или неразборчивое значение дают
/// ноль в соответствующем поле.
pub fn align(walk: &RawWalk) -> Vec<DiagnosticReading> {
    let mut readings = Vec::with_capacity(walk.ports.len());

    for (idx, raw_port) in walk.ports.iter().enumerate() {
        let port = match parse_port(raw_port) {
            Ok(port) => port,
            Err(e) => {
                warn!(index = idx, port = %raw_port, error = %e, "пропускаем строку с невалидным портом");
                continue;
            }
        };

        let mut reading = DiagnosticReading {
            port,
            ..Default::default()
        };

        let fields: [(&'static str, &[String], &mut f64); 5] = [
            ("temperature", walk.temperatures.as_slice(), &mut reading.temperature_c),
            ("voltage", walk.voltages.as_slice(), &mut reading.voltage_v),
            ("bias_current", walk.bias_currents.as_slice(), &mut reading.bias_current_ma),
            ("tx_power", walk.tx_powers.as_slice(), &mut reading.tx_power_dbm),
            ("rx_power", walk.rx_powers.as_slice(), &mut reading.rx_power_dbm),
        ];

        let mut degraded = false;
        for (column, values, slot) in fields {
            match values.get(idx) {
                Some(raw) => match parse_number(raw) {
                    Ok(value) => *slot = value,
                    Err(e) => {
                        warn!(column, index = idx, value = %raw, error = %e, "значение не разобрано, используем 0");
                        degraded = true;
                    }
                },
                None => degraded = true,
            }
        }

        if degraded {
            debug!(port = %reading.port, "показания порта неполные");
        }
        reading.degraded = degraded;

        readings.push(reading);
    }

    readings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn walk(ports: &[&str]) -> RawWalk {
        let n = ports.len();
        RawWalk {
            ports: strings(ports),
            temperatures: vec!["45.5".to_string(); n],
            voltages: vec!["3.30".to_string(); n],
            bias_currents: vec!["6.0".to_string(); n],
            tx_powers: vec!["0.5".to_string(); n],
            rx_powers: vec!["0.4".to_string(); n],
            sys_name: None,
        }
    }

    #[test]
    fn aligns_rows_by_position() {
        let raw = RawWalk {
            ports: strings(&["1/0/1", "1/0/2"]),
            temperatures: strings(&["45.5", "46.0"]),
            voltages: strings(&["3.30", "3.29"]),
            bias_currents: strings(&["6.0", "5.8"]),
            tx_powers: strings(&["0.5", "0.6"]),
            rx_powers: strings(&["0.4", "0.45"]),
            sys_name: Some("Test Switch".to_string()),
        };

        let readings = align(&raw);

        assert_eq!(
            readings,
            vec![
                DiagnosticReading {
                    port: "1".to_string(),
                    temperature_c: 45.5,
                    voltage_v: 3.30,
                    bias_current_ma: 6.0,
                    tx_power_dbm: 0.5,
                    rx_power_dbm: 0.4,
                    degraded: false,
                },
                DiagnosticReading {
                    port: "2".to_string(),
                    temperature_c: 46.0,
                    voltage_v: 3.29,
                    bias_current_ma: 5.8,
                    tx_power_dbm: 0.6,
                    rx_power_dbm: 0.45,
                    degraded: false,
                },
            ]
        );
    }

    #[test]
    fn short_columns_yield_zero() {
        let mut raw = walk(&["1/0/1", "1/0/2", "1/0/3"]);
        raw.temperatures = strings(&["45.5", "46.0"]);
        raw.voltages = strings(&["3.30"]);

        let readings = align(&raw);

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[1].temperature_c, 46.0);
        assert_eq!(readings[1].voltage_v, 0.0);
        assert_eq!(readings[2].temperature_c, 0.0);
        assert_eq!(readings[2].bias_current_ma, 6.0);
        assert!(!readings[0].degraded);
        assert!(readings[1].degraded);
        assert!(readings[2].degraded);
    }

    #[test]
    fn invalid_port_drops_only_its_row() {
        let mut raw = walk(&["1/0/1", "invalid", "1/0/3"]);
        raw.temperatures = strings(&["40.0", "41.0", "42.0"]);

        let readings = align(&raw);

        let ports: Vec<&str> = readings.iter().map(|r| r.port.as_str()).collect();
        assert_eq!(ports, ["1", "3"]);
        assert_eq!(readings[0].temperature_c, 40.0);
        assert_eq!(readings[1].temperature_c, 42.0);
    }

    #[test]
    fn unparseable_fields_keep_the_row() {
        let raw = RawWalk {
            ports: strings(&["1/0/1"]),
            temperatures: strings(&["invalid"]),
            voltages: strings(&["not-a-number"]),
            bias_currents: strings(&["bad"]),
            tx_powers: strings(&["-3.1"]),
            rx_powers: strings(&[""]),
            sys_name: None,
        };

        let readings = align(&raw);

        assert_eq!(readings.len(), 1);
        let r = &readings[0];
        assert_eq!(r.port, "1");
        assert_eq!(r.temperature_c, 0.0);
        assert_eq!(r.voltage_v, 0.0);
        assert_eq!(r.bias_current_ma, 0.0);
        assert_eq!(r.tx_power_dbm, -3.1);
        assert_eq!(r.rx_power_dbm, 0.0);
        assert!(r.degraded);
    }

    #[test]
    fn keeps_agent_order() {
        let readings = align(&walk(&["1/0/10", "1/0/2", "1/0/1"]));

        let ports: Vec<&str> = readings.iter().map(|r| r.port.as_str()).collect();
        assert_eq!(ports, ["10", "2", "1"]);
    }

    #[test]
    fn empty_walk_yields_nothing() {
        assert!(align(&RawWalk::default()).is_empty());
    }
}
