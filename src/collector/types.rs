/// Показания DDM одного порта за один опрос.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticReading {
    pub port: String,
    pub temperature_c: f64,
    pub voltage_v: f64,
    /// В миллиамперах, как отдаёт коммутатор
    pub bias_current_ma: f64,
    pub tx_power_dbm: f64,
    pub rx_power_dbm: f64,
    /// Хотя бы одно поле не пришло или не разобралось и осталось нулём
    pub degraded: bool,
}

/// Сырые результаты обхода шести колонок DDM таблицы.
///
/// Длины колонок могут не совпадать: субагент иногда пропускает строку.
#[derive(Debug, Clone, Default)]
pub struct RawWalk {
    pub ports: Vec<String>,
    pub temperatures: Vec<String>,
    pub voltages: Vec<String>,
    pub bias_currents: Vec<String>,
    pub tx_powers: Vec<String>,
    pub rx_powers: Vec<String>,
    pub sys_name: Option<String>,
}

/// Результат одного опроса устройства.
#[derive(Debug, Clone, Default)]
pub struct DdmReport {
    /// sysName устройства, пустая строка если не удалось получить
    pub sys_name: String,
    pub readings: Vec<DiagnosticReading>,
}
