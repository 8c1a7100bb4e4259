use crate::error::ParseError;

/// Разбирает значение DisplayString из DDM таблицы, например `"58.750000"`.
///
/// Единицы измерения не пересчитываются, это делает вызывающий код.
pub fn parse_number(s: &str) -> Result<f64, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::EmptyValue);
    }

    // f64::from_str принимает "inf" и "NaN", коммутатор такого не присылает
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return Err(ParseError::MalformedNumber(s.to_string()));
    }

    s.parse::<f64>()
        .map_err(|_| ParseError::MalformedNumber(s.to_string()))
}

/// Нормализует номер порта.
///
/// Формат `stack/slot/port` (`"1/0/16"`) отдаёт последний сегмент как есть,
/// без удаления ведущих нулей. Иначе значение разбирается как целое число:
/// `"01"` превращается в `"1"`.
pub fn parse_port(s: &str) -> Result<String, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::EmptyPort);
    }

    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 3 {
        let port = parts[2];
        if port.is_empty() {
            return Err(ParseError::EmptyPort);
        }
        return Ok(port.to_string());
    }

    s.parse::<i64>()
        .map(|port| port.to_string())
        .map_err(|_| ParseError::InvalidPort(s.to_string()))
}
