/// Ошибки разбора строковых значений DDM таблицы.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("пустое значение")]
    EmptyValue,

    #[error("невалидное число: {0:?}")]
    MalformedNumber(String),

    #[error("пустой номер порта")]
    EmptyPort,

    #[error("невалидный номер порта: {0:?}")]
    InvalidPort(String),
}

/// Ошибки опроса устройства. Любая из них прерывает весь scrape.
#[derive(Debug, thiserror::Error)]
pub enum DdmError {
    /// Контекст запроса отменён до начала опроса.
    #[error("опрос отменён")]
    ContextCanceled,

    #[error("не удалось подключиться к {target}: {reason}")]
    ConnectFailed { target: String, reason: String },

    /// Обход одной из колонок завершился транспортной ошибкой.
    #[error("не удалось обойти колонку {column}: {reason}")]
    WalkFailed { column: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, DdmError>;
