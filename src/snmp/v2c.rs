use anyhow::{Context, Result, anyhow, bail};
use snmp2::{AsyncSession, Oid, Value};
use tokio::time::{Duration, timeout};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::config::SnmpSettings;

/// Узел, полученный при обходе, без ссылок на буфер сессии.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    /// Значение другого типа, хранится только для лога
    Other(String),
    /// endOfMibView, noSuchObject или noSuchInstance
    End,
}

impl From<Value<'_>> for Node {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::OctetString(bytes) => Node::Text(String::from_utf8_lossy(bytes).into_owned()),
            Value::EndOfMibView | Value::NoSuchObject | Value::NoSuchInstance => Node::End,
            other => Node::Other(format!("{:?}", other)),
        }
    }
}

pub(crate) enum Step {
    Continue(Oid<'static>),
    Done,
}

/// `next` лексикографически больше `prev` по числовым компонентам
fn follows(prev: &Oid<'_>, next: &Oid<'_>) -> bool {
    match (prev.iter(), next.iter()) {
        (Some(prev), Some(next)) => next.cmp(prev) == Ordering::Greater,
        _ => false,
    }
}

/// Добавляет строковые значения пачки GETBULK в `out` и решает, продолжать ли обход.
///
/// Каждый OID пачки должен быть строго больше предыдущего, иначе обход
/// останавливается: агент, отвечающий назад, зациклил бы `walk_strings`.
pub(crate) fn absorb(
    root: &Oid<'_>,
    last: &Oid<'_>,
    batch: Vec<(Oid<'static>, Node)>,
    out: &mut Vec<String>,
) -> Step {
    let mut prev = last.to_owned();
    let mut next = None;

    for (oid, node) in batch {
        if !oid.starts_with(root) {
            return Step::Done;
        }
        if !follows(&prev, &oid) {
            warn!(prev = %prev, oid = %oid, "OID не возрастает, обход прерван");
            return Step::Done;
        }

        match node {
            Node::Text(value) => out.push(value),
            Node::Other(value) => {
                debug!(oid = %oid, value = %value, "неожиданный тип SNMP значения, пропускаем");
            }
            Node::End => return Step::Done,
        }

        prev = oid.clone();
        next = Some(oid);
    }

    match next {
        Some(oid) => Step::Continue(oid),
        None => Step::Done,
    }
}

/// Повторять ли запрос после неудачной попытки номер `attempt` (с нуля).
///
/// Всего делается не больше `retries + 1` попыток.
fn should_retry(attempt: u32, retries: u32) -> bool {
    attempt < retries
}

/// Сессия SNMPv2c на время одного опроса.
pub struct SnmpClientV2c {
    session: AsyncSession,
    timeout: Duration,
    retries: u32,
    max_repetitions: u32,
}

impl SnmpClientV2c {
    pub async fn new(target: &str, community: &[u8], settings: &SnmpSettings) -> Result<Self> {
        let timeout_duration = Duration::from_secs(settings.timeout_secs);

        let session = timeout(timeout_duration, AsyncSession::new_v2c(target, community, 2))
            .await
            .map_err(|_| anyhow!("Таймаут создания SNMP сессии"))?
            .context("Не удалось создать SNMP сессию")?;

        Ok(Self {
            session,
            timeout: timeout_duration,
            retries: settings.retries,
            max_repetitions: settings.max_repetitions,
        })
    }

    /// GET одного строкового значения
    pub async fn get_string(&mut self, oid: &Oid<'_>) -> Result<String> {
        let resp = timeout(self.timeout, self.session.get(oid))
            .await
            .map_err(|_| anyhow!("Таймаут SNMP GET"))?
            .context("SNMP GET запрос не удался")?;

        let (_, value) = resp
            .varbinds
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("SNMP ответ пустой"))?;

        match value {
            Value::OctetString(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            other => bail!("Неожиданный тип значения: {:?}", other),
        }
    }

    /// Обходит поддерево и возвращает только строковые значения в порядке агента
    pub async fn walk_strings(&mut self, root: &Oid<'_>) -> Result<Vec<String>> {
        let mut values = Vec::new();
        let mut current = root.to_owned();

        loop {
            let batch = self.getbulk(&current).await?;
            if batch.is_empty() {
                break;
            }

            match absorb(root, &current, batch, &mut values) {
                Step::Continue(next) => current = next,
                Step::Done => break,
            }
        }

        Ok(values)
    }

    /// GETBULK с таймаутом и повторами
    async fn getbulk(&mut self, oid: &Oid<'_>) -> Result<Vec<(Oid<'static>, Node)>> {
        let mut attempt = 0;

        loop {
            let err = match timeout(
                self.timeout,
                self.session.getbulk(&[oid], 0, self.max_repetitions),
            )
            .await
            {
                Ok(Ok(resp)) => {
                    return Ok(resp
                        .varbinds
                        .into_iter()
                        .map(|(oid, value)| (oid.to_owned(), Node::from(value)))
                        .collect());
                }
                Ok(Err(e)) => anyhow!("SNMP GETBULK запрос не удался: {}", e),
                Err(_) => anyhow!("Таймаут SNMP GETBULK ({:?})", self.timeout),
            };

            if !should_retry(attempt, self.retries) {
                return Err(err);
            }
            attempt += 1;
            debug!(oid = %oid, attempt, error = %err, "повторяем GETBULK");
        }
    }
}
