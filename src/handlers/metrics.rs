use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use prometheus::Registry;

use super::AppState;
use crate::formatter::TextFormatter;

const INDEX_HTML: &str = r#"<html>
<head><title>TP-Link DDM Exporter</title></head>
<body>
<h1>TP-Link DDM Exporter</h1>
<p><a href="/metrics">Exporter Metrics</a></p>
<p><a href="/scrape">Scrape Device Metrics</a></p>
</body>
</html>"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Собственные метрики экспортера, устройство не опрашивается
pub async fn exporter_metrics(State(state): State<AppState>) -> Response {
    render(&state.exporter_registry)
}

/// Опрашивает коммутатор и отдаёт все метрики.
///
/// Опрос идёт в отдельной задаче: если клиент отключится, обход всё равно
/// доработает и выставит `up` и длительность.
pub async fn scrape(State(state): State<AppState>) -> Response {
    let collector = state.collector.clone();
    let cancel = state.shutdown.child_token();
    let task = tokio::spawn(async move { collector.scrape(&cancel).await });

    // ошибка опроса уже залогирована коллектором и видна как up=0
    if let Err(e) = task.await {
        tracing::error!(error = %e, "задача опроса завершилась аварийно");
    }
    render(&state.scrape_registry)
}

fn render(registry: &Registry) -> Response {
    match TextFormatter::encode_registry(registry) {
        Ok(body) => ([(header::CONTENT_TYPE, TextFormatter::content_type())], body).into_response(),
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "не удалось отдать метрики");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
