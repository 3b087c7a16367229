use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::format_number;

fn color_for(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "31"
    } else if status.is_success() {
        "36"
    } else {
        "33"
    }
}

/// Строка журнала: время | длительность | размер | статус метод путь
pub fn format_line(
    status: StatusCode,
    method: &Method,
    path: &str,
    millis: u128,
    size: Option<usize>,
) -> String {
    let size = size.map(format_number).unwrap_or_else(|| "error".into());
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_for(status),
        Local::now().format("%H:%M:%S"),
        millis,
        size,
        status.as_u16(),
        method,
        path
    )
}

/// Middleware для логирования HTTP запросов
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            println!(
                "{}",
                format_line(
                    parts.status,
                    &method,
                    uri.path(),
                    start.elapsed().as_millis(),
                    Some(bytes.len())
                )
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(_) => {
            println!(
                "{}",
                format_line(parts.status, &method, uri.path(), start.elapsed().as_millis(), None)
            );
            Response::from_parts(parts, Body::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_contains_size_and_path() {
        let line = format_line(StatusCode::OK, &Method::GET, "/api/staff", 12, Some(12345));
        assert!(line.contains("12.345"));
        assert!(line.contains("200"));
        assert!(line.ends_with("/api/staff"));
        assert!(line.starts_with("\x1b[36m"));
    }

    #[test]
    fn server_errors_are_red() {
        let line = format_line(StatusCode::INTERNAL_SERVER_ERROR, &Method::POST, "/x", 1, None);
        assert!(line.starts_with("\x1b[31m"));
        assert!(line.contains("error"));
    }
}
