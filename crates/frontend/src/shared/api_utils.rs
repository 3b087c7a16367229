//! API utilities for frontend-backend communication
//!
//! All requests go through `send`: JSON in, text out. A non-2xx response
//! becomes `Err` carrying the body text produced by the backend (it is
//! already a readable message), or `HTTP <status>` if the body is empty.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path ("/api/...")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

async fn send(method: &str, path: &str, body: Option<String>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body.as_ref() {
        opts.set_body(&wasm_bindgen::JsValue::from_str(body));
    }

    let request =
        Request::new_with_str_and_init(&api_url(path), &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("{e:?}"))?;
    }

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "Сервер недоступен".to_string())?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text = text.as_string().unwrap_or_default();

    if !resp.ok() {
        return Err(if text.trim().is_empty() {
            format!("HTTP {}", resp.status())
        } else {
            text
        });
    }
    Ok(text)
}

/// GET и разбор JSON-ответа
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let text = send("GET", path, None).await?;
    serde_json::from_str(&text).map_err(|e| format!("Некорректный ответ сервера: {e}"))
}

/// POST с JSON-телом и разбор JSON-ответа
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let body = serde_json::to_string(body).map_err(|e| format!("{e}"))?;
    let text = send("POST", path, Some(body)).await?;
    serde_json::from_str(&text).map_err(|e| format!("Некорректный ответ сервера: {e}"))
}

/// POST с JSON-телом, ответ игнорируется
pub async fn post_unit<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    let body = serde_json::to_string(body).map_err(|e| format!("{e}"))?;
    send("POST", path, Some(body)).await.map(|_| ())
}

/// POST без тела, ответ игнорируется (тестовые данные, утверждение и т.п.)
pub async fn post_empty(path: &str) -> Result<(), String> {
    send("POST", path, None).await.map(|_| ())
}

pub async fn delete(path: &str) -> Result<(), String> {
    send("DELETE", path, None).await.map(|_| ())
}

/// Ответ upsert-эндпоинтов: `{"id": "..."}`
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SavedId {
    pub id: String,
}
