//! API utilities for frontend-backend communication
//!
//! Base URL construction plus thin gloo-net wrappers with a small error
//! taxonomy. Per-item failures of bulk operations are reported as values
//! (`ApiError`), never as panics.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Ошибка обращения к REST API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Сеть недоступна / запрос не ушёл
    Network(String),
    /// HTTP 409: у записи есть зависимые данные
    Conflict(String),
    /// Прочие не-2xx статусы
    Http(u16),
    /// Тело ответа не разобралось
    Decode(String),
}

impl ApiError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "сеть: {}", msg),
            ApiError::Conflict(msg) => write!(f, "конфликт: {}", msg),
            ApiError::Http(status) => write!(f, "HTTP {}", status),
            ApiError::Decode(msg) => write!(f, "разбор ответа: {}", msg),
        }
    }
}

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

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

async fn check_status(response: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    if status == 409 {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Conflict(body));
    }
    Err(ApiError::Http(status))
}

/// GET + JSON decode
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = gloo_net::http::Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// POST с JSON-телом, ответ игнорируется
pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let response = gloo_net::http::Request::post(&api_url(path))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response).await?;
    Ok(())
}

/// PUT с JSON-телом, ответ игнорируется
pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let response = gloo_net::http::Request::put(&api_url(path))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response).await?;
    Ok(())
}

/// DELETE
pub async fn delete(path: &str) -> Result<(), ApiError> {
    let response = gloo_net::http::Request::delete(&api_url(path))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_distinguishable() {
        assert!(ApiError::Conflict("зависимые документы".into()).is_conflict());
        assert!(!ApiError::Http(500).is_conflict());
        assert!(!ApiError::Network("offline".into()).is_conflict());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(ApiError::Http(404).to_string(), "HTTP 404");
    }
}
