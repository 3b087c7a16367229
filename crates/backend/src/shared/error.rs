use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Ошибки бизнес-логики, которые клиент должен различать
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Запись не найдена")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

/// Ошибка HTTP-обработчика: код статуса + текст для тоста на клиенте
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: ServiceError::NotFound.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<ServiceError>() {
            Some(service_err) => Self {
                status: service_err.status_code(),
                message: service_err.to_string(),
            },
            None => {
                tracing::error!("Internal error: {:#}", err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Внутренняя ошибка сервера".into(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Разбор UUID из сегмента пути
pub fn parse_id(id: &str) -> ApiResult<uuid::Uuid> {
    uuid::Uuid::parse_str(id).map_err(|_| ApiError::bad_request("Некорректный идентификатор"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_client_statuses() {
        let err: ApiError = anyhow::Error::new(ServiceError::Validation("bad".into())).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "bad");

        let err: ApiError = anyhow::Error::new(ServiceError::NotFound).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = anyhow::Error::new(ServiceError::Conflict("busy".into())).into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn context_does_not_hide_service_error() {
        let err = anyhow::Error::new(ServiceError::NotFound).context("loading order");
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_errors_are_internal() {
        let err: ApiError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id(&uuid::Uuid::new_v4().to_string()).is_ok());
    }
}
