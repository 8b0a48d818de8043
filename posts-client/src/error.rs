use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `posts-client`.
pub enum PostsClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный пост не найден.
    #[error("not found")]
    NotFound,

    /// Сервер отклонил запрос (ошибка валидации, несовпадение id и т.п.).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Внутренняя ошибка сервера.
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `posts-client`.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

impl PostsClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            status if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
