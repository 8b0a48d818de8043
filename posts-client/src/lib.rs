//! Клиентская библиотека для работы с posts-server по HTTP.
//!
//! `PostsClient` покрывает пять операций над постами: список, получение по id,
//! создание, частичное обновление и удаление. Ошибки сервера разбираются из
//! тела `{"message": "..."}`.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PostsClientError, PostsClientResult};
pub use http_client::PostsClient;
pub use models::{Author, Post, PostRecord, PostUpdate};
