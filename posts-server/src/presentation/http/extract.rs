use axum::extract::{FromRequest, FromRequestParts};

use super::app_error::AppError;

/// `axum::Json` whose rejections render as `AppError` (400 with a `message` body).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);

/// `axum::extract::Path` whose rejections render as `AppError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct AppPath<T>(pub(crate) T);
