use std::sync::Arc;

use crate::application::post_service::PostService;

pub(crate) mod http;
pub(crate) mod http_handlers;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: Arc<PostService>,
}

impl AppState {
    pub(crate) fn new(post_service: Arc<PostService>) -> Self {
        Self { post_service }
    }
}
