use utoipa::OpenApi;

use crate::presentation::http::handlers::posts::{
    AuthorDto, AuthorRecordDto, CreatePostDto, ListPostsResponseDto, PostDto, PostRecordDto,
    UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            AuthorDto,
            AuthorRecordDto,
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            PostRecordDto,
            ListPostsResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Post endpoints")
    )
)]
pub(crate) struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_post_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/posts"));
        assert!(paths.contains(&"/posts/{id}"));
    }
}
