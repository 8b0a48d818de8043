use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{Author, CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::extract::{AppJson, AppPath};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorDto {
    #[validate(
        required(message = "Missing `author.firstName` in request body"),
        length(min = 1, message = "`author.firstName` must not be empty")
    )]
    pub(crate) first_name: Option<String>,
    #[validate(
        required(message = "Missing `author.lastName` in request body"),
        length(min = 1, message = "`author.lastName` must not be empty")
    )]
    pub(crate) last_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(
        required(message = "Missing `title` in request body"),
        length(min = 1, message = "`title` must not be empty")
    )]
    pub(crate) title: Option<String>,
    #[validate(
        required(message = "Missing `content` in request body"),
        length(min = 1, message = "`content` must not be empty")
    )]
    pub(crate) content: Option<String>,
    #[validate(required(message = "Missing `author` in request body"), nested)]
    pub(crate) author: Option<AuthorDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    /// Must repeat the id from the request path.
    pub(crate) id: Option<i64>,
    #[validate(length(min = 1, message = "`title` must not be empty"))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1, message = "`content` must not be empty"))]
    pub(crate) content: Option<String>,
    #[validate(nested)]
    pub(crate) author: Option<AuthorDto>,
}

/// Client-facing view of a post; the author is a single display name.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorRecordDto {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

/// Stored shape of a post, as returned by updates.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostRecordDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: AuthorRecordDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        let author = post.author_name();
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
        }
    }
}

impl From<Post> for PostRecordDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: AuthorRecordDto {
                first_name: post.author.first_name,
                last_name: post.author.last_name,
            },
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Self {
            first_name: dto.first_name.unwrap_or_default(),
            last_name: dto.last_name.unwrap_or_default(),
        }
    }
}

impl From<CreatePostDto> for CreatePostRequest {
    fn from(dto: CreatePostDto) -> Self {
        Self {
            title: dto.title.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            author: dto.author.map(Author::from).unwrap_or_default(),
        }
    }
}

impl From<UpdatePostDto> for UpdatePostRequest {
    fn from(dto: UpdatePostDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            author: dto.author.map(Author::from),
        }
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Up to 10 posts", body = ListPostsResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let posts = state.post_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            posts: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.post_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 200, description = "Post created", body = PostDto),
        (status = 400, description = "Missing or empty field"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    AppJson(dto): AppJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state
        .post_service
        .create_post(CreatePostRequest::from(dto))
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 201, description = "Post updated", body = PostRecordDto),
        (status = 400, description = "Id mismatch or empty field"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostRecordDto>)> {
    if dto.id != Some(id) {
        let body_id = dto
            .id
            .map(|body_id| body_id.to_string())
            .unwrap_or_else(|| "none".to_string());
        return Err(AppError::BadRequest(format!(
            "Request path id ({id}) and request body id ({body_id}) must match"
        )));
    }
    dto.validate()?;

    let post = state
        .post_service
        .update_post(id, UpdatePostRequest::from(dto))
        .await?;
    Ok((StatusCode::CREATED, Json(PostRecordDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
