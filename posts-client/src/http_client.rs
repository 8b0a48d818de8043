use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{PostsClientError, PostsClientResult};
use crate::models::{Author, Post, PostRecord, PostUpdate};

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    content: &'a str,
    author: &'a Author,
}

#[derive(Debug, Serialize)]
struct UpdatePostRequestDto<'a> {
    id: i64,
    #[serde(flatten)]
    update: &'a PostUpdate,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListPostsResponseDto {
    posts: Vec<Post>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `posts-server`.
pub struct PostsClient {
    base_url: String,
    client: Client,
}

impl PostsClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> PostsClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> PostsClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.message,
            Err(_) => None,
        };
        PostsClientError::from_http_status(status, message)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> PostsClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(PostsClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    /// универсальный helper для запросов с json-ответом
    async fn fetch_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> PostsClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        self.send(request)
            .await?
            .json::<TRes>()
            .await
            .map_err(PostsClientError::from_reqwest)
    }

    /// Возвращает не более 10 постов.
    pub async fn list_posts(&self) -> PostsClientResult<Vec<Post>> {
        let dto: ListPostsResponseDto = self
            .fetch_json::<(), _>(Method::GET, "/posts", None)
            .await?;
        Ok(dto.posts)
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> PostsClientResult<Post> {
        self.fetch_json::<(), _>(Method::GET, &format!("/posts/{id}"), None)
            .await
    }

    /// Создаёт пост.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        author: &Author,
    ) -> PostsClientResult<Post> {
        let payload = CreatePostRequestDto {
            title,
            content,
            author,
        };
        self.fetch_json(Method::POST, "/posts", Some(&payload))
            .await
    }

    /// Частично обновляет пост и возвращает полную запись.
    pub async fn update_post(&self, id: i64, update: &PostUpdate) -> PostsClientResult<PostRecord> {
        let payload = UpdatePostRequestDto { id, update };
        self.fetch_json(Method::PUT, &format!("/posts/{id}"), Some(&payload))
            .await
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, id: i64) -> PostsClientResult<()> {
        let request = self
            .client
            .request(Method::DELETE, self.endpoint(&format!("/posts/{id}")));
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = PostsClient::new("http://localhost:8080/").expect("client must build");
        let full = client.endpoint("/posts/1");
        assert_eq!(full, "http://localhost:8080/posts/1");
    }

    #[test]
    fn update_payload_repeats_id_and_skips_missing_fields() {
        let update = PostUpdate {
            title: Some("new".to_string()),
            ..PostUpdate::default()
        };
        let payload = UpdatePostRequestDto {
            id: 7,
            update: &update,
        };

        let value = serde_json::to_value(&payload).expect("payload must serialize");
        assert_eq!(value, json!({ "id": 7, "title": "new" }));
    }

    #[test]
    fn create_payload_nests_author_in_camel_case() {
        let author = Author {
            first_name: "J".to_string(),
            last_name: "D".to_string(),
        };
        let payload = CreatePostRequestDto {
            title: "A",
            content: "B",
            author: &author,
        };

        let value = serde_json::to_value(&payload).expect("payload must serialize");
        assert_eq!(
            value,
            json!({
                "title": "A",
                "content": "B",
                "author": { "firstName": "J", "lastName": "D" }
            })
        );
    }
}
