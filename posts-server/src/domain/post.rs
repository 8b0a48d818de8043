use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Author {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl Author {
    pub(crate) fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: normalize_required("author.firstName", &first_name.into())?,
            last_name: normalize_required("author.lastName", &last_name.into())?,
        })
    }

    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Self::new(self.first_name, self.last_name)
    }

    /// Display name shown to API clients, e.g. `"Jane Doe"`.
    pub(crate) fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Author,
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        author: Author,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }

        Ok(Self {
            id,
            title: normalize_required("title", &title.into())?,
            content: normalize_required("content", &content.into())?,
            author: author.validate()?,
        })
    }

    pub(crate) fn author_name(&self) -> String {
        self.author.full_name()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Author,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_required("title", &self.title)?,
            content: normalize_required("content", &self.content)?,
            author: self.author.validate()?,
        })
    }
}

/// Partial replacement of a stored post. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<Author>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: self
                .title
                .map(|title| normalize_required("title", &title))
                .transpose()?,
            content: self
                .content
                .map(|content| normalize_required("content", &content))
                .transpose()?,
            author: self.author.map(Author::validate).transpose()?,
        })
    }
}

fn normalize_required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Author, CreatePostRequest, DomainError, Post, UpdatePostRequest};

    #[test]
    fn author_full_name_joins_parts_with_single_space() {
        let author = Author::new("Jane", "Doe").expect("author must be valid");
        assert_eq!(author.full_name(), "Jane Doe");
    }

    #[test]
    fn author_new_trims_name_parts() {
        let author = Author::new("  J ", " D  ").expect("author must be valid");
        assert_eq!(author.first_name, "J");
        assert_eq!(author.last_name, "D");
        assert_eq!(author.full_name(), "J D");
    }

    #[test]
    fn author_new_rejects_blank_last_name() {
        let err = Author::new("Jane", "   ").expect_err("last name must be rejected");
        assert_validation_field(err, "author.lastName");
    }

    #[test]
    fn create_post_request_validate_rejects_empty_content() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            content: "  ".to_string(),
            author: sample_author(),
        };

        let err = req.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn create_post_request_validate_rejects_empty_first_name() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            author: Author {
                first_name: String::new(),
                last_name: "Doe".to_string(),
            },
        };

        let err = req.validate().expect_err("first name must be rejected");
        assert_validation_field(err, "author.firstName");
    }

    #[test]
    fn create_post_request_validate_keeps_content_separate_from_title() {
        let req = CreatePostRequest {
            title: "  A  ".to_string(),
            content: "  B  ".to_string(),
            author: sample_author(),
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "A");
        assert_eq!(validated.content, "B");
    }

    #[test]
    fn update_post_request_validate_allows_missing_fields() {
        let validated = UpdatePostRequest::default()
            .validate()
            .expect("empty update must validate");
        assert!(validated.title.is_none());
        assert!(validated.content.is_none());
        assert!(validated.author.is_none());
    }

    #[test]
    fn update_post_request_validate_rejects_present_but_empty_title() {
        let req = UpdatePostRequest {
            title: Some(" ".to_string()),
            ..UpdatePostRequest::default()
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn post_new_rejects_non_positive_id() {
        let err = Post::new(0, "Title", "Content", sample_author()).expect_err("id must be > 0");
        assert_validation_field(err, "id");
    }

    #[test]
    fn post_author_name_is_derived_from_author() {
        let post = Post::new(1, "Title", "Content", sample_author()).expect("post must be valid");
        assert_eq!(post.author_name(), "Jane Doe");
    }

    fn sample_author() -> Author {
        Author {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
