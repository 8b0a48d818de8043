use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Имя автора поста.
pub struct Author {
    /// Имя.
    pub first_name: String,
    /// Фамилия.
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичное представление поста: автор уже склеен в одну строку.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Имя автора, например `"Jane Doe"`.
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Полная запись поста, которую сервер возвращает после обновления.
pub struct PostRecord {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Автор с раздельными именем и фамилией.
    pub author: Author,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Частичное обновление поста. Поля со значением `None` не меняются.
pub struct PostUpdate {
    /// Новый заголовок.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Новое содержимое.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Новый автор (заменяется целиком).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}
