use chrono::{DateTime, Datelike, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blogpost_shared::dto::{AuthorRequest, BlogPostView, CreatePostRequest, UpdatePostRequest};

use crate::error::DomainError;

/// Author sub-document, owned by exactly one post.
///
/// Serialized as `{"firstName": .., "lastName": ..}`, which is also the shape
/// it is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        require_text("author.firstName", &first_name)?;
        require_text("author.lastName", &last_name)?;
        Ok(Self {
            first_name,
            last_name,
        })
    }

    /// The display string clients see: `"{firstName} {lastName}"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl TryFrom<AuthorRequest> for Author {
    type Error = DomainError;

    fn try_from(req: AuthorRequest) -> Result<Self, Self::Error> {
        Self::new(req.first_name, req.last_name)
    }
}

/// BlogPost entity - a stored post and its author document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with a generated id.
    ///
    /// `created` defaults to now. It is truncated to milliseconds either way.
    pub fn new(
        author: Author,
        title: String,
        content: String,
        created: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        require_text("title", &title)?;
        require_text("content", &content)?;
        let created = match created {
            Some(ts) => require_storable_year(ts)?,
            None => Utc::now(),
        };
        Ok(Self {
            id: Uuid::new_v4(),
            author,
            title,
            content,
            created: truncate_to_millis(created),
        })
    }

    pub fn author_name(&self) -> String {
        self.author.display_name()
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &BlogPostPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
    }

    /// Project into the public wire shape.
    pub fn to_view(&self) -> BlogPostView {
        BlogPostView {
            id: self.id.to_string(),
            author: self.author_name(),
            title: self.title.clone(),
            content: self.content.clone(),
            created: self.created,
        }
    }
}

impl TryFrom<CreatePostRequest> for BlogPost {
    type Error = DomainError;

    fn try_from(req: CreatePostRequest) -> Result<Self, Self::Error> {
        let author = Author::try_from(req.author)?;
        Self::new(author, req.title, req.content, req.created)
    }
}

/// Partial update of a post. Only `title` and `content` are mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl BlogPostPatch {
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        if let Some(title) = &title {
            require_text("title", title)?;
        }
        if let Some(content) = &content {
            require_text("content", content)?;
        }
        Ok(Self { title, content })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl TryFrom<UpdatePostRequest> for BlogPostPatch {
    type Error = DomainError;

    fn try_from(req: UpdatePostRequest) -> Result<Self, Self::Error> {
        Self::new(req.title, req.content)
    }
}

/// Drop sub-millisecond precision so a timestamp survives JSON and the store unchanged.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "`{field}` must not be empty"
        )));
    }
    // PostgreSQL text and jsonb cannot hold NUL.
    if value.contains('\0') {
        return Err(DomainError::Validation(format!(
            "`{field}` must not contain NUL characters"
        )));
    }
    Ok(())
}

/// Years representable as a four-digit ISO-8601 year, well inside `timestamptz`.
const CREATED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn require_storable_year(ts: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
    if !CREATED_YEARS.contains(&ts.year()) {
        return Err(DomainError::Validation(format!(
            "`created` year must be between {} and {}",
            CREATED_YEARS.start(),
            CREATED_YEARS.end()
        )));
    }
    Ok(ts)
}
