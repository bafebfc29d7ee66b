use crate::models::{CreateVoteRequest, UpdateVoteRequest};

/// Fields a record ends up with once a request has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteFields {
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,
}

pub type CreateRule = fn(&CreateVoteRequest) -> Result<VoteFields, ValidationError>;
pub type UpdateRule = fn(&UpdateVoteRequest) -> Result<VoteFields, ValidationError>;

/// The rules the store applies before touching its state. Swapping the
/// policy changes what is accepted without changing how records are stored.
#[derive(Debug, Clone, Copy)]
pub struct ValidationPolicy {
    pub create: CreateRule,
    pub update: UpdateRule,
}

impl ValidationPolicy {
    /// Title required on create, anything goes on update.
    pub fn lenient() -> Self {
        Self {
            create: validate_create,
            update: accept_update,
        }
    }

    /// Title required on both create and update.
    pub fn strict() -> Self {
        Self {
            create: validate_create,
            update: validate_update,
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::lenient()
    }
}

pub fn validate_create(request: &CreateVoteRequest) -> Result<VoteFields, ValidationError> {
    let title = match request.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => return Err(ValidationError::TitleRequired),
    };

    // An empty content string is stored as null.
    let content = request.content.clone().filter(|c| !c.is_empty());

    Ok(VoteFields { title, content })
}

pub fn accept_update(request: &UpdateVoteRequest) -> Result<VoteFields, ValidationError> {
    Ok(VoteFields {
        title: request.title.clone().unwrap_or_default(),
        content: request.content.clone(),
    })
}

pub fn validate_update(request: &UpdateVoteRequest) -> Result<VoteFields, ValidationError> {
    match request.title.as_deref() {
        Some(title) if !title.is_empty() => accept_update(request),
        _ => Err(ValidationError::TitleRequired),
    }
}
