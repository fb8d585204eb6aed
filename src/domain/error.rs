#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid search field: '{0}' (use: title, author)")]
    InvalidField(String),
}
