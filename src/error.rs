use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocgenError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not resolve title or module name for {path}")]
    UnresolvedTitle { path: String },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("parse error in {path}: {detail}")]
    Parse { path: String, detail: String },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DocgenError>;
