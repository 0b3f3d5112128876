pub mod error;
pub mod types;

pub use error::Error;
pub use types::{
    AdSubmission, ArticleExcerpt, ComplianceVerdict, ImageAttachment, ModelReply, ModelRequest,
    RewriteResult, TokenUsage, MAX_EXCERPT_CHARS,
};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Error, Result};
}
