use thiserror::Error;

pub type Result<T> = std::result::Result<T, AstError>;

/// Failure while turning an external description into an [`Ast`](crate::Ast).
///
/// These are programming errors in whatever produced the description, not
/// data errors: a well-formed schema library never emits them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("unexpected AST tag: {0}")]
    UnexpectedTag(String),

    #[error("missing member `{member}` on {tag} node")]
    MissingMember { tag: &'static str, member: &'static str },

    #[error("malformed AST description: {0}")]
    Malformed(String),

    #[error("unknown definition reference: {0}")]
    UnknownReference(String),

    #[error("AST description nested deeper than {limit} levels")]
    DepthExceeded { limit: u32 },
}
