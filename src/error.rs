use thiserror::Error;

/// Errors raised while turning handler metadata into spec fragments.
///
/// Every variant is a broken contract between the caller and the builders,
/// not a recoverable runtime condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A `query`/`headers`/`cookies` model was never registered before
    /// parameters were built for a handler that references it.
    #[error("model `{model}` referenced by handler `{handler}` is not in the model registry")]
    ModelNotRegistered { model: String, handler: String },
}
