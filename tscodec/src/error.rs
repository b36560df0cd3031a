use thiserror::Error;

/// The only failure kind of this crate: the caller passed a value the
/// conversion cannot accept. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("array size must be {expected}, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("word value {0:#x} does not fit in 16 bits")]
    WordOutOfRange(i64),

    #[error("{0} is outside the representable time range")]
    OutOfRange(i64),

    #[error("invalid format pattern: {0:?}")]
    Pattern(String),

    #[error("unknown word order {0:?} (expected \"direct\" or \"reversed\")")]
    UnknownWordOrder(String),
}
