use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// A mapping carried integer and non-integer keys at the same level.
    #[error("keys mixing in {value}")]
    MixedKeys { value: String },
}
