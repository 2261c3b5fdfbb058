use thiserror::Error;

/// Errors which abort a whole call. Sequences with an invalid alphabet are not errors; they
/// are dropped from the output and reported through `warn!`.
#[derive(Error, Debug, PartialEq)]
pub enum ToolError {
    #[error("invalid {kind} `{name}`, expected one of: {expected}")]
    InvalidOption {
        kind: &'static str,
        name: String,
        expected: &'static str,
    },

    #[error("cannot take the complement of `{seq}`: only DNA bases have a complement")]
    NoComplement { seq: String },

    #[error(
        "malformed read `{id}`:
sequence has {seq_len} bases but the quality string has {qual_len} characters"
    )]
    QualityLengthMismatch {
        id: String,
        seq_len: usize,
        qual_len: usize,
    },
}
