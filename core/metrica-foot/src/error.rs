use thiserror::Error;

use crate::foot::FootForm;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FootError {
    #[error("cannot build a foot from an empty syllable list")]
    Empty,

    #[error("a {form} needs exactly two syllables, found {len}")]
    NotBinary { form: FootForm, len: usize },

    #[error("expected a {expected}, found {found}")]
    TemplateMismatch { expected: FootForm, found: String },

    #[error("{len} syllable(s) cannot carry a binary foot (at least {needed} required)")]
    TooShort { len: usize, needed: usize },
}
