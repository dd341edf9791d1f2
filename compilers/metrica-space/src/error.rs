use metrica_protocol::ProtocolError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// Unknown parameter, bad value or incomplete assignment. Raised before
    /// anything is filtered.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ProtocolError),

    #[error("observed pattern has {found} syllable(s) but the selected word has {expected}")]
    PatternLength { expected: usize, found: usize },

    #[error("no reference word at index {index} (there are {count})")]
    NoSuchWord { index: usize, count: usize },

    #[error("no reference word has {length} syllables (lengths run from {min} to {max})")]
    NoSuchLength { length: usize, min: usize, max: usize },

    /// The constraints contradict each other: nothing would be left for
    /// this word. The space is left as it was.
    #[error("no footing of the {length}-syllable word survives {constraint}")]
    ImpossibleCombination { length: usize, constraint: String },
}
