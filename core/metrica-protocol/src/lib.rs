#![no_std] // Value types only; the footing and space crates bring std

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod params;
pub mod syllable;

// Re-export core types for convenience
pub use error::ProtocolError;
pub use params::{Direction, Edge, Parameter, ParameterMask, ParameterSet, Polarity, Settings};
pub use syllable::{Stress, Syllable, Weight};
