use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Combining grave accent (tone-mark form), marks secondary stress.
pub const SECONDARY_MARK: char = '\u{0340}';
/// Combining acute accent (tone-mark form), marks primary stress.
pub const PRIMARY_MARK: char = '\u{0341}';
/// Subscript zero. Indices 0-9 are rendered as `SUBSCRIPT_ZERO + index`.
pub const SUBSCRIPT_ZERO: u32 = 0x2080;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum Stress {
    #[default]
    Unstressed = 0,
    Secondary = 1,
    Primary = 2,
}

impl Stress {
    pub const fn level(self) -> u8 {
        self as u8
    }

    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Stress::Unstressed),
            1 => Some(Stress::Secondary),
            2 => Some(Stress::Primary),
            _ => None,
        }
    }

    pub const fn is_stressed(self) -> bool {
        !matches!(self, Stress::Unstressed)
    }

    /// The combining diacritic appended to the base glyph, if any.
    pub const fn diacritic(self) -> Option<char> {
        match self {
            Stress::Unstressed => None,
            Stress::Secondary => Some(SECONDARY_MARK),
            Stress::Primary => Some(PRIMARY_MARK),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum Weight {
    #[default]
    Light = 0,
    Heavy = 1,
}

impl Weight {
    pub const fn glyph(self) -> char {
        match self {
            Weight::Light => 's',
            Weight::Heavy => 'S',
        }
    }
}

/// A single syllable: stress level, weight and an optional position marker.
///
/// Syllables are plain values. Changing stress produces a new syllable via
/// [`Syllable::with_stress`]; nothing else holding the old value observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Syllable {
    stress: Stress,
    weight: Weight,
    index: Option<u8>,
}

impl Syllable {
    /// Unstressed, light, no index.
    pub const fn new() -> Self {
        Self {
            stress: Stress::Unstressed,
            weight: Weight::Light,
            index: None,
        }
    }

    /// Unstressed light syllable at position `index`.
    pub const fn indexed(index: u8) -> Self {
        Self::new().with_index(index)
    }

    pub const fn with_stress(self, stress: Stress) -> Self {
        Self { stress, ..self }
    }

    pub const fn with_weight(self, weight: Weight) -> Self {
        Self { weight, ..self }
    }

    pub const fn with_index(self, index: u8) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }

    pub const fn stress(&self) -> Stress {
        self.stress
    }

    pub const fn weight(&self) -> Weight {
        self.weight
    }

    pub const fn index(&self) -> Option<u8> {
        self.index
    }

    pub const fn is_heavy(&self) -> bool {
        matches!(self.weight, Weight::Heavy)
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use core::fmt::Write;

        f.write_char(self.weight.glyph())?;
        if let Some(mark) = self.stress.diacritic() {
            f.write_char(mark)?;
        }
        // Only single digits have a subscript glyph.
        if let Some(digit) = self.index.filter(|i| *i <= 9) {
            if let Some(sub) = char::from_u32(SUBSCRIPT_ZERO + u32::from(digit)) {
                f.write_char(sub)?;
            }
        }
        Ok(())
    }
}
