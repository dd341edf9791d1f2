use std::fmt;

use metrica_protocol::{Edge, Stress, Syllable};

use crate::error::FootError;

/// The two binary foot templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FootForm {
    /// Stressed-unstressed.
    Trochee,
    /// Unstressed-stressed.
    Iamb,
}

impl FootForm {
    pub const fn of(headedness: Edge) -> Self {
        match headedness {
            Edge::Left => FootForm::Trochee,
            Edge::Right => FootForm::Iamb,
        }
    }

    pub const fn headedness(self) -> Edge {
        match self {
            FootForm::Trochee => Edge::Left,
            FootForm::Iamb => Edge::Right,
        }
    }

    /// True when `syllables` is a binary group whose stresses fit this template.
    pub fn matches(self, syllables: &[Syllable]) -> bool {
        match (self, syllables) {
            (FootForm::Trochee, [a, b]) => a.stress().is_stressed() && !b.stress().is_stressed(),
            (FootForm::Iamb, [a, b]) => !a.stress().is_stressed() && b.stress().is_stressed(),
            _ => false,
        }
    }
}

impl fmt::Display for FootForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootForm::Trochee => f.write_str("trochee"),
            FootForm::Iamb => f.write_str("iamb"),
        }
    }
}

/// A group of syllables with one stressed head at the edge named by its
/// headedness. A foot of one syllable is degenerate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Foot {
    syllables: Vec<Syllable>,
    headedness: Edge,
}

impl Foot {
    /// Builds a foot and gives its head syllable secondary stress.
    pub fn new(syllables: impl Into<Vec<Syllable>>, headedness: Edge) -> Result<Self, FootError> {
        let syllables = syllables.into();
        if syllables.is_empty() {
            return Err(FootError::Empty);
        }

        let mut foot = Self {
            syllables,
            headedness,
        };
        foot.mark_head(Stress::Secondary);
        Ok(foot)
    }

    /// Accepts an already stressed pair as a foot of `form`, keeping its
    /// stresses as they are.
    pub fn from_stressed(syllables: &[Syllable], form: FootForm) -> Result<Self, FootError> {
        if syllables.len() != 2 {
            return Err(FootError::NotBinary {
                form,
                len: syllables.len(),
            });
        }
        if !form.matches(syllables) {
            return Err(FootError::TemplateMismatch {
                expected: form,
                found: syllables.iter().map(Syllable::to_string).collect(),
            });
        }

        Ok(Self {
            syllables: syllables.to_vec(),
            headedness: form.headedness(),
        })
    }

    /// Raises the head to primary stress. Only the owning word calls this,
    /// once, on its head foot.
    pub(crate) fn promote_to_primary(&mut self) {
        self.mark_head(Stress::Primary);
    }

    fn head_position(&self) -> usize {
        match self.headedness {
            Edge::Left => 0,
            Edge::Right => self.syllables.len() - 1,
        }
    }

    fn mark_head(&mut self, stress: Stress) {
        let at = self.head_position();
        self.syllables[at] = self.syllables[at].with_stress(stress);
    }

    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    pub fn headedness(&self) -> Edge {
        self.headedness
    }

    pub fn head(&self) -> Syllable {
        self.syllables[self.head_position()]
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    pub fn is_degenerate(&self) -> bool {
        self.syllables.len() == 1
    }

    pub fn carries_primary(&self) -> bool {
        self.head().stress() == Stress::Primary
    }

    /// The template this foot instantiates; `None` unless binary.
    pub fn form(&self) -> Option<FootForm> {
        (self.syllables.len() == 2).then(|| FootForm::of(self.headedness))
    }
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, syllable) in self.syllables.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", syllable)?;
        }
        f.write_str(")")
    }
}
