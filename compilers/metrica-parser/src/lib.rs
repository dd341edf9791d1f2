pub mod parser;
pub mod token;

use metrica_protocol::{Stress, Syllable};
use thiserror::Error;

use crate::parser::{parse_pattern, parse_with_spans};
use crate::token::{Segment, SegmentKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected {found:?} at byte {offset}")]
    Unexpected { offset: usize, found: char },

    #[error("no syllables found")]
    Empty,

    #[error("extrametrical syllable at byte {offset} does not end the word")]
    MisplacedExtrametrical { offset: usize },
}

/// A rendered footing read back into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFooting {
    segments: Vec<Segment>,
}

/// Primary entry point: rendered footing -> segments.
///
/// Accepts what `FootedWord`'s `Display` writes, e.g. `s₀(ś₁, s₂)<s₃>`.
pub fn parse_footing(input: &str) -> Result<ParsedFooting, ParseError> {
    let segments = parse_with_spans(input)?;
    if segments.is_empty() {
        return Err(ParseError::Empty);
    }

    // Only the final segment may be extrametrical
    if let Some(misplaced) = segments
        .iter()
        .rev()
        .skip(1)
        .find(|s| matches!(s.kind, SegmentKind::Extrametrical(_)))
    {
        return Err(ParseError::MisplacedExtrametrical {
            offset: misplaced.span.start,
        });
    }

    Ok(ParsedFooting { segments })
}

/// Reads an observed stress pattern, one stress per syllable.
///
/// Either rendered glyphs (`s s̀ s ś`, footing brackets allowed) or digits
/// (`0102`). Separators are ignored.
pub fn parse_stress_pattern(input: &str) -> Result<Vec<Stress>, ParseError> {
    let pattern = parse_pattern(input)?;
    if pattern.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(pattern)
}

impl ParsedFooting {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every syllable in textual order, extrametrical one included.
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable> + '_ {
        self.segments.iter().flat_map(|s| s.kind.syllables())
    }

    pub fn feet(&self) -> impl Iterator<Item = &[Syllable]> + '_ {
        self.segments.iter().filter_map(|s| match &s.kind {
            SegmentKind::Foot(syllables) => Some(syllables.as_slice()),
            _ => None,
        })
    }

    pub fn unfooted(&self) -> impl Iterator<Item = &Syllable> + '_ {
        self.segments.iter().filter_map(|s| match &s.kind {
            SegmentKind::Unfooted(syllable) => Some(syllable),
            _ => None,
        })
    }

    pub fn extrametrical(&self) -> Option<&Syllable> {
        self.segments.last().and_then(|s| match &s.kind {
            SegmentKind::Extrametrical(syllable) => Some(syllable),
            _ => None,
        })
    }

    /// Stress per position. When the subscripts number the syllables
    /// 0..n they decide the position; otherwise textual order does.
    pub fn stress_profile(&self) -> Vec<Stress> {
        let syllables: Vec<&Syllable> = self.syllables().collect();
        let positions: Option<Vec<usize>> = syllables
            .iter()
            .map(|s| s.index().map(usize::from))
            .collect();

        match positions {
            Some(positions) if is_permutation(&positions) => {
                let mut profile = vec![Stress::Unstressed; syllables.len()];
                for (syllable, at) in syllables.iter().zip(positions) {
                    profile[at] = syllable.stress();
                }
                profile
            }
            _ => syllables.iter().map(|s| s.stress()).collect(),
        }
    }
}

fn is_permutation(positions: &[usize]) -> bool {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.into_iter().eq(0..positions.len())
}
