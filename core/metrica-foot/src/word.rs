use std::fmt;

use metrica_protocol::{Direction, Edge, ParameterSet, Stress, Syllable};

use crate::error::FootError;
use crate::foot::Foot;

/// Shortest input the footing algorithm accepts.
pub const MIN_SYLLABLES: usize = 2;

/// A syllable sequence divided into feet under one full parameter set.
///
/// The feet and the unfooted remainder partition the metrical syllables
/// (the input minus any extrametrical syllable). Exactly one foot carries
/// primary stress unless the word has no feet at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FootedWord {
    metrical: Vec<Syllable>,
    feet: Vec<Foot>,
    unfooted: Vec<Syllable>,
    extrametrical: Option<Syllable>,
    unfootable: bool,
    parameters: ParameterSet,
}

struct Parse {
    feet: Vec<Foot>,
    unfooted: Vec<Syllable>,
    unfootable: bool,
}

impl FootedWord {
    pub fn new(syllables: &[Syllable], parameters: ParameterSet) -> Result<Self, FootError> {
        if syllables.len() < MIN_SYLLABLES {
            return Err(FootError::TooShort {
                len: syllables.len(),
                needed: MIN_SYLLABLES,
            });
        }

        let mut metrical = syllables.to_vec();
        let extrametrical = if parameters.extrametrical {
            metrical
                .pop()
                .map(|last| extrametrical_marker(last, metrical.len()))
        } else {
            None
        };

        let parse = if parameters.iterative {
            parse_iterative(&metrical, &parameters)?
        } else {
            parse_single(&metrical, &parameters)?
        };

        let mut word = Self {
            metrical,
            feet: parse.feet,
            unfooted: parse.unfooted,
            extrametrical,
            unfootable: parse.unfootable,
            parameters,
        };

        let head = match parameters.word_headedness {
            Edge::Left => word.feet.first_mut(),
            Edge::Right => word.feet.last_mut(),
        };
        if let Some(foot) = head {
            foot.promote_to_primary();
        }

        Ok(word)
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn feet(&self) -> &[Foot] {
        &self.feet
    }

    /// The syllables that were footed over, before stress was assigned.
    pub fn metrical(&self) -> &[Syllable] {
        &self.metrical
    }

    pub fn unfooted(&self) -> &[Syllable] {
        &self.unfooted
    }

    /// The unfooted remainder as rendered text, empty if there is none.
    pub fn unfooted_text(&self) -> String {
        self.unfooted.iter().map(Syllable::to_string).collect()
    }

    /// The syllable dropped by extrametricality, tagged with its position.
    pub fn extrametrical(&self) -> Option<Syllable> {
        self.extrametrical
    }

    /// Set when an iterative parse left a syllable that could not form a
    /// degenerate foot.
    pub fn is_unfootable(&self) -> bool {
        self.unfootable
    }

    /// Length of the original input, extrametrical syllable included.
    pub fn len(&self) -> usize {
        self.metrical.len() + usize::from(self.extrametrical.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn head_foot(&self) -> Option<&Foot> {
        self.feet.iter().find(|foot| foot.carries_primary())
    }

    /// Metrical syllables left to right, with the stress they ended up with.
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable> + '_ {
        let none: &[Syllable] = &[];
        let (leading, trailing) = match self.parameters.directionality {
            Direction::RightToLeft => (&self.unfooted[..], none),
            Direction::LeftToRight => (none, &self.unfooted[..]),
        };

        leading
            .iter()
            .chain(self.feet.iter().flat_map(|foot| foot.syllables()))
            .chain(trailing)
    }

    /// Stress per position of the original input; the extrametrical
    /// syllable is always unstressed.
    pub fn stress_profile(&self) -> Vec<Stress> {
        self.syllables()
            .map(Syllable::stress)
            .chain(self.extrametrical.map(|s| s.stress()))
            .collect()
    }

    /// Position of the primary-stressed syllable, if any.
    pub fn primary_position(&self) -> Option<usize> {
        self.stress_profile()
            .iter()
            .position(|stress| *stress == Stress::Primary)
    }
}

fn extrametrical_marker(last: Syllable, position: usize) -> Syllable {
    let marker = Syllable::new().with_weight(last.weight());
    match u8::try_from(position) {
        Ok(at) => marker.with_index(at),
        Err(_) => marker,
    }
}

/// One binary foot at the edge named by directionality; the rest is left over.
fn parse_single(metrical: &[Syllable], parameters: &ParameterSet) -> Result<Parse, FootError> {
    let n = metrical.len();
    if n < MIN_SYLLABLES {
        return Err(FootError::TooShort {
            len: n,
            needed: MIN_SYLLABLES,
        });
    }

    let (footed, rest) = match parameters.directionality {
        Direction::RightToLeft => {
            let (rest, footed) = metrical.split_at(n - 2);
            (footed, rest)
        }
        Direction::LeftToRight => metrical.split_at(2),
    };

    Ok(Parse {
        feet: vec![Foot::new(footed, parameters.foot_headedness)?],
        unfooted: rest.to_vec(),
        unfootable: false,
    })
}

/// Binary feet across the whole word. An odd count leaves one syllable:
/// the first when parsing right to left, the last when left to right.
fn parse_iterative(metrical: &[Syllable], parameters: &ParameterSet) -> Result<Parse, FootError> {
    let n = metrical.len();
    let headedness = parameters.foot_headedness;

    let (stray, body, stray_leads): (&[Syllable], &[Syllable], bool) = if n % 2 == 0 {
        (&[][..], metrical, false)
    } else {
        match parameters.directionality {
            Direction::RightToLeft => {
                let (stray, body) = metrical.split_at(1);
                (stray, body, true)
            }
            Direction::LeftToRight => {
                let (body, stray) = metrical.split_at(n - 1);
                (stray, body, false)
            }
        }
    };

    let binary = body
        .chunks(2)
        .map(|pair| Foot::new(pair, headedness))
        .collect::<Result<Vec<_>, _>>()?;

    if stray.is_empty() {
        return Ok(Parse {
            feet: binary,
            unfooted: Vec::new(),
            unfootable: false,
        });
    }

    if !parameters.degenerate_feet {
        return Ok(Parse {
            feet: binary,
            unfooted: stray.to_vec(),
            unfootable: true,
        });
    }

    let degenerate = Foot::new(stray, headedness)?;
    let feet = if stray_leads {
        std::iter::once(degenerate).chain(binary).collect()
    } else {
        binary.into_iter().chain(std::iter::once(degenerate)).collect()
    };

    Ok(Parse {
        feet,
        unfooted: Vec::new(),
        unfootable: false,
    })
}

impl fmt::Display for FootedWord {
    /// Remainder and feet in left-to-right order, then the extrametrical
    /// syllable in angle brackets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unfooted = self.unfooted_text();
        if self.parameters.directionality == Direction::RightToLeft {
            f.write_str(&unfooted)?;
        }
        for foot in &self.feet {
            write!(f, "{}", foot)?;
        }
        if self.parameters.directionality == Direction::LeftToRight {
            f.write_str(&unfooted)?;
        }
        if let Some(extra) = self.extrametrical {
            write!(f, "<{}>", extra)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(len: u8) -> Vec<Syllable> {
        (0..len).map(Syllable::indexed).collect()
    }

    fn params(
        iterative: bool,
        directionality: Direction,
        extrametrical: bool,
        foot_headedness: Edge,
        degenerate_feet: bool,
        word_headedness: Edge,
    ) -> ParameterSet {
        ParameterSet {
            iterative,
            directionality,
            extrametrical,
            foot_headedness,
            degenerate_feet,
            word_headedness,
        }
    }

    #[test]
    fn test_single_foot_right_to_left_with_extrametricality() {
        let p = params(false, Direction::RightToLeft, true, Edge::Left, false, Edge::Left);
        let word = FootedWord::new(&run(5), p).unwrap();

        // The foot sits at the right edge of the trimmed word
        assert_eq!(word.feet().len(), 1);
        assert_eq!(word.feet()[0].head().index(), Some(2));
        assert_eq!(word.unfooted_text(), "s\u{2080}s\u{2081}");
        assert_eq!(word.extrametrical(), Some(Syllable::indexed(4)));
        assert!(!word.is_unfootable());
        assert_eq!(
            word.to_string(),
            "s\u{2080}s\u{2081}(s\u{0341}\u{2082}, s\u{2083})<s\u{2084}>"
        );
    }

    #[test]
    fn test_single_foot_left_to_right() {
        let p = params(false, Direction::LeftToRight, false, Edge::Right, false, Edge::Right);
        let word = FootedWord::new(&run(5), p).unwrap();

        assert_eq!(
            word.to_string(),
            "(s\u{2080}, s\u{0341}\u{2081})s\u{2082}s\u{2083}s\u{2084}"
        );
        assert_eq!(word.primary_position(), Some(1));
    }

    #[test]
    fn test_iterative_even_iambic() {
        let p = params(true, Direction::LeftToRight, false, Edge::Right, false, Edge::Right);
        let word = FootedWord::new(&run(4), p).unwrap();

        assert_eq!(word.feet().len(), 2);
        assert!(word.feet().iter().all(|foot| foot.len() == 2));
        assert_eq!(word.feet()[0].head().stress(), Stress::Secondary);
        assert_eq!(word.feet()[0].head().index(), Some(1));
        assert!(word.feet()[1].carries_primary());
        assert_eq!(
            word.to_string(),
            "(s\u{2080}, s\u{0340}\u{2081})(s\u{2082}, s\u{0341}\u{2083})"
        );
    }

    #[test]
    fn test_odd_leftover_right_to_left_is_first() {
        let p = params(true, Direction::RightToLeft, false, Edge::Left, false, Edge::Left);
        let word = FootedWord::new(&run(5), p).unwrap();

        assert!(word.is_unfootable());
        assert_eq!(word.unfooted(), &[Syllable::indexed(0)]);
        assert_eq!(
            word.to_string(),
            "s\u{2080}(s\u{0341}\u{2081}, s\u{2082})(s\u{0340}\u{2083}, s\u{2084})"
        );
    }

    #[test]
    fn test_odd_leftover_left_to_right_is_last() {
        let p = params(true, Direction::LeftToRight, false, Edge::Left, true, Edge::Right);
        let word = FootedWord::new(&run(5), p).unwrap();

        assert!(!word.is_unfootable());
        assert_eq!(word.feet().len(), 3);
        assert!(word.feet()[2].is_degenerate());
        assert_eq!(
            word.to_string(),
            "(s\u{0340}\u{2080}, s\u{2081})(s\u{0340}\u{2082}, s\u{2083})(s\u{0341}\u{2084})"
        );
    }

    #[test]
    fn test_degenerate_foot_leads_right_to_left() {
        let p = params(true, Direction::RightToLeft, false, Edge::Right, true, Edge::Left);
        let word = FootedWord::new(&run(3), p).unwrap();

        assert!(word.feet()[0].is_degenerate());
        assert!(word.feet()[0].carries_primary());
        assert_eq!(
            word.stress_profile(),
            vec![Stress::Primary, Stress::Unstressed, Stress::Secondary]
        );
    }

    #[test]
    fn test_too_short_input() {
        let p = ParameterSet::uniform(metrica_protocol::Polarity::Minus);
        assert_eq!(
            FootedWord::new(&run(1), p),
            Err(FootError::TooShort { len: 1, needed: 2 })
        );

        // Two syllables minus the extrametrical one cannot hold a single binary foot
        let p = params(false, Direction::RightToLeft, true, Edge::Left, false, Edge::Left);
        assert_eq!(
            FootedWord::new(&run(2), p),
            Err(FootError::TooShort { len: 1, needed: 2 })
        );
    }

    #[test]
    fn test_lone_unfootable_syllable_has_no_head() {
        let p = params(true, Direction::LeftToRight, true, Edge::Left, false, Edge::Left);
        let word = FootedWord::new(&run(2), p).unwrap();

        assert!(word.feet().is_empty());
        assert!(word.is_unfootable());
        assert!(word.head_foot().is_none());
        assert_eq!(word.to_string(), "s\u{2080}<s\u{2081}>");
    }

    #[test]
    fn test_stress_profile_covers_extrametrical_syllable() {
        let p = params(true, Direction::LeftToRight, true, Edge::Left, false, Edge::Left);
        let word = FootedWord::new(&run(5), p).unwrap();

        assert_eq!(word.len(), 5);
        assert_eq!(
            word.stress_profile(),
            vec![
                Stress::Primary,
                Stress::Unstressed,
                Stress::Secondary,
                Stress::Unstressed,
                Stress::Unstressed,
            ]
        );
    }
}
