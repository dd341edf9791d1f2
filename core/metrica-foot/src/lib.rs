pub mod error;
pub mod foot;
pub mod word;

pub use error::FootError;
pub use foot::{Foot, FootForm};
pub use word::{FootedWord, MIN_SYLLABLES};

#[cfg(test)]
mod tests {
    use super::*;
    use metrica_protocol::{Edge, ParameterSet, Stress, Syllable};
    use proptest::prelude::*;

    fn run(len: usize) -> Vec<Syllable> {
        (0..len as u8).map(Syllable::indexed).collect()
    }

    fn any_parameters() -> impl Strategy<Value = ParameterSet> {
        (0..ParameterSet::COMBINATIONS as u8).prop_map(ParameterSet::from_code)
    }

    proptest! {
        #[test]
        fn test_even_iterative_partition(half in 1usize..6, params in any_parameters()) {
            let params = ParameterSet { iterative: true, extrametrical: false, ..params };
            let input = run(half * 2);
            let word = FootedWord::new(&input, params).unwrap();

            prop_assert_eq!(word.feet().len(), half);
            let covered: Vec<Option<u8>> = word
                .feet()
                .iter()
                .flat_map(|foot| foot.syllables())
                .map(|s| s.index())
                .collect();
            let expected: Vec<Option<u8>> = input.iter().map(|s| s.index()).collect();
            prop_assert_eq!(covered, expected);
        }

        #[test]
        fn test_partition_is_total_and_ordered(len in 3usize..11, params in any_parameters()) {
            let word = FootedWord::new(&run(len), params).unwrap();

            let mut positions: Vec<Option<u8>> = word.syllables().map(|s| s.index()).collect();
            positions.extend(word.extrametrical().map(|s| s.index()));
            let expected: Vec<Option<u8>> = (0..len as u8).map(Some).collect();
            prop_assert_eq!(positions, expected);
            prop_assert_eq!(word.stress_profile().len(), len);
        }

        #[test]
        fn test_single_primary_on_the_head_foot(len in 2usize..11, params in any_parameters()) {
            // Two syllables with extrametricality cannot be footed non-iteratively
            prop_assume!(len > 2 || params.iterative || !params.extrametrical);
            let word = FootedWord::new(&run(len), params).unwrap();

            let primaries = word
                .stress_profile()
                .into_iter()
                .filter(|s| *s == Stress::Primary)
                .count();
            let carriers = word.feet().iter().filter(|f| f.carries_primary()).count();

            if word.feet().is_empty() {
                prop_assert!(word.is_unfootable());
                prop_assert_eq!(primaries, 0);
            } else {
                prop_assert_eq!(primaries, 1);
                prop_assert_eq!(carriers, 1);
                let expected = match params.word_headedness {
                    Edge::Left => word.feet().first(),
                    Edge::Right => word.feet().last(),
                };
                prop_assert_eq!(word.head_foot(), expected);
            }
        }

        #[test]
        fn test_unfootable_iff_stray_without_degenerate_feet(len in 2usize..11, params in any_parameters()) {
            let params = ParameterSet { iterative: true, ..params };
            let word = FootedWord::new(&run(len), params).unwrap();

            let metrical = len - usize::from(params.extrametrical);
            let expected = metrical % 2 == 1 && !params.degenerate_feet;
            prop_assert_eq!(word.is_unfootable(), expected);
            prop_assert_eq!(!word.unfooted().is_empty(), expected);
        }
    }
}
