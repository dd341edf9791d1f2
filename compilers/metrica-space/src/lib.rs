pub mod error;
pub mod space;

pub use error::SpaceError;
pub use space::{reference_word, ParameterSpace, ReferenceWord, Skipped, REFERENCE_LENGTHS};

#[cfg(test)]
mod tests {
    use super::*;
    use metrica_protocol::{Parameter, ParameterSet, Polarity, Settings, Stress};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    use Polarity::{Minus, Plus};

    #[test]
    fn test_distinct_renderings_baseline() {
        let space = ParameterSpace::new();
        let counts: Vec<usize> = (0..5)
            .map(|i| space.distinct_renderings(i).unwrap().len())
            .collect();

        // Several combinations render identically
        assert_eq!(counts, vec![20, 28, 28, 28, 28]);

        let profiles: Vec<usize> = (0..5)
            .map(|i| space.distinct_profiles(i).unwrap().len())
            .collect();
        assert_eq!(profiles, vec![12, 17, 19, 17, 19]);
    }

    #[test]
    fn test_non_iterative_analysis() {
        let mut space = ParameterSpace::new();
        space.set(Parameter::Iterativity, Minus);
        space.commit().unwrap();
        assert_eq!(space.word(1).unwrap().len(), 32);

        // Stress sits at the right edge: the single foot is built right to left
        space.set(Parameter::Directionality, Plus);
        space.set(Parameter::WordHeadedness, Plus);
        space.commit().unwrap();
        assert_eq!(space.word(1).unwrap().len(), 8);

        // Degenerate feet cannot show up in a non-iterative word of this size
        space.set(Parameter::DegenerateFeet, Minus);
        space.commit().unwrap();
        let rendered: Vec<String> = space.query(1).unwrap().map(|f| f.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "s\u{2080}s\u{2081}s\u{2082}(s\u{0341}\u{2083}, s\u{2084})",
                "s\u{2080}s\u{2081}s\u{2082}(s\u{2083}, s\u{0341}\u{2084})",
                "s\u{2080}s\u{2081}(s\u{0341}\u{2082}, s\u{2083})<s\u{2084}>",
                "s\u{2080}s\u{2081}(s\u{2082}, s\u{0341}\u{2083})<s\u{2084}>",
            ]
        );

        // Penultimate stress stays ambiguous between two analyses
        assert_eq!(space.distinct_profiles(1).unwrap().len(), 3);
        assert_eq!(
            space.undetermined(),
            vec![Parameter::Extrametricality, Parameter::FootHeadedness]
        );
    }

    #[test]
    fn test_iterative_analysis_with_manual_exclusions() {
        let mut iterative = ParameterSpace::new();
        iterative.set(Parameter::Iterativity, Plus);
        iterative.commit().unwrap();
        iterative.set(Parameter::WordHeadedness, Minus);
        iterative.commit().unwrap();
        assert_eq!(iterative.word(1).unwrap().len(), 16);

        // Three stresses in five syllables: no extrametricality, degenerate feet allowed
        let tangent_settings = iterative
            .settings()
            .with(Parameter::DegenerateFeet, Plus)
            .with(Parameter::Extrametricality, Minus);
        let tangent = ParameterSpace::with_settings(tangent_settings).unwrap();
        assert_eq!(tangent.word(1).unwrap().len(), 4);

        // Only two stresses were heard, so rule those four out by hand
        for foot in [Plus, Minus] {
            for direction in [Plus, Minus] {
                let ruled_out = tangent_settings
                    .with(Parameter::FootHeadedness, foot)
                    .with(Parameter::Directionality, direction);
                assert_eq!(iterative.exclude(&ruled_out), Ok(5));
            }
        }

        // Final-syllable stress only arises right to left, iambic, without degenerate feet
        let final_stress = iterative
            .settings()
            .with(Parameter::Extrametricality, Minus)
            .with(Parameter::Directionality, Plus)
            .with(Parameter::FootHeadedness, Plus)
            .with(Parameter::DegenerateFeet, Minus);
        iterative.exclude(&final_stress).unwrap();

        for word in iterative.words() {
            assert_eq!(word.len(), 11);
        }

        let first_and_third = vec![
            Stress::Primary,
            Stress::Unstressed,
            Stress::Secondary,
            Stress::Unstressed,
            Stress::Unstressed,
        ];
        let second_and_fourth = vec![
            Stress::Unstressed,
            Stress::Primary,
            Stress::Unstressed,
            Stress::Secondary,
            Stress::Unstressed,
        ];
        let profiles: Vec<Vec<Stress>> = iterative
            .query(1)
            .unwrap()
            .map(|f| f.stress_profile())
            .collect();
        assert_eq!(profiles.iter().filter(|p| **p == first_and_third).count(), 5);
        assert_eq!(profiles.iter().filter(|p| **p == second_and_fourth).count(), 6);
    }

    #[test]
    fn test_impossible_settings_after_exclusions() {
        let fixed = ParameterSet::from_code(0b101010);
        let mut space = ParameterSpace::new();
        space.exclude_combination(fixed).unwrap();

        for (parameter, value) in Parameter::ALL.into_iter().map(|p| (p, fixed.polarity(p))) {
            space.set(parameter, value);
        }
        let err = space.commit().unwrap_err();
        assert!(matches!(err, SpaceError::ImpossibleCombination { length: 4, .. }));
        // Nothing was filtered
        assert_eq!(space.surviving_combinations().len(), 63);
    }

    fn any_settings() -> impl Strategy<Value = Settings> {
        proptest::collection::vec(prop::option::of(any::<bool>()), 6).prop_map(|values| {
            Parameter::ALL
                .into_iter()
                .zip(values)
                .fold(Settings::unknown(), |settings, (p, v)| match v {
                    Some(on) => settings.with(p, Polarity::from_bool(on)),
                    None => settings,
                })
        })
    }

    proptest! {
        #[test]
        fn test_commit_matches_admitted_combinations(settings in any_settings()) {
            let mut space = ParameterSpace::new();
            for p in Parameter::ALL {
                if let Some(v) = settings.get(p) {
                    space.set(p, v);
                }
            }
            space.commit().unwrap();
            let once = space.surviving_combinations();
            prop_assert_eq!(once.clone(), settings.candidates().collect::<BTreeSet<_>>());

            space.commit().unwrap();
            prop_assert_eq!(space.surviving_combinations(), once);
        }

        #[test]
        fn test_narrowing_only_shrinks(
            steps in proptest::collection::vec((0usize..6, any::<bool>(), 0u8..64), 1..8)
        ) {
            let mut space = ParameterSpace::new();
            for (parameter, on, excluded) in steps {
                let before = space.surviving_combinations();

                space.set(Parameter::ALL[parameter], Polarity::from_bool(on));
                // A contradiction leaves the space as it was
                let _ = space.commit();
                let _ = space.exclude_combination(ParameterSet::from_code(excluded));

                let after = space.surviving_combinations();
                prop_assert!(after.is_subset(&before));
                prop_assert!(!after.is_empty());
                for word in space.words() {
                    prop_assert!(word.combinations().all(|c| after.contains(c)));
                }
            }
        }
    }
}
