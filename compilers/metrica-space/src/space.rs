use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::RangeInclusive;

use metrica_foot::{FootError, FootedWord};
use metrica_protocol::{Parameter, ParameterSet, Polarity, Settings, Stress, Syllable};

use crate::error::SpaceError;

/// Lengths of the reference words, one word per length.
pub const REFERENCE_LENGTHS: RangeInclusive<usize> = 4..=8;

/// Syllables `0..length`, unstressed and light.
pub fn reference_word(length: usize) -> Vec<Syllable> {
    (0..length)
        .map(|i| u8::try_from(i).map_or(Syllable::new(), Syllable::indexed))
        .collect()
}

/// One reference word and the footings of it still in play, keyed by the
/// parameter combination that produced them.
#[derive(Debug, Clone)]
pub struct ReferenceWord {
    syllables: Vec<Syllable>,
    footings: BTreeMap<ParameterSet, FootedWord>,
}

impl ReferenceWord {
    pub fn length(&self) -> usize {
        self.syllables.len()
    }

    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    /// Retained footings in enumeration order.
    pub fn footings(&self) -> impl Iterator<Item = &FootedWord> + '_ {
        self.footings.values()
    }

    pub fn footing(&self, parameters: &ParameterSet) -> Option<&FootedWord> {
        self.footings.get(parameters)
    }

    pub fn combinations(&self) -> impl Iterator<Item = &ParameterSet> + '_ {
        self.footings.keys()
    }

    pub fn len(&self) -> usize {
        self.footings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footings.is_empty()
    }
}

/// A combination that could not be footed for one reference word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub length: usize,
    pub parameters: ParameterSet,
    pub error: FootError,
}

/// Narrowing steps other than fixed parameters, replayed on rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Constraint {
    Exclude(ParameterSet),
    Observe { word: usize, pattern: Vec<Stress> },
}

/// Every footing of the reference words that is still consistent with
/// what is known about the language.
///
/// All footings are built up front. `set` only records a value; `commit`,
/// `exclude` and `observe` shrink the retained sets. Nothing is ever added
/// back: `unset` rebuilds from scratch.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    words: Vec<ReferenceWord>,
    settings: Settings,
    history: Vec<Constraint>,
    skipped: Vec<Skipped>,
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterSpace {
    /// Builds one footing per reference word per parameter combination,
    /// with every parameter unknown.
    pub fn new() -> Self {
        let mut skipped = Vec::new();
        let words = REFERENCE_LENGTHS
            .map(|length| {
                let syllables = reference_word(length);
                let mut footings = BTreeMap::new();
                for parameters in ParameterSet::enumerate() {
                    match FootedWord::new(&syllables, parameters) {
                        Ok(word) => {
                            footings.insert(parameters, word);
                        }
                        Err(error) => skipped.push(Skipped {
                            length,
                            parameters,
                            error,
                        }),
                    }
                }
                ReferenceWord {
                    syllables,
                    footings,
                }
            })
            .collect();

        Self {
            words,
            settings: Settings::unknown(),
            history: Vec::new(),
            skipped,
        }
    }

    /// A fresh space narrowed to `settings`.
    pub fn with_settings(settings: Settings) -> Result<Self, SpaceError> {
        let mut space = Self::new();
        space.settings = settings;
        space.commit()?;
        Ok(space)
    }

    /// Drops every setting and constraint.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn words(&self) -> &[ReferenceWord] {
        &self.words
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    pub fn word_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().map(ReferenceWord::length)
    }

    /// Records a value. Takes effect at the next [`commit`](Self::commit).
    pub fn set(&mut self, parameter: Parameter, polarity: Polarity) {
        self.settings.set(parameter, polarity);
    }

    /// [`set`](Self::set) from user text, e.g. `("directionality", "rtl")`.
    pub fn set_named(&mut self, name: &str, value: &str) -> Result<(), SpaceError> {
        let parameter: Parameter = name.parse()?;
        let polarity = Polarity::parse_for(parameter, value)?;
        self.set(parameter, polarity);
        Ok(())
    }

    /// Makes `parameter` unknown again. Footings are never added back to a
    /// narrowed set, so the space is rebuilt and every remaining setting
    /// and constraint is applied again.
    pub fn unset(&mut self, parameter: Parameter) -> Result<(), SpaceError> {
        let mut settings = self.settings;
        settings.unset(parameter);

        let mut rebuilt = Self::with_settings(settings)?;
        for constraint in &self.history {
            match constraint {
                Constraint::Exclude(target) => {
                    rebuilt.exclude_combination(*target)?;
                }
                Constraint::Observe { word, pattern } => {
                    rebuilt.observe(*word, pattern)?;
                }
            }
        }

        *self = rebuilt;
        Ok(())
    }

    /// Keeps only footings whose parameters agree with every fixed value.
    /// Calling it again without a new `set` changes nothing.
    pub fn commit(&mut self) -> Result<usize, SpaceError> {
        let settings = self.settings;
        self.narrow(
            |parameters| settings.admits(parameters),
            || format!("the settings {}", settings),
        )
    }

    /// Rules out one full combination for every word. All six parameters
    /// must be fixed in `assignment`.
    pub fn exclude(&mut self, assignment: &Settings) -> Result<usize, SpaceError> {
        let target = assignment.resolve()?;
        self.exclude_combination(target)
    }

    pub fn exclude_combination(&mut self, target: ParameterSet) -> Result<usize, SpaceError> {
        let removed = self.narrow(
            |parameters| *parameters != target,
            || format!("excluding {}", target),
        )?;
        self.history.push(Constraint::Exclude(target));
        Ok(removed)
    }

    /// Keeps the combinations under which word `word` is stressed exactly
    /// as observed, and drops the others for every word.
    pub fn observe(&mut self, word: usize, pattern: &[Stress]) -> Result<usize, SpaceError> {
        let reference = self.word(word)?;
        if pattern.len() != reference.length() {
            return Err(SpaceError::PatternLength {
                expected: reference.length(),
                found: pattern.len(),
            });
        }

        let survivors: BTreeSet<ParameterSet> = reference
            .footings
            .iter()
            .filter(|(_, footing)| footing.stress_profile() == pattern)
            .map(|(parameters, _)| *parameters)
            .collect();

        let removed = self.narrow(
            |parameters| survivors.contains(parameters),
            || {
                let digits: String = pattern.iter().map(|s| char::from(b'0' + s.level())).collect();
                format!("the observed pattern {}", digits)
            },
        )?;
        self.history.push(Constraint::Observe {
            word,
            pattern: pattern.to_vec(),
        });
        Ok(removed)
    }

    /// Builds the narrowed sets first and swaps them in only if none is
    /// empty. Returns how many footings were removed in total.
    fn narrow<K, D>(&mut self, keep: K, describe: D) -> Result<usize, SpaceError>
    where
        K: Fn(&ParameterSet) -> bool,
        D: FnOnce() -> String,
    {
        let mut narrowed = Vec::with_capacity(self.words.len());
        let mut removed = 0;

        for word in &self.words {
            let retained: BTreeMap<ParameterSet, FootedWord> = word
                .footings
                .iter()
                .filter(|(parameters, _)| keep(*parameters))
                .map(|(parameters, footing)| (*parameters, footing.clone()))
                .collect();

            if retained.is_empty() {
                return Err(SpaceError::ImpossibleCombination {
                    length: word.length(),
                    constraint: describe(),
                });
            }
            removed += word.footings.len() - retained.len();
            narrowed.push(retained);
        }

        for (word, footings) in self.words.iter_mut().zip(narrowed) {
            word.footings = footings;
        }
        Ok(removed)
    }

    pub fn word(&self, index: usize) -> Result<&ReferenceWord, SpaceError> {
        self.words.get(index).ok_or(SpaceError::NoSuchWord {
            index,
            count: self.words.len(),
        })
    }

    /// Index of the reference word with `length` syllables.
    pub fn index_of_length(&self, length: usize) -> Result<usize, SpaceError> {
        self.words
            .iter()
            .position(|word| word.length() == length)
            .ok_or(SpaceError::NoSuchLength {
                length,
                min: *REFERENCE_LENGTHS.start(),
                max: *REFERENCE_LENGTHS.end(),
            })
    }

    /// The retained footings of word `index`.
    pub fn query(&self, index: usize) -> Result<impl Iterator<Item = &FootedWord> + '_, SpaceError> {
        Ok(self.word(index)?.footings())
    }

    /// Distinct renderings of word `index`. Different combinations can
    /// render identically.
    pub fn distinct_renderings(&self, index: usize) -> Result<BTreeSet<String>, SpaceError> {
        Ok(self.query(index)?.map(FootedWord::to_string).collect())
    }

    /// Distinct stress patterns of word `index`, i.e. what data can tell apart.
    pub fn distinct_profiles(&self, index: usize) -> Result<BTreeSet<Vec<Stress>>, SpaceError> {
        Ok(self.query(index)?.map(FootedWord::stress_profile).collect())
    }

    /// Combinations retained for every reference word.
    pub fn surviving_combinations(&self) -> BTreeSet<ParameterSet> {
        let mut words = self.words.iter();
        let first: BTreeSet<ParameterSet> = match words.next() {
            Some(word) => word.footings.keys().copied().collect(),
            None => return BTreeSet::new(),
        };
        words.fold(first, |acc, word| {
            acc.into_iter()
                .filter(|parameters| word.footings.contains_key(parameters))
                .collect()
        })
    }

    /// Values every surviving combination agrees on, fixed or not.
    pub fn implied(&self) -> Settings {
        let survivors = self.surviving_combinations();
        Parameter::ALL
            .into_iter()
            .fold(Settings::unknown(), |implied, parameter| {
                let mut values = survivors.iter().map(|p| p.polarity(parameter));
                match values.next() {
                    Some(first) if values.all(|v| v == first) => implied.with(parameter, first),
                    _ => implied,
                }
            })
    }

    /// Parameters the surviving combinations still disagree on.
    pub fn undetermined(&self) -> Vec<Parameter> {
        let implied = self.implied();
        Parameter::ALL
            .into_iter()
            .filter(|p| implied.get(*p).is_none())
            .collect()
    }
}

impl fmt::Display for ParameterSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.settings)
    }
}
