use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::ProtocolError;

/// One of the two values of a binary parameter.
///
/// `Minus` is "no", "left" or "left to right"; `Plus` is "yes", "right" or
/// "right to left", depending on the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Polarity {
    Minus,
    Plus,
}

impl Polarity {
    /// Enumeration order: `Minus` first.
    pub const BOTH: [Polarity; 2] = [Polarity::Minus, Polarity::Plus];

    pub const fn sign(self) -> i8 {
        match self {
            Polarity::Minus => -1,
            Polarity::Plus => 1,
        }
    }

    pub const fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            -1 => Some(Polarity::Minus),
            1 => Some(Polarity::Plus),
            _ => None,
        }
    }

    pub const fn from_bool(on: bool) -> Self {
        if on {
            Polarity::Plus
        } else {
            Polarity::Minus
        }
    }

    pub const fn is_plus(self) -> bool {
        matches!(self, Polarity::Plus)
    }

    /// Parses a user-facing value for `parameter`.
    ///
    /// Every parameter accepts `+1`/`-1` (and `+`/`-`); beyond that each one
    /// takes the words of its own domain, e.g. `rtl` for directionality.
    pub fn parse_for(parameter: Parameter, text: &str) -> Result<Self, ProtocolError> {
        let text = text.trim();
        let any_of = |candidates: &[&str]| candidates.iter().any(|c| c.eq_ignore_ascii_case(text));

        if any_of(&["+1", "+", "1"][..]) {
            return Ok(Polarity::Plus);
        }
        if any_of(&["-1", "-"][..]) {
            return Ok(Polarity::Minus);
        }

        let (minus, plus): (&[&str], &[&str]) = match parameter {
            Parameter::Iterativity | Parameter::Extrametricality => {
                (&["off", "no", "false"][..], &["on", "yes", "true"][..])
            }
            Parameter::DegenerateFeet => (
                &["disallowed", "off", "no", "false"][..],
                &["allowed", "on", "yes", "true"][..],
            ),
            Parameter::Directionality => (
                &["ltr", "left-to-right", "left_to_right"][..],
                &["rtl", "right-to-left", "right_to_left"][..],
            ),
            Parameter::FootHeadedness => (&["left", "trochaic"][..], &["right", "iambic"][..]),
            Parameter::WordHeadedness => (&["left"][..], &["right"][..]),
        };

        if any_of(minus) {
            Ok(Polarity::Minus)
        } else if any_of(plus) {
            Ok(Polarity::Plus)
        } else {
            Err(ProtocolError::InvalidValue {
                parameter,
                value: text.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Edge {
    Left,
    Right,
}

impl From<Polarity> for Edge {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Minus => Edge::Left,
            Polarity::Plus => Edge::Right,
        }
    }
}

impl From<Edge> for Polarity {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Left => Polarity::Minus,
            Edge::Right => Polarity::Plus,
        }
    }
}

/// The edge footing starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl From<Polarity> for Direction {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Minus => Direction::LeftToRight,
            Polarity::Plus => Direction::RightToLeft,
        }
    }
}

impl From<Direction> for Polarity {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::LeftToRight => Polarity::Minus,
            Direction::RightToLeft => Polarity::Plus,
        }
    }
}

/// The six metrical parameters, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum Parameter {
    Iterativity = 0,
    Directionality = 1,
    Extrametricality = 2,
    FootHeadedness = 3,
    DegenerateFeet = 4,
    WordHeadedness = 5,
}

impl Parameter {
    /// Canonical order. Enumeration of combinations nests in this order,
    /// iterativity outermost.
    pub const ALL: [Parameter; 6] = [
        Parameter::Iterativity,
        Parameter::Directionality,
        Parameter::Extrametricality,
        Parameter::FootHeadedness,
        Parameter::DegenerateFeet,
        Parameter::WordHeadedness,
    ];

    pub const fn position(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Parameter::Iterativity => "iterativity",
            Parameter::Directionality => "directionality",
            Parameter::Extrametricality => "extrametricality",
            Parameter::FootHeadedness => "foot_headedness",
            Parameter::DegenerateFeet => "degenerate_feet",
            Parameter::WordHeadedness => "word_headedness",
        }
    }

    /// Canonical spelling of a value of this parameter.
    pub const fn value_name(self, polarity: Polarity) -> &'static str {
        match (self, polarity) {
            (Parameter::Iterativity | Parameter::Extrametricality, Polarity::Minus) => "off",
            (Parameter::Iterativity | Parameter::Extrametricality, Polarity::Plus) => "on",
            (Parameter::Directionality, Polarity::Minus) => "ltr",
            (Parameter::Directionality, Polarity::Plus) => "rtl",
            (Parameter::DegenerateFeet, Polarity::Minus) => "disallowed",
            (Parameter::DegenerateFeet, Polarity::Plus) => "allowed",
            (Parameter::FootHeadedness | Parameter::WordHeadedness, Polarity::Minus) => "left",
            (Parameter::FootHeadedness | Parameter::WordHeadedness, Polarity::Plus) => "right",
        }
    }

    pub const fn mask(self) -> ParameterMask {
        ParameterMask::from_bits_truncate(1 << self as u8)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = ProtocolError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let fold = |b: u8| if b == b'-' { b'_' } else { b.to_ascii_lowercase() };

        Parameter::ALL
            .into_iter()
            .find(|p| {
                let name = p.name();
                name.len() == wanted.len()
                    && name.bytes().zip(wanted.bytes()).all(|(a, b)| a == fold(b))
            })
            .ok_or_else(|| ProtocolError::UnknownParameter(wanted.to_string()))
    }
}

bitflags! {
    /// A subset of the six parameters, e.g. the ones currently fixed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct ParameterMask: u8 {
        const ITERATIVITY = 1;
        const DIRECTIONALITY = 2;
        const EXTRAMETRICALITY = 4;
        const FOOT_HEADEDNESS = 8;
        const DEGENERATE_FEET = 16;
        const WORD_HEADEDNESS = 32;
    }
}

impl ParameterMask {
    pub fn parameters(self) -> impl Iterator<Item = Parameter> {
        Parameter::ALL.into_iter().filter(move |p| self.contains(p.mask()))
    }
}

/// A fully specified parameter combination.
///
/// Field order follows [`Parameter::ALL`] and every field orders its
/// `Minus` value first, so the derived `Ord` is the enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ParameterSet {
    pub iterative: bool,
    pub directionality: Direction,
    pub extrametrical: bool,
    pub foot_headedness: Edge,
    pub degenerate_feet: bool,
    pub word_headedness: Edge,
}

impl ParameterSet {
    pub const COMBINATIONS: usize = 1 << Parameter::ALL.len();

    /// Every parameter set to the same polarity.
    pub const fn uniform(polarity: Polarity) -> Self {
        Self::from_code(match polarity {
            Polarity::Minus => 0,
            Polarity::Plus => (Self::COMBINATIONS - 1) as u8,
        })
    }

    /// Decodes the enumeration index of a combination: iterativity is the
    /// most significant bit, word headedness the least, a set bit is `Plus`.
    pub const fn from_code(code: u8) -> Self {
        const fn bit(code: u8, p: Parameter) -> bool {
            (code >> (5 - p as u8)) & 1 == 1
        }
        const fn edge(on: bool) -> Edge {
            if on {
                Edge::Right
            } else {
                Edge::Left
            }
        }

        Self {
            iterative: bit(code, Parameter::Iterativity),
            directionality: if bit(code, Parameter::Directionality) {
                Direction::RightToLeft
            } else {
                Direction::LeftToRight
            },
            extrametrical: bit(code, Parameter::Extrametricality),
            foot_headedness: edge(bit(code, Parameter::FootHeadedness)),
            degenerate_feet: bit(code, Parameter::DegenerateFeet),
            word_headedness: edge(bit(code, Parameter::WordHeadedness)),
        }
    }

    pub fn code(&self) -> u8 {
        Parameter::ALL
            .into_iter()
            .filter(|p| self.polarity(*p).is_plus())
            .fold(0, |code, p| code | 1 << (5 - p as u8))
    }

    /// All 64 combinations in enumeration order.
    pub fn enumerate() -> impl Iterator<Item = ParameterSet> {
        (0..Self::COMBINATIONS as u8).map(Self::from_code)
    }

    pub fn polarity(&self, parameter: Parameter) -> Polarity {
        match parameter {
            Parameter::Iterativity => Polarity::from_bool(self.iterative),
            Parameter::Directionality => self.directionality.into(),
            Parameter::Extrametricality => Polarity::from_bool(self.extrametrical),
            Parameter::FootHeadedness => self.foot_headedness.into(),
            Parameter::DegenerateFeet => Polarity::from_bool(self.degenerate_feet),
            Parameter::WordHeadedness => self.word_headedness.into(),
        }
    }

    pub fn set(&mut self, parameter: Parameter, polarity: Polarity) {
        match parameter {
            Parameter::Iterativity => self.iterative = polarity.is_plus(),
            Parameter::Directionality => self.directionality = polarity.into(),
            Parameter::Extrametricality => self.extrametrical = polarity.is_plus(),
            Parameter::FootHeadedness => self.foot_headedness = polarity.into(),
            Parameter::DegenerateFeet => self.degenerate_feet = polarity.is_plus(),
            Parameter::WordHeadedness => self.word_headedness = polarity.into(),
        }
    }

    pub fn with(mut self, parameter: Parameter, polarity: Polarity) -> Self {
        self.set(parameter, polarity);
        self
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in Parameter::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", p, p.value_name(self.polarity(p)))?;
        }
        Ok(())
    }
}

/// A partially specified parameter assignment: each parameter is unknown
/// (`None`) or fixed to one polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Settings {
    values: [Option<Polarity>; 6],
}

impl Settings {
    pub const fn unknown() -> Self {
        Self { values: [None; 6] }
    }

    pub fn get(&self, parameter: Parameter) -> Option<Polarity> {
        self.values[parameter.position()]
    }

    pub fn set(&mut self, parameter: Parameter, polarity: Polarity) {
        self.values[parameter.position()] = Some(polarity);
    }

    pub fn unset(&mut self, parameter: Parameter) {
        self.values[parameter.position()] = None;
    }

    pub fn with(mut self, parameter: Parameter, polarity: Polarity) -> Self {
        self.set(parameter, polarity);
        self
    }

    pub fn fixed(&self) -> ParameterMask {
        Parameter::ALL
            .into_iter()
            .filter(|p| self.get(*p).is_some())
            .fold(ParameterMask::empty(), |mask, p| mask | p.mask())
    }

    pub fn is_complete(&self) -> bool {
        self.fixed().is_all()
    }

    /// True when `set` agrees with every fixed value.
    pub fn admits(&self, set: &ParameterSet) -> bool {
        Parameter::ALL
            .into_iter()
            .all(|p| self.get(p).map_or(true, |v| v == set.polarity(p)))
    }

    /// Converts to a full combination; every parameter must be fixed.
    pub fn resolve(&self) -> Result<ParameterSet, ProtocolError> {
        Parameter::ALL
            .into_iter()
            .try_fold(ParameterSet::uniform(Polarity::Minus), |set, p| {
                self.get(p)
                    .map(|v| set.with(p, v))
                    .ok_or(ProtocolError::Unresolved(p))
            })
    }

    /// The combinations this assignment admits, in enumeration order.
    pub fn candidates(self) -> impl Iterator<Item = ParameterSet> {
        ParameterSet::enumerate().filter(move |set| self.admits(set))
    }
}

impl From<ParameterSet> for Settings {
    fn from(set: ParameterSet) -> Self {
        Parameter::ALL
            .into_iter()
            .fold(Settings::unknown(), |s, p| s.with(p, set.polarity(p)))
    }
}

impl fmt::Display for Settings {
    /// Lists only the fixed parameters, in a form [`Settings::from_str`] reads back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fixed = self.fixed().parameters().peekable();
        if fixed.peek().is_none() {
            return f.write_str("(nothing fixed)");
        }
        let mut first = true;
        for p in fixed {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            if let Some(v) = self.get(p) {
                write!(f, "{}={}", p, p.value_name(v))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Settings {
    type Err = ProtocolError;

    /// Reads `name=value` entries separated by commas, e.g.
    /// `iterativity=on, directionality=rtl`. Later entries win.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut settings = Settings::unknown();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = entry
                .split_once('=')
                .ok_or_else(|| ProtocolError::MalformedAssignment(entry.to_string()))?;
            let parameter: Parameter = name.parse()?;
            settings.set(parameter, Polarity::parse_for(parameter, value)?);
        }
        Ok(settings)
    }
}
