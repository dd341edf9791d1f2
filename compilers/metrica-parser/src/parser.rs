use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, multispace0, one_of, satisfy, space0},
    combinator::{map, map_opt, opt, value},
    multi::separated_list1,
    sequence::{delimited, pair, tuple},
    IResult,
};

use metrica_protocol::syllable::{PRIMARY_MARK, SECONDARY_MARK, SUBSCRIPT_ZERO};
use metrica_protocol::{Stress, Syllable, Weight};

use crate::token::{Segment, SegmentKind, Span};
use crate::ParseError;

/// Plain combining grave, accepted alongside the tone-mark form.
const GRAVE: char = '\u{0300}';
/// Plain combining acute, accepted alongside the tone-mark form.
const ACUTE: char = '\u{0301}';

/// Characters skipped between items of an observed stress pattern.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | '(' | ')' | '<' | '>' | '|' | '-')
}

fn is_subscript_digit(c: char) -> bool {
    ('\u{2080}'..='\u{2089}').contains(&c)
}

fn weight(input: &str) -> IResult<&str, Weight> {
    alt((
        value(Weight::Light, char('s')),
        value(Weight::Heavy, char('S')),
    ))(input)
}

fn stress_mark(input: &str) -> IResult<&str, Stress> {
    map(
        opt(satisfy(|c| matches!(c, SECONDARY_MARK | PRIMARY_MARK | GRAVE | ACUTE))),
        |mark| match mark {
            Some(SECONDARY_MARK | GRAVE) => Stress::Secondary,
            Some(_) => Stress::Primary,
            None => Stress::Unstressed,
        },
    )(input)
}

fn subscript(input: &str) -> IResult<&str, Option<u8>> {
    opt(map_opt(satisfy(is_subscript_digit), |c| {
        u8::try_from(u32::from(c) - SUBSCRIPT_ZERO).ok()
    }))(input)
}

/// Base glyph, optional stress diacritic, optional subscript index.
pub fn syllable(input: &str) -> IResult<&str, Syllable> {
    map(tuple((weight, stress_mark, subscript)), |(weight, stress, index)| {
        let syllable = Syllable::new().with_weight(weight).with_stress(stress);
        match index {
            Some(i) => syllable.with_index(i),
            None => syllable,
        }
    })(input)
}

fn foot(input: &str) -> IResult<&str, Vec<Syllable>> {
    delimited(
        pair(char('('), space0),
        separated_list1(pair(char(','), space0), syllable),
        pair(space0, char(')')),
    )(input)
}

fn extrametrical(input: &str) -> IResult<&str, Syllable> {
    delimited(char('<'), syllable, char('>'))(input)
}

fn segment(input: &str) -> IResult<&str, SegmentKind> {
    alt((
        map(foot, SegmentKind::Foot),
        map(extrametrical, SegmentKind::Extrametrical),
        map(syllable, SegmentKind::Unfooted),
    ))(input)
}

fn pattern_item(input: &str) -> IResult<&str, Stress> {
    alt((
        map(syllable, |s| s.stress()),
        map_opt(one_of("012"), |d| {
            d.to_digit(10)
                .and_then(|level| Stress::from_level(level as u8))
        }),
    ))(input)
}

/// Splits a rendered footing into segments. Whitespace between segments is
/// ignored; anything else unparseable is an error at its byte offset.
pub fn parse_with_spans(original_input: &str) -> Result<Vec<Segment>, ParseError> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Match one segment
        let start = original_input.len() - input.len();
        match segment(input) {
            Ok((next_input, kind)) => {
                let end = original_input.len() - next_input.len();
                result.push(Segment {
                    span: Span::new(start, end),
                    kind,
                });
                input = next_input;
            }
            Err(_) => {
                return Err(ParseError::Unexpected {
                    offset: start,
                    found: input.chars().next().unwrap_or_default(),
                });
            }
        }
    }

    Ok(result)
}

/// Reads stress levels from rendered glyphs or digits `0`/`1`/`2`.
pub fn parse_pattern(original_input: &str) -> Result<Vec<Stress>, ParseError> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        let (next_input, _) = match take_while::<_, &str, nom::error::Error<&str>>(is_separator)(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        match pattern_item(input) {
            Ok((next_input, stress)) => {
                result.push(stress);
                input = next_input;
            }
            Err(_) => {
                return Err(ParseError::Unexpected {
                    offset: original_input.len() - input.len(),
                    found: input.chars().next().unwrap_or_default(),
                });
            }
        }
    }

    Ok(result)
}
