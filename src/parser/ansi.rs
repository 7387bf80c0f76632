//! Splits styled terminal text into plain text and ANSI CSI escape sequences,
//! for example "\x1b[31mERR!\x1b[0m"
use super::common::VResult;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_while},
    character::complete::{anychar, satisfy},
    combinator::{map, recognize},
    multi::many0,
    sequence::tuple,
};

const ESC: char = '\u{1b}';
const CSI: char = '\u{9b}';

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Segment<'a> {
    Text(&'a str),
    Escape(&'a str),
}

fn introducer(input: &str) -> VResult<&str> {
    alt((tag("\u{1b}["), tag("\u{9b}")))(input)
}

pub fn escape(input: &str) -> VResult<&str> {
    recognize(tuple((
        introducer,
        take_while(|c: char| ('\u{30}'..='\u{3f}').contains(&c)),
        take_while(|c: char| ('\u{20}'..='\u{2f}').contains(&c)),
        satisfy(|c| ('\u{40}'..='\u{7e}').contains(&c)),
    )))(input)
}

fn text(input: &str) -> VResult<&str> {
    take_till1(|c: char| c == ESC || c == CSI)(input)
}

pub fn segments(input: &str) -> VResult<Vec<Segment>> {
    many0(alt((
        map(escape, Segment::Escape),
        map(text, Segment::Text),
        // An introducer that doesn't start a valid sequence is kept as text
        map(recognize(anychar), Segment::Text),
    )))(input)
}
