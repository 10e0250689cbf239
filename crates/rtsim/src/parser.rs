//! Trace and table parsers using nom
//!
//! Trace format: keys separated by whitespace or commas, `#` comments to end
//! of line.
//! ```text
//! # warm up
//! a b c
//! a, d, a   # a stays hot
//! ```
//!
//! Table format: one entry per line, blank lines and `#` comment lines ignored.
//! ```text
//! user:1 = alice
//! user:2 = bob
//! ```

use std::fs;
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{char, multispace1, not_line_ending, space0},
    combinator::{all_consuming, map, opt, rest, value},
    multi::{many1, separated_list0},
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};

use crate::error::{Error, Result};

fn is_key_delimiter(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '#'
}

fn comment(input: &str) -> IResult<&str, ()> {
    value((), preceded(char('#'), not_line_ending))(input)
}

/// Any run of whitespace, commas and comments
fn separator(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many1(alt((value((), multispace1), value((), char(',')), comment))),
    )(input)
}

fn trace_key(input: &str) -> IResult<&str, &str> {
    take_till1(is_key_delimiter)(input)
}

/// Parse a trace into the ordered list of requested keys
pub fn parse_trace(input: &str) -> Result<Vec<String>> {
    let (_, keys) = all_consuming(delimited(
        opt(separator),
        separated_list0(separator, trace_key),
        opt(separator),
    ))(input)?;

    Ok(keys.into_iter().map(str::to_string).collect())
}

/// Read and parse a trace file
pub fn load_trace(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}

/// Parse a single `key = value` line
///
/// Returns the key and the value with trailing whitespace removed.
pub fn parse_entry(line: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(
        preceded(space0, take_till1(|c: char| c == '=' || c.is_whitespace())),
        tuple((space0, char('='), space0)),
        map(rest, str::trim_end),
    ))(line)
}

/// Parse a table into its entries, in file order
pub fn parse_table(input: &str) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();

    for (n, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (_, (key, val)) = parse_entry(line)
            .map_err(|_| Error::Parse(format!("line {}: expected `key = value`", n + 1)))?;
        entries.push((key.to_string(), val.to_string()));
    }

    Ok(entries)
}
