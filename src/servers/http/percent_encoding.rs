//! Binary safe percent decoding of announce query values.
//!
//! `BitTorrent` info hashes are percent encoded from raw byte arrays which are
//! usually not valid UTF-8, so they can not go through a text decoding path.
//! The decoder here returns the bytes the value represents:
//!
//! - `%` followed by exactly two hex digits is one byte with that value.
//! - Any other character is one byte with its character code.
//!
//! The whole value must be consumed. A `%` that does not start a valid escape,
//! or a character whose code does not fit in a byte, makes the decoding fail.
//!
//! More information about "Percent Encoding" can be found here:
//!
//! - <https://datatracker.ietf.org/doc/html/rfc3986#section-2.1>
//! - <https://en.wikipedia.org/wiki/URL_encoding>
use std::panic::Location;

use swarm_tracker_primitives::info_hash::{self, InfoHash};
use thiserror::Error;

use crate::shared::parser::{alt, exactly, map, matching, repeat, sequence, tag, Parser};

/// The value could not be decoded. `position` is the byte offset of the first
/// character that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid percent encoded value at position {position}: {value}, {location}")]
pub struct PercentDecodeError {
    pub value: String,
    pub position: usize,
    location: &'static Location<'static>,
}

/// Percent decodes a single query value into the bytes it represents.
///
/// ```rust
/// use swarm_tracker::servers::http::percent_encoding::percent_decode;
///
/// assert_eq!(percent_decode("%E1%B8m").unwrap(), vec![0xE1, 0xB8, 0x6D]);
/// assert!(percent_decode("abc%").is_err());
/// ```
///
/// # Errors
///
/// Will return `Err` if the value contains a malformed escape or a character
/// that does not fit in a single byte.
#[track_caller]
pub fn percent_decode(value: &str) -> Result<Vec<u8>, PercentDecodeError> {
    let escaped = map(
        sequence(tag("%"), exactly(2, matching(|c: char| c.is_ascii_hexdigit()))),
        |(_, digits)| digits.iter().fold(0u8, |byte, digit| (byte << 4) | hex_value(*digit)),
    );

    let literal = map(matching(|c: char| c != '%' && u8::try_from(c).is_ok()), |c: char| {
        u8::try_from(c).unwrap_or_default()
    });

    match repeat(alt(escaped, literal)).parse(value) {
        Some((bytes, "")) => Ok(bytes),
        Some((_, remaining)) => Err(PercentDecodeError {
            value: value.to_owned(),
            position: value.len() - remaining.len(),
            location: Location::caller(),
        }),
        None => Err(PercentDecodeError {
            value: value.to_owned(),
            position: 0,
            location: Location::caller(),
        }),
    }
}

/// Percent decodes a percent encoded info hash.
///
/// For example, given the info hash `3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0`,
/// its percent encoded representation is `%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0`.
///
/// # Errors
///
/// Will return `Err` if the value can not be decoded or it does not decode to
/// exactly 20 bytes.
pub fn percent_decode_info_hash(raw_info_hash: &str) -> Result<InfoHash, InfoHashDecodeError> {
    let bytes = percent_decode(raw_info_hash)?;
    Ok(InfoHash::try_from(bytes)?)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfoHashDecodeError {
    #[error(transparent)]
    Encoding(#[from] PercentDecodeError),
    #[error(transparent)]
    Length(#[from] info_hash::ConversionError),
}

#[allow(clippy::cast_possible_truncation)]
fn hex_value(digit: char) -> u8 {
    digit.to_digit(16).unwrap_or_default() as u8
}
