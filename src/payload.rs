use std::str::FromStr;

use thiserror::Error;
use tscodec::{InvalidArgument, TimestampCodec, WordOrder};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("empty payload")]
    Empty,

    #[error("malformed payload {token:?}: {reason}")]
    Malformed { token: String, reason: &'static str },

    #[error(transparent)]
    Codec(#[from] InvalidArgument),
}

fn malformed(token: &str, reason: &'static str) -> PayloadError {
    PayloadError::Malformed {
        token: token.to_string(),
        reason,
    }
}

/// One captured timestamp as typed on the command line.
///
/// - `1484753291`       whole seconds since the epoch
/// - `1484753291000ms`  milliseconds since the epoch
/// - `898b:587f`        two hex words in wire order
/// - `0x898b587f`       hex bytes in wire order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Seconds(i64),
    Millis(i64),
    Words(i64, i64),
    Bytes(Vec<u8>),
}

impl Payload {
    /// Decode into a codec, reading words and byte arrays in `order`
    pub fn decode(&self, order: WordOrder) -> Result<TimestampCodec, PayloadError> {
        let codec = match self {
            Payload::Seconds(seconds) => TimestampCodec::from_seconds(*seconds)?,
            Payload::Millis(millis) => TimestampCodec::from_millis(*millis)?,
            Payload::Words(first, second) => TimestampCodec::from_wide_words(order, *first, *second)?,
            Payload::Bytes(bytes) => TimestampCodec::from_bytes(order, bytes)?,
        };
        Ok(codec)
    }
}

fn parse_hex_bytes(token: &str, hex: &str) -> Result<Vec<u8>, PayloadError> {
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed(token, "expected an even number of hex digits"));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed(token, "invalid hex byte")))
        .collect()
}

fn parse_hex_word(token: &str, word: &str) -> Result<i64, PayloadError> {
    let word = word.trim();
    let word = word.strip_prefix("0x").or_else(|| word.strip_prefix("0X")).unwrap_or(word);
    i64::from_str_radix(word, 16).map_err(|_| malformed(token, "invalid hex word"))
}

impl FromStr for Payload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(PayloadError::Empty);
        }

        if let Some((first, second)) = token.split_once(':') {
            return Ok(Payload::Words(parse_hex_word(token, first)?, parse_hex_word(token, second)?));
        }

        if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
            return parse_hex_bytes(token, hex).map(Payload::Bytes);
        }

        if let Some(millis) = token.strip_suffix("ms") {
            return millis
                .parse()
                .map(Payload::Millis)
                .map_err(|_| malformed(token, "invalid millisecond count"));
        }

        token
            .parse()
            .map(Payload::Seconds)
            .map_err(|_| malformed(token, "invalid second count"))
    }
}
