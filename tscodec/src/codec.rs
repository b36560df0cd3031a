use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvalidArgument;

/// Size of a wire-encoded seconds value
pub const SECONDS_ARRAY_LEN: usize = 4;

/// Order in which the two 16-bit halves of a seconds value travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordOrder {
    /// High-order word first
    Direct,
    /// Low-order word first
    Reversed,
}

impl FromStr for WordOrder {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(WordOrder::Direct),
            "reversed" => Ok(WordOrder::Reversed),
            _ => Err(InvalidArgument::UnknownWordOrder(s.to_string())),
        }
    }
}

impl fmt::Display for WordOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordOrder::Direct => write!(f, "direct"),
            WordOrder::Reversed => write!(f, "reversed"),
        }
    }
}

/// Seconds value from two words, high-order word first: `(first << 16) | second`
pub fn direct_seconds(first: u16, second: u16) -> u64 {
    (u64::from(first) << 16) | u64::from(second)
}

/// Seconds value from two words, low-order word first: `(second << 16) | first`
pub fn reversed_seconds(first: u16, second: u16) -> u64 {
    (u64::from(second) << 16) | u64::from(first)
}

fn exact_array(bytes: &[u8]) -> Result<[u8; SECONDS_ARRAY_LEN], InvalidArgument> {
    <[u8; SECONDS_ARRAY_LEN]>::try_from(bytes).map_err(|_| {
        debug!(len = bytes.len(), "rejecting timestamp array");
        InvalidArgument::Length {
            expected: SECONDS_ARRAY_LEN,
            actual: bytes.len(),
        }
    })
}

/// Swap the two word pairs of a 4-byte array, keeping the byte order inside
/// each word: `[b0, b1, b2, b3]` becomes `[b2, b3, b0, b1]`.
pub fn swap_words4(bytes: &[u8]) -> Result<[u8; SECONDS_ARRAY_LEN], InvalidArgument> {
    let [b0, b1, b2, b3] = exact_array(bytes)?;
    Ok([b2, b3, b0, b1])
}

/// Seconds value from a 4-byte array whose words arrive low-order first.
///
/// `[b0, b1, b2, b3]` is read as the big-endian sequence `[b2, b3, b0, b1]`.
pub fn reversed_bytes_seconds(bytes: &[u8]) -> Result<u64, InvalidArgument> {
    let [b0, b1, b2, b3] = exact_array(bytes)?;
    Ok(u64::from(u32::from_be_bytes([b2, b3, b0, b1])))
}

/// An immutable point in time that knows how to read itself out of, and
/// write itself back into, the compact encodings used by device payloads.
///
/// Instances are only obtained through the `from_*` factories. Equality,
/// ordering and hashing are those of the wrapped instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimestampCodec {
    instant: DateTime<Utc>,
}

impl TimestampCodec {
    fn from_wire_seconds(seconds: u64) -> Self {
        // Wire values are at most u32::MAX, well inside chrono's range
        Self {
            instant: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(seconds as i64),
        }
    }

    /// Whole seconds since the Unix epoch
    pub fn from_seconds(seconds: i64) -> Result<Self, InvalidArgument> {
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(|instant| Self { instant })
            .ok_or(InvalidArgument::OutOfRange(seconds))
    }

    /// Whole milliseconds since the Unix epoch. The millisecond remainder is
    /// kept as the sub-second part.
    pub fn from_millis(millis: i64) -> Result<Self, InvalidArgument> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|instant| Self { instant })
            .ok_or(InvalidArgument::OutOfRange(millis))
    }

    pub fn from_words_direct(first: u16, second: u16) -> Self {
        Self::from_wire_seconds(direct_seconds(first, second))
    }

    pub fn from_words_reversed(first: u16, second: u16) -> Self {
        Self::from_wire_seconds(reversed_seconds(first, second))
    }

    pub fn from_words(order: WordOrder, first: u16, second: u16) -> Self {
        match order {
            WordOrder::Direct => Self::from_words_direct(first, second),
            WordOrder::Reversed => Self::from_words_reversed(first, second),
        }
    }

    /// Checked variant of [`from_words`](Self::from_words) for callers that
    /// hold words in wider integers. Values outside `0..=0xFFFF` are rejected
    /// rather than truncated.
    pub fn from_wide_words(order: WordOrder, first: i64, second: i64) -> Result<Self, InvalidArgument> {
        let narrow = |word: i64| u16::try_from(word).map_err(|_| InvalidArgument::WordOutOfRange(word));
        Ok(Self::from_words(order, narrow(first)?, narrow(second)?))
    }

    /// 4-byte array with the words in transmission order matching
    /// [`from_words_direct`](Self::from_words_direct).
    pub fn from_bytes_direct(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        let swapped = swap_words4(bytes)?;
        Self::from_bytes_reversed(&swapped)
    }

    /// 4-byte array with the words in reversed order, see [`reversed_bytes_seconds`].
    pub fn from_bytes_reversed(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        reversed_bytes_seconds(bytes).map(Self::from_wire_seconds)
    }

    pub fn from_bytes(order: WordOrder, bytes: &[u8]) -> Result<Self, InvalidArgument> {
        match order {
            WordOrder::Direct => Self::from_bytes_direct(bytes),
            WordOrder::Reversed => Self::from_bytes_reversed(bytes),
        }
    }

    pub fn seconds(&self) -> i64 {
        self.instant.timestamp()
    }

    pub fn millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    pub fn instant(&self) -> &DateTime<Utc> {
        &self.instant
    }

    /// Big-endian low 4 bytes of [`seconds`](Self::seconds). Higher bits are
    /// dropped, so values past 2106-02-07T06:28:15Z do not survive.
    pub fn seconds_array(&self) -> [u8; SECONDS_ARRAY_LEN] {
        let [_, _, _, _, b4, b5, b6, b7] = self.seconds().to_be_bytes();
        [b4, b5, b6, b7]
    }

    /// Big-endian encoding of [`millis`](Self::millis)
    pub fn millis_array(&self) -> [u8; 8] {
        self.millis().to_be_bytes()
    }

    fn wire_seconds(&self) -> u32 {
        u32::from_be_bytes(self.seconds_array())
    }

    /// Inverse of [`from_words_direct`](Self::from_words_direct)
    pub fn words_direct(&self) -> (u16, u16) {
        let seconds = self.wire_seconds();
        ((seconds >> 16) as u16, seconds as u16)
    }

    /// Inverse of [`from_words_reversed`](Self::from_words_reversed)
    pub fn words_reversed(&self) -> (u16, u16) {
        let (high, low) = self.words_direct();
        (low, high)
    }

    /// Inverse of [`from_bytes_direct`](Self::from_bytes_direct); the same
    /// layout as [`seconds_array`](Self::seconds_array).
    pub fn bytes_direct(&self) -> [u8; SECONDS_ARRAY_LEN] {
        self.seconds_array()
    }

    /// Inverse of [`from_bytes_reversed`](Self::from_bytes_reversed)
    pub fn bytes_reversed(&self) -> [u8; SECONDS_ARRAY_LEN] {
        let [c0, c1, c2, c3] = self.seconds_array();
        [c2, c3, c0, c1]
    }

    pub fn bytes(&self, order: WordOrder) -> [u8; SECONDS_ARRAY_LEN] {
        match order {
            WordOrder::Direct => self.bytes_direct(),
            WordOrder::Reversed => self.bytes_reversed(),
        }
    }
}

impl From<TimestampCodec> for DateTime<Utc> {
    fn from(codec: TimestampCodec) -> Self {
        codec.instant
    }
}

impl fmt::Display for TimestampCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}
