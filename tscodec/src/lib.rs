//! Timestamp codec library
//!
//! Converts between calendar instants, epoch seconds/milliseconds and the
//! compact encodings devices put on the wire:
//! - two 16-bit words, high-order first (direct) or low-order first (reversed)
//! - a 4-byte array carrying the same two words
//! - big-endian 4-byte seconds and 8-byte milliseconds arrays
//!
//! Formatting, field extraction and duration decomposition helpers live
//! beside the codec.
//!
//! # Example
//!
//! ```
//! use tscodec::{TimestampCodec, WordOrder};
//!
//! let codec = TimestampCodec::from_bytes(WordOrder::Reversed, &[0x89, 0x8b, 0x58, 0x7f]).unwrap();
//! assert_eq!(codec.seconds(), 0x587f898b);
//! assert_eq!(codec.to_string(), "2017-01-18T15:28:11Z");
//! ```

pub mod clock;
pub mod codec;
pub mod date_utils;
pub mod duration;
pub mod error;

// Re-export commonly used types
pub use codec::{TimestampCodec, WordOrder, swap_words4};
pub use duration::DurationParts;
pub use error::InvalidArgument;
