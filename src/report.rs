use std::fmt;

use chrono::FixedOffset;
use tscodec::{DurationParts, InvalidArgument, TimestampCodec, WordOrder, date_utils};

use crate::config::Config;
use crate::payload::{Payload, PayloadError};

fn format_data_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Everything worth knowing about one decoded timestamp
#[derive(Debug, Clone)]
pub struct TimestampReport {
    pub codec: TimestampCodec,
    pub order: WordOrder,
    pub offset: FixedOffset,
    pub local: String,
    /// Time from the decoded value to the reference, negative if it lies ahead
    pub age: DurationParts,
}

impl TimestampReport {
    pub fn new(codec: TimestampCodec, config: &Config, reference: &TimestampCodec) -> Result<Self, InvalidArgument> {
        let offset = config
            .display
            .offset()
            .ok_or(InvalidArgument::OutOfRange(config.display.utc_offset_minutes as i64))?;
        let local = date_utils::format_with_offset(codec.instant(), &config.display.pattern, offset)?;

        Ok(Self {
            codec,
            order: config.decoding.word_order,
            offset,
            local,
            age: DurationParts::between(&codec, reference),
        })
    }

    /// Parse, decode and describe one command-line token
    pub fn from_token(token: &str, config: &Config, reference: &TimestampCodec) -> Result<Self, PayloadError> {
        let payload: Payload = token.parse()?;
        let codec = payload.decode(config.decoding.word_order)?;
        Ok(Self::new(codec, config, reference)?)
    }
}

impl fmt::Display for TimestampReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codec = &self.codec;
        let (first, second) = match self.order {
            WordOrder::Direct => codec.words_direct(),
            WordOrder::Reversed => codec.words_reversed(),
        };

        writeln!(f, "  Timestamp: {}", codec)?;
        writeln!(f, "      Local: {} ({})", self.local, self.offset)?;
        writeln!(f, "    Seconds: {} [{}]", codec.seconds(), format_data_bytes(&codec.seconds_array()))?;
        writeln!(f, "     Millis: {} [{}]", codec.millis(), format_data_bytes(&codec.millis_array()))?;
        writeln!(
            f,
            "       Wire: {} words {:04X}:{:04X} bytes [{}]",
            self.order,
            first,
            second,
            format_data_bytes(&codec.bytes(self.order))
        )?;
        write!(f, "        Age: {}", self.age)
    }
}
