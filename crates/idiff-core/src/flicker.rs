use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::consts::DEFAULT_FLICKER;
use crate::error::{IdiffError, Result};

/// Interval between alternating images, given as `<number>s` or `<number>ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlickerInterval(Duration);

impl FlickerInterval {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || IdiffError::InvalidDuration {
            input: input.to_string(),
        };
        let trimmed = input.trim();
        let (number, millis) = if let Some(n) = trimmed.strip_suffix("ms") {
            (n, true)
        } else if let Some(n) = trimmed.strip_suffix('s') {
            (n, false)
        } else {
            return Err(invalid());
        };

        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        let seconds = if millis { value / 1000.0 } else { value };
        Duration::try_from_secs_f64(seconds)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for FlickerInterval {
    fn default() -> Self {
        Self::parse(DEFAULT_FLICKER).unwrap_or(Self(Duration::from_secs(1)))
    }
}

impl FromStr for FlickerInterval {
    type Err = IdiffError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FlickerInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.subsec_nanos();
        if nanos == 0 {
            write!(f, "{}s", self.0.as_secs())
        } else if nanos % 1_000_000 == 0 {
            write!(f, "{}ms", self.0.as_millis())
        } else {
            // Sub-millisecond precision, written as exact decimal seconds.
            let fraction = format!("{nanos:09}");
            write!(f, "{}.{}s", self.0.as_secs(), fraction.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_millisecond_intervals_display_exactly() {
        let interval = FlickerInterval(Duration::from_micros(500));
        assert_eq!(interval.to_string(), "0.0005s");

        let interval = FlickerInterval(Duration::new(2, 250_001_000));
        assert_eq!(interval.to_string(), "2.250001s");
    }
}
