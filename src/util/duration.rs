//! Duration string parser for refresh intervals.
//!
//! Accepts the same grammar as Go's `time.ParseDuration`, which is what
//! existing config files are written in:
//! - Single unit: `30s`, `500ms`, `2h`
//! - Fractions: `1.5h`, `.5s`
//! - Compound: `2h45m`, `1m30.5s`
//! - Bare zero: `0`
//!
//! Units: `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`.

use std::time::Duration;

/// Error type for duration parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationParseError {
    pub input: String,
    pub message: String,
}

impl DurationParseError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to parse duration '{}': {}",
            self.input, self.message
        )
    }
}

impl std::error::Error for DurationParseError {}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest magnitude Go can represent (`i64::MAX` nanoseconds, ~292 years).
const MAX_NANOS: u128 = i64::MAX as u128;

/// Parse a duration string such as `"1m30s"` into a [`Duration`].
///
/// Negative values are rejected (a `Duration` cannot hold them); `-0s` is
/// accepted and yields zero.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use charming::util::parse_duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
/// assert!(parse_duration("soon").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let mut rest = input;
    let mut negative = false;

    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationParseError::new(input, "empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (nanos, remaining) = parse_term(input, rest)?;
        total = total
            .checked_add(nanos)
            .filter(|t| *t <= MAX_NANOS)
            .ok_or_else(|| DurationParseError::new(input, "duration out of range"))?;
        rest = remaining;
    }

    if negative && total > 0 {
        return Err(DurationParseError::new(input, "negative duration"));
    }

    let secs = (total / NANOS_PER_SEC) as u64;
    let nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}

/// Parses one `<decimal><unit>` term and returns its length in nanoseconds
/// together with the unparsed remainder.
fn parse_term<'a>(input: &str, s: &'a str) -> Result<(u128, &'a str), DurationParseError> {
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let (int_digits, mut rest) = s.split_at(int_len);

    let mut frac_digits = "";
    if let Some(after_dot) = rest.strip_prefix('.') {
        let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
        frac_digits = &after_dot[..frac_len];
        rest = &after_dot[frac_len..];
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(DurationParseError::new(input, "expected a number"));
    }

    let unit_len = rest
        .char_indices()
        .find(|(_, c)| *c == '.' || c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    let (unit, rest) = rest.split_at(unit_len);

    if unit.is_empty() {
        return Err(DurationParseError::new(
            input,
            "missing unit (use ns, us, ms, s, m or h)",
        ));
    }

    let scale = unit_nanos(unit)
        .ok_or_else(|| DurationParseError::new(input, format!("unknown unit '{}'", unit)))?;

    let whole: u128 = if int_digits.is_empty() {
        0
    } else {
        int_digits
            .parse::<u128>()
            .map_err(|_| DurationParseError::new(input, "duration out of range"))?
    };

    let mut nanos = whole
        .checked_mul(scale)
        .filter(|n| *n <= MAX_NANOS)
        .ok_or_else(|| DurationParseError::new(input, "duration out of range"))?;

    // Digits past nanosecond precision cannot change the result.
    let mut frac_scale = scale;
    for digit in frac_digits.bytes() {
        if frac_scale < 10 {
            break;
        }
        frac_scale /= 10;
        nanos += u128::from(digit - b'0') * frac_scale;
    }

    Ok((nanos, rest))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}
