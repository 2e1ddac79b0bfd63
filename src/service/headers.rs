//! Header line preparation.
//!
//! Config headers are raw `Key: Value` lines. A value wrapped in braces,
//! e.g. `{API_TOKEN}`, is replaced by that environment variable.

/// Headers ready to be applied, plus warnings for lines that were dropped
/// as malformed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PreparedHeaders {
    pub headers: Vec<(String, String)>,
    pub warnings: Vec<String>,
}

/// Parses header lines, resolving `{VAR}` values through `lookup`.
///
/// - A line without `:` is dropped with a warning.
/// - Key and value are trimmed; the split happens on the first colon only.
/// - An unset variable substitutes an empty value.
/// - A header whose key or value ends up empty is dropped silently.
pub fn prepare_headers<F>(lines: &[String], lookup: F) -> PreparedHeaders
where
    F: Fn(&str) -> Option<String>,
{
    let mut prepared = PreparedHeaders::default();

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            prepared.warnings.push(format!(
                "Invalid header format: {}. Expected 'Key: Value'.",
                line
            ));
            continue;
        };

        let key = key.trim();
        let mut value = value.trim().to_string();

        if let Some(name) = value
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            value = lookup(name).unwrap_or_default();
        }

        if key.is_empty() || value.is_empty() {
            continue;
        }
        prepared.headers.push((key.to_string(), value));
    }

    prepared
}
