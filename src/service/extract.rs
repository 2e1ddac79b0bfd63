//! JSON path extraction.
//!
//! Paths use the GJSON syntax:
//!
//! | Path | Meaning |
//! |------|---------|
//! | `data.status` | nested object keys |
//! | `items.0.name` | array index |
//! | `items.#` | array length |
//! | `items.#.name` | `name` of every element, as a JSON array |
//! | `items.#(name=="db").state` | first element matching a query |
//! | `a\.b` | key containing a literal dot |
//!
//! The body is scanned as raw text, so values elsewhere in the document
//! never affect a match. Extraction is total: anything that does not
//! resolve yields `""`.

use gjson::Kind;

/// Evaluates `path` against a JSON `body` and renders the match as text.
///
/// Strings yield their contents, booleans `true`/`false`, objects and
/// arrays their raw JSON. Integers keep their source digits; other
/// numbers are printed in plain decimal (`1.0` as `1`, `1e3` as `1000`).
/// `null`, a missing path or a body that is not JSON yield an empty string.
pub fn extract(body: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let value = gjson::get(body, path);
    match value.kind() {
        Kind::Null => String::new(),
        Kind::True => "true".to_string(),
        Kind::False => "false".to_string(),
        Kind::String => value.str().to_string(),
        Kind::Number => render_number(value.json(), value.f64()),
        Kind::Array | Kind::Object => value.json().to_string(),
    }
}

fn render_number(raw: &str, parsed: f64) -> String {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    if parsed.is_infinite() {
        return if parsed > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    format!("{}", parsed)
}
