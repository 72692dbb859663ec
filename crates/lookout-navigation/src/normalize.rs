//! Address bar input normalization
//!
//! Text typed into the address bar is turned into something the session can
//! load. The scheme check is deliberately loose: any run of non-colon
//! characters followed by `://` at the start of the input counts as a scheme,
//! so `example.com/?next=http://x` is left alone apart from case folding.

/// Scheme prepended when the input has none
pub const DEFAULT_SCHEME: &str = "http://";

/// Returns true if the input starts with `<non-colon chars>://`
pub fn has_scheme(input: &str) -> bool {
    match input.find(':') {
        Some(idx) if idx > 0 => input[idx..].starts_with("://"),
        _ => false,
    }
}

/// Normalize raw address bar text into a URL.
///
/// Never fails. The whole result is lower-cased, path and query included.
pub fn normalize_url(input: &str) -> String {
    let url = if has_scheme(input) {
        input.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, input)
    };

    url.to_lowercase()
}
