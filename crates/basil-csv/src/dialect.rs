//! Delimiter detection
//!
//! Counts candidate delimiters in the header line, ignoring quoted text.
//! The most frequent candidate wins; ties keep the earlier candidate, and a
//! line without any candidate is read as comma-separated.

/// Delimiters considered during detection, in priority order
pub const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Pick the delimiter used by `header_line`
#[must_use]
pub fn detect_delimiter(header_line: &str) -> u8 {
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;

    for byte in header_line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(i) = CANDIDATE_DELIMITERS.iter().position(|d| *d == byte) {
            counts[i] += 1;
        }
    }

    let mut best = 0;
    for (i, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = i;
        }
    }
    CANDIDATE_DELIMITERS[best]
}

/// First non-blank line of `bytes`, lossily decoded
///
/// The CSV reader skips blank lines before the header, so detection does too.
pub(crate) fn first_line(bytes: &[u8]) -> String {
    bytes
        .split(|b| *b == b'\n')
        .find(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_delimiters() {
        assert_eq!(detect_delimiter("temp,catalyst,yield"), b',');
        assert_eq!(detect_delimiter("temp;catalyst;yield"), b';');
        assert_eq!(detect_delimiter("temp\tcatalyst\tyield"), b'\t');
    }

    #[test]
    fn ignores_quoted_delimiters() {
        assert_eq!(detect_delimiter("\"a,b,c\";x;y"), b';');
    }

    #[test]
    fn single_column_defaults_to_comma() {
        assert_eq!(detect_delimiter("temp"), b',');
        assert_eq!(detect_delimiter(""), b',');
    }

    #[test]
    fn ties_prefer_comma() {
        assert_eq!(detect_delimiter("a,b;c"), b',');
    }

    #[test]
    fn first_line_stops_at_newline() {
        assert_eq!(first_line(b"a;b\r\n1;2\n"), "a;b\r");
        assert_eq!(first_line(b"only"), "only");
    }

    #[test]
    fn first_line_skips_blank_lines() {
        assert_eq!(first_line(b"\n\r\n  \ntemp;yield\n1;2\n"), "temp;yield");
        assert_eq!(first_line(b"\n\n"), "");
        assert_eq!(detect_delimiter(&first_line(b"\ntemp\tyield\n")), b'\t');
    }
}
