use std::fmt::Display;

use thiserror::Error;

pub(crate) struct NumberParser;

pub(crate) struct ParsedNumber {
    pub(crate) value: f64,
    pub(crate) literal_len: usize,
}

#[derive(Error, Debug)]
pub(crate) struct NumberParseError {
    pub(crate) expected: &'static str,
    pub(crate) found: String,
    pub(crate) span: std::ops::Range<usize>,
}

impl Display for NumberParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected {}, found '{}'", self.expected, self.found)
    }
}

impl NumberParser {
    /// Scans a decimal literal (`12`, `1.5`, `.5`, `2.`, `6.02e23`, `1E-3`) from the start of
    /// `slice`. The literal may not run straight into a letter, underscore or second dot.
    pub(crate) fn parse_number(slice: &[u8]) -> Result<ParsedNumber, NumberParseError> {
        let error = |expected, end: usize| NumberParseError {
            expected,
            found: String::from_utf8_lossy(&slice[..end.min(slice.len())]).into_owned(),
            span: 0..end.min(slice.len()),
        };

        let integer_digits = count_digits(slice);
        let mut end = integer_digits;

        let mut fraction_digits = 0;
        if slice.get(end) == Some(&b'.') {
            fraction_digits = count_digits(&slice[end + 1..]);
            end += 1 + fraction_digits;
        }

        if integer_digits == 0 && fraction_digits == 0 {
            return Err(error("digits in number literal", end.max(1)));
        }

        if matches!(slice.get(end), Some(b'e' | b'E')) {
            let mut exponent_end = end + 1;
            if matches!(slice.get(exponent_end), Some(b'+' | b'-')) {
                exponent_end += 1;
            }

            let exponent_digits = count_digits(&slice[exponent_end..]);
            if exponent_digits == 0 {
                return Err(error("digits after the exponent marker", exponent_end + 1));
            }

            end = exponent_end + exponent_digits;
        }

        // Let's check that the end here makes sense (e.g. no "3x" or "1.2.3")
        match slice.get(end) {
            Some(c) if c.is_ascii_alphanumeric() || *c == b'_' || *c == b'.' => {
                return Err(error("an operator or ')' after number literal", end + 1));
            }
            _ => {}
        }

        let value: f64 = std::str::from_utf8(&slice[..end])
            .ok()
            .and_then(|literal| literal.parse().ok())
            .ok_or_else(|| error("a valid number literal", end))?;

        // Overflowing literals like `1e400` would become infinity, which cannot be printed back
        if !value.is_finite() {
            return Err(error("a finite number literal", end));
        }

        Ok(ParsedNumber {
            value,
            literal_len: end,
        })
    }
}

fn count_digits(slice: &[u8]) -> usize {
    slice.iter().take_while(|c| c.is_ascii_digit()).count()
}
