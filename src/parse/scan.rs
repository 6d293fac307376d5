use crate::common::{UInt, MAX_LITERAL};

/// The literal does not fit below [`MAX_LITERAL`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Overflow;

pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Scans a run of ASCII digits, failing as soon as the value would exceed
/// [`MAX_LITERAL`].
pub fn scan_uint(digits: &str) -> Result<UInt, Overflow> {
    let mut value: UInt = 0;
    for b in digits.bytes() {
        debug_assert!(b.is_ascii_digit());
        let digit = UInt::from(b - b'0');
        if value > (MAX_LITERAL - digit) / 10 {
            return Err(Overflow);
        }
        value = value * 10 + digit;
    }
    Ok(value)
}
