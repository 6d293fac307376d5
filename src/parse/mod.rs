mod lexer;
mod parser;
pub mod scan;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind};

use crate::spec::Spec;

/// Parses dice notation such as `2d6+2, 3d10-1, +5`.
///
/// Whitespace is ignored everywhere, so `1 2d6` reads as `12d6`. Error
/// positions refer to the input with whitespace removed.
pub fn parse(s: &str) -> Result<Spec, ParseError> {
    let stripped = scan::strip_whitespace(s);
    parser::Parser::new(&stripped).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::*;

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(parse(" 2 d 6 + 3 ").unwrap(), spec(vec![dice(2, 6, 3)]));
        assert_eq!(parse("1 2d6").unwrap(), spec(vec![dice(12, 6, 0)]));
        assert_eq!(
            parse("d4 ,\t-1").unwrap(),
            spec(vec![dice(1, 4, 0), flat(-1)])
        );
    }

    #[test]
    fn test_parse_blank() {
        let err = parse(" \t\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptySpec);
        assert!(err.is_malformed());
    }

    #[test]
    fn test_default_count() {
        assert_eq!(parse("d6").unwrap(), parse("1d6").unwrap());
    }
}
