use std::fmt;

/// Possible errors returned while parsing addresses and ranges. All of these
/// are recoverable: parsing is pure, so retrying the same input will yield
/// the same error, and the table is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not four dot-separated decimal octets in the range
    /// 0..=255. This covers a wrong number of octets, empty octets, stray,
    /// leading, trailing or adjacent dots, non-digit characters and numeric
    /// overflow.
    InvalidAddress,
    /// The prefix length is not a plain decimal number, or it lies outside
    /// 1..=32. A length of zero (the default route) is only accepted when
    /// the matcher is configured to allow it.
    InvalidMask,
    /// The range has no `/` separating the address from the prefix length.
    InvalidCidr,
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::InvalidAddress => {
                write!(f, "Error: Invalid IPv4 address.")
            }
            ParseError::InvalidMask => write!(
                f,
                "Error: Invalid prefix length, expected a number in the \
                range 1..=32."
            ),
            ParseError::InvalidCidr => write!(
                f,
                "Error: Invalid CIDR range, expected \
                '<address>/<prefix length>'."
            ),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
