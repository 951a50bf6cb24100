use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::types::errors::{ParseError, ParseResult};

//------------ Constants -----------------------------------------------------

/// The number of bits in an IPv4 address, and the maximum prefix length.
pub const IPV4_BITS: u8 = 32;

const OCTETS: usize = 4;

//------------ Address Parser ------------------------------------------------

/// Parse dotted-decimal IPv4 text into its 32-bit value, with the first
/// octet in the most significant byte.
///
/// The text must consist of exactly four groups of ASCII digits separated by
/// single dots, each group in the range 0..=255. Anything else results in
/// [ParseError::InvalidAddress].
///
/// ```
/// use ipmatch_trie::addr::parse_address;
///
/// assert_eq!(parse_address("1.2.5.0"), Ok(0x0102_0500));
/// assert!(parse_address("1.2.5").is_err());
/// ```
pub fn parse_address(s: &str) -> ParseResult<u32> {
    let mut addr = 0_u32;
    let mut octets = 0;

    for group in s.split('.') {
        if octets == OCTETS {
            return Err(ParseError::InvalidAddress);
        }
        let octet = parse_decimal(group)
            .and_then(|n| u8::try_from(n).ok())
            .ok_or(ParseError::InvalidAddress)?;
        addr = (addr << 8) | u32::from(octet);
        octets += 1;
    }

    if octets != OCTETS {
        return Err(ParseError::InvalidAddress);
    }

    Ok(addr)
}

/// Parse a decimal prefix length in the range 1..=32 into a contiguous
/// high-order bitmask of that many bits.
///
/// A length of zero, a length over 32, a sign, whitespace or any other
/// non-digit character result in [ParseError::InvalidMask].
pub fn parse_mask_length(s: &str) -> ParseResult<u32> {
    parse_prefix_len(s, false).map(mask_from_len)
}

/// Parse a `<address>/<prefix length>` range into its address and mask.
///
/// The address part is validated before the prefix length, so the first
/// error encountered is the one returned. Host bits below the mask are
/// kept in the returned address; the trie never looks at them.
pub fn parse_cidr(s: &str) -> ParseResult<(u32, u32)> {
    parse_cidr_with(s, false)
}

/// Like [parse_cidr], but optionally accepts a prefix length of zero (the
/// default route), which yields a mask of zero.
pub fn parse_cidr_with(
    s: &str,
    allow_default_route: bool,
) -> ParseResult<(u32, u32)> {
    let (addr, len) = s.split_once('/').ok_or(ParseError::InvalidCidr)?;
    let addr = parse_address(addr)?;
    let len = parse_prefix_len(len, allow_default_route)?;

    Ok((addr, mask_from_len(len)))
}

/// Returns the mask with `len` leading one bits. Lengths over 32 saturate
/// to a full mask.
pub const fn mask_from_len(len: u8) -> u32 {
    match len {
        0 => 0,
        1..=31 => u32::MAX << (IPV4_BITS - len) as u32,
        _ => u32::MAX,
    }
}

/// Returns the prefix length of a contiguous mask, i.e. the number of its
/// leading one bits.
pub const fn len_from_mask(mask: u32) -> u8 {
    mask.leading_ones() as u8
}

fn parse_prefix_len(s: &str, allow_zero: bool) -> ParseResult<u8> {
    let min = if allow_zero { 0 } else { 1 };

    match parse_decimal(s) {
        Some(len) if (min..=IPV4_BITS as u32).contains(&len) => {
            Ok(len as u8)
        }
        _ => Err(ParseError::InvalidMask),
    }
}

// Accumulate a run of ASCII digits, failing on an empty run, on any other
// character, and on overflow. `str::parse` is not used here, because it
// accepts a leading '+'.
fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }

    s.bytes().try_fold(0_u32, |acc, b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

//------------ Ipv4Prefix ----------------------------------------------------

/// A validated IPv4 range: a network address with all host bits cleared,
/// together with its prefix length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Prefix {
    addr: u32,
    len: u8,
}

impl Ipv4Prefix {
    /// Create a prefix from an address and a prefix length. Host bits in
    /// `addr` are cleared. A length over 32 returns
    /// [ParseError::InvalidMask].
    pub fn new(addr: u32, len: u8) -> ParseResult<Self> {
        if len > IPV4_BITS {
            return Err(ParseError::InvalidMask);
        }
        Ok(Self::from_mask(addr, mask_from_len(len)))
    }

    pub(crate) fn from_mask(addr: u32, mask: u32) -> Self {
        Self {
            addr: addr & mask,
            len: len_from_mask(mask),
        }
    }

    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether this is the zero-length prefix, i.e. the default route.
    pub fn is_default_route(&self) -> bool {
        self.len == 0
    }

    /// Same as [is_default_route](Self::is_default_route): a prefix of
    /// length zero selects no bits.
    pub fn is_empty(&self) -> bool {
        self.is_default_route()
    }

    pub fn mask(&self) -> u32 {
        mask_from_len(self.len)
    }

    /// Returns true if `addr` falls within this range.
    pub fn contains(&self, addr: u32) -> bool {
        addr & self.mask() == self.addr
    }

    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.addr)
    }
}

impl FromStr for Ipv4Prefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, mask) = parse_cidr(s)?;
        Ok(Self::from_mask(addr, mask))
    }
}

impl fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.len)
    }
}
