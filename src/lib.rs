#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

//! A library that answers, for an IPv4 address, which of a set of
//! registered CIDR ranges most specifically contains it, and what value was
//! attached to that range: a longest-prefix-match table, as used in routing
//! tables, allow and deny lists, and geo-tagging.
//!
//! The table is a binary prefix trie, keyed bit by bit from the most
//! significant bit of an address. Ranges and addresses are parsed from their
//! text forms, `"1.2.5.0/24"` and `"1.2.5.1"`, with strict validation.
//!
//! ```
//! use ipmatch_trie::Matcher;
//!
//! let matcher = Matcher::new();
//! matcher.add("210.32.122.192/27", "HZ")?;
//!
//! assert_eq!(matcher.match_ip("210.32.122.222")?, Some("HZ"));
//! assert_eq!(matcher.match_ip("210.32.122.224")?, None);
//! # Ok::<(), ipmatch_trie::errors::ParseError>(())
//! ```
//!
//! IPv6, removing ranges, and persisting or iterating over a table are not
//! supported.
mod matcher;
mod prefix_trie;
mod types;

// Public Interfaces on the root of the crate

/// The table of ranges, and its configuration
pub use matcher::{config, Matcher};

/// The unsynchronized trie that backs a [Matcher]
pub use prefix_trie::PrefixTrie;

/// Parsing of IPv4 addresses, prefix lengths and CIDR ranges
pub use types::addr;

/// The range type returned by [Matcher::match_prefix]
pub use types::addr::Ipv4Prefix;

/// Error types returned by the parsers and the [Matcher]
pub use types::errors;

/// Statistics returned by [Matcher::stats] and [PrefixTrie::stats]
pub use types::stats;
