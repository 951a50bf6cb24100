//------------ Config --------------------------------------------------------

//! Configuration options for a [Matcher](super::Matcher).
//!
//! A configuration is created by instantiating [MatcherConfig], setting
//! some fields on it, and passing it in as an argument to
//! [with_config](super::Matcher::with_config).
//!
//! ```
//! use ipmatch_trie::Matcher;
//! use ipmatch_trie::config::MatcherConfig;
//!
//! let config = MatcherConfig::default().allow_default_route(true);
//! let matcher = Matcher::with_config(config);
//!
//! matcher.add("0.0.0.0/0", "ANY")?;
//! assert_eq!(matcher.match_ip("192.0.2.1")?, Some("ANY"));
//! # Ok::<(), ipmatch_trie::errors::ParseError>(())
//! ```

/// Options that change which ranges a matcher accepts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Whether a prefix length of zero, i.e. the default route `0.0.0.0/0`,
    /// may be added. Off by default, in which case it is rejected as an
    /// invalid mask, like any other length outside 1..=32.
    pub allow_default_route: bool,
}

impl MatcherConfig {
    pub fn allow_default_route(mut self, allow: bool) -> Self {
        self.allow_default_route = allow;
        self
    }
}
