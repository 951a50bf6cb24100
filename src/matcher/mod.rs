use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::RwLock;

use crate::prefix_trie::PrefixTrie;
use crate::types::addr::{parse_address, parse_cidr_with, Ipv4Prefix};
use crate::types::errors::ParseResult;
use crate::types::stats::TrieStats;

pub mod config;

use config::MatcherConfig;

//------------ Matcher -------------------------------------------------------

/// A table of IPv4 ranges, each with a value attached, that answers which
/// range most specifically contains a given address.
///
/// Ranges are added in CIDR notation with [add](Self::add), and addresses
/// are looked up in dotted-decimal notation with
/// [match_ip](Self::match_ip). Of all the added ranges that contain the
/// address, the value of the longest (most specific) one is returned.
///
/// ```
/// use ipmatch_trie::Matcher;
///
/// let matcher = Matcher::new();
/// matcher.add("1.2.5.0/24", "BJ")?;
/// matcher.add("1.2.5.1/32", "OF")?;
///
/// assert_eq!(matcher.match_ip("1.2.5.1")?, Some("OF"));
/// assert_eq!(matcher.match_ip("1.2.5.2")?, Some("BJ"));
/// assert_eq!(matcher.match_ip("1.2.6.0")?, None);
/// # Ok::<(), ipmatch_trie::errors::ParseError>(())
/// ```
///
/// # Sharing
///
/// A matcher is a handle to a table. [share](Self::share) (and `clone`)
/// return a second handle to the *same* table, not a copy of it: ranges
/// added through one handle are visible through all others. Build a new
/// matcher to get an independent table.
///
/// The table sits behind a reader-writer lock, so handles can be sent to,
/// and used from, multiple threads. Lookups run concurrently with each
/// other, an [add](Self::add) waits for running lookups to finish, and a
/// lookup never observes a half-inserted range.
pub struct Matcher<V> {
    trie: Arc<RwLock<PrefixTrie<V>>>,
    config: MatcherConfig,
}

impl<V> Matcher<V> {
    /// Creates a matcher with an empty table and the default configuration.
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Matcher {
            trie: Arc::new(RwLock::new(PrefixTrie::new())),
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Attaches `value` to the range `cidr`, e.g. `"1.2.5.0/24"`. If the
    /// range was added before, its value is replaced.
    ///
    /// Fails if `cidr` is malformed, in which case the table is left
    /// untouched. Host bits below the prefix length are ignored.
    pub fn add(&self, cidr: &str, value: V) -> ParseResult<()> {
        let (addr, mask) =
            parse_cidr_with(cidr, self.config.allow_default_route)
                .inspect_err(|err| {
                    debug!("rejected range {:?}: {}", cidr, err)
                })?;

        trace!("add {}", Ipv4Prefix::from_mask(addr, mask));
        self.trie.write().insert(addr, mask, value);
        Ok(())
    }

    /// Adds all `(cidr, value)` pairs in order, as with
    /// [add](Self::add), and returns the number of ranges added.
    ///
    /// Stops at the first malformed range and returns its error. The ranges
    /// before it stay in the table.
    pub fn add_all<I, S>(&self, ranges: I) -> ParseResult<usize>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
    {
        let mut count = 0;
        for (cidr, value) in ranges {
            self.add(cidr.as_ref(), value)?;
            count += 1;
        }
        debug!("added {} ranges", count);
        Ok(count)
    }

    /// Looks up the dotted-decimal address `ip` and hands the value of the
    /// longest matching range, if any, to `f`. Useful for values that are
    /// expensive, or impossible, to clone.
    ///
    /// # Deadlocks
    ///
    /// The table stays read-locked while `f` runs. `f` must not call
    /// [add](Self::add) or [add_all](Self::add_all) on this matcher, or on
    /// any handle that shares its table: the write lock they wait for can
    /// only be granted after `f` returns, so the thread hangs forever.
    /// Lookups from within `f` are fine, they take the read lock
    /// recursively, even while another thread is waiting to write. Collect
    /// what `f` needs and add ranges after `match_with` has returned.
    pub fn match_with<R>(
        &self,
        ip: &str,
        f: impl FnOnce(Option<&V>) -> R,
    ) -> ParseResult<R> {
        let addr = self.parse_ip(ip)?;
        let trie = self.trie.read_recursive();
        Ok(f(trie.find(addr)))
    }

    /// Returns a second handle to the same table. No ranges are copied.
    pub fn share(&self) -> Self {
        Matcher {
            trie: Arc::clone(&self.trie),
            config: self.config,
        }
    }

    /// The number of handles, this one included, that share this table.
    pub fn handles(&self) -> usize {
        Arc::strong_count(&self.trie)
    }

    /// Returns true if both handles refer to the same table.
    pub fn same_table(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.trie, &b.trie)
    }

    /// The number of distinct ranges in the table.
    pub fn prefixes_len(&self) -> usize {
        self.trie.read().prefixes_len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes_len() == 0
    }

    /// A snapshot of the node and prefix counters of the table.
    pub fn stats(&self) -> TrieStats {
        self.trie.read().stats().clone()
    }

    fn parse_ip(&self, ip: &str) -> ParseResult<u32> {
        parse_address(ip)
            .inspect_err(|err| debug!("rejected address {:?}: {}", ip, err))
    }
}

impl<V: Clone> Matcher<V> {
    /// Returns the value of the longest range that contains the
    /// dotted-decimal address `ip`, or `None` if no range contains it.
    ///
    /// Fails only if `ip` is malformed: not finding a range is not an
    /// error.
    pub fn match_ip(&self, ip: &str) -> ParseResult<Option<V>> {
        self.match_with(ip, |value| value.cloned())
    }

    /// Like [match_ip](Self::match_ip), for an address that is already
    /// parsed, and thus cannot fail.
    pub fn match_ipv4(&self, ip: Ipv4Addr) -> Option<V> {
        self.trie.read().find(u32::from(ip)).cloned()
    }

    /// Like [match_ip](Self::match_ip), but also returns the range that
    /// matched.
    pub fn match_prefix(
        &self,
        ip: &str,
    ) -> ParseResult<Option<(Ipv4Prefix, V)>> {
        let addr = self.parse_ip(ip)?;
        let trie = self.trie.read();

        Ok(trie.find_longest(addr).and_then(|(len, value)| {
            Ipv4Prefix::new(addr, len)
                .ok()
                .map(|prefix| (prefix, value.clone()))
        }))
    }
}

impl<V> Clone for Matcher<V> {
    /// Same as [share](Self::share): the clone refers to the same table.
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<V> Default for Matcher<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Matcher<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("config", &self.config)
            .field("handles", &self.handles())
            .field("prefixes", &self.prefixes_len())
            .finish()
    }
}

//------------ Tests ---------------------------------------------------------
