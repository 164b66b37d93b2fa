//! An owned rule set with a time-boxed per-path result cache.
//!
//! The store replaces process-wide state: callers own a `RuleSetStore`, query
//! it, and call [`RuleSetStore::reload`] when the CODEOWNERS file changes.
//! Reload swaps the rule set and clears the cache inside one `&mut self`
//! call, so a host that shares the store behind a lock never observes a new
//! rule set with old cache entries or the reverse.

use crate::clock::{Clock, SystemClock};
use crate::parse::OwnershipRecord;
use crate::ruleset::RuleSet;
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// How long a cached result stays valid.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Cache size at which a miss first purges expired entries.
pub const DEFAULT_PURGE_THRESHOLD: usize = 4096;

/// Configuration options for a [`RuleSetStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Age after which a cached result is recomputed.
    pub ttl: Duration,
    /// Once the cache holds this many entries, a miss purges expired ones
    /// before inserting.
    pub purge_threshold: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            purge_threshold: DEFAULT_PURGE_THRESHOLD,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the cache size that triggers purging on a miss.
    pub fn with_purge_threshold(mut self, threshold: usize) -> Self {
        self.purge_threshold = threshold;
        self
    }
}

/// A cached resolution: the index of the winning record (or none) and when
/// it was computed.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    index: Option<usize>,
    created: Instant,
}

/// Owns the active [`RuleSet`] and a cache of resolutions keyed by path.
pub struct RuleSetStore {
    ruleset: RuleSet,
    cache: HashMap<String, CacheEntry>,
    config: StoreConfig,
    clock: Box<dyn Clock>,
    generation: u64,
}

impl RuleSetStore {
    /// Creates a store around `ruleset` using the system clock.
    pub fn new(ruleset: RuleSet) -> Self {
        Self {
            ruleset,
            cache: HashMap::new(),
            config: StoreConfig::default(),
            clock: Box::new(SystemClock),
            generation: 0,
        }
    }

    /// Creates a store from CODEOWNERS text.
    pub fn from_text(text: &str) -> Self {
        Self::new(RuleSet::parse(text))
    }

    /// Sets the store configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the clock used for cache expiry.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Returns the active rule set.
    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of times the rule set has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Re-parses `text` and makes it the active rule set.
    pub fn reload(&mut self, text: &str) {
        self.replace(RuleSet::parse(text));
    }

    /// Makes `ruleset` the active rule set and drops every cached result.
    pub fn replace(&mut self, ruleset: RuleSet) {
        self.ruleset = ruleset;
        self.cache.clear();
        self.generation += 1;
        debug!(
            "Rule set replaced (generation {}, {} records)",
            self.generation,
            self.ruleset.len()
        );
    }

    /// Returns the record that owns `path`, reusing a cached result if it is
    /// younger than the configured TTL.
    pub fn resolve(&mut self, path: &str) -> Option<&OwnershipRecord> {
        let now = self.clock.now();
        let ttl = self.config.ttl;
        let cached = self
            .cache
            .get(path)
            .filter(|entry| now.saturating_duration_since(entry.created) < ttl)
            .map(|entry| entry.index);

        let index = match cached {
            Some(index) => {
                trace!("Cache hit for {}", path);
                index
            }
            None => {
                trace!("Cache miss for {}", path);
                if self.cache.len() >= self.config.purge_threshold {
                    self.purge_expired();
                }
                let index = self.ruleset.resolve_index(path);
                self.cache.insert(
                    path.to_string(),
                    CacheEntry {
                        index,
                        created: now,
                    },
                );
                index
            }
        };
        index.and_then(|index| self.ruleset.get(index))
    }

    /// Drops every cached result.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Drops cached results older than the TTL.
    pub fn purge_expired(&mut self) {
        let now = self.clock.now();
        let ttl = self.config.ttl;
        let before = self.cache.len();
        self.cache
            .retain(|_, entry| now.saturating_duration_since(entry.created) < ttl);
        trace!("Purged {} expired entries", before - self.cache.len());
    }

    /// Returns the number of cached paths, including expired entries not yet
    /// purged.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for RuleSetStore {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

impl fmt::Debug for RuleSetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSetStore")
            .field("ruleset", &self.ruleset)
            .field("cached", &self.cache.len())
            .field("config", &self.config)
            .field("clock", &"<dyn Clock>")
            .field("generation", &self.generation)
            .finish()
    }
}
