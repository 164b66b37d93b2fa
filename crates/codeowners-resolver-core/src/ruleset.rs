//! Ordered ownership rules and last-match-wins resolution.

use crate::matching::CompiledPattern;
use crate::parse::{OwnershipRecord, parse_codeowners};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

/// All ownership records of one CODEOWNERS snapshot, in file order.
///
/// Every pattern is compiled once when the set is built. A set is never
/// mutated; a changed file produces a new `RuleSet`.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    records: Vec<OwnershipRecord>,
    /// `None` for patterns that are not valid globs; those never match.
    patterns: Vec<Option<CompiledPattern>>,
}

impl RuleSet {
    /// Builds a rule set from records in file order.
    pub fn new(records: Vec<OwnershipRecord>) -> Self {
        let patterns = records
            .iter()
            .map(|record| match CompiledPattern::compile(&record.pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    warn!("line {}: {}; the rule will never match", record.line(), e);
                    None
                }
            })
            .collect();
        debug!("Built rule set with {} records", records.len());
        Self { records, patterns }
    }

    /// Parses CODEOWNERS text into a rule set.
    pub fn parse(text: &str) -> Self {
        parse_codeowners(text).into_ruleset()
    }

    /// Returns the records in file order.
    pub fn records(&self) -> &[OwnershipRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the set has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `index`.
    pub fn get(&self, index: usize) -> Option<&OwnershipRecord> {
        self.records.get(index)
    }

    fn record_matches(&self, index: usize, path: &str) -> bool {
        self.patterns[index]
            .as_ref()
            .is_some_and(|pattern| pattern.matches(path))
    }

    /// Returns the index of the winning record for `path`.
    ///
    /// Later records override earlier ones, so the scan runs from the end and
    /// stops at the first match.
    pub fn resolve_index(&self, path: &str) -> Option<usize> {
        (0..self.records.len())
            .rev()
            .find(|&index| self.record_matches(index, path))
    }

    /// Returns the record that owns `path`, or `None` if the path is unowned.
    pub fn resolve(&self, path: &str) -> Option<&OwnershipRecord> {
        self.resolve_index(path).map(|index| &self.records[index])
    }

    /// Returns every record matching `path`, in file order. The last one is
    /// the winner.
    pub fn matching_records(&self, path: &str) -> Vec<&OwnershipRecord> {
        (0..self.records.len())
            .filter(|&index| self.record_matches(index, path))
            .map(|index| &self.records[index])
            .collect()
    }

    /// Returns the distinct owner tokens, sorted.
    pub fn teams(&self) -> Vec<String> {
        extract_all_teams(&self.records)
    }

    /// Returns how often each owner token appears across all records.
    pub fn team_stats(&self) -> BTreeMap<String, usize> {
        team_stats(&self.records)
    }
}

/// Parses CODEOWNERS text into a [`RuleSet`].
pub fn load(text: &str) -> RuleSet {
    RuleSet::parse(text)
}

/// Returns the record that owns `path` in `ruleset`.
pub fn resolve<'a>(path: &str, ruleset: &'a RuleSet) -> Option<&'a OwnershipRecord> {
    ruleset.resolve(path)
}

/// Returns the distinct owner tokens across `records`, sorted lexicographically.
pub fn extract_all_teams(records: &[OwnershipRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.owners.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Counts owner occurrences across `records`.
///
/// Every occurrence counts, including an owner repeated within one record.
pub fn team_stats(records: &[OwnershipRecord]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for owner in records.iter().flat_map(|record| record.owners.iter()) {
        *stats.entry(owner.clone()).or_insert(0) += 1;
    }
    stats
}
