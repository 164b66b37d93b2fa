//! Random CODEOWNERS file generation for benchmarking and testing.
//!
//! Rules are built as [`OwnershipRecord`]s and rendered through their
//! `Display` impl, so generated text always parses back into the same rules.
//! [`generate_paths`] draws query paths from the same vocabulary, so a good
//! share of them hit generated rules.

use crate::parse::{OwnershipRecord, Span};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt::Write;

/// Configuration for generating CODEOWNERS files.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of rule lines to generate.
    pub num_rules: usize,
    /// Number of comment lines to generate.
    pub num_comments: usize,
    /// Maximum owners per rule (1-4 typical).
    pub max_owners_per_rule: usize,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_rules: 100,
            num_comments: 20,
            max_owners_per_rule: 4,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with specified rules and proportional comments.
    ///
    /// Comments are set to ~20% of rules (minimum 0).
    pub fn new(num_rules: usize) -> Self {
        Self {
            num_rules,
            num_comments: num_rules / 5,
            ..Default::default()
        }
    }

    /// Small fixture (~10 rules).
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Medium fixture (~100 rules).
    pub fn medium() -> Self {
        Self::new(100)
    }

    /// Large fixture (~1000 rules).
    pub fn large() -> Self {
        Self::new(1_000)
    }

    /// Extra large fixture (~10k rules).
    pub fn xlarge() -> Self {
        Self::new(10_000)
    }

    /// Generate a file targeting approximately the given byte size.
    pub fn target_bytes(bytes: usize) -> Self {
        // Average line is ~50 bytes
        Self::new(bytes.saturating_div(50).max(1))
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of comments explicitly.
    pub fn with_comments(mut self, num_comments: usize) -> Self {
        self.num_comments = num_comments;
        self
    }

    /// Set the maximum owners per rule.
    pub fn with_max_owners(mut self, max: usize) -> Self {
        self.max_owners_per_rule = max.max(1);
        self
    }
}

mod vocabulary {
    pub const PATTERN_TEMPLATES: &[&str] = &[
        "*",
        "*.{ext}",
        "**/*.{ext}",
        "/{dir}/",
        "{dir}/",
        "/{dir}/**",
        "/{dir}/*.{ext}",
        "/{dir}/file.{ext}",
        "/src/{dir}/",
        "/src/**/*.{ext}",
        "/{dir}/**/test_*.{ext}",
        "docs/**/*.md",
    ];

    pub const EXTENSIONS: &[&str] = &["rs", "py", "js", "ts", "go", "md", "yaml", "json", "toml"];
    pub const DIRECTORIES: &[&str] = &[
        "src", "lib", "tests", "docs", "config", "scripts", "api", "core",
    ];
    pub const FILE_STEMS: &[&str] = &["file", "mod", "index", "test_example", "README"];
    pub const USERNAMES: &[&str] = &["alice", "bob", "charlie", "dev", "maintainer", "reviewer"];
    pub const ORGS: &[&str] = &["acme", "github", "myorg"];
    pub const TEAMS: &[&str] = &["core", "platform", "frontend", "backend", "infra", "docs"];
    pub const SECTION_NAMES: &[&str] = &["Frontend", "Backend", "Infrastructure", "Documentation"];
}

/// Owner type distribution weights (must sum to 100).
const WEIGHT_USER: u32 = 50;
const WEIGHT_TEAM: u32 = 30;
// Remaining weight (20) goes to email

/// Probability of inserting a comment section header (percentage).
const COMMENT_PROBABILITY: u32 = 20;

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Generates random ownership records.
///
/// Records carry a default span; parse the rendered text if line numbers
/// matter.
pub fn generate_records(config: &GeneratorConfig) -> Vec<OwnershipRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.num_rules)
        .map(|_| generate_record(&mut rng, config.max_owners_per_rule.max(1)))
        .collect()
}

fn generate_record(rng: &mut StdRng, max_owners: usize) -> OwnershipRecord {
    use vocabulary::*;

    let template = pick(rng, PATTERN_TEMPLATES);
    let ext = pick(rng, EXTENSIONS);
    let dir = pick(rng, DIRECTORIES);
    let pattern = template.replace("{ext}", ext).replace("{dir}", dir);

    let num_owners = rng.random_range(1..=max_owners);
    let owners = (0..num_owners).map(|_| generate_owner(rng)).collect();
    OwnershipRecord::new(pattern, owners, Span::default())
}

/// Generate a random owner based on weighted distribution.
fn generate_owner(rng: &mut StdRng) -> String {
    use vocabulary::*;

    let roll = rng.random_range(0..100);

    if roll < WEIGHT_USER {
        format!("@{}", pick(rng, USERNAMES))
    } else if roll < WEIGHT_USER + WEIGHT_TEAM {
        format!("@{}/{}", pick(rng, ORGS), pick(rng, TEAMS))
    } else {
        format!("{}@example.com", pick(rng, USERNAMES))
    }
}

/// Generates a CODEOWNERS file as a string.
pub fn generate(config: &GeneratorConfig) -> String {
    use vocabulary::*;

    // Separate stream so comment placement does not shift the rules.
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let mut out = String::with_capacity(config.num_rules * 50);
    out.push_str("# Auto-generated CODEOWNERS for benchmarking\n\n");

    let mut comments_added = 0;
    for (i, record) in generate_records(config).iter().enumerate() {
        if comments_added < config.num_comments
            && i > 0
            && rng.random_ratio(COMMENT_PROBABILITY, 100)
        {
            let _ = write!(out, "\n# {} section\n", pick(&mut rng, SECTION_NAMES));
            comments_added += 1;
        }
        let _ = writeln!(out, "{}", record);
    }
    out
}

/// Generates `count` repository-relative file paths from the generator's
/// vocabulary.
pub fn generate_paths(count: usize, seed: u64) -> Vec<String> {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let depth = rng.random_range(0..4);
            let mut path = String::new();
            for _ in 0..depth {
                path.push_str(pick(&mut rng, DIRECTORIES));
                path.push('/');
            }
            let stem = pick(&mut rng, FILE_STEMS);
            let ext = pick(&mut rng, EXTENSIONS);
            let _ = write!(path, "{}.{}", stem, ext);
            path
        })
        .collect()
}
