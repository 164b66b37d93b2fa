//! Generate CODEOWNERS fixtures for benchmarking.
//!
//! Usage: cargo run --release --bin generate-fixtures --features generate -- [output_dir]
//!
//! Writes one `<preset>.codeowners` file per preset plus a `paths.txt` of
//! query paths, using the same presets and seeds as the core benchmarks.

use codeowners_resolver_core::RuleSet;
use codeowners_resolver_core::generate::{GeneratorConfig, generate, generate_paths};
use std::{fs, io, path::Path, path::PathBuf, process::ExitCode};

/// Type alias for fixture preset entries.
type PresetEntry = (&'static str, fn() -> GeneratorConfig);

/// Fixture presets - keep in sync with benches/fixtures.rs
const PRESETS: &[PresetEntry] = &[
    ("small", GeneratorConfig::small),
    ("medium", GeneratorConfig::medium),
    ("large", GeneratorConfig::large),
    ("xlarge", GeneratorConfig::xlarge),
];

/// Number of query paths written to `paths.txt`.
const NUM_PATHS: usize = 1_000;
const PATHS_SEED: u64 = 7;

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benches/cli/fixtures"));

    if let Err(e) = run(&output_dir) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    let paths = generate_paths(NUM_PATHS, PATHS_SEED);

    for (name, config_fn) in PRESETS {
        let config = config_fn();
        let content = generate(&config);
        let path = output_dir.join(format!("{name}.codeowners"));
        fs::write(&path, &content)?;

        let ruleset = RuleSet::parse(&content);
        let owned = paths.iter().filter(|p| ruleset.resolve(p).is_some()).count();
        println!(
            "Generated {} ({} bytes, {} rules, {} comments, {}/{} query paths owned)",
            path.display(),
            content.len(),
            config.num_rules,
            config.num_comments,
            owned,
            paths.len()
        );
    }

    let paths_file = output_dir.join("paths.txt");
    fs::write(&paths_file, paths.join("\n") + "\n")?;
    println!("Generated {} ({} paths)", paths_file.display(), paths.len());

    Ok(())
}
