//! CODEOWNERS Resolver CLI
//!
//! A command-line tool for finding and changing who owns files in a
//! repository according to its CODEOWNERS file.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode as StdExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::config::{ExitCode, ValidatedConfig};
use cli::output::{
    HumanOutput, JsonEdit, JsonOwnership, JsonRule, JsonSuggestion, team_entries, write_json,
};
use cli::walk::{WalkConfig, list_files};
use cli::{Args, Command};
use codeowners_resolver_core::edit::line_at;
use codeowners_resolver_core::parse::parse_codeowners;
use codeowners_resolver_core::{
    OwnershipEdit, OwnershipRecord, OwnershipService, RuleSetStore, apply_edit, describe_edit,
    suggest_rule,
};

#[tokio::main]
async fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    // Set up signal handling for graceful shutdown
    let terminated = Arc::new(AtomicBool::new(false));
    let terminated_clone = terminated.clone();

    tokio::spawn(async move {
        let ctrl_c = signal::ctrl_c();
        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT, shutting down...");
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down...");
            }
        }

        terminated_clone.store(true, Ordering::SeqCst);
    });

    let exit_code = run(args, &terminated);

    // Check if we were terminated by signal
    if terminated.load(Ordering::SeqCst) {
        return StdExitCode::from(ExitCode::Terminated as u8);
    }

    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run the selected command with the given arguments.
fn run(args: Args, terminated: &AtomicBool) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let use_colors = !args.json && io::stderr().is_terminal();
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let use_colors = !config.json_output && io::stdout().is_terminal();

    debug!("Validated configuration: {:?}", config);
    info!("Repository path: {}", config.repo_path.display());
    info!("CODEOWNERS file: {}", config.codeowners_path.display());

    let content = match config.read_codeowners() {
        Ok(content) => content,
        Err(e) => {
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let parsed = parse_codeowners(&content);
    for warning in &parsed.warnings {
        warn!("{}", warning);
    }
    let mut store = RuleSetStore::new(parsed.into_ruleset());
    info!("Loaded {} rules", store.ruleset().len());
    if args.command.is_mutation() {
        info!("{} will be modified", config.codeowners_path.display());
    }
    if !config.teams.is_empty() {
        debug!("Loaded metadata for {} teams", config.teams.len());
    }

    let ctx = CommandContext {
        config: &config,
        use_colors,
        terminated,
    };

    let result = match &args.command {
        Command::Who {
            paths,
            fail_on_unowned,
        } => run_who(&ctx, &mut store, paths, *fail_on_unowned, &mut stdout),
        Command::Teams => run_teams(&ctx, &store, &mut stdout),
        Command::Ls { unowned } => run_ls(&ctx, &mut store, *unowned, &mut stdout),
        Command::Assign {
            path,
            owner,
            dry_run,
        } => run_assign(&ctx, &mut store, &content, path, owner, *dry_run, &mut stdout),
        Command::Suggest { path, owner } => run_suggest(&ctx, &mut store, path, owner, &mut stdout),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("Command failed: {}", e);
            write_error(&mut stderr, &e, use_colors);
            ExitCode::StartupFailure
        }
    }
}

/// Shared state for command handlers.
struct CommandContext<'a> {
    config: &'a ValidatedConfig,
    use_colors: bool,
    terminated: &'a AtomicBool,
}

type CommandResult = Result<ExitCode, String>;

fn io_failure(e: io::Error) -> String {
    format!("Failed to write output: {}", e)
}

fn run_who<W: Write>(
    ctx: &CommandContext<'_>,
    service: &mut impl OwnershipService,
    paths: &[PathBuf],
    fail_on_unowned: bool,
    out: &mut W,
) -> CommandResult {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let rel = ctx.config.relative_path(path);
        debug!("Resolving {}", rel);
        let winner = service.owners_for(&rel).cloned();
        results.push((rel, winner));
    }

    let unowned = results.iter().filter(|(_, winner)| winner.is_none()).count();
    write_ownerships(ctx, &results, out)?;

    if fail_on_unowned && unowned > 0 {
        info!("{} queried path(s) have no owner", unowned);
        return Ok(ExitCode::QueryFailed);
    }
    Ok(ExitCode::Success)
}

fn write_ownerships<W: Write>(
    ctx: &CommandContext<'_>,
    results: &[(String, Option<OwnershipRecord>)],
    out: &mut W,
) -> Result<(), String> {
    if ctx.config.json_output {
        let entries: Vec<_> = results
            .iter()
            .map(|(path, winner)| JsonOwnership::new(path.as_str(), winner.as_ref()))
            .collect();
        write_json(out, &entries).map_err(io_failure)
    } else {
        let mut output = HumanOutput::new(out, ctx.use_colors);
        for (path, winner) in results {
            output
                .write_ownership(path, winner.as_ref())
                .map_err(io_failure)?;
        }
        Ok(())
    }
}

fn run_teams<W: Write>(
    ctx: &CommandContext<'_>,
    service: &impl OwnershipService,
    out: &mut W,
) -> CommandResult {
    let teams = team_entries(&service.team_counts(), &ctx.config.teams);
    debug!("Found {} teams", teams.len());

    if ctx.config.json_output {
        write_json(out, &teams).map_err(io_failure)?;
    } else {
        HumanOutput::new(out, ctx.use_colors)
            .write_teams(&teams)
            .map_err(io_failure)?;
    }
    Ok(ExitCode::Success)
}

fn run_ls<W: Write>(
    ctx: &CommandContext<'_>,
    service: &mut impl OwnershipService,
    unowned_only: bool,
    out: &mut W,
) -> CommandResult {
    let files = list_files(&ctx.config.repo_path, &WalkConfig::default(), ctx.terminated);
    if ctx.terminated.load(Ordering::SeqCst) {
        return Ok(ExitCode::Terminated);
    }

    let mut results = Vec::new();
    let mut unowned = 0;
    for file in files.iter() {
        let winner = service.owners_for(file).cloned();
        if winner.is_none() {
            unowned += 1;
        } else if unowned_only {
            continue;
        }
        results.push((file.clone(), winner));
    }

    write_ownerships(ctx, &results, &mut *out)?;
    if !ctx.config.json_output {
        HumanOutput::new(out, ctx.use_colors)
            .write_listing_summary(files.len(), unowned)
            .map_err(io_failure)?;
    }
    Ok(ExitCode::Success)
}

fn run_assign<W: Write>(
    ctx: &CommandContext<'_>,
    store: &mut RuleSetStore,
    content: &str,
    path: &Path,
    owner: &str,
    dry_run: bool,
    out: &mut W,
) -> CommandResult {
    let rel = ctx.config.relative_path(path);
    let current = store.owners_for(&rel).cloned();
    let edit = store.plan_change(&rel, owner);
    let message = describe_edit(&edit, &rel, owner, current.as_ref());
    debug!("Planned edit: {}", edit);

    if !ctx.config.json_output {
        let old_line = match &edit {
            OwnershipEdit::ReplaceLine { line, .. } => line_at(content, *line),
            OwnershipEdit::AppendLine { .. } => None,
        };
        HumanOutput::new(&mut *out, ctx.use_colors)
            .write_edit_preview(&edit, old_line, current.as_ref())
            .map_err(io_failure)?;
    }

    if dry_run {
        info!("Dry run, CODEOWNERS left unchanged");
        if ctx.config.json_output {
            write_json(out, &JsonEdit::new(rel, owner, &edit, false, message))
                .map_err(io_failure)?;
        }
        return Ok(ExitCode::Success);
    }

    let updated = apply_edit(content, &edit);
    ctx.config
        .write_codeowners(&updated)
        .map_err(|e| e.to_string())?;
    info!("Wrote {}", ctx.config.codeowners_path.display());

    OwnershipService::reload(store, &updated);

    if ctx.config.json_output {
        write_json(out, &JsonEdit::new(rel, owner, &edit, true, message)).map_err(io_failure)?;
    } else {
        let mut output = HumanOutput::new(out, ctx.use_colors);
        output.write_success(&message).map_err(io_failure)?;
        let winner = store.owners_for(&rel);
        output.write_ownership(&rel, winner).map_err(io_failure)?;
    }
    Ok(ExitCode::Success)
}

fn run_suggest<W: Write>(
    ctx: &CommandContext<'_>,
    service: &mut impl OwnershipService,
    path: &Path,
    owner: &str,
    out: &mut W,
) -> CommandResult {
    let rel = ctx.config.relative_path(path);
    let suggestion = suggest_rule(&rel, owner);
    let current = service.owners_for(&rel);

    if ctx.config.json_output {
        let entry = JsonSuggestion {
            path: rel.clone(),
            current: current.map(JsonRule::from),
            suggestion,
        };
        write_json(out, &entry).map_err(io_failure)?;
    } else {
        HumanOutput::new(out, ctx.use_colors)
            .write_suggestion(current, &suggestion)
            .map_err(io_failure)?;
    }
    Ok(ExitCode::Success)
}

/// Write an error message to the writer.
fn write_error<W: Write>(writer: &mut W, message: &str, use_colors: bool) {
    let _ = HumanOutput::new(writer, use_colors).write_error(message);
}
