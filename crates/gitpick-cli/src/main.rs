use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gitpick_core::{
    CommitRow, Config, FileLogSource, GitCheckout, GitLogSource, GitRunner, LogSource, Outcome,
    Resolver, Smartlog,
};
use serde::Serialize;
use tracing::info;

mod logging;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "gitpick", version)]
#[command(about = "Pick a commit or branch from the smartlog and check it out", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Repository to run git in (defaults to the current directory)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long = "git", global = true)]
    git_binary: Option<String>,
    /// git subcommand producing the graph, e.g. "smartlog"
    #[arg(long, global = true)]
    log_command: Option<String>,
    /// Remote whose tracking branches are checked out only as a last resort
    #[arg(long = "remote", global = true)]
    remote_name: Option<String>,
    /// Read the graph from a file ("-" for stdin) instead of running git
    #[arg(long, global = true)]
    input: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,
    /// Print the parsed commit rows as JSON
    Rows(RowsCmd),
}

#[derive(Debug, Args)]
struct RowsCmd {
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct RowReport<'a> {
    #[serde(flatten)]
    row: CommitRow<'a>,
    target: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.source)?;
    if let Some(log_path) = config.log_file_path()
        && let Err(err) = logging::init(&log_path)
    {
        eprintln!("warning: logging disabled: {err:#}");
    }
    info!(?config, "configuration resolved");

    let repo = resolve_repo(cli.source.repo.clone())?;
    let runner = GitRunner::new(config.git_binary.clone());
    let resolver = Resolver::new(&config.remote_name);

    let mut source: Box<dyn LogSource> = match &cli.source.input {
        Some(path) => Box::new(FileLogSource::new(path)),
        None => Box::new(GitLogSource::new(
            runner.clone(),
            &repo,
            &config.log_command,
        )),
    };
    let smartlog = Smartlog::load(source.as_mut()).context("failed to load the smartlog")?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let mut sink = GitCheckout::new(runner, &repo);
            let outcome = tui::run(&smartlog, resolver, &mut sink)
                .with_context(|| format!("gitpick failed in {}", repo.display()))?;
            report_outcome(&outcome, &sink);
        }
        Commands::Rows(cmd) => {
            let json = rows_json(&smartlog, &resolver, cmd.pretty)
                .context("failed to serialize commit rows")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn rows_json(smartlog: &Smartlog, resolver: &Resolver, pretty: bool) -> Result<String> {
    let rows = smartlog
        .commit_rows()
        .map(|row| {
            let target = resolver.resolve_fields(&row.fields);
            RowReport { row, target }
        })
        .collect::<Vec<_>>();
    let json = if pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    Ok(json)
}

fn load_config(args: &SourceArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;
    if let Some(git_binary) = &args.git_binary {
        config.git_binary = git_binary.clone();
    }
    if let Some(log_command) = &args.log_command {
        config.log_command = log_command.clone();
    }
    if let Some(remote_name) = &args.remote_name {
        config.remote_name = remote_name.clone();
    }
    Ok(config)
}

fn resolve_repo(cli_repo: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(repo) = cli_repo {
        return Ok(repo);
    }
    std::env::current_dir().context("failed to resolve current directory")
}

fn report_outcome(outcome: &Outcome, sink: &GitCheckout) {
    match outcome {
        Outcome::CheckedOut(reference) => {
            if let Some(out) = sink.last_output() {
                let summary = out.summary();
                if !summary.is_empty() {
                    eprintln!("{summary}");
                }
            }
            println!("checked out {reference}");
        }
        Outcome::Unchanged(reference) => eprintln!("already on {reference}"),
        Outcome::Cancelled | Outcome::Interrupted => {}
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;
    use gitpick_core::{Resolver, Smartlog};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::{Cli, Commands, SourceArgs, load_config, rows_json};

    #[test]
    fn no_args_runs_menu_with_defaults() {
        let cli = Cli::parse_from(["gitpick"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.source.repo, None);
        assert_eq!(cli.source.input, None);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["gitpick", "rows", "--pretty", "--input", "log.txt"]);
        assert!(matches!(cli.command, Some(Commands::Rows(ref cmd)) if cmd.pretty));
        assert_eq!(cli.source.input, Some(PathBuf::from("log.txt")));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["gitpick", "frobnicate"]).is_err());
    }

    #[test]
    fn cli_flags_override_config() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "remote_name = \"upstream\"\nlog_command = \"sl\"\n")
            .expect("write config");

        let args = SourceArgs {
            repo: None,
            config: Some(path),
            git_binary: Some("/opt/git".to_string()),
            log_command: None,
            remote_name: Some("fork".to_string()),
            input: None,
        };
        let config = load_config(&args).expect("config");
        assert_eq!(config.git_binary, "/opt/git");
        assert_eq!(config.log_command, "sl");
        assert_eq!(config.remote_name, "fork");
    }

    #[test]
    fn rows_report_spans_and_targets() {
        let log = Smartlog::from_lines([
            "o  a1b2c3d  alice  (origin/main, main)  2 hours ago",
            "|",
            "o",
            "*  e4f5a6b  bob  3 hours ago",
        ])
        .expect("valid log");
        let json = rows_json(&log, &Resolver::default(), false).expect("json");
        let rows: Value = serde_json::from_str(&json).expect("parse json");
        let rows = rows.as_array().expect("array of rows");
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0]["raw_index"], 0);
        assert_eq!(rows[0]["current"], false);
        assert_eq!(rows[0]["target"], "main");
        let fields = rows[0]["fields"].as_object().expect("fields");
        let keys = fields.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["author", "branches", "commit", "time"]);
        assert_eq!(fields["commit"]["text"], "a1b2c3d");
        assert_eq!(fields["commit"]["start"], 3);
        assert_eq!(fields["commit"]["end"], 10);
        assert_eq!(fields["branches"]["text"], "origin/main, main");
        assert_eq!(fields["branches"]["start"], 20);
        assert_eq!(fields["branches"]["end"], 37);

        assert_eq!(rows[1]["raw_index"], 2);
        assert_eq!(rows[1]["fields"], json!({}));
        assert!(rows[1]["target"].is_null());

        assert_eq!(rows[2]["raw_index"], 3);
        assert_eq!(rows[2]["current"], true);
        assert_eq!(rows[2]["target"], "e4f5a6b");
    }

    #[test]
    fn pretty_rows_span_multiple_lines() {
        let log = Smartlog::from_lines(["*  e4f5a6b  bob"]).expect("valid log");
        let compact = rows_json(&log, &Resolver::default(), false).expect("json");
        let pretty = rows_json(&log, &Resolver::default(), true).expect("json");
        assert_eq!(compact.lines().count(), 1);
        assert!(pretty.lines().count() > 1);
        assert_eq!(
            serde_json::from_str::<Value>(&compact).expect("compact"),
            serde_json::from_str::<Value>(&pretty).expect("pretty")
        );
    }
}
