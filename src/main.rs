// watchtower - fetch and cache GitHub issue comments.
// Entry point: parses arguments, sets up logging, and runs one operation.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use watchtower::github::{CommentQuery, CommentState};
use watchtower::{Config, UpdateOptions, load_comments, update_comments};

#[derive(Parser)]
#[command(name = "watchtower", version, about)]
struct Cli {
    /// Log per-page progress
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Root directory of cached data (defaults to $WATCHTOWER_DATA or ~/watchtower_data)
    #[arg(long, global = true)]
    data_home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch comments from GitHub and merge them into the cache
    Update(UpdateArgs),
    /// Print cached comments as JSON
    Show(RepoArgs),
}

#[derive(Args)]
struct RepoArgs {
    /// User or organization, e.g. "matplotlib"
    user: String,
    /// Repository name (defaults to the user)
    project: Option<String>,
}

#[derive(Args)]
struct UpdateArgs {
    #[command(flatten)]
    repo: RepoArgs,

    /// Credentials as user:token (defaults to $GITHUB_API)
    #[arg(long)]
    auth: Option<String>,

    #[arg(long, value_enum, default_value_t = StateArg::All)]
    state: StateArg,

    /// Only comments updated at or after this RFC 3339 timestamp
    #[arg(long)]
    since: Option<DateTime<Utc>>,

    #[arg(long, default_value_t = 100)]
    max_page: u32,

    #[arg(long, default_value_t = 500)]
    per_page: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum StateArg {
    All,
    Open,
    Closed,
}

impl From<StateArg> for CommentState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::All => CommentState::All,
            StateArg::Open => CommentState::Open,
            StateArg::Closed => CommentState::Closed,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> watchtower::Result<()> {
    let config = Config::from_env(cli.data_home)?;

    match cli.command {
        Commands::Update(args) => {
            let RepoArgs { user, project } = args.repo;
            let options = UpdateOptions {
                auth: args.auth,
                query: CommentQuery {
                    state: args.state.into(),
                    since: args.since,
                    max_page: args.max_page,
                    per_page: args.per_page,
                    verbose: cli.verbose,
                },
            };

            let cached = update_comments(&config, &user, project.as_deref(), &options).await?;
            let count = cached.map_or(0, |comments| comments.len());
            println!(
                "{}/{}: {} comments cached",
                user,
                project.as_deref().unwrap_or(&user),
                count
            );
        }
        Commands::Show(RepoArgs { user, project }) => {
            let project = project.as_deref().unwrap_or(&user);
            match load_comments(&config, &user, project, CommentState::All)? {
                Some(comments) => println!("{}", serde_json::to_string_pretty(&comments)?),
                None => println!("No cached comments for {}/{}", user, project),
            }
        }
    }

    Ok(())
}
