//! Command-line entry point for the board and workspace bootstrap tool.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use slack::SlackClient;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use trello::TrelloClient;

use boardctl::board::{BoardLocator, DEFAULT_BOARD_NAME};
use boardctl::cmd;
use boardctl::secrets::Secrets;

#[derive(Parser)]
#[command(name = "boardctl", author, version, about = "Bootstrap and reorganize the team's Trello board and Slack workspace", long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the secrets file
    #[arg(long, global = true, default_value = "secrets.json")]
    secrets: PathBuf,

    /// Board name used when no explicit board id or short link is configured
    #[arg(long, global = true, default_value = DEFAULT_BOARD_NAME)]
    board_name: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restructure the board to Backlog / Week A / Week B / Blocked / Done
    Restructure,
    /// Add an Admin / Setup list and move setup cards into it
    AdminSplit,
    /// Tag non-admin cards with the Transportation label
    Label,
    /// Add phase placeholder cards from the process data
    Phases {
        /// Path to the sprint process data file
        #[arg(long, default_value = "data/sprint_process.json")]
        data: PathBuf,
    },
    /// Create (or extend) the sprint board with per-phase lists and templates
    CreateBoard {
        /// Path to the sprint process data file
        #[arg(long, default_value = "data/sprint_process.json")]
        data: PathBuf,
    },
    /// Seed the weekly working cards into a list
    AddCards {
        /// Target list name
        #[arg(long, env = "TRELLO_LIST_NAME", default_value = cmd::add_cards::DEFAULT_TARGET_LIST)]
        list: String,
    },
    /// Create the team's Slack channels with topics
    SlackSetup,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "boardctl=debug,trello=debug,slack=debug,info"
    } else {
        "boardctl=info,trello=info,slack=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Progress goes to stdout via println; logs stay on stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Build a Trello client and resolve the target board for board-scoped
/// commands.
async fn trello_board(
    secrets: &Secrets,
    locator: BoardLocator,
) -> Result<(TrelloClient, String)> {
    let creds = secrets.trello_credentials()?;
    let client = TrelloClient::new(&creds.key, &creds.token)?;
    let board_id = locator.resolve(&client).await?;
    Ok((client, board_id))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let secrets = Secrets::load(&cli.secrets);

    match cli.command {
        Commands::Restructure => {
            let locator = BoardLocator::from_env(&cli.board_name);
            let (client, board_id) = trello_board(&secrets, locator).await?;
            cmd::restructure::run(&client, &board_id).await
        }
        Commands::AdminSplit => {
            let locator = BoardLocator::from_env(&cli.board_name);
            let (client, board_id) = trello_board(&secrets, locator).await?;
            cmd::admin_split::run(&client, &board_id).await
        }
        Commands::Label => {
            let locator = BoardLocator::from_env(&cli.board_name);
            let (client, board_id) = trello_board(&secrets, locator).await?;
            cmd::label::run(&client, &board_id).await
        }
        Commands::Phases { data } => {
            let locator = BoardLocator::from_env(&cli.board_name);
            let (client, board_id) = trello_board(&secrets, locator).await?;
            cmd::phases::run(&client, &board_id, &data, &secrets).await
        }
        Commands::CreateBoard { data } => {
            let creds = secrets.trello_credentials()?;
            let client = TrelloClient::new(&creds.key, &creds.token)?;
            cmd::create_board::run(&client, &data).await
        }
        Commands::AddCards { list } => {
            let locator = BoardLocator::from_env(&cli.board_name)
                .or_short_link(cmd::add_cards::BOARD_SHORT_LINK);
            let (client, board_id) = trello_board(&secrets, locator).await?;
            cmd::add_cards::run(&client, &board_id, list.trim()).await
        }
        Commands::SlackSetup => {
            let token = secrets.slack_token()?;
            let client = SlackClient::new(&token)?;
            cmd::slack_setup::run(&client).await
        }
    }
}
