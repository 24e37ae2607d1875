use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use clap::Subcommand;
use jirabuddy_client::ChatTransport;
use jirabuddy_client::Config;
use jirabuddy_client::ConfigKey;
use jirabuddy_client::DispatchController;
use jirabuddy_client::HttpChatTransport;
use jirabuddy_client::IgnoreReason;
use jirabuddy_client::SubmitOutcome;
use log::LevelFilter;

mod commands;
mod render;
mod repl;

const LOG_FILE: &str = "jirabuddy.log";

#[derive(Parser, Debug)]
#[clap(
    name = "jirabuddy",
    author,
    version,
    about = "Chat with the JiraBuddy agent about your Jira issues"
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(id = "config-file", long = "config-file", help = "Path to the config file")]
    config_file: Option<String>,

    #[clap(
        id = "server-url",
        long = "server-url",
        env = "JIRABUDDY_SERVER_URL",
        help = "Base URL of the JiraBuddy backend"
    )]
    server_url: Option<String>,

    #[clap(
        id = "request-timeout",
        long = "request-timeout",
        help = "Request timeout in milliseconds"
    )]
    request_timeout: Option<String>,

    #[clap(
        id = "log-level",
        long = "log-level",
        value_parser = ["error", "warn", "info", "debug", "trace"],
        help = "Log level"
    )]
    log_level: Option<String>,

    #[clap(long, help = "Send a single prompt, print the reply and exit")]
    task: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect the configuration
    Config {
        #[clap(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print a commented default config file
    Default,
    /// Show where the config file is read from
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command();
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    Config::load(&cmd, vec![&matches]).await?;

    match cli.command {
        Some(Commands::Config {
            action: ConfigCommands::Default,
        }) => {
            println!("{}", Config::serialize_default(&cmd));
            return Ok(());
        }
        Some(Commands::Config {
            action: ConfigCommands::Path,
        }) => {
            println!("{}", Config::get(ConfigKey::ConfigFile));
            return Ok(());
        }
        None => {}
    }

    init_logging()?;

    if !std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        yansi::Paint::disable();
    }

    let transport = HttpChatTransport::from_config()?;
    if let Err(err) = transport.health_check().await {
        log::warn!("health check failed: {err}");
        eprintln!(
            "Hey, it looks like the JiraBuddy backend at {} isn't reachable. You should double check that before we start talking.\n\nError: {err}\n",
            transport.base_url()
        );
    }

    let controller = Arc::new(DispatchController::new(Box::new(transport.clone())));

    if let Some(task) = cli.task {
        return run_task(&controller, &task).await;
    }

    repl::run(controller, transport).await
}

// Logs go to a file so they never interleave with the conversation on stdout.
fn init_logging() -> Result<()> {
    let log_level_filter = Config::get(ConfigKey::LogLevel)
        .parse()
        .unwrap_or(LevelFilter::Info);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("Failed to open {LOG_FILE}"))?;

    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    Ok(())
}

async fn run_task(controller: &DispatchController, task: &str) -> Result<()> {
    log::info!("Executing task: {}", task);

    let outcome = controller.submit(task).await;
    if outcome == SubmitOutcome::Ignored(IgnoreReason::EmptyInput) {
        bail!("Task mode requires a prompt. Use --task \"your request here\"");
    }

    if let Some(reply) = controller.store().last_message() {
        println!("{}", reply.content);
    }

    if outcome == SubmitOutcome::Failed {
        bail!(
            "The JiraBuddy backend at {} did not answer",
            Config::get(ConfigKey::ServerUrl)
        );
    }

    Ok(())
}
