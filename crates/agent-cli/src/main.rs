mod chat;
mod logging;
mod query;
mod render;

use std::sync::Arc;

use anyhow::Context;
use aura_client::{build_http_client, AgentService, Reply};
use chat_core::{Config, ConfigError, Selection, Transcript};
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::query::StatementSource;

#[derive(Parser)]
#[command(name = "archives-agent")]
#[command(about = "Ask the Swiss diplomatic archives agent from the terminal")]
#[command(version)]
struct Cli {
    /// Agent invoke URL, overrides AGENT_ENDPOINT
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Agent request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, short, global = true, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat
    Chat,
    /// Ask a single question
    Ask {
        /// Question text
        #[arg(required_unless_present = "prompt")]
        question: Option<String>,
        /// Ask suggested question N instead (see `prompts`)
        #[arg(long, short, conflicts_with = "question")]
        prompt: Option<usize>,
    },
    /// List the suggested questions
    Prompts,
    /// Run a query directly against the graph database
    Query {
        /// Cypher statement
        #[arg(required_unless_present_any = ["template", "list"])]
        statement: Option<String>,
        /// Run a named template instead
        #[arg(long, short, conflicts_with = "statement")]
        template: Option<String>,
        /// Query parameter as key=value, repeatable
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
        /// Database name, defaults to NEO4J_DATABASE or neo4j
        #[arg(long)]
        database: Option<String>,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
        /// List the available templates
        #[arg(long)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    let mut config = Config::new().context("failed to load configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config.agent_endpoint = endpoint;
    }
    if let Some(timeout) = cli.timeout {
        config.agent_timeout_secs = timeout;
    }

    match cli.command {
        Commands::Chat => {
            let service = agent_service(&config)?;
            chat::run_interactive_chat(&service).await
        }
        Commands::Ask { question, prompt } => {
            let selection = match (question, prompt) {
                (_, Some(index)) => Selection::Canned(index),
                (Some(text), None) => Selection::parse(&text),
                (None, None) => anyhow::bail!("a question or --prompt is required"),
            };
            ask_once(&config, &selection).await
        }
        Commands::Prompts => {
            render::print_catalogue();
            Ok(())
        }
        Commands::Query {
            list: true, ..
        } => {
            render::print_templates();
            Ok(())
        }
        Commands::Query {
            statement,
            template,
            params,
            database,
            json,
            ..
        } => {
            let source = match (template, statement) {
                (Some(name), _) => StatementSource::Template(name),
                (None, Some(statement)) => StatementSource::Raw(statement),
                (None, None) => anyhow::bail!("a statement or --template is required"),
            };
            query::run_query(&config, source, &params, database.as_deref(), json).await
        }
    }
}

fn agent_service(config: &Config) -> anyhow::Result<AgentService> {
    if let Err(err) = config.require_agent() {
        print_missing_config(&err);
        return Err(err.into());
    }
    let http = Arc::new(build_http_client(config)?);
    Ok(AgentService::from_config(http, config))
}

async fn ask_once(config: &Config, selection: &Selection) -> anyhow::Result<()> {
    let question = selection
        .resolve()
        .context("no suggested question with that number, run `prompts` to list them")?;
    let service = agent_service(config)?;
    let mut transcript = Transcript::new();

    println!("{} {}", "You:".cyan().bold(), question);
    let reply = chat::ask(&service, &mut transcript, &question).await;
    chat::print_reply(&reply);

    match reply {
        Reply::Answer(_) => Ok(()),
        Reply::Failure(err) => Err(err.into()),
    }
}

fn print_missing_config(err: &ConfigError) {
    eprintln!("{}", format!("⚠️ Configuration missing: {err}").red());
    eprintln!();
    eprintln!("Set them in the environment or in ~/.aura-agent/config.json:");
    eprintln!(
        "{}",
        r#"  AGENT_ENDPOINT="https://api.neo4j.io/v2beta1/projects/.../agents/.../invoke"
  CLIENT_ID="your_client_id"
  CLIENT_SECRET="your_client_secret""#
            .dimmed()
    );
    eprintln!(
        "{}",
        "Client credentials come from the Aura console: User Profile → API Keys".dimmed()
    );
}
