//! CLI for the agentgraph tutorials: run the classification graph or the
//! tool-using agent, printing results to stdout.
//!
//! LLM settings come from `.env` / environment via `Config::from_env_and_args`;
//! `--offline` swaps in a scripted model.

mod config;
mod output;

use std::sync::Arc;

use agentgraph::agent::default_agent_graph;
use agentgraph::classify::{build_classification_graph, ClassifyState};
use agentgraph::{MemorySaver, MessagesState, RunnableConfig, ToolRegistry};
use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use futures::StreamExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[derive(Parser)]
#[command(name = "agentgraph-tutorials")]
#[command(about = "Greeting/search classification and a tool-using assistant on a state graph")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs)]
struct CommonArgs {
    /// Model name (overrides OPENAI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Sampling temperature
    #[arg(long, global = true, default_value = "0")]
    temperature: f32,

    /// Use a scripted model instead of calling an API
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a question as greeting or search and print the handler's reply
    Classify {
        /// Question to classify
        question: String,
    },
    /// Chat with the tool-using assistant; each input is one turn on the same thread
    Agent {
        /// User inputs, one per turn
        #[arg(default_value = "hi, who was born in 1992")]
        inputs: Vec<String>,

        /// Thread id (new UUID when omitted)
        #[arg(long)]
        thread_id: Option<String>,

        /// User id shown to the assistant
        #[arg(long, default_value = "cplog")]
        user_id: String,

        /// Maximum characters printed per message
        #[arg(long, default_value = "1500")]
        max_length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "agentgraph=info,agentgraph_tutorials=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_env_and_args(
        cli.common.model.clone(),
        cli.common.temperature,
        cli.common.offline,
    )?;
    info!(model = cfg.model(), "configured");

    match cli.command {
        Command::Classify { question } => run_classify(&cfg, question).await,
        Command::Agent {
            inputs,
            thread_id,
            user_id,
            max_length,
        } => run_agent(&cfg, inputs, thread_id, user_id, max_length).await,
    }
}

async fn run_classify(cfg: &Config, question: String) -> Result<()> {
    let graph = build_classification_graph(cfg.classifier_llm(&question)?)?;
    let out = graph
        .invoke(ClassifyState::new(question), None)
        .await
        .context("classification graph failed")?;
    if let Some(label) = out.classification {
        println!("Classification: {}", label.as_str());
    }
    println!("{}", out.response.unwrap_or_default());
    Ok(())
}

async fn run_agent(
    cfg: &Config,
    inputs: Vec<String>,
    thread_id: Option<String>,
    user_id: String,
    max_length: usize,
) -> Result<()> {
    let registry = ToolRegistry::demo()?;
    let llm = cfg.agent_llm(registry.specs(), &inputs)?;
    let saver = Arc::new(MemorySaver::<MessagesState>::new());
    let graph = default_agent_graph(llm, Arc::new(registry), Some(saver))?;

    let thread_id = thread_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    info!(thread_id = %thread_id, "starting conversation");
    let config = RunnableConfig::for_thread(thread_id).with_user_id(user_id);

    let mut printed = 0;
    for input in inputs {
        let mut events = Box::pin(graph.stream(MessagesState::from_user(input), config.clone()));
        while let Some(event) = events.next().await {
            let event = event.context("agent graph failed")?;
            output::print_new_messages(&event.state.messages, &mut printed, max_length);
        }
    }
    Ok(())
}
