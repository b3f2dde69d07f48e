//! Plan command: run one conversational turn.

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::models::{Config, ContextMessage, TurnRequest, UnderstandingHints};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Session identifier; pending proposals are kept per session
    #[arg(short, long, default_value = "default")]
    pub session: String,

    /// The user utterance
    #[arg(short, long)]
    pub query: String,

    /// Route to this agent instead of consulting the directory
    #[arg(short, long)]
    pub agent: Option<String>,

    /// Understanding hints as JSON, used instead of the built-in classifier
    #[arg(long)]
    pub hints: Option<String>,

    /// Recent conversation as a JSON array of {"role", "content"} objects
    #[arg(long)]
    pub context: Option<String>,
}

/// Plan the turn and print the planning result as a single JSON line.
///
/// The output is always the strict result JSON, whether or not `--json`
/// was given, so callers can parse stdout directly.
pub async fn execute(args: PlanArgs, config: &Config) -> Result<()> {
    let mut request = TurnRequest::new(args.query);
    if let Some(agent) = args.agent {
        request = request.with_target_agent(agent);
    }
    if let Some(raw) = args.context.as_deref() {
        let context: Vec<ContextMessage> =
            serde_json::from_str(raw).context("--context must be a JSON array of messages")?;
        request = request.with_context(context);
    }

    let dispatcher = super::file_backed_dispatcher(config);
    let outcome = match args.hints.as_deref() {
        Some(raw) => {
            let hints: UnderstandingHints =
                serde_json::from_str(raw).context("--hints must be a JSON object")?;
            dispatcher
                .dispatch_with_hints(&args.session, &request, &hints)
                .await?
        }
        None => dispatcher.dispatch(&args.session, &request).await?,
    };

    tracing::debug!(
        phase = %outcome.phase,
        committed = outcome.commits(),
        agent = outcome.selection.as_ref().map(|s| s.agent_name.as_str()),
        "turn planned"
    );

    println!(
        "{}",
        outcome
            .result
            .to_json()
            .context("Failed to serialize planning result")?
    );
    Ok(())
}
