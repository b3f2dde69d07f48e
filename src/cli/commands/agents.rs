//! Agents command: list configured agents, optionally ranked for a query.

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;
use serde::Serialize;

use crate::adapters::scoring::KeywordAgentScorer;
use crate::cli::output::{list_table, output, render_list, truncate, CommandOutput};
use crate::domain::models::{AgentCard, Config};
use crate::domain::ports::AgentScorer;

#[derive(Args, Debug)]
pub struct AgentsArgs {
    /// Score every agent against this query and show which one would be chosen
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AgentRow {
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AgentListOutput {
    pub agents: Vec<AgentRow>,
    pub total: usize,
    pub default_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl CommandOutput for AgentListOutput {
    fn to_human(&self) -> String {
        let with_scores = self.agents.iter().any(|a| a.score.is_some());
        let headers: &[&str] = if with_scores {
            &["name", "score", "description", "skills"]
        } else {
            &["name", "description", "skills"]
        };

        let mut table = list_table(headers);
        for agent in &self.agents {
            let mut row = vec![Cell::new(&agent.name)];
            if with_scores {
                row.push(Cell::new(agent.score.map_or_else(String::new, |s| format!("{s:.2}"))));
            }
            row.push(Cell::new(truncate(&agent.description, 48)));
            row.push(Cell::new(agent.skills.join(", ")));
            table.add_row(row);
        }

        let mut out = render_list("agent", &table, self.total);
        out.push_str(&format!("\n\nDefault agent: {}", self.default_agent));
        if let Some(selected) = &self.selected {
            out.push_str(&format!("\nSelected: {selected}"));
        }
        out
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: AgentsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let scorer = KeywordAgentScorer::new();
    let agents = rows(&config.agents, args.query.as_deref(), &scorer);

    let selected = match args.query.as_deref() {
        Some(query) => Some(
            super::agent_selector(config)
                .select(None, query)
                .await
                .agent_name,
        ),
        None => None,
    };

    let out = AgentListOutput {
        total: agents.len(),
        agents,
        default_agent: config.planner.default_agent.clone(),
        selected,
    };
    output(&out, json_mode);
    Ok(())
}

fn rows(agents: &[AgentCard], query: Option<&str>, scorer: &dyn AgentScorer) -> Vec<AgentRow> {
    agents
        .iter()
        .map(|agent| AgentRow {
            name: agent.name.clone(),
            description: agent.description.clone(),
            skills: agent.skills.clone(),
            score: query.map(|q| scorer.score(q, agent)),
        })
        .collect()
}
