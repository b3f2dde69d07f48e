//! Agent selection for a planning turn.
//!
//! Exactly one agent is chosen per turn. An explicit target is used as is;
//! otherwise directory candidates are scored and the best one wins if it
//! clears the confidence threshold, with a fixed default agent as fallback.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::{AgentCard, AgentSelection, SelectionSource};
use crate::domain::ports::{AgentDirectory, AgentScorer};

pub struct AgentSelector {
    directory: Arc<dyn AgentDirectory>,
    scorer: Arc<dyn AgentScorer>,
    default_agent: String,
    confidence_threshold: f64,
}

impl AgentSelector {
    pub fn new(
        directory: Arc<dyn AgentDirectory>,
        scorer: Arc<dyn AgentScorer>,
        default_agent: impl Into<String>,
        confidence_threshold: f64,
    ) -> Self {
        Self {
            directory,
            scorer,
            default_agent: default_agent.into(),
            confidence_threshold,
        }
    }

    pub fn default_agent(&self) -> &str {
        &self.default_agent
    }

    /// Resolve the agent for `query`.
    ///
    /// A target name is never checked against the directory. Directory
    /// failures degrade to the default agent.
    pub async fn select(&self, target: Option<&str>, query: &str) -> AgentSelection {
        if let Some(name) = target.map(str::trim).filter(|n| !n.is_empty()) {
            return AgentSelection {
                agent_name: name.to_string(),
                source: SelectionSource::Target,
                confidence: None,
            };
        }

        let agents = match self.directory.list_enabled_agents().await {
            Ok(agents) => agents,
            Err(e) => {
                warn!(error = %e, default_agent = %self.default_agent, "agent directory unavailable, using default agent");
                return self.fallback(None);
            }
        };
        if agents.is_empty() {
            warn!(default_agent = %self.default_agent, "agent directory is empty, using default agent");
            return self.fallback(None);
        }

        match self.best_candidate(query, &agents) {
            Some((agent, score)) if score >= self.confidence_threshold => {
                debug!(agent = %agent.name, score, "directory agent selected");
                AgentSelection {
                    agent_name: agent.name.clone(),
                    source: SelectionSource::Directory,
                    confidence: Some(score),
                }
            }
            best => {
                debug!(
                    best = best.map(|(a, _)| a.name.as_str()),
                    score = best.map(|(_, s)| s),
                    threshold = self.confidence_threshold,
                    "no confident candidate, using default agent"
                );
                self.fallback(best.map(|(_, s)| s))
            }
        }
    }

    /// Highest-scoring agent; ties keep directory order.
    fn best_candidate<'a>(&self, query: &str, agents: &'a [AgentCard]) -> Option<(&'a AgentCard, f64)> {
        agents.iter().fold(None, |best, agent| {
            let score = sanitize(self.scorer.score(query, agent));
            match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((agent, score)),
            }
        })
    }

    fn fallback(&self, confidence: Option<f64>) -> AgentSelection {
        AgentSelection {
            agent_name: self.default_agent.clone(),
            source: SelectionSource::Fallback,
            confidence,
        }
    }
}

fn sanitize(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
