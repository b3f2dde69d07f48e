//! Keyword overlap scorer.
//!
//! An agent named in the query (full name, or the name without its `Agent`
//! suffix) scores 1.0. Otherwise the score is the share of the query's
//! keywords that appear in the agent's description or skills.

use std::collections::HashSet;

use crate::domain::models::AgentCard;
use crate::domain::ports::AgentScorer;
use crate::services::script::is_cjk;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "be", "by", "can", "check", "could", "did", "do", "does", "every", "for",
    "from", "get", "give", "how", "i", "if", "in", "is", "it", "its", "let", "me", "my", "of", "on", "or",
    "please", "show", "tell", "that", "the", "there", "this", "to", "was", "were", "what", "when", "which",
    "who", "why", "will", "with", "you",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordAgentScorer;

impl KeywordAgentScorer {
    pub const fn new() -> Self {
        Self
    }
}

impl AgentScorer for KeywordAgentScorer {
    fn score(&self, query: &str, agent: &AgentCard) -> f64 {
        let query_tokens = tokens(query);
        if mentions_agent(&query.to_lowercase(), &query_tokens, &agent.name) {
            return 1.0;
        }

        let keywords: Vec<&String> = query_tokens
            .iter()
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .collect();
        if keywords.is_empty() {
            return 0.0;
        }

        let mut vocabulary: HashSet<String> = tokens(&agent.description).into_iter().collect();
        for skill in &agent.skills {
            vocabulary.extend(tokens(skill));
        }

        let hits = keywords.iter().filter(|k| vocabulary.contains(k.as_str())).count();
        hits as f64 / keywords.len() as f64
    }
}

fn mentions_agent(lower_query: &str, query_tokens: &[String], name: &str) -> bool {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return false;
    }
    if name.chars().any(is_cjk) {
        return lower_query.contains(&name);
    }
    if query_tokens.contains(&name) {
        return true;
    }
    match name.strip_suffix("agent").map(|s| s.trim_end_matches(['_', '-', ' '])) {
        Some(stem) if !stem.is_empty() => query_tokens.iter().any(|t| t == stem),
        _ => false,
    }
}

/// Lowercase alphanumeric tokens; each CJK character is its own token.
fn tokens(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for c in text.to_lowercase().chars() {
        if is_cjk(c) {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if c.is_alphanumeric() {
                out.push(c.to_string());
            }
        } else if c.is_alphanumeric() {
            current.push(c);
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
