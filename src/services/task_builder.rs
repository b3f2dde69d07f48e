//! Task construction and title rules.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ScheduleConfig, Task, TaskPattern};

use super::script::{collapse_whitespace, contains_cjk, contains_spaced_script, word_count};

/// Word bound for space-delimited scripts.
pub const MAX_TITLE_WORDS: usize = 10;

/// Character bound for titles containing CJK text.
pub const MAX_TITLE_CJK_CHARS: usize = 20;

static LEADING_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:please|can you|could you|would you|will you|i want to|i'd like to|i would like to|help me|tell me|show me|find out|what is|what's|what are|what was|what were|how much is|how many|how is|how are)\s+)+",
    )
    .expect("filler pattern is valid")
});

static LEADING_FILLER_ZH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:请|請|帮我|幫我|麻烦|我想|我要|告诉我|告訴我)+").expect("zh filler pattern is valid")
});

static TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s?!.。？！,，;；:：]+$").expect("punctuation pattern is valid"));

/// Whether `title` already satisfies the length bounds.
pub fn title_within_bounds(title: &str) -> bool {
    let words = word_count(title);
    if contains_cjk(title) {
        let chars_ok = title.chars().count() <= MAX_TITLE_CJK_CHARS;
        let words_ok = !contains_spaced_script(title) || words <= MAX_TITLE_WORDS;
        chars_ok && words_ok
    } else {
        words <= MAX_TITLE_WORDS
    }
}

/// Derive a bounded title from a query.
///
/// A query that already fits is returned with whitespace collapsed. Longer
/// queries use `subject` when it fits, then a heuristic core subject, then
/// truncation. Fails only when there is nothing to title.
pub fn make_title(query: &str, subject: Option<&str>) -> DomainResult<String> {
    let query = collapse_whitespace(query);
    if query.is_empty() {
        return Err(DomainError::TitleTooLong);
    }
    if title_within_bounds(&query) {
        return Ok(query);
    }

    if let Some(subject) = subject.map(collapse_whitespace).filter(|s| !s.is_empty()) {
        if title_within_bounds(&subject) {
            return Ok(subject);
        }
    }

    let core = core_subject(&query);
    if !core.is_empty() && title_within_bounds(&core) {
        return Ok(core);
    }
    let base = if core.is_empty() { query } else { core };
    Ok(truncate(&base))
}

/// Strip leading filler and trailing punctuation.
fn core_subject(query: &str) -> String {
    let stripped = LEADING_FILLER.replace(query, "");
    let stripped = LEADING_FILLER_ZH.replace(&stripped, "");
    let stripped = TRAILING_PUNCT.replace(&stripped, "");
    collapse_whitespace(&stripped)
}

fn truncate(text: &str) -> String {
    let mut title = text
        .split_whitespace()
        .take(MAX_TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    if contains_cjk(&title) {
        title = title.chars().take(MAX_TITLE_CJK_CHARS).collect::<String>();
        title = title.trim_end().to_string();
    }
    let trimmed = TRAILING_PUNCT.replace(&title, "");
    if trimmed.is_empty() {
        title
    } else {
        trimmed.into_owned()
    }
}

/// Builds tasks with validated titles and pattern/schedule coherence.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskBuilder;

impl TaskBuilder {
    pub const fn new() -> Self {
        Self
    }

    /// Pass-through task: the query is kept as given.
    pub fn build_once(&self, query: &str, agent_name: &str, subject: Option<&str>) -> DomainResult<Task> {
        let title = make_title(query, subject)?;
        Ok(Task {
            title,
            query: query.trim().to_string(),
            agent_name: agent_name.to_string(),
            pattern: TaskPattern::Once,
            schedule_config: None,
        })
    }

    /// Recurring task from an already transformed query.
    pub fn build_recurring(
        &self,
        query: &str,
        agent_name: &str,
        schedule: ScheduleConfig,
        title: Option<&str>,
    ) -> DomainResult<Task> {
        schedule.validate()?;
        let title = match title.map(collapse_whitespace).filter(|t| !t.is_empty()) {
            Some(title) if title_within_bounds(&title) => title,
            Some(title) => make_title(&title, None)?,
            None => make_title(query, None)?,
        };
        Ok(Task {
            title,
            query: query.trim().to_string(),
            agent_name: agent_name.to_string(),
            pattern: TaskPattern::Recurring,
            schedule_config: Some(schedule),
        })
    }
}
