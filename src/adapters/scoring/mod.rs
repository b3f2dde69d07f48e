pub mod keyword_scorer;

pub use keyword_scorer::KeywordAgentScorer;
