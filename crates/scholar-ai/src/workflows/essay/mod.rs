//! Hybrid essay scoring.
//!
//! Local lexical statistics measure vocabulary; an external model judges relevance to the
//! prompt, sentiment, and tone. The two are blended into a single 0-100 score.

pub mod gemini;
pub mod router;
mod scorer;
pub mod semantic;
pub mod tokenizer;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use gemini::GeminiClient;
pub use router::{essay_router, EssayAnalysisRequest, EssayAnalysisResponse};
pub use scorer::{EssayAnalysis, EssayField, EssayScorer, EssayScoringError};
pub use semantic::{SemanticAnalyzer, SemanticAssessment, SemanticError};
pub use tokenizer::{tokenize, word_count};
pub use vocabulary::{score_vocabulary, VocabularyStats};
