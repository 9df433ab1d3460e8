pub mod analysis;
pub mod classify;
pub mod keywords;
pub mod phrases;
pub mod scoring;
pub mod seo;
pub mod storage;
pub mod suggest;
pub mod tables;
pub mod text;
pub mod transcript;

pub use analysis::*;
pub use classify::{Classification, Persona, Theme};
pub use keywords::{KeywordEntry, KeywordExtractor};
pub use phrases::PhraseExtractor;
pub use scoring::{DimensionScore, MethodologyScorer, SeoScore, SeoScorer};
pub use seo::{SeoContentGenerator, SeoPackage};
pub use storage::*;
pub use suggest::SuggestionService;
pub use transcript::*;
