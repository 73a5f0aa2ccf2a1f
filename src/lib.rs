//! In-memory data analysis for a mobile backend: synthetic record generation,
//! summary statistics, categorical insights, heuristic recommendations and
//! snapshot export.

pub mod analyzer;
pub mod config;
pub mod executor;
pub mod model;
pub mod source;
pub mod utils;

pub use analyzer::DataAnalyzer;
pub use config::{AppConfig, load_config};
pub use model::{AnalysisResult, AnalyzerError, AnalyzerState, DataRecord, ExportSnapshot, Summary};
