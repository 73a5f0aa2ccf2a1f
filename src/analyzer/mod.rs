// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod data_analyzer;
pub mod insights;
pub mod recommendations;
pub mod record_analysis;

// Re-export the main analyzer types for ease of use.
pub use data_analyzer::DataAnalyzer;
pub use record_analysis::{Analyzer, AnalyzerImpl};
