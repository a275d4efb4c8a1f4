pub mod generators;
pub mod models;

pub use generators::build_analysis;
pub use models::AnalysisResult;
