pub mod classifier;
pub mod providers;

pub use classifier::{classify, extract_focus_areas, ClassificationResult};
pub use providers::{PhoneticScorer, SemanticAnalyzer, Transcriber};
