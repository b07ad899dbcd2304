pub mod analysis;
pub mod audio;
pub mod loaders;
pub mod quiz;
pub mod report;
pub mod stage;
pub mod taxonomy;
pub mod transcript;

pub use analysis::{
    AnalysisKind, AnalysisOutcome, AnalysisRequest, CefrLevel, PhoneticScore, SemanticAssessment,
    WordScore,
};
pub use audio::AudioClip;
pub use loaders::{load_taxonomy, load_taxonomy_or_builtin};
pub use quiz::{Quiz, QuizQuestion, QuizResult, LISTENING_QUIZ, READING_QUIZ};
pub use report::{AssessmentReport, PhoneticStatus, WordAccuracySummary};
pub use stage::AssessmentStage;
pub use taxonomy::{Taxonomy, TriggerCategory};
pub use transcript::{SessionSummary, Speaker, TranscriptTurn};
