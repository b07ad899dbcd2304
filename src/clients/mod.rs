pub mod openai_analyzer;
pub mod speechace_scorer;
pub mod whisper_transcriber;

pub use openai_analyzer::OpenAiAnalyzer;
pub use speechace_scorer::SpeechAceScorer;
pub use whisper_transcriber::WhisperTranscriber;
