pub mod dialogue;
pub mod stage_ctx;

pub use dialogue::{DialogueReply, DialogueSession, DialogueStage};
pub use stage_ctx::StageCtx;
