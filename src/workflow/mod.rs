pub mod prompt_ctx;
pub mod prompt_flow;

pub use prompt_ctx::PromptCtx;
pub use prompt_flow::PromptFlow;
