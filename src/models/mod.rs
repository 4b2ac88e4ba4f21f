pub mod generation;
pub mod job_run;
pub mod report;

pub use generation::{GenerateBody, GenerationResponse};
pub use job_run::JobRun;
pub use report::{BatchStats, PromptOutcome, PromptState};
