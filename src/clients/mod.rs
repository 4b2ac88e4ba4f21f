pub mod craiyon_client;
pub mod job_history;

pub use craiyon_client::CraiyonClient;
pub use job_history::JobHistoryClient;
