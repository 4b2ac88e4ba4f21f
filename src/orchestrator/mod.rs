//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和并发调度，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量提示词处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 加载提示词列表（`Vec<String>`）
//! - 控制并发数量（Semaphore）
//! - 持有共享资源（HTTP 客户端连接池、已加载的字体）
//! - 隔离单个提示词的失败，汇总全局统计
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Prompt>)
//!     ↓
//! workflow::PromptFlow (处理单个 Prompt)
//!     ↓
//! services (能力层：decode / compose / annotate / write)
//!     ↓
//! clients (API 客户端：生成服务 / 任务历史)
//! ```

pub mod batch_processor;

pub use batch_processor::App;
