#![forbid(unsafe_code)]

pub mod access;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod random;

pub use interview_core::Clock;

pub use access::{PresenceCheck, UserPresence};
pub use config::EngineConfig;
pub use dashboard::{CategoryBreakdown, DashboardStats, RecentSession};
pub use engine::{EngineBuilder, InterviewEngine, LoadReport};
pub use error::{ConfigError, EngineError};
pub use feedback::{Evaluator, MockEvaluator};
pub use random::{SeededRandom, ThreadRandom};
