pub mod context;
pub mod convert;
pub mod error;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod node;
pub mod orchestrator;
pub mod scanner;
pub mod store;

pub use context::{ExecutionContext, Rank};
pub use error::MergeError;
pub use loader::{ConfigLoader, LayerSource, MemorySource};
pub use merge::merge;
pub use node::{ConfigNode, Key, Scalar, Shape};
pub use orchestrator::Orchestrator;
pub use store::ConfigStore;
