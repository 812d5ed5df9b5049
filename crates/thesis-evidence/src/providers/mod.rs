//! Concrete evidence provider implementations

pub mod quickfs;
pub mod tavily;

pub use quickfs::QuickFsClient;
pub use tavily::TavilyClient;
