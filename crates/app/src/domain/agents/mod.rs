//! Agents

pub mod data;
pub mod errors;
pub mod records;
pub mod service;
pub mod store;
pub mod summary;
pub mod transitions;
pub mod validation;

pub use errors::AgentsServiceError;
pub use service::*;
pub use store::{AgentStore, InMemoryAgentStore};
