//! Port contracts for the credential-exchange agent.

pub mod agent;

pub use agent::{AgentError, AgentResult, ExchangeAgent};

#[cfg(test)]
pub use agent::MockExchangeAgent;
