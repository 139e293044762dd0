//! Agent-vs-agent match driving.
//!
//! `MatchDriver` sits between the engine and two `Agent`s. It owns the
//! policy for rejected decisions (substitute, count, forfeit) so the engine
//! itself stays a pure referee.

pub mod agent;
pub mod runner;

pub use agent::{Agent, AgentError, RandomAgent, ScriptedAgent};
pub use runner::{DriverConfig, MatchDriver, MatchReport};
