//! Declarative construction blueprints for the vault and orchestrator.
//!
//! Configuration structs validate all invariants at construction time, so
//! a successfully built component is guaranteed to start in a valid state.

mod orchestrator;
mod vault;

pub use orchestrator::OrchestratorConfig;
pub use vault::VaultConfig;
