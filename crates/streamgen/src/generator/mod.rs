pub(crate) mod ast;
pub(crate) mod codegen;
pub mod config;
pub mod errors;
pub(crate) mod graph;
pub mod metrics;
pub mod model;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod properties;

#[cfg(test)]
pub(crate) mod tests;
