//! CLI Integration Test Modules

pub mod execution;
