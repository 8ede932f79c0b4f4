//! Workflow integration tests

pub mod config_edit;
pub mod replay_compare;
