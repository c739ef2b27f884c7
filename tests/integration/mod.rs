//! Integration tests for the Treeseal audit pipeline

mod audit_flow;
mod test_utils;
mod verify_scenarios;
