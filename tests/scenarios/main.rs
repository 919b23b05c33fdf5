//! Scenario-based tests for stylepipe

mod helpers;

mod end_to_end;
mod failure_handling;
mod stage_order;
mod pruning;
mod utility_generation;
