//! End-to-end allocation flows.

pub mod allocation_flows;
