//! # Integration Flows
//!
//! End-to-end behavior of the ledger service and the hosted node.

pub mod flows;
pub mod simulation;
