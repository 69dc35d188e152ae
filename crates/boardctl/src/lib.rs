//! Sprint-board bootstrap and reconciliation.
//!
//! Each subcommand is a one-shot convergence pass: fetch the board's current
//! remote state, compute the mutations that bring it to the declared target,
//! and apply them one at a time. Nothing is cached between runs and no state
//! is kept locally apart from `secrets.json` and the sprint process data
//! file. The planning logic is pure ([`plan`], [`classify`], [`members`]) so
//! it can be tested without a network.

pub mod board;
pub mod classify;
pub mod cmd;
pub mod members;
pub mod plan;
pub mod process;
pub mod secrets;
