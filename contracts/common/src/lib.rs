//! Shared utilities for the allocation-staking contract suite.
//!
//! This crate carries [`admin_gate`] — the owner / admin-registry primitives
//! consulted before any privileged operation. The gate reports through plain
//! booleans; each consuming contract maps denial onto its own error taxonomy.

#![no_std]

pub mod admin_gate;

pub use admin_gate::*;
