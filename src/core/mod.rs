//! Core library components.
//!
//! This module contains the reusable logic: parsing the local secret file,
//! sealing values, talking to the remote store and reconciling the two.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod env;
pub mod plan;
pub mod remote;
pub mod sync;
