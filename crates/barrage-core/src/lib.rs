//! Core types and definitions for the BARRAGE artillery simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, configuration,
//! constants, and the shell kinematic model.
//! It has no dependency on any runtime or presentation framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod kinematics;
pub mod state;
pub mod types;
