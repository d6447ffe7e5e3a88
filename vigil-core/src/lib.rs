//! Board-agnostic core logic for the Vigil motion sentinel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (storage, image sensor, detector, network, platform)
//! - Wake-cause classification
//! - Cooldown gate over the retained memory slot
//! - Staged detection pipeline with fail-fast abort and LIFO teardown
//! - Sleep-plan selection and the terminal halt path
//!
//! The process model is single-shot: every wake runs exactly one cycle and
//! ends in a halt with exactly one wake source armed. The only state that
//! outlives a halt is the 8-byte cooldown deadline behind
//! [`traits::RetainedSlot`].

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cooldown;
pub mod error;
pub mod pipeline;
pub mod power;
pub mod sentinel;
pub mod traits;
pub mod wake;
