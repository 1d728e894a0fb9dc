#![no_std]

pub mod transition_guard;
pub mod ttl;

pub use transition_guard::{transition, GuardError, TransitionGuard};
