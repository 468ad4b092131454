//! Transition engine
//!
//! Executes the finish action once the countdown is over: either collapse the
//! banner or fade it out, swap in the alternative content and fade it back in.

pub mod animate;
pub mod engine;

pub use animate::{animate, Settled};
pub use engine::{LinkChange, StyleSnapshot, TransitionEngine, TransitionOutcome, TransitionReport};
