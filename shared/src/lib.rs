//! Engine-independent air hockey rules: edge bounces, input mapping and the
//! match state machine.

pub mod bounce;
pub mod config;
pub mod control;
pub mod lights;
pub mod score;
