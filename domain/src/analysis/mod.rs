//! Concept analysis domain
//!
//! - [`item`]: submitted question/answer items and request bounds
//! - [`entities`]: per-backend analyses and the response envelope

pub mod entities;
pub mod item;
