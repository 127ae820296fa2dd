//! Progress display during backend dispatch

pub mod reporter;
