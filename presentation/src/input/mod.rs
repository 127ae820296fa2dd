//! Request payload reading

mod reader;

pub use reader::{InputError, parse_request, read_request};
