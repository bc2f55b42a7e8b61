//! Parser module for Langlang.

mod core;
mod expressions;
mod statements;


pub use self::core::Parser;
