#![no_std]
#![allow(clippy::cargo_common_metadata)]

extern crate alloc;

pub mod config;
pub mod language;
pub mod parser;
pub mod stats;

pub use language::{LineClass, LineKind, classify_line};
