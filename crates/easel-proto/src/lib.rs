#![forbid(unsafe_code)]

//! Command protocol: text grammar and network listener.
//!
//! # Role in Easel
//! `easel-proto` turns one line of command text into a typed
//! [`easel_runtime::Op`] (or a [`parse::ParseError`]) and runs the thin HTTP
//! adapter that feeds scripts of such lines into the execution loop.
//! Parsing is pure and side-effect-free; only valid operations ever cross
//! the queue boundary.

pub mod parse;
pub mod server;

pub use parse::{ParseError, parse};
pub use server::{ScriptOutcome, handle_script, serve};
