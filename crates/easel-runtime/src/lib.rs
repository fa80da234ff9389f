#![forbid(unsafe_code)]

//! Operation model, operation queue, and serialized execution loop.
//!
//! # Role in Easel
//! This crate is the concurrency core. Producers on arbitrary threads turn
//! user input into [`op::Op`] values and hand them to [`exec::ExecLoop::post`];
//! a single dedicated consumer thread drains the queue in batches, applies
//! each operation to the [`state::State`] and the owned surface, and notifies
//! the [`exec::RenderSink`] at most once per batch.
//!
//! # Concurrency model
//! - The queue's mutex is the only lock shared across threads.
//! - `State` and the surface are confined to the consumer thread; they are
//!   moved into it at start and never leave.
//! - The wake signal is coalesced: at most one `Wake` is ever pending, and a
//!   drain may observe zero, one, or many pushed operations.

pub mod exec;
pub mod op;
pub mod queue;
pub mod state;

pub use exec::{ExecLoop, Poster, RenderSink, StartupError};
pub use op::Op;
pub use queue::{OpQueue, Signal};
pub use state::{Figure, FigurePolicy, State};
