#![forbid(unsafe_code)]

//! The serialized execution loop.
//!
//! One dedicated thread owns the [`State`] and the render surface for the
//! loop's whole life. Producers on any thread call [`ExecLoop::post`] (or a
//! cloned [`Poster`]); the loop thread wakes on the queue signal, drains a
//! batch, applies every operation in order, and presents the surface to the
//! [`RenderSink`] at most once per batch.
//!
//! # Lifecycle
//! `Created -> Running -> Stopped`, terminal. A loop holds no surface until
//! [`ExecLoop::start`] allocates one; allocation failure is fatal to startup
//! and leaves nothing behind. [`ExecLoop::stop`] signals the thread and
//! blocks until it has released the surface; it is also run from `Drop`.
//! Operations posted concurrently with `stop` may be discarded - the loop
//! does not drain to completion on shutdown (see DESIGN.md).
//!
//! # Sink contract
//! [`RenderSink::present`] runs synchronously on the loop thread. A slow
//! sink stalls all further operation processing, so implementations must
//! return promptly or hand off to their own machinery. Re-entering the loop
//! via `post` from inside `present` is safe (it never blocks); waiting for
//! the posted operation to apply would deadlock.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use easel_render::surface::{Surface, SurfaceError, SurfaceProvider};
use tracing::{debug, trace, warn};

use crate::op::Op;
use crate::queue::{OpQueue, Signal};
use crate::state::{FigurePolicy, State};

/// Receives a completed surface for presentation.
pub trait RenderSink<S: Surface>: Send {
    fn present(&mut self, surface: &S);
}

/// Why a loop failed to start.
#[derive(Debug)]
pub enum StartupError {
    /// The loop already ran (or is running); loops are single-use.
    AlreadyStarted,
    /// The provider could not allocate the initial surface.
    Allocation(SurfaceError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::AlreadyStarted => write!(f, "execution loop already started"),
            StartupError::Allocation(e) => write!(f, "surface allocation failed: {e}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StartupError::Allocation(e) => Some(e),
            StartupError::AlreadyStarted => None,
        }
    }
}

/// A cloneable posting handle, detached from the loop's lifetime so other
/// threads (protocol handlers, input sources) can produce operations.
#[derive(Clone)]
pub struct Poster {
    queue: Arc<OpQueue>,
}

impl Poster {
    pub fn post(&self, op: Op) {
        self.queue.push(op);
    }
}

/// The command-queue execution loop.
pub struct ExecLoop<S: Surface + Send + 'static> {
    queue: Arc<OpQueue>,
    signal: Sender<Signal>,
    signal_rx: Option<Receiver<Signal>>,
    sink: Option<Box<dyn RenderSink<S>>>,
    width: u32,
    height: u32,
    policy: FigurePolicy,
    handle: Option<JoinHandle<()>>,
}

impl<S: Surface + Send + 'static> ExecLoop<S> {
    /// A loop in the `Created` state: fixed surface dimensions, no surface
    /// yet, default figure policy, no sink.
    pub fn new(width: u32, height: u32) -> Self {
        let (queue, signal_rx) = OpQueue::new();
        let signal = queue.signal_sender();
        ExecLoop {
            queue: Arc::new(queue),
            signal,
            signal_rx: Some(signal_rx),
            sink: None,
            width,
            height,
            policy: FigurePolicy::default(),
            handle: None,
        }
    }

    /// Attaches the render sink. Without one, refreshes are logged and
    /// dropped rather than presented.
    pub fn with_sink(mut self, sink: Box<dyn RenderSink<S>>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_policy(mut self, policy: FigurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Allocates the surface, seeds the initial content (one figure at the
    /// canvas center plus a queued refresh), and spawns the consumer
    /// thread. Returns without blocking on the first render.
    pub fn start<P>(&mut self, provider: &mut P) -> Result<(), StartupError>
    where
        P: SurfaceProvider<Surface = S>,
    {
        let Some(signal_rx) = self.signal_rx.take() else {
            return Err(StartupError::AlreadyStarted);
        };

        let mut surface = match provider.allocate(self.width, self.height) {
            Ok(surface) => surface,
            Err(e) => {
                // Put the receiver back so the caller can retry with
                // another provider.
                self.signal_rx = Some(signal_rx);
                return Err(StartupError::Allocation(e));
            }
        };

        let mut state = State::new(self.width, self.height, self.policy);
        surface.fill(surface.bounds(), state.bg_color);
        Op::AddFigure { x: 0.5, y: 0.5 }.apply(&mut state, &mut surface);
        self.queue.push(Op::Refresh);

        let queue = Arc::clone(&self.queue);
        let sink = self.sink.take();
        let handle = thread::Builder::new()
            .name("easel-exec".into())
            .spawn(move || run(state, surface, queue, signal_rx, sink))
            .expect("failed to spawn execution loop thread");
        self.handle = Some(handle);
        debug!(width = self.width, height = self.height, "execution loop started");
        Ok(())
    }

    /// Posts an operation for the loop to apply. Safe from any thread and
    /// any lifecycle stage; operations posted before `start` are applied
    /// with the first drained batch.
    pub fn post(&self, op: Op) {
        self.queue.push(op);
    }

    /// A posting handle that can be moved to other threads.
    pub fn poster(&self) -> Poster {
        Poster { queue: Arc::clone(&self.queue) }
    }

    /// Signals the consumer to terminate and blocks until it has released
    /// the surface. Idempotent; a no-op before `start`.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.signal.send(Signal::Stop);
            if handle.join().is_err() {
                warn!("execution loop thread panicked before shutdown");
            }
        }
    }
}

impl<S: Surface + Send + 'static> Drop for ExecLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<S: Surface>(
    mut state: State,
    mut surface: S,
    queue: Arc<OpQueue>,
    signal_rx: Receiver<Signal>,
    mut sink: Option<Box<dyn RenderSink<S>>>,
) {
    loop {
        match signal_rx.recv() {
            // All senders gone: treat like a stop.
            Err(_) | Ok(Signal::Stop) => break,
            Ok(Signal::Wake) => {
                let ops = queue.drain();
                if ops.is_empty() {
                    continue;
                }
                trace!(batch = ops.len(), "applying drained batch");
                let mut needs_refresh = false;
                for op in &ops {
                    if op.apply(&mut state, &mut surface) {
                        needs_refresh = true;
                    }
                }
                if needs_refresh {
                    match sink.as_mut() {
                        Some(sink) => sink.present(&surface),
                        None => trace!("refresh requested but no render sink attached"),
                    }
                }
            }
        }
    }
    surface.release();
    debug!("execution loop stopped, surface released");
}
