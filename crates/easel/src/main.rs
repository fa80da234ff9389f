#![forbid(unsafe_code)]

//! Easel binary entry point: wires the execution loop, the command
//! listener, and the terminal front end together.

mod cli;
mod tty;

use std::net::TcpListener;
use std::process;
use std::thread;

use easel_render::surface::{PixelSurface, PixelSurfaceProvider};
use easel_runtime::exec::ExecLoop;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let opts = cli::Opts::parse();

    // Logs go to stderr so the terminal sink owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut provider = PixelSurfaceProvider::default();
    let mut exec: ExecLoop<PixelSurface> = ExecLoop::new(opts.width, opts.height);
    if !opts.headless {
        exec = exec.with_sink(Box::new(tty::TtySink::new()));
    }

    if let Err(e) = exec.start(&mut provider) {
        eprintln!("failed to start execution loop: {e}");
        process::exit(1);
    }

    let listener = match TcpListener::bind(&opts.listen) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("failed to bind {}: {e}", opts.listen);
            exec.stop();
            process::exit(1);
        }
    };
    info!(addr = %opts.listen, "command listener ready");

    let poster = exec.poster();
    let server = thread::Builder::new()
        .name("easel-listen".into())
        .spawn(move || {
            if let Err(e) = easel_proto::serve(listener, move |op| poster.post(op)) {
                error!(error = %e, "command listener failed");
            }
        })
        .expect("failed to spawn listener thread");

    if opts.headless {
        // No front end: serve until the process is killed.
        let _ = server.join();
    } else {
        let poster = exec.poster();
        match tty::TerminalSession::enter() {
            Ok(_session) => {
                if let Err(e) = tty::run_input(&poster) {
                    error!(error = %e, "terminal input loop failed");
                }
            }
            Err(e) => {
                eprintln!("failed to enter terminal mode: {e}");
            }
        }
    }

    exec.stop();
}
