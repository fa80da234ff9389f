#![forbid(unsafe_code)]

//! Demo client: seeds a centered figure and walks it diagonally.
//!
//! Each step posts a `move`/`update` pair and sleeps, so the figure
//! visibly drifts across the canvas. Address comes from the first argument
//! or `EASEL_ADDR` (default 127.0.0.1:17000).

use std::env;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::process;
use std::thread;
use std::time::Duration;

const STEPS: usize = 10;
const STEP_DELAY: Duration = Duration::from_secs(1);
const STEP_DX: f64 = 0.02;
const STEP_DY: f64 = 0.02;

fn main() {
    let addr = env::args()
        .nth(1)
        .or_else(|| env::var("EASEL_ADDR").ok())
        .unwrap_or_else(|| "127.0.0.1:17000".to_string());

    // Reset first so reruns against a warm server start clean.
    send(&addr, "reset\nwhite\nfigure 0.5 0.5\nupdate\n");
    thread::sleep(STEP_DELAY);

    for step in 1..=STEPS {
        println!("step {step}/{STEPS}");
        send(&addr, &format!("move {STEP_DX} {STEP_DY}\nupdate\n"));
        thread::sleep(STEP_DELAY);
    }
    println!("done");
}

fn send(addr: &str, body: &str) {
    match post_script(addr, body) {
        Ok(status) if status.contains("200") => {}
        Ok(status) => {
            eprintln!("server rejected script: {status}");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("failed to reach {addr}: {e}");
            process::exit(1);
        }
    }
}

/// Posts `body` as a command script, returning the response status line.
fn post_script(addr: &str, body: &str) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(addr)?;
    write!(
        stream,
        "POST / HTTP/1.1\r\nHost: {addr}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()?;

    let mut status = String::new();
    BufReader::new(stream).read_line(&mut status)?;
    Ok(status.trim_end().to_string())
}
