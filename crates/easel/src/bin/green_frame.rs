#![forbid(unsafe_code)]

//! Demo client: paints a green background with a framed rectangle.
//!
//! Posts a three-line script to a running easel instance. Address comes
//! from the first argument or `EASEL_ADDR` (default 127.0.0.1:17000).

use std::env;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::process;

const SCRIPT: &str = "green\nbgrect 0.1 0.1 0.9 0.9\nupdate\n";

fn main() {
    let addr = env::args()
        .nth(1)
        .or_else(|| env::var("EASEL_ADDR").ok())
        .unwrap_or_else(|| "127.0.0.1:17000".to_string());

    match post_script(&addr, SCRIPT) {
        Ok(status) if status.contains("200") => println!("done"),
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
