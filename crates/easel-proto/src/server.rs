#![forbid(unsafe_code)]

//! Blocking HTTP command listener.
//!
//! A deliberately small HTTP/1.1 handler: one thread per connection, `POST`
//! only, body treated as a line-delimited command script. The leniency
//! policy is part of the protocol contract: a line that fails to parse is
//! logged and skipped, and the response is still `200` once the body has
//! been fully scanned. Transport-level problems (bad request framing, an
//! oversize or unreadable body) are the only things that produce 4xx/5xx.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use easel_runtime::op::Op;
use tracing::{debug, warn};

use crate::parse::parse;

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on an accepted request body. Command scripts are tiny;
/// anything larger is a misbehaving client and gets a 413.
const MAX_BODY_BYTES: u64 = 1 << 20;

/// Per-request script statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub accepted: usize,
    pub skipped: usize,
}

/// Parses every line of `body`, posting each valid operation and skipping
/// (with a log line) each invalid one. Blank lines are skipped silently.
pub fn handle_script<F: Fn(Op)>(body: &str, post: &F) -> ScriptOutcome {
    let mut outcome = ScriptOutcome::default();
    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse(line) {
            Ok(op) => {
                post(op);
                outcome.accepted += 1;
            }
            Err(e) => {
                warn!(line, error = %e, "skipping malformed command line");
                outcome.skipped += 1;
            }
        }
    }
    outcome
}

/// Accepts connections forever, handling each on its own thread.
///
/// Returns only if the listener itself fails.
pub fn serve<F>(listener: TcpListener, post: F) -> io::Result<()>
where
    F: Fn(Op) + Send + Sync + 'static,
{
    let post = Arc::new(post);
    for stream in listener.incoming() {
        let stream = stream?;
        let post = Arc::clone(&post);
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        thread::Builder::new()
            .name("easel-http".into())
            .spawn(move || {
                if let Err(e) = handle_connection(stream, &*post) {
                    warn!(peer, error = %e, "command connection failed");
                }
            })?;
    }
    Ok(())
}

fn handle_connection<F: Fn(Op)>(mut stream: TcpStream, post: &F) -> io::Result<()> {
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
        return respond(&mut stream, 400, "bad request\n");
    };

    let mut content_length: Option<u64> = None;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().ok();
        }
    }

    if method != "POST" {
        return respond(&mut stream, 405, "method not allowed\n");
    }

    if content_length.is_some_and(|len| len > MAX_BODY_BYTES) {
        return respond(&mut stream, 413, "request body too large\n");
    }

    let body = match read_body(&mut reader, content_length) {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            return respond(&mut stream, 500, "error reading request body\n");
        }
    };

    let outcome = handle_script(&body, post);
    debug!(
        path,
        accepted = outcome.accepted,
        skipped = outcome.skipped,
        "command script processed"
    );
    respond(&mut stream, 200, "commands processed\n")
}

/// Reads the body incrementally through `take`, so the buffer only ever
/// grows with bytes that actually arrive, never with the declared length.
fn read_body(reader: &mut impl BufRead, content_length: Option<u64>) -> io::Result<String> {
    let mut buf = Vec::new();
    match content_length {
        Some(len) => {
            reader.take(len).read_to_end(&mut buf)?;
            if (buf.len() as u64) < len {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "request body shorter than declared content-length",
                ));
            }
        }
        // No length header: read until the client closes its write side.
        None => {
            reader.take(MAX_BODY_BYTES).read_to_end(&mut buf)?;
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn respond(stream: &mut TcpStream, status: u16, body: &str) -> io::Result<()> {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        _ => "Internal Server Error",
    };
    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn collecting_post() -> (Arc<Mutex<Vec<Op>>>, impl Fn(Op)) {
        let ops = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ops);
        (ops, move |op| sink.lock().unwrap().push(op))
    }

    #[test]
    fn script_posts_valid_lines_in_order() {
        let (ops, post) = collecting_post();
        let outcome = handle_script("green\nbgrect 0.1 0.1 0.9 0.9\nupdate\n", &post);

        assert_eq!(outcome, ScriptOutcome { accepted: 3, skipped: 0 });
        let ops = ops.lock().unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[2], Op::Refresh);
    }

    #[test]
    fn bad_lines_are_skipped_not_fatal() {
        let (ops, post) = collecting_post();
        let outcome = handle_script("white\nfigure 2.0 0.5\nnope\nmove 0.1 0.1\n", &post);

        assert_eq!(outcome, ScriptOutcome { accepted: 2, skipped: 2 });
        assert_eq!(ops.lock().unwrap().len(), 2);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let (ops, post) = collecting_post();
        let outcome = handle_script("\n\nreset\n\n", &post);

        assert_eq!(outcome, ScriptOutcome { accepted: 1, skipped: 0 });
        assert_eq!(ops.lock().unwrap()[0], Op::Reset);
    }
}
