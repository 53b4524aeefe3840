//! One-shot HTTP responder bound to a local port.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Request as seen by the server.
#[derive(Debug)]
pub(crate) struct Received {
    pub(crate) request_line: String,
    pub(crate) body: String,
}

/// Accepts one connection, waits `delay`, then answers with `status` and
/// `body`. Returns the base URL and a handle yielding what was received.
pub(crate) fn serve_once(
    status: u16,
    body: &'static str,
    delay: Duration,
) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_len = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_len = value.trim().parse().unwrap();
                }
            }
        }
        let mut req_body = vec![0; content_len];
        reader.read_exact(&mut req_body).unwrap();

        thread::sleep(delay);
        let response = format!(
            "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        // The client may already have given up.
        let _ = stream.write_all(response.as_bytes());

        Received {
            request_line: request_line.trim_end().to_owned(),
            body: String::from_utf8(req_body).unwrap(),
        }
    });

    (base, handle)
}

/// Base URL of a port nothing listens on.
pub(crate) fn closed_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    base
}
