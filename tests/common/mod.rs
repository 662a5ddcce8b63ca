//! Shared fixtures: a one-shot local HTTP server and sample universities.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use unidash::University;

/// Serves the given `(status, body)` responses in order, one per connection.
pub struct FixtureServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&buf);
                let target = head
                    .lines()
                    .next()
                    .and_then(|l| l.split_whitespace().nth(1))
                    .unwrap_or_default()
                    .to_string();
                seen.lock().unwrap().push(target);

                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(reply.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    /// Request targets (path + query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// A base URL nothing listens on.
pub fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn uni(id: &str, name: &str, state: &str, country: &str) -> University {
    University {
        id: id.into(),
        name: name.into(),
        website: format!("https://www.{}.example.edu", id),
        state: state.into(),
        country: country.into(),
    }
}

pub fn india() -> Vec<University> {
    vec![
        uni("1", "IIT Bombay", "Maharashtra", "India"),
        uni("2", "University of Mumbai", "Maharashtra", "India"),
        uni("3", "IISc Bangalore", "Karnataka", "India"),
        uni("4", "IIT Delhi", "Delhi", "India"),
    ]
}

pub fn japan() -> Vec<University> {
    vec![
        uni("10", "University of Tokyo", "Tokyo", "Japan"),
        uni("11", "Kyoto University", "Kyoto", "Japan"),
    ]
}

pub fn as_json(list: &[University]) -> String {
    serde_json::to_string(list).unwrap()
}
