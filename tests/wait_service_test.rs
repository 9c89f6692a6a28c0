//! Tests for WaitService (port, HTTP and path waiters)

use std::collections::VecDeque;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use sdub::application::services::WaitService;
use sdub::application::{ApplicationError, Poller};
use sdub::domain::DomainError;
use sdub::infrastructure::traits::{
    HttpProbe, RealConnector, RealFileSystem, ReqwestProbe,
};
use sdub::util::testing;

/// Probe answering with a scripted sequence, repeating the last answer.
struct ScriptedProbe {
    answers: Mutex<VecDeque<Result<u16, String>>>,
    calls: Mutex<u32>,
}

impl ScriptedProbe {
    fn new(answers: Vec<Result<u16, String>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

impl HttpProbe for ScriptedProbe {
    fn status(&self, _url: &str, _timeout: Duration) -> Result<u16, String> {
        *self.calls.lock().unwrap() += 1;
        let mut answers = self.answers.lock().unwrap();
        if answers.len() > 1 {
            answers.pop_front().unwrap()
        } else {
            answers.front().cloned().unwrap()
        }
    }
}

fn service_with_probe(http: Arc<dyn HttpProbe>) -> WaitService {
    WaitService::new(
        Arc::new(RealFileSystem),
        Arc::new(RealConnector),
        http,
        Poller::new(Duration::from_millis(20)),
        Duration::from_secs(1),
    )
}

fn service() -> WaitService {
    service_with_probe(Arc::new(ReqwestProbe))
}

/// Serve a single HTTP response on a local port, returning the URL.
fn serve_once(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            read_request_target(&mut stream);
            let response = format!(
                "{}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                status_line
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}/health", addr)
}

/// Read one request head and return its request target (`/path`).
fn read_request_target(stream: &mut std::net::TcpStream) -> String {
    let mut buf = [0u8; 4096];
    let mut request = Vec::new();
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&request)
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

/// Serve `302 Location: /ok` for any path except `/ok`, which answers 200.
fn serve_redirect_to_ok() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().take(4) {
            let Ok(mut stream) = stream else { continue };
            let response = if read_request_target(&mut stream) == "/ok" {
                "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok"
            } else {
                "HTTP/1.1 302 Found\r\nLocation: /ok\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            };
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}/health", addr)
}

// ============================================================
// wait_for_port
// ============================================================

#[test]
fn given_listening_port_when_waiting_then_ok() {
    testing::init_test_setup();
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    // Act
    let result = service().wait_for_port("127.0.0.1", port, 2.0);

    // Assert
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn given_closed_port_when_waiting_then_times_out() {
    testing::init_test_setup();
    // Arrange: grab a free port, then release it
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let started = Instant::now();

    // Act
    let err = service().wait_for_port("127.0.0.1", port, 0.3).unwrap_err();

    // Assert
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(
        err.to_string(),
        format!("Timed out waiting for 127.0.0.1:{} after 0.3s.", port)
    );
}

#[test]
fn given_port_opened_later_when_waiting_then_ok() {
    testing::init_test_setup();
    // Arrange
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let opener = thread::spawn(move || {
        thread::sleep(Duration::from_millis(150));
        TcpListener::bind(("127.0.0.1", port)).ok()
    });

    // Act
    let result = service().wait_for_port("127.0.0.1", port, 5.0);

    // Assert
    let listener = opener.join().unwrap();
    if listener.is_some() {
        assert!(result.is_ok(), "{:?}", result);
    }
}

#[test]
fn given_negative_timeout_when_waiting_then_invalid_timeout() {
    let err = service().wait_for_port("127.0.0.1", 1, -1.0).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidTimeout { .. })
    ));
}

// ============================================================
// wait_for_http
// ============================================================

#[test]
fn given_probe_succeeds_on_third_attempt_when_waiting_then_ok() {
    // Arrange
    let probe = Arc::new(ScriptedProbe::new(vec![
        Err("connection refused".to_string()),
        Ok(503),
        Ok(204),
    ]));
    let service = service_with_probe(probe.clone());

    // Act
    let result = service.wait_for_http("http://app:8080/health", 5.0);

    // Assert
    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(probe.calls(), 3);
}

#[test]
fn given_server_error_when_waiting_then_times_out() {
    // Arrange
    let probe = Arc::new(ScriptedProbe::new(vec![Ok(500)]));
    let service = service_with_probe(probe.clone());

    // Act
    let err = service
        .wait_for_http("http://app:8080/health", 0.1)
        .unwrap_err();

    // Assert
    assert_eq!(
        err.to_string(),
        "Timed out waiting for http://app:8080/health to return 2xx after 0.1s."
    );
    assert!(probe.calls() >= 1);
}

#[test]
fn given_probe_reports_unfollowed_redirect_when_waiting_then_not_ready() {
    let probe = Arc::new(ScriptedProbe::new(vec![Ok(302)]));
    let service = service_with_probe(probe);

    assert!(service.wait_for_http("http://app/", 0.0).is_err());
}

#[test]
fn given_local_server_answering_ok_when_probing_then_status_200() {
    testing::init_test_setup();
    // Arrange
    let url = serve_once("HTTP/1.1 200 OK");

    // Act
    let status = ReqwestProbe.status(&url, Duration::from_secs(5));

    // Assert
    assert_eq!(status, Ok(200));
}

#[test]
fn given_local_server_answering_ok_when_waiting_then_ok() {
    testing::init_test_setup();
    let url = serve_once("HTTP/1.1 200 OK");

    let result = service().wait_for_http(&url, 5.0);

    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn given_redirect_to_ok_when_probing_then_final_status_200() {
    testing::init_test_setup();
    // Arrange
    let url = serve_redirect_to_ok();

    // Act
    let status = ReqwestProbe.status(&url, Duration::from_secs(5));

    // Assert
    assert_eq!(status, Ok(200));
}

#[test]
fn given_redirect_to_ok_when_waiting_then_ok() {
    testing::init_test_setup();
    let url = serve_redirect_to_ok();

    let result = service().wait_for_http(&url, 5.0);

    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn given_local_server_answering_500_when_probing_then_status_500() {
    let url = serve_once("HTTP/1.1 500 Internal Server Error");

    let status = ReqwestProbe.status(&url, Duration::from_secs(5));

    assert_eq!(status, Ok(500));
}

// ============================================================
// wait_for_path
// ============================================================

#[test]
fn given_existing_path_when_waiting_then_ok_immediately() {
    let temp = TempDir::new().unwrap();

    let result = service().wait_for_path(temp.path(), 0.0);

    assert!(result.is_ok());
}

#[test]
fn given_path_created_later_when_waiting_then_ok() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ready.flag");
    let target = path.clone();
    let creator = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        fs::write(target, "").unwrap();
    });

    // Act
    let result = service().wait_for_path(&path, 5.0);

    // Assert
    creator.join().unwrap();
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn given_missing_path_when_waiting_then_times_out() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("never");

    let err = service().wait_for_path(&path, 0.05).unwrap_err();

    assert!(matches!(err, ApplicationError::Timeout { .. }));
    assert_eq!(
        err.to_string(),
        format!("Timed out waiting for {} to exist after 0.05s.", path.display())
    );
}
