//! I/O boundary traits for testability
//!
//! These traits abstract filesystem, socket and HTTP access, allowing services
//! to be tested with mock implementations.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use tracing::trace;

use crate::domain::PathMode;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file, truncating an existing one.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists (symlinks are followed).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check existence or access permission for the real user.
    fn access(&self, path: &Path, mode: PathMode) -> bool;
}

/// TCP connection abstraction.
pub trait Connector: Send + Sync {
    /// Open (and immediately drop) a TCP connection to `host:port`.
    ///
    /// Returns the address that accepted the connection.
    fn connect(&self, host: &str, port: u16, timeout: Duration) -> io::Result<SocketAddr>;
}

/// HTTP probe abstraction.
pub trait HttpProbe: Send + Sync {
    /// Issue a GET request and return the final status code.
    fn status(&self, url: &str, timeout: Duration) -> Result<u16, String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[cfg(unix)]
    fn access(&self, path: &Path, mode: PathMode) -> bool {
        use nix::unistd::{access, AccessFlags};

        let flags = match mode {
            PathMode::Exists => return path.exists(),
            PathMode::Readable => AccessFlags::R_OK,
            PathMode::Writable => AccessFlags::W_OK,
            PathMode::Executable => AccessFlags::X_OK,
        };
        access(path, flags).is_ok()
    }

    #[cfg(not(unix))]
    fn access(&self, path: &Path, mode: PathMode) -> bool {
        match mode {
            PathMode::Exists | PathMode::Readable | PathMode::Executable => path.exists(),
            PathMode::Writable => std::fs::metadata(path)
                .map(|m| !m.permissions().readonly())
                .unwrap_or(false),
        }
    }
}

/// Real TCP connector using `std::net`.
#[derive(Debug, Default)]
pub struct RealConnector;

impl Connector for RealConnector {
    fn connect(&self, host: &str, port: u16, timeout: Duration) -> io::Result<SocketAddr> {
        let mut last_err = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(_stream) => return Ok(addr),
                Err(e) => {
                    trace!("connect {}: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("no addresses resolved for {}:{}", host, port),
            )
        }))
    }
}

/// Real HTTP probe using a blocking `reqwest` client.
///
/// Redirects are followed; the status of the final response is reported.
#[derive(Debug, Default)]
pub struct ReqwestProbe;

impl HttpProbe for ReqwestProbe {
    fn status(&self, url: &str, timeout: Duration) -> Result<u16, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| format!("build http client: {}", e))?;
        let response = client.get(url).send().map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}
