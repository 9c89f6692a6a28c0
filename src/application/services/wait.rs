//! Waiters: block until a port, URL or path becomes available

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, Poller};
use crate::domain::parse_timeout;
use crate::infrastructure::traits::{Connector, FileSystem, HttpProbe};

/// Lower bound for a single connect/request attempt.
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(100);

/// Service polling network endpoints and paths until they are ready.
pub struct WaitService {
    fs: Arc<dyn FileSystem>,
    connector: Arc<dyn Connector>,
    http: Arc<dyn HttpProbe>,
    poller: Poller,
    connect_timeout: Duration,
}

impl WaitService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        connector: Arc<dyn Connector>,
        http: Arc<dyn HttpProbe>,
        poller: Poller,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            fs,
            connector,
            http,
            poller,
            connect_timeout,
        }
    }

    /// Wait until a TCP connection to `host:port` succeeds.
    pub fn wait_for_port(&self, host: &str, port: u16, timeout_secs: f64) -> ApplicationResult<()> {
        let timeout = parse_timeout(timeout_secs)?;
        debug!("wait_for_port: {}:{} timeout={:?}", host, port, timeout);

        let ready = self.poller.until(timeout, |remaining| {
            match self
                .connector
                .connect(host, port, self.attempt_timeout(remaining))
            {
                Ok(addr) => {
                    info!("{}:{} is reachable ({})", host, port, addr);
                    true
                }
                Err(e) => {
                    debug!("{}:{} not reachable: {}", host, port, e);
                    false
                }
            }
        });

        if ready {
            Ok(())
        } else {
            Err(ApplicationError::Timeout {
                target: format!("{}:{}", host, port),
                timeout: timeout_secs,
            })
        }
    }

    /// Wait until a GET on `url` answers with a 2xx status.
    pub fn wait_for_http(&self, url: &str, timeout_secs: f64) -> ApplicationResult<()> {
        let timeout = parse_timeout(timeout_secs)?;
        debug!("wait_for_http: {} timeout={:?}", url, timeout);

        let ready = self.poller.until(timeout, |remaining| {
            match self.http.status(url, self.attempt_timeout(remaining)) {
                Ok(status) if (200..300).contains(&status) => {
                    info!("{} answered {}", url, status);
                    true
                }
                Ok(status) => {
                    debug!("{} answered {}", url, status);
                    false
                }
                Err(e) => {
                    debug!("{} not retrievable: {}", url, e);
                    false
                }
            }
        });

        if ready {
            Ok(())
        } else {
            Err(ApplicationError::Timeout {
                target: format!("{} to return 2xx", url),
                timeout: timeout_secs,
            })
        }
    }

    /// Wait until `path` exists.
    pub fn wait_for_path(&self, path: &Path, timeout_secs: f64) -> ApplicationResult<()> {
        let timeout = parse_timeout(timeout_secs)?;
        debug!("wait_for_path: {} timeout={:?}", path.display(), timeout);

        if self.poller.until(timeout, |_| self.fs.exists(path)) {
            info!("{} exists", path.display());
            Ok(())
        } else {
            Err(ApplicationError::Timeout {
                target: format!("{} to exist", path.display()),
                timeout: timeout_secs,
            })
        }
    }

    fn attempt_timeout(&self, remaining: Duration) -> Duration {
        remaining.min(self.connect_timeout).max(MIN_ATTEMPT_TIMEOUT)
    }
}
