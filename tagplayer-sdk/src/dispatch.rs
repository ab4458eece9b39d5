//! Non-blocking command dispatch with deep-link fallback
//!
//! Every request runs on its own worker thread. The caller gets a
//! [`DispatchHandle`] immediately and can wait for the [`DispatchReport`]
//! or drop the handle and forget about it. Failures never propagate: they
//! are logged and carried in the report.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tagplayer_api::{
    ApiError, Command, ControlClient, ControlRequest, ControlResponse, ControlTransport,
    ControllerConfig, DeepLink, MediaIdentifier, Room,
};

use crate::opener::{LinkOpener, LoggingOpener};
use crate::SdkError;

/// Callback fired once per finished request, on the worker thread
pub type DispatchObserver = Arc<dyn Fn(&DispatchReport) + Send + Sync>;

/// What happened to the deep-link fallback of a failed identifier request
#[derive(Debug)]
pub enum FallbackOutcome {
    /// The link was handed to the opener
    Opened(DeepLink),
    /// The link was built but the opener refused it
    OpenFailed { link: DeepLink, error: SdkError },
    /// The identifier could not be turned into a link
    Skipped(ApiError),
}

/// Final result of one request
#[derive(Debug)]
pub struct DispatchReport {
    /// Issue order, unique per dispatcher
    pub sequence: u64,
    pub request: ControlRequest,
    pub result: Result<ControlResponse, ApiError>,
    /// Only set for failed identifier requests that were eligible for a fallback
    pub fallback: Option<FallbackOutcome>,
}

impl DispatchReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The deep-link that was opened, if any
    pub fn opened_link(&self) -> Option<&DeepLink> {
        match &self.fallback {
            Some(FallbackOutcome::Opened(link)) => Some(link),
            _ => None,
        }
    }
}

/// Handle to an in-flight request
///
/// Dropping the handle does not cancel the request.
#[derive(Debug)]
pub struct DispatchHandle {
    sequence: u64,
    request: ControlRequest,
    receiver: mpsc::Receiver<DispatchReport>,
}

impl DispatchHandle {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn request(&self) -> &ControlRequest {
        &self.request
    }

    /// Block until the request finished
    pub fn wait(self) -> Result<DispatchReport, SdkError> {
        self.receiver.recv().map_err(|_| SdkError::DispatchLost)
    }

    /// Block until the request finished or `timeout` elapsed
    pub fn wait_timeout(self, timeout: Duration) -> Result<DispatchReport, SdkError> {
        self.receiver.recv_timeout(timeout).map_err(|e| match e {
            mpsc::RecvTimeoutError::Timeout => SdkError::DispatchTimeout,
            mpsc::RecvTimeoutError::Disconnected => SdkError::DispatchLost,
        })
    }
}

/// The two requests issued for one identifier
#[derive(Debug)]
pub struct IdentifierDispatch {
    /// Queue clearing, issued first and not awaited
    pub clear_queue: DispatchHandle,
    pub play: DispatchHandle,
}

/// Turns commands and identifiers into control requests
///
/// The room is passed on every call; the dispatcher holds no room state.
///
/// ```rust,no_run
/// use tagplayer_api::{Command, ControllerConfig, MediaIdentifier, Room};
/// use tagplayer_sdk::CommandDispatcher;
///
/// let dispatcher = CommandDispatcher::new(ControllerConfig::default());
/// let room = Room::new("Bad")?;
///
/// dispatcher.dispatch_command(Command::PlayPause, &room);
///
/// let identifier = MediaIdentifier::new("spotify:track:ABC123")?;
/// let report = dispatcher.dispatch_identifier(&identifier, &room).play.wait()?;
/// if let Some(link) = report.opened_link() {
///     println!("Server unreachable, opened {}", link);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct CommandDispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    config: ControllerConfig,
    transport: Arc<dyn ControlTransport>,
    opener: Arc<dyn LinkOpener>,
    observer: Option<DispatchObserver>,
    sequence: AtomicU64,
}

impl CommandDispatcher {
    /// Create a dispatcher talking to the configured server
    ///
    /// Fallback links are only logged; use [`CommandDispatcher::with_parts`]
    /// to hand them to a real opener.
    pub fn new(config: ControllerConfig) -> Self {
        let transport = Arc::new(ControlClient::new(config.clone()));
        Self::with_parts(config, transport, Arc::new(LoggingOpener), None)
    }

    /// Create a dispatcher from explicit collaborators
    pub fn with_parts(
        config: ControllerConfig,
        transport: Arc<dyn ControlTransport>,
        opener: Arc<dyn LinkOpener>,
        observer: Option<DispatchObserver>,
    ) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                config,
                transport,
                opener,
                observer,
                sequence: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Send a command to a room
    pub fn dispatch_command(&self, command: Command, room: &Room) -> DispatchHandle {
        let request = ControlRequest::command(room.clone(), command, self.inner.config.volume_step);
        self.issue(request, SendOrder::default())
    }

    /// Clear the room's queue, then play an identifier
    ///
    /// The identifier request is sent only once the clear-queue request has
    /// gone out, but it does not wait for the clear-queue response.
    pub fn dispatch_identifier(
        &self,
        identifier: &MediaIdentifier,
        room: &Room,
    ) -> IdentifierDispatch {
        let (started, after) = mpsc::channel();

        let clear_queue = self.issue(
            ControlRequest::command(room.clone(), Command::ClearQueue, self.inner.config.volume_step),
            SendOrder {
                started: Some(started),
                after: None,
            },
        );
        let play = self.issue(
            ControlRequest::play(room.clone(), identifier.clone()),
            SendOrder {
                started: None,
                after: Some(after),
            },
        );

        IdentifierDispatch { clear_queue, play }
    }

    fn issue(&self, request: ControlRequest, order: SendOrder) -> DispatchHandle {
        let sequence = self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let (sender, receiver) = mpsc::channel();

        let inner = Arc::clone(&self.inner);
        let worker_request = request.clone();
        let spawned = thread::Builder::new()
            .name(format!("tagplayer-dispatch-{}", sequence))
            .spawn(move || inner.run(sequence, worker_request, order, sender));

        if let Err(e) = spawned {
            // No worker thread available: run inline. The order signals were
            // dropped with the closure, so a waiting peer is released.
            tracing::warn!("Failed to spawn dispatch worker: {}", e);
            let (sender, fallback_receiver) = mpsc::channel();
            self.inner.run(sequence, request.clone(), SendOrder::default(), sender);
            return DispatchHandle {
                sequence,
                request,
                receiver: fallback_receiver,
            };
        }

        DispatchHandle {
            sequence,
            request,
            receiver,
        }
    }
}

/// Send ordering between the requests of one dispatch
///
/// `started` fires right before this request is handed to the transport;
/// `after` blocks until the peer's request has been handed over (or the
/// peer worker is gone).
#[derive(Default)]
struct SendOrder {
    started: Option<mpsc::Sender<()>>,
    after: Option<mpsc::Receiver<()>>,
}

impl DispatcherInner {
    fn run(
        &self,
        sequence: u64,
        request: ControlRequest,
        order: SendOrder,
        sender: mpsc::Sender<DispatchReport>,
    ) {
        let report = self.execute(sequence, request, order);

        if let Some(observer) = &self.observer {
            observer(&report);
        }

        // Receiver is gone when the handle was dropped
        let _ = sender.send(report);
    }

    fn execute(&self, sequence: u64, request: ControlRequest, order: SendOrder) -> DispatchReport {
        let url = request.url(&self.config);

        if let Some(after) = order.after {
            // Err means the peer finished or never started; either way, go
            let _ = after.recv();
        }
        if let Some(started) = order.started {
            let _ = started.send(());
        }

        tracing::debug!("[{}] Calling URL: {}", sequence, url);
        let result = self.transport.send(&request);

        let fallback = match &result {
            Ok(response) => {
                match &response.body {
                    Some(body) => tracing::debug!("[{}] HTTP {}: {}", sequence, response.status, body),
                    None => tracing::debug!("[{}] HTTP {}", sequence, response.status),
                }
                None
            }
            Err(error) => {
                tracing::warn!("[{}] Request to {} failed: {}", sequence, url, error);
                request
                    .identifier()
                    .and_then(|identifier| self.fallback_for(identifier, error))
            }
        };

        DispatchReport {
            sequence,
            request,
            result,
            fallback,
        }
    }

    fn fallback_for(
        &self,
        identifier: &MediaIdentifier,
        error: &ApiError,
    ) -> Option<FallbackOutcome> {
        if !self.config.fallback_policy.applies_to(error) {
            return None;
        }
        if !identifier.is_spotify() {
            tracing::debug!("No fallback for non-streaming identifier '{}'", identifier);
            return None;
        }

        let link = match DeepLink::for_identifier(identifier, &self.config) {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!("Skipping deep-link fallback: {}", e);
                return Some(FallbackOutcome::Skipped(e));
            }
        };

        tracing::info!("Starting deep-link fallback: {}", link);
        match self.opener.open(&link) {
            Ok(()) => Some(FallbackOutcome::Opened(link)),
            Err(open_error) => {
                tracing::warn!("Failed to open deep-link {}: {}", link, open_error);
                Some(FallbackOutcome::OpenFailed {
                    link,
                    error: open_error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tagplayer_api::Result as ApiResult;

    struct RefusingTransport;

    impl ControlTransport for RefusingTransport {
        fn send(&self, _request: &ControlRequest) -> ApiResult<ControlResponse> {
            Err(ApiError::Transport("connection refused".to_string()))
        }
    }

    struct RefusingOpener;

    impl LinkOpener for RefusingOpener {
        fn open(&self, _link: &DeepLink) -> Result<(), SdkError> {
            Err(SdkError::OpenerError("no handler".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_url_is_logged_once_per_request() {
        let config = ControllerConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            connect_timeout_secs: 1,
            read_timeout_secs: 1,
            ..ControllerConfig::default()
        };
        let dispatcher = CommandDispatcher::new(config);
        let request = ControlRequest::command(Room::new("Bad").unwrap(), Command::Next, 3);

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        // Runs on this thread so the scoped subscriber sees the transport too
        tracing::subscriber::with_default(subscriber, || {
            dispatcher.inner.execute(1, request, SendOrder::default());
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("Calling URL").count(), 1, "{}", output);
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let dispatcher = CommandDispatcher::with_parts(
            ControllerConfig::default(),
            Arc::new(RefusingTransport),
            Arc::new(LoggingOpener),
            None,
        );
        let room = Room::new("Bad").unwrap();

        let first = dispatcher.dispatch_command(Command::Next, &room);
        let second = dispatcher.dispatch_command(Command::Next, &room);
        assert!(first.sequence() < second.sequence());

        // Clones share the counter
        let third = dispatcher.clone().dispatch_command(Command::Next, &room);
        assert!(second.sequence() < third.sequence());
    }

    #[test]
    fn test_opener_failure_is_reported() {
        let dispatcher = CommandDispatcher::with_parts(
            ControllerConfig::default(),
            Arc::new(RefusingTransport),
            Arc::new(RefusingOpener),
            None,
        );
        let identifier = MediaIdentifier::new("spotify:track:ABC123").unwrap();
        let report = dispatcher
            .dispatch_identifier(&identifier, &Room::new("Bad").unwrap())
            .play
            .wait()
            .unwrap();

        assert!(report.opened_link().is_none());
        match report.fallback {
            Some(FallbackOutcome::OpenFailed { link, .. }) => {
                assert_eq!(link.content_url(), "https://open.spotify.com/intl-de/track/ABC123");
            }
            other => panic!("expected OpenFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_observer_fires_once_per_request() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let observer_seen = Arc::clone(&seen);
        let observer: DispatchObserver = Arc::new(move |report: &DispatchReport| {
            observer_seen.lock().unwrap().push(report.sequence);
        });

        let dispatcher = CommandDispatcher::with_parts(
            ControllerConfig::default(),
            Arc::new(RefusingTransport),
            Arc::new(LoggingOpener),
            Some(observer),
        );
        let identifier = MediaIdentifier::new("spotify:track:ABC123").unwrap();
        let dispatch = dispatcher.dispatch_identifier(&identifier, &Room::new("Bad").unwrap());
        let clear = dispatch.clear_queue.wait().unwrap();
        let play = dispatch.play.wait().unwrap();

        let mut seen = seen.lock().unwrap().clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![clear.sequence, play.sequence]);
    }
}
