use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use stories_core::RequestToken;
use stories_logging::{stories_debug, stories_warn};
use thiserror::Error;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, FetchError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(FetchError),
}

enum EngineCommand {
    Fetch { token: RequestToken, url: String },
}

/// Runs fetches on a background tokio runtime and reports completions.
///
/// Requests are never cancelled; a superseded request still completes and
/// its event is delivered, leaving staleness to the receiver.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(settings).map_err(EngineError::Client)?;
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
            stories_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch(&self, token: RequestToken, url: impl Into<String>) {
        if self
            .cmd_tx
            .send(EngineCommand::Fetch {
                token,
                url: url.into(),
            })
            .is_err()
        {
            stories_warn!("Engine is not running; dropped request {}", token);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { token, url } => {
            let result = fetcher.fetch(&url).await;
            if let Err(err) = &result {
                stories_warn!("Request {} failed: {}", token, err);
            }
            let _ = event_tx.send(EngineEvent::FetchCompleted { token, result });
        }
    }
}
