//! One-shot hand-off from the lightweight sources to a full provider.
//!
//! Building a full-mode provider can involve loading large external
//! datasets, so it runs on a worker thread while the lightweight engine
//! keeps ticking.  Only the *finished* source list ever crosses the
//! channel; the update thread can never observe a partially built provider.
//! There is no cancellation — once requested, the build runs to completion
//! or failure.

use std::sync::mpsc;
use std::thread;

use drift_source::PointSource;
use thiserror::Error;

/// Failure reported by a provider build.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("provider initialization failed: {0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Constructs the full-mode source list.  The build happens off the update
/// thread; return only once every source is completely initialized.
pub trait ProviderBuilder: Send + 'static {
    fn build(self: Box<Self>) -> Result<Vec<Box<dyn PointSource>>, ProviderError>;
}

impl<F> ProviderBuilder for F
where
    F: FnOnce() -> Result<Vec<Box<dyn PointSource>>, ProviderError> + Send + 'static,
{
    fn build(self: Box<Self>) -> Result<Vec<Box<dyn PointSource>>, ProviderError> {
        (*self)()
    }
}

/// Receiving end of an in-flight provider build.
pub struct HandoffSlot {
    rx: mpsc::Receiver<Result<Vec<Box<dyn PointSource>>, ProviderError>>,
}

impl HandoffSlot {
    /// Start building on a worker thread.
    pub fn spawn<B: ProviderBuilder>(builder: B) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The engine may have been dropped meanwhile; a dead receiver
            // is fine.
            let _ = tx.send(Box::new(builder).build());
        });
        Self { rx }
    }

    /// Non-blocking poll.  `None` while the build is still running.
    pub fn poll(&self) -> Option<Result<Vec<Box<dyn PointSource>>, ProviderError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(ProviderError::new(
                "provider worker exited without reporting a result",
            ))),
        }
    }
}
