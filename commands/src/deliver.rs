use async_trait::async_trait;
use embed::Embed;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A rendered message could not be sent.
#[derive(Debug, thiserror::Error)]
#[error("Delivering message: {0}")]
pub struct DeliveryError(#[source] BoxError);

impl DeliveryError {
    /// Wrap the underlying failure.
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }
}

/// Sends a rendered embed to the chat platform.
#[async_trait]
pub trait Deliver: Send + Sync {
    /// Where the message goes, e.g. the channel or message being replied to.
    type Target: Send + Sync;

    /// Send `embed` to `target`.
    async fn deliver(&self, target: &Self::Target, embed: Embed) -> Result<(), DeliveryError>;
}
