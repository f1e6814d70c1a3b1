//! Chat commands backed by the Github API.
//!
//! The dispatcher decides which command to run and how it was invoked; the
//! commands here look things up, render an [Embed](embed::Embed), and hand it
//! to a [Deliver] implementation.

pub mod commit;
mod deliver;
pub mod locale;

pub use self::commit::{CommitCommand, CommitError, Disposition};
pub use self::deliver::{Deliver, DeliveryError};
pub use self::locale::{Catalog, Localize};

/// How a command was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationMode {
    /// Triggered with the command prefix. Failures are reported to the user.
    Explicit,

    /// Triggered by a loose match in ordinary chat. Failures are silent.
    Implicit,
}

impl InvocationMode {
    /// The mode for a message which did or did not carry the command prefix.
    pub fn from_prefixed(prefixed: bool) -> Self {
        if prefixed {
            InvocationMode::Explicit
        } else {
            InvocationMode::Implicit
        }
    }
}
