//! The commit command: show a Github commit as an embed.

use embed::{Embed, EmbedAuthor, EmbedFooter};
use octocat::models::CommitInfo;
use octocat::{ClassifiedOutcome, CommitReference, Fetcher};
use thiserror::Error;

use crate::locale::{self, Localize};
use crate::{Deliver, InvocationMode};

/// Accent color of commit embeds.
pub const COMMIT_COLOR: u32 = 0x2cbe4e;

/// Footer icon of commit embeds.
pub const COMMIT_ICON: &str = "https://github.githubassets.com/images/icons/emoji/unicode/1f4dd.png";

/// A failure reported back to the user who invoked the command.
///
/// The display text is already localized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// Github does not know the repository or revision.
    #[error("{message}")]
    NotFound {
        /// What was looked up.
        reference: CommitReference,
        /// Localized message naming the reference.
        message: String,
    },

    /// The revision did not resolve to a commit.
    #[error("{0}")]
    NoResult(String),

    /// Github could not be reached, or answered with something unusable.
    #[error("{0}")]
    Fetch(String),
}

/// What happened to a successful or silently dropped invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// An embed was delivered.
    Delivered,

    /// The lookup failed and the invocation was implicit, so nothing was sent.
    Suppressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    NotFound,
    NoResult,
    Transport,
}

fn first_present<T>(primary: Option<T>, secondary: Option<T>) -> Option<T> {
    primary.or(secondary)
}

/// The author's icon: the Github avatar, else the git avatar.
pub fn author_icon(commit: &CommitInfo) -> Option<&str> {
    first_present(
        commit.user().map(|user| user.avatar_url.as_str()),
        commit
            .author
            .as_ref()
            .and_then(|author| author.avatar_url.as_deref()),
    )
}

/// The author's display name: the Github login, else the git author name.
pub fn author_name(commit: &CommitInfo) -> Option<&str> {
    first_present(
        commit.user().map(|user| user.login.as_str()),
        commit.author.as_ref().and_then(|author| author.name.as_deref()),
    )
}

/// The author's profile link, only available for Github users.
pub fn author_url(commit: &CommitInfo) -> Option<&str> {
    commit.user().map(|user| user.url.as_str())
}

fn timestamp(commit: &CommitInfo) -> Option<&str> {
    let pushed = commit.pushed_date.as_deref()?;
    match chrono::DateTime::parse_from_rfc3339(pushed) {
        Ok(_) => Some(pushed),
        Err(error) => {
            tracing::warn!(%error, pushed, "dropping unparseable push timestamp");
            None
        }
    }
}

/// Render a commit as an embed. The result still needs [embed::truncate].
pub fn build_embed<L>(commit: &CommitInfo, locale: &str, localize: &L) -> Embed
where
    L: Localize + ?Sized,
{
    let footer = localize.localize(
        locale::COMMIT_FILES_COUNT,
        &[("count", commit.changed_files.to_string())],
        locale,
    );

    let mut embed = Embed::new()
        .color(COMMIT_COLOR)
        .title(commit.title())
        .url(commit.commit_url.clone())
        .footer(EmbedFooter {
            text: footer,
            icon_url: Some(COMMIT_ICON.to_owned()),
        });

    // The platform rejects an author block without a name.
    if let Some(name) = author_name(commit) {
        embed = embed.author(EmbedAuthor {
            name: name.to_owned(),
            url: author_url(commit).map(str::to_owned),
            icon_url: author_icon(commit).map(str::to_owned),
        });
    }

    if let Some(timestamp) = timestamp(commit) {
        embed = embed.timestamp(timestamp);
    }

    embed
}

/// Looks up a commit and delivers it as an embed.
#[derive(Debug, Clone)]
pub struct CommitCommand<F, L, D> {
    fetcher: F,
    localize: L,
    delivery: D,
}

impl<F, L, D> CommitCommand<F, L, D>
where
    F: Fetcher,
    L: Localize,
    D: Deliver,
{
    /// Create the command from its collaborators.
    pub fn new(fetcher: F, localize: L, delivery: D) -> Self {
        Self {
            fetcher,
            localize,
            delivery,
        }
    }

    /// Run the command for one invocation.
    ///
    /// On success the embed has been delivered. When the lookup fails, an
    /// implicit invocation is suppressed, and an explicit one returns a
    /// localized error for the dispatcher to show.
    #[tracing::instrument(skip(self, reference, target), fields(%reference))]
    pub async fn run(
        &self,
        reference: &CommitReference,
        locale: &str,
        mode: InvocationMode,
        target: &D::Target,
    ) -> Result<Disposition, CommitError> {
        let failure = match self.fetcher.commit(reference).await {
            ClassifiedOutcome::Success(commit) => {
                let embed = embed::truncate(build_embed(&commit, locale, &self.localize));
                match self.delivery.deliver(target, embed).await {
                    Ok(()) => {
                        tracing::debug!("delivered");
                        return Ok(Disposition::Delivered);
                    }
                    Err(error) => {
                        tracing::warn!(%error, "delivery failed");
                        Failure::Transport
                    }
                }
            }
            ClassifiedOutcome::NotFound => Failure::NotFound,
            ClassifiedOutcome::NoResult => Failure::NoResult,
            ClassifiedOutcome::TransportError => Failure::Transport,
        };

        match mode {
            InvocationMode::Implicit => {
                tracing::debug!(?failure, "suppressed");
                Ok(Disposition::Suppressed)
            }
            InvocationMode::Explicit => {
                tracing::debug!(?failure, "raised");
                Err(self.error(failure, reference, locale))
            }
        }
    }

    fn error(&self, failure: Failure, reference: &CommitReference, locale: &str) -> CommitError {
        match failure {
            Failure::NotFound => CommitError::NotFound {
                reference: reference.clone(),
                message: self.localize.localize(
                    locale::COMMIT_NOT_FOUND,
                    &[
                        ("expression", reference.expression.clone()),
                        ("owner", reference.owner.clone()),
                        ("repository", reference.repository.clone()),
                    ],
                    locale,
                ),
            },
            Failure::NoResult => {
                CommitError::NoResult(self.localize.localize(locale::NO_RESULT, &[], locale))
            }
            Failure::Transport => {
                CommitError::Fetch(self.localize.localize(locale::FETCH_ERROR, &[], locale))
            }
        }
    }
}
