//! Render a commit embed and print it as JSON.
//!
//! ```sh
//! GITHUB_TOKEN=... cargo run -p commands --example commit-embed -- rust-lang rust master
//! ```

use async_trait::async_trait;
use commands::{
    Catalog, CommitCommand, Deliver, DeliveryError, Disposition, InvocationMode,
};
use embed::Embed;
use octocat::{CommitReference, GithubConfig, GithubGraphQL};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Stdout;

#[async_trait]
impl Deliver for Stdout {
    type Target = ();

    async fn deliver(&self, _target: &(), embed: Embed) -> Result<(), DeliveryError> {
        let rendered = serde_json::to_string_pretty(&embed).map_err(DeliveryError::new)?;
        println!("{rendered}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(owner), Some(repository), Some(expression)) = (args.next(), args.next(), args.next())
    else {
        eyre::bail!("usage: commit-embed <owner> <repository> <expression> [locale]");
    };
    let locale = args.next().unwrap_or_else(|| "en-US".to_owned());

    let github = GithubGraphQL::from_config(&GithubConfig::default())?;
    let command = CommitCommand::new(github, Catalog::english(), Stdout);

    let reference = CommitReference::new(owner, repository, expression);
    match command
        .run(&reference, &locale, InvocationMode::Explicit, &())
        .await?
    {
        Disposition::Delivered => Ok(()),
        Disposition::Suppressed => eyre::bail!("lookup failed silently"),
    }
}
