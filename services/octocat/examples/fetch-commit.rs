//! Look up a single commit with the Github GraphQL API.
//!
//! Usage: `GITHUB_TOKEN=... cargo run --example fetch-commit -- <owner> <repository> <expression>`

use eyre::eyre;
use octocat::{classify, CommitReference, Fetcher as _, GithubConfig, GithubGraphQL};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(owner), Some(repository), Some(expression)) = (args.next(), args.next(), args.next())
    else {
        return Err(eyre!("usage: fetch-commit <owner> <repository> <expression>"));
    };

    let client = GithubGraphQL::from_config(&GithubConfig::default())?;
    let reference = CommitReference::new(owner, repository, expression);

    let result = client.fetch(&reference.query()).await?;
    println!("{reference}: {:#?}", classify(&result));

    Ok(())
}
