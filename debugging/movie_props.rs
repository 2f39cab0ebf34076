//! Fetch one movie from both providers and print what each call returned,
//! followed by the merged record the API would serve.
//! Usage:
//!   cargo run --bin movie_props -- <movie_id>
//! Requires the same environment as the server (.env supported).

use anyhow::{Context, Result};
use dotenvy::dotenv;
use movielink::aggregate::merge;
use movielink::config::Config;
use movielink::metadata::{MetadataApi, MetadataClient};
use movielink::streaming::{StreamingApi, StreamingClient};
use movielink::upstream::http_client;
use std::env;
use std::fmt::Debug;

fn report<T: Debug>(label: &str, result: &Result<T, movielink::error::UpstreamError>) {
    match result {
        Ok(value) => println!("== {label}\n{value:#?}\n"),
        Err(e) => println!("== {label} FAILED\n{e}\n"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let id = env::args()
        .nth(1)
        .context("usage: movie_props <movie_id>")?;
    let config = Config::from_env()?;
    let client = http_client(config.upstream_timeout)?;
    let metadata = MetadataClient::from_config(&config, client.clone());
    let streaming = StreamingClient::from_config(&config, client);

    let (title, actors, options) = tokio::join!(
        metadata.fetch_title(&id),
        metadata.fetch_main_actors(&id),
        streaming.fetch_streaming_options(&id),
    );
    report("base info", &title);
    report("main actors", &actors);
    report("streaming options", &options);

    let title = title.context("base info is required to build a movie")?;
    let movie = merge(
        &id,
        title,
        actors.unwrap_or_default(),
        options.unwrap_or_default(),
    );
    println!("== merged\n{}", serde_json::to_string_pretty(&movie)?);
    Ok(())
}
