mod cli;
mod config;
mod markdown;
mod query;
mod render;
mod repl;
mod search;
mod session;
mod wiki;

pub const USER_AGENT: &str = concat!("wikiseek/", env!("CARGO_PKG_VERSION"));

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tokio::io::BufReader;
use tracing::{info, warn};

use cli::Cli;
use config::Config;
use session::Controller;
use wiki::{WikiApi, WikiClient};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("wikiseek={}", cli.log_level()).parse()?),
        )
        .init();

    let config = Config::from_env(cli.overrides())?;
    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    let mut controller = Controller::new(WikiClient::new(http, &config), cli.tab);

    info!(
        simple = %config.simple_endpoint,
        full = %config.full_endpoint,
        "starting wikiseek"
    );

    match cli.query.as_deref() {
        Some(query) => run_once(&mut controller, query, cli.json).await?,
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            repl::run(&mut controller, stdin, &mut io::stdout()).await?;
        }
    }

    Ok(())
}

async fn run_once<A: WikiApi>(
    controller: &mut Controller<A>,
    query: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = one_shot_output(controller, query, json)
        .await?
        .ok_or("query must not be empty")?;
    io::stdout().lock().write_all(output.as_bytes())?;
    Ok(())
}

/// Output for a single query, or `None` if the query is blank.
/// Lookup failures become the tab's fallback message, never an error.
async fn one_shot_output<A: WikiApi>(
    controller: &mut Controller<A>,
    query: &str,
    json: bool,
) -> Result<Option<String>, serde_json::Error> {
    if !json {
        let view = controller.submit(query).await;
        return Ok(view.map(|view| repl::format_view(controller.tab(), query.trim(), &view)));
    }

    let Some(fetched) = controller.fetch(query).await else {
        return Ok(None);
    };
    let value = match fetched {
        Ok(fetched) => serde_json::to_value(&fetched)?,
        Err(e) => {
            warn!(error = %e, "lookup failed");
            serde_json::json!({ "error": session::fallback_view(controller.tab()).content })
        }
    };
    Ok(Some(format!("{}\n", serde_json::to_string_pretty(&value)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::mock::{MockWiki, generator, hits, page, transport_error};
    use session::Tab;

    fn failing_text() -> MockWiki {
        MockWiki::new()
            .search(Err(transport_error()))
            .search(Err(transport_error()))
            .search(Err(transport_error()))
    }

    #[tokio::test]
    async fn json_output_serializes_text_result() {
        let mock = MockWiki::new()
            .search(hits(&["Mars"]))
            .details(page("Mars", "Mars is red."));
        let mut controller = Controller::new(mock, Tab::Text);

        let output = one_shot_output(&mut controller, "mars", true).await.unwrap().unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["title"], "Mars");
        assert_eq!(value["sourceEdition"], "simple");
    }

    #[tokio::test]
    async fn json_output_reports_failure_as_fallback_message() {
        let mut controller = Controller::new(failing_text(), Tab::Text);

        let output = one_shot_output(&mut controller, "moon", true).await.unwrap().unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, serde_json::json!({"error": "Could not find a summary."}));
    }

    #[tokio::test]
    async fn json_media_failure_uses_media_message() {
        let mock = MockWiki::new().videos(Err(transport_error()));
        let mut controller = Controller::new(mock, Tab::Videos);

        let output = one_shot_output(&mut controller, "moon", true).await.unwrap().unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["error"], "No videos found.");
    }

    #[tokio::test]
    async fn json_media_result_is_a_list() {
        let mock = MockWiki::new().images(generator(serde_json::json!({
            "query": {"pages": [{"title": "Moon", "index": 1, "thumbnail": {"source": "https://img/moon.jpg"}}]}
        })));
        let mut controller = Controller::new(mock, Tab::Images);

        let output = one_shot_output(&mut controller, "moon", true).await.unwrap().unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["title"], "Moon");
    }

    #[tokio::test]
    async fn markdown_output_shows_fallback_on_failure() {
        let mut controller = Controller::new(failing_text(), Tab::Text);

        let output = one_shot_output(&mut controller, " moon ", false).await.unwrap().unwrap();

        assert!(output.starts_with("## Summary: moon\n\nCould not find a summary.\n"));
        assert!(!output.contains("### Links"));
    }

    #[tokio::test]
    async fn blank_query_produces_no_output() {
        let mut controller = Controller::new(MockWiki::new(), Tab::Text);

        assert!(one_shot_output(&mut controller, "  ", true).await.unwrap().is_none());
        assert!(one_shot_output(&mut controller, "  ", false).await.unwrap().is_none());
    }
}
