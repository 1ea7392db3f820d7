//! Interactive session: each line is a query, `:` lines are commands.

use std::io::{self, Write};

use clap::ValueEnum;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::markdown::heading;
use crate::render::{self, View};
use crate::session::{Controller, Tab};
use crate::wiki::WikiApi;

const HELP: &str = "\
Type a query and press Enter to search.
  :text | :detailed | :images | :videos   switch tab (re-runs the last query)
  :open N                                 show the full-size source of media item N
  :help                                   show this help
  :quit                                   exit";

#[derive(Debug, PartialEq)]
enum Command {
    Submit(String),
    Switch(Tab),
    Open(usize),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return if line.is_empty() {
            Command::Empty
        } else {
            Command::Submit(line.to_string())
        };
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    match name.as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "h" | "help" => Command::Help,
        "open" => match parts.next().and_then(|n| n.parse().ok()) {
            Some(n) => Command::Open(n),
            None => Command::Unknown(line.to_string()),
        },
        other => match Tab::from_str(other, true) {
            Ok(tab) => Command::Switch(tab),
            Err(_) => Command::Unknown(line.to_string()),
        },
    }
}

/// Renders one view under a heading naming the tab and query.
pub fn format_view(tab: Tab, query: &str, view: &View) -> String {
    let mut out = heading(2, &format!("{}: {query}", tab.label()));
    out.push_str("\n\n");
    out.push_str(view.content.trim_end());
    out.push('\n');
    if let Some(links) = &view.links {
        out.push_str("\n### Links\n\n");
        out.push_str(links);
        out.push('\n');
    }
    out
}

fn write_view<A: WikiApi>(
    out: &mut impl Write,
    controller: &Controller<A>,
    view: &View,
) -> io::Result<()> {
    let query = controller.query().map(|q| q.as_str()).unwrap_or_default();
    writeln!(out, "{}", format_view(controller.tab(), query, view))
}

pub async fn run<A: WikiApi>(
    controller: &mut Controller<A>,
    input: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "wikiseek interactive mode. Type :help for commands.")?;
    let mut lines = input.lines();

    loop {
        write!(out, "{}> ", controller.tab().label().to_lowercase())?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Submit(query) => {
                if let Some(view) = controller.submit(&query).await {
                    write_view(out, controller, &view)?;
                }
            }
            Command::Switch(tab) => match controller.switch_tab(tab).await {
                Some(view) => write_view(out, controller, &view)?,
                None => writeln!(out, "Switched to {}. Enter a query.", tab.label())?,
            },
            Command::Open(n) => match controller.media_item(n) {
                Some((kind, item)) => writeln!(out, "{}", render::lightbox(item, kind))?,
                None => writeln!(out, "No media item {n} on this tab.")?,
            },
            Command::Unknown(cmd) => writeln!(out, "Unknown command {cmd:?}. Type :help.")?,
        }
    }

    debug!("interactive session ended");
    Ok(())
}
