//! Interactive browsing: `catalog browse`.
//!
//! Reads one input change per line from stdin and renders the live filter's
//! display as it changes:
//!
//! | Line | Change |
//! |------|--------|
//! | `:category <value>` / `:c <value>` | select a category tab |
//! | `:clear` | reset category and query |
//! | `:quit` | stop reading |
//! | anything else | the search box now holds this text |
//!
//! Input keeps being read while a filter request is pending. On end of
//! input the command waits for the newest request to settle, renders it,
//! and exits.

use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use project_catalog_core::category::CategoryFilter;
use project_catalog_core::display::{DisplayState, EMPTY_TITLE};
use project_catalog_core::session::FilterChange;

use crate::config::Config;
use crate::content::Catalog;
use crate::live::LiveFilter;

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum BrowseCommand {
    Change(FilterChange),
    Quit,
}

pub fn parse_line(line: &str) -> Result<BrowseCommand> {
    let trimmed = line.trim();
    let (word, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
    if word == ":category" || word == ":c" {
        if rest.trim().is_empty() {
            bail!("{} needs a category, e.g. `{} retail`", word, word);
        }
        let category = CategoryFilter::parse(rest)?;
        return Ok(BrowseCommand::Change(FilterChange::Category(category)));
    }
    match trimmed {
        ":clear" => Ok(BrowseCommand::Change(FilterChange::Clear)),
        ":quit" | ":q" => Ok(BrowseCommand::Quit),
        _ => Ok(BrowseCommand::Change(FilterChange::Query(line.to_string()))),
    }
}

pub fn render(view: &DisplayState, out: &mut impl Write) -> std::io::Result<()> {
    if view.pending {
        return writeln!(out, "{}", view.message);
    }

    writeln!(out, "{}", view.message)?;
    if let Some(empty) = &view.empty_message {
        writeln!(out, "  {}", EMPTY_TITLE)?;
        writeln!(out, "  {}", empty)?;
    }
    for p in view.projects.iter() {
        writeln!(out, "  - {} ({}, {})", p.title, p.category.label(), p.location)?;
    }
    if view.can_clear {
        writeln!(out, "  [:clear to reset filters]")?;
    }
    Ok(())
}

pub async fn run_browse(config: &Config) -> Result<()> {
    let catalog = Catalog::from_config(config)?;
    let live = LiveFilter::new(
        catalog.source(),
        Duration::from_millis(config.filter.settle_ms),
    );
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    browse(&live, stdin, &mut std::io::stdout()).await
}

/// Drive `live` from `input` until end of input, rendering into `out`.
pub async fn browse<R, W>(live: &LiveFilter, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut rx = live.subscribe();
    let mut lines = input.lines();
    let mut input_done = false;

    let first = rx.borrow_and_update().clone();
    render(&first, out)?;
    let mut last_rendered = (first.seq, first.pending);

    loop {
        if input_done {
            let current = live.current();
            if !current.pending && last_rendered == (current.seq, false) {
                break;
            }
        }

        tokio::select! {
            line = lines.next_line(), if !input_done => {
                match line? {
                    Some(line) => match parse_line(&line) {
                        Ok(BrowseCommand::Change(change)) => {
                            live.submit(change);
                        }
                        Ok(BrowseCommand::Quit) => input_done = true,
                        Err(e) => writeln!(out, "error: {}", e)?,
                    },
                    None => input_done = true,
                }
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                render(&view, out)?;
                last_rendered = (view.seq, view.pending);
            }
        }
    }

    out.flush()?;
    Ok(())
}
