// ABOUTME: REPL command parsing and execution for larder-cli
// ABOUTME: Each command maps to one session operation; cart changes are persisted right away
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use clap::{Parser, Subcommand};
use larder::{
    engine::{CartAction, PagerAction},
    session::Session,
    storage::CartStore,
};
use tracing::warn;

use crate::helpers::display;

/// One REPL line
#[derive(Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_help_subcommand = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

/// Commands accepted at the prompt
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Suggest ingredients matching partial text
    Find {
        /// Partial ingredient name
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Select ingredients, comma separated
    Add {
        /// Ingredient names
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        names: Vec<String>,
    },
    /// Deselect ingredients, comma separated
    Remove {
        /// Ingredient names
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        names: Vec<String>,
    },
    /// Show the selection
    Selected,
    /// Search recipes for the selection
    Search,
    /// Show the next recipe
    Skip,
    /// Hide the recipe and clear the selection
    Clear,
    /// Save the displayed recipe's missing ingredients to the cart
    Save,
    /// Empty the cart
    Empty,
    /// Show the cart
    Cart,
    /// Show the commands
    Help,
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

/// Whether the REPL keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop
    Quit,
}

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    ReplLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            format!("{first}\nType `help` for the list of commands.")
        })
}

/// Split `bread flour, eggs` into `["bread flour", "eggs"]`
fn comma_separated(words: &[String]) -> Vec<String> {
    words
        .join(" ")
        .split(',')
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Run one command against the session
pub async fn execute(session: &mut Session, store: &dyn CartStore, command: ReplCommand) -> Flow {
    match command {
        ReplCommand::Find { text } => match session.suggest(&text.join(" ")).await {
            Some(lookup) => display::print_suggestions(&lookup),
            None => println!("Type part of an ingredient name."),
        },
        ReplCommand::Add { names } => {
            for name in comma_separated(&names) {
                if !session.select(&name) {
                    println!("'{name}' is already selected");
                }
            }
            display::print_selection(session.selected());
        }
        ReplCommand::Remove { names } => {
            for name in comma_separated(&names) {
                if !session.deselect(&name) {
                    println!("'{name}' was not selected");
                }
            }
            display::print_selection(session.selected());
        }
        ReplCommand::Selected => display::print_selection(session.selected()),
        ReplCommand::Search => run_pager(session, PagerAction::Search).await,
        ReplCommand::Skip => run_pager(session, PagerAction::Skip).await,
        ReplCommand::Clear => run_pager(session, PagerAction::Clear).await,
        ReplCommand::Save => run_cart(session, store, CartAction::Save).await,
        ReplCommand::Empty => run_cart(session, store, CartAction::Empty).await,
        ReplCommand::Cart => display::print_cart(&session.cart_view()),
        ReplCommand::Help => display::print_help(),
        ReplCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

async fn run_pager(session: &mut Session, action: PagerAction) {
    match session.run_pager(action).await {
        Some(view) => display::print_recipe(&view),
        None if session.selected().is_empty() => {
            println!("Select at least one ingredient first (add <name>).");
        }
        None => println!("Nothing to skip to yet. Run `search` first."),
    }
}

/// The in-memory cart stays authoritative when the file cannot be written
async fn run_cart(session: &mut Session, store: &dyn CartStore, action: CartAction) {
    let view = session.run_cart(action).await;
    display::print_cart(&view);
    if let Err(e) = store.save(&view.cart).await {
        warn!(error = %e, "Failed to persist cart");
        println!("Could not write the cart file ({e}). Changes are kept until you quit.");
    }
}
