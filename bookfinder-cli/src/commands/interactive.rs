//! Interactive search session

use super::render::{favorite_flags, print_books, print_state};
use super::{spinner, Session};
use anyhow::Result;
use bookfinder_core::types::{favorites_summary, INITIAL_LOAD_MESSAGE};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Type a query and press Enter to search.
  :fav <n>   toggle favorite for result n
  :favs      list favorites
  :help      show this help
  :quit      leave the session";

/// One line of user input
#[derive(Debug, PartialEq)]
enum Input {
    Search(String),
    ToggleFavorite(usize),
    ListFavorites,
    Help,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Search(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "q"), None) => Input::Quit,
        (Some("favs"), None) => Input::ListFavorites,
        (Some("help" | "h"), None) => Input::Help,
        (Some("fav"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 && parts.next().is_none() => Input::ToggleFavorite(n),
            _ => Input::Invalid(format!("Not a result number: {}", n)),
        },
        _ => Input::Invalid(format!("Unknown command: {}", trimmed)),
    }
}

/// Run a line-based search session on stdin
pub async fn interactive(session: &Session) -> Result<()> {
    let pb = spinner(INITIAL_LOAD_MESSAGE);
    session.controller.load_initial().await;
    pb.finish_and_clear();
    show_state(session).await;
    println!();
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Search(term) => {
                if term.trim().is_empty() {
                    session.controller.search(&term).await;
                    continue;
                }
                let pb = spinner("Searching...");
                session.controller.search(&term).await;
                pb.finish_and_clear();
                show_state(session).await;
            }
            Input::ToggleFavorite(n) => {
                let books = session.controller.books();
                match books.get(n - 1) {
                    Some(book) => {
                        let title = book.title.clone();
                        if session.favorites.toggle(book.clone()).await {
                            println!("Added \"{}\" to favorites", title);
                        } else {
                            println!("Removed \"{}\" from favorites", title);
                        }
                    }
                    None => println!("No result number {}", n),
                }
            }
            Input::ListFavorites => {
                let books = session.favorites.list().await;
                println!("{}", favorites_summary(books.len()));
                print_books(&books, &vec![true; books.len()]);
            }
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Invalid(message) => println!("{}", message),
        }
    }

    Ok(())
}

async fn show_state(session: &Session) {
    let state = session.controller.state();
    let flags = favorite_flags(&session.favorites, &state.books).await;
    print_state(&state, &flags);
}
