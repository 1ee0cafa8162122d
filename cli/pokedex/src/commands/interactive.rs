use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use bpaf::Bpaf;
use indoc::indoc;
use pokedex_catalog::{Client, Language, Session};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::utils::display::Styling;
use crate::utils::message;
use crate::utils::presenter::TerminalPresenter;

const HELP_PT: &str = indoc! {"
    Digite um nome, o começo de um nome ou um tipo para buscar.
    Uma linha vazia volta para a lista completa.

    :n, :next       próxima página
    :p, :prev       página anterior
    :page <N>       ir para a página N
    :help           mostrar esta ajuda
    :q, :quit       sair
"};

const HELP_EN: &str = indoc! {"
    Type a name, the start of a name, or a type in Portuguese to search.
    An empty line returns to the full listing.

    :n, :next       next page
    :p, :prev       previous page
    :page <N>       go to page N
    :help           show this help
    :q, :quit       quit
"};

// Browse and search interactively
#[derive(Debug, Bpaf, Clone)]
pub struct Interactive {}

/// A line entered at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Search(String),
    Clear,
    Next,
    Previous,
    Page(u64),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command ':{0}', type ':help' for a list of commands")]
    UnknownCommand(String),
    #[error("'{0}' is not a page number")]
    InvalidPage(String),
    #[error("':page' requires a page number")]
    MissingPage,
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Input::Clear);
        }

        let Some(command) = line.strip_prefix(':') else {
            return Ok(Input::Search(line.to_string()));
        };

        let mut words = command.split_whitespace();
        let input = match words.next().unwrap_or_default() {
            "n" | "next" => Input::Next,
            "p" | "prev" | "previous" => Input::Previous,
            "page" | "go" => {
                let page = words.next().ok_or(InputError::MissingPage)?;
                let page = page
                    .parse()
                    .map_err(|_| InputError::InvalidPage(page.to_string()))?;
                Input::Page(page)
            },
            "clear" => Input::Clear,
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            other => return Err(InputError::UnknownCommand(other.to_string())),
        };
        Ok(input)
    }
}

fn help(language: Language) -> &'static str {
    match language {
        Language::Pt => HELP_PT,
        Language::En => HELP_EN,
    }
}

fn prompt() {
    eprint!("> ");
    let _ = std::io::stderr().flush();
}

impl Interactive {
    #[instrument(name = "interactive", skip_all)]
    pub async fn handle(self, config: Config, client: Client) -> Result<()> {
        let styling = Styling::detect(config.language);
        let session = Session::new(client, TerminalPresenter::new(styling));

        message::plain(help(config.language));
        session.start().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            prompt();
            let Some(line) = lines.next_line().await.context("failed to read input")? else {
                debug!("end of input");
                break;
            };

            match line.parse::<Input>() {
                Ok(Input::Search(term)) => session.submit_search(&term).await,
                Ok(Input::Clear) => session.input_changed("").await,
                Ok(Input::Next) => session.next_page().await,
                Ok(Input::Previous) => session.previous_page().await,
                Ok(Input::Page(page)) => session.go_to_page(page).await,
                Ok(Input::Help) => message::plain(help(config.language)),
                Ok(Input::Quit) => break,
                Err(err) => message::warning(err),
            }
        }
        Ok(())
    }
}
