mod browse;
mod interactive;
mod search;

use anyhow::Result;
use bpaf::Bpaf;
use indoc::indoc;
use pokedex_catalog::Language;
use tracing::debug;

use crate::config::Config;
use crate::utils::init::init_catalog_client;

static POKEDEX_DESCRIPTION: &'_ str = indoc! {"
    Browse and search the Pokémon catalog from your terminal.

    Search by exact name, by name prefix, or by the Portuguese name of a type,
    e.g. 'pokedex search fogo'."
};

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf)]
#[bpaf(options, version, descr(POKEDEX_DESCRIPTION))]
pub struct PokedexCli(#[bpaf(external(pokedex_args))] pub PokedexArgs);

/// Main pokedex args parser
///
/// To parse the pokedex CLI, use [`PokedexCli`] instead using [`pokedex_cli()`].
#[derive(Debug, Bpaf)]
#[bpaf(ignore_rustdoc)] // we don't want this struct to be interpreted as a group
pub struct PokedexArgs {
    /// Verbose mode
    ///
    /// Invoke multiple times for increasing detail.
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    /// Language of messages and type names (pt, en)
    #[bpaf(long, short, argument("lang"))]
    pub language: Option<Language>,

    #[bpaf(external(commands), optional)]
    command: Option<Commands>,
}

impl PokedexArgs {
    pub async fn handle(self, mut config: Config) -> Result<()> {
        if let Some(language) = self.language {
            debug!(?language, "language set on the command line");
            config.language = language;
        }

        let client = init_catalog_client(&config)?;

        match self.command.unwrap_or_default() {
            Commands::Browse(args) => args.handle(config, client).await,
            Commands::Search(args) => args.handle(config, client).await,
            Commands::Interactive(args) => args.handle(config, client).await,
        }
    }
}

#[derive(Debug, Bpaf, Clone)]
enum Commands {
    /// Page through the catalog
    #[bpaf(command)]
    Browse(#[bpaf(external(browse::browse))] browse::Browse),

    /// Search by name, name prefix or type
    #[bpaf(command)]
    Search(#[bpaf(external(search::search))] search::Search),

    /// Browse and search interactively (default)
    #[bpaf(command)]
    Interactive(#[bpaf(external(interactive::interactive))] interactive::Interactive),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Interactive(interactive::Interactive {})
    }
}

fn page_is_positive(page: &u64) -> bool {
    *page >= 1
}
