//! Command line options for the git-scout tool
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use crate::{
    app::GitScout,
    config::GitScoutConfig,
    db::config::StorageConfig,
    errors::{GitScoutError, GitScoutErrorKind},
    github::config::GithubConfig,
    model::GitHubAccount,
    status::DataStatus,
    utils::{details, input_number, summary_line, yes_no_input},
};

/// git-scout - Search GitHub repositories and keep favorites offline
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct GitScoutCli {
    /// Custom configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the current config path
    #[arg(long)]
    pub show_config_path: bool,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// What to do
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Search repositories by keyword
    Search {
        /// Keywords
        query: String,

        /// Pick one of the results and save it as a favorite
        #[arg(short, long)]
        save: bool,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saved favorites
    Favorites {
        /// Print the favorites as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the details of a favorite
    Show {
        /// Favorite id
        id: i64,
    },

    /// Remove a favorite
    Remove {
        /// Favorite id
        id: i64,

        /// Don't offer to undo
        #[arg(short, long)]
        yes: bool,
    },

    /// Change the configuration file
    Config {
        /// Base URL of the GitHub API
        #[arg(long)]
        api_url: Option<String>,

        /// Database URL of the favorites store
        #[arg(long)]
        database_url: Option<String>,
    },
}

impl GitScoutCli {
    /// Log level picked by `-v`
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Run the git-scout tool with the provided command line options
/// # Errors
/// Error if the config can't be loaded or the command fails
pub async fn git_scout_main(args: GitScoutCli) -> Result<(), GitScoutError> {
    let mut config = GitScoutConfig::try_new(args.config.clone())?;
    if args.show_config_path {
        println!("{}", config.config_path.display());
        return Ok(());
    }
    let Some(command) = args.command else {
        return Err("No command given, see --help".into());
    };
    match command {
        Command::Config {
            api_url,
            database_url,
        } => update_config(&mut config, api_url, database_url),
        command => run_command(&config, command).await,
    }
}

/// Run a command that needs the feeds
async fn run_command(config: &GitScoutConfig, command: Command) -> Result<(), GitScoutError> {
    let app = GitScout::from_config(config).await?;
    match command {
        Command::Search { query, save, json } => search(&app, &query, save, json).await,
        Command::Favorites { json } => list_favorites(&app, json).await,
        Command::Show { id } => {
            let account = find_favorite(&app, id).await?;
            println!("{}", details(&account));
            Ok(())
        }
        Command::Remove { id, yes } => remove_favorite(&app, id, yes).await,
        Command::Config { .. } => Ok(()),
    }
}

/// Persist the given settings in the config file
fn update_config(
    config: &mut GitScoutConfig,
    api_url: Option<String>,
    database_url: Option<String>,
) -> Result<(), GitScoutError> {
    config.update(|data| {
        if let Some(api_url) = api_url {
            data.github.get_or_insert_with(GithubConfig::default).api_url = Some(api_url);
        }
        if let Some(database_url) = database_url {
            data.storage
                .get_or_insert_with(StorageConfig::default)
                .database_url = Some(database_url);
        }
    })?;
    // reject a broken URL right away rather than on the next search
    config.github_settings()?;
    println!("Saved {}", config.config_path.display());
    Ok(())
}

/// Print repositories, either as JSON or one line each
fn print_accounts(
    accounts: &[GitHubAccount],
    json: bool,
    label: impl Fn(usize, &GitHubAccount) -> String,
) -> Result<(), GitScoutError> {
    if json {
        println!("{}", serde_json::to_string_pretty(accounts)?);
        return Ok(());
    }
    for (idx, account) in accounts.iter().enumerate() {
        println!("{}", summary_line(&label(idx, account), account));
    }
    Ok(())
}

/// Run one search and print its outcome
async fn search(
    app: &GitScout,
    query: &str,
    save: bool,
    json: bool,
) -> Result<(), GitScoutError> {
    let generation = app.search.search(query).await?;
    let state = app.search.wait_until_settled(generation).await;
    let items = match state.status {
        Some(DataStatus::Success(items)) => items,
        Some(DataStatus::Error(message)) => {
            return Err(search_failure(&message));
        }
        _ => return Err("Search did not complete".into()),
    };
    if items.is_empty() {
        println!("No repositories found.");
        return Ok(());
    }
    print_accounts(&items, json, |idx, _| format!("[{idx}]"))?;
    if !save {
        return Ok(());
    }
    println!("Which repository should be saved? (0-{})", items.len() - 1);
    let chosen = loop {
        let idx = input_number()?;
        match items.get(idx) {
            Some(account) => break account.clone(),
            None => println!("Wrong number"),
        }
    };
    let name = chosen.display_name().to_string();
    app.favorites.save_favorite(chosen).await?;
    println!("Saved {name}");
    Ok(())
}

/// Error for a search that ended in an error status
fn search_failure(message: &str) -> GitScoutError {
    GitScoutError::new(GitScoutErrorKind::Search).with_text(message)
}

/// Print saved favorites
async fn list_favorites(app: &GitScout, json: bool) -> Result<(), GitScoutError> {
    let favorites = app.favorites.snapshot().await;
    if favorites.is_empty() && !json {
        println!("No favorites saved.");
        return Ok(());
    }
    print_accounts(&favorites, json, |_, account| {
        format!("#{}", account.id.unwrap_or_default())
    })
}

/// Look up a favorite by id
async fn find_favorite(app: &GitScout, id: i64) -> Result<GitHubAccount, GitScoutError> {
    app.favorites
        .find(id)
        .await
        .ok_or_else(|| format!("No favorite with id {id}").into())
}

/// Delete a favorite, offering to undo
async fn remove_favorite(app: &GitScout, id: i64, yes: bool) -> Result<(), GitScoutError> {
    let account = find_favorite(app, id).await?;
    let deleted = app.favorites.delete_favorite(account).await?;
    println!("Successfully deleted {}", deleted.display_name());
    if !yes && yes_no_input("Undo? (y/n)")? {
        app.favorites.undo_delete(deleted).await?;
        println!("Restored #{id}");
    }
    Ok(())
}
