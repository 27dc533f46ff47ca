//! # Command Line
//!
//! Argument definitions and the dispatcher that maps them onto
//! [`crate::commands`].
//!
//! ## Surface
//! ```text
//! marquee [--config PATH] [--ephemeral] <group> <command>
//!
//!   movies   list [--category C] | add ... | update <ID> ... | delete <ID>
//!   my-list  show | add <ID> | remove <ID> | import <FILE> | export | clear
//!   users    register ... | login ...
//! ```
//!
//! Commands that need the catalog (`movies list`, `movies update`,
//! `my-list add`) fetch it first.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use marquee_core::{Category, Credentials, MovieDraft, MovieId, MoviePatch, UserDraft};
use marquee_db::KeyValueStore;
use marquee_remote::RemoteClient;
use serde::Serialize;
use serde_json::{json, Value};

use crate::commands::{catalog, personal_list, users};
use crate::error::AppResult;
use crate::state::CatalogStore;

/// Movie catalog and personal list client.
#[derive(Debug, Parser)]
#[command(name = "marquee", version)]
pub struct Cli {
    /// Config file (default: marquee.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the personal list in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and administer the catalog
    Movies {
        #[command(subcommand)]
        action: MoviesCommand,
    },

    /// The personal list (10 movies max)
    MyList {
        #[command(subcommand)]
        action: ListCommand,
    },

    /// Accounts on the remote service
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum MoviesCommand {
    /// Print the catalog
    List {
        /// trending, new or topRated
        #[arg(long)]
        category: Option<Category>,
    },

    /// Create a movie
    Add(NewMovieArgs),

    /// Edit a movie; omitted fields keep their value
    Update {
        id: String,

        #[command(flatten)]
        fields: MovieFieldArgs,
    },

    /// Delete a movie
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct NewMovieArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// http(s) URL, data URL, or a local image file to upload
    #[arg(long)]
    pub image: String,

    /// 0 to 5
    #[arg(long)]
    pub rating: f64,

    #[arg(long)]
    pub category: Option<Category>,
}

#[derive(Debug, Args)]
pub struct MovieFieldArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// http(s) URL, data URL, or a local image file to upload
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub rating: Option<f64>,

    #[arg(long)]
    pub category: Option<Category>,
}

impl MovieFieldArgs {
    async fn into_patch(self) -> AppResult<MoviePatch> {
        let image = match self.image {
            Some(arg) => Some(catalog::resolve_poster(&arg).await?),
            None => None,
        };

        Ok(MoviePatch {
            title: self.title,
            description: self.description,
            image,
            rating: self.rating,
            category: self.category,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Print the personal list
    Show,

    /// Add a catalog movie
    Add { id: String },

    /// Remove a movie
    Remove { id: String },

    /// Replace the list with the contents of an exported file
    Import { file: PathBuf },

    /// Print the list as a versioned record
    Export,

    /// Empty the list
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Check a username and password
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs `command` and returns what should be printed.
pub async fn execute<S: KeyValueStore>(
    command: Command,
    store: &CatalogStore<S>,
    remote: &RemoteClient,
) -> AppResult<Value> {
    match command {
        Command::Movies { action } => movies(action, store, remote).await,
        Command::MyList { action } => my_list(action, store, remote).await,
        Command::Users { action } => accounts(action, remote).await,
    }
}

async fn movies<S: KeyValueStore>(
    action: MoviesCommand,
    store: &CatalogStore<S>,
    remote: &RemoteClient,
) -> AppResult<Value> {
    match action {
        MoviesCommand::List { category } => {
            catalog::load_catalog(store, remote).await?;
            to_json(&catalog::list_catalog(store, category))
        }
        MoviesCommand::Add(args) => {
            let draft = MovieDraft {
                title: args.title,
                description: args.description,
                image: catalog::resolve_poster(&args.image).await?,
                rating: args.rating,
                category: args.category.unwrap_or_default(),
            };
            to_json(&catalog::create_movie(store, remote, draft).await?)
        }
        MoviesCommand::Update { id, fields } => {
            let patch = fields.into_patch().await?;
            catalog::load_catalog(store, remote).await?;
            let updated = catalog::update_movie(store, remote, &MovieId::from(id), patch).await?;
            to_json(&updated)
        }
        MoviesCommand::Delete { id } => {
            catalog::delete_movie(store, remote, &MovieId::from(id.as_str())).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn my_list<S: KeyValueStore>(
    action: ListCommand,
    store: &CatalogStore<S>,
    remote: &RemoteClient,
) -> AppResult<Value> {
    match action {
        ListCommand::Show => to_json(&personal_list::show_list(store)),
        ListCommand::Add { id } => {
            catalog::load_catalog(store, remote).await?;
            to_json(&personal_list::add_to_list(store, &MovieId::from(id)).await?)
        }
        ListCommand::Remove { id } => {
            to_json(&personal_list::remove_from_list(store, &MovieId::from(id)).await)
        }
        ListCommand::Import { file } => to_json(&personal_list::import_list(store, &file).await?),
        ListCommand::Export => to_json(&personal_list::export_list(store)),
        ListCommand::Clear => to_json(&personal_list::clear_list(store).await?),
    }
}

async fn accounts(action: UsersCommand, remote: &RemoteClient) -> AppResult<Value> {
    match action {
        UsersCommand::Register {
            username,
            email,
            password,
        } => {
            let draft = UserDraft {
                username,
                email,
                password,
            };
            to_json(&users::register(remote, draft).await?)
        }
        UsersCommand::Login { username, password } => {
            let credentials = Credentials { username, password };
            to_json(&users::login(remote, credentials).await?)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["marquee", "my-list", "add", "42", "--ephemeral"]).unwrap();

        assert!(cli.ephemeral);
        assert!(matches!(
            cli.command,
            Command::MyList {
                action: ListCommand::Add { ref id }
            } if id == "42"
        ));
    }

    #[test]
    fn test_parses_category_names() {
        let cli =
            Cli::try_parse_from(["marquee", "movies", "list", "--category", "topRated"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Movies {
                action: MoviesCommand::List {
                    category: Some(Category::TopRated)
                }
            }
        ));

        assert!(Cli::try_parse_from(["marquee", "movies", "list", "--category", "horror"]).is_err());
    }

    #[test]
    fn test_add_requires_title_image_and_rating() {
        assert!(Cli::try_parse_from(["marquee", "movies", "add", "--title", "X"]).is_err());

        let cli = Cli::try_parse_from([
            "marquee", "movies", "add", "--title", "X", "--image", "https://i/x.png", "--rating",
            "4.5",
        ])
        .unwrap();
        let Command::Movies {
            action: MoviesCommand::Add(args),
        } = cli.command
        else {
            panic!("expected movies add");
        };
        assert_eq!(args.description, "");
        assert!(args.category.is_none());
    }
}
