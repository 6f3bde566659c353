pub mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::database::PgStore;

#[derive(Parser)]
#[command(name = "notes-admin")]
#[command(about = "Administrative commands for the notes service database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the users and notes tables if missing")]
    Migrate,

    #[command(about = "Create a user account")]
    CreateUser {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password; omit to create an account that cannot log in")]
        password: Option<String>,
    },

    #[command(about = "List the notes written by a user")]
    ListNotes {
        #[arg(help = "Username")]
        username: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let store = connect().await?;

    let result = match cli.command {
        Commands::Migrate => commands::migrate::handle(&store).await,
        Commands::CreateUser { username, password } => {
            commands::user::create(&store, &username, password.as_deref(), output_format).await
        }
        Commands::ListNotes { username } => {
            commands::notes::list(&store, &username, output_format).await
        }
    };

    store.close().await;
    result
}

async fn connect() -> anyhow::Result<PgStore> {
    let config = config::config();
    let url = config
        .database
        .url
        .as_deref()
        .context("DATABASE_URL is not set")?;
    PgStore::connect(url, &config.database)
        .await
        .context("failed to connect to DATABASE_URL")
}
