use crate::{
    conf::Settings,
    pkg::server::{listen, state::AppState},
    prelude::Result,
};
use clap::{Parser, Subcommand};

pub mod migrate;

#[derive(Parser)]
#[command(about = "serves job vacancies and collects applications")]
struct Cmd {
    /// config file, extension optional (toml, json, yaml)
    #[arg(long, global = true, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Migrate,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    let settings = Settings::new(&args.config)?;
    match args.command {
        Some(SubCommandType::Listen) => {
            let state = AppState::new(settings).await?;
            migrate::run(&state.db_pool).await?;
            listen(state).await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply(&settings).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
