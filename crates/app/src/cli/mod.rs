use clap::{Parser, Subcommand};

mod user;

#[derive(Debug, Parser)]
#[command(name = "wallboard-app", about = "Wallboard CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
        }
    }
}
