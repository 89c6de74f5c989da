//! cairn CLI - minimal content-addressed version control

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cairn::{ops, Error, Repo, REPO_DIR};

#[derive(Parser)]
#[command(name = "cairn")]
#[command(about = "minimal content-addressed version control")]
#[command(version)]
struct Cli {
    /// repository path
    #[arg(short, long, default_value = REPO_DIR)]
    repo: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init {
        /// path to create the repository at
        #[arg(default_value = REPO_DIR)]
        path: PathBuf,
    },

    /// stage a file for the next commit
    Add {
        /// file to stage, read from the working directory
        path: PathBuf,
    },

    /// commit the staged files
    Commit {
        /// commit message
        message: String,
    },

    /// show commit history, newest first
    Log,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> cairn::Result<()> {
    match cli.command {
        Commands::Init { path } => match Repo::init(&path) {
            Ok(_) => println!("initialized empty cairn repository at {}", path.display()),
            // idempotent: an existing repository is reported, never touched
            Err(Error::RepoExists(_)) => println!("already initialized"),
            Err(e) => return Err(e),
        },

        Commands::Add { path } => {
            let repo = Repo::open(&cli.repo)?;
            ops::add(&repo, &path)?;
            println!("added {}", path.display());
        }

        Commands::Commit { message } => {
            let repo = Repo::open(&cli.repo)?;
            let hash = ops::commit(&repo, &message)?;
            println!("{}", hash);
        }

        Commands::Log => {
            let repo = Repo::open(&cli.repo)?;
            let history = ops::log(&repo)?;

            for entry in &history.entries {
                print!("{}", entry);
            }

            if let Some(hash) = history.missing {
                return Err(Error::BrokenHistory(hash));
            }
        }
    }

    Ok(())
}
