//! odbwire CLI Client
//!
//! Command-line interface for server administration.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use odbwire::{ClientConfig, Connection, WireError};
use tracing_subscriber::{fmt, EnvFilter};

/// odbwire CLI
#[derive(Parser, Debug)]
#[command(name = "odbwire-cli")]
#[command(about = "Administer databases on a remote server")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:2424")]
    server: String,

    /// Server administrator user
    #[arg(short, long, default_value = "root")]
    user: String,

    /// Server administrator password
    #[arg(short, long)]
    password: String,

    /// Read/write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a database
    Create {
        /// Database name
        name: String,

        /// Database kind (document, graph)
        #[arg(long, default_value = "document")]
        kind: String,

        /// Storage kind (plocal, memory)
        #[arg(long, default_value = "plocal")]
        storage: String,
    },

    /// Drop a database
    Drop {
        /// Database name
        name: String,

        /// Database kind (document, graph)
        #[arg(long, default_value = "document")]
        kind: String,
    },

    /// Check whether a database exists
    Exists {
        /// Database name
        name: String,

        /// Storage kind (plocal, memory)
        #[arg(long, default_value = "plocal")]
        storage: String,
    },

    /// Dump the raw database listing
    List,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,odbwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error ({}): {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), WireError> {
    let config = ClientConfig::builder()
        .server_addr(&args.server)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build()?;

    let mut conn = Connection::connect(&config)?;
    conn.open_server_session(&args.user, &args.password)?;

    match args.command {
        Commands::Create { name, kind, storage } => {
            conn.create_database(&name, &kind, &storage)?;
            println!("created {}", name);
        }
        Commands::Drop { name, kind } => {
            conn.drop_database(&name, &kind)?;
            println!("dropped {}", name);
        }
        Commands::Exists { name, storage } => {
            let exists = conn.database_exists(&name, &storage)?;
            println!("{}", exists);
        }
        Commands::List => {
            let list = conn.list_databases()?;
            println!("{} bytes", list.len());
            println!("{}", String::from_utf8_lossy(list.as_bytes()));
        }
    }

    conn.close();
    Ok(())
}
