use std::path::PathBuf;

use clap::Parser;
use fuser::MountOption;

use davmount_adapter::{DavAdapter, Logged};
use davmount_client::DavClient;

mod fs;
mod inode;

use fs::DavFilesystem;

/// Mount a WebDAV share as a local filesystem
#[derive(Parser, Debug)]
#[command(name = "davmount")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WebDAV share URL, e.g. https://host/remote.php/dav/files/alice/
    url: String,

    /// Directory to mount the share on
    mountpoint: PathBuf,

    /// Username for basic authentication
    #[arg(short, long)]
    username: Option<String>,

    /// Password for basic authentication
    #[arg(short, long, env = "DAVMOUNT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Allow other users to access the mount
    #[arg(long)]
    allow_other: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(thiserror::Error, Debug)]
enum MountError {
    #[error(transparent)]
    Client(#[from] davmount_client::Error),

    #[error(transparent)]
    Mount(#[from] std::io::Error),
}

fn run(args: Args) -> Result<(), MountError> {
    let mut client = DavClient::new(&args.url)?;
    if let Some(username) = &args.username {
        let password = args.password.as_deref().unwrap_or("");
        client = client.with_basic_auth(username, password);
    }

    let fs = DavFilesystem::new(Logged::new(DavAdapter::new(client)));

    let mut options = vec![
        MountOption::FSName("davmount".to_string()),
        MountOption::DefaultPermissions,
    ];
    if args.allow_other {
        options.push(MountOption::AllowOther);
    }

    log::info!("mounting {} on {}", args.url, args.mountpoint.display());
    fuser::mount2(fs, &args.mountpoint, &options)?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
