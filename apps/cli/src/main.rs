//! Credence CLI - resolve the credentials a client would authenticate with.
//!
//! The `cred` command combines the local environment, an optional config
//! file, command-line options and an optional password prompt into one
//! credential set, then prints each field with the level it was obtained at.

mod output;
mod resolve;

use std::path::PathBuf;

use clap::Parser;
use credence_core::KerberosUsage;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Credence CLI - credential resolution
///
/// Values given on the command line always win over values guessed from
/// the environment (USER, LOGNAME, PASSWD, PASSWD_FD, PASSWD_FILE).
#[derive(Parser, Debug)]
#[command(
    name = "cred",
    author,
    version,
    about = "Credence - resolve client credentials",
    long_about = "Resolves domain, username, password, realm and principal from command-line options,\nthe environment and an optional interactive prompt, honouring source precedence."
)]
pub(crate) struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Credentials as USER, USER%PASSWORD, USER@REALM or % for anonymous
    #[arg(short = 'U', long = "user", value_name = "CREDENTIALS")]
    pub(crate) user: Option<String>,

    /// Domain (workgroup)
    #[arg(short = 'W', long = "workgroup", value_name = "DOMAIN")]
    pub(crate) workgroup: Option<String>,

    /// Kerberos realm
    #[arg(long)]
    pub(crate) realm: Option<String>,

    /// Workstation name
    #[arg(long)]
    pub(crate) workstation: Option<String>,

    /// Kerberos usage (disabled, desired, required)
    #[arg(short = 'k', long, value_parser = parse_kerberos)]
    pub(crate) kerberos: Option<KerberosUsage>,

    /// Explicitly use no password
    #[arg(short = 'N', long)]
    pub(crate) no_pass: bool,

    /// Start from the anonymous identity
    #[arg(long)]
    pub(crate) anonymous: bool,

    /// Do not guess anything from the environment
    #[arg(long)]
    pub(crate) no_guess: bool,

    /// Prompt for the password if no source supplied one
    #[arg(long)]
    pub(crate) prompt: bool,

    /// Guess configuration file (defaults to ~/.credence/config.toml)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Print the password instead of a placeholder
    #[arg(long)]
    show_password: bool,
}

fn parse_kerberos(s: &str) -> Result<KerberosUsage, String> {
    KerberosUsage::parse(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let creds = resolve::resolve(&args)?;
    let summary = creds.summary(args.show_password);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_summary(&summary);
    }

    Ok(())
}
