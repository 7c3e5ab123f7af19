use anyhow::{anyhow, Result};
use clap::Parser;
use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::rc::Rc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use hospital_admission::{
    register_desks, screen, AdmissionService, Console, ConsoleOptions, NotificationHub,
    DEFAULT_CURRENCY, VERSION,
};

/// Hospital admission and billing console
#[derive(Parser, Debug)]
#[command(name = "hospital-admission", version)]
struct Args {
    /// Currency prefix shown in bill notifications
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// Print each admission record as JSON
    #[arg(long)]
    json: bool,

    /// Plain line mode: never clear the screen or wait for a key
    #[arg(long)]
    no_clear: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "HOSPITAL_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    debug!(version = VERSION, currency = %args.currency, "starting console");

    // Both desks print to stdout
    let display = Rc::new(RefCell::new(io::stdout()));
    let mut hub = NotificationHub::new();
    register_desks(&mut hub, Rc::clone(&display));

    let service = AdmissionService::with_currency(hub, args.currency);
    let options = ConsoleOptions {
        interactive: screen::interactive_mode(
            screen::INTERACTIVE_AVAILABLE,
            args.no_clear,
            io::stdin().is_terminal(),
            io::stdout().is_terminal(),
        ),
        json: args.json,
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), display, service, options);
    console.run()
}

/// RUST_LOG wins when set; logs go to stderr so they stay out of the console
fn init_tracing(level: &str) -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialise logging: {}", err))
}
