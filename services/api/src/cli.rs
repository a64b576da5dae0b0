use crate::demo::{run_demo, run_quote, run_value, DemoArgs, QuoteArgs, ValueArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vehicle_lending::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Vehicle Lending Engine",
    about = "Run and demonstrate the vehicle valuation and loan eligibility engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the amortized monthly payment for a principal, rate and term
    Quote(QuoteArgs),
    /// Estimate a vehicle's value with the simulated depreciation model
    Value(ValueArgs),
    /// Seed sample vehicles and walk loan applications through eligibility and offers
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Value(args) => run_value(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
