use crate::demo::{run_demo, run_export, run_trials, DemoArgs, ExportArgs, TrialsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use trial_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Clinical Trial Intake",
    about = "Run and demonstrate the clinical trial interest registration service from the command line",
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
    /// Run an end-to-end CLI demo covering intake, screening, and the admin table
    Demo(DemoArgs),
    /// Print the admin CSV export for a seeded set of registrations
    Export(ExportArgs),
    /// Search the public trial registry for recruiting studies
    Trials(TrialsArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Export(args) => run_export(args),
        Command::Trials(args) => run_trials(args),
    }
}
