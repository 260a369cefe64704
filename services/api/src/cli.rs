use crate::report::{
    run_eligibility, run_essay, run_scholarships, CatalogArgs, EligibilityArgs, EssayArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholar_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Matcher",
    about = "Match student profiles to scholarships and score application essays",
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
    /// Rank every scholarship in the catalog against a student profile
    Eligibility(EligibilityArgs),
    /// Score an essay against its prompt using vocabulary statistics and the AI evaluator
    Essay(EssayArgs),
    /// List the scholarships currently in the catalog
    Scholarships(CatalogArgs),
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
        Command::Eligibility(args) => run_eligibility(args),
        Command::Essay(args) => run_essay(args).await,
        Command::Scholarships(args) => run_scholarships(args),
    }
}
