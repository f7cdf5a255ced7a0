use crate::demo::{
    run_demo, run_predict, run_report, run_simulate, DemoArgs, PredictArgs, ReportArgs,
    SimulateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use quantum_dock::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "QuantumDock",
    about = "Run the QuantumDock affinity service or its calculations from the command line",
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
    /// Predict binding affinity for one molecule/target pair and print the result as JSON
    Predict(PredictArgs),
    /// Dock every selected molecule against every selected protein
    Simulate(SimulateArgs),
    /// Print the classical vs. quantum docking throughput report
    Report(ReportArgs),
    /// Run a canned docking simulation and throughput report
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
    /// Replace the built-in molecule catalog with a CSV file
    #[arg(long)]
    pub(crate) molecules_csv: Option<PathBuf>,
    /// Replace the built-in protein catalog with a CSV file
    #[arg(long)]
    pub(crate) proteins_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn predict_accepts_negative_energies() {
        let cli = Cli::try_parse_from([
            "quantum-dock-api",
            "predict",
            "--classical",
            "-10",
            "--refined",
            "-9.41",
            "--molecule",
            "CCO",
            "--target",
            "BACE1",
            "--disease",
            "Alzheimer's Disease",
            "--strict",
        ])
        .expect("arguments parse");
        match cli.command {
            Some(Command::Predict(args)) => {
                assert_eq!(args.classical, -10.0);
                assert_eq!(args.refined, -9.41);
                assert_eq!(args.disease, vec!["Alzheimer's Disease".to_string()]);
                assert!(args.strict);
            }
            other => panic!("expected predict command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["quantum-dock-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
