use crate::infra::InMemoryResultStore;
use clap::Args;
use quantum_dock::catalog::Catalog;
use quantum_dock::error::AppError;
use quantum_dock::history::{HistoryService, UserId};
use quantum_dock::prediction::{
    input_seed, seeded_rng, AffinityRequest, ImpactLevel, PredictionMode,
};
use quantum_dock::report::{ThroughputReport, DEFAULT_BIN_SIZE, DEFAULT_MOLECULES};
use quantum_dock::simulation::{DockingSimulator, SimulationRequest, SimulationRun};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_MOLECULES: [&str; 3] = ["Imatinib", "Gefitinib", "Donepezil"];
const DEMO_PROTEINS: [&str; 3] = [
    "BCR-ABL Tyrosine Kinase",
    "EGFR Kinase Domain",
    "Acetylcholinesterase",
];
const DEMO_DISEASE: &str = "Chronic Myeloid Leukemia";
const DEMO_USER: &str = "demo-researcher";
const DEMO_REPORT_SEED: u64 = 2024;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Classical docking score in kcal/mol
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) classical: f64,
    /// Quantum-refined binding energy in kcal/mol
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) refined: f64,
    /// Ligand structure string (SMILES)
    #[arg(long)]
    pub(crate) molecule: String,
    /// Protein target name
    #[arg(long)]
    pub(crate) target: String,
    /// Disease context; repeat for several (only the first shapes the narrative)
    #[arg(long)]
    pub(crate) disease: Vec<String>,
    /// Fixed seed for the random draws (defaults to one derived from molecule and target)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Reject non-finite or empty inputs instead of passing them through
    #[arg(long)]
    pub(crate) strict: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Molecule SMILES to dock; repeat for several
    #[arg(long, required = true)]
    pub(crate) smiles: Vec<String>,
    /// Protein target name; repeat for several
    #[arg(long, required = true)]
    pub(crate) protein: Vec<String>,
    /// Disease context; repeat for several
    #[arg(long)]
    pub(crate) disease: Vec<String>,
    /// Replace the built-in molecule catalog with a CSV file
    #[arg(long)]
    pub(crate) molecules_csv: Option<PathBuf>,
    /// Replace the built-in protein catalog with a CSV file
    #[arg(long)]
    pub(crate) proteins_csv: Option<PathBuf>,
    /// Record pairs with invalid input as errors
    #[arg(long)]
    pub(crate) strict: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Fixed seed for the synthetic timings
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of molecules in the synthetic dataset
    #[arg(long, default_value_t = DEFAULT_MOLECULES)]
    pub(crate) molecules: usize,
    /// Molecules per chart bin
    #[arg(long, default_value_t = DEFAULT_BIN_SIZE)]
    pub(crate) bin_size: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the throughput report portion of the demo
    #[arg(long)]
    pub(crate) skip_report: bool,
}

fn mode(strict: bool) -> PredictionMode {
    if strict {
        PredictionMode::Strict
    } else {
        PredictionMode::Lenient
    }
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        classical,
        refined,
        molecule,
        target,
        disease,
        seed,
        strict,
    } = args;

    let seed = seed.unwrap_or_else(|| input_seed(&molecule, &target));
    let request = AffinityRequest::new(classical, refined, molecule, target).with_diseases(disease);
    let result = mode(strict).predict(&request, &mut seeded_rng(seed))?;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Prediction payload unavailable: {}", err),
    }
    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let SimulateArgs {
        smiles,
        protein,
        disease,
        molecules_csv,
        proteins_csv,
        strict,
    } = args;

    let catalog = load_catalog(molecules_csv, proteins_csv)?;
    let request = SimulationRequest {
        smiles,
        proteins: protein,
        diseases: disease,
    };
    let run = DockingSimulator::new(mode(strict)).run(&catalog, &request)?;
    render_run(&run);
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let mut rng = match args.seed {
        Some(seed) => seeded_rng(seed),
        None => StdRng::from_entropy(),
    };
    let report = ThroughputReport::generate(&mut rng, args.molecules, args.bin_size)?;
    render_report(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = Catalog::builtin();
    let smiles: Vec<String> = catalog
        .molecules()
        .iter()
        .filter(|molecule| DEMO_MOLECULES.contains(&molecule.name.as_str()))
        .map(|molecule| molecule.smiles.clone())
        .collect();
    let request = SimulationRequest {
        smiles,
        proteins: DEMO_PROTEINS.iter().map(|name| name.to_string()).collect(),
        diseases: vec![DEMO_DISEASE.to_string()],
    };

    println!("QuantumDock demo");
    println!(
        "Docking {} molecules against {} targets for {}",
        DEMO_MOLECULES.len(),
        DEMO_PROTEINS.len(),
        DEMO_DISEASE
    );

    let run = DockingSimulator::default().run(&catalog, &request)?;
    render_run(&run);

    let history = HistoryService::new(Arc::new(InMemoryResultStore::default()));
    let user = UserId(DEMO_USER.to_string());
    println!("\nSaved results for {}", user.as_str());
    match history.save_run(&user, &run.entries) {
        Ok(saved) => println!("  {} result(s) saved", saved),
        Err(err) => println!("  Save failed: {}", err),
    }
    match history.history(&user) {
        Ok(entries) => {
            for entry in entries.iter().take(3) {
                println!(
                    "  - {} + {}: {:.2} nM [{}] {}",
                    entry.record.molecule_name,
                    entry.record.protein_name,
                    entry.record.binding_affinity,
                    entry.affinity_label,
                    entry.age
                );
            }
        }
        Err(err) => println!("  History unavailable: {}", err),
    }

    if !args.skip_report {
        println!();
        let report = ThroughputReport::generate(
            &mut seeded_rng(DEMO_REPORT_SEED),
            DEFAULT_MOLECULES,
            DEFAULT_BIN_SIZE,
        )?;
        render_report(&report);
    }

    Ok(())
}

fn load_catalog(
    molecules_csv: Option<PathBuf>,
    proteins_csv: Option<PathBuf>,
) -> Result<Catalog, AppError> {
    let mut catalog = Catalog::builtin();
    if let Some(path) = molecules_csv {
        catalog = catalog.with_molecules_from_path(path)?;
    }
    if let Some(path) = proteins_csv {
        catalog = catalog.with_proteins_from_path(path)?;
    }
    Ok(catalog)
}

pub(crate) fn render_run(run: &SimulationRun) {
    let summary = run.summary();
    println!(
        "\nDocking results: {} combination(s), {} complete, {} failed",
        summary.combinations, summary.completed, summary.errored
    );

    println!(
        "{:<14} {:<26} {:>9} {:>9} {:>12} {:>6}  {}",
        "Molecule", "Protein", "Classical", "Refined", "Affinity nM", "Conf.", "Impact"
    );
    for entry in &run.entries {
        match (&entry.prediction, entry.classical_score, entry.refined_energy) {
            (Some(prediction), Some(classical), Some(refined)) => {
                let level = entry
                    .impact_level
                    .unwrap_or_else(|| ImpactLevel::classify(prediction.binding_affinity));
                println!(
                    "{:<14} {:<26} {:>9.2} {:>9.2} {:>12.2} {:>5.0}%  {}",
                    entry.molecule.name,
                    entry.protein.name,
                    classical,
                    refined,
                    prediction.binding_affinity,
                    prediction.confidence_score * 100.0,
                    level.label()
                );
            }
            _ => println!(
                "{:<14} {:<26} error: {}",
                entry.molecule.name,
                entry.protein.name,
                entry.error.as_deref().unwrap_or("unknown failure")
            ),
        }
    }

    if let Some(strongest) = &summary.strongest_binding {
        println!("\nStrongest binding: {}", strongest);
    }
    if let Some(confidence) = summary.mean_confidence {
        println!("Mean confidence: {:.0}%", confidence * 100.0);
    }

    let strongest_narrative = run
        .completed()
        .filter_map(|entry| entry.prediction.as_ref())
        .min_by(|a, b| a.binding_affinity.total_cmp(&b.binding_affinity))
        .and_then(|prediction| prediction.disease_impact_narrative.as_deref());
    if let Some(narrative) = strongest_narrative {
        println!("\nDisease impact of the strongest pair");
        println!("- {}", narrative);
    }
}

pub(crate) fn render_report(report: &ThroughputReport) {
    println!(
        "Throughput report: {} molecules in bins of {}",
        report.molecules, report.bin_size
    );
    println!("{:<14} {:>12} {:>12}", "Molecules", "Classical s", "Quantum s");
    for bin in &report.bins {
        println!(
            "{:<14} {:>12.2} {:>12.2}",
            bin.name, bin.classical_seconds, bin.quantum_seconds
        );
    }
    let summary = &report.summary;
    println!(
        "\nTotal: classical {:.1} h | quantum {:.1} h",
        summary.total_classical_hours, summary.total_quantum_hours
    );
    println!(
        "Average per molecule: classical {:.2} s | quantum {:.2} s",
        summary.average_classical_seconds, summary.average_quantum_seconds
    );
}
