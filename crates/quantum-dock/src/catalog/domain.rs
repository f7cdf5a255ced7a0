use serde::{Deserialize, Serialize};

/// Small-molecule ligand available for docking runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub name: String,
    pub smiles: String,
    /// Daltons.
    pub molecular_weight: f64,
    /// Hydrogen-bond donors.
    pub donors: u32,
    /// Hydrogen-bond acceptors.
    pub acceptors: u32,
}

/// Protein target available for docking runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    pub name: String,
    /// Daltons.
    pub molecular_weight: f64,
}
