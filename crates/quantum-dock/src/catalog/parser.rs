use serde::Deserialize;
use std::io::Read;

use super::domain::{Molecule, Protein};

pub(super) fn parse_molecules<R: Read>(reader: R) -> Result<Vec<Molecule>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<MoleculeRow>()
        .map(|row| row.map(MoleculeRow::into_molecule))
        .collect()
}

pub(super) fn parse_proteins<R: Read>(reader: R) -> Result<Vec<Protein>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<ProteinRow>()
        .map(|row| {
            row.map(|row| Protein {
                name: row.name,
                molecular_weight: row.molecular_weight,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct MoleculeRow {
    name: String,
    smiles: String,
    molecular_weight: f64,
    #[serde(default)]
    donors: u32,
    #[serde(default)]
    acceptors: u32,
}

impl MoleculeRow {
    fn into_molecule(self) -> Molecule {
        Molecule {
            name: self.name,
            smiles: self.smiles,
            molecular_weight: self.molecular_weight,
            donors: self.donors,
            acceptors: self.acceptors,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProteinRow {
    name: String,
    molecular_weight: f64,
}
