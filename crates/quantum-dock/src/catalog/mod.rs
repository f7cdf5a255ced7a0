//! Molecules, protein targets, and disease labels offered to docking runs.

mod builtin;
pub mod domain;
mod parser;

pub use domain::{Molecule, Protein};

use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog import contained no {0}")]
    Empty(&'static str),
    #[error("duplicate catalog entry '{0}'")]
    Duplicate(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    molecules: Vec<Molecule>,
    proteins: Vec<Protein>,
    diseases: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            molecules: builtin::molecules(),
            proteins: builtin::proteins(),
            diseases: builtin::diseases(),
        }
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn proteins(&self) -> &[Protein] {
        &self.proteins
    }

    pub fn diseases(&self) -> &[String] {
        &self.diseases
    }

    pub fn molecule_by_smiles(&self, smiles: &str) -> Option<&Molecule> {
        self.molecules.iter().find(|molecule| molecule.smiles == smiles)
    }

    pub fn protein_by_name(&self, name: &str) -> Option<&Protein> {
        self.proteins.iter().find(|protein| protein.name == name)
    }

    /// Catalog molecules whose SMILES appear in `smiles`, in catalog order.
    pub fn select_molecules<S: AsRef<str>>(&self, smiles: &[S]) -> Vec<&Molecule> {
        let wanted: HashSet<&str> = smiles.iter().map(AsRef::as_ref).collect();
        self.molecules
            .iter()
            .filter(|molecule| wanted.contains(molecule.smiles.as_str()))
            .collect()
    }

    /// Catalog proteins whose names appear in `names`, in catalog order.
    pub fn select_proteins<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Protein> {
        let wanted: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        self.proteins
            .iter()
            .filter(|protein| wanted.contains(protein.name.as_str()))
            .collect()
    }

    /// Replace the molecule list with a headered CSV (`name,smiles,molecular_weight,donors,acceptors`).
    pub fn with_molecules_from_reader<R: Read>(mut self, reader: R) -> Result<Self, CatalogError> {
        let molecules = parser::parse_molecules(reader)?;
        if molecules.is_empty() {
            return Err(CatalogError::Empty("molecules"));
        }
        ensure_unique(molecules.iter().map(|molecule| molecule.smiles.as_str()))?;
        self.molecules = molecules;
        Ok(self)
    }

    /// Replace the protein list with a headered CSV (`name,molecular_weight`).
    pub fn with_proteins_from_reader<R: Read>(mut self, reader: R) -> Result<Self, CatalogError> {
        let proteins = parser::parse_proteins(reader)?;
        if proteins.is_empty() {
            return Err(CatalogError::Empty("proteins"));
        }
        ensure_unique(proteins.iter().map(|protein| protein.name.as_str()))?;
        self.proteins = proteins;
        Ok(self)
    }

    pub fn with_molecules_from_path<P: AsRef<Path>>(self, path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        self.with_molecules_from_reader(file)
    }

    pub fn with_proteins_from_path<P: AsRef<Path>>(self, path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        self.with_proteins_from_reader(file)
    }
}

fn ensure_unique<'a>(keys: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(CatalogError::Duplicate(key.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn builtin_catalog_has_unique_keys() {
        let catalog = Catalog::builtin();
        assert!(!catalog.molecules().is_empty());
        assert!(!catalog.proteins().is_empty());
        assert!(!catalog.diseases().is_empty());
        ensure_unique(catalog.molecules().iter().map(|m| m.smiles.as_str()))
            .expect("unique smiles");
        ensure_unique(catalog.proteins().iter().map(|p| p.name.as_str()))
            .expect("unique protein names");
    }

    #[test]
    fn selection_follows_catalog_order_and_ignores_unknowns() {
        let catalog = Catalog::builtin();
        let selected = catalog.select_molecules(&[
            "CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
            "not-a-molecule",
            "CC(=O)OC1=CC=CC=C1C(=O)O",
        ]);
        let names: Vec<&str> = selected.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Aspirin", "Caffeine"]);

        let proteins = catalog.select_proteins(&["BACE1".to_string(), "Cyclooxygenase-2".to_string()]);
        let names: Vec<&str> = proteins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cyclooxygenase-2", "BACE1"]);
    }

    #[test]
    fn lookups_resolve_by_key() {
        let catalog = Catalog::builtin();
        let aspirin = catalog
            .molecule_by_smiles("CC(=O)OC1=CC=CC=C1C(=O)O")
            .expect("aspirin present");
        assert_eq!(aspirin.donors, 1);
        assert_eq!(aspirin.acceptors, 4);
        assert!(catalog.protein_by_name("HIV-1 Protease").is_some());
        assert!(catalog.protein_by_name("hiv-1 protease").is_none());
    }

    #[test]
    fn imports_molecules_from_csv() {
        let csv = "name,smiles,molecular_weight,donors,acceptors\n\
                   Ethanol, CCO ,46.07,1,1\n\
                   Benzene,c1ccccc1,78.11,0,0\n";
        let catalog = Catalog::builtin()
            .with_molecules_from_reader(Cursor::new(csv))
            .expect("valid csv");
        assert_eq!(catalog.molecules().len(), 2);
        assert_eq!(catalog.molecules()[0].smiles, "CCO");
        assert_eq!(catalog.proteins().len(), Catalog::builtin().proteins().len());
    }

    #[test]
    fn imports_proteins_from_csv() {
        let csv = "name,molecular_weight\nThrombin,36700\n";
        let catalog = Catalog::builtin()
            .with_proteins_from_reader(Cursor::new(csv))
            .expect("valid csv");
        assert_eq!(catalog.proteins().len(), 1);
        assert_eq!(catalog.proteins()[0].molecular_weight, 36_700.0);
    }

    #[test]
    fn rejects_empty_and_duplicate_imports() {
        let header_only = "name,molecular_weight\n";
        assert!(matches!(
            Catalog::builtin().with_proteins_from_reader(Cursor::new(header_only)),
            Err(CatalogError::Empty("proteins"))
        ));

        let duplicated = "name,smiles,molecular_weight,donors,acceptors\n\
                          Ethanol,CCO,46.07,1,1\n\
                          Ethanol again,CCO,46.07,1,1\n";
        match Catalog::builtin().with_molecules_from_reader(Cursor::new(duplicated)) {
            Err(CatalogError::Duplicate(key)) => assert_eq!(key, "CCO"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_rows_surface_csv_errors() {
        let csv = "name,molecular_weight\nThrombin,heavy\n";
        assert!(matches!(
            Catalog::builtin().with_proteins_from_reader(Cursor::new(csv)),
            Err(CatalogError::Csv(_))
        ));
    }
}
