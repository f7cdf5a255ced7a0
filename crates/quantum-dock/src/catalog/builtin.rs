use super::domain::{Molecule, Protein};

fn molecule(name: &str, smiles: &str, molecular_weight: f64, donors: u32, acceptors: u32) -> Molecule {
    Molecule {
        name: name.to_string(),
        smiles: smiles.to_string(),
        molecular_weight,
        donors,
        acceptors,
    }
}

fn protein(name: &str, molecular_weight: f64) -> Protein {
    Protein {
        name: name.to_string(),
        molecular_weight,
    }
}

pub(super) fn molecules() -> Vec<Molecule> {
    vec![
        molecule("Aspirin", "CC(=O)OC1=CC=CC=C1C(=O)O", 180.16, 1, 4),
        molecule("Ibuprofen", "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O", 206.28, 1, 2),
        molecule("Caffeine", "CN1C=NC2=C1C(=O)N(C(=O)N2C)C", 194.19, 0, 3),
        molecule("Paracetamol", "CC(=O)NC1=CC=C(C=C1)O", 151.16, 2, 2),
        molecule(
            "Imatinib",
            "CC1=C(C=C(C=C1)NC(=O)C2=CC=C(C=C2)CN3CCN(CC3)C)NC4=NC=CC(=N4)C5=CN=CC=C5",
            493.60,
            2,
            7,
        ),
        molecule(
            "Gefitinib",
            "COC1=C(C=C2C(=C1)N=CN=C2NC3=CC(=C(C=C3)F)Cl)OCCCN4CCOCC4",
            446.90,
            1,
            8,
        ),
        molecule(
            "Donepezil",
            "COC1=C(C=C2C(=C1)CC(C2=O)CC3CCN(CC3)CC4=CC=CC=C4)OC",
            379.50,
            0,
            4,
        ),
        molecule(
            "Oseltamivir",
            "CCC(CC)OC1C=C(CC(C1NC(=O)C)N)C(=O)OCC",
            312.40,
            2,
            5,
        ),
    ]
}

pub(super) fn proteins() -> Vec<Protein> {
    vec![
        protein("Cyclooxygenase-2", 68_996.0),
        protein("EGFR Kinase Domain", 37_184.0),
        protein("BCR-ABL Tyrosine Kinase", 32_460.0),
        protein("Acetylcholinesterase", 67_796.0),
        protein("HIV-1 Protease", 21_580.0),
        protein("Influenza Neuraminidase", 50_126.0),
        protein("BACE1", 55_764.0),
    ]
}

pub(super) fn diseases() -> Vec<String> {
    [
        "Alzheimer's Disease",
        "Breast Cancer",
        "Chronic Myeloid Leukemia",
        "HIV/AIDS",
        "Influenza",
        "Non-Small Cell Lung Cancer",
        "Rheumatoid Arthritis",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
