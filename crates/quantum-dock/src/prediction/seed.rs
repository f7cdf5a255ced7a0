use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed derived from a molecule/target pair, so repeated runs over the same pair agree.
///
/// 32-bit rolling hash (`h * 31 + unit`) over the UTF-16 code units of
/// `molecule_representation` followed by `target_name`.
pub fn input_seed(molecule_representation: &str, target_name: &str) -> u64 {
    let hash = molecule_representation
        .encode_utf16()
        .chain(target_name.encode_utf16())
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        });
    u64::from(hash as u32)
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
