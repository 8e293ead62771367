use sha2::{Digest, Sha256};

/// Deterministic randomness collaborator: a pure function from a seed string
/// to a value in `[0, 1)`, stable for the whole process lifetime. Seeds are
/// decimal-text concatenations of coordinate values, e.g. `"3,4"`.
pub trait Luck {
    fn luck(&self, seed: &str) -> f64;
}

impl<F> Luck for F
where
    F: Fn(&str) -> f64,
{
    fn luck(&self, seed: &str) -> f64 {
        self(seed)
    }
}

/// Default implementation: SHA-256 of the seed text, leading 8 bytes mapped
/// into the unit interval.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HashLuck;

impl Luck for HashLuck {
    fn luck(&self, seed: &str) -> f64 {
        let digest = Sha256::digest(seed.as_bytes());
        let head = u64::from_be_bytes(digest[..8].try_into().expect("digest has 32 bytes"));
        // keep 53 bits so the quotient is exact in an f64
        (head >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn values_stay_in_the_unit_interval() {
        for n in -50..50 {
            let value = HashLuck.luck(&format!("{},{}", n, -n));
            assert!((0.0..1.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn same_seed_same_value() {
        assert_eq!(HashLuck.luck("3,4"), HashLuck.luck("3,4"));
    }

    #[test]
    fn nearby_seeds_diverge() {
        assert_ne!(HashLuck.luck("0,0"), HashLuck.luck("0,1"));
        assert_ne!(HashLuck.luck("0,0"), HashLuck.luck("0, 0"));
    }

    #[test]
    fn closures_satisfy_the_trait() {
        let stub = |_: &str| 0.25;
        assert_eq!(stub.luck("anything"), 0.25);
    }
}
