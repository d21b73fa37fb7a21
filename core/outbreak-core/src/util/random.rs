use rand::Rng;

/// Returns true with frequency `p` over repeated calls, for `p` in [0, 1].
pub fn occurs<R: Rng>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Fair coin.
pub fn coin<R: Rng>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn occurs_extremes() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            assert!(!occurs(&mut rng, 0.0));
            assert!(occurs(&mut rng, 1.0));
        }
    }

    #[test]
    fn coin_is_roughly_fair() {
        let mut rng = StdRng::seed_from_u64(1);
        let heads = (0..1000).filter(|_| coin(&mut rng)).count();
        assert!((400..600).contains(&heads), "heads = {heads}");
    }
}
