//! # Backend Agreement
//!
//! Both parallel backends must produce exactly what the ripple-carry
//! reference produces, for random operands of every width up to `N_MAX`.

#[cfg(test)]
mod tests {
    use aas_engine::{
        add_sequential, AdditionEngine, Backend, DigitSequence, EngineConfig, Operands, MAX_DIGIT,
        N_MAX,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn engine(backend: Backend) -> AdditionEngine {
        let config = EngineConfig {
            backend,
            ..EngineConfig::for_testing()
        };
        AdditionEngine::from_config(&config).unwrap()
    }

    fn random_sequence(rng: &mut StdRng, len: usize, bias_high: bool) -> DigitSequence {
        let values: Vec<u16> = (0..len)
            .map(|_| {
                if bias_high && rng.gen_bool(0.8) {
                    MAX_DIGIT
                } else {
                    rng.gen_range(0..=MAX_DIGIT)
                }
            })
            .collect();
        DigitSequence::from_values(&values).unwrap()
    }

    #[test]
    fn test_backends_agree_with_reference() {
        let engines = [engine(Backend::Cpu), engine(Backend::Threads)];
        let mut rng = StdRng::seed_from_u64(0x0AA5);

        for len in 1..=N_MAX {
            for bias_high in [false, true] {
                let operands = Operands::new(
                    random_sequence(&mut rng, len, bias_high),
                    random_sequence(&mut rng, len, bias_high),
                )
                .unwrap();
                let expected = add_sequential(&operands);

                for engine in &engines {
                    let actual = engine.add(&operands).unwrap();
                    assert_eq!(
                        actual, expected,
                        "backend {} disagrees at width {}",
                        engine.backend(),
                        len
                    );
                }
            }
        }
    }

    #[test]
    fn test_full_carry_chain_at_maximum_width() {
        let all_max = DigitSequence::from_values(&[MAX_DIGIT; N_MAX]).unwrap();
        let mut one = vec![0u16; N_MAX];
        one[N_MAX - 1] = 1;
        let operands = Operands::new(all_max, DigitSequence::from_values(&one).unwrap()).unwrap();

        for backend in [Backend::Cpu, Backend::Threads] {
            let sum = engine(backend).add(&operands).unwrap();
            assert!(sum.grew());
            assert_eq!(sum.len(), N_MAX + 1);
            assert_eq!(sum.values()[0], 1);
            assert!(sum.values()[1..].iter().all(|&v| v == 0));
        }
    }
}
