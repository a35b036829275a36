use rand::{seq::SliceRandom, Rng};

use crate::error::QuizError;

/// Picks `count - 1` distinct indices from `0..limit`, none equal to `exclude`,
/// and appends `exclude` as the last element.
///
/// Rejection sampling is used while the pool is at least twice the request.
/// Denser requests shuffle the pool instead so the draw always terminates.
pub fn sample<R: Rng + ?Sized>(
    rng: &mut R,
    limit: usize,
    count: usize,
    exclude: usize,
) -> Result<Vec<usize>, QuizError> {
    if limit < count {
        return Err(QuizError::InsufficientVocabulary {
            required: count,
            available: limit,
        });
    }
    if exclude >= limit {
        return Err(QuizError::IndexOutOfRange {
            index: exclude,
            limit,
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut picked = if limit >= count * 2 {
        by_rejection(rng, limit, count - 1, exclude)
    } else {
        by_shuffle(rng, limit, count - 1, exclude)
    };
    picked.push(exclude);

    Ok(picked)
}

fn by_rejection<R: Rng + ?Sized>(
    rng: &mut R,
    limit: usize,
    wanted: usize,
    exclude: usize,
) -> Vec<usize> {
    let mut picked = Vec::with_capacity(wanted + 1);
    while picked.len() < wanted {
        let candidate = rng.gen_range(0..limit);
        if candidate != exclude && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    picked
}

fn by_shuffle<R: Rng + ?Sized>(
    rng: &mut R,
    limit: usize,
    wanted: usize,
    exclude: usize,
) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..limit).filter(|&i| i != exclude).collect();
    pool.shuffle(rng);
    pool.truncate(wanted);
    pool
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn excluded_index_is_last_and_never_a_distractor() {
        let mut rng = Pcg32::seed_from_u64(7);
        for limit in 4..40 {
            for exclude in 0..limit {
                let picked = sample(&mut rng, limit, 4, exclude).unwrap();
                assert_eq!(picked.len(), 4);
                assert_eq!(picked[3], exclude);
                assert!(!picked[..3].contains(&exclude));

                let unique: HashSet<_> = picked.iter().collect();
                assert_eq!(unique.len(), 4);
                assert!(picked.iter().all(|&i| i < limit));
            }
        }
    }

    #[test]
    fn exact_pool_uses_every_index() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut picked = sample(&mut rng, 4, 4, 2).unwrap();
        assert_eq!(picked[3], 2);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2, 3]);
    }

    #[test]
    fn small_pool_fails_fast() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            sample(&mut rng, 3, 4, 0),
            Err(QuizError::InsufficientVocabulary {
                required: 4,
                available: 3
            })
        );
    }

    #[test]
    fn exclude_outside_pool_is_rejected() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            sample(&mut rng, 5, 4, 5),
            Err(QuizError::IndexOutOfRange { index: 5, limit: 5 })
        );
    }

    #[test]
    fn same_seed_same_draw() {
        let first = sample(&mut Pcg32::seed_from_u64(42), 100, 4, 17).unwrap();
        let second = sample(&mut Pcg32::seed_from_u64(42), 100, 4, 17).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_slot_is_just_the_answer() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(sample(&mut rng, 2, 1, 1).unwrap(), vec![1]);
        assert!(sample(&mut rng, 2, 0, 1).unwrap().is_empty());
    }
}
