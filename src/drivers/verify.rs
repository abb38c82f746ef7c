//! Randomized property checks of the selectors.
//!
//! Each case is swept completely, calling the selector the same way a blocked algorithm would,
//! and every returned chunk is checked against the properties the selectors guarantee.

use trmm_kc::{align_dim_to_mult, determine_kc, utils::SweepCase, Datatype, Direction, MatrixDesc};

use rayon::prelude::*;

/// A broken guarantee, with enough context to reproduce it.
#[derive(Clone, Debug, PartialEq)]
pub struct Violation {
    /// Position of the case in the checked batch.
    pub index: usize,
    pub case: String,
    pub what: String,
}

/// Sweeps `case` and returns every violated property.
pub fn check_case(case: &SweepCase) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut fail = |what: String| {
        violations.push(Violation {
            index: 0,
            case: describe(case),
            what,
        })
    };

    let dt: Datatype = case.a.execution_datatype();
    let mnr = case.mnr();
    let (alg, max) = (case.bsize.for_type(dt), case.bsize.max_for_type(dt));
    let (b_alg, b_max) = (align_dim_to_mult(alg, mnr), align_dim_to_mult(max, mnr));

    for (orig, aligned) in [(alg, b_alg), (max, b_max)] {
        if aligned % mnr != 0 || aligned < orig || aligned >= orig + mnr {
            fail(format!("{orig} aligned to {aligned} with factor {mnr}"));
        }
    }

    let mut i = 0;
    let mut total = 0;
    while i < case.dim {
        let kc = determine_kc(
            case.direction,
            &case.info,
            i,
            case.dim,
            &case.a,
            &case.b,
            &case.bsize,
        );
        let left = case.dim - i;

        if kc == 0 || kc > b_max || kc > left {
            fail(format!("chunk {kc} at offset {i} (left {left}, max {b_max})"));
            // Stop here: a zero chunk would never terminate, an oversized one overruns.
            return violations;
        }

        let expected = match case.direction {
            Direction::Forward if left <= b_max => left,
            Direction::Forward => b_alg,
            Direction::Backward => {
                let edge = left % b_alg;
                if edge == 0 {
                    b_alg
                } else if left <= b_max {
                    left
                } else if edge <= b_max - b_alg {
                    b_alg + edge
                } else {
                    edge
                }
            }
        };
        if kc != expected {
            fail(format!("chunk {kc} at offset {i}, expected {expected}"));
        }

        i += kc;
        total += kc;
    }

    if total != case.dim {
        fail(format!("chunks sum to {total}"));
    }

    violations
}

/// Checks all cases in parallel and returns the violations found, in case order.
pub fn check_all(cases: &[SweepCase]) -> Vec<Violation> {
    cases
        .par_iter()
        .enumerate()
        .flat_map_iter(|(index, case)| {
            check_case(case)
                .into_iter()
                .map(move |v| Violation { index, ..v })
        })
        .collect()
}

/// Number of distinct cases with at least one violation.
pub fn count_failed(violations: &[Violation]) -> usize {
    let mut indices: Vec<_> = violations.iter().map(|v| v.index).collect();
    indices.sort_unstable();
    indices.dedup();
    indices.len()
}

fn describe(case: &SweepCase) -> String {
    let dt = case.a.execution_datatype();
    format!(
        "{} dim={} dt={} kc={}:{} mnr={} triangular={}",
        case.direction,
        case.dim,
        dt,
        case.bsize.for_type(dt),
        case.bsize.max_for_type(dt),
        case.mnr(),
        case.a.is_root_triangular(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use trmm_kc::{utils::rand_cases, Blksz, MatrixObj, RegisterBlocking};

    #[test]
    fn test_random_cases_hold() {
        let cases = rand_cases(2000, 2048, Some(42)).unwrap();
        assert!(check_all(&cases).is_empty());
    }

    #[test]
    fn test_failed_cases_counted_by_index() {
        let violation = |index| Violation {
            index,
            case: "forward dim=10 dt=d kc=8:8 mnr=4 triangular=true".to_string(),
            what: "chunks sum to 9".to_string(),
        };
        // Two distinct cases sharing a description, one of them failing twice.
        let violations = [violation(3), violation(3), violation(4)];
        assert_eq!(count_failed(&violations), 2);
        assert_eq!(count_failed(&[]), 0);
    }

    #[test]
    fn test_describe() {
        let case = SweepCase {
            dim: 17,
            direction: Direction::Backward,
            a: MatrixObj::triangular(Datatype::Double),
            b: MatrixObj::general(Datatype::Double),
            bsize: Blksz::uniform(8, 8).unwrap(),
            info: RegisterBlocking::new([4; 4], [2; 4]).unwrap(),
        };
        assert!(check_case(&case).is_empty());
        assert_eq!(
            describe(&case),
            "backward dim=17 dt=d kc=8:8 mnr=4 triangular=true"
        );
    }
}
