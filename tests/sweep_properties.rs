//! Randomized sweeps over the public selectors, driven the way a blocked algorithm drives them.

use rand::prelude::*;
use trmm_kc::{
    align_dim_to_mult, determine_kc_b_with, determine_kc_f_with, Blksz, Chunk, Datatype,
    Direction, KcSweep, MatrixObj, RegisterBlocking,
};

struct Setup {
    info: RegisterBlocking,
    bsize: Blksz,
    a: MatrixObj,
    b: MatrixObj,
    b_alg: usize,
    b_max: usize,
}

fn rand_setup(rng: &mut SmallRng) -> Setup {
    let dt = Datatype::ALL[rng.gen_range(0..4)];
    let mr = rng.gen_range(1..=12);
    let nr = rng.gen_range(1..=12);
    let alg = rng.gen_range(1..=96);
    let max = alg + rng.gen_range(0..=64);
    let triangular = rng.gen_bool(0.5);

    let a = match triangular {
        true => MatrixObj::triangular(dt),
        false => MatrixObj::general(dt),
    };
    let mnr = if triangular { mr } else { nr };

    Setup {
        info: RegisterBlocking::new([mr; 4], [nr; 4]).unwrap(),
        bsize: Blksz::uniform(alg, max).unwrap(),
        a,
        b: MatrixObj::general(dt),
        b_alg: align_dim_to_mult(alg, mnr),
        b_max: align_dim_to_mult(max, mnr),
    }
}

fn sweep(s: &Setup, direction: Direction, dim: usize) -> Vec<Chunk> {
    KcSweep::with_tuning(&s.info, direction, dim, &s.a, &s.b, &s.bsize).collect()
}

#[test]
fn forward_sweeps_cover_dimension() {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..500 {
        let s = rand_setup(&mut rng);
        let dim = rng.gen_range(0..2000);
        let chunks = sweep(&s, Direction::Forward, dim);

        assert_eq!(chunks.iter().map(|c| c.len).sum::<usize>(), dim);
        let mut expected_offset = 0;
        for chunk in &chunks {
            assert_eq!(chunk.offset, expected_offset);
            assert!(chunk.len > 0 && chunk.len <= s.b_max);
            expected_offset = chunk.end();
        }
        // All but the last chunk use the default blocksize.
        if let Some((_, body)) = chunks.split_last() {
            assert!(body.iter().all(|c| c.len == s.b_alg));
        }
    }
}

#[test]
fn backward_sweeps_cover_dimension() {
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..500 {
        let s = rand_setup(&mut rng);
        let dim = rng.gen_range(0..2000);
        let chunks = sweep(&s, Direction::Backward, dim);

        assert_eq!(chunks.iter().map(|c| c.len).sum::<usize>(), dim);
        let mut expected_end = dim;
        for chunk in &chunks {
            assert_eq!(chunk.end(), expected_end);
            assert!(chunk.len > 0 && chunk.len <= s.b_max);
            expected_end = chunk.offset;
        }
        assert_eq!(expected_end, 0);
        // Only the first visited chunk absorbs the uneven edge.
        if dim > s.b_max {
            assert!(chunks[1..].iter().all(|c| c.len == s.b_alg));
        }
    }
}

#[test]
fn backward_redistributes_slack() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..2000 {
        let s = rand_setup(&mut rng);
        let dim = rng.gen_range(1..4000);
        let i = rng.gen_range(0..dim);
        let left = dim - i;
        let edge = left % s.b_alg;

        let kc = determine_kc_b_with(&s.info, i, dim, &s.a, &s.b, &s.bsize);
        if edge == 0 {
            assert_eq!(kc, s.b_alg);
        } else if left <= s.b_max {
            assert_eq!(kc, left);
        } else if edge <= s.b_max - s.b_alg {
            assert_eq!(kc, s.b_alg + edge);
        } else {
            assert_eq!(kc, edge);
        }
        assert!(kc > 0 && kc <= s.b_max);
    }
}

#[test]
fn forward_takes_whole_remainder_under_max() {
    let mut rng = SmallRng::seed_from_u64(4);
    for _ in 0..2000 {
        let s = rand_setup(&mut rng);
        let dim = rng.gen_range(1..4000);
        let i = rng.gen_range(0..dim);

        let kc = determine_kc_f_with(&s.info, i, dim, &s.a, &s.b, &s.bsize);
        if dim - i <= s.b_max {
            assert_eq!(kc, dim - i);
        } else {
            assert_eq!(kc, s.b_alg);
        }
    }
}

#[test]
fn selectors_are_shareable_across_threads() {
    let bsize = Blksz::kc_reference();
    let a = MatrixObj::triangular(Datatype::Double);
    let b = MatrixObj::general(Datatype::Double);
    let serial: Vec<_> = (1..64)
        .map(|dim| KcSweep::new(Direction::Backward, dim * 37, &a, &b, &bsize).count())
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..64)
            .map(|dim| {
                let (a, b, bsize) = (&a, &b, &bsize);
                scope.spawn(move || KcSweep::new(Direction::Backward, dim * 37, a, b, bsize).count())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(serial, parallel);
}
