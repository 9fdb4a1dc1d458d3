// Layout sampling: cone bounds, scatter shell and direction uniformity.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::distribution::{cone_point, levitation_point, photo_surface_point, ring_point, Cone};
use tree_core::constants::PHOTO_SLOTS;

const JITTER_HALF: f32 = 0.1;

#[test]
fn first_needle_sits_at_the_base() {
    let cone = Cone::default();
    let mut rng = StdRng::seed_from_u64(7);
    let p = cone_point(0, 1000, cone, &mut rng);
    assert!((p.y + cone.height / 2.0).abs() <= JITTER_HALF + 1e-4, "y {}", p.y);
    assert!((cone.radius_at(-cone.height / 2.0) - cone.base_radius).abs() < 1e-5);
}

#[test]
fn last_needle_sits_just_below_the_apex() {
    let cone = Cone::default();
    let mut rng = StdRng::seed_from_u64(7);
    let total = 1000;
    let p = cone_point(total - 1, total, cone, &mut rng);
    let expected = (total - 1) as f32 / total as f32 * cone.height - cone.height / 2.0;
    assert!((p.y - expected).abs() <= JITTER_HALF + 1e-4);
    // radius bound shrinks to a sliver near the top
    assert!(cone.radius_at(expected) < 0.01);
}

#[test]
fn needles_fill_the_inner_shell_of_the_cone() {
    let cone = Cone::default();
    let mut rng = StdRng::seed_from_u64(11);
    let total = 2000;
    let radial_jitter = JITTER_HALF * std::f32::consts::SQRT_2 + 1e-4;
    for i in 0..total {
        let p = cone_point(i, total, cone, &mut rng);
        let y0 = i as f32 / total as f32 * cone.height - cone.height / 2.0;
        let r_max = cone.radius_at(y0);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!(r <= r_max + radial_jitter, "i {i}: r {r} > {r_max}");
        assert!(r >= 0.3 * r_max - radial_jitter, "i {i}: r {r} < 0.3 * {r_max}");
    }
}

#[test]
fn scatter_targets_stay_in_the_shell() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..10_000 {
        let d = levitation_point(10.0, &mut rng).length();
        assert!((10.0 - 1e-3..=30.0 + 1e-3).contains(&d), "distance {d}");
    }
}

#[test]
fn scatter_directions_are_uniform_on_the_sphere() {
    const N: usize = 10_000;
    const BUCKETS: usize = 10;
    let mut rng = StdRng::seed_from_u64(2);
    let mut azimuth = [0usize; BUCKETS];
    let mut cos_polar = [0usize; BUCKETS];
    for _ in 0..N {
        let p = levitation_point(10.0, &mut rng);
        let dir = p / p.length();
        let theta = dir.y.atan2(dir.x).rem_euclid(std::f32::consts::TAU);
        let a = ((theta / std::f32::consts::TAU) * BUCKETS as f32) as usize;
        azimuth[a.min(BUCKETS - 1)] += 1;
        let c = (((dir.z + 1.0) / 2.0) * BUCKETS as f32) as usize;
        cos_polar[c.min(BUCKETS - 1)] += 1;
    }
    let expected = N / BUCKETS;
    let tolerance = expected * 15 / 100;
    for (i, (&a, &c)) in azimuth.iter().zip(cos_polar.iter()).enumerate() {
        assert!(a.abs_diff(expected) <= tolerance, "azimuth bucket {i}: {a}");
        assert!(c.abs_diff(expected) <= tolerance, "cos(polar) bucket {i}: {c}");
    }
}

#[test]
fn ring_half_way_round_is_the_bottom() {
    let half = ring_point(PHOTO_SLOTS / 2, PHOTO_SLOTS, 18.0, 10.0, 8.0);
    assert!(half.x.abs() < 1e-3);
    assert!((half.y + 10.0).abs() < 1e-3);
}

#[test]
fn photo_slots_sit_outside_the_cone() {
    let cone = Cone::default();
    for i in 0..PHOTO_SLOTS {
        let (p, look) = photo_surface_point(i, PHOTO_SLOTS, cone);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - (cone.radius_at(p.y) + 0.5)).abs() < 1e-3);
        assert_eq!(look.y, p.y);
    }
}
