//! 3D simplex noise (Ashima Arts / Ian McEwan formulation).
//!
//! CPU twin of the `noise3` helper found in most particle shaders, so the
//! turbulence computed here matches what a GPU path would produce.

use glam::{Vec3, Vec4};

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

/// GLSL `step(edge, x)` per component.
#[inline]
fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::new(
        if x.x < edge.x { 0.0 } else { 1.0 },
        if x.y < edge.y { 0.0 } else { 1.0 },
        if x.z < edge.z { 0.0 } else { 1.0 },
    )
}

/// Simplex noise in roughly `[-1, 1]`.
pub fn simplex3(v: Vec3) -> f32 {
    const C: [f32; 2] = [1.0 / 6.0, 1.0 / 3.0];

    // First corner
    let mut i = (v + Vec3::splat(v.dot(Vec3::splat(C[1])))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(C[0])));

    // Other corners
    let g = step3(Vec3::new(x0.y, x0.z, x0.x), x0);
    let l = Vec3::ONE - g;
    let l_zxy = Vec3::new(l.z, l.x, l.y);
    let i1 = g.min(l_zxy);
    let i2 = g.max(l_zxy);

    let x1 = x0 - i1 + Vec3::splat(C[0]);
    let x2 = x0 - i2 + Vec3::splat(C[1]);
    let x3 = x0 - Vec3::splat(0.5);

    // Permutations
    i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron
    let n_ = 0.142_857_14_f32;
    let ns = Vec3::new(2.0 * n_, 0.5 * n_ - 1.0, n_);

    let j = p - (p * ns.z * ns.z).floor() * 49.0;
    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = Vec4::new(
        if h.x <= 0.0 { -1.0 } else { 0.0 },
        if h.y <= 0.0 { -1.0 } else { 0.0 },
        if h.z <= 0.0 { -1.0 } else { 0.0 },
        if h.w <= 0.0 { -1.0 } else { 0.0 },
    );

    let a0 = Vec4::new(
        b0.x + s0.x * sh.x,
        b0.z + s0.z * sh.x,
        b0.y + s0.y * sh.y,
        b0.w + s0.w * sh.y,
    );
    let a1 = Vec4::new(
        b1.x + s1.x * sh.z,
        b1.z + s1.z * sh.z,
        b1.y + s1.y * sh.w,
        b1.w + s1.w * sh.w,
    );

    let mut p0 = Vec3::new(a0.x, a0.y, h.x);
    let mut p1 = Vec3::new(a0.z, a0.w, h.y);
    let mut p2 = Vec3::new(a1.x, a1.y, h.z);
    let mut p3 = Vec3::new(a1.z, a1.w, h.w);

    // Normalise gradients
    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    // Mix final noise value
    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded_and_deterministic() {
        for i in 0..2_000 {
            let f = i as f32 * 0.173;
            let v = Vec3::new(f.sin() * 9.0, f * 0.31, f.cos() * 4.0);
            let n = simplex3(v);
            assert!(n.is_finite());
            assert!(n.abs() <= 1.1, "noise out of range: {n} at {v:?}");
            assert_eq!(n, simplex3(v));
        }
    }

    #[test]
    fn noise_varies_over_space() {
        let a = simplex3(Vec3::new(0.3, 0.7, 0.1));
        let b = simplex3(Vec3::new(4.1, -2.3, 1.9));
        assert!((a - b).abs() > 1e-4);
    }
}
