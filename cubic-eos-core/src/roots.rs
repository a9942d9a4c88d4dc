//! Volume roots of the cubic equation of state.
//!
//! The pressure equation is rearranged into the monic polynomial
//!
//! $$v^3+c_2v^2+c_1v+c_0=0$$
//!
//! which is solved in closed form along two independent routes. The quick
//! route depresses the cubic and selects the trigonometric solution (three
//! real roots) or Cardano's formula (one real root and a conjugate pair)
//! from the sign of the discriminant. The literal route evaluates the general
//! solution with complex arithmetic without any case distinction. Both
//! results are brought into the same canonical order and every real root is
//! refined with Newton steps on the polynomial. At low pressures $|c_2|$
//! exceeds the liquid root by orders of magnitude and the closed forms lose
//! most significant digits of the small roots.
use crate::equation_of_state::{Delta, Evaluation};
use crate::errors::{ensure_positive, EosError, EosResult};
use crate::RGAS;
use num_complex::Complex64;
use num_traits::Zero;
use std::f64::consts::PI;

/// Three volume roots in ascending order of their real parts.
///
/// Complex roots are stored as exact conjugate pairs with the positive
/// imaginary part first.
pub type VolumeRoots = [Complex64; 3];

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Imaginary parts below this fraction of the largest root are rounding noise.
const IMAGINARY_TOLERANCE: f64 = 1e-10;

/// Maximum number of Newton steps to refine a real root.
const MAX_ITER_POLISH: usize = 4;

/// Coefficients $[c_2, c_1, c_0]$ of the monic volume polynomial.
pub fn volume_polynomial(
    temperature: f64,
    pressure: f64,
    b: f64,
    a_alpha: f64,
    delta: &Delta,
) -> [f64; 3] {
    let s = delta.d1 + delta.d2;
    let q = delta.d1 * delta.d2;
    let rt_p = RGAS * temperature / pressure;
    [
        (s - 1.0) * b - rt_p,
        (q - s) * b * b - s * b * rt_p + a_alpha / pressure,
        -q * b * b * (b + rt_p) - a_alpha * b / pressure,
    ]
}

/// All three volume roots of the cubic equation of state at given temperature and pressure.
pub fn volume_solutions(
    temperature: f64,
    pressure: f64,
    b: f64,
    a_alpha: f64,
    delta: &Delta,
    evaluation: Evaluation,
) -> EosResult<VolumeRoots> {
    ensure_positive("volume solutions", "temperature", temperature)?;
    ensure_positive("volume solutions", "pressure", pressure)?;
    ensure_positive("volume solutions", "b", b)?;
    if !a_alpha.is_finite() {
        return Err(EosError::InvalidState(
            String::from("volume solutions"),
            String::from("a_alpha"),
            a_alpha,
        ));
    }
    let coefs = volume_polynomial(temperature, pressure, b, a_alpha, delta);
    let roots = match evaluation {
        Evaluation::Quick => roots_depressed(coefs),
        Evaluation::Literal => roots_general(coefs),
    };
    Ok(polish(canonicalize(roots), coefs))
}

fn roots_depressed([c2, c1, c0]: [f64; 3]) -> VolumeRoots {
    let shift = -c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = (2.0 * c2 * c2 - 9.0 * c1) * c2 / 27.0 + c0;
    let discriminant = 0.25 * q * q + p * p * p / 27.0;

    if discriminant < 0.0 {
        let m = 2.0 * (-p / 3.0).sqrt();
        let theta = (3.0 * q / (p * m)).clamp(-1.0, 1.0).acos() / 3.0;
        let root = |k: f64| Complex64::new(m * (theta - 2.0 * PI * k / 3.0).cos() + shift, 0.0);
        [root(0.0), root(1.0), root(2.0)]
    } else {
        // sign choice avoids cancellation in the second cube root
        let u = -q.signum() * (0.5 * q.abs() + discriminant.sqrt()).cbrt();
        let v = if u == 0.0 { 0.0 } else { -p / (3.0 * u) };
        let re = shift - 0.5 * (u + v);
        let im = 0.5 * SQRT_3 * (u - v);
        [
            Complex64::new(shift + u + v, 0.0),
            Complex64::new(re, im),
            Complex64::new(re, -im),
        ]
    }
}

fn roots_general([c2, c1, c0]: [f64; 3]) -> VolumeRoots {
    let d0 = c2 * c2 - 3.0 * c1;
    let d1 = (2.0 * c2 * c2 - 9.0 * c1) * c2 + 27.0 * c0;
    let sqrt = Complex64::new(d1 * d1 - 4.0 * d0 * d0 * d0, 0.0).sqrt();
    let (plus, minus) = (0.5 * (d1 + sqrt), 0.5 * (d1 - sqrt));
    let c = if plus.norm() >= minus.norm() {
        plus
    } else {
        minus
    }
    .cbrt();
    if c.is_zero() {
        return [Complex64::new(-c2 / 3.0, 0.0); 3];
    }

    let xi = Complex64::new(-0.5, 0.5 * SQRT_3);
    let mut roots = [Complex64::zero(); 3];
    let mut ck = c;
    for root in roots.iter_mut() {
        *root = -(c2 + ck + d0 / ck) / 3.0;
        ck *= xi;
    }
    roots
}

fn canonicalize(mut roots: VolumeRoots) -> VolumeRoots {
    let scale = roots.iter().map(|r| r.norm()).fold(0.0, f64::max);

    // a cubic with real coefficients has at least one real root
    roots.sort_by(|a, b| a.im.abs().total_cmp(&b.im.abs()));
    roots[0].im = 0.0;
    let (r1, r2) = (roots[1], roots[2]);
    if r1.im.abs() + r2.im.abs() <= IMAGINARY_TOLERANCE * scale {
        roots[1].im = 0.0;
        roots[2].im = 0.0;
    } else {
        let re = 0.5 * (r1.re + r2.re);
        let im = 0.5 * (r1.im.abs() + r2.im.abs());
        roots[1] = Complex64::new(re, im);
        roots[2] = Complex64::new(re, -im);
    }

    sort(&mut roots);
    roots
}

fn sort(roots: &mut VolumeRoots) {
    roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(b.im.total_cmp(&a.im)));
}

/// Newton refinement of the real roots.
///
/// A step is only accepted if it decreases the residual.
fn polish(mut roots: VolumeRoots, [c2, c1, c0]: [f64; 3]) -> VolumeRoots {
    let residual = |v: f64| (((v + c2) * v + c1) * v + c0).abs();
    for root in roots.iter_mut().filter(|r| r.im == 0.0) {
        let mut v = root.re;
        let mut r = residual(v);
        for _ in 0..MAX_ITER_POLISH {
            if r == 0.0 {
                break;
            }
            let dp = (3.0 * v + 2.0 * c2) * v + c1;
            let next = v - (((v + c2) * v + c1) * v + c0) / dp;
            let r_next = residual(next);
            if !(next.is_finite() && r_next < r) {
                break;
            }
            v = next;
            r = r_next;
        }
        root.re = v;
    }
    sort(&mut roots);
    roots
}
