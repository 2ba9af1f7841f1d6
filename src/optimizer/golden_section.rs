//! Golden section search for one-dimensional minimisation on a bracket.
//!
//! Used to polish the best grid point of the continuous threshold search.
//! The objective is only assumed unimodal inside the bracket; callers pass a
//! bracket of two grid cells around the best grid point and keep the grid
//! answer if the refinement does not improve on it.

/// 1 / phi
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Minimiser and minimum found inside `bracket`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub x: f64,
    pub value: f64,
}

pub fn minimize<F, E>(
    mut f: F,
    bracket: [f64; 2],
    tol: f64,
    max_iter: usize,
) -> Result<Solution, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let [mut a, mut b] = bracket;
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }

    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut f_c = f(c)?;
    let mut f_d = f(d)?;

    let mut iter = 0;
    while (b - a).abs() > tol && iter < max_iter {
        if f_c <= f_d {
            b = d;
            d = c;
            f_d = f_c;
            c = b - INV_PHI * (b - a);
            f_c = f(c)?;
        } else {
            a = c;
            c = d;
            f_c = f_d;
            d = a + INV_PHI * (b - a);
            f_d = f(d)?;
        }
        iter += 1;
    }

    if f_c <= f_d {
        Ok(Solution { x: c, value: f_c })
    } else {
        Ok(Solution { x: d, value: f_d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn quadratic_minimum() {
        let sol = minimize(
            |x| Ok::<_, Infallible>((x - 1.3) * (x - 1.3) + 2.0),
            [0.0, 4.0],
            1e-9,
            200,
        )
        .unwrap();
        assert!((sol.x - 1.3).abs() < 1e-6);
        assert!((sol.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn reversed_bracket() {
        let sol = minimize(|x: f64| Ok::<_, Infallible>(x.abs()), [2.0, -3.0], 1e-9, 200).unwrap();
        assert!(sol.x.abs() < 1e-6);
    }

    #[test]
    fn error_propagates() {
        let res = minimize(|_| Err::<f64, _>("boom"), [0.0, 1.0], 1e-6, 10);
        assert_eq!(res, Err("boom"));
    }

    #[test]
    fn max_iter_bounds_work() {
        let mut calls = 0;
        let _ = minimize(
            |x| {
                calls += 1;
                Ok::<_, Infallible>(x * x)
            },
            [-1.0, 1.0],
            0.0,
            5,
        );
        assert_eq!(calls, 7);
    }
}
