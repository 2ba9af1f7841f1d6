use crate::design::error::DesignValidationErr;
use crate::design::types::{DesignInput, OutcomeType, ResolvedDesign, Thresholds};
use crate::error::ToutComputeErr;

/// Checks the structural invariants of a design. Runs before any default is
/// computed or any optimiser call is made, whether or not `n` or `max_n`
/// were supplied.
pub fn validate(input: &DesignInput) -> Result<(), ToutComputeErr> {
    //----------------------------------------
    // Finite inputs
    let mut named = vec![
        ("rho_0", input.rho_0),
        ("rho_1", input.rho_1),
        ("alpha_nom", input.alpha_nom),
        ("beta_nom", input.beta_nom),
        ("gamma_nom", input.gamma_nom),
        ("eta_0", input.eta_0),
        ("tau[0]", input.tau[0]),
        ("tau[1]", input.tau[1]),
    ];
    if let Some(eta_1) = input.eta_1 {
        named.push(("eta_1", eta_1));
    }
    if let Some(sigma) = input.sigma {
        named.push(("sigma", sigma));
    }
    if let Some([x_0, x_1]) = input.x {
        named.push(("x[0]", x_0));
        named.push(("x[1]", x_1));
    }
    if let Some(&(name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
        return Err(DesignValidationErr::NonFinite { name, value }.into());
    }

    //----------------------------------------
    // Hypotheses
    if input.rho_0 == input.rho_1 {
        return Err(DesignValidationErr::IdenticalRates(input.rho_0).into());
    }
    if input.sigma.is_none() {
        for (name, value) in [("rho_0", input.rho_0), ("rho_1", input.rho_1)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DesignValidationErr::RateOutOfBounds { name, value }.into());
            }
        }
    }

    //----------------------------------------
    // Error rate bounds
    for (name, value) in [("alpha_nom", input.alpha_nom), ("beta_nom", input.beta_nom)] {
        if value <= 0.0 || value >= 1.0 {
            return Err(DesignValidationErr::NominalOutOfBounds { name, value }.into());
        }
    }
    if input.gamma_nom <= 0.0 || input.gamma_nom > 1.0 {
        return Err(DesignValidationErr::GammaOutOfBounds(input.gamma_nom).into());
    }
    let etas = std::iter::once(("eta_0", input.eta_0)).chain(input.eta_1.map(|v| ("eta_1", v)));
    for (name, value) in etas {
        if !(0.0..=1.0).contains(&value) {
            return Err(DesignValidationErr::EtaOutOfBounds { name, value }.into());
        }
    }

    //----------------------------------------
    // Adjustment effect + outcome
    let [lower, upper] = input.tau;
    if lower > upper {
        return Err(DesignValidationErr::TauNotOrdered { lower, upper }.into());
    }
    if let Some(sigma) = input.sigma
        && sigma <= 0.0
    {
        return Err(DesignValidationErr::NonPositiveSigma(sigma).into());
    }

    //----------------------------------------
    // Fixed sample size, ceiling, thresholds
    if input.n == Some(0) {
        return Err(DesignValidationErr::ZeroSampleSize.into());
    }
    if input.max_n == Some(0) {
        return Err(DesignValidationErr::ZeroMaxN.into());
    }
    if let Some([x_0, x_1]) = input.x {
        if x_0 > x_1 {
            return Err(DesignValidationErr::ThresholdsNotOrdered { x_0, x_1 }.into());
        }
        if input.sigma.is_none()
            && let Some(&bad) = [x_0, x_1].iter().find(|x| **x < 0.0 || x.fract() != 0.0)
        {
            return Err(DesignValidationErr::NonIntegerThreshold(bad).into());
        }
    }

    Ok(())
}

impl DesignInput {
    /// Validates the input, then resolves defaults that depend on other
    /// parameters (`eta_1` falls back to `eta_0`)
    pub fn resolve(&self) -> Result<ResolvedDesign, ToutComputeErr> {
        validate(self)?;

        let outcome = match self.sigma {
            None => OutcomeType::Binary,
            Some(sigma) => OutcomeType::Continuous { sigma },
        };

        Ok(ResolvedDesign {
            rho_0: self.rho_0,
            rho_1: self.rho_1,
            alpha_nom: self.alpha_nom,
            beta_nom: self.beta_nom,
            gamma_nom: self.gamma_nom,
            eta_0: self.eta_0,
            eta_1: self.eta_1.unwrap_or(self.eta_0),
            tau: self.tau,
            outcome,
            n: self.n,
            x: self.x.map(|[x_0, x_1]| Thresholds::new(x_0, x_1)),
            max_n: self.max_n,
        })
    }
}
