//----------------------------------------
// design mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

pub const DEFAULT_GAMMA_NOM: f64 = 1.0;
pub const DEFAULT_ETA_0: f64 = 0.5;

fn default_gamma_nom() -> f64 {
    DEFAULT_GAMMA_NOM
}

fn default_eta_0() -> f64 {
    DEFAULT_ETA_0
}

/// Parameters of a single design search, as supplied by the caller.
///
/// Only `rho_0`, `rho_1`, `alpha_nom` and `beta_nom` are required; the
/// remaining fields take the documented defaults, both through
/// [`DesignInput::new`] and when deserialised from JSON. Nothing here is
/// checked until [`DesignInput::resolve`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// Null hypothesis rate
    pub rho_0: f64,
    /// Alternative hypothesis rate
    pub rho_1: f64,
    /// Upper bound on attained alpha
    pub alpha_nom: f64,
    /// Upper bound on attained beta
    pub beta_nom: f64,
    /// Upper bound on attained gamma; 1 leaves gamma unconstrained
    #[serde(default = "default_gamma_nom")]
    pub gamma_nom: f64,
    /// Probability of wrongly proceeding after a pause under the null
    #[serde(default = "default_eta_0")]
    pub eta_0: f64,
    /// Probability of wrongly stopping after a pause under the alternative;
    /// falls back to `eta_0`
    #[serde(default)]
    pub eta_1: Option<f64>,
    /// Interval of adjustment effects, lower then upper
    #[serde(default)]
    pub tau: [f64; 2],
    /// Outcome standard deviation; `None` means a binary outcome
    #[serde(default)]
    pub sigma: Option<f64>,
    /// Fixed sample size; skips the sweep
    #[serde(default)]
    pub n: Option<usize>,
    /// Fixed decision thresholds; skips threshold optimisation
    #[serde(default)]
    pub x: Option<[f64; 2]>,
    /// Largest sample size the sweep will consider
    #[serde(default)]
    pub max_n: Option<usize>,
}

impl DesignInput {
    pub fn new(rho_0: f64, rho_1: f64, alpha_nom: f64, beta_nom: f64) -> Self {
        Self {
            rho_0,
            rho_1,
            alpha_nom,
            beta_nom,
            gamma_nom: DEFAULT_GAMMA_NOM,
            eta_0: DEFAULT_ETA_0,
            eta_1: None,
            tau: [0.0, 0.0],
            sigma: None,
            n: None,
            x: None,
            max_n: None,
        }
    }

    pub fn with_gamma_nom(mut self, gamma_nom: f64) -> Self {
        self.gamma_nom = gamma_nom;
        self
    }

    pub fn with_eta_0(mut self, eta_0: f64) -> Self {
        self.eta_0 = eta_0;
        self
    }

    pub fn with_eta_1(mut self, eta_1: f64) -> Self {
        self.eta_1 = Some(eta_1);
        self
    }

    pub fn with_tau(mut self, lower: f64, upper: f64) -> Self {
        self.tau = [lower, upper];
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    pub fn with_n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_thresholds(mut self, x_0: f64, x_1: f64) -> Self {
        self.x = Some([x_0, x_1]);
        self
    }

    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.max_n = Some(max_n);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutcomeType {
    Binary,
    Continuous { sigma: f64 },
}

/// Decision thresholds on the statistic oriented towards the alternative:
/// stop below `x_0`, pause on `[x_0, x_1)`, go at or above `x_1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub x_0: f64,
    pub x_1: f64,
}

impl Thresholds {
    pub fn new(x_0: f64, x_1: f64) -> Self {
        Self { x_0, x_1 }
    }
}

/// A validated design with every default resolved. Only
/// [`DesignInput::resolve`] builds one, so holding a `ResolvedDesign` means
/// the structural invariants hold.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDesign {
    pub rho_0: f64,
    pub rho_1: f64,
    pub alpha_nom: f64,
    pub beta_nom: f64,
    pub gamma_nom: f64,
    pub eta_0: f64,
    pub eta_1: f64,
    pub tau: [f64; 2],
    pub outcome: OutcomeType,
    pub n: Option<usize>,
    pub x: Option<Thresholds>,
    pub max_n: Option<usize>,
}

/// What the per-size optimiser reports for one sample size. `valid` only
/// covers the alpha and beta bounds; the rates are filled in either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateDesign {
    pub valid: bool,
    pub thresholds: Thresholds,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl CandidateDesign {
    /// Valid and within the gamma bound, i.e. acceptable to the sweep
    pub fn is_feasible(&self, gamma_nom: f64) -> bool {
        self.valid && self.gamma <= gamma_nom
    }
}
