//! Linearized Carvallo-Whipple bicycle model.
//!
//! The model wraps a benchmark parameter set and produces the canonical
//! matrices, the state space realization and the eigenvalues/eigenvectors
//! of the 2-DOF (roll, steer) linearized equations of motion:
//!
//! ```text
//! M qdd + v C1 qd + (g K0 + v^2 K2) q = T
//! ```
//!
//! over q = [roll angle, steer angle] and T = [roll torque, steer torque].
//! Every entry point is a pure function of the stored parameters plus the
//! caller's overrides; overrides merge into a transient copy and at most one
//! of them may sweep a vector of values.

use std::collections::HashMap;

use na::{Complex, Matrix2, Matrix4, Matrix4x2, Vector4};

use crate::errors::BicycleError;
use crate::parameter_sets::{lookup, Meijaard2007ParameterSet, ParameterSet};
use crate::types::Float;
use crate::util::complex_eigen4;

/// A single parameter override: fix a new value, or sweep a vector of them.
#[derive(Debug, Clone)]
pub enum OverrideValue {
    Scalar(Float),
    Sweep(Vec<Float>),
}

/// Named parameter overrides applied on top of the wrapped parameter set for
/// the duration of one call.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: Vec<(String, OverrideValue)>,
}

impl Overrides {
    pub fn new() -> Self {
        Overrides {
            entries: Vec::new(),
        }
    }

    /// Fix a parameter at a new value for this call.
    pub fn set(mut self, name: &str, value: Float) -> Self {
        self.entries
            .push((name.to_string(), OverrideValue::Scalar(value)));
        self
    }

    /// Sweep a parameter over a vector of values for this call.
    pub fn sweep(mut self, name: &str, values: Vec<Float>) -> Self {
        self.entries
            .push((name.to_string(), OverrideValue::Sweep(values)));
        self
    }
}

/// Result of a model evaluation: one sample, or one sample per swept value
/// in the order the sweep vector was given.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput<T> {
    Single(T),
    Swept(Vec<T>),
}

impl<T> ModelOutput<T> {
    pub fn len(&self) -> usize {
        match self {
            ModelOutput::Single(_) => 1,
            ModelOutput::Swept(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sole sample of an unswept evaluation.
    pub fn into_single(self) -> Option<T> {
        match self {
            ModelOutput::Single(sample) => Some(sample),
            ModelOutput::Swept(_) => None,
        }
    }

    /// All samples regardless of whether a sweep was requested.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ModelOutput::Single(sample) => vec![sample],
            ModelOutput::Swept(samples) => samples,
        }
    }
}

/// The four canonical matrices of the linearized model. M and K0 are
/// independent of speed; C1 enters scaled by v, K2 by v squared and K0 by g.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMatrices {
    pub M: Matrix2<Float>,
    pub C1: Matrix2<Float>,
    pub K0: Matrix2<Float>,
    pub K2: Matrix2<Float>,
}

/// First order realization over state [roll, steer, roll rate, steer rate]
/// and inputs (roll torque, steer torque).
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpaceMatrices {
    pub A: Matrix4<Float>,
    pub B: Matrix4x2<Float>,
}

/// Eigenvalues and matching right eigenvectors (unit norm, in columns) of
/// the state matrix A. Column i pairs with value i; no ordering is imposed.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigen {
    pub values: Vector4<Complex<Float>>,
    pub vectors: Matrix4<Complex<Float>>,
}

/// Typed view of one complete benchmark parameter sample, built from the
/// flat map once per evaluation so the matrix expressions read named fields
/// instead of string keys.
struct BenchmarkParams {
    IBxx: Float,
    IBxz: Float,
    IBzz: Float,
    IFxx: Float,
    IFyy: Float,
    IHxx: Float,
    IHxz: Float,
    IHzz: Float,
    IRxx: Float,
    IRyy: Float,
    c: Float,
    g: Float,
    lam: Float,
    mB: Float,
    mF: Float,
    mH: Float,
    mR: Float,
    rF: Float,
    rR: Float,
    v: Float,
    w: Float,
    xB: Float,
    xH: Float,
    zB: Float,
    zH: Float,
}

impl BenchmarkParams {
    fn from_map(par: &HashMap<String, Float>) -> Result<Self, BicycleError> {
        Ok(BenchmarkParams {
            IBxx: lookup(par, "IBxx")?,
            IBxz: lookup(par, "IBxz")?,
            IBzz: lookup(par, "IBzz")?,
            IFxx: lookup(par, "IFxx")?,
            IFyy: lookup(par, "IFyy")?,
            IHxx: lookup(par, "IHxx")?,
            IHxz: lookup(par, "IHxz")?,
            IHzz: lookup(par, "IHzz")?,
            IRxx: lookup(par, "IRxx")?,
            IRyy: lookup(par, "IRyy")?,
            c: lookup(par, "c")?,
            g: lookup(par, "g")?,
            lam: lookup(par, "lam")?,
            mB: lookup(par, "mB")?,
            mF: lookup(par, "mF")?,
            mH: lookup(par, "mH")?,
            mR: lookup(par, "mR")?,
            rF: lookup(par, "rF")?,
            rR: lookup(par, "rR")?,
            v: lookup(par, "v")?,
            w: lookup(par, "w")?,
            xB: lookup(par, "xB")?,
            xH: lookup(par, "xH")?,
            zB: lookup(par, "zB")?,
            zH: lookup(par, "zH")?,
        })
    }
}

/// Evaluates the closed form canonical matrix expressions for one parameter
/// sample.
fn form_canonical(p: &BenchmarkParams) -> CanonicalMatrices {
    // whole vehicle aggregates about the rear contact point
    let mT = p.mR + p.mB + p.mH + p.mF;
    let xT = (p.xB * p.mB + p.xH * p.mH + p.w * p.mF) / mT;
    let zT = (-p.rR * p.mR + p.zB * p.mB + p.zH * p.mH - p.rF * p.mF) / mT;

    let ITxx = p.IRxx
        + p.IBxx
        + p.IHxx
        + p.IFxx
        + p.mR * p.rR.powi(2)
        + p.mB * p.zB.powi(2)
        + p.mH * p.zH.powi(2)
        + p.mF * p.rF.powi(2);
    let ITxz =
        p.IBxz + p.IHxz - p.mB * p.xB * p.zB - p.mH * p.xH * p.zH + p.mF * p.w * p.rF;
    // axisymmetric wheels
    let IRzz = p.IRxx;
    let IFzz = p.IFxx;
    let ITzz = IRzz
        + p.IBzz
        + p.IHzz
        + IFzz
        + p.mB * p.xB.powi(2)
        + p.mH * p.xH.powi(2)
        + p.mF * p.w.powi(2);

    // front assembly (handlebar, fork and front wheel)
    let mA = p.mH + p.mF;
    let xA = (p.xH * p.mH + p.w * p.mF) / mA;
    let zA = (p.zH * p.mH - p.rF * p.mF) / mA;

    let IAxx =
        p.IHxx + p.IFxx + p.mH * (p.zH - zA).powi(2) + p.mF * (p.rF + zA).powi(2);
    let IAxz = p.IHxz - p.mH * (p.xH - xA) * (p.zH - zA) + p.mF * (p.w - xA) * (p.rF + zA);
    let IAzz = p.IHzz + IFzz + p.mH * (p.xH - xA).powi(2) + p.mF * (p.w - xA).powi(2);

    // project the front assembly onto the steer axis
    let (slam, clam) = p.lam.sin_cos();
    let uA = (xA - p.w - p.c) * clam - zA * slam;
    let IAll =
        mA * uA.powi(2) + IAxx * slam.powi(2) + 2.0 * IAxz * slam * clam + IAzz * clam.powi(2);
    let IAlx = -mA * uA * zA + IAxx * slam + IAxz * clam;
    let IAlz = mA * uA * xA + IAxz * slam + IAzz * clam;

    let mu = p.c / p.w * clam;

    // gyroscopic coefficients of the spinning wheels
    let SR = p.IRyy / p.rR;
    let SF = p.IFyy / p.rF;
    let ST = SR + SF;
    let SA = mA * uA + mu * mT * xT;

    let Mpd = IAlx + mu * ITxz;
    #[rustfmt::skip]
    let M = Matrix2::new(
        ITxx, Mpd,
        Mpd,  IAll + 2.0 * mu * IAlz + mu.powi(2) * ITzz,
    );

    #[rustfmt::skip]
    let K0 = Matrix2::new(
        mT * zT, -SA,
        -SA,     -SA * slam,
    );

    #[rustfmt::skip]
    let K2 = Matrix2::new(
        0.0, (ST - mT * zT) / p.w * clam,
        0.0, (SA + SF * slam) / p.w * clam,
    );

    #[rustfmt::skip]
    let C1 = Matrix2::new(
        0.0,                    mu * ST + SF * clam + ITxz / p.w * clam - mu * mT * zT,
        -(mu * ST + SF * clam), IAlz / p.w * clam + mu * (SA + ITzz / p.w * clam),
    );

    CanonicalMatrices { M, C1, K0, K2 }
}

fn form_state_space(p: &BenchmarkParams) -> Result<StateSpaceMatrices, BicycleError> {
    let canonical = form_canonical(p);
    let Minv = canonical
        .M
        .try_inverse()
        .ok_or_else(|| BicycleError::Numeric("mass matrix is singular".to_string()))?;

    let lower_left = -Minv * (p.g * canonical.K0 + p.v.powi(2) * canonical.K2);
    let lower_right = -Minv * (p.v * canonical.C1);

    let mut A = Matrix4::zeros();
    A[(0, 2)] = 1.0;
    A[(1, 3)] = 1.0;
    A.fixed_view_mut::<2, 2>(2, 0).copy_from(&lower_left);
    A.fixed_view_mut::<2, 2>(2, 2).copy_from(&lower_right);

    let mut B = Matrix4x2::zeros();
    B.fixed_view_mut::<2, 2>(2, 0).copy_from(&Minv);

    Ok(StateSpaceMatrices { A, B })
}

fn form_eigen(p: &BenchmarkParams) -> Result<Eigen, BicycleError> {
    let realization = form_state_space(p)?;
    let (values, vectors) = complex_eigen4(&realization.A).ok_or_else(|| {
        BicycleError::Numeric("eigenvalue iteration did not converge".to_string())
    })?;
    Ok(Eigen { values, vectors })
}

/// Linearized model over one benchmark parameter set.
#[derive(Debug, Clone)]
pub struct Meijaard2007Model {
    pub parameter_set: Meijaard2007ParameterSet,
}

impl Meijaard2007Model {
    pub fn new(parameter_set: Meijaard2007ParameterSet) -> Self {
        Meijaard2007Model { parameter_set }
    }

    /// Merges the overrides into a transient copy of the stored parameters.
    /// Returns the merged scalar map and the at most one requested sweep.
    fn parse_overrides(
        &self,
        overrides: &Overrides,
    ) -> Result<(HashMap<String, Float>, Option<(String, Vec<Float>)>), BicycleError> {
        let mut par = self.parameter_set.parameters.clone();
        let mut swept: Vec<String> = Vec::new();
        let mut sweep: Option<(String, Vec<Float>)> = None;

        for (name, value) in &overrides.entries {
            if !self
                .parameter_set
                .parameter_names()
                .contains(&name.as_str())
            {
                return Err(BicycleError::UnknownParameter(name.clone()));
            }
            match value {
                OverrideValue::Scalar(value) => {
                    par.insert(name.clone(), *value);
                }
                OverrideValue::Sweep(values) => {
                    swept.push(name.clone());
                    sweep = Some((name.clone(), values.clone()));
                }
            }
        }

        if swept.len() > 1 {
            return Err(BicycleError::SweepConflict(swept));
        }

        Ok((par, sweep))
    }

    /// Runs one evaluation per sample, in the sweep vector's order. Each
    /// sample is independent of the others.
    fn evaluate<T>(
        &self,
        overrides: &Overrides,
        f: impl Fn(&BenchmarkParams) -> Result<T, BicycleError>,
    ) -> Result<ModelOutput<T>, BicycleError> {
        let (base, sweep) = self.parse_overrides(overrides)?;
        match sweep {
            None => Ok(ModelOutput::Single(f(&BenchmarkParams::from_map(&base)?)?)),
            Some((name, values)) => {
                let mut samples = Vec::with_capacity(values.len());
                for value in values {
                    let mut par = base.clone();
                    par.insert(name.clone(), value);
                    samples.push(f(&BenchmarkParams::from_map(&par)?)?);
                }
                Ok(ModelOutput::Swept(samples))
            }
        }
    }

    /// The canonical matrices (M, C1, K0, K2) for the stored parameters with
    /// the given overrides applied.
    pub fn form_reduced_canonical_matrices(
        &self,
        overrides: &Overrides,
    ) -> Result<ModelOutput<CanonicalMatrices>, BicycleError> {
        self.evaluate(overrides, |p| Ok(form_canonical(p)))
    }

    /// The state space realization (A, B). Fails if the mass matrix is
    /// singular for the given parameters.
    pub fn form_state_space_matrices(
        &self,
        overrides: &Overrides,
    ) -> Result<ModelOutput<StateSpaceMatrices>, BicycleError> {
        self.evaluate(overrides, form_state_space)
    }

    /// Eigenvalues and right eigenvectors of the state matrix A.
    pub fn calc_eigen(&self, overrides: &Overrides) -> Result<ModelOutput<Eigen>, BicycleError> {
        self.evaluate(overrides, form_eigen)
    }
}
