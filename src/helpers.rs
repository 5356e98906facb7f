//! Ready-made parameter maps for quickly building the models in demos and
//! tests.

use std::collections::HashMap;

use crate::types::Float;

/// Parameter values of the benchmark bicycle from the linearized bicycle
/// benchmark paper, with the rider included in the frame.
pub fn benchmark_parameters() -> HashMap<String, Float> {
    let values: [(&str, Float); 27] = [
        ("IBxx", 9.2),
        ("IBxz", 2.4),
        ("IByy", 11.0),
        ("IBzz", 2.8),
        ("IFxx", 0.1405),
        ("IFyy", 0.28),
        ("IHxx", 0.05892),
        ("IHxz", -0.00756),
        ("IHyy", 0.06),
        ("IHzz", 0.00708),
        ("IRxx", 0.0603),
        ("IRyy", 0.12),
        ("c", 0.08),
        ("g", 9.81),
        ("lam", std::f64::consts::PI / 10.0),
        ("mB", 85.0),
        ("mF", 3.0),
        ("mH", 4.0),
        ("mR", 2.0),
        ("rF", 0.35),
        ("rR", 0.3),
        ("v", 5.0),
        ("w", 1.02),
        ("xB", 0.3),
        ("xH", 0.9),
        ("zB", -0.9),
        ("zH", -0.7),
    ];
    values.iter().map(|(name, value)| (name.to_string(), *value)).collect()
}

/// A five-body principal parameterization of the benchmark machine with the
/// person split out of the frame. The wheel and handlebar radii reproduce
/// the benchmark inertia components exactly; the frame and person values
/// fold back to the benchmark masses and mass center.
pub fn principal_parameters() -> HashMap<String, Float> {
    // the planar eigenvalues of the benchmark handlebar tensor are exactly
    // 0.06 and 0.006, with the major axis at arctan(1/7) from x
    let kHaa = (0.06f64 / 4.0).sqrt();
    let kHbb = (0.006f64 / 4.0).sqrt();
    let kHyy = (0.06f64 / 4.0).sqrt();
    let alphaH = (1.0f64 / 7.0).atan();

    let values: [(&str, Float); 36] = [
        ("alphaD", 0.2),
        ("alphaH", alphaH),
        ("alphaP", -0.3),
        ("c", 0.08),
        ("g", 9.81),
        ("kDaa", 0.2),
        ("kDbb", 0.15),
        ("kDyy", 0.25),
        ("kFaa", (0.1405f64 / 3.0).sqrt()),
        ("kFyy", (0.28f64 / 3.0).sqrt()),
        ("kHaa", kHaa),
        ("kHbb", kHbb),
        ("kHyy", kHyy),
        ("kPaa", 0.15),
        ("kPbb", 0.4),
        ("kPyy", 0.4),
        ("kRaa", (0.0603f64 / 2.0).sqrt()),
        ("kRyy", (0.12f64 / 2.0).sqrt()),
        ("lP", 1.5),
        ("lam", std::f64::consts::PI / 10.0),
        ("mD", 10.0),
        ("mF", 3.0),
        ("mH", 4.0),
        ("mP", 75.0),
        ("mR", 2.0),
        ("rF", 0.35),
        ("rR", 0.3),
        ("v", 5.0),
        ("w", 1.02),
        ("wP", 0.4),
        ("xD", 0.3),
        ("xH", 0.9),
        ("xP", 0.3),
        ("zD", -0.6),
        ("zH", -0.7),
        ("zP", -0.94),
    ];
    values.iter().map(|(name, value)| (name.to_string(), *value)).collect()
}
