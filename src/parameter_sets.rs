//! Named bicycle parameterizations.
//!
//! A parameter set is a collection of named floating point constants that
//! appear in the differential equations of a bicycle model. Each concrete
//! set follows a specific published parameterization and can be converted to
//! an equivalent set by assuming the nominal upright, zero steer
//! configuration.

use std::collections::HashMap;

use na::{Matrix3, Vector3};

use crate::com::total_com;
use crate::conversions::convert_principal_to_benchmark;
use crate::errors::BicycleError;
use crate::inertia::{decompose_planar_inertia, inertia_tensor_from_components, PrincipalRadii};
use crate::types::Float;

/// Required parameter names of the Meijaard 2007 benchmark parameterization.
pub const MEIJAARD2007_PAR_NAMES: [&str; 27] = [
    "IBxx", "IBxz", "IByy", "IBzz", "IFxx", "IFyy", "IHxx", "IHxz", "IHyy", "IHzz", "IRxx",
    "IRyy", "c", "g", "lam", "mB", "mF", "mH", "mR", "rF", "rR", "v", "w", "xB", "xH", "zB",
    "zH",
];

/// Required parameter names of the Moore 2019 principal parameterization.
pub const MOORE2019_PAR_NAMES: [&str; 36] = [
    "alphaD", "alphaH", "alphaP", "c", "g", "kDaa", "kDbb", "kDyy", "kFaa", "kFyy", "kHaa",
    "kHbb", "kHyy", "kPaa", "kPbb", "kPyy", "kRaa", "kRyy", "lP", "lam", "mD", "mF", "mH",
    "mP", "mR", "rF", "rR", "v", "w", "wP", "xD", "xH", "xP", "zD", "zH", "zP",
];

/// Common surface of every parameterization: a name, the schema of required
/// parameters, the rigid bodies it describes and the validated value map.
pub trait ParameterSet {
    fn parameterization(&self) -> &'static str;
    fn parameter_names(&self) -> &'static [&'static str];
    fn body_labels(&self) -> &'static [char];
    fn parameters(&self) -> &HashMap<String, Float>;
}

/// Ensures every required name is present and maps to a finite value.
/// Fails on the first offending name in schema order.
pub(crate) fn check_parameters(
    names: &[&str],
    parameters: &HashMap<String, Float>,
) -> Result<(), BicycleError> {
    for name in names {
        match parameters.get(*name) {
            None => return Err(BicycleError::MissingParameter(name.to_string())),
            Some(value) if !value.is_finite() => {
                return Err(BicycleError::InvalidValue {
                    name: name.to_string(),
                    value: *value,
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

pub(crate) fn lookup(parameters: &HashMap<String, Float>, name: &str) -> Result<Float, BicycleError> {
    parameters
        .get(name)
        .copied()
        .ok_or_else(|| BicycleError::MissingParameter(name.to_string()))
}

fn mass_center_from(
    parameters: &HashMap<String, Float>,
    body: char,
) -> Result<Vector3<Float>, BicycleError> {
    Ok(Vector3::new(
        lookup(parameters, &format!("x{}", body))?,
        lookup(parameters, &format!("y{}", body))?,
        lookup(parameters, &format!("z{}", body))?,
    ))
}

/// Parameters the benchmark schema does not require explicitly: wheels are
/// axisymmetric, the vehicle is laterally symmetric, the rear contact sits
/// at the origin and the wheel centers sit one radius above the ground.
pub(crate) fn benchmark_derived_params(
    parameters: &HashMap<String, Float>,
) -> Result<HashMap<String, Float>, BicycleError> {
    let mut pext = HashMap::new();
    pext.insert("IFxz".to_string(), 0.0);
    pext.insert("IFzz".to_string(), lookup(parameters, "IFxx")?);
    pext.insert("IRxz".to_string(), 0.0);
    pext.insert("IRzz".to_string(), lookup(parameters, "IRxx")?);
    pext.insert("xF".to_string(), lookup(parameters, "w")?);
    pext.insert("xR".to_string(), 0.0);
    pext.insert("yB".to_string(), 0.0);
    pext.insert("yF".to_string(), 0.0);
    pext.insert("yH".to_string(), 0.0);
    pext.insert("yR".to_string(), 0.0);
    pext.insert("zF".to_string(), -lookup(parameters, "rF")?);
    pext.insert("zR".to_string(), -lookup(parameters, "rR")?);
    Ok(pext)
}

/// The four-rigid-body benchmark parameterization: frame (with or without a
/// rigid rider) B, front wheel F, handlebar/fork assembly H and rear wheel
/// R, with raw inertia tensor components per body.
#[derive(Debug, Clone)]
pub struct Meijaard2007ParameterSet {
    pub parameters: HashMap<String, Float>,
    /// True if body B is the combined rear frame and rider.
    pub includes_rider: bool,
}

impl ParameterSet for Meijaard2007ParameterSet {
    fn parameterization(&self) -> &'static str {
        "meijaard2007"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &MEIJAARD2007_PAR_NAMES
    }

    fn body_labels(&self) -> &'static [char] {
        &['B', 'F', 'H', 'R']
    }

    fn parameters(&self) -> &HashMap<String, Float> {
        &self.parameters
    }
}

impl Meijaard2007ParameterSet {
    pub fn new(
        parameters: HashMap<String, Float>,
        includes_rider: bool,
    ) -> Result<Self, BicycleError> {
        check_parameters(&MEIJAARD2007_PAR_NAMES, &parameters)?;
        Ok(Meijaard2007ParameterSet {
            parameters,
            includes_rider,
        })
    }

    fn check_body(&self, body: char) -> Result<(), BicycleError> {
        if self.body_labels().contains(&body) {
            Ok(())
        } else {
            Err(BicycleError::UnknownBody(body))
        }
    }

    /// The stored parameters extended with the derived ones, computed fresh
    /// on every call.
    pub fn with_derived(&self) -> Result<HashMap<String, Float>, BicycleError> {
        let mut par = self.parameters.clone();
        par.extend(benchmark_derived_params(&self.parameters)?);
        Ok(par)
    }

    /// The vector locating the mass center of one body.
    pub fn mass_center_vector(&self, body: char) -> Result<Vector3<Float>, BicycleError> {
        self.check_body(body)?;
        mass_center_from(&self.with_derived()?, body)
    }

    /// The vector locating the center of mass of a collection of bodies.
    pub fn mass_center_of(&self, bodies: &[char]) -> Result<Vector3<Float>, BicycleError> {
        mass_center_of_bodies(self, bodies, Self::mass_center_vector)
    }

    /// The body's inertia tensor about its mass center, expressed in the
    /// global coordinate system.
    pub fn inertia_tensor(&self, body: char) -> Result<Matrix3<Float>, BicycleError> {
        self.check_body(body)?;
        let par = self.with_derived()?;
        Ok(inertia_tensor_from_components(
            lookup(&par, &format!("I{}xx", body))?,
            lookup(&par, &format!("I{}xz", body))?,
            lookup(&par, &format!("I{}yy", body))?,
            lookup(&par, &format!("I{}zz", body))?,
        ))
    }

    /// The body's planar principal radii of gyration and the orientation of
    /// its major in-plane principal axis.
    pub fn planar_principal_radii_of_gyration(
        &self,
        body: char,
    ) -> Result<PrincipalRadii, BicycleError> {
        let tensor = self.inertia_tensor(body)?;
        let mass = lookup(&self.parameters, &format!("m{}", body))?;
        Ok(decompose_planar_inertia(&tensor, mass))
    }
}

/// The five-body principal parameterization: frame D, front wheel F,
/// handlebar/fork assembly H, person P and rear wheel R, each body described
/// by principal radii of gyration and a principal axis angle instead of raw
/// tensor components.
#[derive(Debug, Clone)]
pub struct Moore2019ParameterSet {
    pub parameters: HashMap<String, Float>,
}

impl ParameterSet for Moore2019ParameterSet {
    fn parameterization(&self) -> &'static str {
        "moore2019"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &MOORE2019_PAR_NAMES
    }

    fn body_labels(&self) -> &'static [char] {
        &['D', 'F', 'H', 'P', 'R']
    }

    fn parameters(&self) -> &HashMap<String, Float> {
        &self.parameters
    }
}

impl Moore2019ParameterSet {
    pub fn new(parameters: HashMap<String, Float>) -> Result<Self, BicycleError> {
        check_parameters(&MOORE2019_PAR_NAMES, &parameters)?;
        Ok(Moore2019ParameterSet { parameters })
    }

    fn check_body(&self, body: char) -> Result<(), BicycleError> {
        if self.body_labels().contains(&body) {
            Ok(())
        } else {
            Err(BicycleError::UnknownBody(body))
        }
    }

    /// The stored parameters extended with the derived ones: wheels are
    /// transversely symmetric with level principal axes, lateral offsets
    /// vanish and the wheel centers sit one radius above the ground.
    pub fn with_derived(&self) -> Result<HashMap<String, Float>, BicycleError> {
        let mut par = self.parameters.clone();
        par.insert("alphaF".to_string(), 0.0);
        par.insert("alphaR".to_string(), 0.0);
        par.insert("yD".to_string(), 0.0);
        par.insert("yF".to_string(), 0.0);
        par.insert("yH".to_string(), 0.0);
        par.insert("yP".to_string(), 0.0);
        par.insert("yR".to_string(), 0.0);
        par.insert("xR".to_string(), 0.0);
        par.insert("xF".to_string(), lookup(&self.parameters, "w")?);
        par.insert("zR".to_string(), -lookup(&self.parameters, "rR")?);
        par.insert("zF".to_string(), -lookup(&self.parameters, "rF")?);
        par.insert("kRbb".to_string(), lookup(&self.parameters, "kRaa")?);
        par.insert("kFbb".to_string(), lookup(&self.parameters, "kFaa")?);
        Ok(par)
    }

    /// The vector locating the mass center of one body.
    pub fn mass_center_vector(&self, body: char) -> Result<Vector3<Float>, BicycleError> {
        self.check_body(body)?;
        mass_center_from(&self.with_derived()?, body)
    }

    /// The vector locating the center of mass of a collection of bodies.
    pub fn mass_center_of(&self, bodies: &[char]) -> Result<Vector3<Float>, BicycleError> {
        mass_center_of_bodies(self, bodies, Self::mass_center_vector)
    }

    /// Converts to the equivalent benchmark parameter set, folding the
    /// person into the frame. The source set is left untouched.
    pub fn to_benchmark(&self) -> Result<Meijaard2007ParameterSet, BicycleError> {
        let benchmark = convert_principal_to_benchmark(&self.parameters)?;
        Meijaard2007ParameterSet::new(benchmark, true)
    }
}

fn mass_center_of_bodies<S: ParameterSet>(
    set: &S,
    bodies: &[char],
    mass_center_vector: impl Fn(&S, char) -> Result<Vector3<Float>, BicycleError>,
) -> Result<Vector3<Float>, BicycleError> {
    match bodies {
        [] => Err(BicycleError::EmptyBodySet),
        [body] => mass_center_vector(set, *body),
        _ => {
            let mut coordinates = Vec::with_capacity(bodies.len());
            let mut masses = Vec::with_capacity(bodies.len());
            for body in bodies {
                coordinates.push(mass_center_vector(set, *body)?);
                masses.push(lookup(set.parameters(), &format!("m{}", body))?);
            }
            let (_, com) = total_com(&coordinates, &masses);
            Ok(com)
        }
    }
}

#[cfg(test)]
mod parameter_set_tests {
    use super::*;
    use crate::assert_close;
    use crate::helpers::{benchmark_parameters, principal_parameters};

    #[test]
    fn benchmark_schema_accepts_complete_map() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        assert_eq!(set.parameterization(), "meijaard2007");
        assert_eq!(set.body_labels(), &['B', 'F', 'H', 'R']);
        assert!(set.includes_rider);
    }

    #[test]
    fn benchmark_schema_rejects_any_missing_key() {
        for name in MEIJAARD2007_PAR_NAMES {
            let mut parameters = benchmark_parameters();
            parameters.remove(name);

            let result = Meijaard2007ParameterSet::new(parameters, true);

            assert_eq!(
                result.unwrap_err(),
                BicycleError::MissingParameter(name.to_string())
            );
        }
    }

    #[test]
    fn benchmark_schema_rejects_non_finite_values() {
        let mut parameters = benchmark_parameters();
        parameters.insert("mB".to_string(), Float::NAN);

        let result = Meijaard2007ParameterSet::new(parameters, true);

        assert!(matches!(
            result.unwrap_err(),
            BicycleError::InvalidValue { name, .. } if name == "mB"
        ));
    }

    #[test]
    fn extra_keys_are_tolerated() {
        let mut parameters = benchmark_parameters();
        parameters.insert("spares".to_string(), 1.0);

        assert!(Meijaard2007ParameterSet::new(parameters, true).is_ok());
    }

    #[test]
    fn wheel_centers_sit_above_the_contact_points() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        let rear = set.mass_center_vector('R').unwrap();
        let front = set.mass_center_vector('F').unwrap();

        assert_close!(rear[0], 0.0, 1e-14);
        assert_close!(rear[2], -0.3, 1e-14);
        assert_close!(front[0], 1.02, 1e-14);
        assert_close!(front[2], -0.35, 1e-14);
    }

    #[test]
    fn single_body_com_equals_its_mass_center_vector() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        let direct = set.mass_center_vector('B').unwrap();
        let via_com = set.mass_center_of(&['B']).unwrap();

        assert_eq!(direct, via_com);
    }

    #[test]
    fn wheel_pair_com_is_mass_weighted() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        let com = set.mass_center_of(&['R', 'F']).unwrap();

        // masses 2 and 3 at (0, 0, -0.3) and (1.02, 0, -0.35)
        assert_close!(com[0], 3.0 * 1.02 / 5.0, 1e-14);
        assert_close!(com[1], 0.0, 1e-14);
        assert_close!(com[2], (2.0 * -0.3 + 3.0 * -0.35) / 5.0, 1e-14);
    }

    #[test]
    fn unknown_body_and_empty_set_are_rejected() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        assert_eq!(
            set.mass_center_vector('X').unwrap_err(),
            BicycleError::UnknownBody('X')
        );
        assert_eq!(
            set.mass_center_of(&[]).unwrap_err(),
            BicycleError::EmptyBodySet
        );
        assert_eq!(
            set.mass_center_of(&['B', 'Q']).unwrap_err(),
            BicycleError::UnknownBody('Q')
        );
        assert_eq!(
            set.inertia_tensor('Z').unwrap_err(),
            BicycleError::UnknownBody('Z')
        );
    }

    #[test]
    fn frame_inertia_tensor_is_symmetric_and_planar() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        let tensor = set.inertia_tensor('B').unwrap();

        assert_close!(tensor[(0, 0)], 9.2, 1e-14);
        assert_close!(tensor[(0, 2)], 2.4, 1e-14);
        assert_close!(tensor[(2, 0)], 2.4, 1e-14);
        assert_close!(tensor[(1, 1)], 11.0, 1e-14);
        assert_close!(tensor[(2, 2)], 2.8, 1e-14);
        assert_close!(tensor[(0, 1)], 0.0, 1e-14);
        assert_close!(tensor[(1, 2)], 0.0, 1e-14);
    }

    #[test]
    fn wheel_inertia_tensor_uses_derived_components() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        let tensor = set.inertia_tensor('R').unwrap();

        assert_close!(tensor[(0, 0)], 0.0603, 1e-14);
        assert_close!(tensor[(2, 2)], 0.0603, 1e-14);
        assert_close!(tensor[(0, 2)], 0.0, 1e-14);
        assert_close!(tensor[(1, 1)], 0.12, 1e-14);
    }

    #[test]
    fn handlebar_principal_radii_match_its_tensor() {
        let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true).unwrap();

        let radii = set.planar_principal_radii_of_gyration('H').unwrap();

        assert_close!(radii.kmax, (0.06f64 / 4.0).sqrt(), 1e-12);
        assert_close!(radii.kmin, (0.006f64 / 4.0).sqrt(), 1e-12);
        assert_close!(radii.kyy, (0.06f64 / 4.0).sqrt(), 1e-12);
    }

    #[test]
    fn principal_schema_accepts_complete_map() {
        let set = Moore2019ParameterSet::new(principal_parameters()).unwrap();

        assert_eq!(set.parameterization(), "moore2019");
        assert_eq!(set.body_labels(), &['D', 'F', 'H', 'P', 'R']);
    }

    #[test]
    fn principal_schema_rejects_any_missing_key() {
        for name in MOORE2019_PAR_NAMES {
            let mut parameters = principal_parameters();
            parameters.remove(name);

            let result = Moore2019ParameterSet::new(parameters);

            assert_eq!(
                result.unwrap_err(),
                BicycleError::MissingParameter(name.to_string())
            );
        }
    }

    #[test]
    fn principal_wheel_positions_are_derived() {
        let set = Moore2019ParameterSet::new(principal_parameters()).unwrap();

        let rear = set.mass_center_vector('R').unwrap();
        let front = set.mass_center_vector('F').unwrap();

        assert_close!(rear[0], 0.0, 1e-14);
        assert_close!(rear[2], -0.3, 1e-14);
        assert_close!(front[0], 1.02, 1e-14);
        assert_close!(front[2], -0.35, 1e-14);
    }

    #[test]
    fn conversion_validates_and_folds_the_rider() {
        let set = Moore2019ParameterSet::new(principal_parameters()).unwrap();

        let benchmark = set.to_benchmark().unwrap();

        assert!(benchmark.includes_rider);
        // frame and person fold into one body
        assert_close!(benchmark.parameters["mB"], 85.0, 1e-12);
        assert_close!(benchmark.parameters["xB"], 0.3, 1e-12);
        assert_close!(benchmark.parameters["zB"], -0.9, 1e-12);
        // the handlebar tensor is rebuilt from its principal radii
        assert_close!(benchmark.parameters["IHxx"], 0.05892, 1e-12);
        assert_close!(benchmark.parameters["IHxz"], -0.00756, 1e-12);
        assert_close!(benchmark.parameters["IHyy"], 0.06, 1e-12);
        assert_close!(benchmark.parameters["IHzz"], 0.00708, 1e-12);
        // axisymmetric wheels keep their spin and roll moments
        assert_close!(benchmark.parameters["IRxx"], 0.0603, 1e-12);
        assert_close!(benchmark.parameters["IRyy"], 0.12, 1e-12);
        assert_close!(benchmark.parameters["IFxx"], 0.1405, 1e-12);
        assert_close!(benchmark.parameters["IFyy"], 0.28, 1e-12);
        // the source set is untouched
        assert!(set.parameters.contains_key("kDaa"));
        assert!(!set.parameters.contains_key("IBxx"));
    }
}
