//! Conversion between equivalent parameterizations under the nominal
//! upright, zero steer configuration.

use std::collections::HashMap;

use itertools::izip;
use na::Vector3;

use crate::com::total_com;
use crate::errors::BicycleError;
use crate::inertia::principal_radii_to_inertia;
use crate::parameter_sets::lookup;
use crate::types::Float;

/// Central inertia components of a body shifted by (dx, dz) in the
/// symmetry plane, the planar parallel axis theorem.
fn parallel_axis(
    mass: Float,
    Ixx: Float,
    Ixz: Float,
    Iyy: Float,
    Izz: Float,
    dx: Float,
    dz: Float,
) -> (Float, Float, Float, Float) {
    (
        Ixx + mass * dz * dz,
        Ixz - mass * dx * dz,
        Iyy + mass * (dx * dx + dz * dz),
        Izz + mass * dx * dx,
    )
}

/// Converts a Moore 2019 principal parameter map into the equivalent
/// Meijaard 2007 benchmark map.
///
/// Wheel moments come straight from the wheel radii of gyration, the
/// handlebar tensor is rebuilt from its principal radii and axis angle, and
/// the frame D and person P fold into the single benchmark frame B about
/// their combined mass center. The input map is not modified.
pub fn convert_principal_to_benchmark(
    p: &HashMap<String, Float>,
) -> Result<HashMap<String, Float>, BicycleError> {
    let mut b = HashMap::new();

    // geometry and operating condition carry straight over
    for name in ["c", "g", "lam", "rF", "rR", "v", "w", "xH", "zH"] {
        b.insert(name.to_string(), lookup(p, name)?);
    }

    // axisymmetric wheels only need their roll and spin moments
    let mR = lookup(p, "mR")?;
    b.insert("mR".to_string(), mR);
    b.insert("IRxx".to_string(), mR * lookup(p, "kRaa")?.powi(2));
    b.insert("IRyy".to_string(), mR * lookup(p, "kRyy")?.powi(2));

    let mF = lookup(p, "mF")?;
    b.insert("mF".to_string(), mF);
    b.insert("IFxx".to_string(), mF * lookup(p, "kFaa")?.powi(2));
    b.insert("IFyy".to_string(), mF * lookup(p, "kFyy")?.powi(2));

    // handlebar/fork: rotate the principal moments back into the XZ frame
    let mH = lookup(p, "mH")?;
    let (IHxx, IHxz, IHyy, IHzz) = principal_radii_to_inertia(
        mH,
        lookup(p, "kHaa")?,
        lookup(p, "kHbb")?,
        lookup(p, "kHyy")?,
        lookup(p, "alphaH")?,
    );
    b.insert("mH".to_string(), mH);
    b.insert("IHxx".to_string(), IHxx);
    b.insert("IHxz".to_string(), IHxz);
    b.insert("IHyy".to_string(), IHyy);
    b.insert("IHzz".to_string(), IHzz);

    // frame and person fold into one body about their combined mass center
    let masses = [lookup(p, "mD")?, lookup(p, "mP")?];
    let coordinates = [
        Vector3::new(lookup(p, "xD")?, 0.0, lookup(p, "zD")?),
        Vector3::new(lookup(p, "xP")?, 0.0, lookup(p, "zP")?),
    ];
    let radii = [
        (lookup(p, "kDaa")?, lookup(p, "kDbb")?, lookup(p, "kDyy")?, lookup(p, "alphaD")?),
        (lookup(p, "kPaa")?, lookup(p, "kPbb")?, lookup(p, "kPyy")?, lookup(p, "alphaP")?),
    ];

    let (mB, com) = total_com(&coordinates, &masses);

    let (mut IBxx, mut IBxz, mut IByy, mut IBzz) = (0.0, 0.0, 0.0, 0.0);
    for (mass, position, (kaa, kbb, kyy, alpha)) in izip!(masses, coordinates, radii) {
        let (Ixx, Ixz, Iyy, Izz) = principal_radii_to_inertia(mass, kaa, kbb, kyy, alpha);
        let (Ixx, Ixz, Iyy, Izz) = parallel_axis(
            mass,
            Ixx,
            Ixz,
            Iyy,
            Izz,
            position[0] - com[0],
            position[2] - com[2],
        );
        IBxx += Ixx;
        IBxz += Ixz;
        IByy += Iyy;
        IBzz += Izz;
    }

    b.insert("mB".to_string(), mB);
    b.insert("xB".to_string(), com[0]);
    b.insert("zB".to_string(), com[2]);
    b.insert("IBxx".to_string(), IBxx);
    b.insert("IBxz".to_string(), IBxz);
    b.insert("IByy".to_string(), IByy);
    b.insert("IBzz".to_string(), IBzz);

    Ok(b)
}
