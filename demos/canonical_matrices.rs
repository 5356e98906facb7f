use bicycle_dynamics::helpers::benchmark_parameters;
use bicycle_dynamics::models::{Meijaard2007Model, Overrides};
use bicycle_dynamics::parameter_sets::Meijaard2007ParameterSet;

fn main() {
    let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true)
        .expect("benchmark parameters are complete");
    let model = Meijaard2007Model::new(set);

    let canonical = model
        .form_reduced_canonical_matrices(&Overrides::new())
        .expect("no overrides, nothing to conflict")
        .into_single()
        .expect("unswept call yields one sample");

    println!("M ={}", canonical.M);
    println!("C1 ={}", canonical.C1);
    println!("K0 ={}", canonical.K0);
    println!("K2 ={}", canonical.K2);

    let realization = model
        .form_state_space_matrices(&Overrides::new())
        .expect("benchmark mass matrix is invertible")
        .into_single()
        .expect("unswept call yields one sample");

    println!("A ={}", realization.A);
    println!("B ={}", realization.B);
}
