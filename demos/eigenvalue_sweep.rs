use bicycle_dynamics::helpers::benchmark_parameters;
use bicycle_dynamics::models::{Meijaard2007Model, Overrides};
use bicycle_dynamics::parameter_sets::Meijaard2007ParameterSet;

fn main() {
    let set = Meijaard2007ParameterSet::new(benchmark_parameters(), true)
        .expect("benchmark parameters are complete");
    let model = Meijaard2007Model::new(set);

    let speeds: Vec<f64> = (0..=100).map(|i| i as f64 * 0.1).collect();
    let eigen = model
        .calc_eigen(&Overrides::new().sweep("v", speeds.clone()))
        .expect("a single sweep is allowed")
        .into_vec();

    println!("{:>6} {:>12} {:>12}", "v", "max Re", "max |Im|");
    let mut stable_from = None;
    let mut stable_to = None;
    for (speed, sample) in speeds.iter().zip(&eigen) {
        let max_real = sample
            .values
            .iter()
            .map(|value| value.re)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_imag = sample
            .values
            .iter()
            .map(|value| value.im.abs())
            .fold(0.0, f64::max);
        println!("{:6.2} {:12.6} {:12.6}", speed, max_real, max_imag);

        if max_real < 0.0 {
            stable_from.get_or_insert(*speed);
            stable_to = Some(*speed);
        }
    }

    match (stable_from, stable_to) {
        (Some(low), Some(high)) => {
            println!("self-stable between {:.2} and {:.2} m/s", low, high)
        }
        _ => println!("no self-stable speed found in the swept range"),
    }
}
