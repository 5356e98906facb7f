#![allow(non_snake_case)]

pub extern crate nalgebra as na;

pub mod com;
pub mod conversions;
pub mod errors;
pub mod helpers;
pub mod inertia;
pub mod models;
pub mod parameter_sets;
pub mod types;
pub mod util;
