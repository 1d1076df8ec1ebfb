//! Unit test modules.

mod plan_generator_test;
mod pmc_test;
mod progression_test;
mod stress_units_test;
