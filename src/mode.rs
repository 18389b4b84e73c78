pub mod ap;
pub mod station;
