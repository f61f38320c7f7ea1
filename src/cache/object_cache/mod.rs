pub mod moka;
pub mod noop;
