//! Exchange wiring.

pub mod factory;

pub use factory::ExchangeFactory;
