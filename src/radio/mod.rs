//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod rf24;
pub use rf24::{commands, mnemonics, registers, timing, Nrf24Error, RF24};
