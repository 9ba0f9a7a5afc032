#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`RF24::new()`](fn@crate::radio::RF24::new)
//! - [`RF24::init()`](radio/struct.RF24.html#method.init)
//! - [`RF24::set_power()`](radio/struct.RF24.html#method.set_power)
//! - [`RF24::set_listening()`](radio/struct.RF24.html#method.set_listening)
//! - [`RF24::open_tx_pipe()`](radio/struct.RF24.html#method.open_tx_pipe)
//! - [`RF24::open_rx_pipe()`](radio/struct.RF24.html#method.open_rx_pipe)
//! - [`RF24::close_rx_pipe()`](radio/struct.RF24.html#method.close_rx_pipe)
//! - [`RF24::available()`](radio/struct.RF24.html#method.available)
//! - [`RF24::receive()`](radio/struct.RF24.html#method.receive)
//! - [`RF24::send()`](radio/struct.RF24.html#method.send)
//! - [`RF24::send_all()`](radio/struct.RF24.html#method.send_all)
//! - [`RF24::resend()`](radio/struct.RF24.html#method.resend)
//! - [`RF24::set_channel()`](radio/struct.RF24.html#method.set_channel)
//! - [`RF24::get_channel()`](radio/struct.RF24.html#method.get_channel)
//!
//! ## Advanced API
//!
//! - [`RF24::load_ack_payload()`](radio/struct.RF24.html#method.load_ack_payload)
//! - [`RF24::write()`](radio/struct.RF24.html#method.write)
//! - [`RF24::set_ce()`](fn@crate::radio::RF24::set_ce)
//! - [`RF24::mode()`](radio/struct.RF24.html#method.mode)
//! - [`RF24::get_fifo_state()`](radio/struct.RF24.html#method.get_fifo_state)
//! - [`RF24::clear_status_flags()`](radio/struct.RF24.html#method.clear_status_flags)
//! - [`RF24::update()`](radio/struct.RF24.html#method.update)
//! - [`RF24::status_flags()`](radio/struct.RF24.html#method.status_flags)
//! - [`RF24::flush_rx()`](radio/struct.RF24.html#method.flush_rx)
//! - [`RF24::flush_tx()`](radio/struct.RF24.html#method.flush_tx)
//! - [`RF24::start_carrier_wave()`](fn@crate::radio::RF24::start_carrier_wave)
//! - [`RF24::stop_carrier_wave()`](fn@crate::radio::RF24::stop_carrier_wave)
//! - [`RF24::rpd()`](fn@crate::radio::RF24::rpd)
//!
//! ## Configuration API
//!
//! - [`RF24::configure_interrupts()`](radio/struct.RF24.html#method.configure_interrupts)
//! - [`RF24::set_ack()`](radio/struct.RF24.html#method.set_ack)
//! - [`RF24::set_retry_count()`](radio/struct.RF24.html#method.set_retry_count)
//! - [`RF24::set_retry_delay()`](radio/struct.RF24.html#method.set_retry_delay)
//! - [`RF24::set_dynamic_payloads()`](radio/struct.RF24.html#method.set_dynamic_payloads)
//! - [`RF24::set_address_length()`](radio/struct.RF24.html#method.set_address_length)
//! - [`RF24::set_payload_length()`](radio/struct.RF24.html#method.set_payload_length)
//! - [`RF24::set_data_rate()`](radio/struct.RF24.html#method.set_data_rate)
//! - [`RF24::set_pa_level()`](radio/struct.RF24.html#method.set_pa_level)
//! - [`RF24::is_powered()`](radio/struct.RF24.html#method.is_powered)
//! - [`RF24::csn_delay_ns`](radio/struct.RF24.html#structfield.csn_delay_ns)
//! - [`RF24::poll_limit`](radio/struct.RF24.html#structfield.poll_limit)
//!
#![no_std]

mod log;
mod types;
pub use types::{
    ConfigError, DataRate, FifoState, Mode, PaLevel, Payload, SendOutcome, StatusFlags,
    MAX_PAYLOAD_LENGTH,
};
pub mod radio;

#[cfg(test)]
mod test {
    extern crate std;
    use crate::radio::RF24;
    use embedded_hal::delay::DelayNs;
    use embedded_hal_mock::eh1::{
        digital::{Mock as PinMock, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };
    use std::{cell::RefCell, rc::Rc, vec::Vec};

    /// Takes an indefinite repetition of a tuple of 2 vectors: `(expected_data, response_data)`
    /// and generates an array of `SpiTransaction`s.
    ///
    /// NOTE: This macro is only used to generate code in unit tests (for this crate only).
    #[macro_export]
    macro_rules! spi_test_expects {
        ($( ($expected:expr , $response:expr $(,)? ) , ) + ) => {
            [
                $(
                    SpiTransaction::transaction_start(),
                    SpiTransaction::transfer_in_place($expected, $response),
                    SpiTransaction::transaction_end(),
                )*
            ]
        }
    }

    /// A [`DelayNs`] implementation that records every requested delay.
    #[derive(Clone, Default)]
    pub struct DelayLog(Rc<RefCell<Vec<u32>>>);

    impl DelayLog {
        /// All recorded delays in microseconds.
        pub fn us(&self) -> Vec<u32> {
            self.0.borrow().iter().map(|ns| ns / 1000).collect()
        }
    }

    impl DelayNs for DelayLog {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(ns);
        }
    }

    /// A tuple struct to encapsulate objects used to mock [`RF24`],
    pub struct MockRadio(
        pub RF24<SpiMock<u8>, PinMock, DelayLog>,
        pub SpiMock<u8>,
        pub PinMock,
        pub DelayLog,
    );

    impl MockRadio {
        pub fn split(self) -> (RF24<SpiMock<u8>, PinMock, DelayLog>, SpiMock<u8>, PinMock, DelayLog) {
            (self.0, self.1, self.2, self.3)
        }
    }

    /// Create a mock objects using the given expectations.
    pub fn mk_radio(
        ce_expectations: &[PinTransaction],
        spi_expectations: &[SpiTransaction<u8>],
    ) -> MockRadio {
        let spi = SpiMock::new(spi_expectations);
        let ce_pin = PinMock::new(ce_expectations);
        let delays = DelayLog::default();
        let radio = RF24::new(ce_pin.clone(), spi.clone(), delays.clone());
        MockRadio(radio, spi, ce_pin, delays)
    }
}
