use core::fmt::{Display, Formatter};

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    spi::{Operation, SpiDevice},
};
mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod constants;
mod data_rate;
mod fifo;
mod init;
mod pa_level;
mod payload_length;
mod pipe;
mod power;
mod radio;
mod status;
use bit_fields::{Config, RfSetup};
pub use constants::{commands, mnemonics, registers, timing};

use super::prelude::EsbPower;
use crate::{
    log::debug,
    types::{ConfigError, MAX_PAYLOAD_LENGTH},
    StatusFlags,
};

/// A collection of error types to describe hardware malfunctions
/// and rejected parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// The radio did not respond as expected during [`init()`](fn@crate::radio::prelude::EsbInit::init).
    NotResponding,
    /// A parameter was out of range. No SPI transaction was issued.
    InvalidConfig(ConfigError),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
    /// [`RF24::poll_limit`] was reached while waiting for a TX result.
    Timeout,
}

impl<SPI, DO> From<ConfigError> for Nrf24Error<SPI, DO> {
    fn from(value: ConfigError) -> Self {
        Nrf24Error::InvalidConfig(value)
    }
}

impl<SPI, DO> Display for Nrf24Error<SPI, DO> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Nrf24Error::Spi(_) => write!(f, "SPI bus error"),
            Nrf24Error::Gpo(_) => write!(f, "CE pin error"),
            Nrf24Error::NotResponding => write!(f, "nRF24L01 hardware not responding"),
            Nrf24Error::InvalidConfig(e) => write!(f, "invalid configuration: {e}"),
            Nrf24Error::BinaryCorruption => write!(f, "corrupted data received from radio"),
            Nrf24Error::Timeout => write!(f, "timed out waiting for TX result"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<SPI, DO> defmt::Format for Nrf24Error<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(_) => defmt::write!(fmt, "SPI bus error"),
            Nrf24Error::Gpo(_) => defmt::write!(fmt, "CE pin error"),
            Nrf24Error::NotResponding => defmt::write!(fmt, "nRF24L01 hardware not responding"),
            Nrf24Error::InvalidConfig(e) => defmt::write!(fmt, "invalid configuration: {}", e),
            Nrf24Error::BinaryCorruption => {
                defmt::write!(fmt, "corrupted data received from radio")
            }
            Nrf24Error::Timeout => defmt::write!(fmt, "timed out waiting for TX result"),
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The driver exclusively owns the SPI device and the CE pin. It caches the
/// STATUS byte of every SPI transaction (see [`EsbStatus::status_flags()`](fn@crate::radio::prelude::EsbStatus::status_flags))
/// and the address of RX pipe 0. Everything else is read from the radio on demand.
pub struct RF24<SPI, DO, DELAY> {
    /// Settle time (in nanoseconds) between chip-select assertion and the
    /// first clocked byte of every SPI transaction.
    ///
    /// Defaults to [`timing::CSN_SETTLE_NS`]. When not zero, the delay is
    /// issued inside the same [`SpiDevice::transaction()`].
    pub csn_delay_ns: u32,
    /// The maximum number of STATUS polls
    /// [`EsbRadio::send()`](crate::radio::prelude::EsbRadio::send) and
    /// [`EsbRadio::resend()`](crate::radio::prelude::EsbRadio::resend)
    /// issue while waiting for a TX result.
    ///
    /// `None` (the default) waits until the radio reports a result, which is
    /// bounded only by the auto-retransmit count and delay. If the radio
    /// stops responding, an unbounded wait never returns. Set a limit to get
    /// [`Nrf24Error::Timeout`] instead.
    pub poll_limit: Option<u32>,
    _spi: SPI,
    _ce_pin: DO,
    _ce_high: bool,
    _delay_impl: DELAY,
    _buf: [u8; MAX_PAYLOAD_LENGTH + 1],
    _status: StatusFlags,
    _pipe0_rx_addr: Option<[u8; 5]>,
    _pipe0_rx_len: usize,
}

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`RF24`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// No SPI transaction is issued until
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init) is called.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> RF24<SPI, DO, DELAY> {
        RF24 {
            csn_delay_ns: timing::CSN_SETTLE_NS,
            poll_limit: None,
            _spi: spi,
            _ce_pin: ce_pin,
            _ce_high: false,
            _delay_impl: delay_impl,
            _buf: [0u8; MAX_PAYLOAD_LENGTH + 1],
            _status: StatusFlags::from_bits(0),
            _pipe0_rx_addr: None,
            _pipe0_rx_len: 0,
        }
    }

    /// Give back the SPI device, CE pin and delay implementation.
    pub fn release(self) -> (DO, SPI, DELAY) {
        (self._ce_pin, self._spi, self._delay_impl)
    }

    fn spi_transfer(&mut self, len: usize) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let buf = &mut self._buf[..len];
        let result = if self.csn_delay_ns > 0 {
            self._spi.transaction(&mut [
                Operation::DelayNs(self.csn_delay_ns),
                Operation::TransferInPlace(buf),
            ])
        } else {
            self._spi.transfer_in_place(buf)
        };
        result.map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Clock out `command` followed by `bytes`. The response (besides
    /// the STATUS byte) is discarded.
    ///
    /// With an empty `bytes` this sends a bare command:
    /// ```ignore
    /// self.spi_write(commands::NOP, &[])?;
    /// // STATUS register is now stored in self._status
    /// ```
    fn spi_write(
        &mut self,
        command: u8,
        bytes: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = bytes.len().min(MAX_PAYLOAD_LENGTH);
        self._buf[0] = command;
        self._buf[1..=len].copy_from_slice(&bytes[..len]);
        self.spi_transfer(len + 1)
    }

    fn command(&mut self, command: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write(command, &[])
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = register;
        self._buf[1] = 0;
        self.spi_transfer(2)?;
        Ok(self._buf[1])
    }

    /// Read `out.len()` bytes (at most 32) from a multi-byte register or command.
    fn read_register_bytes(
        &mut self,
        register: u8,
        out: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = out.len().min(MAX_PAYLOAD_LENGTH);
        self._buf[0] = register;
        self._buf[1..=len].fill(0);
        self.spi_transfer(len + 1)?;
        out[..len].copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write(register | commands::W_REGISTER, &[value])
    }

    fn write_register_bytes(
        &mut self,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write(register | commands::W_REGISTER, bytes)
    }

    /// Drive the CE pin.
    ///
    /// This is only needed to finish a transmission started with
    /// [`EsbRadio::write()`](crate::radio::prelude::EsbRadio::write): keep CE active for at least
    /// [`timing::TX_CE_HOLD_US`] and then deactivate it.
    /// All other operations manage the CE pin themselves.
    pub fn set_ce(&mut self, active: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let result = if active {
            self._ce_pin.set_high()
        } else {
            self._ce_pin.set_low()
        };
        result.map_err(Nrf24Error::Gpo)?;
        self._ce_high = active;
        Ok(())
    }

    /// Block after a CONFIG write that changed the radio's mode.
    ///
    /// Coming out of power down takes longer than switching between RX and TX.
    fn settle(&mut self, was_powered: bool) {
        if was_powered {
            self._delay_impl.delay_us(timing::MODE_SETTLE_US);
        } else {
            self._delay_impl.delay_us(timing::POWER_UP_SETTLE_US);
        }
    }

    fn read_config(&mut self) -> Result<Config, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(Config::from_bits(self.read_register(registers::CONFIG)?))
    }

    /// Test the Received Power Detector.
    ///
    /// Returns `true` if a signal stronger than -64 dBm was present on the
    /// current channel while in RX mode.
    pub fn rpd(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(self.read_register(registers::RPD)? & 1 == 1)
    }

    /// Transmit a constant carrier wave (a hardware test mode).
    ///
    /// Use [`EsbPaLevel::set_pa_level()`](fn@crate::radio::prelude::EsbPaLevel::set_pa_level)
    /// and [`EsbChannel::set_channel()`](fn@crate::radio::prelude::EsbChannel::set_channel)
    /// beforehand to choose the output power and frequency.
    pub fn start_carrier_wave(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.set_ce(false)?;
        // power down in TX mode; PRIM_RX must not survive the power cycle
        let config = self.read_config()?.with_power(false).with_is_rx(false);
        self.write_register(registers::CONFIG, config.into_bits())?;
        let rf_setup = RfSetup::from_bits(self.read_register(registers::RF_SETUP)?)
            .with_cont_wave(true)
            .with_pll_lock(true);
        self.write_register(registers::RF_SETUP, rf_setup.into_bits())?;
        self.set_power(true)?;
        self.set_ce(true)?;
        self._delay_impl.delay_us(timing::CARRIER_SETTLE_US);
        debug!("carrier wave started");
        Ok(())
    }

    /// Stop transmitting the constant carrier wave.
    ///
    /// This leaves the radio powered down.
    pub fn stop_carrier_wave(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.set_ce(false)?;
        self.set_power(false)?;
        let rf_setup = RfSetup::from_bits(self.read_register(registers::RF_SETUP)?)
            .with_cont_wave(false)
            .with_pll_lock(false);
        self.write_register(registers::RF_SETUP, rf_setup.into_bits())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, timing, Nrf24Error};
    use crate::{radio::prelude::EsbStatus, spi_test_expects, test::mk_radio, ConfigError};
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::{format, string::String, vec};

    #[test]
    pub fn test_rpd() {
        let spi_expectations = spi_test_expects![
            // get the RPD register value
            (vec![registers::RPD, 0u8], vec![0xEu8, 0xFFu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(radio.rpd().unwrap());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn status_cached_from_every_transaction() {
        let spi_expectations = spi_test_expects![
            (vec![registers::RPD, 0u8], vec![0x4Eu8, 0u8]),
            (vec![commands::NOP], vec![0x2Eu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(!radio.rpd().unwrap());
        assert!(radio.status_flags().rx_dr());
        radio.update().unwrap();
        let flags = radio.status_flags();
        assert!(!flags.rx_dr());
        assert!(flags.tx_ds());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn csn_settle_delay() {
        let spi_expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::delay(50),
            SpiTransaction::transfer_in_place(vec![registers::RPD, 0u8], vec![0xEu8, 1u8]),
            SpiTransaction::transaction_end(),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.csn_delay_ns = 50;
        assert!(radio.rpd().unwrap());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn start_carrier_wave() {
        let ce_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        for config in [0xCu8, 0xEu8, 0xFu8] {
            let spi_expectations = spi_test_expects![
                // power down as TX, even when the radio was listening
                (vec![registers::CONFIG, 0u8], vec![0xEu8, config]),
                (
                    vec![registers::CONFIG | commands::W_REGISTER, 0xCu8],
                    vec![0xEu8, 0u8],
                ),
                // set CONT_WAVE and PLL_LOCK in RF_SETUP
                (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x7u8]),
                (
                    vec![registers::RF_SETUP | commands::W_REGISTER, 0x97u8],
                    vec![0xEu8, 0u8],
                ),
                // set_power(true) powers up in TX mode
                (vec![registers::CONFIG, 0u8], vec![0xEu8, 0xCu8]),
                (
                    vec![registers::CONFIG | commands::W_REGISTER, 0xEu8],
                    vec![0xEu8, 0u8],
                ),
            ];
            let mocks = mk_radio(&ce_expectations, &spi_expectations);
            let (mut radio, mut spi, mut ce_pin, delays) = mocks.split();
            radio.start_carrier_wave().unwrap();
            assert_eq!(
                delays.us(),
                vec![timing::POWER_UP_SETTLE_US, timing::CARRIER_SETTLE_US]
            );
            spi.done();
            ce_pin.done();
        }
    }

    #[test]
    pub fn stop_carrier_wave() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // set_power(false)
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0xEu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xCu8],
                vec![0xEu8, 0u8],
            ),
            // clear special flags in RF_SETUP register
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x97u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x7u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.stop_carrier_wave().unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn display_errors() {
        let err: Nrf24Error<(), ()> = ConfigError::Pipe(6).into();
        assert_eq!(
            format!("{err}"),
            String::from("invalid configuration: pipe number 6 is not in range [0, 5]")
        );
        let err: Nrf24Error<(), ()> = Nrf24Error::NotResponding;
        assert_eq!(
            format!("{err}"),
            String::from("nRF24L01 hardware not responding")
        );
    }
}
