use super::registers;
use crate::{
    radio::{prelude::EsbChannel, Nrf24Error, RF24},
    ConfigError,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> EsbChannel for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The nRF24L01 support 126 channels. A `channel` outside the
    /// range [0, 125] is rejected with [`ConfigError::Channel`].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        if channel > 125 {
            return Err(ConfigError::Channel(channel).into());
        }
        self.write_register(registers::RF_CH, channel)
    }

    /// See also [`RF24::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        self.read_register(registers::RF_CH)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbChannel};
    use crate::{
        radio::{rf24::commands, Nrf24Error},
        spi_test_expects,
        test::mk_radio,
        ConfigError,
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::{vec, vec::Vec};

    #[test]
    pub fn channel_round_trip() {
        let mut spi_expectations = Vec::new();
        for channel in 0..=125u8 {
            spi_expectations.extend(spi_test_expects![
                (
                    vec![registers::RF_CH | commands::W_REGISTER, channel],
                    vec![0xEu8, 0u8],
                ),
                (vec![registers::RF_CH, 0u8], vec![0xEu8, channel]),
            ]);
        }
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        for channel in 0..=125u8 {
            radio.set_channel(channel).unwrap();
            assert_eq!(radio.get_channel().unwrap(), channel);
        }
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn channel_out_of_range() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        for channel in [126u8, 200, 255] {
            assert_eq!(
                radio.set_channel(channel),
                Err(Nrf24Error::InvalidConfig(ConfigError::Channel(channel)))
            );
        }
        spi.done();
        ce_pin.done();
    }
}
