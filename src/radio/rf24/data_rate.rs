use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::RfSetup, registers};
use crate::radio::{prelude::EsbDataRate, Nrf24Error, RF24};
use crate::DataRate;

impl<SPI, DO, DELAY> EsbDataRate for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DataRateErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Both data rate bits set is a reserved combination and
    /// yields [`Nrf24Error::BinaryCorruption`].
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType> {
        let rf_setup = self.read_register(registers::RF_SETUP)?;
        if rf_setup & DataRate::MASK == DataRate::MASK {
            return Err(Nrf24Error::BinaryCorruption);
        }
        Ok(RfSetup::from_bits(rf_setup).data_rate())
    }

    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType> {
        let rf_setup =
            RfSetup::from_bits(self.read_register(registers::RF_SETUP)?).with_data_rate(data_rate);
        self.write_register(registers::RF_SETUP, rf_setup.into_bits())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use crate::radio::prelude::EsbDataRate;
    use crate::radio::rf24::commands;
    use crate::{radio::Nrf24Error, spi_test_expects, test::mk_radio, DataRate};

    use super::registers;
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn get_data_rate() {
        let spi_expectations = spi_test_expects![
            // get the RF_SETUP register value for each possible result
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0u8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 8u8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x20u8]),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x28u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_data_rate(), Ok(DataRate::Mbps1));
        assert_eq!(radio.get_data_rate(), Ok(DataRate::Mbps2));
        assert_eq!(radio.get_data_rate(), Ok(DataRate::Kbps250));
        assert_eq!(radio.get_data_rate(), Err(Nrf24Error::BinaryCorruption));
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn set_data_rate() {
        let spi_expectations = spi_test_expects![
            // set the RF_SETUP register value for each possible enumeration of DataRate
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x28u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x7u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0xFu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0xFu8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x27u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_data_rate(DataRate::Mbps1).unwrap();
        radio.set_data_rate(DataRate::Mbps2).unwrap();
        radio.set_data_rate(DataRate::Kbps250).unwrap();
        spi.done();
        ce_pin.done();
    }
}
