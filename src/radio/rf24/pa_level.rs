use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::RfSetup, registers};
use crate::radio::{prelude::EsbPaLevel, Nrf24Error, RF24};
use crate::PaLevel;

impl<SPI, DO, DELAY> EsbPaLevel for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PaLevelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType> {
        Ok(RfSetup::from_bits(self.read_register(registers::RF_SETUP)?).pa_level())
    }

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType> {
        let rf_setup =
            RfSetup::from_bits(self.read_register(registers::RF_SETUP)?).with_pa_level(pa_level);
        self.write_register(registers::RF_SETUP, rf_setup.into_bits())
    }
}
