use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    log::debug,
    radio::{prelude::EsbPower, Nrf24Error, RF24},
};

use super::{registers, timing};

impl<SPI, DO, DELAY> EsbPower for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// After a transition, this blocks for [`timing::POWER_UP_SETTLE_US`]
    /// before returning.
    fn set_power(&mut self, enable: bool) -> Result<(), Self::PowerErrorType> {
        let config = self.read_config()?;
        if config.power() == enable {
            return Ok(());
        }
        self.write_register(registers::CONFIG, config.with_power(enable).into_bits())?;
        self._delay_impl.delay_us(timing::POWER_UP_SETTLE_US);
        debug!("radio powered {}", if enable { "up" } else { "down" });
        Ok(())
    }

    fn is_powered(&mut self) -> Result<bool, Self::PowerErrorType> {
        Ok(self.read_config()?.power())
    }
}
