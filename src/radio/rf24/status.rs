use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbStatus, Nrf24Error, RF24},
    types::StatusFlags,
};

use super::{bit_fields::Config, commands, registers};

impl<SPI, DO, DELAY> EsbStatus for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn status_flags(&self) -> StatusFlags {
        self._status
    }

    fn configure_interrupts(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        let config = self.read_register(registers::CONFIG)?;
        // a set mask bit hides the event from the IRQ pin
        let config = Config::from_bits(
            config & !StatusFlags::IRQ_MASK | (!flags.into_bits() & StatusFlags::IRQ_MASK),
        );
        self.write_register(registers::CONFIG, config.into_bits())
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_register(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.command(commands::NOP)
    }
}
