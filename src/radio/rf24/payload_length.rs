use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbPayloadLength, Nrf24Error, RF24},
    ConfigError, MAX_PAYLOAD_LENGTH,
};

use super::{bit_fields::Feature, mnemonics, registers};

impl<SPI, DO, DELAY> EsbPayloadLength for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PayloadLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_payload_length(&mut self, length: u8) -> Result<(), Self::PayloadLengthErrorType> {
        if length == 0 || length as usize > MAX_PAYLOAD_LENGTH {
            return Err(ConfigError::PayloadLength(length as usize).into());
        }
        for pipe in 0..6 {
            self.write_register(registers::RX_PW_P0 + pipe, length)?;
        }
        Ok(())
    }

    fn get_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType> {
        self.read_register(registers::RX_PW_P0)
    }

    fn set_dynamic_payloads(&mut self, enable: bool) -> Result<(), Self::PayloadLengthErrorType> {
        let feature = Feature::from_bits(self.read_register(registers::FEATURE)?)
            .with_dynamic_payloads(enable);
        self.write_register(registers::FEATURE, feature.into_bits())?;
        self.write_register(
            registers::DYNPD,
            if enable { mnemonics::ALL_PIPES } else { 0 },
        )
    }

    fn get_dynamic_payloads(&mut self) -> Result<bool, Self::PayloadLengthErrorType> {
        let dynpd = self.read_register(registers::DYNPD)?;
        if dynpd == 0 {
            return Ok(false);
        }
        Ok(Feature::from_bits(self.read_register(registers::FEATURE)?).dynamic_payloads())
    }
}
