use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    log::debug,
    radio::{prelude::EsbAutoAck, Nrf24Error, RF24},
    ConfigError, MAX_PAYLOAD_LENGTH,
};

use super::{
    bit_fields::{Feature, SetupRetry},
    commands, mnemonics, registers,
};

impl<SPI, DO, DELAY> EsbAutoAck for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoAckErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Disabling ACK payloads leaves auto-ack and dynamic payloads as they are.
    fn set_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        let mut feature = Feature::from_bits(self.read_register(registers::FEATURE)?);
        if enable {
            self.write_register(registers::EN_AA, mnemonics::ALL_PIPES)?;
            self.write_register(registers::DYNPD, mnemonics::ALL_PIPES)?;
            feature.set_dynamic_payloads(true);
        }
        feature.set_ack_payloads(enable);
        self.write_register(registers::FEATURE, feature.into_bits())
    }

    fn get_ack(&mut self) -> Result<bool, Self::AutoAckErrorType> {
        let feature = Feature::from_bits(self.read_register(registers::FEATURE)?);
        if !(feature.ack_payloads() && feature.dynamic_payloads()) {
            return Ok(false);
        }
        let en_aa = self.read_register(registers::EN_AA)?;
        Ok(en_aa & self.read_register(registers::DYNPD)? != 0)
    }

    fn load_ack_payload(&mut self, buf: &[u8], pipe: u8) -> Result<bool, Self::AutoAckErrorType> {
        if buf.is_empty() || buf.len() > MAX_PAYLOAD_LENGTH {
            return Err(ConfigError::PayloadLength(buf.len()).into());
        }
        if pipe > 5 {
            return Ok(false);
        }
        if !Feature::from_bits(self.read_register(registers::FEATURE)?).ack_payloads() {
            self.set_ack(true)?;
        }
        if self._status.tx_full() {
            debug!("TX FIFO is full; ACK payload for pipe {} dropped", pipe);
            return Ok(false);
        }
        self.spi_write(commands::W_ACK_PAYLOAD | pipe, buf)?;
        Ok(true)
    }

    fn set_retry_count(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType> {
        if count > 15 {
            return Err(ConfigError::RetryCount(count).into());
        }
        let retry = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        self.write_register(registers::SETUP_RETR, retry.with_arc(count).into_bits())
    }

    fn get_retry_count(&mut self) -> Result<u8, Self::AutoAckErrorType> {
        Ok(SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?).arc())
    }

    fn set_retry_delay(&mut self, delay: u16) -> Result<(), Self::AutoAckErrorType> {
        if !(250..=4000).contains(&delay) {
            return Err(ConfigError::RetryDelay(delay).into());
        }
        let retry = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        self.write_register(registers::SETUP_RETR, retry.with_delay_us(delay).into_bits())
    }

    fn get_retry_delay(&mut self) -> Result<u16, Self::AutoAckErrorType> {
        Ok(SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?).delay_us())
    }
}
