use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbPipe, Nrf24Error, RF24},
    ConfigError,
};

use super::{bit_fields::SetupRetry, registers};

/// Addresses are 1 to 5 bytes long. Anything else is rejected before touching the bus.
fn check_address(address: &[u8]) -> Result<(), ConfigError> {
    if address.is_empty() || address.len() > 5 {
        return Err(ConfigError::Address(address.len()));
    }
    Ok(())
}

impl<SPI, DO, DELAY> EsbPipe for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if pipe > 5 {
            return Err(ConfigError::Pipe(pipe).into());
        }
        check_address(address)?;

        if pipe < 2 {
            // open_tx_pipe() may overwrite the pipe 0 address,
            // so set_listening() has to restore it.
            if pipe == 0 {
                let mut cached_addr = [0u8; 5];
                cached_addr[..address.len()].copy_from_slice(address);
                self._pipe0_rx_addr = Some(cached_addr);
                self._pipe0_rx_len = address.len();
            }
            self.write_register_bytes(registers::RX_ADDR_P0 + pipe, address)?;
        }
        // pipes 2-5 only store the first byte
        else {
            self.write_register(registers::RX_ADDR_P0 + pipe, address[0])?;
        }

        let open_pipes = self.read_register(registers::EN_RXADDR)?;
        self.write_register(registers::EN_RXADDR, open_pipes | (1 << pipe))
    }

    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        check_address(address)?;
        let retry = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        if retry.arc() != 0 {
            // ACK packets are received on pipe 0
            self.write_register_bytes(registers::RX_ADDR_P0, address)?;
            let open_pipes = self.read_register(registers::EN_RXADDR)?;
            self.write_register(registers::EN_RXADDR, open_pipes | 1)?;
        }
        self.write_register_bytes(registers::TX_ADDR, address)
    }

    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        if pipe > 5 {
            return Err(ConfigError::Pipe(pipe).into());
        }
        let open_pipes = self.read_register(registers::EN_RXADDR)?;
        if open_pipes & (1 << pipe) != 0 {
            self.write_register(registers::EN_RXADDR, open_pipes & !(1 << pipe))?;
        }
        Ok(())
    }

    fn set_address_length(&mut self, length: u8) -> Result<(), Self::PipeErrorType> {
        if !(3..=5).contains(&length) {
            return Err(ConfigError::AddressLength(length).into());
        }
        self.write_register(registers::SETUP_AW, length - 2)
    }

    fn get_address_length(&mut self) -> Result<u8, Self::PipeErrorType> {
        Ok((self.read_register(registers::SETUP_AW)? & 3) + 2)
    }
}
