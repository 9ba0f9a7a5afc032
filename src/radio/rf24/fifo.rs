use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbFifo, Nrf24Error, RF24};
use crate::{log::warn, FifoState, MAX_PAYLOAD_LENGTH};

use super::{
    bit_fields::{Feature, FifoStatus},
    commands, registers,
};

impl<SPI, DO, DELAY> EsbFifo for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The pipe number is taken from the STATUS byte clocked out while
    /// reading the FEATURE register.
    ///
    /// If the radio reports a dynamic payload length greater than 32, the
    /// RX FIFO is flushed and [`Nrf24Error::BinaryCorruption`] is returned.
    fn available(&mut self) -> Result<(Option<u8>, u8), Self::FifoErrorType> {
        let feature = Feature::from_bits(self.read_register(registers::FEATURE)?);
        let Some(pipe) = self._status.pipe() else {
            return Ok((None, 0));
        };
        let size = if feature.dynamic_payloads() {
            let size = self.read_register(commands::R_RX_PL_WID)?;
            if size as usize > MAX_PAYLOAD_LENGTH {
                warn!("discarding RX FIFO: payload width {} is corrupt", size);
                self.flush_rx()?;
                return Err(Nrf24Error::BinaryCorruption);
            }
            size
        } else {
            self.read_register(registers::RX_PW_P0 + pipe)?
        };
        Ok((Some(pipe), size))
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_RX)
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_TX)
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo = FifoStatus::from_bits(self.read_register(registers::FIFO_STATUS)?);
        let (full, empty) = if about_tx {
            (fifo.tx_full(), fifo.tx_empty())
        } else {
            (fifo.rx_full(), fifo.rx_empty())
        };
        Ok(match (full, empty) {
            (true, _) => FifoState::Full,
            (_, true) => FifoState::Empty,
            _ => FifoState::Occupied,
        })
    }
}
