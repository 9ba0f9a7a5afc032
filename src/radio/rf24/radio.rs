use super::{bit_fields::FifoStatus, commands, registers, timing, Nrf24Error, RF24};
use crate::{
    log::{debug, trace, warn},
    radio::prelude::{EsbFifo, EsbPayloadLength, EsbRadio, EsbStatus},
    ConfigError, Mode, Payload, SendOutcome, StatusFlags, MAX_PAYLOAD_LENGTH,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

fn check_payload(buf: &[u8]) -> Result<(), ConfigError> {
    if buf.is_empty() || buf.len() > MAX_PAYLOAD_LENGTH {
        return Err(ConfigError::PayloadLength(buf.len()));
    }
    Ok(())
}

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Issue NOP commands until the cached STATUS byte shows `tx_ds` or `tx_df`.
    fn poll_tx_result(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let mut polls = 0u32;
        while !(self._status.tx_ds() || self._status.tx_df()) {
            if let Some(limit) = self.poll_limit {
                if polls >= limit {
                    warn!("no TX result after {} polls", polls);
                    return Err(Nrf24Error::Timeout);
                }
                polls += 1;
            }
            self.update()?;
        }
        Ok(())
    }

    /// Wait for the result of a transmission that was just triggered.
    ///
    /// An ACK payload is drained from the RX FIFO. All flags except
    /// `rx_dr` are cleared before returning.
    fn finish_tx(&mut self) -> Result<SendOutcome, Nrf24Error<SPI::Error, DO::Error>> {
        self.poll_tx_result()?;
        let mut outcome = if self._status.tx_ds() {
            SendOutcome::Sent
        } else {
            SendOutcome::Failed
        };
        if self._status.rx_dr() && self._status.tx_ds() {
            if let Some(ack) = self.receive()? {
                debug!("received ACK payload of {} bytes", ack.len());
                outcome = SendOutcome::Ack(ack);
            }
        }
        self.clear_status_flags(StatusFlags::new().with_rx_dr(false))?;
        trace!("TX outcome: {}", outcome);
        Ok(outcome)
    }
}

impl<SPI, DO, DELAY> EsbRadio for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// [`Mode::Transmit`] is reported while the CE pin is active in TX
    /// mode, even if the TX FIFO has already been sent.
    fn mode(&mut self) -> Result<Mode, Self::RadioErrorType> {
        let config = self.read_config()?;
        Ok(if !config.power() {
            Mode::PowerDown
        } else if !self._ce_high {
            Mode::Standby
        } else if config.is_rx() {
            Mode::Receive
        } else {
            Mode::Transmit
        })
    }

    fn set_listening(&mut self, enable: bool) -> Result<(), Self::RadioErrorType> {
        let config = self.read_config()?;
        if config.is_listening() == enable {
            return Ok(());
        }
        if enable {
            self.set_ce(false)?;
            if let Some(address) = self._pipe0_rx_addr {
                self.write_register_bytes(
                    registers::RX_ADDR_P0,
                    &address[..self._pipe0_rx_len],
                )?;
            }
            self.write_register(
                registers::CONFIG,
                config.with_power(true).with_is_rx(true).into_bits(),
            )?;
            self.settle(config.power());
            self.flush_rx()?;
            self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;
            self.set_ce(true)?;
            self._delay_impl.delay_us(timing::RX_CE_PULSE_US);
            self._delay_impl.delay_us(timing::MODE_SETTLE_US);
            debug!("entered RX mode");
        } else {
            self.write_register(registers::CONFIG, config.with_is_rx(false).into_bits())?;
            self.set_ce(false)?;
            self._delay_impl.delay_us(timing::MODE_SETTLE_US);
            debug!("left RX mode");
        }
        Ok(())
    }

    fn is_listening(&mut self) -> Result<bool, Self::RadioErrorType> {
        Ok(self.read_config()?.is_listening())
    }

    fn write(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<(), Self::RadioErrorType> {
        check_payload(buf)?;
        self.clear_status_flags(StatusFlags::new())?;
        let config = self.read_config()?;
        if !config.is_standby_tx() {
            self.write_register(
                registers::CONFIG,
                config.with_power(true).with_is_rx(false).into_bits(),
            )?;
            self.settle(config.power());
        }
        let command = if ask_no_ack {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        if self.get_dynamic_payloads()? {
            self.spi_write(command, buf)?;
        } else {
            // pad or truncate to the static payload length
            let width = (self.get_payload_length()? as usize).min(MAX_PAYLOAD_LENGTH);
            let len = buf.len().min(width);
            let mut padded = [0u8; MAX_PAYLOAD_LENGTH];
            padded[..len].copy_from_slice(&buf[..len]);
            self.spi_write(command, &padded[..width])?;
        }
        self.set_ce(true)
    }

    /// This function calls [`RF24::flush_tx()`] upon entry and leaves the
    /// CE pin inactive upon exit.
    ///
    /// The RX FIFO is also flushed if it holds a payload, so that a stale
    /// payload is not mistaken for an ACK payload.
    fn send(
        &mut self,
        buf: &[u8],
        ask_no_ack: bool,
        force_retry: u8,
    ) -> Result<SendOutcome, Self::RadioErrorType> {
        check_payload(buf)?;
        self.set_ce(false)?;
        self.flush_tx()?;
        if self._status.pipe().is_some() {
            self.flush_rx()?;
        }
        self.write(buf, ask_no_ack)?;
        self._delay_impl.delay_us(timing::TX_CE_HOLD_US);
        self.set_ce(false)?;
        let mut outcome = self.finish_tx()?;
        for _ in 0..force_retry {
            if outcome.is_success() {
                break;
            }
            debug!("TX failed; forcing a retry");
            outcome = self.resend()?;
        }
        Ok(outcome)
    }

    fn send_all(
        &mut self,
        payloads: &[&[u8]],
        ask_no_ack: bool,
        force_retry: u8,
        outcomes: &mut [SendOutcome],
    ) -> Result<usize, Self::RadioErrorType> {
        if outcomes.len() < payloads.len() {
            return Err(ConfigError::Outcomes(outcomes.len()).into());
        }
        for buf in payloads {
            check_payload(buf)?;
        }
        for (buf, outcome) in payloads.iter().zip(outcomes.iter_mut()) {
            *outcome = self.send(buf, ask_no_ack, force_retry)?;
        }
        Ok(payloads.len())
    }

    fn resend(&mut self) -> Result<SendOutcome, Self::RadioErrorType> {
        let fifo = FifoStatus::from_bits(self.read_register(registers::FIFO_STATUS)?);
        if fifo.tx_empty() {
            return Ok(SendOutcome::Failed);
        }
        if self._status.pipe().is_some() {
            self.flush_rx()?;
        }
        self.clear_status_flags(StatusFlags::new())?;
        self.command(commands::REUSE_TX_PL)?;
        self.set_ce(false)?;
        self.set_ce(true)?;
        self._delay_impl.delay_us(timing::TX_CE_HOLD_US);
        self.set_ce(false)?;
        self.finish_tx()
    }

    fn receive(&mut self) -> Result<Option<Payload>, Self::RadioErrorType> {
        let (_, size) = self.available()?;
        if size == 0 {
            return Ok(None);
        }
        let mut payload = Payload::default();
        self.read_register_bytes(commands::R_RX_PAYLOAD, payload.buf_mut(size))?;
        self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;
        Ok(Some(payload))
    }
}
