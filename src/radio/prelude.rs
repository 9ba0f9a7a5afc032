//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use rf24_lite::radio::prelude::*;
//! ```

use crate::types::{DataRate, FifoState, Mode, PaLevel, Payload, SendOutcome, StatusFlags};

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
pub trait EsbPipe {
    type PipeErrorType;

    /// Open a specified `pipe` for receiving data when radio is in RX mode.
    ///
    /// Up to 6 pipes can be open for reading at once. Open all the required
    /// reading pipes, and then call [`EsbRadio::set_listening()`].
    ///
    /// ### About pipe addresses
    /// Pipes 0 and 1 store a full address. Pipes 2-5 only store the first
    /// byte of the given `address`, borrowing the remaining bytes from pipe 1.
    ///
    /// Pipes 1-5 should share the same address, except the first byte.
    /// ```ignore
    /// let a = ["Prime", "2Node", "3xxxx", "4xxxx"];
    /// radio.open_rx_pipe(0, a[0].as_bytes()).unwrap(); // address used is "Prime"
    /// radio.open_rx_pipe(1, a[1].as_bytes()).unwrap(); // address used is "2Node"
    /// radio.open_rx_pipe(2, a[2].as_bytes()).unwrap(); // address used is "3Node"
    /// radio.open_rx_pipe(3, a[3].as_bytes()).unwrap(); // address used is "4Node"
    /// ```
    ///
    /// <div class="warning">
    ///
    /// The address given to pipe 0 is cached and restored by every call to
    /// [`EsbRadio::set_listening()`] that enters RX mode, because
    /// [`EsbPipe::open_tx_pipe()`] borrows pipe 0 to receive ACK packets.
    ///
    /// </div>
    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the address used when transmitting.
    ///
    /// If the auto-retransmit count is not zero, the same address is written
    /// to pipe 0 (and pipe 0 is opened) so ACK packets reach this radio.
    fn open_tx_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Close a specified pipe from receiving data when radio is in RX mode.
    ///
    /// Closing a pipe that is not open does nothing.
    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType>;

    /// Set the address length (applies to all pipes) in range [3, 5].
    fn set_address_length(&mut self, length: u8) -> Result<(), Self::PipeErrorType>;

    /// Get the currently configured address length (applied to all pipes).
    fn get_address_length(&mut self) -> Result<u8, Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel in range [0, 125].
    ///
    /// These channels translate to the RF frequency as an offset of MHz from 2400 MHz.
    /// The default channel is 76 (2400 + 76 = 2.476 GHz).
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] state that was cached from the latest SPI transaction.
    fn status_flags(&self) -> StatusFlags;

    /// Configure which status flags trigger the radio's IRQ pin.
    ///
    /// Set any member of [`StatusFlags`] to `false` to have the
    /// IRQ pin ignore the corresponding event.
    fn configure_interrupts(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Clear the radio's IRQ status flags.
    ///
    /// Flags never clear by themselves; this needs to be done after the
    /// event has been handled.
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding
    /// interrupt event. Members set to `false` are left untouched.
    /// Use [`StatusFlags::new()`] to clear all events.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the cached status byte with a NOP command.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Describe the payload at the top of the RX FIFO.
    ///
    /// Returns the pipe number that received it and its length in bytes,
    /// or `(None, 0)` when the RX FIFO is empty.
    fn available(&mut self) -> Result<(Option<u8>, u8), Self::FifoErrorType>;

    /// Discard all 3 levels of the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard all 3 levels of the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;
}

/// A trait to represent manipulation of the power state
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power the radio up (into standby) or down.
    ///
    /// Nothing happens if the radio already is in the requested state.
    /// Otherwise this blocks for the power-up settle time.
    fn set_power(&mut self, enable: bool) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&mut self) -> Result<bool, Self::PowerErrorType>;
}

/// A trait to represent manipulation of data rate
/// for an ESB capable transceiver.
pub trait EsbDataRate {
    type DataRateErrorType;

    /// Set the radio's data rate. The default is 1 Mbps.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;

    /// Get the radio's configured data rate.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;
}

/// A trait to represent manipulation of the Power Amplifier level
/// for an ESB capable transceiver.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    /// Set the radio's Power Amplifier level. The default is 0 dBm.
    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType>;

    /// Get the radio's configured Power Amplifier level.
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;
}

/// A trait to represent manipulation of payload lengths
/// for an ESB capable transceiver.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the static payload length (in range [1, 32]) used by all pipes.
    ///
    /// This is ignored while dynamic payloads are enabled.
    fn set_payload_length(&mut self, length: u8) -> Result<(), Self::PayloadLengthErrorType>;

    /// Get the static payload length used by pipe 0.
    fn get_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType>;

    /// Enable or disable dynamically sized payloads on all pipes.
    fn set_dynamic_payloads(&mut self, enable: bool) -> Result<(), Self::PayloadLengthErrorType>;

    /// Are dynamically sized payloads enabled?
    fn get_dynamic_payloads(&mut self) -> Result<bool, Self::PayloadLengthErrorType>;
}

/// A trait to represent manipulation of the automatic acknowledgement
/// and auto-retransmit features for an ESB capable transceiver.
pub trait EsbAutoAck {
    type AutoAckErrorType;

    /// Enable or disable ACK payloads.
    ///
    /// Enabling ACK payloads also enables auto-ack and dynamic payloads on all pipes.
    fn set_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Are ACK payloads enabled along with auto-ack and dynamic payloads?
    fn get_ack(&mut self) -> Result<bool, Self::AutoAckErrorType>;

    /// Stage a payload to be attached to the next ACK packet sent on `pipe`.
    ///
    /// ACK payloads (and dynamic payloads) are enabled if they are not already.
    /// Returns `false` (without uploading) if `pipe` is not in range [0, 5]
    /// or if the TX FIFO is full.
    fn load_ack_payload(&mut self, buf: &[u8], pipe: u8) -> Result<bool, Self::AutoAckErrorType>;

    /// Set the auto-retransmit count in range [0, 15]. Zero disables retries.
    fn set_retry_count(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Get the auto-retransmit count.
    fn get_retry_count(&mut self) -> Result<u8, Self::AutoAckErrorType>;

    /// Set the auto-retransmit delay in range [250, 4000] microseconds.
    ///
    /// The hardware uses steps of 250 microseconds; `delay` is rounded down to
    /// the nearest step.
    fn set_retry_delay(&mut self, delay: u16) -> Result<(), Self::AutoAckErrorType>;

    /// Get the auto-retransmit delay in microseconds.
    fn get_retry_delay(&mut self) -> Result<u16, Self::AutoAckErrorType>;
}

/// A trait to represent manipulation of an ESB capable transceiver.
///
/// Although the name is rather generic, this trait describes the
/// basic functionality of a transceiver's mode and payload transfers.
pub trait EsbRadio {
    type RadioErrorType;

    /// Get the radio's current [`Mode`].
    fn mode(&mut self) -> Result<Mode, Self::RadioErrorType>;

    /// Enter (`true`) or leave (`false`) RX mode.
    ///
    /// Entering RX mode restores the pipe 0 address given to
    /// [`EsbPipe::open_rx_pipe()`] (if any), flushes the RX FIFO, and
    /// activates the CE pin. Nothing happens if the radio already is in
    /// the requested state.
    fn set_listening(&mut self, enable: bool) -> Result<(), Self::RadioErrorType>;

    /// Is the radio powered up in RX mode?
    fn is_listening(&mut self) -> Result<bool, Self::RadioErrorType>;

    /// Upload a payload to the TX FIFO and activate the CE pin.
    ///
    /// This is a non-blocking helper for [`EsbRadio::send()`]. The payload
    /// is padded or truncated to the static payload length unless dynamic
    /// payloads are enabled.
    ///
    /// <div class="warning">
    ///
    /// The caller must keep the CE pin active for at least 10 microseconds
    /// and then deactivate it.
    ///
    /// </div>
    fn write(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<(), Self::RadioErrorType>;

    /// Blocking transmission of a single payload.
    ///
    /// If the transmission fails, it is repeated up to `force_retry` times
    /// with [`EsbRadio::resend()`]. An ACK payload received in response is
    /// returned in [`SendOutcome::Ack`].
    fn send(
        &mut self,
        buf: &[u8],
        ask_no_ack: bool,
        force_retry: u8,
    ) -> Result<SendOutcome, Self::RadioErrorType>;

    /// Blocking transmission of multiple payloads, one after another.
    ///
    /// The outcome of `payloads[i]` is stored in `outcomes[i]`. Returns the
    /// number of payloads sent.
    ///
    /// Nothing is sent if `outcomes` is shorter than `payloads` or if any
    /// payload has an invalid length.
    fn send_all(
        &mut self,
        payloads: &[&[u8]],
        ask_no_ack: bool,
        force_retry: u8,
        outcomes: &mut [SendOutcome],
    ) -> Result<usize, Self::RadioErrorType>;

    /// Blocking re-transmission of the payload left in the TX FIFO.
    ///
    /// Returns [`SendOutcome::Failed`] if the TX FIFO is empty.
    fn resend(&mut self) -> Result<SendOutcome, Self::RadioErrorType>;

    /// Fetch the payload at the top of the RX FIFO, if any.
    ///
    /// This never blocks.
    fn receive(&mut self) -> Result<Option<Payload>, Self::RadioErrorType>;
}

/// A trait to represent the radio's reset sequence.
pub trait EsbInit {
    type InitErrorType;

    /// Reset the radio's configuration to the driver defaults.
    ///
    /// Fails if the radio does not respond on the SPI bus.
    fn init(&mut self) -> Result<(), Self::InitErrorType>;
}
