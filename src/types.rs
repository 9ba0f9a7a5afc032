//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Debug, Display, Formatter, Result},
    ops::Deref,
    write,
};

use bitfield_struct::bitfield;

/// The maximum number of bytes a single payload can carry.
pub const MAX_PAYLOAD_LENGTH: usize = 32;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }

    /// The output power in dBm.
    pub const fn dbm(self) -> i8 {
        match self {
            PaLevel::Min => -18,
            PaLevel::Low => -12,
            PaLevel::High => -6,
            PaLevel::Max => 0,
        }
    }
}

impl TryFrom<i8> for PaLevel {
    type Error = ConfigError;

    /// Only -18, -12, -6 and 0 dBm are supported by the hardware.
    fn try_from(dbm: i8) -> core::result::Result<Self, Self::Error> {
        match dbm {
            -18 => Ok(PaLevel::Min),
            -12 => Ok(PaLevel::Low),
            -6 => Ok(PaLevel::High),
            0 => Ok(PaLevel::Max),
            _ => Err(ConfigError::PaLevel(dbm)),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=i8} dBm", self.dbm())
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} dBm", self.dbm())
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }

    /// `RF_DR_LOW` takes precedence over `RF_DR_HIGH`.
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => DataRate::Mbps1,
            0x8 => DataRate::Mbps2,
            _ => DataRate::Kbps250,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The radio's operating mode.
///
/// The mode is derived from the `PWR_UP` and `PRIM_RX` bits of the CONFIG
/// register combined with the level of the CE pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Sleeping. Register contents are retained.
    PowerDown,
    /// Powered up with CE inactive.
    Standby,
    /// Powered up as the primary transmitter with CE active.
    ///
    /// The radio falls back to [`Mode::Standby`] by itself once the TX FIFO
    /// has been sent and CE was lowered.
    Transmit,
    /// Powered up as the primary receiver with CE active.
    Receive,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::PowerDown => write!(f, "power down"),
            Mode::Standby => write!(f, "standby"),
            Mode::Transmit => write!(f, "TX"),
            Mode::Receive => write!(f, "RX"),
        }
    }
}

/// A parameter that was rejected before any bus activity took place.
///
/// Each variant carries the offending value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Channels are limited to the range [0, 125].
    Channel(u8),
    /// Address lengths are limited to the range [3, 5] bytes.
    AddressLength(u8),
    /// An address slice must hold 1 to 5 bytes.
    Address(usize),
    /// Pipe numbers are limited to the range [0, 5].
    Pipe(u8),
    /// Payloads must hold 1 to 32 bytes.
    PayloadLength(usize),
    /// The auto-retransmit count is limited to the range [0, 15].
    RetryCount(u8),
    /// The auto-retransmit delay is limited to the range [250, 4000] microseconds.
    RetryDelay(u16),
    /// Only -18, -12, -6 and 0 dBm are supported.
    PaLevel(i8),
    /// A batch of payloads needs one outcome slot per payload.
    Outcomes(usize),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ConfigError::Channel(v) => write!(f, "channel {v} is not in range [0, 125]"),
            ConfigError::AddressLength(v) => {
                write!(f, "address length {v} is not in range [3, 5]")
            }
            ConfigError::Address(v) => write!(f, "address of {v} bytes is not in range [1, 5]"),
            ConfigError::Pipe(v) => write!(f, "pipe number {v} is not in range [0, 5]"),
            ConfigError::PayloadLength(v) => {
                write!(f, "payload of {v} bytes is not in range [1, 32]")
            }
            ConfigError::RetryCount(v) => write!(f, "auto-retry count {v} is not in range [0, 15]"),
            ConfigError::RetryDelay(v) => {
                write!(f, "auto-retry delay {v} us is not in range [250, 4000]")
            }
            ConfigError::PaLevel(v) => write!(f, "PA level {v} dBm is not -18, -12, -6 or 0"),
            ConfigError::Outcomes(v) => {
                write!(f, "only {v} outcome slots for a larger batch of payloads")
            }
        }
    }
}

/// A payload fetched from the radio's RX FIFO.
///
/// It dereferences to the received bytes.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Payload {
    buf: [u8; MAX_PAYLOAD_LENGTH],
    len: u8,
}

impl Payload {
    /// The received bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub(crate) fn buf_mut(&mut self, len: u8) -> &mut [u8] {
        self.len = len.min(MAX_PAYLOAD_LENGTH as u8);
        &mut self.buf[..self.len as usize]
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_tuple("Payload").field(&self.as_bytes()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Payload {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Payload({=[u8]})", self.as_bytes())
    }
}

/// The result of a blocking transmission.
///
/// Failing to get an acknowledgement is an expected outcome and therefore
/// not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendOutcome {
    /// The payload was sent (and acknowledged if auto-ack is enabled).
    Sent,
    /// The auto-retransmit count was exhausted without an acknowledgement.
    Failed,
    /// The payload was acknowledged with an ACK payload attached.
    Ack(Payload),
}

impl SendOutcome {
    /// Was the payload delivered?
    pub fn is_success(&self) -> bool {
        !matches!(self, SendOutcome::Failed)
    }
}

/// A snapshot of the radio's STATUS register.
///
/// Every SPI transaction clocks out this byte first, so the driver
/// always holds the status of its latest transaction.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use rf24_lite::StatusFlags;
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    pub tx_ds: bool,

    /// A flag to describe if TX Data Failed.
    pub tx_df: bool,

    #[bits(3, access = RO)]
    rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// The pipe number of the payload at the top of the RX FIFO.
    ///
    /// Returns `None` when the RX FIFO is empty.
    pub fn pipe(&self) -> Option<u8> {
        let pipe = self.rx_pipe();
        if pipe <= 5 {
            Some(pipe)
        } else {
            None
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, pipe: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.pipe(),
            self.tx_full()
        )
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{ConfigError, DataRate, Mode, PaLevel, Payload, SendOutcome, StatusFlags};
    extern crate std;
    use std::{format, string::String};

    #[test]
    fn pa_level_from_dbm() {
        for level in [PaLevel::Min, PaLevel::Low, PaLevel::High, PaLevel::Max] {
            assert_eq!(PaLevel::try_from(level.dbm()), Ok(level));
        }
        assert_eq!(PaLevel::try_from(-5), Err(ConfigError::PaLevel(-5)));
        assert_eq!(PaLevel::try_from(4), Err(ConfigError::PaLevel(4)));
    }

    #[test]
    fn pa_level_bits() {
        for level in [PaLevel::Min, PaLevel::Low, PaLevel::High, PaLevel::Max] {
            // LNA bit must not leak into the level
            assert_eq!(PaLevel::from_bits(level.into_bits() | 1), level);
        }
    }

    #[test]
    fn data_rate_bits() {
        assert_eq!(DataRate::from_bits(0x0F), DataRate::Mbps2);
        assert_eq!(DataRate::from_bits(0x27), DataRate::Kbps250);
        // RF_DR_LOW wins over RF_DR_HIGH
        assert_eq!(DataRate::from_bits(0x28), DataRate::Kbps250);
        assert_eq!(DataRate::from_bits(0x07), DataRate::Mbps1);
    }

    #[test]
    fn display_values() {
        assert_eq!(format!("{}", PaLevel::Low), String::from("-12 dBm"));
        assert_eq!(format!("{}", DataRate::Kbps250), String::from("250 Kbps"));
        assert_eq!(format!("{}", Mode::Standby), String::from("standby"));
        assert_eq!(
            format!("{}", ConfigError::Channel(200)),
            String::from("channel 200 is not in range [0, 125]")
        );
        assert_eq!(
            format!("{}", StatusFlags::default()),
            String::from("StatusFlags rx_dr: false, tx_ds: false, tx_df: false")
        );
    }

    #[test]
    fn status_pipe_field() {
        assert_eq!(StatusFlags::from_bits(0x0E).pipe(), None);
        assert_eq!(StatusFlags::from_bits(0x0C).pipe(), None);
        assert_eq!(StatusFlags::from_bits(0x0A).pipe(), Some(5));
        assert_eq!(StatusFlags::from_bits(0x40).pipe(), Some(0));
        assert!(StatusFlags::from_bits(0x0F).tx_full());
    }

    #[test]
    fn status_flag_builders() {
        let flags = StatusFlags::new().with_rx_dr(false);
        assert!(!flags.rx_dr());
        assert!(flags.tx_ds());
        assert!(flags.tx_df());
        assert_eq!(flags.into_bits(), 0x30);
    }

    #[test]
    fn payload_bytes() {
        let mut payload = Payload::default();
        assert!(payload.is_empty());
        payload.buf_mut(3).copy_from_slice(&[1, 2, 3]);
        assert_eq!(&*payload, &[1u8, 2, 3]);
        assert!(SendOutcome::Ack(payload).is_success());
        assert!(SendOutcome::Sent.is_success());
        assert!(!SendOutcome::Failed.is_success());
    }
}
