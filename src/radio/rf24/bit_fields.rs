use bitfield_struct::bitfield;

use crate::{DataRate, PaLevel};

/// The CONFIG register.
///
/// The IRQ mask bits are inverted: a set bit hides the event from the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _reserved: u8,

    pub mask_rx_dr: bool,

    pub mask_tx_ds: bool,

    pub mask_tx_df: bool,

    pub crc_enabled: bool,

    pub crc_2bytes: bool,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    /// PWR_UP set, PRIM_RX clear.
    pub const fn is_standby_tx(&self) -> bool {
        self.power() && !self.is_rx()
    }

    /// PWR_UP and PRIM_RX set.
    pub const fn is_listening(&self) -> bool {
        self.power() && self.is_rx()
    }
}

/// The SETUP_RETR register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay` in steps of 250 microseconds.
    #[bits(4)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4)]
    pub arc: u8,
}

impl SetupRetry {
    pub const DELAY_STEP_US: u16 = 250;

    pub const fn delay_us(&self) -> u16 {
        (self.ard() as u16 + 1) * Self::DELAY_STEP_US
    }

    /// Truncates to the 250 microsecond step at or below `delay`.
    pub const fn with_delay_us(self, delay: u16) -> Self {
        self.with_ard(((delay - Self::DELAY_STEP_US) / Self::DELAY_STEP_US) as u8)
    }
}

/// The RF_SETUP register.
#[bitfield(u8, order = Msb)]
pub(crate) struct RfSetup {
    pub cont_wave: bool,

    #[bits(1)]
    _reserved: u8,

    #[bits(1, access = None)]
    dr_low: bool,

    pub pll_lock: bool,

    #[bits(1, access = None)]
    dr_high: bool,

    #[bits(2, access = None)]
    pa_level: u8,

    pub lna_enable: bool,
}

impl RfSetup {
    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits())
    }

    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self::from_bits(self.into_bits() & !DataRate::MASK | data_rate.into_bits())
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits())
    }

    pub const fn with_pa_level(self, level: PaLevel) -> Self {
        Self::from_bits(self.into_bits() & !PaLevel::MASK | level.into_bits())
    }
}

/// The FEATURE register.
#[bitfield(u8, order = Msb)]
pub(crate) struct Feature {
    #[bits(5)]
    _reserved: u8,

    pub dynamic_payloads: bool,

    pub ack_payloads: bool,

    pub ask_no_ack: bool,
}

/// The FIFO_STATUS register.
#[bitfield(u8, order = Msb)]
pub(crate) struct FifoStatus {
    #[bits(1)]
    _reserved: u8,

    pub tx_reuse: bool,

    pub tx_full: bool,

    pub tx_empty: bool,

    #[bits(2)]
    _unused: u8,

    pub rx_full: bool,

    pub rx_empty: bool,
}

#[cfg(test)]
mod test {
    use super::{Config, Feature, FifoStatus, RfSetup, SetupRetry};
    use crate::{DataRate, PaLevel};

    #[test]
    fn config_layout() {
        let config = Config::from_bits(0x0E);
        assert!(config.crc_enabled());
        assert!(config.crc_2bytes());
        assert!(config.power());
        assert!(!config.is_rx());
        assert!(config.is_standby_tx());
        assert_eq!(config.with_is_rx(true).into_bits(), 0x0F);
        assert!(Config::from_bits(0x0F).is_listening());
        assert_eq!(
            Config::from_bits(0)
                .with_mask_rx_dr(true)
                .with_mask_tx_ds(true)
                .with_mask_tx_df(true)
                .into_bits(),
            0x70
        );
    }

    #[test]
    fn setup_retry_layout() {
        let retry = SetupRetry::from_bits(0x53);
        assert_eq!(retry.arc(), 3);
        assert_eq!(retry.delay_us(), 1500);
        assert_eq!(retry.with_delay_us(4000).into_bits(), 0xF3);
        assert_eq!(retry.with_delay_us(250).into_bits(), 0x03);
        // quantized down to the nearest step
        assert_eq!(retry.with_delay_us(740).delay_us(), 500);
    }

    #[test]
    fn rf_setup_layout() {
        let rf = RfSetup::from_bits(0x07);
        assert_eq!(rf.data_rate(), DataRate::Mbps1);
        assert_eq!(rf.pa_level(), PaLevel::Max);
        assert!(rf.lna_enable());
        assert_eq!(rf.with_data_rate(DataRate::Kbps250).into_bits(), 0x27);
        assert_eq!(rf.with_pa_level(PaLevel::Min).into_bits(), 0x01);
        assert_eq!(
            RfSetup::from_bits(0)
                .with_cont_wave(true)
                .with_pll_lock(true)
                .into_bits(),
            0x90
        );
    }

    #[test]
    fn feature_and_fifo_layout() {
        let feature = Feature::from_bits(5);
        assert!(feature.dynamic_payloads());
        assert!(!feature.ack_payloads());
        assert!(feature.ask_no_ack());

        let fifo = FifoStatus::from_bits(0x11);
        assert!(fifo.tx_empty());
        assert!(fifo.rx_empty());
        assert!(!fifo.tx_full());
        assert!(FifoStatus::from_bits(0x20).tx_full());
        assert!(FifoStatus::from_bits(0x02).rx_full());
    }
}
