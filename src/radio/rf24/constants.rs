/// Register offsets for the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const RPD: u8 = 0x09;
    /// Pipes 1-5 follow at consecutive offsets.
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const TX_ADDR: u8 = 0x10;
    /// Pipes 1-5 follow at consecutive offsets.
    pub const RX_PW_P0: u8 = 0x11;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// SPI commands for the nRF24L01.
pub mod commands {
    pub const W_REGISTER: u8 = 0x20;
    pub const R_RX_PL_WID: u8 = 0x60;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    /// OR'd with the pipe number.
    pub const W_ACK_PAYLOAD: u8 = 0xA8;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const REUSE_TX_PL: u8 = 0xE3;
    pub const NOP: u8 = 0xFF;
}

/// Bit mnemonics shared by the STATUS and CONFIG registers.
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;
    /// Enables all pipes in the EN_AA, EN_RXADDR and DYNPD registers.
    pub const ALL_PIPES: u8 = 0x3F;
}

/// Timing contracts of the nRF24L01 datasheet.
///
/// These are physical settle requirements. The driver never skips or
/// shortens them.
pub mod timing {
    /// Settle time after a power-on reset before configuration sticks.
    pub const INIT_SETTLE_US: u32 = 5000;
    /// Power down -> standby (Tpd2stby).
    pub const POWER_UP_SETTLE_US: u32 = 1500;
    /// Standby -> TX/RX settling after a mode change.
    pub const MODE_SETTLE_US: u32 = 150;
    /// Minimum CE pulse when entering RX mode.
    pub const RX_CE_PULSE_US: u32 = 130;
    /// Minimum CE high time to start a transmission (Thce).
    pub const TX_CE_HOLD_US: u32 = 10;
    /// Time for the carrier wave to stabilize after CE goes high.
    pub const CARRIER_SETTLE_US: u32 = 280;
    /// Default settle time after chip-select assertion.
    ///
    /// The CSN to SCK setup time is a few nanoseconds, which every
    /// [`SpiDevice`](embedded_hal::spi::SpiDevice) implementation already
    /// honors. See [`RF24::csn_delay_ns`](crate::radio::RF24::csn_delay_ns).
    pub const CSN_SETTLE_NS: u32 = 0;
}
