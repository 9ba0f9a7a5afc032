use super::{
    bit_fields::{Config, Feature, RfSetup, SetupRetry},
    mnemonics, registers, timing, Nrf24Error, RF24,
};
use crate::{
    log::{error, info},
    radio::prelude::{EsbChannel, EsbFifo, EsbInit, EsbPayloadLength, EsbPower, EsbStatus},
    DataRate, PaLevel, StatusFlags, MAX_PAYLOAD_LENGTH,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> EsbInit for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type InitErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`RF24::new()`].
    ///
    /// The radio is left powered down with these settings:
    ///
    /// | feature | value |
    /// |--------:|:------|
    /// | CRC | 2 bytes |
    /// | address length | 5 bytes |
    /// | open RX pipes | none |
    /// | auto-ack | all pipes |
    /// | dynamic payloads | all pipes |
    /// | ACK payloads | disabled |
    /// | `ask_no_ack` | allowed |
    /// | auto-retransmit | 3 retries, 1500 us apart |
    /// | channel | 76 |
    /// | static payload length | 32 |
    /// | data rate | 1 Mbps |
    /// | PA level | 0 dBm |
    fn init(&mut self) -> Result<(), Self::InitErrorType> {
        self.set_ce(false)?;
        // configuration bits do not stick until the radio has settled after power on
        self._delay_impl.delay_us(timing::INIT_SETTLE_US);

        let config = Config::new()
            .with_crc_enabled(true)
            .with_crc_2bytes(true)
            .with_power(true);
        self.write_register(registers::CONFIG, config.into_bits())?;
        if !self.read_config()?.is_standby_tx() {
            error!("nRF24L01 not responding");
            return Err(Nrf24Error::NotResponding);
        }
        self.set_power(false)?;

        self.write_register(registers::SETUP_AW, 3)?;
        let rf_setup = RfSetup::new()
            .with_data_rate(DataRate::Mbps1)
            .with_pa_level(PaLevel::Max);
        self.write_register(registers::RF_SETUP, rf_setup.into_bits())?;
        self.write_register(registers::EN_RXADDR, 0)?;
        self.write_register(registers::DYNPD, mnemonics::ALL_PIPES)?;
        self.write_register(registers::EN_AA, mnemonics::ALL_PIPES)?;
        let feature = Feature::new()
            .with_dynamic_payloads(true)
            .with_ask_no_ack(true);
        self.write_register(registers::FEATURE, feature.into_bits())?;
        let retry = SetupRetry::new().with_delay_us(1500).with_arc(3);
        self.write_register(registers::SETUP_RETR, retry.into_bits())?;
        self._pipe0_rx_addr = None;
        self._pipe0_rx_len = 0;

        self.set_channel(76)?;
        self.set_payload_length(MAX_PAYLOAD_LENGTH as u8)?;
        self.flush_rx()?;
        self.flush_tx()?;
        self.clear_status_flags(StatusFlags::new())?;
        info!("nRF24L01 initialized");
        Ok(())
    }
}
