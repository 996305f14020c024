use core::fmt::{Display, Formatter, Result as FmtResult};

use super::{
    bit_fields::{Config, SetupRetry},
    commands, registers, Nrf24Error, Nrf24l01,
};
use crate::{radio::prelude::EsbDetails, DataRate, PaLevel, StatusFlags};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// A snapshot of the radio's registers, taken by
/// [`EsbDetails::details()`](fn@crate::radio::prelude::EsbDetails::details).
///
/// Implements [`Display`] (and `defmt::Format` with the `defmt` feature)
/// to print a human readable dump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegisterDump {
    pub status: StatusFlags,
    /// Full width addresses of pipes 0 and 1, only the first
    /// [`RegisterDump::address_width`] bytes are meaningful.
    pub rx_address: [[u8; 5]; 2],
    /// The LSByte of pipes 2 - 5.
    pub rx_address_lsb: [u8; 4],
    pub tx_address: [u8; 5],
    pub payload_size: [u8; 6],
    pub en_aa: u8,
    pub en_rxaddr: u8,
    pub rf_ch: u8,
    pub rf_setup: u8,
    pub config: u8,
    pub dynpd: u8,
    pub feature: u8,
    pub address_width: u8,
    pub setup_retr: u8,
    pub observe_tx: u8,
}

impl RegisterDump {
    pub fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.rf_setup)
    }

    pub fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.rf_setup)
    }

    pub fn lna_enabled(&self) -> bool {
        self.rf_setup & 1 == 1
    }

    /// The address of `pipe` as stored on the chip (pipes 2 - 5 borrow
    /// the upper bytes of pipe 1).
    pub fn rx_address(&self, pipe: u8) -> [u8; 5] {
        match pipe {
            0 | 1 => self.rx_address[pipe as usize],
            _ => {
                let mut address = self.rx_address[1];
                address[0] = self.rx_address_lsb[(pipe as usize - 2) % 4];
                address
            }
        }
    }
}

fn write_address(f: &mut Formatter<'_>, address: &[u8]) -> FmtResult {
    write!(f, "0x")?;
    for byte in address.iter().rev() {
        write!(f, "{byte:02X}")?;
    }
    Ok(())
}

impl Display for RegisterDump {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let width = (self.address_width as usize).clamp(3, 5);
        writeln!(f, "{}", self.status)?;
        for pipe in 0..6u8 {
            write!(f, "PIPE {pipe}     = ")?;
            if pipe < 2 {
                write_address(f, &self.rx_address[pipe as usize][..width])?;
            } else {
                write!(f, "0x{:02X}", self.rx_address_lsb[pipe as usize - 2])?;
            }
            writeln!(f)?;
        }
        write!(f, "TX_ADDR    = ")?;
        write_address(f, &self.tx_address[..width])?;
        writeln!(f)?;
        writeln!(f, "Payload width:")?;
        for (pipe, size) in self.payload_size.iter().enumerate() {
            writeln!(f, " - Pipe {pipe}  = {size}")?;
        }
        writeln!(f, "EN_AA      = 0x{:02X}", self.en_aa)?;
        writeln!(f, "EN_RXADDR  = 0x{:02X}", self.en_rxaddr)?;
        writeln!(f, "RF_CH      = 0x{:02X}", self.rf_ch)?;
        writeln!(f, "RF_SETUP   = 0x{:02X}", self.rf_setup)?;
        writeln!(f, "CONFIG     = 0x{:02X}", self.config)?;
        writeln!(f, "DYNPD      = 0x{:02X}", self.dynpd)?;
        writeln!(f, "FEATURE    = 0x{:02X}", self.feature)?;
        writeln!(f, "Data Rate  = {}", self.data_rate())?;
        writeln!(f, "RF output  = {}", self.pa_level())?;
        writeln!(f, "LNA gain   = {}", self.lna_enabled())?;
        writeln!(f, "SETUP_AW   = {} bytes", self.address_width)?;
        let retry = SetupRetry::from_bits(self.setup_retr);
        writeln!(
            f,
            "SETUP_RETR = {} attempts, {} us",
            retry.arc(),
            retry.delay_us()
        )?;
        writeln!(f, "OBSERVE_TX = 0x{:02X}", self.observe_tx)?;
        let config = Config::from_bits(self.config);
        writeln!(f, "CONFIG:")?;
        writeln!(f, " - MASK_RX_DR  = {}", config.mask_rx_dr())?;
        writeln!(f, " - MASK_TX_DS  = {}", config.mask_tx_ds())?;
        writeln!(f, " - MASK_MAX_RT = {}", config.mask_max_rt())?;
        writeln!(f, " - CRC         = {} bytes", config.crc_bytes())?;
        writeln!(f, " - PWR_UP      = {}", config.power())?;
        write!(f, " - PRIM_RX     = {}", config.is_rx())
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for RegisterDump {
    fn format(&self, fmt: defmt::Formatter) {
        let width = (self.address_width as usize).clamp(3, 5);
        defmt::write!(fmt, "{}\n", self.status);
        defmt::write!(fmt, "PIPE 0     = {=[u8]:02X}\n", self.rx_address[0][..width]);
        defmt::write!(fmt, "PIPE 1     = {=[u8]:02X}\n", self.rx_address[1][..width]);
        defmt::write!(fmt, "PIPE 2-5   = {=[u8]:02X}\n", self.rx_address_lsb);
        defmt::write!(fmt, "TX_ADDR    = {=[u8]:02X}\n", self.tx_address[..width]);
        defmt::write!(fmt, "RX_PW      = {=[u8]}\n", self.payload_size);
        defmt::write!(fmt, "EN_AA      = {=u8:#04X}\n", self.en_aa);
        defmt::write!(fmt, "EN_RXADDR  = {=u8:#04X}\n", self.en_rxaddr);
        defmt::write!(fmt, "RF_CH      = {=u8:#04X}\n", self.rf_ch);
        defmt::write!(fmt, "RF_SETUP   = {=u8:#04X}\n", self.rf_setup);
        defmt::write!(fmt, "CONFIG     = {=u8:#04X}\n", self.config);
        defmt::write!(fmt, "DYNPD      = {=u8:#04X}\n", self.dynpd);
        defmt::write!(fmt, "FEATURE    = {=u8:#04X}\n", self.feature);
        defmt::write!(fmt, "SETUP_AW   = {=u8} bytes\n", self.address_width);
        defmt::write!(fmt, "SETUP_RETR = {=u8:#04X}\n", self.setup_retr);
        defmt::write!(fmt, "OBSERVE_TX = {=u8:#04X}", self.observe_tx);
    }
}

impl<SPI, DO, DELAY> EsbDetails for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DetailsErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn details(&mut self) -> Result<RegisterDump, Self::DetailsErrorType> {
        let width = self._address_width as usize;
        let mut dump = RegisterDump {
            status: StatusFlags::from_bits(0),
            rx_address: [[0u8; 5]; 2],
            rx_address_lsb: [0u8; 4],
            tx_address: [0u8; 5],
            payload_size: [0u8; 6],
            en_aa: 0,
            en_rxaddr: 0,
            rf_ch: 0,
            rf_setup: 0,
            config: 0,
            dynpd: 0,
            feature: 0,
            address_width: self._address_width,
            setup_retr: 0,
            observe_tx: 0,
        };

        dump.status = StatusFlags::from_bits(self.read_byte(registers::STATUS)?);
        for pipe in 0..2u8 {
            self.spi_read(width as u8, commands::R_REGISTER | (registers::RX_ADDR_P0 + pipe))?;
            dump.rx_address[pipe as usize][..width].copy_from_slice(&self._buf[1..=width]);
        }
        for pipe in 2..6u8 {
            dump.rx_address_lsb[pipe as usize - 2] = self.read_byte(registers::RX_ADDR_P0 + pipe)?;
        }
        self.spi_read(width as u8, commands::R_REGISTER | registers::TX_ADDR)?;
        dump.tx_address[..width].copy_from_slice(&self._buf[1..=width]);
        for pipe in 0..6u8 {
            dump.payload_size[pipe as usize] = self.read_byte(registers::RX_PW_P0 + pipe)?;
        }
        dump.en_aa = self.read_byte(registers::EN_AA)?;
        dump.en_rxaddr = self.read_byte(registers::EN_RXADDR)?;
        dump.rf_ch = self.read_byte(registers::RF_CH)?;
        dump.rf_setup = self.read_byte(registers::RF_SETUP)?;
        // also resyncs the cached CONFIG value
        dump.config = self.read_register(registers::CONFIG)?;
        dump.dynpd = self.read_byte(registers::DYNPD)?;
        dump.feature = self.read_byte(registers::FEATURE)?;
        dump.setup_retr = self.read_byte(registers::SETUP_RETR)?;
        dump.observe_tx = self.read_byte(registers::OBSERVE_TX)?;
        Ok(dump)
    }
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn read_byte(&mut self, register: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, commands::R_REGISTER | register)?;
        Ok(self._buf[1])
    }
}
