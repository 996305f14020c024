//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq)]
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

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "-18 dBm"),
            PaLevel::Low => defmt::write!(fmt, "-12 dBm"),
            PaLevel::High => defmt::write!(fmt, "-6 dBm"),
            PaLevel::Max => defmt::write!(fmt, "0 dBm"),
        }
    }
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
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "-18 dBm"),
            PaLevel::Low => write!(f, "-12 dBm"),
            PaLevel::High => write!(f, "-6 dBm"),
            PaLevel::Max => write!(f, "0 dBm"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps (nRF24L01+ only)
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

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x8 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
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

/// The operating state of the transceiver.
///
/// Every transition function in [`EsbPower`](trait@crate::radio::prelude::EsbPower)
/// documents the state it leaves the radio in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// `PWR_UP` is cleared. The chip only keeps its register values.
    PowerDown,
    /// Powered up with CE low.
    Standby,
    /// Powered up as primary receiver with CE high (actively listening).
    Rx,
    /// Powered up as primary transmitter; a loaded payload is being sent.
    Tx,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Mode::PowerDown => defmt::write!(fmt, "power down"),
            Mode::Standby => defmt::write!(fmt, "standby"),
            Mode::Rx => defmt::write!(fmt, "RX"),
            Mode::Tx => defmt::write!(fmt, "TX"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::PowerDown => write!(f, "power down"),
            Mode::Standby => write!(f, "standby"),
            Mode::Rx => write!(f, "RX"),
            Mode::Tx => write!(f, "TX"),
        }
    }
}

/// A snapshot of the STATUS register.
///
/// Every SPI transaction shifts this byte out first, so the driver keeps the
/// latest value around (see [`Nrf24l01::last_status()`](fn@crate::radio::Nrf24l01::last_status)).
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent (acknowledged).
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if the maximum number of retransmits was reached.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe number of the payload at the head of the RX FIFO.
    ///
    /// `7` means the RX FIFO is empty.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe(),
            self.tx_full()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the clearable flags (RX_DR, TX_DS, MAX_RT).
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// The pipe that received the next payload in the RX FIFO, if any.
    pub fn pipe(&self) -> Option<u8> {
        match self.rx_pipe() {
            pipe @ 0..=5 => Some(pipe),
            _ => None,
        }
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "STATUS 0x{:02X} rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}, tx_full: {}",
            self.into_bits(),
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe(),
            self.tx_full()
        )
    }
}

/// A snapshot of the FIFO_STATUS register.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct FifoStatus {
    #[bits(1)]
    _padding: u8,

    /// The last transmitted payload is reused while CE is high.
    #[bits(1, access = RO)]
    pub tx_reuse: bool,

    #[bits(1, access = RO)]
    pub tx_full: bool,

    #[bits(1, access = RO)]
    pub tx_empty: bool,

    #[bits(2)]
    _reserved: u8,

    #[bits(1, access = RO)]
    pub rx_full: bool,

    #[bits(1, access = RO)]
    pub rx_empty: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "FifoStatus tx_empty: {}, tx_full: {}, rx_empty: {}, rx_full: {}",
            self.tx_empty(),
            self.tx_full(),
            self.rx_empty(),
            self.rx_full()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{DataRate, FifoStatus, Mode, PaLevel, StatusFlags};
    extern crate std;
    use std::{format, string::String};

    fn display_data_rate(param: DataRate, expected: String) -> bool {
        format!("{param}") == expected
    }

    #[test]
    fn data_rate_1mbps() {
        assert!(display_data_rate(DataRate::Mbps1, String::from("1 Mbps")));
    }

    #[test]
    fn data_rate_2mbps() {
        assert!(display_data_rate(DataRate::Mbps2, String::from("2 Mbps")));
    }

    #[test]
    fn data_rate_bits() {
        assert_eq!(DataRate::Mbps2.into_bits(), 0x08);
        assert_eq!(DataRate::from_bits(0x0F), DataRate::Mbps2);
        assert_eq!(DataRate::from_bits(0x27), DataRate::Kbps250);
        assert_eq!(DataRate::from_bits(0x07), DataRate::Mbps1);
    }

    #[test]
    fn pa_level_bits() {
        assert_eq!(PaLevel::Min.into_bits(), 0);
        assert_eq!(PaLevel::Max.into_bits(), 6);
        assert_eq!(PaLevel::from_bits(0x0B), PaLevel::Low);
        assert_eq!(PaLevel::from_bits(0x0D), PaLevel::High);
    }

    #[test]
    fn pa_level_display() {
        assert_eq!(format!("{}", PaLevel::Min), "-18 dBm");
        assert_eq!(format!("{}", PaLevel::Max), "0 dBm");
    }

    #[test]
    fn mode_display() {
        assert_eq!(format!("{}", Mode::PowerDown), "power down");
        assert_eq!(format!("{}", Mode::Rx), "RX");
    }

    #[test]
    fn status_flags() {
        let flags = StatusFlags::from_bits(0x5E);
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert!(flags.max_rt());
        assert_eq!(flags.rx_pipe(), 7);
        assert_eq!(flags.pipe(), None);
        assert!(!flags.tx_full());

        let flags = StatusFlags::from_bits(0x45);
        assert_eq!(flags.pipe(), Some(2));
        assert!(flags.tx_full());
    }

    #[test]
    fn status_display() {
        assert_eq!(
            format!("{}", StatusFlags::from_bits(0x2E)),
            "STATUS 0x2E rx_dr: false, tx_ds: true, max_rt: false, rx_pipe: 7, tx_full: false"
        );
    }

    #[test]
    fn fifo_status() {
        let fifo = FifoStatus::from_bits(0x11);
        assert!(fifo.tx_empty());
        assert!(fifo.rx_empty());
        assert!(!fifo.tx_full());
        assert!(!fifo.rx_full());

        let fifo = FifoStatus::from_bits(0x22);
        assert!(fifo.tx_full());
        assert!(fifo.rx_full());
        assert!(!fifo.tx_reuse());
    }
}
