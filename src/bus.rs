//! Chip-select framing for the radio's SPI bus.
//!
//! [`Nrf24l01`](crate::radio::Nrf24l01) talks to an
//! [`SpiDevice`](embedded_hal::spi::SpiDevice), so every command it sends is
//! already one CSN-low/CSN-high frame. Boards that only hand out a raw
//! [`SpiBus`] and a CSN [`OutputPin`] can use [`framed()`] to build that device.
use embedded_hal::{digital::OutputPin, spi::SpiBus};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};

/// An [`SpiBus`] owned by the radio with CSN driven around each transaction.
pub type FramedSpi<BUS, CSN> = ExclusiveDevice<BUS, CSN, NoDelay>;

/// Take exclusive ownership of `bus` and frame each transaction with `csn`.
///
/// CSN is driven high (deselected) before this returns.
pub fn framed<BUS, CSN>(bus: BUS, csn: CSN) -> Result<FramedSpi<BUS, CSN>, CSN::Error>
where
    BUS: SpiBus,
    CSN: OutputPin,
{
    ExclusiveDevice::new_no_delay(bus, csn)
}
