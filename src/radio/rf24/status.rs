use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbStatus, Nrf24Error, Nrf24l01},
    types::StatusFlags,
};

use super::{commands, registers};

impl<SPI, DO, DELAY> EsbStatus for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn status(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        self.spi_read(1, commands::R_REGISTER | registers::STATUS)?;
        self._status = StatusFlags::from_bits(self._buf[1]);
        Ok(self._status)
    }

    fn clear_status(&mut self) -> Result<(), Self::StatusErrorType> {
        self.spi_write_byte(registers::STATUS, StatusFlags::IRQ_MASK)
    }

    fn last_status(&self) -> StatusFlags {
        self._status
    }
}
