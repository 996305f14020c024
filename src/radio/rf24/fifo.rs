use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbFifo, Nrf24Error, Nrf24l01},
    FifoStatus,
};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> EsbFifo for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_TX)
    }

    fn fifo_status(&mut self) -> Result<FifoStatus, Self::FifoErrorType> {
        self.spi_read(1, commands::R_REGISTER | registers::FIFO_STATUS)?;
        Ok(FifoStatus::from_bits(self._buf[1]))
    }

    fn read_payload(&mut self, buf: &mut [u8]) -> Result<(), Self::FifoErrorType> {
        if buf.is_empty() || buf.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        let len = buf.len();
        self.spi_read(len as u8, commands::R_RX_PAYLOAD)?;
        buf.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    fn write_payload(&mut self, buf: &[u8]) -> Result<(), Self::FifoErrorType> {
        if buf.is_empty() || buf.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_buf(commands::W_TX_PAYLOAD, buf)
    }
}
