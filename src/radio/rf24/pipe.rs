use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbPipe, Nrf24Error, Nrf24l01};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn check_address(&self, address: &[u8]) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if address.len() != self._address_width as usize {
            return Err(Nrf24Error::InvalidArgument);
        }
        Ok(())
    }

    /// Set the bit for `pipe` in EN_RXADDR without clearing the others.
    pub(super) fn enable_rx_pipe(
        &mut self,
        pipe: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, commands::R_REGISTER | registers::EN_RXADDR)?;
        let out = self._buf[1] | (1 << pipe);
        self.spi_write_byte(registers::EN_RXADDR, out)
    }

    /// Point pipe 0 back at the cached TX address so that ACK packets are received.
    pub(super) fn restore_pipe0_tx(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let address = self._tx_address;
        let width = self._address_width as usize;
        self.spi_write_buf(registers::RX_ADDR_P0, &address[..width])
    }
}

impl<SPI, DO, DELAY> EsbPipe for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if pipe >= mnemonics::PIPES {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.check_address(address)?;
        if pipe < 2 {
            self.spi_write_buf(registers::RX_ADDR_P0 + pipe, address)?;
        } else {
            // pipes 2 - 5 share the 4 MSBytes of pipe 1's address
            self.spi_write_byte(registers::RX_ADDR_P0 + pipe, address[0])?;
        }
        if pipe == 0 {
            let mut cached = [0u8; 5];
            cached[..address.len()].copy_from_slice(address);
            self._pipe0_rx_addr = Some(cached);
        }
        self.enable_rx_pipe(pipe)
    }

    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        self.check_address(address)?;
        self.spi_write_buf(registers::RX_ADDR_P0, address)?;
        self.spi_write_buf(registers::TX_ADDR, address)?;
        self._tx_address[..address.len()].copy_from_slice(address);
        Ok(())
    }

    fn set_payload_size(&mut self, pipe: u8, size: u8) -> Result<(), Self::PipeErrorType> {
        if pipe >= mnemonics::PIPES || size as usize > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_byte(registers::RX_PW_P0 + pipe, size)
    }

    fn address_width(&self) -> u8 {
        self._address_width
    }
}
