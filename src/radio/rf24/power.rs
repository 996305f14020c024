use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{EsbFifo, EsbPower, EsbStatus},
        Nrf24Error, Nrf24l01,
    },
    Mode,
};

use super::{init::POWER_UP_DELAY_US, registers};

/// RX settling time after CE goes high.
const RX_SETTLING_US: u32 = 130;
/// TX settling time after CE goes high.
const TX_SETTLING_US: u32 = 150;

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Set `PRIM_RX` and write CONFIG, without touching CE.
    pub fn primary_rx(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._config_reg = self._config_reg.with_is_rx(true);
        self.write_config()
    }

    /// Clear `PRIM_RX`, write CONFIG, then point pipe 0 at the TX address
    /// and make sure pipe 0 is enabled so that ACK packets are received.
    ///
    /// CE is not touched.
    pub fn primary_tx(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._config_reg = self._config_reg.with_is_rx(false);
        self.write_config()?;
        self.restore_pipe0_tx()?;
        self.enable_rx_pipe(0)
    }

    /// Power up, become a primary receiver, clear the status flags and
    /// assert CE to start listening.
    ///
    /// Leaves the radio in [`Mode::Rx`].
    pub fn ready_rx(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.power_up()?;
        self.primary_rx()?;
        self.clear_status()?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._mode = Mode::Rx;
        Ok(())
    }

    /// Stop listening and prepare pipe 0 for ACK packets
    /// (see [`Nrf24l01::primary_tx()`]).
    ///
    /// Leaves the radio in [`Mode::Standby`] if it is powered up.
    pub fn ready_tx(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self.delay_us(RX_SETTLING_US);
        self.primary_tx()?;
        self._mode = self.powered_or_down(Mode::Standby);
        Ok(())
    }
}

impl<SPI, DO, DELAY> EsbPower for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn power_up(&mut self) -> Result<(), Self::PowerErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._config_reg = self._config_reg.with_power(true);
        self.write_config()?;
        self.delay_us(POWER_UP_DELAY_US);
        self._mode = Mode::Standby;
        Ok(())
    }

    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self._config_reg = self._config_reg.with_power(false);
        self.write_config()?;
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._mode = Mode::PowerDown;
        Ok(())
    }

    /// If [`EsbPipe::set_rx_address()`](fn@crate::radio::prelude::EsbPipe::set_rx_address)
    /// was given an address for pipe 0, that address is written back to pipe 0 first.
    fn set_mode_rx(&mut self) -> Result<(), Self::PowerErrorType> {
        if let Some(address) = self._pipe0_rx_addr {
            let width = self._address_width as usize;
            self.spi_write_buf(registers::RX_ADDR_P0, &address[..width])?;
        }
        self._config_reg = self._config_reg.with_is_rx(true);
        self.write_config()?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self.delay_us(RX_SETTLING_US);
        self._mode = self.powered_or_down(Mode::Rx);
        Ok(())
    }

    /// If pipe 0 was given its own RX address, the TX address is written back
    /// to pipe 0 first (needed to receive ACK packets).
    fn set_mode_tx(&mut self) -> Result<(), Self::PowerErrorType> {
        if self._pipe0_rx_addr.is_some() {
            self.restore_pipe0_tx()?;
        }
        self._config_reg = self._config_reg.with_is_rx(false);
        self.write_config()?;
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self.delay_us(TX_SETTLING_US);
        self._mode = self.powered_or_down(Mode::Tx);
        Ok(())
    }

    fn standby(&mut self) -> Result<(), Self::PowerErrorType> {
        self.clear_status()?;
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self.flush_rx()?;
        self.flush_tx()?;
        self._mode = self.powered_or_down(Mode::Standby);
        Ok(())
    }

    fn is_powered(&self) -> bool {
        self._config_reg.power()
    }

    fn mode(&self) -> Mode {
        self._mode
    }
}
