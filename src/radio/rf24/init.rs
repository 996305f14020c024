use super::{bit_fields::Config, commands, registers, Nrf24Error, Nrf24l01};
use crate::{radio::prelude::EsbInit, Mode};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Power on reset to standby takes up to 1.5 ms on the nRF24L01.
pub(super) const POWER_UP_DELAY_US: u32 = 1500;

impl<SPI, DO, DELAY> EsbInit for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`Nrf24l01::new()`].
    ///
    /// Returns [`Nrf24Error::BinaryCorruption`] if the address width register holds
    /// an illegal value, which is what a missing radio looks like on MISO.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;

        // configuration bits will not stick before the chip has settled
        self.delay_us(POWER_UP_DELAY_US);

        self.spi_write_byte(registers::CONFIG, Config::CRC_16)?;

        self.spi_read(1, commands::R_REGISTER | registers::CONFIG)?;
        self._config_reg = Config::from_bits(self._buf[1]);

        self.spi_read(1, commands::R_REGISTER | registers::SETUP_AW)?;
        let setup_aw = self._buf[1];
        if !(1..=3).contains(&setup_aw) {
            return Err(Nrf24Error::BinaryCorruption);
        }
        self._address_width = setup_aw + 2;
        self._mode = if self._config_reg.power() {
            Mode::Standby
        } else {
            Mode::PowerDown
        };
        Ok(())
    }
}
