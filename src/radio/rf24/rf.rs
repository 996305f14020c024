use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbRf, Nrf24Error, Nrf24l01},
    DataRate, PaLevel,
};

use super::{bit_fields::SetupRetry, registers};

impl<SPI, DO, DELAY> EsbRf for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RfErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Overwrites the whole RF_SETUP register; any bits outside the data rate,
    /// PA level and LNA fields are cleared.
    fn set_rf_parameters(
        &mut self,
        data_rate: DataRate,
        pa_level: PaLevel,
        lna_enable: bool,
    ) -> Result<(), Self::RfErrorType> {
        let setup = data_rate.into_bits() | pa_level.into_bits() | lna_enable as u8;
        self.spi_write_byte(registers::RF_SETUP, setup)
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), Self::RfErrorType> {
        self.spi_write_byte(registers::RF_CH, channel & 0x7F)
    }

    fn set_retransmit(&mut self, count: u8, delay: u8) -> Result<(), Self::RfErrorType> {
        let retry = SetupRetry::new()
            .with_arc(count & 0x0F)
            .with_ard(delay & 0x0F);
        self.spi_write_byte(registers::SETUP_RETR, retry.into_bits())
    }
}
