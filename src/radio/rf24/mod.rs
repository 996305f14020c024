use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
pub(crate) mod bit_fields;
mod init;
use bit_fields::Config;
mod constants;
mod fifo;
mod pipe;
mod power;
mod rf;
pub use constants::{commands, mnemonics, registers};
mod details;
pub use details::RegisterDump;
mod status;
use crate::{Mode, StatusFlags};

/// An collection of error types to describe hardware malfunctions
/// and rejected arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error (the CE pin).
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO).
    ///
    /// Usually means the radio is not connected or not powered.
    BinaryCorruption,
    /// A pipe number, payload size, address length or register address was out of range.
    ///
    /// Nothing is sent over the SPI bus when this is returned.
    InvalidArgument,
    /// The radio reported neither "data sent" nor "max retransmits" before the
    /// configured acknowledgement timeout expired.
    HardwareTimeout,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl<SPI, DO> defmt::Format for Nrf24Error<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(_) => defmt::write!(fmt, "SPI error"),
            Nrf24Error::Gpo(_) => defmt::write!(fmt, "CE pin error"),
            Nrf24Error::BinaryCorruption => defmt::write!(fmt, "binary corruption"),
            Nrf24Error::InvalidArgument => defmt::write!(fmt, "invalid argument"),
            Nrf24Error::HardwareTimeout => defmt::write!(fmt, "hardware timeout"),
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The radio's CSN pin (aka Chip Select pin) belongs to the
/// [`SpiDevice`](trait@embedded_hal::spi::SpiDevice) passed to [`Nrf24l01::new()`].
/// Use [`bus::framed()`](fn@crate::bus::framed) to build one from a raw bus and a pin.
pub struct Nrf24l01<SPI, DO, DELAY> {
    _spi: SPI,
    ce_pin: DO,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _config_reg: Config,
    _mode: Mode,
    _address_width: u8,
    _tx_address: [u8; 5],
    _pipe0_rx_addr: Option<[u8; 5]>,
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate a [`Nrf24l01`] object for use on the specified
    /// `spi` device with the given `ce_pin`.
    ///
    /// No I/O is performed until [`init()`](fn@crate::radio::prelude::EsbInit::init).
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Nrf24l01<SPI, DO, DELAY> {
        Nrf24l01 {
            ce_pin,
            _spi: spi,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            _buf: [0u8; 33],
            // 16 bit CRC, powered down as TX
            _config_reg: Config::from_bits(Config::CRC_16),
            _mode: Mode::PowerDown,
            _address_width: 5,
            _tx_address: [0u8; 5],
            _pipe0_rx_addr: None,
        }
    }

    fn spi_transfer(&mut self, len: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Shift out `command` followed by `len` dummy bytes.
    ///
    /// This is also used to send SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::FLUSH_TX)?;
    /// ```
    fn spi_read(&mut self, len: u8, command: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        self._buf[1..=len as usize].fill(commands::NOP);
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(
        &mut self,
        command: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        let buf_len = buf.len();
        self._buf[1..(buf_len + 1)].copy_from_slice(buf);
        self.spi_transfer(buf_len as u8 + 1)
    }

    fn write_config(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())
    }

    /// The state a transition lands in, given the current power bit.
    fn powered_or_down(&self, mode: Mode) -> Mode {
        if self._config_reg.power() {
            mode
        } else {
            Mode::PowerDown
        }
    }

    /// Read a single register.
    ///
    /// Reading `CONFIG` also refreshes the cached configuration.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        if register > mnemonics::MAX_REGISTER {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(1, commands::R_REGISTER | register)?;
        let value = self._buf[1];
        if register == registers::CONFIG {
            self.sync_config(value);
        }
        Ok(value)
    }

    /// Read `buf.len()` bytes (1-32) from a register, for example a 5 byte address.
    pub fn read_registers(
        &mut self,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if register > mnemonics::MAX_REGISTER
            || buf.is_empty()
            || buf.len() > mnemonics::MAX_PAYLOAD
        {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(buf.len() as u8, commands::R_REGISTER | register)?;
        buf.copy_from_slice(&self._buf[1..=buf.len()]);
        if register == registers::CONFIG {
            self.sync_config(buf[0]);
        }
        Ok(())
    }

    /// Write `bytes` (1-32) to a register.
    ///
    /// Writing `CONFIG` this way also updates the cached configuration and [`Mode`].
    pub fn write_register(
        &mut self,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if register > mnemonics::MAX_REGISTER
            || bytes.is_empty()
            || bytes.len() > mnemonics::MAX_PAYLOAD
        {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_buf(register, bytes)?;
        if register == registers::CONFIG {
            self.sync_config(bytes[0]);
        }
        Ok(())
    }

    fn sync_config(&mut self, value: u8) {
        self._config_reg = Config::from_bits(value);
        self._mode = match (self._config_reg.power(), self._mode) {
            (false, _) => Mode::PowerDown,
            (true, Mode::PowerDown) => Mode::Standby,
            (true, mode) => mode,
        };
    }

    /// Drive CE high.
    ///
    /// This is a raw control; it does not change
    /// [`Nrf24l01::mode()`](fn@crate::radio::prelude::EsbPower::mode).
    pub fn enable(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)
    }

    /// Drive CE low.
    ///
    /// In TX mode the falling edge ends the CE pulse that started the transmission
    /// of the loaded payload. This does not change
    /// [`Nrf24l01::mode()`](fn@crate::radio::prelude::EsbPower::mode).
    pub fn disable(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)
    }

    /// The last address given to [`set_tx_address()`](fn@crate::radio::prelude::EsbPipe::set_tx_address).
    pub fn tx_address(&self) -> &[u8] {
        &self._tx_address[..self._address_width as usize]
    }

    /// Give back the SPI device, CE pin and delay provider.
    pub fn release(self) -> (SPI, DO, DELAY) {
        (self._spi, self.ce_pin, self._delay_impl)
    }

    pub(crate) fn delay_us(&mut self, us: u32) {
        self._delay_impl.delay_us(us);
    }

    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self._delay_impl.delay_ms(ms);
    }
}
