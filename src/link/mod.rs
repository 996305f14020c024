//! A half-duplex link layer on top of [`Nrf24l01`].
//!
//! [`Link`] sequences the register driver into a blocking `write`/`read` API.
//! Writes wait for the radio's automatic acknowledgement (bounded by
//! [`RadioConfig::ack_timeout_ms()`]), reads only take what is already in the RX FIFO.
//!
//! ```ignore
//! let radio = Nrf24l01::new(ce_pin, bus::framed(spi_bus, csn_pin)?, delay);
//! let mut link = Link::initialize(radio, RadioConfig::default())?;
//! link.set_tx_address(b"11111")?;
//! if !link.write(b"PING!")? {
//!     // no ACK after all retries
//! }
//! ```
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{
    mnemonics,
    prelude::{EsbDetails, EsbFifo, EsbInit, EsbPipe, EsbPower, EsbRf, EsbStatus},
    Nrf24Error, Nrf24l01, RadioConfig, RegisterDump,
};

mod sink;
pub use sink::{DiagnosticSink, LinkEvent, NoopSink};
#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
pub use sink::DefmtSink;

#[cfg(test)]
mod air;

/// Owns a [`Nrf24l01`] and drives it as one end of a point-to-point link.
pub struct Link<SPI, DO, DELAY, SINK = NoopSink> {
    radio: Nrf24l01<SPI, DO, DELAY>,
    config: RadioConfig,
    sink: SINK,
}

impl<SPI, DO, DELAY> Link<SPI, DO, DELAY, NoopSink>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Wrap a radio without touching it.
    ///
    /// Use this if the radio was already configured; otherwise see [`Link::initialize()`].
    pub fn new(radio: Nrf24l01<SPI, DO, DELAY>, config: RadioConfig) -> Self {
        Self {
            radio,
            config,
            sink: NoopSink,
        }
    }

    /// Bring up the radio and apply `config`.
    ///
    /// The sequence is:
    /// 1. [`init()`](fn@crate::radio::prelude::EsbInit::init)
    /// 2. RF setup (data rate, PA level, LNA) and channel
    /// 3. clear the status flags and flush both FIFOs
    /// 4. static payload size on pipes 0 and 1
    /// 5. automatic retransmission count and delay
    /// 6. [`power_up()`](fn@crate::radio::prelude::EsbPower::power_up)
    ///
    /// The radio is left in [`Mode::Standby`](crate::Mode::Standby).
    pub fn initialize(
        radio: Nrf24l01<SPI, DO, DELAY>,
        config: RadioConfig,
    ) -> Result<Self, Nrf24Error<SPI::Error, DO::Error>> {
        let mut link = Self::new(radio, config);
        link.configure()?;
        Ok(link)
    }
}

impl<SPI, DO, DELAY, SINK> Link<SPI, DO, DELAY, SINK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    SINK: DiagnosticSink,
{
    /// Replace the diagnostic sink.
    pub fn with_sink<S: DiagnosticSink>(self, sink: S) -> Link<SPI, DO, DELAY, S> {
        Link {
            radio: self.radio,
            config: self.config,
            sink,
        }
    }

    fn configure(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let config = self.config;
        self.radio.init()?;
        self.radio.set_rf_parameters(
            config.data_rate(),
            config.pa_level(),
            config.lna_enable(),
        )?;
        self.radio.set_channel(config.channel())?;
        self.radio.clear_status()?;
        self.radio.flush_rx()?;
        self.radio.flush_tx()?;
        self.radio.set_payload_size(0, config.payload_size())?;
        self.radio.set_payload_size(1, config.payload_size())?;
        self.radio
            .set_retransmit(config.retransmit_count(), config.retransmit_delay())?;
        self.radio.power_up()?;
        self.sink.record(LinkEvent::Initialized {
            address_width: self.radio.address_width(),
        });
        Ok(())
    }

    /// Transmit `payload` (1-32 bytes) and wait for the outcome.
    ///
    /// Returns `Ok(true)` when the payload was acknowledged and `Ok(false)` when the
    /// radio gave up after [`RadioConfig::retransmit_count()`] retries.
    /// [`Nrf24Error::HardwareTimeout`] is returned if the radio reports neither
    /// within [`RadioConfig::ack_timeout_ms()`].
    ///
    /// Whatever the outcome, the radio is put back in standby with both FIFOs flushed.
    /// The payload is sent as given; a receiver with a larger static payload size
    /// will not accept it.
    pub fn write(&mut self, payload: &[u8]) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        self.radio.write_payload(payload)?;
        self.sink.record(LinkEvent::PayloadLoaded {
            len: payload.len() as u8,
        });
        self.radio.set_mode_tx()?;
        // falling edge ends the CE pulse
        self.radio.disable()?;

        let outcome = self.wait_for_ack();
        let standby = self.radio.standby();
        let sent = outcome?;
        standby?;
        Ok(sent)
    }

    fn wait_for_ack(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        let interval = self.config.poll_interval_ms();
        let mut waited_ms = 0u32;
        loop {
            let status = self.radio.status()?;
            self.sink.record(LinkEvent::StatusPolled(status));
            if status.max_rt() {
                self.sink.record(LinkEvent::MaxRetransmits);
                return Ok(false);
            }
            if status.tx_ds() {
                self.sink.record(LinkEvent::Sent);
                return Ok(true);
            }
            if waited_ms >= self.config.ack_timeout_ms() {
                self.sink.record(LinkEvent::AckTimeout { waited_ms });
                return Err(Nrf24Error::HardwareTimeout);
            }
            self.radio.delay_ms(interval);
            waited_ms = waited_ms.saturating_add(interval);
        }
    }

    /// Switch to RX mode and take one payload of `buf.len()` bytes (1-32) if one is waiting.
    ///
    /// Returns `Ok(false)` without touching `buf` if the RX FIFO is empty.
    /// Unlike [`Link::write()`], the radio is left listening.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        if buf.is_empty() || buf.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.radio.set_mode_rx()?;
        if self.radio.is_rx_empty()? {
            return Ok(false);
        }
        // STATUS shifted out with FIFO_STATUS names the pipe
        let pipe = self.radio.last_status().pipe();
        self.radio.read_payload(buf)?;
        self.sink.record(LinkEvent::Received {
            len: buf.len() as u8,
            pipe,
        });
        Ok(true)
    }

    /// Is there a payload in the RX FIFO? The mode is not changed.
    pub fn has_payload(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        Ok(!self.radio.is_rx_empty()?)
    }

    /// See [`EsbPipe::set_tx_address()`].
    pub fn set_tx_address(
        &mut self,
        address: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.radio.set_tx_address(address)
    }

    /// See [`EsbPipe::set_rx_address()`].
    pub fn set_rx_address(
        &mut self,
        pipe: u8,
        address: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.radio.set_rx_address(pipe, address)
    }

    /// Power up and start listening. See [`Nrf24l01::ready_rx()`].
    pub fn listen(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.radio.ready_rx()
    }

    /// Stop listening and get pipe 0 ready for ACK packets. See [`Nrf24l01::ready_tx()`].
    pub fn prepare_tx(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.radio.ready_tx()
    }

    /// Read all registers, pass the snapshot to the sink and return it.
    pub fn details(&mut self) -> Result<RegisterDump, Nrf24Error<SPI::Error, DO::Error>> {
        let dump = self.radio.details()?;
        self.sink.record(LinkEvent::Details(dump));
        Ok(dump)
    }

    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    pub fn sink(&self) -> &SINK {
        &self.sink
    }

    pub fn radio(&self) -> &Nrf24l01<SPI, DO, DELAY> {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut Nrf24l01<SPI, DO, DELAY> {
        &mut self.radio
    }

    /// Give back the radio and the sink.
    pub fn release(self) -> (Nrf24l01<SPI, DO, DELAY>, SINK) {
        (self.radio, self.sink)
    }
}
