use crate::radio::rf24::bit_fields::SetupRetry;
use crate::{DataRate, PaLevel};

/// An object to configure the radio and the link layer built on top of it.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use nrf24_link::radio::RadioConfig;
///
/// let config = RadioConfig::default().with_channel(76);
/// assert_eq!(config.channel(), 76);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) retransmit: SetupRetry,
    data_rate: DataRate,
    pa_level: PaLevel,
    lna_enable: bool,
    channel: u8,
    payload_size: u8,
    poll_interval_ms: u32,
    ack_timeout_ms: u32,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with the link defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Min`] |
    /// | [`RadioConfig::lna_enable()`] | `true` |
    /// | [`RadioConfig::channel()`] | `42` |
    /// | [`RadioConfig::payload_size()`] | `32` |
    /// | [`RadioConfig::retransmit_count()`] | `10` |
    /// | [`RadioConfig::retransmit_delay()`] | `5` (1500 microseconds) |
    /// | [`RadioConfig::poll_interval_ms()`] | `100` |
    /// | [`RadioConfig::ack_timeout_ms()`] | `2000` |
    fn default() -> Self {
        Self {
            retransmit: SetupRetry::new().with_ard(5).with_arc(10),
            data_rate: DataRate::Mbps1,
            pa_level: PaLevel::Min,
            lna_enable: true,
            channel: 42,
            payload_size: 32,
            poll_interval_ms: 100,
            ack_timeout_ms: 2000,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplifier (PA) level.
    pub fn with_pa_level(self, pa_level: PaLevel) -> Self {
        Self { pa_level, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_lna_enable()`].
    pub const fn lna_enable(&self) -> bool {
        self.lna_enable
    }

    /// Enable or disable the chip's Low Noise Amplifier (LNA) gain.
    pub fn with_lna_enable(self, lna_enable: bool) -> Self {
        Self { lna_enable, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The RF channel. This value is clamped to range [0, 127].
    pub fn with_channel(self, channel: u8) -> Self {
        Self {
            channel: channel.min(127),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_payload_size()`].
    pub const fn payload_size(&self) -> u8 {
        self.payload_size
    }

    /// The static payload size used on pipes 0 and 1.
    ///
    /// This value is clamped to range [1, 32].
    pub fn with_payload_size(self, size: u8) -> Self {
        Self {
            payload_size: size.clamp(1, 32),
            ..self
        }
    }

    /// Returns the count set by [`RadioConfig::with_retransmit()`].
    pub const fn retransmit_count(&self) -> u8 {
        self.retransmit.arc()
    }

    /// Returns the delay set by [`RadioConfig::with_retransmit()`].
    pub const fn retransmit_delay(&self) -> u8 {
        self.retransmit.ard()
    }

    /// The automatic retransmission `count` and `delay` (in steps of 250 microseconds).
    ///
    /// Both values are clamped to range [0, 15].
    pub fn with_retransmit(self, count: u8, delay: u8) -> Self {
        Self {
            retransmit: SetupRetry::new()
                .with_arc(count.min(15))
                .with_ard(delay.min(15)),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_poll_interval_ms()`].
    pub const fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }

    /// The time (in milliseconds) to wait between STATUS polls while
    /// waiting for an acknowledgement. A value of 0 is raised to 1.
    pub fn with_poll_interval_ms(self, interval: u32) -> Self {
        Self {
            poll_interval_ms: interval.max(1),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_ack_timeout_ms()`].
    pub const fn ack_timeout_ms(&self) -> u32 {
        self.ack_timeout_ms
    }

    /// The upper bound (in milliseconds) on the wait for an acknowledgement.
    ///
    /// This only matters if the radio never reports either outcome
    /// (for instance when it was disconnected). Keep it well above
    /// `retransmit_count * retransmit delay`.
    pub fn with_ack_timeout_ms(self, timeout: u32) -> Self {
        Self {
            ack_timeout_ms: timeout,
            ..self
        }
    }
}
