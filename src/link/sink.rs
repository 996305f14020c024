use crate::{radio::RegisterDump, StatusFlags};

/// Something that happened inside [`Link`](struct@crate::link::Link).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkEvent {
    /// [`Link::initialize()`](fn@crate::link::Link::initialize) finished.
    Initialized {
        /// The address width (in bytes) read back from the radio.
        address_width: u8,
    },
    /// A payload was loaded into the TX FIFO.
    PayloadLoaded {
        /// The payload length in bytes.
        len: u8,
    },
    /// The STATUS register was polled while waiting for an acknowledgement.
    StatusPolled(StatusFlags),
    /// The payload was acknowledged.
    Sent,
    /// The radio gave up after the configured number of retries.
    MaxRetransmits,
    /// Neither outcome was reported before the acknowledgement timeout.
    AckTimeout {
        /// Milliseconds spent polling.
        waited_ms: u32,
    },
    /// A payload was read from the RX FIFO.
    Received {
        /// The number of bytes read.
        len: u8,
        /// The pipe the payload arrived on, if the radio reported one.
        pipe: Option<u8>,
    },
    /// A snapshot of the radio's registers.
    Details(RegisterDump),
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for LinkEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LinkEvent::Initialized { address_width } => {
                defmt::write!(fmt, "initialized, address width {=u8}", *address_width)
            }
            LinkEvent::PayloadLoaded { len } => defmt::write!(fmt, "loaded {=u8} bytes", *len),
            LinkEvent::StatusPolled(status) => defmt::write!(fmt, "{}", status),
            LinkEvent::Sent => defmt::write!(fmt, "sent"),
            LinkEvent::MaxRetransmits => defmt::write!(fmt, "max retransmits"),
            LinkEvent::AckTimeout { waited_ms } => {
                defmt::write!(fmt, "no ACK after {=u32} ms", *waited_ms)
            }
            LinkEvent::Received { len, pipe } => {
                defmt::write!(fmt, "received {=u8} bytes on pipe {}", *len, pipe)
            }
            LinkEvent::Details(dump) => defmt::write!(fmt, "{}", dump),
        }
    }
}

/// A receiver for [`LinkEvent`]s.
///
/// Any `FnMut(LinkEvent)` closure is a sink.
pub trait DiagnosticSink {
    fn record(&mut self, event: LinkEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&mut self, _event: LinkEvent) {}
}

impl<F: FnMut(LinkEvent)> DiagnosticSink for F {
    fn record(&mut self, event: LinkEvent) {
        self(event)
    }
}

/// Forwards events to the `defmt` logger.
///
/// Failures (max retransmits, timeouts) are logged as warnings, everything else as debug.
#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl DiagnosticSink for DefmtSink {
    fn record(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::MaxRetransmits | LinkEvent::AckTimeout { .. } => defmt::warn!("{}", event),
            _ => defmt::debug!("{}", event),
        }
    }
}
