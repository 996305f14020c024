//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use nrf24_link::radio::prelude::*;
//! ```

use crate::types::{DataRate, FifoStatus, Mode, PaLevel, StatusFlags};

use super::RegisterDump;

/// A trait to represent the bring-up of a transceiver.
pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio's hardware.
    ///
    /// This drives CE low, waits for the chip to settle, enables a 2 byte CRC
    /// and reads back the configuration and address width.
    /// The radio is left in [`Mode::PowerDown`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent manipulation of the RF front end.
pub trait EsbRf {
    type RfErrorType;

    /// Write the data rate, PA level and LNA gain in a single register write.
    fn set_rf_parameters(
        &mut self,
        data_rate: DataRate,
        pa_level: PaLevel,
        lna_enable: bool,
    ) -> Result<(), Self::RfErrorType>;

    /// Set the RF channel.
    ///
    /// Only the lower 7 bits are used; the resulting frequency is
    /// `2400 + channel` MHz.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::RfErrorType>;

    /// Configure the automatic retransmission feature.
    ///
    /// Both `count` (number of attempts) and `delay` (in steps of 250
    /// microseconds, plus 250) are masked to 4 bits.
    fn set_retransmit(&mut self, count: u8, delay: u8) -> Result<(), Self::RfErrorType>;

    /// Disable automatic retransmission.
    fn disable_retransmit(&mut self) -> Result<(), Self::RfErrorType> {
        self.set_retransmit(0, 0)
    }
}

/// A trait to represent manipulation of data pipes.
pub trait EsbPipe {
    type PipeErrorType;

    /// Set the receive `address` of a `pipe` and enable that pipe.
    ///
    /// Pipes 0 and 1 take a full width address. Pipes 2-5 share the upper
    /// bytes of pipe 1's address, so only `address[0]` is written for them.
    /// The `address` length must equal [`EsbPipe::address_width()`].
    ///
    /// An address given to pipe 0 is cached and restored whenever the radio
    /// enters RX mode, because [`EsbPipe::set_tx_address()`] overwrites pipe 0.
    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the destination `address` for transmissions.
    ///
    /// The same address is written to pipe 0 so that automatic
    /// acknowledgements can be received.
    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the static payload size (0-32 bytes) for a `pipe`.
    fn set_payload_size(&mut self, pipe: u8, size: u8) -> Result<(), Self::PipeErrorType>;

    /// Disable a `pipe` by setting its payload size to 0.
    fn disable_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        self.set_payload_size(pipe, 0)
    }

    /// The address width (in bytes) read from the radio during initialization.
    fn address_width(&self) -> u8;
}

/// A trait to represent the power and mode state machine.
pub trait EsbPower {
    type PowerErrorType;

    /// Power up the radio and wait for the oscillator to settle.
    ///
    /// Leaves the radio in [`Mode::Standby`].
    fn power_up(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power down the radio and force CE low.
    ///
    /// Leaves the radio in [`Mode::PowerDown`].
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Become a primary receiver, assert CE and wait for the RX settling time.
    ///
    /// Leaves the radio in [`Mode::Rx`] if it is powered up.
    fn set_mode_rx(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Become a primary transmitter, assert CE and wait for the TX settling time.
    ///
    /// Leaves the radio in [`Mode::Tx`] if it is powered up.
    fn set_mode_tx(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Clear the status flags, drive CE low and flush both FIFOs.
    ///
    /// Leaves the radio in [`Mode::Standby`] if it is powered up.
    fn standby(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&self) -> bool;

    /// The radio's current operating state.
    fn mode(&self) -> Mode;
}

/// A trait to represent manipulation of the radio's FIFOs.
pub trait EsbFifo {
    type FifoErrorType;

    /// Discard all payloads in the RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard all payloads in the TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Read the FIFO_STATUS register.
    fn fifo_status(&mut self) -> Result<FifoStatus, Self::FifoErrorType>;

    fn is_rx_empty(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.fifo_status()?.rx_empty())
    }

    fn is_rx_full(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.fifo_status()?.rx_full())
    }

    fn is_tx_empty(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.fifo_status()?.tx_empty())
    }

    fn is_tx_full(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.fifo_status()?.tx_full())
    }

    /// Read exactly `buf.len()` bytes (1-32) from the head of the RX FIFO.
    fn read_payload(&mut self, buf: &mut [u8]) -> Result<(), Self::FifoErrorType>;

    /// Load exactly `buf.len()` bytes (1-32) into the TX FIFO.
    fn write_payload(&mut self, buf: &[u8]) -> Result<(), Self::FifoErrorType>;
}

/// A trait to represent the radio's status flags.
pub trait EsbStatus {
    type StatusErrorType;

    /// Read the STATUS register.
    fn status(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;

    /// Clear the RX_DR, TX_DS and MAX_RT flags.
    fn clear_status(&mut self) -> Result<(), Self::StatusErrorType>;

    /// The STATUS byte shifted out by the most recent SPI transaction.
    fn last_status(&self) -> StatusFlags;
}

/// A trait to represent debug output of the radio's registers.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Take a snapshot of the radio's configuration registers.
    fn details(&mut self) -> Result<RegisterDump, Self::DetailsErrorType>;
}
