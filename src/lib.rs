#![doc = include_str!("../README.md")]
//!
//! ## Register driver API
//!
//! - [`Nrf24l01::new()`](fn@crate::radio::Nrf24l01::new)
//! - [`bus::framed()`](fn@crate::bus::framed)
//! - [`Nrf24l01::init()`](radio/struct.Nrf24l01.html#method.init)
//! - [`Nrf24l01::read_register()`](fn@crate::radio::Nrf24l01::read_register)
//! - [`Nrf24l01::write_register()`](fn@crate::radio::Nrf24l01::write_register)
//! - [`Nrf24l01::set_rf_parameters()`](radio/struct.Nrf24l01.html#method.set_rf_parameters)
//! - [`Nrf24l01::set_channel()`](radio/struct.Nrf24l01.html#method.set_channel)
//! - [`Nrf24l01::set_retransmit()`](radio/struct.Nrf24l01.html#method.set_retransmit)
//! - [`Nrf24l01::set_payload_size()`](radio/struct.Nrf24l01.html#method.set_payload_size)
//! - [`Nrf24l01::set_rx_address()`](radio/struct.Nrf24l01.html#method.set_rx_address)
//! - [`Nrf24l01::set_tx_address()`](radio/struct.Nrf24l01.html#method.set_tx_address)
//! - [`Nrf24l01::power_up()`](radio/struct.Nrf24l01.html#method.power_up)
//! - [`Nrf24l01::power_down()`](radio/struct.Nrf24l01.html#method.power_down)
//! - [`Nrf24l01::set_mode_rx()`](radio/struct.Nrf24l01.html#method.set_mode_rx)
//! - [`Nrf24l01::set_mode_tx()`](radio/struct.Nrf24l01.html#method.set_mode_tx)
//! - [`Nrf24l01::standby()`](radio/struct.Nrf24l01.html#method.standby)
//! - [`Nrf24l01::flush_rx()`](radio/struct.Nrf24l01.html#method.flush_rx)
//! - [`Nrf24l01::flush_tx()`](radio/struct.Nrf24l01.html#method.flush_tx)
//! - [`Nrf24l01::read_payload()`](radio/struct.Nrf24l01.html#method.read_payload)
//! - [`Nrf24l01::write_payload()`](radio/struct.Nrf24l01.html#method.write_payload)
//! - [`Nrf24l01::status()`](radio/struct.Nrf24l01.html#method.status)
//! - [`Nrf24l01::clear_status()`](radio/struct.Nrf24l01.html#method.clear_status)
//! - [`Nrf24l01::details()`](radio/struct.Nrf24l01.html#method.details)
//!
//! ## Link API
//!
//! - [`Link::initialize()`](fn@crate::link::Link::initialize)
//! - [`Link::write()`](fn@crate::link::Link::write)
//! - [`Link::read()`](fn@crate::link::Link::read)
//! - [`Link::has_payload()`](fn@crate::link::Link::has_payload)
//! - [`Link::listen()`](fn@crate::link::Link::listen)
//! - [`Link::prepare_tx()`](fn@crate::link::Link::prepare_tx)
//!
#![no_std]

mod types;
pub use types::{DataRate, FifoStatus, Mode, PaLevel, StatusFlags};
pub mod bus;
pub mod link;
pub mod radio;
