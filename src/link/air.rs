//! A register-level model of nRF24L01 chips sharing one channel,
//! used to run [`Link`](super::Link)s against each other.
extern crate std;

use core::{cell::RefCell, convert::Infallible};
use embedded_hal::{
    digital::{ErrorType as PinErrorType, OutputPin},
    spi::{ErrorType as SpiErrorType, Operation, SpiDevice},
};
use embedded_hal_mock::eh1::delay::NoopDelay;
use std::{collections::VecDeque, rc::Rc, vec::Vec};

use super::Link;
use crate::radio::{commands, mnemonics, registers, Nrf24l01, RadioConfig};

const FIFO_DEPTH: usize = 3;
const FLAGS: u8 = 0x70;
const RX_DR: u8 = 0x40;
const TX_DS: u8 = 0x20;
const MAX_RT: u8 = 0x10;

struct Chip {
    regs: [u8; 0x1E],
    rx_addr_p0: [u8; 5],
    rx_addr_p1: [u8; 5],
    tx_addr: [u8; 5],
    flags: u8,
    ce: bool,
    rx_fifo: VecDeque<(u8, Vec<u8>)>,
    tx_fifo: VecDeque<Vec<u8>>,
}

impl Chip {
    fn new() -> Self {
        let mut regs = [0u8; 0x1E];
        regs[registers::CONFIG as usize] = 0x08;
        regs[registers::EN_AA as usize] = 0x3F;
        regs[registers::EN_RXADDR as usize] = 0x03;
        regs[registers::SETUP_AW as usize] = 0x03;
        regs[registers::SETUP_RETR as usize] = 0x03;
        regs[registers::RF_CH as usize] = 0x02;
        regs[registers::RF_SETUP as usize] = 0x0E;
        for (pipe, lsb) in (2..6u8).zip(0xC3u8..) {
            regs[(registers::RX_ADDR_P0 + pipe) as usize] = lsb;
        }
        Self {
            regs,
            rx_addr_p0: [0xE7; 5],
            rx_addr_p1: [0xC2; 5],
            tx_addr: [0xE7; 5],
            flags: 0,
            ce: false,
            rx_fifo: VecDeque::new(),
            tx_fifo: VecDeque::new(),
        }
    }

    fn width(&self) -> usize {
        self.regs[registers::SETUP_AW as usize] as usize + 2
    }

    fn config(&self) -> u8 {
        self.regs[registers::CONFIG as usize]
    }

    fn listening(&self) -> bool {
        self.ce && self.config() & 3 == 3
    }

    fn transmitting(&self) -> bool {
        self.ce && self.config() & 3 == 2
    }

    fn pipe_address(&self, pipe: u8) -> [u8; 5] {
        match pipe {
            0 => self.rx_addr_p0,
            1 => self.rx_addr_p1,
            _ => {
                let mut address = self.rx_addr_p1;
                address[0] = self.regs[(registers::RX_ADDR_P0 + pipe) as usize];
                address
            }
        }
    }

    /// The pipe that accepts `payload` sent to `address`, if any.
    fn accepts(&self, channel: u8, address: &[u8], payload: &[u8]) -> Option<u8> {
        if !self.listening()
            || self.regs[registers::RF_CH as usize] != channel
            || self.width() != address.len()
            || self.rx_fifo.len() >= FIFO_DEPTH
        {
            return None;
        }
        (0..6u8).find(|&pipe| {
            self.regs[registers::EN_RXADDR as usize] & (1 << pipe) != 0
                && self.pipe_address(pipe)[..address.len()] == *address
                && self.regs[(registers::RX_PW_P0 + pipe) as usize] as usize == payload.len()
        })
    }

    fn status(&self) -> u8 {
        let pipe = self.rx_fifo.front().map_or(7, |(pipe, _)| *pipe);
        self.flags | (pipe << 1) | (self.tx_fifo.len() >= FIFO_DEPTH) as u8
    }

    fn fifo_status(&self) -> u8 {
        self.rx_fifo.is_empty() as u8
            | ((self.rx_fifo.len() >= FIFO_DEPTH) as u8) << 1
            | (self.tx_fifo.is_empty() as u8) << 4
            | ((self.tx_fifo.len() >= FIFO_DEPTH) as u8) << 5
    }

    fn exchange(&mut self, buf: &mut [u8]) {
        let command = buf[0];
        buf[0] = self.status();
        let data = &mut buf[1..];
        match command {
            commands::R_RX_PAYLOAD => {
                if let Some((_, payload)) = self.rx_fifo.pop_front() {
                    for (out, byte) in data.iter_mut().zip(payload) {
                        *out = byte;
                    }
                }
            }
            commands::W_TX_PAYLOAD => {
                if self.tx_fifo.len() < FIFO_DEPTH {
                    self.tx_fifo.push_back(data.to_vec());
                }
            }
            commands::FLUSH_TX => self.tx_fifo.clear(),
            commands::FLUSH_RX => self.rx_fifo.clear(),
            commands::NOP => {}
            _ if command & 0xE0 == commands::W_REGISTER => {
                self.write(command & mnemonics::REGISTER_MASK, data)
            }
            _ if command & 0xE0 == commands::R_REGISTER => {
                self.read(command & mnemonics::REGISTER_MASK, data)
            }
            _ => {}
        }
    }

    fn read(&self, register: u8, data: &mut [u8]) {
        let address = match register {
            registers::RX_ADDR_P0 => &self.rx_addr_p0,
            registers::RX_ADDR_P1 => &self.rx_addr_p1,
            registers::TX_ADDR => &self.tx_addr,
            _ => {
                data[0] = match register {
                    registers::STATUS => self.status(),
                    registers::FIFO_STATUS => self.fifo_status(),
                    _ => self.regs[register as usize],
                };
                return;
            }
        };
        for (out, byte) in data.iter_mut().zip(address) {
            *out = *byte;
        }
    }

    fn write(&mut self, register: u8, data: &[u8]) {
        let address = match register {
            registers::RX_ADDR_P0 => &mut self.rx_addr_p0,
            registers::RX_ADDR_P1 => &mut self.rx_addr_p1,
            registers::TX_ADDR => &mut self.tx_addr,
            registers::STATUS => {
                // write 1 to clear
                self.flags &= !(data[0] & FLAGS);
                return;
            }
            _ => {
                self.regs[register as usize] = data[0];
                return;
            }
        };
        for (byte, value) in address.iter_mut().zip(data) {
            *byte = *value;
        }
    }
}

/// All chips, on the same air.
#[derive(Default)]
pub struct Ether {
    chips: Vec<Chip>,
}

impl Ether {
    /// Send everything in chip `id`'s TX FIFO, if it is in TX mode.
    ///
    /// A payload is acknowledged only when a listening chip accepts it and the
    /// sender's pipe 0 matches its TX address; otherwise MAX_RT is raised.
    fn transmit(&mut self, id: usize) {
        while self.chips[id].transmitting() && self.chips[id].flags & MAX_RT == 0 {
            let sender = &self.chips[id];
            let Some(payload) = sender.tx_fifo.front() else {
                break;
            };
            let width = sender.width();
            let address = &sender.tx_addr[..width];
            let channel = sender.regs[registers::RF_CH as usize];
            let ack_pipe_ok = sender.rx_addr_p0[..width] == *address;
            let receiver = self
                .chips
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != id)
                .find_map(|(other, chip)| {
                    chip.accepts(channel, address, payload).map(|pipe| (other, pipe))
                });
            match receiver {
                Some((other, pipe)) if ack_pipe_ok => {
                    let payload = self.chips[id].tx_fifo.pop_front().unwrap_or_default();
                    self.chips[other].rx_fifo.push_back((pipe, payload));
                    self.chips[other].flags |= RX_DR;
                    self.chips[id].flags |= TX_DS;
                }
                _ => self.chips[id].flags |= MAX_RT,
            }
        }
    }
}

pub struct AirSpi {
    ether: Rc<RefCell<Ether>>,
    id: usize,
}

impl SpiErrorType for AirSpi {
    type Error = Infallible;
}

impl SpiDevice for AirSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut ether = self.ether.borrow_mut();
        for operation in operations {
            if let Operation::TransferInPlace(buf) = operation {
                ether.chips[self.id].exchange(buf);
            }
        }
        // a CONFIG write with CE already high starts a transmission
        ether.transmit(self.id);
        Ok(())
    }
}

pub struct AirCe {
    ether: Rc<RefCell<Ether>>,
    id: usize,
}

impl PinErrorType for AirCe {
    type Error = Infallible;
}

impl OutputPin for AirCe {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.ether.borrow_mut().chips[self.id].ce = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut ether = self.ether.borrow_mut();
        ether.chips[self.id].ce = true;
        ether.transmit(self.id);
        Ok(())
    }
}

pub type AirLink = Link<AirSpi, AirCe, NoopDelay>;

/// Put a new chip on the air and bring up a [`Link`] on it.
pub fn node(ether: &Rc<RefCell<Ether>>, config: RadioConfig) -> AirLink {
    let id = {
        let mut ether = ether.borrow_mut();
        ether.chips.push(Chip::new());
        ether.chips.len() - 1
    };
    let radio = Nrf24l01::new(
        AirCe {
            ether: ether.clone(),
            id,
        },
        AirSpi {
            ether: ether.clone(),
            id,
        },
        NoopDelay,
    );
    match Link::initialize(radio, config) {
        Ok(link) => link,
        Err(e) => panic!("failed to bring up node {id}: {e:?}"),
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{node, Ether};
    use crate::{
        link::LinkEvent,
        radio::{
            prelude::{EsbFifo, EsbPipe, EsbPower, EsbStatus},
            registers, RadioConfig,
        },
        DataRate, Mode,
    };
    use core::cell::RefCell;
    use std::{rc::Rc, vec::Vec};

    fn config() -> RadioConfig {
        RadioConfig::default().with_payload_size(5)
    }

    #[test]
    fn ping_pong() {
        let ether = Rc::new(RefCell::new(Ether::default()));
        let mut node_a = node(&ether, config());
        let mut node_b = node(&ether, config());

        node_a.set_tx_address(b"11111").unwrap();
        node_a.set_rx_address(1, b"22222").unwrap();
        node_b.set_rx_address(0, b"11111").unwrap();
        node_b.set_tx_address(b"22222").unwrap();

        // B starts listening; pipe 0 gets "11111" back
        let mut buf = [0u8; 5];
        assert!(!node_b.read(&mut buf).unwrap());
        assert_eq!(node_b.radio().mode(), Mode::Rx);

        assert!(node_a.write(b"PING!").unwrap());
        assert_eq!(node_a.radio().mode(), Mode::Standby);
        assert!(node_b.has_payload().unwrap());
        assert!(node_b.read(&mut buf).unwrap());
        assert_eq!(&buf, b"PING!");

        // and back, on A's pipe 1
        assert!(!node_a.read(&mut buf).unwrap());
        assert!(node_b.write(b"PONG!").unwrap());
        assert!(node_a.read(&mut buf).unwrap());
        assert_eq!(&buf, b"PONG!");
    }

    #[test]
    fn no_listener() {
        let ether = Rc::new(RefCell::new(Ether::default()));
        let mut node_a = node(&ether, config());
        let _node_b = node(&ether, config());
        node_a.set_tx_address(b"11111").unwrap();

        assert!(!node_a.write(b"PING!").unwrap());
        let radio = node_a.radio_mut();
        assert_eq!(radio.mode(), Mode::Standby);
        assert!(radio.is_tx_empty().unwrap());
        let status = radio.status().unwrap();
        assert!(!status.max_rt());
        assert!(!status.tx_ds());
    }

    #[test]
    fn wrong_payload_size_is_not_acknowledged() {
        let ether = Rc::new(RefCell::new(Ether::default()));
        let mut node_a = node(&ether, config());
        let mut node_b = node(&ether, RadioConfig::default());
        node_a.set_tx_address(b"11111").unwrap();
        node_b.set_rx_address(0, b"11111").unwrap();

        let mut buf = [0u8; 32];
        assert!(!node_b.read(&mut buf).unwrap());
        // B expects 32 bytes
        assert!(!node_a.write(b"PING!").unwrap());
        assert!(!node_b.has_payload().unwrap());
    }

    #[test]
    fn tx_address_reads_back() {
        let ether = Rc::new(RefCell::new(Ether::default()));
        let mut node_a = node(&ether, config());
        for address in [b"11111", b"Node1", &[0u8, 1, 2, 3, 4]] {
            node_a.set_tx_address(address).unwrap();
            let radio = node_a.radio_mut();
            let mut read_back = [0u8; 5];
            radio
                .read_registers(registers::TX_ADDR, &mut read_back)
                .unwrap();
            assert_eq!(&read_back, address);
            radio
                .read_registers(registers::RX_ADDR_P0, &mut read_back)
                .unwrap();
            assert_eq!(&read_back, address);
            assert_eq!(radio.tx_address(), address);
        }
    }

    #[test]
    fn pipes_share_high_bytes() {
        let ether = Rc::new(RefCell::new(Ether::default()));
        let mut node_a = node(&ether, config());
        let mut events = Vec::new();
        let mut node_b = node(&ether, config()).with_sink(|event: LinkEvent| events.push(event));

        node_b.set_rx_address(1, b"22222").unwrap();
        node_b.set_rx_address(3, b"3xxxx").unwrap();
        node_b.radio_mut().set_payload_size(3, 5).unwrap();

        let mut pipe1 = [0u8; 5];
        node_b
            .radio_mut()
            .read_registers(registers::RX_ADDR_P1, &mut pipe1)
            .unwrap();
        assert_eq!(&pipe1, b"22222");
        let dump = node_b.details().unwrap();
        assert_eq!(&dump.rx_address(3), b"32222");
        assert_eq!(dump.en_rxaddr & 0x0B, 0x0B);

        node_a.set_tx_address(b"32222").unwrap();
        let mut buf = [0u8; 5];
        assert!(!node_b.read(&mut buf).unwrap());
        assert!(node_a.write(b"PING!").unwrap());
        assert!(node_b.read(&mut buf).unwrap());
        drop(node_b);
        assert_eq!(
            events.last(),
            Some(&LinkEvent::Received {
                len: 5,
                pipe: Some(3)
            })
        );
    }

    #[test]
    fn details_after_initialize() {
        let ether = Rc::new(RefCell::new(Ether::default()));
        let config = config().with_channel(76).with_data_rate(DataRate::Kbps250);
        let mut node_a = node(&ether, config);
        let dump = node_a.details().unwrap();
        assert_eq!(dump.rf_ch, 76);
        assert_eq!(dump.data_rate(), DataRate::Kbps250);
        assert!(dump.lna_enabled());
        assert_eq!(dump.payload_size[..2], [5, 5]);
        assert_eq!(dump.setup_retr, 0x5A);
        assert_eq!(dump.config, 0x0E);
        assert_eq!(dump.address_width, 5);
        assert!(node_a.radio().is_powered());
    }
}
