use bitfield_struct::bitfield;

/// The CONFIG register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    /// Mask the "RX Data Ready" IRQ event.
    pub mask_rx_dr: bool,

    /// Mask the "TX Data Sent" IRQ event.
    pub mask_tx_ds: bool,

    /// Mask the "Max Retransmits" IRQ event.
    pub mask_max_rt: bool,

    pub en_crc: bool,

    /// `false` for a 1 byte CRC, `true` for 2 bytes.
    pub crco: bool,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    /// CRC enabled with a 2 byte encoding scheme, powered down as TX.
    pub(crate) const CRC_16: u8 = 0x0C;

    /// The CRC length in bytes, 0 if disabled.
    pub const fn crc_bytes(&self) -> u8 {
        if self.en_crc() {
            self.crco() as u8 + 1
        } else {
            0
        }
    }
}

/// The SETUP_RETR register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4)]
    pub arc: u8,
}

impl SetupRetry {
    /// The delay between attempts in microseconds.
    pub const fn delay_us(&self) -> u16 {
        self.ard() as u16 * 250 + 250
    }
}
