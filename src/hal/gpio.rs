//! Raspberry Pi GPIO
//!
//! Memory-mapped access to the BCM2835 GPIO block through `/dev/mem`. The
//! mapping is owned by [`BcmGpio`]: it is created in [`BcmGpio::open`] and
//! removed when the value is dropped, after the programming lines have
//! been returned to inputs.

use std::fs::{File, OpenOptions};
use std::io;
use std::num::NonZeroUsize;
use std::os::unix::fs::OpenOptionsExt;
use std::ptr::NonNull;
use std::time::Duration;

use libc::c_void;
use nix::sys::mman::{mmap, munmap, MapFlags, ProtFlags};

use crate::config::{bcm, pins};
use crate::hal::PinDriver;
use crate::types::{Channel, LogicalPin, PinDirection};

/// Length of the mapping
const BLOCK_LEN: NonZeroUsize = match NonZeroUsize::new(bcm::BLOCK_SIZE) {
    Some(len) => len,
    None => panic!("GPIO block size must be non-zero"),
};

/// BCM GPIO number wired to a logical line
#[must_use]
pub const fn physical_pin(pin: LogicalPin) -> u8 {
    match pin {
        LogicalPin::TxClk => pins::TX_CLK,
        LogicalPin::TxData => pins::TX_DATA,
        LogicalPin::TxLe => pins::TX_LE,
        LogicalPin::RxClk => pins::RX_CLK,
        LogicalPin::RxData => pins::RX_DATA,
        LogicalPin::RxLe => pins::RX_LE,
    }
}

/// BCM GPIO number of a channel's lock detect input
#[must_use]
pub const fn lock_detect_pin(channel: Channel) -> u8 {
    match channel {
        Channel::Tx => pins::TX_LD,
        Channel::Rx => pins::RX_LD,
    }
}

/// GPFSEL word and bit shift for a GPIO
#[must_use]
pub const fn fsel_slot(gpio: u8) -> (usize, u32) {
    ((gpio / 10) as usize, (gpio % 10) as u32 * 3)
}

/// Word offset and bit mask in a set/clear/level bank
#[must_use]
pub const fn bank_slot(base: usize, gpio: u8) -> (usize, u32) {
    (base + (gpio / 32) as usize, 1 << (gpio % 32))
}

/// Pull-down clock mask covering every line the board uses
#[must_use]
pub fn pull_mask() -> u32 {
    LogicalPin::ALL
        .iter()
        .map(|pin| physical_pin(*pin))
        .chain([pins::TX_LD, pins::RX_LD])
        .fold(0, |mask, gpio| mask | (1 << gpio))
}

/// Mapped BCM2835 GPIO block
pub struct BcmGpio {
    regs: NonNull<u32>,
    delay: Duration,
    _mem: File,
}

impl BcmGpio {
    /// Map the GPIO block and put every programming line in input mode
    /// with the pull-downs enabled
    ///
    /// # Errors
    ///
    /// Fails if `/dev/mem` cannot be opened (usually needs root) or the
    /// block cannot be mapped.
    pub fn open(peri_base: u64, delay: Duration) -> io::Result<Self> {
        let mem = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open("/dev/mem")
            .map_err(|e| {
                if e.kind() == io::ErrorKind::PermissionDenied {
                    io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        "Cannot open /dev/mem. Run as root or add user to the kmem group.",
                    )
                } else {
                    e
                }
            })?;

        let gpio_base = peri_base + bcm::GPIO_OFFSET;
        let offset = libc::off_t::try_from(gpio_base).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("GPIO base 0x{gpio_base:08x} does not fit in off_t"),
            )
        })?;
        // SAFETY: mapping a fresh region; nothing else in this process
        // aliases it.
        let mapped = unsafe {
            mmap(
                None,
                BLOCK_LEN,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                &mem,
                offset,
            )
        }
        .map_err(io::Error::from)?;

        log::debug!("Mapped GPIO block at 0x{gpio_base:08x}");

        let mut gpio = Self {
            regs: mapped.cast::<u32>(),
            delay,
            _mem: mem,
        };
        gpio.setup();
        Ok(gpio)
    }

    /// Level of a channel's lock detect input
    #[must_use]
    pub fn lock_detect(&self, channel: Channel) -> bool {
        let (word, mask) = bank_slot(bcm::GPLEV0, lock_detect_pin(channel));
        self.read(word) & mask != 0
    }

    fn setup(&mut self) {
        self.write(bcm::GPPUDCLK0, 0);
        self.write(bcm::GPPUD, bcm::PUD_DOWN);
        self.delay_unit();

        self.write(bcm::GPPUDCLK0, pull_mask());
        self.delay_unit();
        self.write(bcm::GPPUDCLK0, 0);
        self.delay_unit();

        for pin in LogicalPin::ALL {
            self.set_direction(pin, PinDirection::Input);
        }
    }

    fn read(&self, word: usize) -> u32 {
        debug_assert!(word * 4 < bcm::BLOCK_SIZE);
        // SAFETY: word lies inside the mapped block
        unsafe { self.regs.as_ptr().add(word).read_volatile() }
    }

    fn write(&mut self, word: usize, value: u32) {
        debug_assert!(word * 4 < bcm::BLOCK_SIZE);
        // SAFETY: word lies inside the mapped block
        unsafe { self.regs.as_ptr().add(word).write_volatile(value) }
    }
}

impl PinDriver for BcmGpio {
    fn set_level(&mut self, pin: LogicalPin, high: bool) {
        let bank = if high { bcm::GPSET0 } else { bcm::GPCLR0 };
        let (word, mask) = bank_slot(bank, physical_pin(pin));
        self.write(word, mask);
    }

    fn set_direction(&mut self, pin: LogicalPin, direction: PinDirection) {
        let (word, shift) = fsel_slot(physical_pin(pin));
        let mut fsel = self.read(word) & !(0b111 << shift);
        if direction == PinDirection::Output {
            fsel |= 0b001 << shift;
        }
        self.write(word, fsel);
    }

    fn delay_unit(&mut self) {
        std::thread::sleep(self.delay);
    }
}

impl Drop for BcmGpio {
    fn drop(&mut self) {
        for pin in LogicalPin::ALL {
            self.set_level(pin, false);
            self.set_direction(pin, PinDirection::Input);
        }

        // SAFETY: regs came from mmap with this length and is not used
        // after this point
        if let Err(e) = unsafe { munmap(self.regs.cast::<c_void>(), bcm::BLOCK_SIZE) } {
            log::warn!("munmap of GPIO block failed: {e}");
        }
    }
}
