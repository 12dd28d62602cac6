extern crate std;

use std::vec::Vec;

use crate::bus::RegisterBus;

/// One bus transaction as seen by the mock, failed ones included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Access {
    Read(u8),
    Write(u8, u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BusFault;

#[derive(Clone, Debug)]
pub(crate) struct MockBus {
    regs: [u8; 256],
    log: Vec<Access>,
    fail_read: Option<u8>,
    fail_write: Option<u8>,
    #[cfg_attr(not(feature = "async"), allow(dead_code))]
    stall_write: Option<u8>,
    yield_on_read: bool,
}

impl Default for MockBus {
    fn default() -> Self {
        Self {
            regs: [0u8; 256],
            log: Vec::new(),
            fail_read: None,
            fail_write: None,
            stall_write: None,
            yield_on_read: false,
        }
    }
}

impl MockBus {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    /// Next read of `reg` fails, once.
    pub(crate) fn fail_read(mut self, reg: u8) -> Self {
        self.set_fail_read(reg);
        self
    }

    pub(crate) fn set_fail_read(&mut self, reg: u8) {
        self.fail_read = Some(reg);
    }

    /// Every write to `reg` fails.
    pub(crate) fn fail_write(mut self, reg: u8) -> Self {
        self.fail_write = Some(reg);
        self
    }

    /// Next async write to `reg` returns `Pending` once before completing.
    #[cfg_attr(not(feature = "async"), allow(dead_code))]
    pub(crate) fn stall_write(mut self, reg: u8) -> Self {
        self.stall_write = Some(reg);
        self
    }

    /// Give up the time slice on every read so other threads interleave.
    pub(crate) fn yield_on_read(mut self) -> Self {
        self.yield_on_read = true;
        self
    }

    pub(crate) fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub(crate) fn log(&self) -> &[Access] {
        &self.log
    }

    pub(crate) fn clear_log(&mut self) {
        self.log.clear();
    }

    fn read(&mut self, reg: u8) -> Result<u8, BusFault> {
        self.log.push(Access::Read(reg));
        if self.fail_read == Some(reg) {
            self.fail_read = None;
            return Err(BusFault);
        }
        if self.yield_on_read {
            std::thread::yield_now();
        }
        Ok(self.regs[reg as usize])
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), BusFault> {
        self.log.push(Access::Write(reg, value));
        if self.fail_write == Some(reg) {
            return Err(BusFault);
        }
        self.regs[reg as usize] = value;
        Ok(())
    }
}

impl RegisterBus for MockBus {
    type Error = BusFault;

    fn read_register(&mut self, register: u8) -> Result<u8, BusFault> {
        self.read(register)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusFault> {
        self.write(register, value)
    }
}

#[cfg(feature = "async")]
impl crate::bus::AsyncRegisterBus for MockBus {
    type Error = BusFault;

    async fn read_register(&mut self, register: u8) -> Result<u8, BusFault> {
        self.read(register)
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusFault> {
        if self.stall_write == Some(register) {
            self.stall_write = None;
            YieldOnce(false).await;
        }
        self.write(register, value)
    }
}

#[cfg(feature = "async")]
struct YieldOnce(bool);

#[cfg(feature = "async")]
impl core::future::Future for YieldOnce {
    type Output = ();

    fn poll(
        mut self: core::pin::Pin<&mut Self>,
        cx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<()> {
        if self.0 {
            core::task::Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            core::task::Poll::Pending
        }
    }
}
