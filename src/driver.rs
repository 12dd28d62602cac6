//! Blocking APDS-9922 driver.
//!
//! Each driver owns its own [`embassy_sync::mutex::Mutex`]. The raw mutex
//! only protects the lock flag; the register sequence itself runs outside any
//! critical section, so two sensors never wait on each other. A blocking
//! caller spins on the lock with [`embassy_futures::block_on`] until the
//! operation in flight on the same device returns.

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::mutex::Mutex;
use embedded_hal::i2c::I2c;

use crate::bus::{I2cBus, RegisterBus};
use crate::device::{DeviceCore, State};
use crate::error::{AttachError, Error};
use crate::reading::{Channel, PartId, Reading, StatusInfo};

/// High-level APDS-9922 driver
///
/// Calls from an interrupt handler that may preempt another operation on the
/// same device should use [`try_read_als`](Self::try_read_als) and
/// [`try_read_proximity`](Self::try_read_proximity), which fail with
/// [`Error::Busy`] instead of spinning.
pub struct Apds9922<BUS, M: RawMutex = CriticalSectionRawMutex> {
    core: Mutex<M, DeviceCore<BUS>>,
}

impl<I2C: I2c> Apds9922<I2cBus<I2C>> {
    /// Create an unconfigured driver on the default I2C address
    pub fn new(i2c: I2C) -> Self {
        Self::with_bus(I2cBus::new(i2c))
    }

    /// Create a driver on the default I2C address and configure the part
    pub fn attach(i2c: I2C) -> Result<Self, AttachError<I2cBus<I2C>, I2C::Error>> {
        Self::attach_bus(I2cBus::new(i2c))
    }
}

impl<BUS, M: RawMutex> Apds9922<BUS, M> {
    /// Create an unconfigured driver on any register bus
    pub fn with_bus(bus: BUS) -> Self {
        Self {
            core: Mutex::new(DeviceCore::new(bus)),
        }
    }

    /// Destroy the driver and return the bus
    pub fn detach(self) -> BUS {
        self.core.into_inner().release()
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.guarded(|core| core.state())
    }

    /// Last successful ALS reading, without bus traffic
    pub fn last_als(&self) -> Option<u32> {
        self.guarded(|core| core.last_als())
    }

    /// Last successful proximity reading, without bus traffic
    pub fn last_proximity(&self) -> Option<i16> {
        self.guarded(|core| core.last_proximity())
    }

    fn guarded<T>(&self, op: impl FnOnce(&mut DeviceCore<BUS>) -> T) -> T {
        let mut core = block_on(self.core.lock());
        op(&mut *core)
    }
}

impl<BUS: RegisterBus, M: RawMutex> Apds9922<BUS, M> {
    /// Create a driver and run [`initialize`](Self::initialize).
    ///
    /// On failure the part may be partially configured; the bus is returned
    /// inside the error.
    pub fn attach_bus(bus: BUS) -> Result<Self, AttachError<BUS, BUS::Error>> {
        let device = Self::with_bus(bus);
        match device.initialize() {
            Ok(()) => {
                #[cfg(feature = "defmt-03")]
                defmt::info!("apds9922 chip found");
                Ok(device)
            }
            Err(error) => Err(AttachError {
                error,
                bus: device.detach(),
            }),
        }
    }

    /// Write the fixed configuration: ALS and proximity enabled, LED drive,
    /// measurement rates and ALS gain.
    ///
    /// Stops at the first failed write and leaves the device [`State::Failed`].
    /// Does nothing when the device is already [`State::Ready`].
    pub fn initialize(&self) -> Result<(), Error<BUS::Error>> {
        self.guarded(DeviceCore::initialize)
    }

    /// Read the raw 24-bit ALS count
    pub fn read_als(&self) -> Result<u32, Error<BUS::Error>> {
        self.guarded(DeviceCore::read_als)
    }

    /// Read the raw 24-bit ALS count, failing if the device is in use
    pub fn try_read_als(&self) -> Result<u32, Error<BUS::Error>> {
        let mut core = self.core.try_lock().map_err(|_| Error::Busy)?;
        core.read_als()
    }

    /// Read the raw proximity count
    pub fn read_proximity(&self) -> Result<i16, Error<BUS::Error>> {
        self.guarded(DeviceCore::read_proximity)
    }

    /// Read the raw proximity count, failing if the device is in use
    pub fn try_read_proximity(&self) -> Result<i16, Error<BUS::Error>> {
        let mut core = self.core.try_lock().map_err(|_| Error::Busy)?;
        core.read_proximity()
    }

    /// Read either channel as a tagged [`Reading`]
    pub fn read(&self, channel: Channel) -> Result<Reading, Error<BUS::Error>> {
        self.guarded(|core| core.read_channel(channel))
    }

    /// Read and decode MAIN_STATUS
    pub fn read_status(&self) -> Result<StatusInfo, Error<BUS::Error>> {
        self.guarded(DeviceCore::read_status)
    }

    /// Read the part number and revision. Allowed in any state.
    pub fn read_part_id(&self) -> Result<PartId, Error<BUS::Error>> {
        self.guarded(DeviceCore::read_part_id)
    }
}
