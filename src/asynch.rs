//! Async APDS-9922 driver.
//!
//! Operations hold an [`embassy_sync::mutex::MutexGuard`] for their whole
//! register sequence. Waiting for the guard can be abandoned by dropping the
//! future; the `try_*` variants fail with [`Error::Busy`] instead of waiting.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::I2c as AsyncI2c;

use crate::bus::{AsyncRegisterBus, I2cBus};
use crate::device::{read_failed, write_failed, DeviceCore, State};
use crate::error::{AttachError, Error};
use crate::reading::{Channel, PartId, Reading, StatusInfo};
use crate::register::{ALS_DATA, INIT_SEQUENCE, MAIN_STATUS, PART_ID, PRX_DATA};

impl<BUS: AsyncRegisterBus> DeviceCore<BUS> {
    async fn initialize_async(&mut self) -> Result<(), Error<BUS::Error>> {
        if !self.begin_initialize()? {
            return Ok(());
        }
        // dropped mid-sequence, the state stays Initializing until retried
        let result = self.write_init_sequence_async().await;
        self.finish_initialize(result)
    }

    async fn write_init_sequence_async(&mut self) -> Result<(), Error<BUS::Error>> {
        for (register, value) in INIT_SEQUENCE {
            self.bus_mut()
                .write_register(register, value)
                .await
                .map_err(|source| write_failed(register, source))?;
        }
        Ok(())
    }

    async fn read_als_async(&mut self) -> Result<u32, Error<BUS::Error>> {
        self.require_ready()?;
        let bytes = self.read_registers_async(ALS_DATA).await?;
        Ok(self.record_als(bytes))
    }

    async fn read_proximity_async(&mut self) -> Result<i16, Error<BUS::Error>> {
        self.require_ready()?;
        let bytes = self.read_registers_async(PRX_DATA).await?;
        Ok(self.record_proximity(bytes))
    }

    async fn read_channel_async(
        &mut self,
        channel: Channel,
    ) -> Result<Reading, Error<BUS::Error>> {
        match channel {
            Channel::Als => self.read_als_async().await.map(Reading::Als),
            Channel::Proximity => {
                self.read_proximity_async().await.map(Reading::Proximity)
            }
        }
    }

    async fn read_status_async(&mut self) -> Result<StatusInfo, Error<BUS::Error>> {
        self.require_ready()?;
        let [status] = self.read_registers_async([MAIN_STATUS]).await?;
        Ok(StatusInfo::from(status))
    }

    async fn read_part_id_async(&mut self) -> Result<PartId, Error<BUS::Error>> {
        let [id] = self.read_registers_async([PART_ID]).await?;
        Ok(PartId::from(id))
    }

    async fn read_registers_async<const N: usize>(
        &mut self,
        registers: [u8; N],
    ) -> Result<[u8; N], Error<BUS::Error>> {
        let mut bytes = [0u8; N];
        for (byte, register) in bytes.iter_mut().zip(registers) {
            *byte = self
                .bus_mut()
                .read_register(register)
                .await
                .map_err(|source| read_failed(register, source))?;
        }
        Ok(bytes)
    }
}

/// High-level async APDS-9922 driver
pub struct Apds9922Async<BUS, M: RawMutex = CriticalSectionRawMutex> {
    core: Mutex<M, DeviceCore<BUS>>,
}

impl<I2C: AsyncI2c> Apds9922Async<I2cBus<I2C>> {
    /// Create an unconfigured driver on the default I2C address
    pub fn new(i2c: I2C) -> Self {
        Self::with_bus(I2cBus::new(i2c))
    }

    /// Create a driver on the default I2C address and configure the part
    pub async fn attach(i2c: I2C) -> Result<Self, AttachError<I2cBus<I2C>, I2C::Error>> {
        Self::attach_bus(I2cBus::new(i2c)).await
    }
}

impl<BUS, M: RawMutex> Apds9922Async<BUS, M> {
    /// Create an unconfigured driver on any async register bus
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
    pub async fn state(&self) -> State {
        self.core.lock().await.state()
    }

    /// Last successful ALS reading, without bus traffic
    pub async fn last_als(&self) -> Option<u32> {
        self.core.lock().await.last_als()
    }

    /// Last successful proximity reading, without bus traffic
    pub async fn last_proximity(&self) -> Option<i16> {
        self.core.lock().await.last_proximity()
    }
}

impl<BUS: AsyncRegisterBus, M: RawMutex> Apds9922Async<BUS, M> {
    /// Create a driver and run [`initialize`](Self::initialize)
    pub async fn attach_bus(bus: BUS) -> Result<Self, AttachError<BUS, BUS::Error>> {
        let device = Self::with_bus(bus);
        match device.initialize().await {
            Ok(()) => Ok(device),
            Err(error) => Err(AttachError {
                error,
                bus: device.detach(),
            }),
        }
    }

    /// Write the fixed configuration, see
    /// [`Apds9922::initialize`](crate::Apds9922::initialize).
    ///
    /// If the future is dropped part-way, the device stays
    /// [`State::Initializing`] and reads are refused until this is called
    /// again.
    pub async fn initialize(&self) -> Result<(), Error<BUS::Error>> {
        self.core.lock().await.initialize_async().await
    }

    /// Read the raw 24-bit ALS count
    pub async fn read_als(&self) -> Result<u32, Error<BUS::Error>> {
        self.core.lock().await.read_als_async().await
    }

    /// Read the raw 24-bit ALS count, failing if the device is in use
    pub async fn try_read_als(&self) -> Result<u32, Error<BUS::Error>> {
        let mut core = self.core.try_lock().map_err(|_| Error::Busy)?;
        core.read_als_async().await
    }

    /// Read the raw proximity count
    pub async fn read_proximity(&self) -> Result<i16, Error<BUS::Error>> {
        self.core.lock().await.read_proximity_async().await
    }

    /// Read the raw proximity count, failing if the device is in use
    pub async fn try_read_proximity(&self) -> Result<i16, Error<BUS::Error>> {
        let mut core = self.core.try_lock().map_err(|_| Error::Busy)?;
        core.read_proximity_async().await
    }

    /// Read either channel as a tagged [`Reading`]
    pub async fn read(&self, channel: Channel) -> Result<Reading, Error<BUS::Error>> {
        self.core.lock().await.read_channel_async(channel).await
    }

    /// Read and decode MAIN_STATUS
    pub async fn read_status(&self) -> Result<StatusInfo, Error<BUS::Error>> {
        self.core.lock().await.read_status_async().await
    }

    /// Read the part number and revision. Allowed in any state.
    pub async fn read_part_id(&self) -> Result<PartId, Error<BUS::Error>> {
        self.core.lock().await.read_part_id_async().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::*;
    use crate::testing::{Access, BusFault, MockBus};
    use futures::executor::block_on;
    use futures::FutureExt;
    extern crate std;
    use std::vec;

    type TestDevice = Apds9922Async<MockBus>;

    fn ready(bus: MockBus) -> TestDevice {
        let Ok(device) = block_on(TestDevice::attach_bus(bus)) else {
            panic!("attach failed");
        };
        device
    }

    #[test]
    fn attach_and_read_channels() {
        let bus = MockBus::default()
            .with_reg(LS_DATA_0, 0x10)
            .with_reg(LS_DATA_2, 0x01)
            .with_reg(PS_DATA_0, 0xFF);
        let device = ready(bus);

        assert_eq!(block_on(device.state()), State::Ready);
        assert_eq!(block_on(device.read_als()), Ok(65_552));
        assert_eq!(block_on(device.read_proximity()), Ok(255));
        assert_eq!(
            block_on(device.read(Channel::Als)),
            Ok(Reading::Als(65_552))
        );
        assert_eq!(block_on(device.last_als()), Some(65_552));
        assert_eq!(block_on(device.last_proximity()), Some(255));
    }

    #[test]
    fn attach_failure_hands_back_bus() {
        let bus = MockBus::default().fail_write(LS_MEAS_RATE);
        let err = match block_on(TestDevice::attach_bus(bus)) {
            Ok(_) => panic!("attach should fail"),
            Err(err) => err,
        };
        assert_eq!(
            err.error,
            Error::Write {
                register: LS_MEAS_RATE,
                source: BusFault
            }
        );
        assert_eq!(err.bus.log().len(), 4);
    }

    #[test]
    fn try_read_fails_while_guard_held() {
        let device = ready(MockBus::default());

        let guard = block_on(device.core.lock());
        assert_eq!(block_on(device.try_read_als()), Err(Error::Busy));
        assert_eq!(block_on(device.try_read_proximity()), Err(Error::Busy));
        // waiting read can be abandoned
        assert!(device.read_als().now_or_never().is_none());
        drop(guard);

        assert_eq!(block_on(device.try_read_als()), Ok(0));
    }

    #[test]
    fn guard_released_after_failed_read() {
        let device = ready(MockBus::default().fail_read(LS_DATA_1));

        assert_eq!(
            block_on(device.read_als()),
            Err(Error::Read {
                register: LS_DATA_1,
                source: BusFault
            })
        );
        assert_eq!(block_on(device.try_read_als()), Ok(0));
        assert_eq!(block_on(device.state()), State::Ready);
    }

    #[test]
    fn cancelled_initialize_leaves_device_initializing() {
        let device = TestDevice::with_bus(MockBus::default().stall_write(PS_MEAS_RATE));

        assert!(device.initialize().now_or_never().is_none());
        assert_eq!(block_on(device.state()), State::Initializing);
        assert_eq!(
            block_on(device.read_proximity()),
            Err(Error::InvalidState(State::Initializing))
        );

        block_on(device.initialize()).unwrap();
        assert_eq!(block_on(device.state()), State::Ready);

        let bus = device.detach();
        let mut expected = vec![Access::Write(MAIN_CTRL, 0x03), Access::Write(PS_LED, 0x36)];
        expected.extend(INIT_SEQUENCE.map(|(reg, value)| Access::Write(reg, value)));
        assert_eq!(bus.log(), expected);
    }

    #[test]
    fn part_id_before_initialize() {
        let device = TestDevice::with_bus(MockBus::default().with_reg(PART_ID, 0xB1));
        assert_eq!(
            block_on(device.read_part_id()),
            Ok(PartId {
                part: 0xB,
                revision: 0x1
            })
        );
        assert_eq!(
            block_on(device.read_status()),
            Err(Error::InvalidState(State::Uninitialized))
        );
    }
}
