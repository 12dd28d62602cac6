//! Per-instance device state and the register protocols run under the guard

use crate::bus::RegisterBus;
use crate::error::Error;
use crate::reading::{
    compose_als, compose_proximity, Channel, PartId, Reading, StatusInfo, ALS_LEN, PRX_LEN,
};
use crate::register::{ALS_DATA, INIT_SEQUENCE, MAIN_STATUS, PART_ID, PRX_DATA};

/// Lifecycle of one sensor instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum State {
    /// Attached, nothing written yet
    Uninitialized,
    /// Configuration writes in progress, or interrupted
    Initializing,
    /// Configured; channels may be read
    Ready,
    /// A configuration write failed. Terminal.
    Failed,
}

/// Everything the guard protects: the bus, the lifecycle state and the
/// last readings.
#[derive(Debug)]
pub(crate) struct DeviceCore<BUS> {
    bus: BUS,
    state: State,
    last_als: Option<u32>,
    last_proximity: Option<i16>,
}

impl<BUS> DeviceCore<BUS> {
    pub(crate) const fn new(bus: BUS) -> Self {
        Self {
            bus,
            state: State::Uninitialized,
            last_als: None,
            last_proximity: None,
        }
    }

    pub(crate) const fn state(&self) -> State {
        self.state
    }

    pub(crate) const fn last_als(&self) -> Option<u32> {
        self.last_als
    }

    pub(crate) const fn last_proximity(&self) -> Option<i16> {
        self.last_proximity
    }

    #[cfg_attr(not(any(test, feature = "async")), allow(dead_code))]
    pub(crate) fn bus_mut(&mut self) -> &mut BUS {
        &mut self.bus
    }

    pub(crate) fn release(self) -> BUS {
        self.bus
    }

    pub(crate) fn require_ready<E>(&self) -> Result<(), Error<E>> {
        match self.state {
            State::Ready => Ok(()),
            state => Err(Error::InvalidState(state)),
        }
    }

    /// Returns `false` when there is nothing to do.
    pub(crate) fn begin_initialize<E>(&mut self) -> Result<bool, Error<E>> {
        match self.state {
            State::Ready => Ok(false),
            State::Failed => Err(Error::InvalidState(State::Failed)),
            State::Uninitialized | State::Initializing => {
                self.state = State::Initializing;
                Ok(true)
            }
        }
    }

    pub(crate) fn finish_initialize<E>(
        &mut self,
        result: Result<(), Error<E>>,
    ) -> Result<(), Error<E>> {
        match result {
            Ok(()) => {
                self.state = State::Ready;
                #[cfg(feature = "defmt-03")]
                defmt::info!("apds9922 initialized");
            }
            Err(_) => {
                self.state = State::Failed;
                #[cfg(feature = "defmt-03")]
                defmt::error!("apds9922 initialization failed, device unusable");
            }
        }
        result
    }

    pub(crate) fn record_als(&mut self, bytes: [u8; ALS_LEN]) -> u32 {
        let value = compose_als(bytes);
        self.last_als = Some(value);
        value
    }

    pub(crate) fn record_proximity(&mut self, bytes: [u8; PRX_LEN]) -> i16 {
        let value = compose_proximity(bytes);
        self.last_proximity = Some(value);
        value
    }
}

pub(crate) fn write_failed<E>(register: u8, source: E) -> Error<E> {
    #[cfg(feature = "defmt-03")]
    defmt::warn!("write to register {=u8:#x} failed", register);
    Error::Write { register, source }
}

pub(crate) fn read_failed<E>(register: u8, source: E) -> Error<E> {
    #[cfg(feature = "defmt-03")]
    defmt::warn!("read of register {=u8:#x} failed", register);
    Error::Read { register, source }
}

impl<BUS: RegisterBus> DeviceCore<BUS> {
    pub(crate) fn initialize(&mut self) -> Result<(), Error<BUS::Error>> {
        if !self.begin_initialize()? {
            return Ok(());
        }
        let result = self.write_init_sequence();
        self.finish_initialize(result)
    }

    fn write_init_sequence(&mut self) -> Result<(), Error<BUS::Error>> {
        for (register, value) in INIT_SEQUENCE {
            self.bus
                .write_register(register, value)
                .map_err(|source| write_failed(register, source))?;
        }
        Ok(())
    }

    pub(crate) fn read_als(&mut self) -> Result<u32, Error<BUS::Error>> {
        self.require_ready()?;
        let bytes = self.read_registers(ALS_DATA)?;
        Ok(self.record_als(bytes))
    }

    pub(crate) fn read_proximity(&mut self) -> Result<i16, Error<BUS::Error>> {
        self.require_ready()?;
        let bytes = self.read_registers(PRX_DATA)?;
        Ok(self.record_proximity(bytes))
    }

    pub(crate) fn read_channel(
        &mut self,
        channel: Channel,
    ) -> Result<Reading, Error<BUS::Error>> {
        match channel {
            Channel::Als => self.read_als().map(Reading::Als),
            Channel::Proximity => self.read_proximity().map(Reading::Proximity),
        }
    }

    pub(crate) fn read_status(&mut self) -> Result<StatusInfo, Error<BUS::Error>> {
        self.require_ready()?;
        let [status] = self.read_registers([MAIN_STATUS])?;
        Ok(StatusInfo::from(status))
    }

    pub(crate) fn read_part_id(&mut self) -> Result<PartId, Error<BUS::Error>> {
        let [id] = self.read_registers([PART_ID])?;
        Ok(PartId::from(id))
    }

    /// Reads `registers` one at a time, in order, stopping at the first failure.
    fn read_registers<const N: usize>(
        &mut self,
        registers: [u8; N],
    ) -> Result<[u8; N], Error<BUS::Error>> {
        let mut bytes = [0u8; N];
        for (byte, register) in bytes.iter_mut().zip(registers) {
            *byte = self
                .bus
                .read_register(register)
                .map_err(|source| read_failed(register, source))?;
        }
        Ok(bytes)
    }
}
