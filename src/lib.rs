//! # APDS-9922 Ambient Light and Proximity Sensor Driver
//!
//! This is a platform-agnostic Rust driver for the Broadcom APDS-9922 digital
//! ambient light (ALS) and proximity sensor, built using the [`embedded-hal`]
//! traits for I2C communication.
//!
//! The driver:
//! - Brings the part up with a fixed configuration (ALS + proximity enabled,
//!   LED drive, measurement rates, ALS gain)
//! - Reads the raw 24-bit ALS count and the raw 16-bit proximity count
//! - Serializes every register sequence on one device behind a single guard,
//!   so a multi-byte reading is never assembled from two different operations
//! - Takes `&self`, so one instance can be shared between threads or tasks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apds9922::Apds9922;
//!
//! # fn main() {
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! let sensor = match Apds9922::attach(i2c) {
//!     Ok(sensor) => sensor,
//!     Err(err) => panic!("{}", err),
//! };
//!
//! let lux_count = sensor.read_als().unwrap();
//! let proximity = sensor.read_proximity().unwrap();
//! // println!("ALS: {lux_count} PRX: {proximity}");
//! # let _ = (lux_count, proximity);
//! # }
//! ```
//!
//! ## Async Usage
//!
//! Enable the `async` feature to use async/await patterns:
//!
//! ```toml
//! [dependencies]
//! apds9922 = { version = "0.1", features = ["async"] }
//! ```
//!
//! ```rust,ignore
//! use apds9922::Apds9922Async;
//!
//! let i2c = /* your async I2C implementation */;
//! let sensor = Apds9922Async::attach(i2c).await.unwrap();
//!
//! let lux_count = sensor.read_als().await.unwrap();
//! // fails with Error::Busy instead of waiting for another task
//! let proximity = sensor.try_read_proximity().await;
//! ```
//!
//! ## Proximity sign
//!
//! Proximity is reported as `i16`: the two data bytes form a two's complement
//! value, so bit 7 of `PS_DATA_1` is a sign bit. The part only drives the low
//! 11 bits, so real readings are non-negative. [`Reading::as_unsigned`] gives
//! the unsigned view of the same bits.
//!
//! ## Logging
//!
//! With the `defmt-03` feature, bus failures and bring-up are logged through
//! [`defmt`](https://crates.io/crates/defmt) and public types derive
//! `defmt::Format`.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal

#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "async")]
mod asynch;
mod bus;
mod device;
mod driver;
mod error;
mod reading;
pub mod register;

#[cfg(test)]
mod testing;

#[cfg(feature = "async")]
pub use asynch::Apds9922Async;
#[cfg(feature = "async")]
pub use bus::AsyncRegisterBus;
pub use bus::{I2cBus, RegisterBus, I2C_ADDRESS};
pub use device::State;
pub use driver::Apds9922;
pub use error::{AttachError, Error};
pub use reading::{
    compose_als, compose_proximity, Channel, PartId, Reading, StatusInfo, ALS_LEN, ALS_MAX,
    PRX_LEN,
};
