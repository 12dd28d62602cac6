//! Testing infrastructure (register-file bus with fault injection).

pub(crate) mod mock;

pub(crate) use mock::{Access, BusFault, MockBus};
