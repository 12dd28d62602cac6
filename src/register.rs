//! Register map of the APDS-9922

/// Main control: ALS / proximity enable, software reset
pub const MAIN_CTRL: u8 = 0x00;
/// Proximity LED drive current and pulse frequency
pub const PS_LED: u8 = 0x01;
/// Proximity LED pulse count
pub const PS_PULSES: u8 = 0x02;
/// Proximity resolution and measurement rate
pub const PS_MEAS_RATE: u8 = 0x03;
/// ALS resolution and measurement rate
pub const LS_MEAS_RATE: u8 = 0x04;
/// ALS gain range
pub const LS_GAIN: u8 = 0x05;
/// Part number and revision
pub const PART_ID: u8 = 0x06;
/// Main status
pub const MAIN_STATUS: u8 = 0x07;
/// Proximity data, low byte
pub const PS_DATA_0: u8 = 0x08;
/// Proximity data, high byte
pub const PS_DATA_1: u8 = 0x09;
/// ALS data, low byte
pub const LS_DATA_0: u8 = 0x0D;
/// ALS data, middle byte
pub const LS_DATA_1: u8 = 0x0E;
/// ALS data, high byte
pub const LS_DATA_2: u8 = 0x0F;
/// Compensation data, low byte
pub const COMP_DATA_0: u8 = 0x16;
/// Compensation data, middle byte
pub const COMP_DATA_1: u8 = 0x17;
/// Compensation data, high byte
pub const COMP_DATA_2: u8 = 0x18;
/// Interrupt configuration
pub const INT_CFG: u8 = 0x19;
/// Interrupt persistence
pub const INT_PST: u8 = 0x1A;
/// Proximity upper threshold, low byte
pub const PS_THRES_UP_0: u8 = 0x1B;
/// Proximity upper threshold, high byte
pub const PS_THRES_UP_1: u8 = 0x1C;
/// Proximity lower threshold, low byte
pub const PS_THRES_LOW_0: u8 = 0x1D;
/// Proximity lower threshold, high byte
pub const PS_THRES_LOW_1: u8 = 0x1E;
/// Proximity cancellation, low byte
pub const PS_CAN_0: u8 = 0x1F;
/// Proximity cancellation, high byte
pub const PS_CAN_1: u8 = 0x20;
/// Device configuration
pub const DEVICE_CONFIG: u8 = 0x2F;

/// ALS data registers, least significant first
pub const ALS_DATA: [u8; 3] = [LS_DATA_0, LS_DATA_1, LS_DATA_2];

/// Proximity data registers, least significant first
pub const PRX_DATA: [u8; 2] = [PS_DATA_0, PS_DATA_1];

/// Configuration written at bring-up, in write order
pub const INIT_SEQUENCE: [(u8, u8); 5] = [
    (MAIN_CTRL, main_ctrl::PS_EN | main_ctrl::LS_EN),
    (PS_LED, 0x36),
    (PS_MEAS_RATE, 0x5D),
    (LS_MEAS_RATE, 0x22),
    (LS_GAIN, 0x01),
];

/// MAIN_CTRL bits
pub mod main_ctrl {
    /// Proximity sensor enable
    pub const PS_EN: u8 = 1 << 0;
    /// Light sensor enable
    pub const LS_EN: u8 = 1 << 1;
    /// Software reset
    pub const SW_RESET: u8 = 1 << 4;
}

/// MAIN_STATUS bits
pub mod main_status {
    /// New proximity data available
    pub const PS_DATA: u8 = 1 << 0;
    /// Proximity interrupt condition
    pub const PS_INT: u8 = 1 << 1;
    /// Proximity logic output (object near)
    pub const PS_LOGIC: u8 = 1 << 2;
    /// New ALS data available
    pub const LS_DATA: u8 = 1 << 3;
    /// ALS interrupt condition
    pub const LS_INT: u8 = 1 << 4;
    /// Power-on event since last status read
    pub const POWER_ON: u8 = 1 << 5;
}

/// What a register is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Role {
    /// Enables, status and identification
    Control,
    /// Measurement and interrupt configuration
    Configuration,
    /// Measurement results
    Data,
    /// Interrupt thresholds
    Threshold,
    /// Compensation and cancellation
    Calibration,
}

/// A named register of the part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RegisterSpec {
    /// Register name as in the datasheet
    pub name: &'static str,
    /// 8-bit register address
    pub address: u8,
    /// What the register is used for
    pub role: Role,
}

const fn entry(name: &'static str, address: u8, role: Role) -> RegisterSpec {
    RegisterSpec {
        name,
        address,
        role,
    }
}

/// Every register the driver knows about, ordered by address
pub const REGISTERS: [RegisterSpec; 25] = [
    entry("MAIN_CTRL", MAIN_CTRL, Role::Control),
    entry("PS_LED", PS_LED, Role::Configuration),
    entry("PS_PULSES", PS_PULSES, Role::Configuration),
    entry("PS_MEAS_RATE", PS_MEAS_RATE, Role::Configuration),
    entry("LS_MEAS_RATE", LS_MEAS_RATE, Role::Configuration),
    entry("LS_GAIN", LS_GAIN, Role::Configuration),
    entry("PART_ID", PART_ID, Role::Control),
    entry("MAIN_STATUS", MAIN_STATUS, Role::Control),
    entry("PS_DATA_0", PS_DATA_0, Role::Data),
    entry("PS_DATA_1", PS_DATA_1, Role::Data),
    entry("LS_DATA_0", LS_DATA_0, Role::Data),
    entry("LS_DATA_1", LS_DATA_1, Role::Data),
    entry("LS_DATA_2", LS_DATA_2, Role::Data),
    entry("COMP_DATA_0", COMP_DATA_0, Role::Calibration),
    entry("COMP_DATA_1", COMP_DATA_1, Role::Calibration),
    entry("COMP_DATA_2", COMP_DATA_2, Role::Calibration),
    entry("INT_CFG", INT_CFG, Role::Configuration),
    entry("INT_PST", INT_PST, Role::Configuration),
    entry("PS_THRES_UP_0", PS_THRES_UP_0, Role::Threshold),
    entry("PS_THRES_UP_1", PS_THRES_UP_1, Role::Threshold),
    entry("PS_THRES_LOW_0", PS_THRES_LOW_0, Role::Threshold),
    entry("PS_THRES_LOW_1", PS_THRES_LOW_1, Role::Threshold),
    entry("PS_CAN_0", PS_CAN_0, Role::Calibration),
    entry("PS_CAN_1", PS_CAN_1, Role::Calibration),
    entry("DEVICE_CONFIG", DEVICE_CONFIG, Role::Configuration),
];

impl RegisterSpec {
    /// Find the register at `address`, if the driver knows it
    pub fn lookup(address: u8) -> Option<&'static RegisterSpec> {
        let table: &'static [RegisterSpec] = &REGISTERS;
        table.iter().find(|r| r.address == address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in REGISTERS.windows(2) {
            assert!(pair[0].address < pair[1].address, "{:?}", pair);
        }
    }

    #[test]
    fn init_sequence_values() {
        assert_eq!(
            INIT_SEQUENCE,
            [
                (0x00, 0x03),
                (0x01, 0x36),
                (0x03, 0x5D),
                (0x04, 0x22),
                (0x05, 0x01)
            ]
        );
    }

    #[test]
    fn data_registers_are_data() {
        for reg in ALS_DATA.iter().chain(PRX_DATA.iter()) {
            assert_eq!(RegisterSpec::lookup(*reg).map(|r| r.role), Some(Role::Data));
        }
        assert_eq!(RegisterSpec::lookup(0x30), None);
        assert_eq!(RegisterSpec::lookup(PART_ID).map(|r| r.name), Some("PART_ID"));
    }
}
