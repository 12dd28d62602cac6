//! Basic ALS and proximity reading example
//!
//! This example demonstrates how to:
//! - Attach the APDS-9922 (runs the bring-up configuration)
//! - Read the part ID
//! - Poll both channels and print them the way the sysfs attributes
//!   `apds9922_als/lux_data` and `apds9922_prx/prx_data` render them

#[cfg(target_os = "linux")]
use apds9922::{Apds9922, Channel, Error};
#[cfg(target_os = "linux")]
use embedded_hal::delay::DelayNs;

// This example uses linux-embedded-hal for demonstration
// Replace with your platform's I2C implementation
#[cfg(target_os = "linux")]
use linux_embedded_hal::{Delay, I2cdev};

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut delay = Delay;

    println!("Attaching APDS-9922...");
    let sensor = match Apds9922::attach(i2c) {
        Ok(sensor) => sensor,
        Err(err) => {
            eprintln!("{err}");
            return Err("device data init failed".into());
        }
    };

    let id = sensor.read_part_id().map_err(describe)?;
    println!("apds9922 chip found: part 0x{:X}, revision 0x{:X}", id.part, id.revision);
    println!("Press Ctrl+C to exit\n");

    loop {
        delay.delay_ms(500);

        for channel in [Channel::Als, Channel::Proximity] {
            let path = format!("{}/{}", channel.group(), channel.attribute());
            // a failed read is reported, never printed as a number
            match sensor.read(channel) {
                Ok(reading) => println!("{path}: {reading}"),
                Err(err) => eprintln!("{path}: {}", describe(err)),
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn describe<E: core::fmt::Debug>(err: Error<E>) -> String {
    err.to_string()
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This example requires Linux with I2C support.");
    println!("Please adapt the I2C initialization for your platform.");
}
