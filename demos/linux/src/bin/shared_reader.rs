//! Sharing one sensor between threads
//!
//! This example demonstrates how to:
//! - Share a single `Apds9922` between threads by reference
//! - Read the two channels concurrently without tearing multi-byte values
//! - Look at the last cached readings without touching the bus

#[cfg(target_os = "linux")]
use apds9922::Apds9922;

#[cfg(target_os = "linux")]
use linux_embedded_hal::I2cdev;

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::thread;
    use std::time::Duration;

    let i2c = I2cdev::new("/dev/i2c-1")?;
    let sensor = match Apds9922::attach(i2c) {
        Ok(sensor) => sensor,
        Err(err) => return Err(err.to_string().into()),
    };

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..20 {
                match sensor.read_als() {
                    Ok(value) => println!("[als] {value}"),
                    Err(err) => eprintln!("[als] {err}"),
                }
                thread::sleep(Duration::from_millis(100));
            }
        });
        s.spawn(|| {
            for _ in 0..20 {
                match sensor.read_proximity() {
                    Ok(value) => println!("[prx] {value}"),
                    Err(err) => eprintln!("[prx] {err}"),
                }
                thread::sleep(Duration::from_millis(100));
            }
        });
    });

    println!(
        "last: als={:?} prx={:?}",
        sensor.last_als(),
        sensor.last_proximity()
    );

    let _i2c = sensor.detach().release();
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This example requires Linux with I2C support.");
    println!("Please adapt the I2C initialization for your platform.");
}
