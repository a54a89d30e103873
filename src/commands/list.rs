//! List commands implementation

use shiftlight_serial::list_ports;

/// List the serial ports present on the system
pub fn list_serial_ports() -> Result<(), Box<dyn std::error::Error>> {
    let ports = list_ports()?;

    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    println!("Available serial ports:");
    println!();
    println!("{:<24} Description", "Port");
    println!("{}", "-".repeat(60));

    for port in &ports {
        println!("{:<24} {}", port.path, port.description);
    }
    Ok(())
}
