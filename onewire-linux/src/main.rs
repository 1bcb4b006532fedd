use clap::Parser;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::{CdevPin, Delay};
use onewire_bitbang::BitBang;
use onewire_core::{OneWire, OneWireError, OneWireStatus, RomSearch};

/// Enumerate the devices on a bit-banged 1-Wire bus
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the GPIO character device (e.g., /dev/gpiochip0)
    #[arg(short, long, default_value = "/dev/gpiochip0")]
    chip: String,
    /// GPIO line wired to the 1-Wire data pin
    #[arg(short, long)]
    line: u32,
    /// Restrict the search to one family code (hex, e.g. 28)
    #[arg(short, long, value_parser = parse_family)]
    family: Option<u8>,
}

fn parse_family(s: &str) -> Result<u8, String> {
    u8::from_str_radix(s.trim_start_matches("0x"), 16).map_err(|e| e.to_string())
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    // Request the 1-Wire line as an open-drain output
    let mut chip = Chip::new(&args.chip).expect("Failed to open GPIO chip");
    let handle = chip
        .get_line(args.line)
        .expect("Failed to get GPIO line")
        .request(
            LineRequestFlags::OUTPUT | LineRequestFlags::OPEN_DRAIN,
            1,
            "onewire-linux",
        )
        .expect("Failed to request GPIO line");
    let pin = CdevPin::new(handle).expect("Failed to wrap GPIO line");
    let mut bus = BitBang::new(pin, Delay);
    // Check for a presence pulse before searching
    let status = bus.reset().expect("Failed to reset the bus");
    if status.short_circuit() {
        log::error!("The 1-Wire line is held low, check the wiring");
        return;
    }
    if !status.presence() {
        log::warn!("No presence pulse observed, the bus looks empty");
    }
    // Enumerate devices on the bus
    let mut search = RomSearch::new(&mut bus);
    if let Some(family) = args.family {
        search.target_search(family);
    }
    let mut found = 0usize;
    loop {
        match search.next() {
            Ok(Some(rom)) => {
                found += 1;
                if rom.is_valid() {
                    log::info!("ROM: {rom} (family {:#04x})", rom.family());
                } else {
                    log::warn!("ROM: {rom} (CRC mismatch, read may be corrupt)");
                }
            }
            Ok(None) => break,
            Err(OneWireError::NoDevicePresent) => break,
            Err(e) => {
                log::error!("Search failed: {e:?}");
                break;
            }
        }
    }
    log::info!("Found {found} device(s)");
}
