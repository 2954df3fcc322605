//! Plays a 440 Hz tone for a second on the default driver.
//!
//! Pass a path to write the tone to a file with the `wav` driver instead:
//! `cargo run --example beep --features libao -- beep.wav`

use std::error::Error;
use std::f32::consts::TAU;
use std::num::NonZero;

use aout::{Ao, SampleFormat, SampleWidth};

const SAMPLE_RATE: u32 = 44_100;

fn main() -> Result<(), Box<dyn Error>> {
    let ao = Ao::new();
    let format = SampleFormat::new(
        SampleWidth::Sixteen,
        NonZero::new(SAMPLE_RATE).expect("not zero"),
        NonZero::new(2).expect("not zero"),
    );

    let mut device = match std::env::args().nth(1) {
        Some(path) => {
            let wav = ao.driver_id("wav").ok_or(aout::Error::NoDriver)?;
            ao.open_file(wav, path, true, &format, &[])?
        }
        None => {
            let live = ao.default_driver_id().ok_or(aout::Error::NoDriver)?;
            println!("Playing on {}", ao.driver_info(live)?);
            ao.open_live(live, &format, &[])?
        }
    };

    // Interleaved stereo, same sample on both channels
    let samples: Vec<i16> = (0..SAMPLE_RATE)
        .flat_map(|n| {
            let t = n as f32 / SAMPLE_RATE as f32;
            let sample = ((TAU * 440.0 * t).sin() * 0.2 * f32::from(i16::MAX)) as i16;
            [sample, sample]
        })
        .collect();

    if !device.play16(&samples) {
        eprintln!("the device rejected the samples");
    }
    if !device.close() {
        eprintln!("the device did not close cleanly");
    }
    Ok(())
}
