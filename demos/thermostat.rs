// SPDX-License-Identifier: MPL-2.0

//! Demo program: print the thermostat and usage readings, optionally
//! switching to a preset.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example thermostat -- <refresh-token> [state]
//! ```
//!
//! # Example
//!
//! ```bash
//! cargo run --example thermostat -- 0b1c2d3e comfort
//! ```

use std::env;

use toon_lib::Toon;
use toon_lib::device::Switchable;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if !(2..=3).contains(&args.len()) {
        eprintln!("Usage: {} <refresh-token> [state]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example thermostat -- 0b1c2d3e comfort");
        std::process::exit(1);
    }

    println!("Connecting to the Toon API...");
    let toon = Toon::builder(&args[1]).build().await?;
    println!("Agreements: {}", toon.display_names().join(", "));

    println!("Room temperature: {:.1} °C", toon.temperature().await?);
    println!("Set point:        {:.1} °C", toon.thermostat().await?);
    match toon.thermostat_state().await? {
        Some(preset) => println!("Preset:           {}", preset.state),
        None => println!("Preset:           manual"),
    }
    if let Some(burner) = toon.burner_state().await? {
        println!("Burner:           {burner}");
    }

    let gas = toon.gas().await?;
    let power = toon.power().await?;
    println!("Gas today:        {:?}", gas.daily_usage);
    println!("Power now:        {:?} W", power.usage.value);

    for plug in toon.smart_plugs().await? {
        println!(
            "Plug {:<12} {} ({:.1} W)",
            plug.name(),
            plug.current_state(),
            plug.current_usage()
        );
    }

    if let Some(state) = args.get(2) {
        println!("Switching to {state}...");
        toon.set_thermostat_state(state).await?;
        println!("Preset now: {:?}", toon.thermostat_state().await?.map(|p| p.state));
    }

    Ok(())
}
