use std::env;
use std::net::SocketAddr;

use contracts::{Position, RideStatus};
use dispatch_api::serve;
use dispatch_core::{DispatchWorld, EngineError};

fn print_usage() {
    println!("dispatch-cli <command>");
    println!("commands:");
    println!("  serve [addr]");
    println!("    default addr: 127.0.0.1:8080");
    println!("  demo [max-ticks]");
    println!("    default max-ticks: 64");
}

fn parse_socket_addr(value: Option<&String>) -> Result<SocketAddr, String> {
    let raw = value.map(String::as_str).unwrap_or("127.0.0.1:8080");
    raw.parse::<SocketAddr>()
        .map_err(|_| format!("invalid addr: {raw}"))
}

/// Scripted end-to-end run: seed a small city, dispatch one ride, drive it
/// to completion, and print the resulting snapshot.
fn run_demo(max_ticks: u64) -> Result<(), EngineError> {
    let mut world = DispatchWorld::new();
    world.create_driver(Some("driver_alpha".to_string()), 0, 0)?;
    world.create_driver(Some("driver_beta".to_string()), 10, 10)?;
    world.create_driver(Some("driver_gamma".to_string()), 99, 99)?;
    world.create_rider(Some("rider_one".to_string()), 5, 5)?;

    let ride = world.request_ride("rider_one", Position::new(5, 5), Position::new(7, 5))?;
    println!(
        "requested {} -> offered to {}",
        ride.id,
        ride.driver_id.as_deref().unwrap_or("nobody")
    );
    let ride = world.accept_ride(&ride.id)?;

    for _ in 0..max_ticks {
        world.step();
        if world
            .ride_snapshot(&ride.id)
            .map(|ride| ride.status != RideStatus::InProgress)
            .unwrap_or(true)
        {
            break;
        }
    }

    let snapshot = world.snapshot_for_current_tick();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("snapshot render failed: {err}"),
    }
    println!(
        "demo finished at tick {} with {} event(s)",
        snapshot.tick,
        world.events().len()
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        Some("serve") => match parse_socket_addr(args.get(2)) {
            Ok(addr) => {
                println!("serving dispatch api on http://{addr}");
                if let Err(err) = serve(addr).await {
                    eprintln!("server error: {err}");
                    std::process::exit(1);
                }
            }
            Err(err) => {
                eprintln!("error: {err}");
                print_usage();
                std::process::exit(2);
            }
        },
        Some("demo") => {
            let max_ticks = args.get(2).and_then(|v| v.parse::<u64>().ok()).unwrap_or(64);
            if let Err(err) = run_demo(max_ticks) {
                eprintln!("demo error: {err}");
                std::process::exit(1);
            }
        }
        _ => {
            print_usage();
        }
    }
}
