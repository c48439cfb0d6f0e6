//! Two rooms joined by a doorway, one camera per room.
//!
//! Demonstrates:
//!   1. Building a scene from an ASCII map
//!   2. Running the tracking engine tick by tick
//!   3. Reading the responsible camera and handshakes between ticks
//!
//! Run with:
//!   RUST_LOG=info cargo run --example two_rooms

use handoff_core::Cell;
use handoff_engine::{HandoffConfig, TrackingEngine, TrackingEvent};
use handoff_scene::Scene;
use handoff_test_utils::{two_room_scene, TWO_ROOMS};

const TICKS: u64 = 14;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Map with cameras as digits and objects as letters (`a` = object 0).
fn render(scene: &Scene) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = TWO_ROOMS.iter().map(|r| r.chars().collect()).collect();
    let mut put = |cell: Cell, c: char| {
        if let Some(row) = rows.get_mut(cell.y as usize) {
            if let Some(slot) = row.get_mut(cell.x as usize) {
                *slot = c;
            }
        }
    };
    for object in scene.objects() {
        let glyph = char::from(b'a' + (object.id().0 % 26) as u8);
        put(object.position().cell(), glyph);
    }
    for camera in scene.cameras() {
        let glyph = char::from_digit(camera.id().0 % 10, 10).unwrap_or('?');
        put(camera.position(), glyph);
    }
    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    println!("=== Two rooms ===\n");

    let mut engine = TrackingEngine::new(two_room_scene(), HandoffConfig::default())?;
    println!("Initial state: {}\n", engine.state());

    for _ in 0..TICKS {
        let report = engine.step()?;
        let waiting: Vec<String> = engine
            .scene()
            .cameras()
            .filter(|c| c.handshake().is_some())
            .map(|c| c.id().to_string())
            .collect();
        println!(
            "tick {:>2}: {:<28} on_target={} handshakes=[{}]",
            report.tick,
            report.state.to_string(),
            report.on_target,
            waiting.join(",")
        );
        for event in &report.events {
            match event {
                TrackingEvent::Acquired { camera, object } => {
                    println!("          acquired object {object} with camera {camera}");
                }
                TrackingEvent::HandedOff {
                    from,
                    to,
                    object,
                    score,
                } => println!(
                    "          camera {from} -> camera {to} (object {object}, score {:.2})",
                    score.total
                ),
                TrackingEvent::Lost { camera, .. } => {
                    println!("          camera {camera} lost sight, no peer matched");
                }
            }
        }
    }

    println!("\nFinal layout:");
    for row in render(engine.scene()) {
        println!("  {row}");
    }
    let m = engine.last_metrics();
    println!(
        "\nhandoffs={} lost_ticks={} acquisitions={}",
        m.handoffs, m.lost_ticks, m.acquisitions
    );
    Ok(())
}
