//! Tile Platformer headless driver
//!
//! Loads the bundled world and plays a scripted run through the physics
//! core at 60 Hz, logging what happens. Set `RUST_LOG=debug` (or `trace`)
//! for more detail.

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_WORLD: &str = include_str!("../worlds/default.json");

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), tile_platformer::WorldError> {
    use std::collections::HashSet;

    use tile_platformer::sim::{StepEvent, TickInput};
    use tile_platformer::world::Debounce;
    use tile_platformer::{Game, Tile, Tuning};

    env_logger::init();
    log::info!("Tile Platformer (headless) starting...");

    let mut game = Game::from_json(DEFAULT_WORLD, Tuning::default())?;

    const FRAME: f64 = 1.0 / 60.0;
    const FRAMES: u32 = 60 * 8;

    let mut deaths = 0;
    let mut jumps = 0;

    // Stand-in for a renderer's tile cache: dirty cells collect until the
    // edits settle, then get rebuilt in one pass
    let mut invalidate = Debounce::new(0.25);
    let mut dirty: HashSet<(i32, i32)> = HashSet::new();

    for frame in 0..FRAMES {
        let t = frame as f64 * FRAME;

        // Run right the whole time, hop every 1.2 s
        let input = TickInput {
            right: true,
            jump_pressed: frame % 72 == 30,
            jump_released: frame % 72 == 50,
            ..Default::default()
        };

        // Lay a bridge over the lava halfway through, one plank per frame
        let plank = frame as i32 - (FRAMES / 2) as i32;
        if (0..4).contains(&plank) {
            game.place(14 + plank, 1, Tile::Earth);
        }

        let edits = game.world.take_edits();
        if !edits.is_empty() {
            for edit in edits {
                dirty.extend(edit.neighborhood(1));
            }
            invalidate.trigger(t);
        }
        if invalidate.poll(t) {
            log::info!("Rebuilding {} cached tiles after edits settled", dirty.len());
            dirty.clear();
        }

        match game.update(t, &input) {
            Some(StepEvent::Jumped) => jumps += 1,
            Some(StepEvent::Respawned(_)) => deaths += 1,
            _ => {}
        }

        if frame % 60 == 0 {
            let pos = game.player_pos();
            log::info!(
                "t={:.1}s player=({:.2}, {:.2}) grounded={}",
                t,
                pos.x,
                pos.y,
                game.is_on_ground()
            );
        }
    }

    let saved = game.world.save();
    log::info!(
        "Run finished: {} jumps, {} deaths, {} foreground rects on save",
        jumps,
        deaths,
        saved.layers.foreground.len()
    );

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by the host page on the web; nothing to do here
}
