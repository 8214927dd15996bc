//! Headless симуляция UpperEdge
//!
//! Персонаж блуждает у уступа (seeded), уступ каждый тик пересчитывает
//! floating marker и разрешение прыжка. Раз в 50 тиков — JumpIntent.
//!
//! Usage: upperedge_simulation [ledge_config.json]

use bevy::prelude::*;
use upperedge_simulation::*;

const SEED: u64 = 42;
const TICKS: usize = 1000;

fn main() {
    init_logger();
    if let Err(err) = run() {
        log_error(&format!("Simulation failed: {}", err));
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => LedgeConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => LedgeConfig::default(),
    };
    let geometry = config.geometry()?;
    let jump_target = config.jump_target()?;

    println!("Starting UpperEdge headless simulation (seed: {})", SEED);

    let mut app = create_headless_app(SEED);
    app.add_plugins(SimulationPlugin);

    // Персонаж стартует перед уступом, лицом к нему
    let start = geometry.midpoint() + geometry.forward() * 2.0;
    let (ledge, character) = {
        let mut commands = app.world_mut().commands();
        let ledge = spawn_ledge(&mut commands, geometry, jump_target);
        let character = commands
            .spawn((
                Transform::from_translation(start).looking_at(geometry.midpoint(), geometry.up()),
                RandomWalker {
                    anchor: start,
                    radius: 3.0,
                    ..default()
                },
            ))
            .id();
        (ledge, character)
    };
    app.world_mut().flush();

    // Без RapierPhysicsPlugin overlap шлём сами
    app.world_mut()
        .send_event(LedgeTriggerEvent::Entered { ledge, character });

    let mut eligible_ticks = 0;
    for tick in 0..TICKS {
        if tick % 50 == 0 {
            app.world_mut().send_event(JumpIntent { entity: character });
        }

        app.world_mut().run_schedule(FixedUpdate);

        let Some(assist) = app.world().get::<LedgeAssist>(ledge) else {
            break;
        };
        if assist.solver.eligibility().is_eligible() {
            eligible_ticks += 1;
        }

        if tick % 100 == 0 {
            println!(
                "Tick {}: marker {:?}, jump {:?}",
                tick,
                assist.solver.floating_marker(),
                assist.solver.eligibility()
            );
        }
    }

    let resolved = app.world().resource::<Events<LedgeJumpResolved>>().len();
    println!(
        "Simulation complete! eligible ticks: {}/{}, assisted jumps: {}",
        eligible_ticks, TICKS, resolved
    );

    Ok(())
}
