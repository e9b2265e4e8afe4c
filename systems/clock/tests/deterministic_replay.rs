use std::time::Duration;

use wave_gauge_core::{Command, Event, Phase};
use wave_gauge_system_clock::AnimationClock;
use wave_gauge_system_outline::generate_outline;
use wave_gauge_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn deterministic_replay_produces_expected_phase() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");

    // 10 frames of 16ms while running: one immediate step plus 16 full intervals.
    assert_eq!(first.phase, Phase::new(51.0));
    assert_eq!(first.redraws, 2 + 10);
    assert!(!first.waving);
}

#[test]
fn rendered_outline_tracks_the_stored_phase() {
    let mut world = World::new();
    let mut clock = AnimationClock::default();

    for command in [
        Command::SetProgress { value: 64 },
        Command::StartWave,
        Command::Tick { dt: FRAME },
        Command::Tick { dt: FRAME },
    ] {
        run(&mut world, &mut clock, command);
    }

    let config = query::wave_config(&world);
    let outline = generate_outline(&config);
    assert_eq!(config.phase(), clock.phase());
    assert_eq!(config.progress().get(), 64);
    assert!(!outline.wave_points().is_empty());
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![Command::SetProgress { value: 75 }, Command::StartWave];
    commands.extend((0..10).map(|_| Command::Tick { dt: FRAME }));
    commands.push(Command::StopWave);
    commands.push(Command::SetProgress { value: 75 });
    commands.extend((0..5).map(|_| Command::Tick { dt: FRAME }));
    commands
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    phase: Phase,
    waving: bool,
    redraws: usize,
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut clock = AnimationClock::default();
    let mut redraws = 0;

    for command in commands {
        redraws += run(&mut world, &mut clock, command);
    }

    ReplayOutcome {
        phase: query::phase(&world),
        waving: query::is_waving(&world),
        redraws,
    }
}

fn run(world: &mut World, clock: &mut AnimationClock, command: Command) -> usize {
    let mut redraws = 0;
    let mut pending = vec![command];

    while !pending.is_empty() {
        let mut events = Vec::new();
        for command in pending.drain(..) {
            world::apply(world, command, &mut events);
        }
        redraws += events
            .iter()
            .filter(|event| matches!(event, Event::RedrawRequested))
            .count();
        clock.handle(&events, &mut pending);
    }

    redraws
}
