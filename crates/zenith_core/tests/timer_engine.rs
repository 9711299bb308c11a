use zenith_core::{SessionComplete, TimerDurations, TimerEngine, TimerMode};

/// Every operation the host can issue, for exhaustive sequence checks.
#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Pause,
    Toggle,
    Reset,
    Switch(TimerMode),
    Tick,
}

const OPS: [Op; 7] = [
    Op::Start,
    Op::Pause,
    Op::Toggle,
    Op::Reset,
    Op::Switch(TimerMode::Work),
    Op::Switch(TimerMode::Break),
    Op::Tick,
];

fn apply(engine: &mut TimerEngine, op: Op) -> Option<SessionComplete> {
    match op {
        Op::Start => engine.start(),
        Op::Pause => engine.pause(),
        Op::Toggle => engine.toggle(),
        Op::Reset => engine.reset(),
        Op::Switch(mode) => engine.switch_mode(mode),
        Op::Tick => return engine.tick(),
    }
    None
}

/// All op sequences of length `len`, enumerated by mixed-radix counting.
fn sequences(len: u32) -> impl Iterator<Item = Vec<Op>> {
    let total = OPS.len().pow(len);
    (0..total).map(move |mut n| {
        (0..len)
            .map(|_| {
                let op = OPS[n % OPS.len()];
                n /= OPS.len();
                op
            })
            .collect()
    })
}

fn engine() -> TimerEngine {
    TimerEngine::new(TimerDurations::new(3, 2).unwrap())
}

#[test]
fn remaining_stays_within_mode_bounds_for_any_sequence() {
    for ops in sequences(5) {
        let mut engine = engine();
        for op in ops {
            let before = engine.state();
            apply(&mut engine, op);
            let after = engine.state();
            assert!(after.remaining_secs <= engine.durations().for_mode(after.mode));
            if matches!(op, Op::Tick) {
                assert!(after.remaining_secs <= before.remaining_secs);
            }
            let progress = engine.progress();
            assert!((0.0..=1.0).contains(&progress));
        }
    }
}

#[test]
fn reset_and_switch_land_in_standby_from_any_state() {
    for ops in sequences(4) {
        let mut prepared = engine();
        for op in ops {
            apply(&mut prepared, op);
        }

        let mut reset = prepared.clone();
        reset.reset();
        assert!(!reset.is_running());
        assert_eq!(reset.mode(), prepared.mode());
        assert_eq!(
            reset.remaining_secs(),
            reset.durations().for_mode(prepared.mode())
        );

        for target in [TimerMode::Work, TimerMode::Break] {
            let mut switched = prepared.clone();
            switched.switch_mode(target);
            assert!(!switched.is_running());
            assert_eq!(switched.mode(), target);
            assert_eq!(
                switched.remaining_secs(),
                switched.durations().for_mode(target)
            );
        }
    }
}

#[test]
fn completion_only_fires_while_running_and_lands_in_standby() {
    for ops in sequences(6) {
        let mut engine = engine();
        for op in ops {
            let was_running = engine.is_running();
            if let Some(done) = apply(&mut engine, op) {
                assert!(was_running, "completion fired from standby");
                assert_eq!(done.mode, engine.mode());
                assert_eq!(engine.remaining_secs(), 0);
                assert!(!engine.is_running());
            }
        }
    }
}

#[test]
fn one_completion_per_drain() {
    let mut engine = engine();
    engine.start();
    let completions = (0..20).filter_map(|_| engine.tick()).count();
    assert_eq!(completions, 1);

    engine.switch_mode(TimerMode::Break);
    engine.start();
    let events: Vec<_> = (0..20).filter_map(|_| engine.tick()).collect();
    assert_eq!(
        events,
        vec![SessionComplete {
            mode: TimerMode::Break
        }]
    );
}

#[test]
fn full_pomodoro_cycle_with_host_auto_switch() {
    let mut engine = TimerEngine::default();
    engine.start();
    let mut ticks = 0;
    let done = loop {
        ticks += 1;
        if let Some(done) = engine.tick() {
            break done;
        }
    };
    assert_eq!(ticks, 1500);
    assert_eq!(done.message(), "Time to take a break!");

    engine.switch_mode(done.next_mode());
    let state = engine.state();
    assert_eq!(state.mode, TimerMode::Break);
    assert_eq!(state.clock(), "05:00");
    assert_eq!(state.status_label(), "Standby");
}
