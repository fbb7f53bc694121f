use std::time::Duration;

use futures::executor::block_on;
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{
    Color, MultiplierTable, RecordingSurface, ResultDisplay, RiskLevel, SegmentCount, Sound,
    SpinState, TableEntry, WheelConfig, WheelError, WheelGame,
};

const FRAME: Duration = Duration::from_millis(16);

fn low_ten_game(seed: u64) -> WheelGame<RecordingSurface, StdRng> {
    WheelGame::new(
        MultiplierTable::default(),
        RiskLevel::Low,
        SegmentCount::Ten,
        RecordingSurface::new(),
        StdRng::seed_from_u64(seed),
        WheelConfig::default(),
    )
}

fn play_frames(game: &mut WheelGame<RecordingSurface, StdRng>, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        game.tick(FRAME);
        elapsed += FRAME;
    }
}

#[test]
fn lands_on_a_cyan_wedge_for_one_point_two() {
    for seed in 0..20 {
        let mut game = low_ten_game(seed);
        game.surface_mut().clear();
        let handle = game.spin_to(1.2).unwrap();

        play_frames(&mut game, Duration::from_millis(984));
        assert_eq!(game.state(), SpinState::Spinning);
        assert!(game.current_result().map_or(true, |r| !r.visible));

        game.tick(FRAME);
        assert_eq!(game.state(), SpinState::Idle);

        let outcome = handle.now_or_never().unwrap().unwrap();
        assert!([1, 2, 3, 5, 6, 7, 8].contains(&outcome.index));
        assert_eq!(
            game.current_result(),
            Some(ResultDisplay { multiplier: 1.2, color: Color::Cyan, visible: true })
        );
        assert_eq!(game.surface().sounds(), vec![Sound::Bet, Sound::Win]);
    }
}

#[test]
fn zero_payout_lands_silently() {
    for seed in 0..20 {
        let mut game = low_ten_game(seed);
        let handle = game.spin_to(0.0).unwrap();
        play_frames(&mut game, Duration::from_millis(1000));

        let outcome = block_on(handle).unwrap();
        assert!(outcome.index == 4 || outcome.index == 9);
        assert!(!game.surface().sounds().contains(&Sound::Win));
        assert_eq!(game.current_result().map(|r| r.color), Some(Color::Gray));
    }
}

#[test]
fn desynced_payout_surfaces_as_error() {
    let mut game = low_ten_game(1);
    game.surface_mut().clear();
    let err = game.spin_to(2.0).unwrap_err();
    assert_eq!(err, WheelError::NoMatchingSegment { multiplier: 2.0 });
    assert_eq!(game.state(), SpinState::Idle);
    assert!(game.surface().events.is_empty());
}

#[test]
fn back_to_back_spins_keep_moving_forward() {
    let mut game = low_ten_game(11);
    let mut last_angle = game.controller().angle();
    for payout in [1.5, 0.0, 1.2, 1.2, 1.5] {
        let handle = game.spin_to(payout).unwrap();
        play_frames(&mut game, Duration::from_millis(1000));
        let outcome = block_on(handle).unwrap();
        assert_eq!(outcome.multiplier, payout);
        assert!(outcome.angle - last_angle >= 3.0 * std::f64::consts::TAU - 1e-9);
        last_angle = outcome.angle;
    }
}

#[test]
fn server_fed_table_replaces_builtin() {
    let mut entries = Vec::new();
    for risk in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
        for segments in SegmentCount::ALL {
            let mut multipliers = vec![0.0; segments.len()];
            multipliers[0] = 5.0;
            entries.push(TableEntry { risk, segments, multipliers });
        }
    }
    let table = MultiplierTable::from_entries(entries).unwrap();

    let mut game = low_ten_game(2);
    game.replace_table(table).unwrap();
    let handle = game.spin_to(5.0).unwrap();
    play_frames(&mut game, Duration::from_millis(1000));
    assert_eq!(block_on(handle).unwrap().index, 0);
    assert_eq!(game.current_result().map(|r| r.color), Some(Color::Blue));
}

#[test]
fn table_swap_waits_for_the_wheel() {
    let mut game = low_ten_game(3);
    let handle = game.spin_to(1.5).unwrap();
    assert_eq!(
        game.replace_table(MultiplierTable::default()),
        Err(WheelError::ReconfigurationWhileSpinning)
    );
    play_frames(&mut game, Duration::from_millis(1000));
    block_on(handle).unwrap();
    assert!(game.replace_table(MultiplierTable::default()).is_ok());
}
