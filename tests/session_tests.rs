use pastel_slots::engine::{
    GameState, ReelGrid, SlotError, Symbol::*, SymbolPool, draw_grid, evaluate,
};
use pastel_slots::ui::{Intent, apply_intent};
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[test]
fn sessions_repeat_with_seed() {
    let mut a = GameState::new(2024);
    let mut b = GameState::new(2024);
    for _ in 0..25 {
        assert_eq!(a.spin(), b.spin());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn top_row_pays_bet_times_multiplier() {
    let grid = ReelGrid::from_rows([[A, A, A], [B, C, D], [D, D, D]]);
    let eval = evaluate(&grid, 2, 10);
    assert_eq!(eval.winning_lines, vec![0]);
    assert_eq!(eval.total_payout, 50);

    // Third row only counts once three lines are wagered
    let eval = evaluate(&grid, 3, 10);
    assert_eq!(eval.winning_lines, vec![0, 2]);
    assert_eq!(eval.total_payout, 50 + 20);
}

#[test]
fn broke_player_cannot_spin() {
    let mut state = GameState::new(1);
    state.balance = 5;
    state.set_lines(1).unwrap();

    assert!(matches!(
        state.spin(),
        Err(SlotError::InsufficientFunds { .. })
    ));
    assert_eq!(state.balance, 5);
    assert_eq!(state.total_spins, 0);

    // Topping up makes the same bet playable
    state.deposit(500).unwrap();
    assert_eq!(state.balance, 505);
    assert!(state.spin().is_ok());
}

#[test]
fn full_intent_flow() {
    let mut state = GameState::new(77);
    apply_intent(&mut state, Intent::SetLines(3));
    apply_intent(&mut state, Intent::IncreaseBet);
    assert_eq!(state.total_bet(), 45);

    apply_intent(&mut state, Intent::Spin);
    assert!(state.is_spinning());
    assert_eq!(state.balance, 955);

    let outcome = state.finish_spin().unwrap();
    assert_eq!(outcome.wager.lines, 3);
    assert_eq!(state.balance, 955 + outcome.total_payout);
    assert!(!state.is_spinning());
}

#[test]
fn return_to_player_smoke() {
    // Each line hits with probability sum((w/20)^3) and returns about a
    // quarter of its stake on average.
    let pool = SymbolPool::new();
    let mut rng = Pcg32::seed_from_u64(5);
    let spins = 20_000u64;
    let bet = 1u64;
    let lines = 2u8;

    let mut paid = 0u64;
    for _ in 0..spins {
        let grid = draw_grid(&pool, &mut rng);
        paid += evaluate(&grid, lines, bet).total_payout;
    }
    let rtp = paid as f64 / (spins * bet * lines as u64) as f64;
    assert!((0.15..=0.35).contains(&rtp), "rtp {rtp}");
}
