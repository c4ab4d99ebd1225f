//! End-to-end scenarios for the keypad engine.

use keypad_tictactoe::advisor::best_move;
use keypad_tictactoe::{
    Board, Game, GameState, IntegrityError, LineKind, Outcome, Player, Position,
};

#[test]
fn test_diagonal_win_7_5_3() {
    let mut game = Game::new();
    let moves = [7, 1, 5, 2, 3];
    let mut outcome = None;
    for key in moves {
        outcome = Some(game.apply_key(key).expect("Valid move").outcome);
    }

    match outcome.expect("Moves were played") {
        Outcome::Win { player, line } => {
            assert_eq!(player, Player::X);
            assert_eq!(line.keys(), [7, 5, 3]);
            assert_eq!(line.kind, LineKind::Diagonal);
        }
        other => panic!("Expected a win, got {other}"),
    }
    assert!(!game.state().is_active());
    assert_eq!(game.state().status_string(), "X wins");
}

#[test]
fn test_full_board_without_line_is_draw() {
    // {7:X, 8:O, 9:X, 4:X, 5:O, 6:O, 1:O, 2:X, 3:X}
    let board: Board = "XOX|XOO|OXX".parse().expect("Valid board");
    assert_eq!(keypad_tictactoe::evaluate(&board), Outcome::Draw);
}

#[test]
fn test_advisor_completes_diagonal() {
    let board: Board = "X..|.X.|...".parse().expect("Valid board");
    assert_eq!(best_move(&board, Player::X), Some(Position::BottomRight));
    assert_eq!(Position::BottomRight.key(), 3);
}

#[test]
fn test_import_rejects_x_three_ahead_of_o() {
    let mut game = Game::new();
    game.apply_key(5).expect("Valid move");
    let before = game.state().clone();

    let donor: Board = "XX.|O..|..X".parse().expect("Valid board");
    let mut record = game.export_state();
    for (pos, square) in donor.iter() {
        record.board.insert(pos.key(), square.symbol().to_string());
    }

    assert_eq!(
        game.import_state(&record),
        Err(IntegrityError::SymbolCount { x: 3, o: 1 })
    );
    assert_eq!(game.state(), &before);
}

#[test]
fn test_export_import_round_trip_through_json() {
    let mut game = Game::new();
    for key in [5, 1, 9] {
        game.apply_key(key).expect("Valid move");
    }
    let json = game.export_state().to_json().expect("Serializable record");

    let record = keypad_tictactoe::StateRecord::from_json(&json).expect("Parsable record");
    let mut restored = Game::new();
    restored.import_state(&record).expect("Valid record");

    assert_eq!(restored.state(), game.state());
    assert_eq!(restored.state().turn(), Player::O);
}

#[test]
fn test_finished_game_round_trips() {
    let mut game = Game::new();
    for key in [7, 1, 8, 2, 9] {
        game.apply_key(key).expect("Valid move");
    }
    let record = game.export_state();
    assert!(!record.active);

    let mut restored = Game::new();
    restored.import_state(&record).expect("Valid record");
    assert_eq!(restored.state(), game.state());
    assert!(restored.apply_key(3).is_err());
}

#[test]
fn test_reset_after_win() {
    let mut game = Game::new();
    for key in [7, 1, 5, 2, 3] {
        game.apply_key(key).expect("Valid move");
    }
    game.reset();
    assert_eq!(game.state(), &GameState::new());
    assert!(game.apply_key(3).is_ok());
}

#[test]
fn test_import_rejects_won_board_still_marked_active() {
    let mut game = Game::new();
    let donor: Board = "XXX|OO.|...".parse().expect("Valid board");
    let mut record = game.export_state();
    for (pos, square) in donor.iter() {
        record.board.insert(pos.key(), square.symbol().to_string());
    }
    record.turn = Player::O;

    assert!(matches!(
        game.import_state(&record),
        Err(IntegrityError::PhaseMismatch { active: true, .. })
    ));
    assert_eq!(game.state(), &GameState::new());

    // The same board recorded as finished, with X keeping the turn, loads.
    record.active = false;
    record.turn = Player::X;
    game.import_state(&record).expect("Consistent record");
    assert_eq!(game.state().status_string(), "X wins");
    assert!(game.apply_key(1).is_err());
}
