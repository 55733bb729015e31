//! Full matches driven through the public session API.

use tictactoe_engine::{Board, Mark, Outcome, Position, legal_moves};
use tictactoe_tui::{Phase, Scores, Session, SessionError, Turn};

/// Plays one match with the human taking `pick` each turn.
fn play_match(session: &mut Session, pick: impl Fn(&Board) -> Position) -> Outcome {
    loop {
        let pos = pick(session.board());
        match session.play(pos).unwrap() {
            Turn::Finished(outcome) => return outcome,
            Turn::ComputerToMove => {
                if let Turn::Finished(outcome) = session.play_computer().unwrap() {
                    return outcome;
                }
            }
            Turn::PlayerToMove => panic!("human moved twice"),
        }
    }
}

fn first_empty(board: &Board) -> Position {
    legal_moves(board)[0]
}

#[test]
fn test_naive_player_loses_and_score_counts() {
    let mut session = Session::new();
    session.start().unwrap();

    let outcome = play_match(&mut session, first_empty);
    assert_eq!(outcome, Outcome::OpponentWins);
    assert_eq!(session.phase(), Phase::Over(Outcome::OpponentWins));
    assert_eq!(session.verdict(), Some("Bot wins!"));
    assert_eq!(
        session.scores(),
        Scores {
            player: 0,
            computer: 1
        }
    );
}

#[test]
fn test_computer_never_loses_to_any_first_move() {
    for opening in Position::all() {
        let mut session = Session::new();
        session.start().unwrap();
        session.play(opening).unwrap();
        session.play_computer().unwrap();

        let outcome = play_match(&mut session, first_empty);
        assert_ne!(outcome, Outcome::PlayerWins, "opening {opening}");
        assert_eq!(session.scores().player, 0);
    }
}

#[test]
fn test_new_match_keeps_scores() {
    let mut session = Session::new();
    session.start().unwrap();
    play_match(&mut session, first_empty);
    let generation = session.generation();

    session.new_match().unwrap();
    assert_eq!(session.board(), &Board::new());
    assert_eq!(
        session.phase(),
        Phase::InProgress {
            to_move: Mark::Player
        }
    );
    assert_eq!(session.scores().computer, 1);
    assert!(session.generation() > generation);

    play_match(&mut session, first_empty);
    assert_eq!(session.scores().computer, 2);

    session.reset_scores();
    assert_eq!(session.scores(), Scores::default());
}

#[test]
fn test_home_from_any_phase() {
    let mut session = Session::new();
    session.start().unwrap();
    session.play(Position::new(0, 0)).unwrap();
    session.home();
    assert_eq!(session.phase(), Phase::NotStarted);
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.search_snapshot(), None);
}

#[test]
fn test_phase_guards() {
    let mut session = Session::new();
    assert!(matches!(
        session.new_match(),
        Err(SessionError::WrongPhase { .. })
    ));
    assert!(matches!(
        session.play_computer(),
        Err(SessionError::WrongPhase { .. })
    ));

    session.start().unwrap();
    assert!(matches!(
        session.start(),
        Err(SessionError::WrongPhase { .. })
    ));
    assert!(matches!(
        session.play_computer(),
        Err(SessionError::WrongPhase { .. })
    ));

    play_match(&mut session, first_empty);
    let err = session.play(Position::new(2, 2)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot play while the match is over"
    );
}

#[test]
fn test_snapshot_matches_board() {
    let mut session = Session::new();
    session.start().unwrap();
    assert_eq!(session.search_snapshot(), None);

    session.play(Position::new(2, 2)).unwrap();
    let (generation, board) = session.search_snapshot().unwrap();
    assert_eq!(generation, session.generation());
    assert_eq!(&board, session.board());

    // The worker's answer is applied as if computed in place.
    assert_eq!(
        session
            .apply_computer(generation, Some(Position::new(1, 1)))
            .unwrap(),
        Turn::PlayerToMove
    );
    assert_eq!(session.board().to_string(), ".../.O./..X");
}
