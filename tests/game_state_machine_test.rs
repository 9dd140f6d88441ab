//! Turn-cycle scenarios against the in-memory service.

use strictly_remote::{
    Cell, GameErrorKind, GameError, GameSession, GameStateMachine, GameStatus, MachineState,
    MockService, Outcome, PresentationEvent, RecordingPresenter, Role, Square, Symbol,
    Transition, WinLine,
};

type Machine = GameStateMachine<MockService, RecordingPresenter>;

fn cell(row: u8, col: u8) -> Cell {
    Cell::new(row, col).unwrap()
}

async fn window(service: &MockService) -> Machine {
    let mut machine = GameStateMachine::new(
        GameSession::default(),
        service.clone(),
        RecordingPresenter::new(),
    );
    machine.start().await.unwrap();
    machine.presenter_mut().clear();
    machine
}

fn turn_events(machine: &Machine) -> Vec<Role> {
    machine
        .presenter()
        .events()
        .iter()
        .filter_map(|e| match e {
            PresentationEvent::TurnChanged(role) => Some(*role),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_human_move_and_reply() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    service.script_response(Some(cell(1, 1)), GameStatus::InProgress);

    let t = machine.handle_human_click(cell(0, 0)).await.unwrap();

    assert_eq!(t, Transition::Continued);
    assert_eq!(machine.board().get(cell(0, 0)), Square::Occupied(Symbol::Ex));
    assert_eq!(machine.board().get(cell(1, 1)), Square::Occupied(Symbol::Oh));
    assert_eq!(machine.current_turn(), Role::Human);
    assert!(machine.input_enabled());
    assert_eq!(machine.state(), MachineState::InProgress);
    assert_eq!(service.submitted(), vec![Some(cell(0, 0))]);
}

#[tokio::test]
async fn test_winning_move_highlights_line_in_order() {
    let service = MockService::default();
    service.place(cell(0, 0), Symbol::Ex);
    service.place(cell(0, 1), Symbol::Ex);
    service.place(cell(1, 0), Symbol::Oh);
    service.place(cell(1, 1), Symbol::Oh);
    let mut machine = window(&service).await;
    assert_eq!(machine.current_turn(), Role::Human);

    let line = WinLine::new([cell(0, 0), cell(0, 1), cell(0, 2)]);
    service.script_response(
        None,
        GameStatus::Won {
            winner: Symbol::Ex,
            line,
        },
    );
    let t = machine.handle_human_click(cell(0, 2)).await.unwrap();

    assert!(matches!(t, Transition::Finished(GameStatus::Won { .. })));
    assert_eq!(
        machine.state(),
        MachineState::Won {
            winner: Role::Human,
            line
        }
    );
    assert_eq!(
        machine.presenter().highlights(),
        vec![cell(0, 0), cell(0, 1), cell(0, 2)]
    );
    assert!(!machine.input_enabled());
    assert!(
        machine
            .presenter()
            .events()
            .contains(&PresentationEvent::GameOver(Outcome::HumanWon))
    );

    // Terminal: further clicks do nothing.
    let fetches = service.fetches();
    let t = machine.handle_human_click(cell(2, 2)).await.unwrap();
    assert_eq!(t, Transition::Ignored);
    assert_eq!(service.fetches(), fetches);
}

#[tokio::test]
async fn test_refresh_adopts_remote_tie() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    service.set_status(GameStatus::Tied);

    machine.refresh().await.unwrap();

    assert_eq!(machine.state(), MachineState::Tied);
    assert!(!machine.input_enabled());
    assert!(service.submitted().is_empty());
    assert!(
        machine
            .presenter()
            .events()
            .contains(&PresentationEvent::GameOver(Outcome::Tie))
    );
}

#[tokio::test]
async fn test_start_on_finished_game() {
    let service = MockService::default();
    service.place(cell(0, 0), Symbol::Oh);
    service.place(cell(1, 1), Symbol::Oh);
    service.place(cell(2, 2), Symbol::Oh);
    service.place(cell(0, 1), Symbol::Ex);
    service.place(cell(0, 2), Symbol::Ex);
    let line = WinLine::new([cell(0, 0), cell(1, 1), cell(2, 2)]);
    service.set_status(GameStatus::Won {
        winner: Symbol::Oh,
        line,
    });

    let mut machine = GameStateMachine::new(
        GameSession::default(),
        service.clone(),
        RecordingPresenter::new(),
    );
    machine.start().await.unwrap();

    assert_eq!(
        machine.state(),
        MachineState::Won {
            winner: Role::Remote,
            line
        }
    );
    assert_eq!(machine.presenter().highlights(), line.cells().to_vec());
    assert!(
        machine
            .presenter()
            .events()
            .contains(&PresentationEvent::GameOver(Outcome::RemoteWon))
    );
    assert!(!machine.input_enabled());
}

#[tokio::test]
async fn test_turns_alternate_and_marks_never_change() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    let clicks = [cell(2, 2), cell(2, 1), cell(2, 0), cell(1, 2)];

    for click in clicks {
        let before = machine.board().clone();
        machine.presenter_mut().clear();

        let t = machine.handle_human_click(click).await.unwrap();

        assert_eq!(t, Transition::Continued);
        assert_eq!(turn_events(&machine), vec![Role::Remote, Role::Human]);
        for (c, symbol) in before.occupied() {
            assert_eq!(machine.board().get(c), Square::Occupied(symbol));
        }
        assert_eq!(
            machine.board().count(Symbol::Ex),
            machine.board().count(Symbol::Oh)
        );
    }

    // Last free cell: the computer has nowhere to go and the game is tied.
    machine.presenter_mut().clear();
    let t = machine.handle_human_click(cell(1, 1)).await.unwrap();
    assert_eq!(t, Transition::Finished(GameStatus::Tied));
    assert_eq!(turn_events(&machine), vec![Role::Remote]);
    assert_eq!(machine.state(), MachineState::Tied);
}

#[tokio::test]
async fn test_network_failure_rolls_back_move() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    service.fail_next_move(GameError::network("connection refused"));

    let err = machine.handle_human_click(cell(1, 1)).await.unwrap_err();

    assert!(matches!(err.kind(), GameErrorKind::Network(_)));
    assert!(machine.board().is_blank());
    assert_eq!(machine.current_turn(), Role::Human);
    assert!(machine.input_enabled());
    assert_eq!(machine.state(), MachineState::InProgress);
    assert_eq!(machine.presenter().errors().len(), 1);
    assert!(service.submitted().is_empty());

    // The same cell can be played once the service is back.
    let t = machine.handle_human_click(cell(1, 1)).await.unwrap();
    assert_eq!(t, Transition::Continued);
    assert_eq!(machine.board().get(cell(1, 1)), Square::Occupied(Symbol::Ex));
}

#[tokio::test]
async fn test_service_failure_rolls_back_without_resync() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    service.fail_next_move(GameError::service("HTTP 500 Internal Server Error"));
    let fetches = service.fetches();

    let err = machine.handle_human_click(cell(2, 0)).await.unwrap_err();

    assert!(matches!(err.kind(), GameErrorKind::Service(_)));
    // Only the fetch before the move; no resync after the failure.
    assert_eq!(service.fetches(), fetches + 1);
    assert!(machine.board().is_blank());
    assert_eq!(machine.current_turn(), Role::Human);
    assert!(machine.input_enabled());
    assert_eq!(machine.presenter().errors().len(), 1);
    assert!(service.submitted().is_empty());
}

#[tokio::test]
async fn test_failed_fetch_keeps_board_and_input() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    service.fail_next(GameError::network("timed out"));

    assert!(machine.handle_human_click(cell(0, 0)).await.is_err());

    assert!(machine.board().is_blank());
    assert!(machine.input_enabled());
    assert!(service.submitted().is_empty());
}

#[tokio::test]
async fn test_rejected_move_triggers_resync() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    service.fail_next_move(GameError::illegal_move("HTTP 409 Conflict"));
    let fetches = service.fetches();

    let err = machine.handle_human_click(cell(0, 0)).await.unwrap_err();

    assert!(err.is_illegal_move());
    // One fetch before the move, one to resync after the rejection.
    assert_eq!(service.fetches(), fetches + 2);
    assert!(machine.board().is_blank());
    assert!(machine.input_enabled());
    assert!(
        machine
            .presenter()
            .events()
            .contains(&PresentationEvent::BoardCleared)
    );
}

#[tokio::test]
async fn test_click_ignored_while_remote_to_move() {
    let service = MockService::default();
    service.place(cell(0, 0), Symbol::Ex);
    let mut machine = window(&service).await;

    assert_eq!(machine.current_turn(), Role::Remote);
    assert!(!machine.input_enabled());
    let t = machine.handle_human_click(cell(1, 1)).await.unwrap();
    assert_eq!(t, Transition::Ignored);
    assert!(service.submitted().is_empty());
}

#[tokio::test]
async fn test_computer_opens_on_empty_board() {
    let service = MockService::default();
    let mut machine = window(&service).await;

    let t = machine.handle_computer_move().await.unwrap();

    assert_eq!(t, Transition::Continued);
    assert_eq!(service.submitted(), vec![None]);
    assert_eq!(machine.board().get(cell(0, 0)), Square::Occupied(Symbol::Oh));
    assert_eq!(machine.current_turn(), Role::Human);
    assert!(machine.input_enabled());

    // The board is no longer blank and the human is to move.
    let t = machine.handle_computer_move().await.unwrap();
    assert_eq!(t, Transition::Ignored);
    assert_eq!(service.submitted().len(), 1);
}

#[tokio::test]
async fn test_computer_move_completes_pending_turn() {
    let service = MockService::default();
    service.place(cell(1, 1), Symbol::Ex);
    let mut machine = window(&service).await;
    assert_eq!(machine.current_turn(), Role::Remote);

    let t = machine.handle_computer_move().await.unwrap();

    assert_eq!(t, Transition::Continued);
    assert_eq!(machine.board().get(cell(0, 0)), Square::Occupied(Symbol::Oh));
    assert_eq!(machine.current_turn(), Role::Human);
}

#[tokio::test]
async fn test_restart_after_game_over() {
    let service = MockService::default();
    service.place(cell(0, 0), Symbol::Ex);
    service.place(cell(0, 1), Symbol::Oh);
    service.set_status(GameStatus::Tied);
    let mut machine = window(&service).await;
    assert_eq!(machine.state(), MachineState::Tied);

    let t = machine.handle_restart().await.unwrap();

    assert_eq!(t, Transition::Restarted);
    assert_eq!(service.restarts(), 1);
    assert!(machine.board().is_blank());
    assert_eq!(machine.state(), MachineState::InProgress);
    assert_eq!(machine.current_turn(), Role::Human);
    assert!(machine.input_enabled());
}

#[tokio::test]
async fn test_failed_restart_keeps_finished_game() {
    let service = MockService::default();
    service.set_status(GameStatus::Tied);
    let mut machine = window(&service).await;
    service.fail_next(GameError::service("HTTP 500 Internal Server Error"));

    assert!(machine.handle_restart().await.is_err());

    assert_eq!(machine.state(), MachineState::Tied);
    assert_eq!(service.restarts(), 0);
    assert_eq!(machine.presenter().errors().len(), 1);
}

#[tokio::test]
async fn test_click_when_remote_game_already_over() {
    let service = MockService::default();
    let mut machine = window(&service).await;
    service.set_status(GameStatus::Tied);

    let t = machine.handle_human_click(cell(0, 0)).await.unwrap();

    assert_eq!(t, Transition::Stale { foreign: vec![] });
    assert_eq!(machine.state(), MachineState::Tied);
    assert!(service.submitted().is_empty());
    assert!(machine.board().is_blank());
}

#[tokio::test]
async fn test_explicit_turn_field_overrides_parity() {
    let service = MockService::default();
    service.set_turn(Some(Symbol::Oh));
    let mut machine = window(&service).await;

    assert!(machine.board().is_blank());
    assert_eq!(machine.current_turn(), Role::Remote);
    assert!(!machine.input_enabled());
    let t = machine.handle_human_click(cell(1, 1)).await.unwrap();
    assert_eq!(t, Transition::Ignored);
    assert!(service.submitted().is_empty());

    // One ex on the board: parity says the computer moves, the field says otherwise.
    service.place(cell(0, 0), Symbol::Ex);
    service.set_turn(Some(Symbol::Ex));
    machine.refresh().await.unwrap();

    assert_eq!(machine.current_turn(), Role::Human);
    assert!(machine.input_enabled());
}
