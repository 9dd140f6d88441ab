//! Two windows observing one remote game.
//!
//! Both machines hold clones of the same [`MockService`], so a move made
//! through one is only visible to the other after it fetches.

use strictly_remote::{
    Cell, GameSession, GameStateMachine, GameStatus, MachineState, MockService,
    RecordingPresenter, Role, Square, Symbol, Transition,
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
    machine
}

#[tokio::test]
async fn test_refresh_surfaces_foreign_moves_once() {
    let service = MockService::default();
    let mut first = window(&service).await;
    let mut second = window(&service).await;

    first.handle_human_click(cell(0, 0)).await.unwrap();

    let t = second.refresh().await.unwrap();
    assert_eq!(
        t,
        Transition::Merged {
            foreign: vec![(cell(0, 0), Symbol::Ex), (cell(0, 1), Symbol::Oh)]
        }
    );
    assert_eq!(second.board(), first.board());
    assert_eq!(second.current_turn(), Role::Human);
    assert!(second.input_enabled());

    assert_eq!(second.refresh().await.unwrap(), Transition::Unchanged);
}

#[tokio::test]
async fn test_stale_click_on_cell_taken_elsewhere() {
    let service = MockService::default();
    let mut first = window(&service).await;
    let mut second = window(&service).await;

    first.handle_human_click(cell(0, 0)).await.unwrap();

    // The second window still shows (0, 0) empty.
    let t = second.handle_human_click(cell(0, 0)).await.unwrap();

    assert_eq!(
        t,
        Transition::Stale {
            foreign: vec![(cell(0, 0), Symbol::Ex), (cell(0, 1), Symbol::Oh)]
        }
    );
    assert_eq!(service.submitted(), vec![Some(cell(0, 0))]);
    assert_eq!(second.board(), first.board());
    assert_eq!(second.current_turn(), Role::Human);
    assert!(second.input_enabled());
}

#[tokio::test]
async fn test_click_elsewhere_merges_then_plays() {
    let service = MockService::default();
    let mut first = window(&service).await;
    let mut second = window(&service).await;

    first.handle_human_click(cell(0, 0)).await.unwrap();
    let t = second.handle_human_click(cell(2, 2)).await.unwrap();

    assert_eq!(t, Transition::Continued);
    assert_eq!(service.submitted(), vec![Some(cell(0, 0)), Some(cell(2, 2))]);
    assert_eq!(second.board().get(cell(0, 0)), Square::Occupied(Symbol::Ex));
    assert_eq!(second.board().get(cell(2, 2)), Square::Occupied(Symbol::Ex));
    assert_eq!(second.board().get(cell(0, 2)), Square::Occupied(Symbol::Oh));
    assert_eq!(second.board(), &service.snapshot().board);
}

#[tokio::test]
async fn test_second_restart_adopts_new_game() {
    let service = MockService::default();
    service.set_status(GameStatus::Tied);
    let mut first = window(&service).await;
    let mut second = window(&service).await;
    assert_eq!(second.state(), MachineState::Tied);

    assert_eq!(first.handle_restart().await.unwrap(), Transition::Restarted);
    assert_eq!(service.restarts(), 1);

    let t = second.handle_restart().await.unwrap();

    assert_eq!(t, Transition::Resynced);
    assert_eq!(service.restarts(), 1);
    assert_eq!(second.state(), MachineState::InProgress);
    assert!(second.board().is_blank());
    assert!(second.input_enabled());
}

#[tokio::test]
async fn test_refresh_after_restart_elsewhere_resyncs() {
    let service = MockService::default();
    service.place(cell(1, 1), Symbol::Ex);
    service.place(cell(0, 0), Symbol::Oh);
    service.set_status(GameStatus::Tied);
    let mut first = window(&service).await;
    let mut second = window(&service).await;

    first.handle_restart().await.unwrap();
    let t = second.refresh().await.unwrap();

    assert_eq!(t, Transition::Resynced);
    assert!(second.board().is_blank());
    assert_eq!(second.state(), MachineState::InProgress);
    assert_eq!(second.current_turn(), Role::Human);
}

#[tokio::test]
async fn test_replaced_game_mid_play_resyncs() {
    let service = MockService::default();
    let mut first = window(&service).await;
    let mut second = window(&service).await;

    first.handle_human_click(cell(1, 1)).await.unwrap();
    second.refresh().await.unwrap();

    // Another client restarted and played a different opening.
    service.set_status(GameStatus::Tied);
    first.refresh().await.unwrap();
    first.handle_restart().await.unwrap();
    service.place(cell(2, 2), Symbol::Ex);
    service.place(cell(0, 0), Symbol::Oh);

    let t = second.handle_human_click(cell(0, 2)).await.unwrap();

    assert_eq!(t, Transition::Resynced);
    assert_eq!(second.board(), &service.snapshot().board);
    assert_eq!(second.board().get(cell(1, 1)), Square::Empty);
}
