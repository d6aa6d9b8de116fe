use std::sync::Arc;
use std::time::Duration;
use taskboard_core::{
    apply_action, boards_or_seed, delete_board, seed_boards, ArgbColor, BackgroundSaver, Board,
    BoardAction, BoardGateway, KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult, Task,
    TaskId, BOARDS_KEY,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

fn memory_gateway() -> BoardGateway<SqliteKeyValueStore> {
    BoardGateway::new(SqliteKeyValueStore::open_in_memory().unwrap())
}

fn board(title: &str) -> Board {
    Board::new(title, ArgbColor::from_packed(0xFFD1_C4E9))
}

/// Store whose writes always fail.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::InvalidKey)
    }

    fn remove(&self, _key: &str) -> StoreResult<bool> {
        Ok(false)
    }
}

#[test]
fn load_without_document_is_empty() {
    let gateway = memory_gateway();
    assert!(gateway.load().is_empty());
    assert_eq!(boards_or_seed(gateway.load()).len(), 4);
}

#[test]
fn save_then_load_roundtrips_boards() {
    let gateway = memory_gateway();
    let mut boards = seed_boards();
    boards[2].tasks = vec![Task::new(TaskId(1), "standup")];

    gateway.save(&boards).unwrap();
    assert_eq!(gateway.load(), boards);

    gateway.save(&[]).unwrap();
    assert!(gateway.load().is_empty());
}

#[test]
fn saving_twice_keeps_last_value_without_duplication() {
    let gateway = memory_gateway();
    let boards = seed_boards();

    gateway.save(&boards).unwrap();
    gateway.save(&boards).unwrap();
    assert_eq!(gateway.load(), boards);

    let edited = apply_action(
        &boards,
        &BoardAction::RenameBoard {
            title: "Work".to_string(),
            new_title: "Office".to_string(),
        },
    );
    gateway.save(&edited).unwrap();
    assert_eq!(gateway.load(), edited);
}

#[test]
fn delete_then_load_keeps_relative_order() {
    let gateway = memory_gateway();
    let boards = vec![board("A"), board("B"), board("C")];
    gateway.save(&boards).unwrap();

    gateway.save(&delete_board(&gateway.load(), "B")).unwrap();

    let loaded = gateway.load();
    assert_eq!(loaded, vec![boards[0].clone(), boards[2].clone()]);
}

#[test]
fn corrupt_document_degrades_to_empty() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    store.put(BOARDS_KEY, "{definitely not a board list").unwrap();
    let gateway = BoardGateway::new(store);

    assert!(gateway.load().is_empty());
    assert!(gateway.subscribe().recv().unwrap().is_empty());
}

#[test]
fn custom_key_isolates_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.sqlite3");

    let primary = BoardGateway::new(SqliteKeyValueStore::open(&path).unwrap());
    let secondary =
        BoardGateway::with_key(SqliteKeyValueStore::open(&path).unwrap(), "archived_boards");
    assert_eq!(secondary.key(), "archived_boards");

    primary.save(&seed_boards()).unwrap();
    assert!(secondary.load().is_empty());
}

#[test]
fn boards_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.sqlite3");
    let boards = vec![board("Persisted")];

    {
        let gateway = BoardGateway::new(SqliteKeyValueStore::open(&path).unwrap());
        gateway.save(&boards).unwrap();
    }

    let reopened = BoardGateway::new(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(reopened.load(), boards);
}

#[test]
fn failed_write_is_reported_and_not_published() {
    let gateway = BoardGateway::new(ReadOnlyStore);
    let subscription = gateway.subscribe();
    assert_eq!(subscription.recv().unwrap(), Vec::<Board>::new());

    assert!(gateway.save(&seed_boards()).is_err());
    assert!(subscription.try_recv().is_none());
}

#[test]
fn subscribers_observe_current_value_then_each_save() {
    let gateway = memory_gateway();
    let early = gateway.subscribe();
    assert!(early.recv_timeout(RECV_TIMEOUT).unwrap().is_empty());

    let first = vec![board("First")];
    let second = vec![board("First"), board("Second")];
    gateway.save(&first).unwrap();
    gateway.save(&second).unwrap();

    assert_eq!(early.recv_timeout(RECV_TIMEOUT).unwrap(), first);
    assert_eq!(early.recv_timeout(RECV_TIMEOUT).unwrap(), second);

    let late = gateway.subscribe();
    assert_eq!(late.latest().unwrap(), second);
}

#[test]
fn dropped_subscribers_are_pruned_on_publish() {
    let gateway = memory_gateway();
    let kept = gateway.subscribe();
    drop(gateway.subscribe());
    assert_eq!(gateway.subscriber_count(), 2);

    gateway.save(&seed_boards()).unwrap();
    assert_eq!(gateway.subscriber_count(), 1);
    assert_eq!(kept.latest().unwrap(), gateway.load());
}

#[test]
fn subscription_iterator_ends_when_gateway_is_dropped() {
    let gateway = memory_gateway();
    let subscription = gateway.subscribe();
    gateway.save(&seed_boards()).unwrap();
    drop(gateway);

    let received: Vec<Vec<Board>> = subscription.collect();
    assert_eq!(received.len(), 2);
    assert!(received[0].is_empty());
    assert_eq!(received[1].len(), 4);
}

#[test]
fn background_saver_coalesces_to_last_submission() {
    let gateway = Arc::new(memory_gateway());
    let saver = BackgroundSaver::spawn(Arc::clone(&gateway)).unwrap();

    let first = vec![board("First")];
    let last = vec![board("Last"), board("Board")];
    saver.submit(first).unwrap();
    saver.submit(last.clone()).unwrap();
    saver.flush().unwrap();

    assert_eq!(gateway.load(), last);
    assert_eq!(saver.failed_saves(), 0);
}

#[test]
fn background_saver_delivers_to_subscribers_on_another_thread() {
    let gateway = Arc::new(memory_gateway());
    let subscription = gateway.subscribe();
    assert!(subscription.recv_timeout(RECV_TIMEOUT).unwrap().is_empty());

    let saver = BackgroundSaver::spawn(Arc::clone(&gateway)).unwrap();
    let boards = seed_boards();
    saver.submit(boards.clone()).unwrap();

    assert_eq!(subscription.recv_timeout(RECV_TIMEOUT).unwrap(), boards);
}

#[test]
fn background_saver_counts_failures_and_drains_on_drop() {
    let failing = Arc::new(BoardGateway::new(ReadOnlyStore));
    let saver = BackgroundSaver::spawn(Arc::clone(&failing)).unwrap();
    saver.submit(seed_boards()).unwrap();
    saver.flush().unwrap();
    assert_eq!(saver.failed_saves(), 1);
    drop(saver);

    let gateway = Arc::new(memory_gateway());
    let saver = BackgroundSaver::spawn(Arc::clone(&gateway)).unwrap();
    saver.submit(vec![board("Queued")]).unwrap();
    drop(saver);
    assert_eq!(gateway.load()[0].title, "Queued");
}
