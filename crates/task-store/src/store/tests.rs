//! Store Tests
//!
//! Tests for MemoryStore and the store contract.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::domain::{task_path, Draft, Lifecycle, StoreResult, Task, TaskId, ValidationError};
    use crate::session::{delete_task, submit_draft, TaskListSession};
    use crate::snapshot::{project, Snapshot};
    use crate::store::{MemoryStore, SnapshotCallback, Subscription, TaskStore};

    type Seen = Rc<RefCell<Vec<Option<Vec<Task>>>>>;

    fn setup_store() -> MemoryStore {
        MemoryStore::with_seed(42)
    }

    /// Subscribe and collect every projected delivery
    fn collect(store: &MemoryStore) -> (Subscription, Seen) {
        let seen: Seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = store
            .subscribe(Box::new(move |snapshot| sink.borrow_mut().push(project(snapshot))))
            .expect("Failed to subscribe");
        (subscription, seen)
    }

    #[tokio::test]
    async fn test_submit_writes_one_record_with_untrimmed_text() {
        let store = Rc::new(setup_store());
        let existing = store.create("first").await.unwrap();

        let mut draft = Draft::new();
        draft.set("  Walk the dog  ");
        let write = submit_draft(&mut draft, Rc::clone(&store)).expect("Draft should be valid");
        assert_eq!(draft.text(), "");
        let id = write.await.expect("Failed to create");

        assert_ne!(id, existing);
        assert_eq!(store.len(), 2);
        let snapshot = store.snapshot().unwrap();
        assert_eq!(
            snapshot.get(id.as_str()),
            Some(&serde_json::json!({ "task": "  Walk the dog  " }))
        );
    }

    #[tokio::test]
    async fn test_blank_submit_creates_nothing() {
        let store = Rc::new(RecordingStore::default());

        for blank in ["", "   ", "\t\n "] {
            let mut draft = Draft::new();
            draft.set(blank);

            let result = submit_draft(&mut draft, Rc::clone(&store));
            assert!(matches!(result, Err(ValidationError::EmptyTask)));
            assert_eq!(draft.text(), blank);
        }
        assert!(store.created.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_submit_issues_exactly_one_create() {
        let store = Rc::new(RecordingStore::default());
        let mut draft = Draft::new();
        draft.set("Buy milk");

        submit_draft(&mut draft, Rc::clone(&store))
            .expect("Draft should be valid")
            .await
            .expect("Failed to create");

        assert_eq!(*store.created.borrow(), vec!["Buy milk".to_string()]);
    }

    #[tokio::test]
    async fn test_keys_are_unique() {
        let store = setup_store();
        let mut ids = Vec::new();
        for n in 0..50 {
            ids.push(store.create(&format!("task {}", n)).await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert_eq!(store.len(), 50);
    }

    #[tokio::test]
    async fn test_subscribe_delivers_current_value_immediately() {
        let store = setup_store();
        let (_subscription, seen) = collect(&store);
        assert_eq!(*seen.borrow(), vec![None]);

        store.create("Buy milk").await.unwrap();
        let (_other, seen_later) = collect(&store);
        let first = seen_later.borrow()[0].clone().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "Buy milk");
    }

    #[tokio::test]
    async fn test_every_change_delivers_full_snapshot() {
        let store = setup_store();
        let other_client = store.clone();
        let (_subscription, seen) = collect(&store);

        store.create("one").await.unwrap();
        other_client.create("two").await.unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        let texts: Vec<String> = seen[2]
            .clone()
            .unwrap()
            .into_iter()
            .map(|task| task.text)
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_remove_of_missing_key_is_silent() {
        let store = setup_store();
        let (_subscription, seen) = collect(&store);

        store.remove(&TaskId::new("-missing")).await.expect("Remove failed");
        assert_eq!(seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_unsubscribed_listener_gets_nothing() {
        let store = setup_store();
        let (subscription, seen) = collect(&store);
        assert_eq!(store.listener_count(), 1);

        subscription.unsubscribe();
        assert_eq!(store.listener_count(), 0);

        store.create("after teardown").await.unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_dropping_subscription_detaches() {
        let store = setup_store();
        {
            let (_subscription, _seen) = collect(&store);
            assert_eq!(store.listener_count(), 1);
        }
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = setup_store();
        let seen: Seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut session = TaskListSession::mount(&store, move |tasks| sink.borrow_mut().push(tasks))
            .expect("Failed to mount");
        assert_eq!(session.lifecycle(), Lifecycle::Subscribed);

        store.create("x").await.unwrap();
        session.unmount();
        assert_eq!(session.lifecycle(), Lifecycle::Unsubscribed);
        session.unmount();

        store.create("y").await.unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(store.listener_count(), 0);
    }

    /// Store that records requests and only ever delivers its initial snapshot
    #[derive(Default)]
    struct RecordingStore {
        created: RefCell<Vec<String>>,
        removed: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl TaskStore for RecordingStore {
        async fn create(&self, text: &str) -> StoreResult<TaskId> {
            self.created.borrow_mut().push(text.to_string());
            Ok(TaskId::new("-recorded"))
        }

        fn subscribe(&self, on_snapshot: SnapshotCallback) -> StoreResult<Subscription> {
            let snapshot = Snapshot::from_value(serde_json::json!({
                "a": { "task": "x" },
                "b": { "task": "y" }
            }));
            on_snapshot(snapshot.as_ref());
            Ok(Subscription::new(|| {}))
        }

        async fn remove(&self, id: &TaskId) -> StoreResult<()> {
            self.removed.borrow_mut().push(task_path(id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_delete_issues_one_request_and_leaves_list_alone() {
        let store = Rc::new(RecordingStore::default());
        let list: Rc<RefCell<Option<Vec<Task>>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&list);
        let _session = TaskListSession::mount(&*store, move |tasks| *sink.borrow_mut() = tasks)
            .expect("Failed to mount");
        let before = list.borrow().clone();

        delete_task(Rc::clone(&store), TaskId::new("a"))
            .await
            .expect("Delete failed");

        assert_eq!(*store.removed.borrow(), vec!["users/tasks/a".to_string()]);
        assert_eq!(*list.borrow(), before);
        assert_eq!(list.borrow().as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_delete_removes_record_from_memory_store() {
        let store = Rc::new(setup_store());
        let id = store.create("Buy milk").await.unwrap();
        let (_subscription, seen) = collect(&store);

        delete_task(Rc::clone(&store), id).await.expect("Delete failed");

        assert!(store.is_empty());
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].as_ref().map(Vec::len), Some(1));
        assert_eq!(seen[1], None);
    }
}
