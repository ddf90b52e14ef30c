use workflow_canvas::history::HistoryManager;

#[test]
fn test_history_basic() {
    let mut history = HistoryManager::<i32>::new(5);
    history.push(0);
    history.push(1);
    history.push(2);

    assert!(history.can_undo());
    assert!(!history.can_redo());

    // --- UNDO ---
    assert_eq!(history.undo(), Some(&1));
    assert_eq!(history.undo(), Some(&0));
    // Start of history: no-op
    assert_eq!(history.undo(), None);
    assert_eq!(history.index(), 0);

    // --- REDO ---
    assert_eq!(history.redo(), Some(&1));
    assert_eq!(history.redo(), Some(&2));
    // End of history: no-op
    assert_eq!(history.redo(), None);
    assert_eq!(history.current(), Some(&2));
}

#[test]
fn test_push_after_undo_discards_redo_branch() {
    let mut history = HistoryManager::<&str>::new(10);
    history.push("a");
    history.push("b");
    history.push("c");

    history.undo();
    history.undo();
    history.push("d");

    assert_eq!(history.len(), 2);
    assert!(!history.can_redo());
    assert_eq!(history.current(), Some(&"d"));
    assert_eq!(history.undo(), Some(&"a"));
}

#[test]
fn test_limit_drops_oldest() {
    let mut history = HistoryManager::<i32>::new(3);
    for i in 0..5 {
        history.push(i);
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.index(), 2);
    assert_eq!(history.undo(), Some(&3));
    assert_eq!(history.undo(), Some(&2));
    assert_eq!(history.undo(), None);
}

#[test]
fn test_default_limit_is_one_hundred() {
    let mut history = HistoryManager::<usize>::default();
    for i in 0..150 {
        history.push(i);
    }
    assert_eq!(history.max_history, 100);
    assert_eq!(history.len(), 100);
    assert_eq!(history.current(), Some(&149));
}

#[test]
fn test_clear_keeps_current_entry() {
    let mut history = HistoryManager::<i32>::new(10);
    history.push(1);
    history.push(2);
    history.push(3);
    history.undo();

    history.clear();

    assert_eq!(history.len(), 1);
    assert_eq!(history.current(), Some(&2));
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}
