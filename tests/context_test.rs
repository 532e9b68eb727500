use ibex::context::ContextStore;

#[test]
fn capacity_never_exceeded() {
    let mut ctx = ContextStore::new(3, 50);
    for i in 0..10 {
        ctx.append(&format!("user {i}"), &format!("reply {i}"));
        assert!(ctx.len() <= 3);
    }
    assert_eq!(ctx.len(), 3);
}

#[test]
fn fifo_eviction_keeps_most_recent_in_order() {
    let mut ctx = ContextStore::new(3, 50);
    for i in 0..5 {
        ctx.append(&format!("user {i}"), &format!("reply {i}"));
    }

    let recent = ctx.recent(3);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].user, "user 2");
    assert_eq!(recent[1].user, "user 3");
    assert_eq!(recent[2].user, "user 4");
    assert_eq!(recent[2].assistant, "reply 4");
}

#[test]
fn recent_with_fewer_turns_than_requested() {
    let mut ctx = ContextStore::new(5, 50);
    ctx.append("only one", "only reply");

    let recent = ctx.recent(3);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].user, "only one");
}

#[test]
fn recent_zero_returns_empty() {
    let mut ctx = ContextStore::new(3, 50);
    ctx.append("a", "b");
    assert!(ctx.recent(0).is_empty());
}

#[test]
fn excerpts_truncated_to_budget() {
    let mut ctx = ContextStore::new(3, 10);
    ctx.append(
        "a very long user message that keeps going",
        "a very long assistant reply that keeps going",
    );

    let recent = ctx.recent(1);
    assert_eq!(recent[0].user, "a very lon");
    assert_eq!(recent[0].assistant, "a very lon");
}

#[test]
fn truncation_is_char_boundary_safe() {
    let mut ctx = ContextStore::new(3, 5);
    ctx.append("héllö wörld", "日本語のテキストです");

    let recent = ctx.recent(1);
    assert_eq!(recent[0].user, "héllö");
    assert_eq!(recent[0].assistant, "日本語のテ");
}

#[test]
fn short_excerpts_kept_whole() {
    let mut ctx = ContextStore::new(3, 50);
    ctx.append("hi", "hey");

    let recent = ctx.recent(1);
    assert_eq!(recent[0].user, "hi");
    assert_eq!(recent[0].assistant, "hey");
}

#[test]
fn clear_empties_the_store() {
    let mut ctx = ContextStore::new(3, 50);
    ctx.append("a", "b");
    ctx.append("c", "d");
    ctx.clear();

    assert!(ctx.is_empty());
    assert!(ctx.recent(3).is_empty());
}

#[test]
fn capacity_accessor_reports_configuration() {
    let ctx = ContextStore::new(7, 50);
    assert_eq!(ctx.capacity(), 7);
    assert!(ctx.is_empty());
}
