//! Longer editing sequences
//!
//! This tests:
//! - Key uniqueness across create / copy / paste / delete chains
//! - Reconciling copies edited the way the property panel edits them
//! - Key reuse after deletion

use pagecraft_editor::{patch_children, ChildEdit, EditSession, Key, Node, SessionOptions};
use pagecraft_tree::StyleValue;
use std::collections::HashSet;

fn assert_unique_keys(session: &EditSession) {
    let mut seen = HashSet::new();
    for node in session.nodes() {
        for key in node.keys() {
            assert!(seen.insert(key.clone()), "duplicate key {}", key);
            assert!(session.keys().contains(&key), "key {} not tracked", key);
        }
    }
    assert_eq!(seen.len(), session.keys().len());
}

#[test]
fn test_repeated_paste_keeps_keys_unique() {
    let mut session = EditSession::new();
    let page = session.new_container(None, "main").unwrap();
    let card = session.new_container(Some(&page), "div").unwrap();
    session.new_single(Some(&card), "img").unwrap();
    session.new_text(Some(&card), "Caption").unwrap();

    session.copy(&card).unwrap();
    for _ in 0..5 {
        session.paste(Some(&page)).unwrap();
        assert_unique_keys(&session);
    }

    assert_eq!(session.get(&page).unwrap().children.len(), 6);
    assert_eq!(session.nodes()[0].count(), 1 + 6 * 3);
}

#[test]
fn test_paste_copy_of_copy() {
    let mut session = EditSession::new();
    let list = session.new_container(None, "ul").unwrap();
    let item = session.new_container(Some(&list), "li").unwrap();

    session.copy(&item).unwrap();
    let second = session.paste(Some(&list)).unwrap();
    session.copy(&second).unwrap();
    let third = session.paste(Some(&second)).unwrap();

    assert_eq!(session.parent_of(&third).unwrap().key, second);
    assert_unique_keys(&session);
}

#[test]
fn test_delete_then_create_reuses_smallest_key() {
    let mut session = EditSession::new();
    let root = session.new_container(None, "div").unwrap();
    let keys: Vec<Key> = (0..4)
        .map(|_| session.new_container(Some(&root), "span").unwrap())
        .collect();

    session.delete(&keys[2]).unwrap();
    session.delete(&keys[0]).unwrap();

    assert_eq!(session.new_text(Some(&root), "a").unwrap(), keys[0]);
    assert_eq!(session.new_text(Some(&root), "b").unwrap(), keys[2]);
    assert_eq!(session.new_text(Some(&root), "c").unwrap(), Key::Int(5));
    assert_unique_keys(&session);
}

#[test]
fn test_monotonic_keys_when_reclaim_disabled() {
    let mut session = EditSession::with_options(SessionOptions {
        reclaim_deleted_keys: false,
    });
    let root = session.new_container(None, "div").unwrap();
    let child = session.new_container(Some(&root), "span").unwrap();
    session.delete(&child).unwrap();

    assert_eq!(session.new_container(Some(&root), "span").unwrap(), Key::Int(2));
}

#[test]
fn test_property_panel_edit_round_trip() {
    let mut session = EditSession::new();
    let root = session.new_container(None, "div").unwrap();
    let button = session.new_container(Some(&root), "button").unwrap();
    session.new_text(Some(&button), "Save").unwrap();

    // The panel works on a detached copy of the selected node
    let edited = session
        .get(&button)
        .unwrap()
        .clone()
        .with_id("save")
        .with_class("primary")
        .with_style("padding", 8)
        .with_attr("type", "submit")
        .with_position(12.0, 24.0);

    assert!(session.edit(&edited).unwrap());
    assert_eq!(session.get(&button).unwrap(), &edited);

    // Editing again with the same copy is a no-op
    let snapshot = session.nodes().to_vec();
    assert!(session.edit(&edited).unwrap());
    assert_eq!(session.nodes(), snapshot.as_slice());

    let props = session.get(&button).unwrap().props.clone().unwrap();
    assert_eq!(props.style.get("padding"), Some(&StyleValue::Number(8.0)));
}

#[test]
fn test_edit_after_delete_is_noop() {
    let mut session = EditSession::new();
    let root = session.new_container(None, "div").unwrap();
    let child = session.new_container(Some(&root), "span").unwrap();

    let stale = session.get(&child).unwrap().clone().with_class("gone");
    session.delete(&child).unwrap();

    let snapshot = session.nodes().to_vec();
    assert!(!session.edit(&stale).unwrap());
    assert_eq!(session.nodes(), snapshot.as_slice());
}

#[test]
fn test_child_edit_commands_against_root() {
    let mut session = EditSession::new();
    session.new_container(None, "header").unwrap();
    let footer = session.new_container(None, "footer").unwrap();

    session
        .edit_children(
            None,
            ChildEdit::Insert {
                index: 1,
                node: Node::container("main", 7u64),
            },
        )
        .unwrap();

    let tags: Vec<&str> = session.nodes().iter().map(|node| node.tag.as_str()).collect();
    assert_eq!(tags, vec!["header", "main", "footer"]);

    session
        .edit_children(None, ChildEdit::Remove { key: footer.clone() })
        .unwrap();
    assert!(session.get(&footer).is_none());
    assert_unique_keys(&session);

    // The removed key is the smallest free one again
    assert_eq!(session.new_container(None, "footer").unwrap(), footer);
}

#[test]
fn test_single_edits_converge() {
    let base = vec![
        Node::container("li", 0u64),
        Node::container("li", 1u64).with_child(Node::text("b", 2u64)),
        Node::container("li", 3u64),
    ];

    let mut appended = base.clone();
    appended.push(Node::container("li", 4u64));

    let mut removed = base.clone();
    removed.remove(1);

    let mut replaced = base.clone();
    replaced[1] = Node::single("hr", 5u64);

    let mut inserted = base.clone();
    inserted.insert(0, Node::container("li", 6u64));

    for target in [appended, removed, replaced, inserted, vec![]] {
        let mut children = base.clone();
        patch_children(&mut children, &target);
        assert_eq!(children, target);
    }
}
