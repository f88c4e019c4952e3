use super::*;

fn session() -> Session {
    Session::sign_in("test-token").expect("session")
}

#[test]
fn write_then_read_round_trips_with_revision() {
    let host = MemoryHost::new();
    let s = session();

    let rev = host
        .write_object(&s, "data/files.json", b"[]", "create", None)
        .expect("write");
    let obj = host
        .read_object(None, "data/files.json")
        .expect("read")
        .expect("present");
    assert_eq!(obj.content, b"[]");
    assert_eq!(obj.revision, rev);
}

#[test]
fn overwrite_requires_matching_revision() {
    let host = MemoryHost::new();
    let s = session();
    let first = host
        .write_object(&s, "a.txt", b"one", "create", None)
        .expect("create");

    let err = host
        .write_object(&s, "a.txt", b"two", "no marker", None)
        .unwrap_err();
    assert!(matches!(err, FileDockError::RemoteWrite { .. }));

    let second = host
        .write_object(&s, "a.txt", b"two", "update", Some(&first))
        .expect("update");

    let err = host
        .write_object(&s, "a.txt", b"three", "stale", Some(&first))
        .unwrap_err();
    assert!(err.to_string().contains("expected"));
    assert_eq!(host.content("a.txt").as_deref(), Some(&b"two"[..]));
    assert_ne!(first, second);
}

#[test]
fn listing_separates_files_and_subdirectories() {
    let host = MemoryHost::new();
    host.seed("uploads/a.pdf", b"aaaa");
    host.seed("uploads/nested/b.pdf", b"b");
    host.seed("data/files.json", b"[]");

    let entries = host.list_directory(None, "uploads").expect("list");
    assert_eq!(entries.len(), 2);
    let file = entries.iter().find(|e| e.name == "a.pdf").expect("file");
    assert_eq!(file.kind, EntryKind::File);
    assert_eq!(file.size, 4);
    assert_eq!(file.path, "uploads/a.pdf");
    let dir = entries.iter().find(|e| e.name == "nested").expect("dir");
    assert_eq!(dir.kind, EntryKind::Dir);

    assert!(host.list_directory(None, "missing").expect("list").is_empty());
}

#[test]
fn low_level_commit_sequence_moves_branch() {
    let host = MemoryHost::new();
    let s = session();
    host.seed("keep.txt", b"keep");

    let blob = host.create_blob(&s, b"big").expect("blob");
    let tip = host.branch_tip(&s).expect("tip");
    let tree = host
        .create_tree(&s, &tip.tree, &[TreeEntry::file("uploads/big.bin", blob)])
        .expect("tree");
    let commit = host
        .create_commit(&s, "Add big", &tree, &[tip.commit.clone()])
        .expect("commit");
    host.update_branch(&s, &commit).expect("update");

    assert_eq!(host.head(), commit);
    assert_eq!(host.content("uploads/big.bin").as_deref(), Some(&b"big"[..]));
    assert_eq!(host.content("keep.txt").as_deref(), Some(&b"keep"[..]));
}

#[test]
fn branch_update_must_fast_forward() {
    let host = MemoryHost::new();
    let s = session();
    let tip = host.branch_tip(&s).expect("tip");
    let side = host
        .create_commit(&s, "side", &tip.tree, &[tip.commit.clone()])
        .expect("side commit");

    host.seed("moved.txt", b"x");
    let err = host.update_branch(&s, &side).unwrap_err();
    assert!(err.to_string().contains("fast forward"));
}

#[test]
fn faults_fail_the_named_call_and_are_logged() {
    let host = MemoryHost::new();
    let s = session();
    host.fail_on(HostCall::CreateTree, "boom");

    let blob = host.create_blob(&s, b"x").expect("blob");
    let tip = host.branch_tip(&s).expect("tip");
    let err = host
        .create_tree(&s, &tip.tree, &[TreeEntry::file("x", blob)])
        .unwrap_err();
    assert!(matches!(err, FileDockError::RemoteWrite { .. }));

    host.fail_on(HostCall::ReadObject, "down");
    let err = host.read_object(None, "x").unwrap_err();
    assert!(matches!(err, FileDockError::Fetch { .. }));

    assert_eq!(
        host.calls(),
        vec![
            HostCall::CreateBlob,
            HostCall::BranchTip,
            HostCall::CreateTree,
            HostCall::ReadObject
        ]
    );
}
