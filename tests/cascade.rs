mod common;

use common::{create, fetch, ids, pool, user};
use neuro::{
    error::AppError,
    services::{cascade, documents},
};

#[tokio::test]
async fn archive_moves_the_whole_subtree_to_trash() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "A", None).await;
    let child = create(&pool, &alice, "B", Some(&root)).await;

    let outcome = cascade::archive(&pool, &alice, &root).await.unwrap();
    assert_eq!(outcome.document.id, root);
    assert!(outcome.document.is_archived);
    assert_eq!(outcome.affected, vec![root.clone(), child.clone()]);

    let trash = documents::list_trash(&pool, &alice).await.unwrap();
    assert_eq!(ids(&trash), vec![child, root.clone()]);
    assert!(documents::list_children(&pool, &alice, Some(&root)).await.unwrap().is_empty());
    assert!(documents::list_children(&pool, &alice, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn archive_reaches_every_descendant() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let a = create(&pool, &alice, "A", Some(&root)).await;
    let b = create(&pool, &alice, "B", Some(&root)).await;
    let a1 = create(&pool, &alice, "A1", Some(&a)).await;
    let a1x = create(&pool, &alice, "A1x", Some(&a1)).await;
    let unrelated = create(&pool, &alice, "Elsewhere", None).await;

    let outcome = cascade::archive(&pool, &alice, &root).await.unwrap();
    assert_eq!(outcome.affected.len(), 5);

    for id in [&root, &a, &b, &a1, &a1x] {
        assert!(fetch(&pool, id).await.unwrap().is_archived, "{id} not archived");
    }
    assert!(!fetch(&pool, &unrelated).await.unwrap().is_archived);
}

#[tokio::test]
async fn archiving_twice_is_a_successful_no_op() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    create(&pool, &alice, "Child", Some(&root)).await;

    let first = cascade::archive(&pool, &alice, &root).await.unwrap();
    let second = cascade::archive(&pool, &alice, &root).await.unwrap();

    assert_eq!(first.affected, second.affected);
    assert_eq!(documents::list_trash(&pool, &alice).await.unwrap().len(), 2);
}

#[tokio::test]
async fn archive_and_restore_round_trip() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "A", None).await;
    let child = create(&pool, &alice, "B", Some(&root)).await;

    cascade::archive(&pool, &alice, &root).await.unwrap();
    let outcome = cascade::restore(&pool, &alice, &root).await.unwrap();

    assert!(!outcome.document.is_archived);
    assert!(!fetch(&pool, &root).await.unwrap().is_archived);
    assert!(!fetch(&pool, &child).await.unwrap().is_archived);
    assert_eq!(
        ids(&documents::list_children(&pool, &alice, None).await.unwrap()),
        vec![root.clone()]
    );
    assert_eq!(
        ids(&documents::list_children(&pool, &alice, Some(&root)).await.unwrap()),
        vec![child]
    );
    assert!(documents::list_trash(&pool, &alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn restoring_under_an_archived_parent_detaches_to_root() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let child = create(&pool, &alice, "Child", Some(&root)).await;
    let grandchild = create(&pool, &alice, "Grandchild", Some(&child)).await;
    cascade::archive(&pool, &alice, &root).await.unwrap();

    let outcome = cascade::restore(&pool, &alice, &child).await.unwrap();
    assert_eq!(outcome.document.parent_id, None);
    assert!(!outcome.document.is_archived);

    // only the restored node moves; its own children keep their parent
    let grandchild = fetch(&pool, &grandchild).await.unwrap();
    assert_eq!(grandchild.parent_id.as_deref(), Some(child.as_str()));
    assert!(!grandchild.is_archived);

    assert!(fetch(&pool, &root).await.unwrap().is_archived);
    assert_eq!(
        ids(&documents::list_children(&pool, &alice, None).await.unwrap()),
        vec![child]
    );
}

#[tokio::test]
async fn restoring_under_a_live_parent_keeps_the_parent() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let child = create(&pool, &alice, "Child", Some(&root)).await;
    cascade::archive(&pool, &alice, &child).await.unwrap();
    assert!(!fetch(&pool, &root).await.unwrap().is_archived);

    let outcome = cascade::restore(&pool, &alice, &child).await.unwrap();
    assert_eq!(outcome.document.parent_id.as_deref(), Some(root.as_str()));
    assert_eq!(
        ids(&documents::list_children(&pool, &alice, Some(&root)).await.unwrap()),
        vec![child]
    );
}

#[tokio::test]
async fn restoring_with_a_deleted_parent_keeps_the_dangling_reference() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let child = create(&pool, &alice, "Child", Some(&root)).await;
    cascade::archive(&pool, &alice, &child).await.unwrap();
    documents::remove(&pool, &alice, &root).await.unwrap();

    let outcome = cascade::restore(&pool, &alice, &child).await.unwrap();
    assert_eq!(outcome.document.parent_id.as_deref(), Some(root.as_str()));
    assert!(!outcome.document.is_archived);
}

#[tokio::test]
async fn restore_overrides_previously_archived_descendants() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let child = create(&pool, &alice, "Child", Some(&root)).await;
    cascade::archive(&pool, &alice, &child).await.unwrap();
    cascade::archive(&pool, &alice, &root).await.unwrap();

    cascade::restore(&pool, &alice, &root).await.unwrap();
    assert!(!fetch(&pool, &child).await.unwrap().is_archived);
}

#[tokio::test]
async fn missing_document_is_not_found() {
    let pool = pool().await;
    let alice = user("alice");

    assert!(matches!(
        cascade::archive(&pool, &alice, "missing").await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        cascade::restore(&pool, &alice, "missing").await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn failure_mid_cascade_reports_progress_and_retry_converges() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let a = create(&pool, &alice, "A", Some(&root)).await;
    let b = create(&pool, &alice, "B", Some(&root)).await;
    let poisoned = create(&pool, &alice, "poison", Some(&a)).await;

    sqlx::query(
        r#"
        CREATE TRIGGER reject_poison BEFORE UPDATE OF is_archived ON documents
        WHEN NEW.title = 'poison'
        BEGIN
            SELECT RAISE(ABORT, 'poisoned row');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let err = cascade::archive(&pool, &alice, &root).await.unwrap_err();
    let failure = match err {
        AppError::Cascade(failure) => failure,
        other => panic!("expected cascade failure, got {other:?}"),
    };
    assert_eq!(failure.root_id, root);
    assert_eq!(failure.failed_id, poisoned);
    assert_eq!(failure.patched.len(), 3);
    assert!(failure.patched.contains(&a));
    assert!(failure.patched.contains(&b));

    // no rollback: what was patched stays patched
    assert!(fetch(&pool, &root).await.unwrap().is_archived);
    assert!(fetch(&pool, &a).await.unwrap().is_archived);
    assert!(fetch(&pool, &b).await.unwrap().is_archived);
    assert!(!fetch(&pool, &poisoned).await.unwrap().is_archived);

    sqlx::query("DROP TRIGGER reject_poison")
        .execute(&pool)
        .await
        .unwrap();

    let outcome = cascade::archive(&pool, &alice, &root).await.unwrap();
    assert_eq!(outcome.affected.len(), 4);
    assert!(fetch(&pool, &poisoned).await.unwrap().is_archived);
}

#[tokio::test]
async fn descendant_deleted_mid_cascade_is_a_cascade_error() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let first = create(&pool, &alice, "first", Some(&root)).await;
    let second = create(&pool, &alice, "second", Some(&root)).await;

    // patching the first sibling deletes the second before its turn comes
    sqlx::query(
        r#"
        CREATE TRIGGER delete_sibling AFTER UPDATE OF is_archived ON documents
        WHEN NEW.title = 'first' AND NEW.is_archived = 1
        BEGIN
            DELETE FROM documents WHERE title = 'second';
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let err = cascade::archive(&pool, &alice, &root).await.unwrap_err();
    let failure = match err {
        AppError::Cascade(failure) => failure,
        other => panic!("expected cascade failure, got {other:?}"),
    };
    assert_eq!(failure.failed_id, second);
    assert_eq!(failure.patched, vec![root.clone(), first.clone()]);

    let retry = cascade::archive(&pool, &alice, &root).await.unwrap();
    assert_eq!(retry.affected, vec![root, first]);
}

#[tokio::test]
async fn cycles_in_stored_data_do_not_loop_forever() {
    let pool = pool().await;
    let alice = user("alice");

    let x = create(&pool, &alice, "X", None).await;
    let y = create(&pool, &alice, "Y", Some(&x)).await;
    sqlx::query("UPDATE documents SET parent_id = ? WHERE id = ?")
        .bind(&y)
        .bind(&x)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = cascade::archive(&pool, &alice, &x).await.unwrap();
    assert_eq!(outcome.affected, vec![x.clone(), y.clone()]);

    let outcome = cascade::restore(&pool, &alice, &x).await.unwrap();
    assert_eq!(outcome.affected.len(), 2);
}

#[tokio::test]
async fn deep_chains_are_walked_without_recursion() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Level 0", None).await;
    let mut parent = root.clone();
    for level in 1..300 {
        parent = create(&pool, &alice, &format!("Level {level}"), Some(&parent)).await;
    }
    let deepest = parent;

    let outcome = cascade::archive(&pool, &alice, &root).await.unwrap();
    assert_eq!(outcome.affected.len(), 300);
    assert!(fetch(&pool, &deepest).await.unwrap().is_archived);
}

#[tokio::test]
async fn cascade_only_touches_the_callers_documents() {
    let pool = pool().await;
    let alice = user("alice");
    let bob = user("bob");

    let root = create(&pool, &alice, "Root", None).await;
    // a foreign row pointing at alice's document, written directly
    let foreign = create(&pool, &bob, "Foreign", None).await;
    sqlx::query("UPDATE documents SET parent_id = ? WHERE id = ?")
        .bind(&root)
        .bind(&foreign)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = cascade::archive(&pool, &alice, &root).await.unwrap();
    assert_eq!(outcome.affected, vec![root]);
    assert!(!fetch(&pool, &foreign).await.unwrap().is_archived);
}

#[tokio::test]
async fn overlapping_cascades_converge() {
    let pool = pool().await;
    let alice = user("alice");

    let root = create(&pool, &alice, "Root", None).await;
    let child = create(&pool, &alice, "Child", Some(&root)).await;
    let grandchild = create(&pool, &alice, "Grandchild", Some(&child)).await;

    let (p1, a1) = (pool.clone(), alice.clone());
    let (p2, a2) = (pool.clone(), alice.clone());
    let (r1, c1) = (root.clone(), child.clone());
    let t1 = tokio::spawn(async move { cascade::archive(&p1, &a1, &r1).await });
    let t2 = tokio::spawn(async move { cascade::archive(&p2, &a2, &c1).await });

    let (first, second) = tokio::join!(t1, t2);
    first.unwrap().unwrap();
    second.unwrap().unwrap();

    for id in [&root, &child, &grandchild] {
        assert!(fetch(&pool, id).await.unwrap().is_archived);
    }
}
