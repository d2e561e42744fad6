//! Integration tests for board invariants across whole operation sequences

use chat2canvas_board::{
    reorder, BoardError, BoardStore, CanvasProject, CardDraft, CardId, ColumnId, ColumnUpdate,
    Project, ProjectId, Task,
};

fn column_ids(store: &BoardStore, project: &ProjectId) -> Vec<ColumnId> {
    store
        .project(project)
        .unwrap()
        .columns
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

fn cards_of(store: &BoardStore, project: &ProjectId, column: &ColumnId) -> Vec<(String, usize)> {
    store
        .project(project)
        .unwrap()
        .column(column)
        .unwrap()
        .cards
        .iter()
        .map(|c| (c.title.clone(), c.number))
        .collect()
}

fn assert_numbering(project: &Project) {
    for column in &project.columns {
        assert!(
            reorder::is_contiguous(&column.cards),
            "column {} is not numbered 1..N",
            column.title
        );
    }
}

fn add_cards(store: &mut BoardStore, project: &ProjectId, column: &ColumnId, titles: &[&str]) -> Vec<CardId> {
    titles
        .iter()
        .map(|title| {
            store
                .create_card(project, column, CardDraft::new(*title, "#fff"))
                .unwrap()
        })
        .collect()
}

#[test]
fn test_scenario_move_into_empty_column() {
    let mut store = BoardStore::new();
    let p1 = store.create_project("P1");
    let columns = column_ids(&store, &p1);
    let (todo, done) = (&columns[0], &columns[2]);
    let cards = add_cards(&mut store, &p1, todo, &["A", "B", "C"]);

    let landed = store
        .move_card_between_columns(&p1, &cards[1], todo, done, Some(0))
        .unwrap();

    assert_eq!(landed, 0);
    assert_eq!(
        cards_of(&store, &p1, todo),
        vec![("A".to_string(), 1), ("C".to_string(), 2)]
    );
    assert_eq!(cards_of(&store, &p1, done), vec![("B".to_string(), 1)]);
}

#[test]
fn test_scenario_import_creates_active_project() {
    let mut store = BoardStore::new();
    store.create_project("Existing");

    let id = store
        .import_project(
            r##"{"name":"X","columns":[{"title":"T","color":"#fff","cards":[{"title":"t1","color":"#000","tasks":[]}]}]}"##,
        )
        .unwrap();

    assert_eq!(store.projects().len(), 2);
    assert_eq!(store.active_project_id(), Some(&id));
    let project = store.active_project().unwrap();
    assert_eq!(project.name, "X");
    assert_eq!(project.columns.len(), 1);
    assert_eq!(project.columns[0].title, "T");
    assert_eq!(project.columns[0].cards.len(), 1);
    assert_eq!(project.columns[0].cards[0].title, "t1");
    assert_eq!(project.columns[0].cards[0].number, 1);
}

#[test]
fn test_numbering_holds_through_mixed_operations() {
    let mut store = BoardStore::new();
    let p = store.create_project("P");
    let columns = column_ids(&store, &p);
    let todo_cards = add_cards(&mut store, &p, &columns[0], &["a", "b", "c", "d", "e"]);
    add_cards(&mut store, &p, &columns[1], &["f", "g"]);

    store.reorder_cards(&p, &columns[0], 4, 0).unwrap();
    assert_numbering(store.project(&p).unwrap());

    store.delete_card(&p, &columns[0], &todo_cards[2]).unwrap();
    assert_numbering(store.project(&p).unwrap());

    store
        .move_card_between_columns(&p, &todo_cards[0], &columns[0], &columns[1], Some(1))
        .unwrap();
    assert_numbering(store.project(&p).unwrap());

    store
        .move_card_between_columns(&p, &todo_cards[1], &columns[0], &columns[2], None)
        .unwrap();
    assert_numbering(store.project(&p).unwrap());

    store.reorder_columns(&p, 0, 2).unwrap();
    assert_numbering(store.project(&p).unwrap());

    add_cards(&mut store, &p, &columns[2], &["h"]);
    assert_numbering(store.project(&p).unwrap());
}

#[test]
fn test_move_conserves_cards_and_identity() {
    let mut store = BoardStore::new();
    let p = store.create_project("P");
    let columns = column_ids(&store, &p);
    let card = store
        .create_card(
            &p,
            &columns[0],
            CardDraft::new("Ship", "#fee2e2").with_tasks(vec![Task::new("build"), Task::done("test")]),
        )
        .unwrap();
    add_cards(&mut store, &p, &columns[0], &["x"]);
    add_cards(&mut store, &p, &columns[1], &["y", "z"]);

    let before = store.project(&p).unwrap().column(&columns[0]).unwrap().card(&card).cloned().unwrap();
    let total = |store: &BoardStore| {
        let project = store.project(&p).unwrap();
        project.column(&columns[0]).unwrap().cards.len() + project.column(&columns[1]).unwrap().cards.len()
    };
    let count_before = total(&store);

    for insert in [None, Some(0), Some(1), Some(99)] {
        let from = store.find_card_column(&p, &card).unwrap().clone();
        let to = if from == columns[0] { &columns[1] } else { &columns[0] };
        store.move_card_between_columns(&p, &card, &from, to, insert).unwrap();

        assert_eq!(total(&store), count_before);
        let moved = store.project(&p).unwrap().column(to).unwrap().card(&card).unwrap();
        assert_eq!(moved.id, before.id);
        assert_eq!(moved.title, before.title);
        assert_eq!(moved.tasks, before.tasks);
    }
}

#[test]
fn test_same_index_reorder_is_noop() {
    let mut store = BoardStore::new();
    let p = store.create_project("P");
    let columns = column_ids(&store, &p);
    add_cards(&mut store, &p, &columns[0], &["a", "b", "c"]);
    let before = store.clone();

    for i in 0..3 {
        store.reorder_cards(&p, &columns[0], i, i).unwrap();
    }
    assert_eq!(store, before);
}

#[test]
fn test_out_of_range_reorder_leaves_store_unchanged() {
    let mut store = BoardStore::new();
    let p = store.create_project("P");
    let columns = column_ids(&store, &p);
    add_cards(&mut store, &p, &columns[0], &["a", "b"]);
    let before = store.clone();

    let err = store.reorder_cards(&p, &columns[0], 0, 2).unwrap_err();
    assert!(matches!(err, BoardError::IndexOutOfRange { index: 2, len: 2 }));
    let err = store.reorder_columns(&p, 3, 0).unwrap_err();
    assert!(matches!(err, BoardError::IndexOutOfRange { .. }));
    assert_eq!(store, before);
}

#[test]
fn test_cascade_delete() {
    let mut store = BoardStore::new();
    let keep = store.create_project("Keep");
    let gone = store.create_project("Gone");
    let gone_columns = column_ids(&store, &gone);
    let gone_cards = add_cards(&mut store, &gone, &gone_columns[0], &["a", "b"]);

    let keep_columns = column_ids(&store, &keep);
    add_cards(&mut store, &keep, &keep_columns[1], &["c"]);
    let removed_column = store.delete_column(&keep, &keep_columns[1]).unwrap();
    assert_eq!(removed_column.cards.len(), 1);
    assert_eq!(store.project(&keep).unwrap().card_count(), 0);

    let removed = store.delete_project(&gone).unwrap();
    assert_eq!(removed.card_count(), 2);
    assert!(store.project(&gone).is_none());
    for card in &gone_cards {
        assert!(store.find_card_column(&gone, card).is_none());
        assert!(store
            .projects()
            .iter()
            .all(|p| p.columns.iter().all(|c| c.card(card).is_none())));
    }
}

#[test]
fn test_active_project_reassignment() {
    let mut store = BoardStore::new();
    let a = store.create_project("A");
    let b = store.create_project("B");
    let c = store.create_project("C");
    assert_eq!(store.active_project_id(), Some(&c));

    // Non-active delete leaves the pointer alone
    store.delete_project(&b).unwrap();
    assert_eq!(store.active_project_id(), Some(&c));

    // Active delete falls back to the first remaining project
    store.delete_project(&c).unwrap();
    assert_eq!(store.active_project_id(), Some(&a));

    store.delete_project(&a).unwrap();
    assert_eq!(store.active_project_id(), None);
    assert!(store.active_project().is_none());
}

#[test]
fn test_dangling_active_id_reads_as_none() {
    let mut store = BoardStore::new();
    store.create_project("A");
    store.set_active_project("not-a-project");

    assert!(store.active_project().is_none());
    assert!(matches!(
        store.export_active_project(),
        Err(BoardError::ProjectNotFound { .. })
    ));
}

#[test]
fn test_import_export_round_trip() {
    let payload = r##"{
        "name": "Portfolio site",
        "columns": [
            {"title": "Design", "color": "#e0f2fe", "cards": [
                {"title": "Wireframes", "color": "#fef3c7", "tasks": [
                    {"text": "Homepage", "done": true},
                    {"text": "Gallery", "done": false}
                ]},
                {"title": "Palette", "color": "#dcfce7", "tasks": []}
            ]},
            {"title": "Build", "color": "#f8fafc", "cards": []},
            {"title": "Launch", "color": "#fee2e2", "cards": [
                {"title": "DNS", "color": "#fee2e2", "tasks": [{"text": "Point domain", "done": false}]}
            ]}
        ]
    }"##;

    let mut store = BoardStore::new();
    let id = store.import_project(payload).unwrap();
    let exported = store.export_project(&id).unwrap();

    let original: CanvasProject = serde_json::from_str(payload).unwrap();
    let round_tripped: CanvasProject = serde_json::from_str(&exported).unwrap();
    assert_eq!(round_tripped, original);
}

#[test]
fn test_import_tolerates_prose_and_fences() {
    let reply = "Sure! You can copy the code below to Chat2Canvas:\n\n```json\n\
                 {\"name\": \"Trip\", \"columns\": [{\"title\": \"Book\", \"cards\": [{\"title\": \"Flights\"}]}]}\n\
                 ```\nLet me know if you want changes.";
    let mut store = BoardStore::new();
    store.import_project(reply).unwrap();

    let project = store.active_project().unwrap();
    assert_eq!(project.name, "Trip");
    let card = &project.columns[0].cards[0];
    assert_eq!(card.number, 1);
    assert!(card.tasks.is_empty());
    assert!(!card.color.is_empty());
}

#[test]
fn test_malformed_import_leaves_projects_unchanged() {
    let mut store = BoardStore::new();
    store.create_project("Existing");
    let before = store.clone();

    for text in [
        "no braces at all",
        r#"{"name":"X"}"#,
        r#"{"name":"X","columns":"none"}"#,
        r#"{"columns":[]}"#,
        "{ unterminated",
    ] {
        let err = store.import_project(text).unwrap_err();
        assert!(
            matches!(err, BoardError::MalformedPayload { .. }),
            "expected malformed payload for {:?}, got {:?}",
            text,
            err
        );
        assert_eq!(store, before);
    }
}

#[test]
fn test_missing_references_are_reported() {
    let mut store = BoardStore::new();
    let p = store.create_project("P");
    let columns = column_ids(&store, &p);
    let card = add_cards(&mut store, &p, &columns[0], &["a"]).remove(0);
    let before = store.clone();

    let missing_project = ProjectId::from_string("nope");
    let missing_column = ColumnId::from_string("nope");
    let missing_card = CardId::from_string("nope");

    assert!(store.rename_project(&missing_project, "x").unwrap_err().is_not_found());
    assert!(store
        .update_column(&p, &missing_column, ColumnUpdate::title("x"))
        .unwrap_err()
        .is_not_found());
    assert!(store
        .delete_card(&p, &columns[0], &missing_card)
        .unwrap_err()
        .is_not_found());
    assert!(store
        .move_card_between_columns(&p, &card, &columns[1], &columns[2], None)
        .unwrap_err()
        .is_not_found());
    assert!(store.toggle_task(&p, &columns[0], &card, 0).unwrap_err().is_not_found());

    assert_eq!(store, before);
}
