use bookshelf_core::{Book, BookPatch, NewBook};

#[test]
fn new_book_constructor_stores_fields() {
    let draft = NewBook::new("Dune", "Frank Herbert", 1965);

    assert_eq!(draft.title, "Dune");
    assert_eq!(draft.author, "Frank Herbert");
    assert_eq!(draft.year, 1965);
}

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = Book {
        id: 7,
        title: "War and Peace".to_string(),
        author: "Leo Tolstoy".to_string(),
        year: 1869,
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "War and Peace");
    assert_eq!(json["author"], "Leo Tolstoy");
    assert_eq!(json["year"], 1869);

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn default_patch_is_empty() {
    assert!(BookPatch::default().is_empty());

    let patch = BookPatch {
        year: Some(1984),
        ..BookPatch::default()
    };
    assert!(!patch.is_empty());
}
