mod common;

use common::{date, seed_catalog};
use librarium_core::db::open_db_in_memory;
use librarium_core::{
    Author, Book, BookRepository, BookService, ServiceError, SqliteBookRepository,
    ValidationError,
};

#[test]
fn get_all_books_returns_seeded_catalog_in_order() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, books) = seed_catalog(&mut conn);

    assert_eq!(books.len(), 4);
    assert_eq!(books[0], Book::with_id(1, "1984", 89, date("2014-01-01"), "Eng"));
    assert_eq!(books[1].title, "Brave New World");
}

#[test]
fn get_book_by_id_roundtrips_and_rejects_out_of_range_ids() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, books) = seed_catalog(&mut conn);
    let service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());

    assert_eq!(service.get_book_by_id(1).unwrap(), books[0]);
    assert_eq!(service.get_book_by_id(2).unwrap(), books[1]);

    let err = service.get_book_by_id(5).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::IdNotInAcceptableRange { id: 5 })
    ));
    assert!(matches!(
        service.get_book_by_id(-1).unwrap_err(),
        ServiceError::Validation(ValidationError::IdNotInAcceptableRange { .. })
    ));
}

#[test]
fn get_book_by_title_treats_absence_as_error() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, books) = seed_catalog(&mut conn);
    let service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());

    assert_eq!(service.get_book_by_title("1984").unwrap(), books[0]);
    assert!(matches!(
        service.get_book_by_title("bla-bla-bla").unwrap_err(),
        ServiceError::BookNotFound
    ));
    assert!(matches!(
        service.get_book_by_title("").unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyField { field: "book.title" })
    ));
}

#[test]
fn books_by_author_lists_relation_or_empty_collection() {
    let mut conn = open_db_in_memory().unwrap();
    let (authors, books) = seed_catalog(&mut conn);
    let service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());

    let orwells = service.get_books_by_author(&authors[0]).unwrap();
    assert_eq!(orwells, vec![books[0].clone(), books[2].clone()]);

    // Safronov wrote nothing; that is an empty result, not an error.
    assert_eq!(
        service
            .get_books_by_author_id(authors[2].id.unwrap())
            .unwrap(),
        Vec::new()
    );

    let nameless = Author {
        name: String::new(),
        ..authors[0].clone()
    };
    assert!(matches!(
        service.get_books_by_author(&nameless).unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyField {
            field: "author.name"
        })
    ));
}

#[test]
fn add_book_assigns_id_and_surfaces_duplicate_titles_from_the_store() {
    let mut conn = open_db_in_memory().unwrap();
    seed_catalog(&mut conn);
    let service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());

    let added = Book::new("Animal Farm", 91, date("2015-08-17"), "Eng");
    let id = service.add_book(&added).unwrap();
    assert_eq!(
        service.get_book_by_id(id).unwrap(),
        Book { id: Some(id), ..added }
    );

    // No service-level pre-check for titles; the unique constraint answers.
    let err = service
        .add_book(&Book::new("1984", 1, date("2020-01-01"), "Eng"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Duplicate(_)));
}

#[test]
fn add_book_rejects_preassigned_id() {
    let mut conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());

    let preassigned = Book::with_id(9, "Papillon", 77, date("1969-01-01"), "Fr");
    assert!(matches!(
        service.add_book(&preassigned).unwrap_err(),
        ServiceError::Validation(ValidationError::PreassignedId { field: "book.id" })
    ));
}

#[test]
fn update_book_reports_missing_rows_as_zero_affected() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, books) = seed_catalog(&mut conn);
    let service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());

    let replacement = Book::with_id(books[0].id.unwrap(), "Nineteen Eighty-Four", 95, date("2021-06-08"), "Eng");
    assert_eq!(service.update_book(&replacement).unwrap(), 1);
    assert_eq!(service.get_book_by_id(1).unwrap(), replacement);

    let ghost = Book::with_id(40, "Ghost", 1, date("2000-01-01"), "Eng");
    assert_eq!(service.update_book(&ghost).unwrap(), 0);
}

#[test]
fn title_count_queries_answer_existence() {
    let mut conn = open_db_in_memory().unwrap();
    seed_catalog(&mut conn);
    let repo = SqliteBookRepository::try_new(&mut conn).unwrap();

    assert_eq!(repo.count_books_with_title("1984").unwrap(), 1);
    assert_eq!(repo.count_books_with_title("Island").unwrap(), 0);
    assert_eq!(repo.count_books().unwrap(), 4);
}

#[test]
fn delete_book_removes_join_rows_then_the_row() {
    let mut conn = open_db_in_memory().unwrap();
    let (_, books) = seed_catalog(&mut conn);

    {
        let mut service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());
        service.delete_book_by_id(books[0].id.unwrap()).unwrap();
        assert_eq!(service.get_all_books().unwrap().len(), 3);
    }

    let join_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM book_authors WHERE book_id = ?1;",
            [books[0].id.unwrap()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(join_rows, 0);
}

#[test]
fn delete_book_with_unknown_id_fails_after_unconditional_join_cleanup() {
    let mut conn = open_db_in_memory().unwrap();
    seed_catalog(&mut conn);
    let mut service = BookService::new(SqliteBookRepository::try_new(&mut conn).unwrap());

    assert!(matches!(
        service.delete_book_by_id(40).unwrap_err(),
        ServiceError::BookNotFound
    ));
    // The catalog is untouched by the failed delete.
    assert_eq!(service.get_all_books().unwrap().len(), 4);

    assert!(matches!(
        service.delete_book_by_id(-1).unwrap_err(),
        ServiceError::Validation(ValidationError::IdNotInAcceptableRange { id: -1 })
    ));
}
