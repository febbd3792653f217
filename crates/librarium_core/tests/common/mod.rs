use chrono::NaiveDate;
use librarium_core::{
    Author, AuthorService, Book, BookService, SqliteAuthorRepository, SqliteBookRepository,
};
use rusqlite::Connection;

pub fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}

/// Seeds the reference catalog: three authors and four books.
///
/// Orwell wrote "1984" and "The Road to Wigan Pier", Haxley wrote
/// "Brave New World" and "The Doors of Perception", Safronov wrote nothing.
/// Returns the seeded records with their store-assigned ids.
pub fn seed_catalog(conn: &mut Connection) -> (Vec<Author>, Vec<Book>) {
    let authors = {
        let service = AuthorService::new(SqliteAuthorRepository::try_new(conn).unwrap());
        for (name, surname, born) in [
            ("George", "Orwell", "2010-01-01"),
            ("Aldous", "Haxley", "2009-01-01"),
            ("Vlad", "Safronov", "1998-08-22"),
        ] {
            service
                .add_author(&Author::new(name, surname, Some(date(born))))
                .unwrap();
        }
        service.get_all_authors().unwrap()
    };

    let books = {
        let mut service = BookService::new(SqliteBookRepository::try_new(conn).unwrap());
        for (title, rating, released, author_index) in [
            ("1984", 89, "2014-01-01", 0),
            ("Brave New World", 85, "2016-01-02", 1),
            ("The Road to Wigan Pier", 50, "2015-01-01", 0),
            ("The Doors of Perception", 54, "2015-02-02", 1),
        ] {
            service
                .add_book_of_author(
                    &Book::new(title, rating, date(released), "Eng"),
                    &authors[author_index],
                )
                .unwrap();
        }
        service.get_all_books().unwrap()
    };

    (authors, books)
}
