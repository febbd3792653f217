use librarium_core::db::open_db_in_memory;
use librarium_core::{
    RepoError, ServiceError, SqliteUserRepository, User, UserService, ValidationError,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> UserService<SqliteUserRepository<'_>> {
    UserService::new(SqliteUserRepository::try_new(conn).unwrap())
}

#[test]
fn add_then_get_by_id_returns_equal_user_with_id_populated() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let user = User::new("orwell", "secret", Some("essayist".to_string()));
    let id = service.add_user(&user).unwrap();
    assert!(id > 0);

    let loaded = service.get_user_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, User { id: Some(id), ..user });
}

#[test]
fn get_all_users_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_user(&User::new("first", "pw", None)).unwrap();
    service.add_user(&User::new("second", "pw", None)).unwrap();

    let logins: Vec<String> = service
        .get_all_users()
        .unwrap()
        .into_iter()
        .map(|user| user.login)
        .collect();
    assert_eq!(logins, ["first", "second"]);
}

#[test]
fn get_user_by_id_does_not_translate_absence() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert_eq!(service.get_user_by_id(41).unwrap(), None);
}

#[test]
fn get_user_by_id_rejects_non_positive_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for id in [0, -7] {
        let err = service.get_user_by_id(id).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::IdNotInAcceptableRange { .. })
        ));
    }
}

#[test]
fn get_user_by_login_treats_absence_as_error() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_user(&User::new("known", "pw", None)).unwrap();

    assert_eq!(
        service.get_user_by_login("known").unwrap().login,
        "known"
    );
    assert!(matches!(
        service.get_user_by_login("unknown").unwrap_err(),
        ServiceError::UserNotFound
    ));
    assert!(matches!(
        service.get_user_by_login("  ").unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyField { field: "user.login" })
    ));
}

#[test]
fn add_user_rejects_preassigned_id_and_empty_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let preassigned = User::with_id(3, "login", "pw", None);
    assert!(matches!(
        service.add_user(&preassigned).unwrap_err(),
        ServiceError::Validation(ValidationError::PreassignedId { field: "user.id" })
    ));

    assert!(matches!(
        service.add_user(&User::new("", "pw", None)).unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyField { field: "user.login" })
    ));
    assert!(matches!(
        service.add_user(&User::new("login", "", None)).unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyField {
            field: "user.password"
        })
    ));
}

#[test]
fn add_user_rejects_duplicate_login_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_user(&User::new("orwell", "pw", None)).unwrap();

    let err = service
        .add_user(&User::new("orwell", "other", None))
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateLogin(login) if login == "orwell"));
}

#[test]
fn update_user_replaces_full_row_or_fails_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let id = service
        .add_user(&User::new("orwell", "pw", Some("draft".to_string())))
        .unwrap();

    let replacement = User::with_id(id, "blair", "new-pw", None);
    assert_eq!(service.update_user(&replacement).unwrap(), 1);
    assert_eq!(service.get_user_by_id(id).unwrap().unwrap(), replacement);

    let missing = User::with_id(id + 40, "ghost", "pw", None);
    assert!(matches!(
        service.update_user(&missing).unwrap_err(),
        ServiceError::UserNotFound
    ));
}

#[test]
fn delete_user_requires_an_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let id = service.add_user(&User::new("orwell", "pw", None)).unwrap();
    service.delete_user(id).unwrap();
    assert_eq!(service.get_user_by_id(id).unwrap(), None);

    assert!(matches!(
        service.delete_user(id).unwrap_err(),
        ServiceError::UserNotFound
    ));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteUserRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}
