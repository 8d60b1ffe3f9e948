#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, build_router, product::create_products_table, store::DEFAULT_QUERY_TIMEOUT};

/// An in-memory database with an empty products table.
pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_products_table(&conn).unwrap();
    conn
}

/// An in-memory database whose products table allows `NULL` in every column,
/// like a table created by an external import.
pub(crate) fn get_unconstrained_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute(
        "CREATE TABLE products (
            id INTEGER PRIMARY KEY,
            title TEXT,
            description TEXT,
            category TEXT,
            price REAL,
            dateOfSale TEXT,
            sold INTEGER
        )",
        (),
    )
    .unwrap();
    conn
}

/// A test server for the full router backed by `conn`.
pub(crate) fn get_test_server(conn: Connection) -> TestServer {
    let state = AppState::new(conn, DEFAULT_QUERY_TIMEOUT).expect("Could not create app state.");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}
