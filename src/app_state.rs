//! Implements a struct that holds the state of the REST server.

use std::time::Duration;

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{Error, store::ProductStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store for reading product transactions.
    pub store: ProductStore,
}

impl AppState {
    /// Create a new [AppState] from a SQLite database connection.
    ///
    /// The connection is expected to already contain the `products` table.
    /// `query_timeout` bounds how long a single request may wait on the database.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be configured.
    pub fn new(db_connection: Connection, query_timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            store: ProductStore::new(db_connection, query_timeout)?,
        })
    }
}

impl FromRef<AppState> for ProductStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
