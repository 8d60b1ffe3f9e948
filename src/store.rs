//! The process-wide handle to the product database.

use std::{
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use rusqlite::{Connection, InterruptHandle};

use crate::Error;

/// The default time limit for a single request's database access.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// A shared, read-mostly handle to the SQLite database holding the `products` table.
///
/// The connection is opened once at startup and shared by all requests.
/// Queries run on tokio's blocking thread pool and are bounded by a timeout.
/// A query that runs past the timeout is interrupted so the connection is freed
/// for the next request.
#[derive(Clone)]
pub struct ProductStore {
    connection: Arc<Mutex<Connection>>,
    interrupt_handle: Arc<InterruptHandle>,
    query_timeout: Duration,
}

impl fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductStore")
            .field("connection", &self.connection)
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl ProductStore {
    /// Wrap `connection` in a store whose queries give up after `query_timeout`.
    ///
    /// The SQLite busy timeout is set to `query_timeout` as well.
    ///
    /// # Errors
    /// Returns an error if the busy timeout cannot be set.
    pub fn new(connection: Connection, query_timeout: Duration) -> Result<Self, Error> {
        connection.busy_timeout(query_timeout)?;
        let interrupt_handle = Arc::new(connection.get_interrupt_handle());

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            interrupt_handle,
            query_timeout,
        })
    }

    /// The time limit applied to each call to [ProductStore::read].
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run `query` against the database on a blocking thread.
    ///
    /// If the time limit passes while `query` is running, the running SQLite
    /// statement is interrupted. If it passes while `query` is still waiting for
    /// the connection, `query` is never run.
    ///
    /// # Errors
    /// Returns:
    /// - whatever error `query` returns,
    /// - [Error::DatabaseLockError] if the connection mutex is poisoned,
    /// - [Error::QueryTimeout] if `query` does not finish in time,
    /// - or [Error::TaskFailed] if the blocking task panicked.
    pub async fn read<F, T>(&self, query: F) -> Result<T, Error>
    where
        F: FnOnce(&Connection) -> Result<T, Error> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();
        let started = Arc::new(AtomicBool::new(false));
        let cancelled = Arc::new(AtomicBool::new(false));

        let task = {
            let started = started.clone();
            let cancelled = cancelled.clone();

            tokio::task::spawn_blocking(move || {
                let guard = connection.lock().map_err(|_| Error::DatabaseLockError)?;

                // Each side sets its own flag before reading the other's, so at
                // least one of them sees the timeout.
                started.store(true, Ordering::SeqCst);
                if cancelled.load(Ordering::SeqCst) {
                    return Err(Error::QueryTimeout);
                }

                query(&guard)
            })
        };

        match tokio::time::timeout(self.query_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(Error::TaskFailed(join_error.to_string())),
            Err(_) => {
                cancelled.store(true, Ordering::SeqCst);
                if started.load(Ordering::SeqCst) {
                    tracing::debug!("interrupting database query after {:?}", self.query_timeout);
                    self.interrupt_handle.interrupt();
                }

                Err(Error::QueryTimeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };

    use rusqlite::Connection;

    use crate::Error;

    use super::ProductStore;

    fn get_test_store(query_timeout: Duration) -> ProductStore {
        let conn = Connection::open_in_memory().unwrap();
        ProductStore::new(conn, query_timeout).unwrap()
    }

    #[tokio::test]
    async fn read_returns_query_result() {
        let store = get_test_store(Duration::from_secs(1));

        let got = store
            .read(|conn| {
                conn.query_row("SELECT 1 + 1", [], |row| row.get::<_, i64>(0))
                    .map_err(Error::from)
            })
            .await;

        assert_eq!(got, Ok(2));
    }

    #[tokio::test]
    async fn read_propagates_sql_errors() {
        let store = get_test_store(Duration::from_secs(1));

        let got = store
            .read(|conn| {
                conn.query_row("SELECT * FROM missing_table", [], |row| {
                    row.get::<_, i64>(0)
                })
                .map_err(Error::from)
            })
            .await;

        assert!(matches!(got, Err(Error::SqlError(_))), "got {got:?}");
    }

    #[tokio::test]
    async fn read_times_out() {
        let store = get_test_store(Duration::from_millis(10));

        let got = store
            .read(|_| {
                std::thread::sleep(Duration::from_millis(200));
                Ok(())
            })
            .await;

        assert_eq!(got, Err(Error::QueryTimeout));
    }

    #[tokio::test]
    async fn timed_out_query_releases_connection() {
        let store = get_test_store(Duration::from_millis(200));

        let got = store
            .read(|conn| {
                conn.query_row(
                    "WITH RECURSIVE counter(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM counter)
                     SELECT COUNT(*) FROM counter",
                    [],
                    |row| row.get::<_, i64>(0),
                )
                .map_err(Error::from)
            })
            .await;
        assert_eq!(got, Err(Error::QueryTimeout));

        let got = store
            .read(|conn| {
                conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                    .map_err(Error::from)
            })
            .await;
        assert_eq!(got, Ok(1));
    }

    #[tokio::test]
    async fn query_waiting_past_timeout_is_skipped() {
        let store = get_test_store(Duration::from_millis(50));
        let ran = Arc::new(AtomicBool::new(false));

        // Hold the connection so the second read cannot start in time.
        let blocker = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .read(|_| {
                        std::thread::sleep(Duration::from_millis(200));
                        Ok(())
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let got = {
            let ran = ran.clone();
            store
                .read(move |_| {
                    ran.store(true, Ordering::SeqCst);
                    Ok(())
                })
                .await
        };
        assert_eq!(got, Err(Error::QueryTimeout));
        assert_eq!(blocker.await.unwrap(), Err(Error::QueryTimeout));

        // Give the blocked task time to take and release the lock.
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn panicking_query_fails_and_poisons_lock() {
        let store = get_test_store(Duration::from_secs(1));

        let got = store
            .read::<_, ()>(|_| panic!("query blew up"))
            .await;
        assert!(matches!(got, Err(Error::TaskFailed(_))), "got {got:?}");

        let got = store.read(|_| Ok(())).await;
        assert_eq!(got, Err(Error::DatabaseLockError));
    }
}
