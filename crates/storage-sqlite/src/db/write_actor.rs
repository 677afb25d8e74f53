//! Single-writer actor for SQLite.
//!
//! SQLite allows one writer at a time. All mutations are funneled through a
//! dedicated background task owning one connection, so concurrent requests
//! never contend for the write lock and uniqueness constraints are checked
//! serially by the database itself.

use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use log::debug;
use tokio::sync::{mpsc, oneshot};

use crate::errors::StorageError;
use carteira_core::errors::Result;

/// A queued write job. The job owns its reply channel, so the actor never
/// needs to know the return type.
type Job = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Handle for sending write jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Job>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection
    /// and awaits its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send(Box::new(move |conn| {
                // The receiver may have been dropped (caller cancelled);
                // the job still ran to completion, only the reply is lost.
                let _ = ret_tx.send(job(conn));
            }))
            .await
            .map_err(|_| StorageError::WriterGone("writer actor stopped".to_string()))?;

        ret_rx
            .await
            .map_err(|_| StorageError::WriterGone("writer actor dropped the reply".to_string()))?
    }
}

/// Spawns the background task that serially applies write jobs on one
/// pooled connection.
pub fn spawn_writer(
    conn: PooledConnection<ConnectionManager<SqliteConnection>>,
) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Job>(1024);

    tokio::spawn(async move {
        let mut conn = conn;
        while let Some(job) = rx.recv().await {
            job(&mut conn);
        }
        debug!("Write actor channel closed, stopping");
    });

    WriteHandle { tx }
}
