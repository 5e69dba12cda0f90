// A unit of work owns one pooled connection until it is dropped. Repositories reach the
// connection through `UnitOfWorkInternal`, which is private to the postgres adapter, so
// code above the adapter only sees begin/commit/rollback.
// Calling begin inside an open transaction opens a savepoint (AnsiTransactionManager).

use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, TransactionManager};
use tracing::debug;

use super::UnitOfWorkInternal;
use crate::errors::StoreError;

#[derive(Clone)]
pub struct UnitOfWorkFactory {
    conn_pool: Pool<AsyncPgConnection>,
}

impl UnitOfWorkFactory {
    pub async fn create_uow(&self) -> Result<UnitOfWork, StoreError> {
        let conn = self.conn_pool.get().await?;
        Ok(UnitOfWork::new(conn))
    }

    pub fn new(conn_pool: Pool<AsyncPgConnection>) -> Self {
        Self { conn_pool }
    }
}

pub struct UnitOfWork {
    conn: Object<AsyncPgConnection>,
}

impl UnitOfWork {
    fn new(conn: Object<AsyncPgConnection>) -> Self {
        Self { conn }
    }
}

impl UnitOfWorkInternal for UnitOfWork {
    fn get_conn(&mut self) -> &mut AsyncPgConnection {
        &mut self.conn
    }
}

#[allow(async_fn_in_trait)]
pub trait UnitOfWorkPublic {
    async fn begin_transaction(&mut self) -> Result<(), StoreError>;

    async fn commit(&mut self) -> Result<(), StoreError>;

    async fn rollback(&mut self) -> Result<(), StoreError>;
}

impl UnitOfWorkPublic for UnitOfWork {
    async fn begin_transaction(&mut self) -> Result<(), StoreError> {
        AnsiTransactionManager::begin_transaction(self.get_conn()).await?;
        debug!("transaction started");
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        AnsiTransactionManager::commit_transaction(self.get_conn()).await?;
        debug!("transaction committed");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), StoreError> {
        AnsiTransactionManager::rollback_transaction(self.get_conn()).await?;
        debug!("transaction rolled back");
        Ok(())
    }
}
