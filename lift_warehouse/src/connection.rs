//! Connection seams and the lazily-opened, explicitly-closed connection.
//!
//! There is no shared global session: whoever needs the warehouse owns a
//! [`LazyConnection`], which logs in on first use and must be released
//! with [`LazyConnection::close`].

use std::future::Future;

use crate::error::WarehouseError;
use crate::wire::QueryResult;

/// Something that can open a warehouse session.
pub trait Connector {
    type Session: WarehouseSession;

    fn connect(&self) -> impl Future<Output = Result<Self::Session, WarehouseError>> + Send;
}

/// An open, authenticated session.
pub trait WarehouseSession: Send {
    fn query(&mut self, sql: &str) -> impl Future<Output = Result<QueryResult, WarehouseError>> + Send;

    /// End the session on the server.
    fn close(self) -> impl Future<Output = Result<(), WarehouseError>> + Send;
}

/// Owns a connector and at most one session, opened on demand.
pub struct LazyConnection<C: Connector> {
    connector: C,
    session: Option<C::Session>,
}

impl<C: Connector> LazyConnection<C> {
    pub fn new(connector: C) -> Self {
        LazyConnection {
            connector,
            session: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Borrow the session, logging in first if needed.
    pub async fn session(&mut self) -> Result<&mut C::Session, WarehouseError> {
        match self.session {
            Some(ref mut session) => Ok(session),
            None => {
                let session = self.connector.connect().await?;
                tracing::debug!("warehouse session opened");
                Ok(self.session.insert(session))
            }
        }
    }

    /// Run one query on the (possibly new) session.
    pub async fn query(&mut self, sql: &str) -> Result<QueryResult, WarehouseError> {
        let session = self.session().await?;
        session.query(sql).await
    }

    /// Release the session if one was opened.
    pub async fn close(mut self) -> Result<(), WarehouseError> {
        match self.session.take() {
            Some(session) => session.close().await,
            None => Ok(()),
        }
    }
}
