use futures::future::BoxFuture;

use crate::errors::BackendError;
use crate::submission::{Contact, NewContact};

pub trait Db {
    fn insert(&self, contact: NewContact) -> BoxFuture<Result<Contact, BackendError>>;

    fn list(&self) -> BoxFuture<Result<Vec<Contact>, BackendError>>;
}

pub use self::postgres::*;

mod postgres {
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use sqlx::postgres::PgPool;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::errors::BackendError;
    use crate::submission::{Contact, NewContact};

    pub struct PgDb {
        pool: PgPool,
    }

    impl PgDb {
        pub fn new(pool: PgPool) -> Self {
            PgDb { pool }
        }
    }

    // these can be simplified once async functions in traits are stabilized
    impl super::Db for PgDb {
        fn insert(&self, contact: NewContact) -> BoxFuture<Result<Contact, BackendError>> {
            async move {
                let query = sqlx::query_as(include_str!("queries/create.sql"));

                let (id, created_at): (Uuid, OffsetDateTime) = query
                    .bind(&contact.typedemande)
                    .bind(&contact.genre)
                    .bind(&contact.pronom)
                    .bind(&contact.nom)
                    .bind(&contact.prenom)
                    .bind(&contact.email)
                    .bind(&contact.telephone)
                    .bind(&contact.disponibilite)
                    .bind(&contact.heure_debut)
                    .bind(&contact.heure_fin)
                    .bind(&contact.message)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(Contact::new(id, created_at, contact))
            }
            .boxed()
        }

        fn list(&self) -> BoxFuture<Result<Vec<Contact>, BackendError>> {
            async move {
                let query = sqlx::query_as::<_, Contact>(include_str!("queries/list.sql"));

                let results = query
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(results)
            }
            .boxed()
        }
    }

    fn map_sqlx_error(error: sqlx::Error) -> BackendError {
        BackendError::Sqlx { source: error }
    }
}
