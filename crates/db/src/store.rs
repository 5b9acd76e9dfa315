use async_trait::async_trait;
use mealmuse_shared::{
    Error, Result,
    store::{Collection, RecordStore, into_object, merge, new_id},
};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::table::Record;

/// Record store backed by a single SQLite table of JSON documents.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find(&self, collection: Collection, id: &str) -> Result<Option<Map<String, Value>>> {
        let statement = Query::select()
            .column(Record::Data)
            .from(Record::Table)
            .and_where(Expr::col(Record::Collection).eq(collection.as_ref()))
            .and_where(Expr::col(Record::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await
            .map_err(db)?;

        row.map(|(data,)| parse(collection, &data).and_then(|v| into_object(collection, v)))
            .transpose()
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let statement = Query::select()
            .column(Record::Data)
            .from(Record::Table)
            .and_where(Expr::col(Record::Collection).eq(collection.as_ref()))
            .order_by(Record::Seq, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await
            .map_err(db)?;

        rows.iter()
            .map(|(data,)| parse(collection, data))
            .collect()
    }

    async fn create(&self, collection: Collection, data: Value) -> Result<Value> {
        let mut record = into_object(collection, data)?;
        let id = new_id();
        record.insert("id".to_owned(), Value::String(id.to_owned()));

        let data = serde_json::to_string(&record)?;
        let created_at = OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(Record::Table)
            .columns([
                Record::Collection,
                Record::Id,
                Record::Data,
                Record::CreatedAt,
            ])
            .values_panic([
                collection.as_ref().into(),
                id.into(),
                data.into(),
                created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(db)?;

        Ok(Value::Object(record))
    }

    async fn update(&self, collection: Collection, id: &str, data: Value) -> Result<Value> {
        let changes = into_object(collection, data)?;

        let Some(mut record) = self.find(collection, id).await? else {
            mealmuse_shared::not_found!("{} record {}", collection, id);
        };

        merge(&mut record, changes);

        let statement = Query::update()
            .table(Record::Table)
            .value(Record::Data, serde_json::to_string(&record)?)
            .and_where(Expr::col(Record::Collection).eq(collection.as_ref()))
            .and_where(Expr::col(Record::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(db)?;

        Ok(Value::Object(record))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        let statement = Query::delete()
            .from_table(Record::Table)
            .and_where(Expr::col(Record::Collection).eq(collection.as_ref()))
            .and_where(Expr::col(Record::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(db)?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse(collection: Collection, data: &str) -> Result<Value> {
    serde_json::from_str(data).map_err(|e| Error::Decode {
        collection,
        reason: e.to_string(),
    })
}

fn db(err: sqlx::Error) -> Error {
    Error::Unknown(err.into())
}
