use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Record;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Record::Table)
        .col(
            ColumnDef::new(Record::Seq)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Record::Collection).string().not_null())
        .col(
            ColumnDef::new(Record::Id)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Record::Data).text().not_null())
        .col(ColumnDef::new(Record::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Record::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
