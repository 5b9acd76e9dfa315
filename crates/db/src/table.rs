use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Record {
    Table,
    Seq,
    Collection,
    Id,
    Data,
    CreatedAt,
}
