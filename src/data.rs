use crate::error::RosterResult;
use sqlx::SqliteConnection;

pub mod student;

pub trait DataType: Sized {
    type Id;
    type FormForAdding;

    async fn get_from_db_by_id(id: Self::Id, conn: &mut SqliteConnection) -> RosterResult<Option<Self>>;
    async fn get_all(conn: &mut SqliteConnection) -> RosterResult<Vec<Self>>;
    async fn insert_into_database(to_be_added: Self::FormForAdding, conn: &mut SqliteConnection) -> RosterResult<Self>;
    async fn update_in_database(&self, conn: &mut SqliteConnection) -> RosterResult<()>;
    async fn remove_from_database(id: Self::Id, conn: &mut SqliteConnection) -> RosterResult<()>;
}
