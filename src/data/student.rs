use crate::{
    data::DataType,
    error::{MakeQuerySnafu, RosterResult},
};
use snafu::ResultExt;
use sqlx::{FromRow, SqliteConnection};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

impl Student {
    ///all three fields get replaced together, the id never changes
    pub fn overwrite(&mut self, replacement: NewStudent) {
        let NewStudent {
            first_name,
            last_name,
            age,
        } = replacement;

        self.first_name = first_name;
        self.last_name = last_name;
        self.age = age;
    }
}

impl DataType for Student {
    type Id = i64;
    type FormForAdding = NewStudent;

    async fn get_from_db_by_id(
        id: Self::Id,
        conn: &mut SqliteConnection,
    ) -> RosterResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, first_name, last_name, age FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn get_all(conn: &mut SqliteConnection) -> RosterResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, first_name, last_name, age FROM students ORDER BY id")
            .fetch_all(conn)
            .await
            .context(MakeQuerySnafu)
    }

    async fn insert_into_database(
        to_be_added: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> RosterResult<Self> {
        let NewStudent {
            first_name,
            last_name,
            age,
        } = to_be_added;

        sqlx::query_as::<_, Self>(
            "INSERT INTO students (first_name, last_name, age) VALUES (?, ?, ?) RETURNING id, first_name, last_name, age",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(age)
        .fetch_one(conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn update_in_database(&self, conn: &mut SqliteConnection) -> RosterResult<()> {
        sqlx::query("UPDATE students SET first_name = ?, last_name = ?, age = ? WHERE id = ?")
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(self.age)
            .bind(self.id)
            .execute(conn)
            .await
            .context(MakeQuerySnafu)?;
        Ok(())
    }

    async fn remove_from_database(id: Self::Id, conn: &mut SqliteConnection) -> RosterResult<()> {
        sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await
            .context(MakeQuerySnafu)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_state;

    fn ada() -> NewStudent {
        NewStudent {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: 28,
        }
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let (state, _dir) = test_state().await;
        let mut conn = state.get_connection().await.unwrap();

        let first = Student::insert_into_database(ada(), &mut conn).await.unwrap();
        let second = Student::insert_into_database(ada(), &mut conn).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.first_name, "Ada");
        assert_eq!(first.age, 28);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let (state, _dir) = test_state().await;
        let mut conn = state.get_connection().await.unwrap();

        let first = Student::insert_into_database(ada(), &mut conn).await.unwrap();
        Student::remove_from_database(first.id, &mut conn).await.unwrap();
        let second = Student::insert_into_database(ada(), &mut conn).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let (state, _dir) = test_state().await;
        let mut conn = state.get_connection().await.unwrap();

        let mut student = Student::insert_into_database(ada(), &mut conn).await.unwrap();
        student.overwrite(NewStudent {
            first_name: "Augusta".into(),
            last_name: "King".into(),
            age: 36,
        });
        student.update_in_database(&mut conn).await.unwrap();

        let reread = Student::get_from_db_by_id(student.id, &mut conn)
            .await
            .unwrap()
            .expect("student still exists");
        assert_eq!(reread, student);
    }

    #[tokio::test]
    async fn missing_ids_read_as_none() {
        let (state, _dir) = test_state().await;
        let mut conn = state.get_connection().await.unwrap();

        assert_eq!(Student::get_from_db_by_id(99_999, &mut conn).await.unwrap(), None);
        assert!(Student::get_all(&mut conn).await.unwrap().is_empty());
    }
}
