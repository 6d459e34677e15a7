use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;

use super::Id;

/// Row-level operations shared by venues and artists. Every method works on a
/// borrowed connection so callers can compose them inside one transaction.
pub trait Actions: Sized {
    fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<(Id, Self)>>;
    fn read(conn: &mut SqliteConnection, id: Id) -> QueryResult<Self>;
    /// Case-insensitive substring match on the name.
    fn search(conn: &mut SqliteConnection, term: &str) -> QueryResult<Vec<(Id, Self)>>;
    fn create(conn: &mut SqliteConnection, item: Self) -> QueryResult<Id>;
    /// Returns the record as it was before the update.
    fn update(conn: &mut SqliteConnection, id: Id, new_item: Self) -> QueryResult<Self>;
    /// Removes the record together with its shows.
    fn delete(conn: &mut SqliteConnection, id: Id) -> QueryResult<Self>;
}

/// Case-insensitive substring test. Both sides are lowercased with Unicode
/// case mapping, which SQLite's `LIKE` only does for ASCII.
pub fn name_contains(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

pub fn last_insert_id(conn: &mut SqliteConnection) -> QueryResult<Id> {
    diesel::select(sql::<Integer>("last_insert_rowid()")).get_result(conn)
}

macro_rules! derive_actions {
    ($t: ident, $s: ident, $new: ident, $table: ident, $show_fk: ident) => {
        impl $crate::store::action::Actions for $t {
            fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<(Id, $t)>> {
                $table::table
                    .order($table::id)
                    .select($s::as_select())
                    .load::<$s>(conn)
                    .map(|rows| rows.into_iter().map(|x| x.into()).collect())
            }

            fn read(conn: &mut SqliteConnection, item_id: Id) -> QueryResult<$t> {
                $table::table
                    .find(item_id)
                    .select($s::as_select())
                    .first::<$s>(conn)
                    .map(|x| x.into())
                    .map(|(_, x): (Id, $t)| x)
            }

            fn search(conn: &mut SqliteConnection, term: &str) -> QueryResult<Vec<(Id, $t)>> {
                let rows = $table::table
                    .order($table::id)
                    .select($s::as_select())
                    .load::<$s>(conn)?;

                Ok(rows
                    .into_iter()
                    .filter(|row| $crate::store::action::name_contains(&row.name, term))
                    .map(|x| x.into())
                    .collect())
            }

            fn create(conn: &mut SqliteConnection, item: $t) -> QueryResult<Id> {
                let sql_item: $new = item.into();
                diesel::insert_into($table::table)
                    .values(&sql_item)
                    .execute(conn)?;

                $crate::store::action::last_insert_id(conn)
            }

            fn update(conn: &mut SqliteConnection, item_id: Id, new_item: $t) -> QueryResult<$t> {
                let previous = Self::read(conn, item_id)?;

                let changes: $new = new_item.into();
                diesel::update($table::table.find(item_id))
                    .set(&changes)
                    .execute(conn)?;

                Ok(previous)
            }

            fn delete(conn: &mut SqliteConnection, item_id: Id) -> QueryResult<$t> {
                use $crate::schema::shows;

                let previous = Self::read(conn, item_id)?;

                diesel::delete(shows::table.filter(shows::$show_fk.eq(item_id))).execute(conn)?;
                diesel::delete($table::table.find(item_id)).execute(conn)?;

                Ok(previous)
            }
        }
    };
}
