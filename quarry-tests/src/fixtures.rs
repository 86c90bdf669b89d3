use quarry::{
    Action, AsValue, ColumnType, Entity, EntityDecl, Error, ForeignKeyRef, HostKind, HostType,
    RawFieldDecl, Result, Row, Value,
};
use time::PrimitiveDateTime;

fn next_value(values: &mut impl Iterator<Item = Value>, entity: &str) -> Result<Value> {
    values
        .next()
        .ok_or_else(|| Error::msg(format!("Row is too short for `{}`", entity)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub active: bool,
    pub score: f64,
}

impl User {
    pub fn decl() -> EntityDecl {
        EntityDecl::new("User")
            .field(
                RawFieldDecl::new("id", HostKind::I32)
                    .column_type(ColumnType::Int)
                    .primary_key(),
            )
            .field(
                RawFieldDecl::new("name", HostKind::String)
                    .column_type(ColumnType::Varchar)
                    .size(50)
                    .not_null(),
            )
            .field(
                RawFieldDecl::new("email", HostType::nullable(HostKind::String))
                    .column_type(ColumnType::Varchar)
                    .unique(),
            )
            .field(
                RawFieldDecl::new("active", HostKind::Bool)
                    .column_type(ColumnType::Boolean)
                    .default_value(true),
            )
            .field(RawFieldDecl::new("score", HostKind::F64).column_type(ColumnType::Double))
    }
}

impl Entity for User {
    fn row(&self) -> Row {
        [
            self.id.as_value(),
            self.name.clone().as_value(),
            self.email.clone().as_value(),
            self.active.as_value(),
            self.score.as_value(),
        ]
        .into()
    }

    fn from_row(row: Row) -> Result<Self> {
        let mut values = row.into_vec().into_iter();
        let values = &mut values;
        Ok(Self {
            id: AsValue::try_from_value(next_value(values, "User")?)?,
            name: AsValue::try_from_value(next_value(values, "User")?)?,
            email: AsValue::try_from_value(next_value(values, "User")?)?,
            active: AsValue::try_from_value(next_value(values, "User")?)?,
            score: AsValue::try_from_value(next_value(values, "User")?)?,
        })
    }
}

/// References [`User`] through `user_id`, rows are removed with their user.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i32,
    pub title: String,
    pub body: Option<String>,
    pub created_at: PrimitiveDateTime,
}

impl Post {
    pub fn decl() -> EntityDecl {
        EntityDecl::new("Post")
            .table("blog_post")
            .field(
                RawFieldDecl::new("id", HostKind::I64)
                    .column_type(ColumnType::BigInt)
                    .primary_key(),
            )
            .field(
                RawFieldDecl::new("user_id", HostKind::I32)
                    .column_type(ColumnType::Int)
                    .not_null()
                    .foreign_key(ForeignKeyRef::new("user", "id").on_delete(Action::Cascade)),
            )
            .field(
                RawFieldDecl::new("title", HostKind::String)
                    .column_type(ColumnType::Varchar)
                    .size(120)
                    .not_null(),
            )
            .field(
                RawFieldDecl::new("body", HostType::nullable(HostKind::String))
                    .column_type(ColumnType::Text),
            )
            .field(
                RawFieldDecl::new(
                    "created_at",
                    HostKind::Other("time::PrimitiveDateTime".into()),
                )
                .column_type(ColumnType::Timestamp),
            )
    }
}

impl Entity for Post {
    fn row(&self) -> Row {
        [
            self.id.as_value(),
            self.user_id.as_value(),
            self.title.clone().as_value(),
            self.body.clone().as_value(),
            self.created_at.as_value(),
        ]
        .into()
    }

    fn from_row(row: Row) -> Result<Self> {
        let mut values = row.into_vec().into_iter();
        let values = &mut values;
        Ok(Self {
            id: AsValue::try_from_value(next_value(values, "Post")?)?,
            user_id: AsValue::try_from_value(next_value(values, "Post")?)?,
            title: AsValue::try_from_value(next_value(values, "Post")?)?,
            body: AsValue::try_from_value(next_value(values, "Post")?)?,
            created_at: AsValue::try_from_value(next_value(values, "Post")?)?,
        })
    }
}
