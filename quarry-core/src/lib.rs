mod accessor;
mod as_value;
mod column;
mod column_type;
mod config;
mod connection;
mod decode;
mod entity;
mod error;
mod generator;
mod host_type;
mod parse;
mod query;
mod render;
mod schema;
mod sql_writer;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context;
pub use accessor::*;
pub use as_value::*;
pub use column::*;
pub use column_type::*;
pub use config::*;
pub use connection::*;
pub use decode::*;
pub use entity::*;
pub use error::*;
pub use generator::*;
pub use host_type::*;
pub use parse::*;
pub use query::*;
pub use schema::*;
pub use sql_writer::*;
pub use statement::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
