mod author;
mod book;
mod series;

pub use self::author::Author;
pub use self::book::Book;
pub use self::series::Series;

/// Treat an explicit `null` like a missing string field.
fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
