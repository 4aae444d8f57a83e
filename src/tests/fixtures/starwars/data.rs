//! Characters of the original trilogy, as plain runtime data.
//!
//! Every character carries a `type` entry the abstract types dispatch on, and
//! the ids of its friends.

use crate::Value;

/// All characters, humans first.
pub fn characters() -> Vec<Value> {
    vec![
        graphql_value!({
            "type": "Human",
            "id": "1000",
            "name": "Luke Skywalker",
            "friends": ["1002", "1003", "2000", "2001"],
            "appearsIn": [4, 5, 6],
            "homePlanet": "Tatooine",
        }),
        graphql_value!({
            "type": "Human",
            "id": "1001",
            "name": "Darth Vader",
            "friends": ["1004"],
            "appearsIn": [4, 5, 6],
            "homePlanet": "Tatooine",
        }),
        graphql_value!({
            "type": "Human",
            "id": "1002",
            "name": "Han Solo",
            "friends": ["1000", "1003", "2001"],
            "appearsIn": [4, 5, 6],
        }),
        graphql_value!({
            "type": "Human",
            "id": "1003",
            "name": "Leia Organa",
            "friends": ["1000", "1002", "2000", "2001"],
            "appearsIn": [4, 5, 6],
            "homePlanet": "Alderaan",
        }),
        graphql_value!({
            "type": "Human",
            "id": "1004",
            "name": "Wilhuff Tarkin",
            "friends": ["1001"],
            "appearsIn": [4],
        }),
        graphql_value!({
            "type": "Droid",
            "id": "2000",
            "name": "C-3PO",
            "friends": ["1000", "1002", "1003", "2001"],
            "appearsIn": [4, 5, 6],
            "primaryFunction": "Protocol",
        }),
        graphql_value!({
            "type": "Droid",
            "id": "2001",
            "name": "R2-D2",
            "friends": ["1000", "1002", "1003"],
            "appearsIn": [4, 5, 6],
            "primaryFunction": "Astromech",
        }),
    ]
}

fn find(ty: Option<&str>, id: &str) -> Value {
    characters()
        .into_iter()
        .find(|c| {
            let field =
                |name: &str| c.as_object_value()?.get_field_value(name)?.as_string_value();
            field("id") == Some(id) && ty.is_none_or(|ty| field("type") == Some(ty))
        })
        .unwrap_or_default()
}

/// Looks up a character of any type by its id, `null` if unknown.
pub fn character(id: &str) -> Value {
    find(None, id)
}

/// Looks up a human by its id, `null` if unknown.
pub fn human(id: &str) -> Value {
    find(Some("Human"), id)
}

/// Looks up a droid by its id, `null` if unknown.
pub fn droid(id: &str) -> Value {
    find(Some("Droid"), id)
}

/// Luke is the hero of `EMPIRE`, R2-D2 of the whole saga.
pub fn hero(episode: Option<i32>) -> Value {
    match episode {
        Some(5) => human("1000"),
        _ => droid("2001"),
    }
}

/// Resolves the friend ids of a character.
pub fn friends(character: &Value) -> Value {
    let ids = character
        .as_object_value()
        .and_then(|c| c.get_field_value("friends"))
        .and_then(Value::as_list_value)
        .into_iter()
        .flatten()
        .filter_map(Value::as_string_value);
    Value::list(ids.map(self::character).collect())
}
