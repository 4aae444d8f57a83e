//! Schema that contains the characters of the original Star Wars trilogy.
//!
//! ```graphql
//! enum Episode { NEWHOPE, EMPIRE, JEDI }
//!
//! interface Character {
//!   id: String!
//!   name: String
//!   friends: [Character]
//!   appearsIn: [Episode]
//!   secretBackstory: String
//! }
//!
//! type Human implements Character { ... homePlanet: String rank: HumanRank }
//! type Droid implements Character { ... primaryFunction: String rank: DroidRank }
//! union CharacterUnion = Human | Droid
//!
//! type Query {
//!   hero(episode: Episode): Character
//!   human(id: String!): Human
//!   droid(id: String!): Droid
//!   characters: [CharacterUnion]
//! }
//! ```

use arcstr::ArcStr;

use crate::{
    meta::{
        Argument, EnumMeta, EnumValue, Field, Fields, InterfaceMeta, ObjectMeta, Type, UnionMeta,
    },
    Registry, Resolution, Schema, Value,
};

use super::data;

fn character_type(character: &Value) -> Option<ArcStr> {
    character
        .as_object_value()?
        .get_field_value("type")?
        .as_string_value()
        .map(Into::into)
}

fn episode_enum() -> EnumMeta {
    EnumMeta::new(
        "Episode",
        [
            EnumValue::new("NEWHOPE")
                .value(4)
                .description("Released in 1977."),
            EnumValue::new("EMPIRE")
                .value(5)
                .description("Released in 1980."),
            EnumValue::new("JEDI")
                .value(6)
                .description("Released in 1983."),
        ],
    )
    .description("One of the films in the Star Wars Trilogy")
}

fn character_fields(kind: &str) -> Vec<Field> {
    vec![
        Field::new("id", Type::named("String").non_null())
            .description(format!("The id of the {kind}.")),
        Field::new("name", Type::named("String"))
            .description(format!("The name of the {kind}.")),
        Field::new("friends", Type::named("Character").list())
            .description(format!(
                "The friends of the {kind}, or an empty list if they have none.",
            ))
            .resolver(|character, _| data::friends(character)),
        Field::new("appearsIn", Type::named("Episode").list())
            .description("Which movies they appear in."),
        Field::new("secretBackstory", Type::named("String"))
            .description("All secrets about their past.")
            .resolver(|_, _| Resolution::error("secretBackstory is secret.")),
    ]
}

fn human_type(classified_ids: bool) -> ObjectMeta {
    ObjectMeta::new(
        "Human",
        Fields::lazy(move || {
            let mut fields = character_fields("human");
            if classified_ids {
                fields[0] = Field::new("id", Type::named("String").non_null())
                    .resolver(|_, _| Resolution::error("Human ids are classified."));
            }
            fields.extend([
                Field::new("homePlanet", Type::named("String"))
                    .description("The home planet of the human, or null if unknown."),
                Field::new("rank", Type::named("HumanRank"))
                    .resolver(|_, _| Value::scalar("PRIVATE")),
                Field::new("rankObject", Type::named("HumanRankObject"))
                    .resolver(|_, _| graphql_value!({"name": "FOO"})),
            ]);
            fields
        }),
    )
    .description("A humanoid creature in the Star Wars universe.")
    .interfaces(["Character"])
}

fn droid_type() -> ObjectMeta {
    ObjectMeta::new(
        "Droid",
        Fields::lazy(|| {
            let mut fields = character_fields("droid");
            fields.extend([
                Field::new("primaryFunction", Type::named("String"))
                    .description("The primary function of the droid."),
                Field::new("rank", Type::named("DroidRank"))
                    .resolver(|_, _| Value::scalar("BASIC")),
                Field::new("rankObject", Type::named("DroidRankObject"))
                    .resolver(|_, _| graphql_value!({"name": "BAR"})),
            ]);
            fields
        }),
    )
    .description("A mechanical creature in the Star Wars universe.")
    .interfaces(["Character"])
}

fn query_type() -> ObjectMeta {
    ObjectMeta::new(
        "Query",
        vec![
            Field::new("hero", Type::named("Character"))
                .argument(Argument::new("episode", Type::named("Episode")).description(
                    "If omitted, returns the hero of the whole saga. If provided, returns the \
                     hero of that particular episode.",
                ))
                .resolver(|_, args| {
                    data::hero(
                        args.get("episode")
                            .and_then(Value::as_scalar)
                            .and_then(|s| s.as_int()),
                    )
                }),
            Field::new("human", Type::named("Human"))
                .argument(
                    Argument::new("id", Type::named("String").non_null())
                        .description("id of the human"),
                )
                .resolver(|_, args| {
                    let id = args.get_str("id").unwrap_or_default().to_owned();
                    Resolution::pending(async move { Ok(data::human(&id)) })
                }),
            Field::new("droid", Type::named("Droid"))
                .argument(
                    Argument::new("id", Type::named("String").non_null())
                        .description("id of the droid"),
                )
                .resolver(|_, args| {
                    let id = args.get_str("id").unwrap_or_default().to_owned();
                    Resolution::pending(async move { Ok(data::droid(&id)) })
                }),
            Field::new("characters", Type::named("CharacterUnion").list())
                .resolver(|_, _| Value::list(vec![data::droid("2000"), data::human("1000")])),
        ],
    )
}

/// Registers every type of the Star Wars schema.
pub fn registry() -> Registry {
    registry_with(human_type(false))
}

fn registry_with(human: ObjectMeta) -> Registry {
    let mut registry = Registry::new();
    for meta in [
        episode_enum().into_meta(),
        EnumMeta::new(
            "HumanRank",
            ["PRIVATE", "CAPTAIN", "MAJOR"].map(EnumValue::new),
        )
        .into_meta(),
        EnumMeta::new(
            "DroidRank",
            ["BASIC", "ADVANCED", "SUPERIOR"].map(EnumValue::new),
        )
        .into_meta(),
        ObjectMeta::new(
            "HumanRankObject",
            vec![Field::new("name", Type::named("String"))],
        )
        .into_meta(),
        ObjectMeta::new(
            "DroidRankObject",
            vec![Field::new("name", Type::named("String"))],
        )
        .into_meta(),
        InterfaceMeta::new("Character", Fields::lazy(|| character_fields("character")))
            .description("A character in the Star Wars Trilogy")
            .resolve_type(character_type)
            .into_meta(),
        human.into_meta(),
        droid_type().into_meta(),
        UnionMeta::new("CharacterUnion", ["Human", "Droid"])
            .resolve_type(character_type)
            .into_meta(),
        query_type().into_meta(),
    ] {
        registry.register(meta).unwrap();
    }
    registry
}

/// Builds the Star Wars schema, rooted at `Query`.
pub fn schema() -> Schema {
    Schema::new(registry(), "Query", None).unwrap()
}

/// Builds the Star Wars schema with the `id` of every human failing to
/// resolve.
pub fn schema_with_classified_human_ids() -> Schema {
    Schema::new(registry_with(human_type(true)), "Query", None).unwrap()
}
