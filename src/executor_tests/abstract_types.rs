use pretty_assertions::assert_eq;

use crate::{
    ast::{Field, InlineFragment, Operation, Selection},
    executor::{ErrorKind, ExecutionError, ExecutionOutput, FieldError, PathSegment},
    meta::{self, InterfaceMeta, ObjectMeta, Type, UnionMeta},
    Registry, Schema, Value, Variables,
};

use super::run;

fn kind_of(pet: &Value) -> Option<arcstr::ArcStr> {
    pet.as_object_value()?
        .get_field_value("kind")?
        .as_string_value()
        .map(Into::into)
}

/// `Named` dispatches on `__typename`, `Pet` on the `kind` entry.
fn schema() -> Schema {
    let mut registry = Registry::new();
    for meta in [
        InterfaceMeta::new("Named", vec![meta::Field::new("name", Type::named("String"))])
            .into_meta(),
        ObjectMeta::new(
            "Dog",
            vec![
                meta::Field::new("name", Type::named("String")),
                meta::Field::new("barks", Type::named("Boolean")),
            ],
        )
        .interfaces(["Named"])
        .into_meta(),
        ObjectMeta::new(
            "Cat",
            vec![
                meta::Field::new("name", Type::named("String")),
                meta::Field::new("meows", Type::named("Boolean")),
            ],
        )
        .interfaces(["Named"])
        .into_meta(),
        ObjectMeta::new(
            "Person",
            vec![meta::Field::new("name", Type::named("String"))],
        )
        .interfaces(["Named"])
        .into_meta(),
        UnionMeta::new("Pet", ["Dog", "Cat"])
            .resolve_type(kind_of)
            .into_meta(),
        ObjectMeta::new(
            "Query",
            vec![
                meta::Field::new("pets", Type::named("Pet").list()),
                meta::Field::new("named", Type::named("Named").list()),
                meta::Field::new("pet", Type::named("Pet")),
                meta::Field::new("somebody", Type::named("Named")),
                meta::Field::new("requiredPet", Type::named("Pet").non_null()),
            ],
        )
        .into_meta(),
    ] {
        registry.register(meta).unwrap();
    }
    Schema::new(registry, "Query", None).unwrap()
}

fn abstract_error(path: &str, message: &str) -> ExecutionError {
    ExecutionError::new(
        [path.into()],
        FieldError::of_kind(ErrorKind::AbstractTypeResolution, message),
    )
}

async fn run_query(selections: impl IntoIterator<Item = Field>, root: Value) -> ExecutionOutput {
    run(
        &schema(),
        &Operation::query(selections),
        &root,
        &Variables::new(),
    )
    .await
}

fn pet_selections() -> [Selection; 3] {
    [
        Field::new("__typename").into(),
        InlineFragment::on("Dog", [Field::new("name"), Field::new("barks")]).into(),
        InlineFragment::on("Cat", [Field::new("name"), Field::new("meows")]).into(),
    ]
}

#[tokio::test]
async fn union_dispatches_with_its_type_resolver() {
    let output = run_query(
        [Field::new("pets").selections(pet_selections())],
        graphql_value!({
            "pets": [
                {"kind": "Dog", "name": "Odie", "barks": true},
                {"kind": "Cat", "name": "Garfield", "meows": false},
            ],
        }),
    )
    .await;

    assert_eq!(
        output,
        ExecutionOutput {
            data: graphql_value!({
                "pets": [
                    {"__typename": "Dog", "name": "Odie", "barks": true},
                    {"__typename": "Cat", "name": "Garfield", "meows": false},
                ],
            }),
            errors: vec![],
        },
    );
}

#[tokio::test]
async fn interface_dispatches_on_typename_entry() {
    let output = run_query(
        [Field::new("named").selections([
            Selection::from(Field::new("name")),
            InlineFragment::on("Dog", [Field::new("barks")]).into(),
            InlineFragment::on("Person", [Field::new("__typename").alias("kind")]).into(),
        ])],
        graphql_value!({
            "named": [
                {"__typename": "Dog", "name": "Odie", "barks": true},
                {"__typename": "Person", "name": "Jon"},
            ],
        }),
    )
    .await;

    assert_eq!(
        output,
        ExecutionOutput {
            data: graphql_value!({
                "named": [
                    {"name": "Odie", "barks": true},
                    {"name": "Jon", "kind": "Person"},
                ],
            }),
            errors: vec![],
        },
    );
}

#[tokio::test]
async fn unresolvable_values_null_their_position() {
    let output = run_query(
        [Field::new("somebody").selections([Field::new("name")])],
        graphql_value!({"somebody": {"name": "Nobody"}}),
    )
    .await;

    assert_eq!(
        output,
        ExecutionOutput {
            data: graphql_value!({"somebody": null}),
            errors: vec![abstract_error(
                "somebody",
                "Abstract type \"Named\" must resolve to an Object type at runtime. Either the \
                 \"Named\" type should provide a type resolver or the value should carry a \
                 \"__typename\" entry",
            )],
        },
    );
}

#[tokio::test]
async fn rejects_types_outside_of_the_union() {
    let output = run_query(
        [Field::new("pet").selections(pet_selections())],
        graphql_value!({"pet": {"kind": "Person", "name": "Jon"}}),
    )
    .await;

    assert_eq!(
        output,
        ExecutionOutput {
            data: graphql_value!({"pet": null}),
            errors: vec![abstract_error(
                "pet",
                "Runtime Object type \"Person\" is not a possible type for \"Pet\"",
            )],
        },
    );
}

#[tokio::test]
async fn rejects_unknown_and_non_object_types() {
    let output = run_query(
        [Field::new("pet").selections(pet_selections())],
        graphql_value!({"pet": {"kind": "Ghost"}}),
    )
    .await;
    assert_eq!(
        output.errors,
        vec![abstract_error(
            "pet",
            "Abstract type \"Pet\" was resolved to a type \"Ghost\" that does not exist inside \
             the schema",
        )],
    );

    let output = run_query(
        [Field::new("pet").selections(pet_selections())],
        graphql_value!({"pet": {"kind": "Named"}}),
    )
    .await;
    assert_eq!(
        output.errors,
        vec![abstract_error(
            "pet",
            "Abstract type \"Pet\" was resolved to a non-object type \"Named\"",
        )],
    );
}

#[tokio::test]
async fn non_null_abstract_failure_bubbles_once() {
    let output = run_query(
        [
            Field::new("requiredPet").selections(pet_selections()),
            Field::new("pets").selections(pet_selections()),
        ],
        graphql_value!({"requiredPet": {"name": "Odie"}, "pets": []}),
    )
    .await;

    assert_eq!(output.data, graphql_value!(null));
    assert_eq!(
        output
            .errors
            .iter()
            .map(|e| (e.path().to_vec(), e.error().kind()))
            .collect::<Vec<_>>(),
        vec![(vec![PathSegment::from("requiredPet")], ErrorKind::AbstractTypeResolution)],
    );
}
