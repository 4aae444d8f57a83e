use pretty_assertions::assert_eq;

use crate::{
    ast::{Field, InputValue, Operation},
    executor::{ErrorKind, ExecutionError, ExecutionOutput, FieldError, PathSegment},
    meta::{self, Argument, EnumMeta, EnumValue, ObjectMeta, ScalarMeta, Type},
    Arguments, Registry, Schema, Value, Variables,
};

use super::run;

/// Hands the coerced `input` argument back, or `"<absent>"` if there's none.
fn echo(_: &Value, args: &Arguments) -> Value {
    args.get("input")
        .cloned()
        .unwrap_or_else(|| Value::scalar("<absent>"))
}

fn echo_field(name: &str, input: Argument) -> meta::Field {
    meta::Field::new(name, Type::named("Echo"))
        .argument(input)
        .resolver(echo)
}

fn schema() -> Schema {
    let input = |ty: Type| Argument::new("input", ty);

    let mut registry = Registry::new();
    for meta in [
        ScalarMeta::new("Echo", |v| Ok(v.clone()), |_| Err("Echo is output only".into()))
            .into_meta(),
        EnumMeta::new(
            "Episode",
            [
                EnumValue::new("NEWHOPE").value(4),
                EnumValue::new("EMPIRE").value(5),
                EnumValue::new("JEDI").value(6),
            ],
        )
        .into_meta(),
        ObjectMeta::new(
            "TestType",
            vec![
                echo_field("nullableString", input(Type::named("String"))),
                echo_field("nonNullString", input(Type::named("String").non_null())),
                echo_field(
                    "defaulted",
                    input(Type::named("String")).default_value("Hello World"),
                ),
                echo_field("list", input(Type::named("String").list())),
                echo_field(
                    "nonNullListOfNonNull",
                    input(Type::named("String").non_null().list().non_null()),
                ),
                echo_field("episode", input(Type::named("Episode"))),
                echo_field("int", input(Type::named("Int"))),
                echo_field("float", input(Type::named("Float"))),
                meta::Field::new("required", Type::named("Echo").non_null())
                    .argument(input(Type::named("String").non_null()))
                    .resolver(echo),
            ],
        )
        .into_meta(),
    ] {
        registry.register(meta).unwrap();
    }
    Schema::new(registry, "TestType", None).unwrap()
}

async fn run_field(field: Field, vars: Variables) -> ExecutionOutput {
    run(&schema(), &Operation::query([field]), &Value::null(), &vars).await
}

/// Runs a single field, expecting it to resolve without errors.
async fn resolve(field: Field, vars: Variables) -> Value {
    let name = field.response_key().clone();
    let output = run_field(field, vars).await;

    assert_eq!(output.errors, vec![]);
    output
        .data
        .as_object_value()
        .and_then(|o| o.get_field_value(&name))
        .cloned()
        .unwrap()
}

/// Runs a single field, expecting it to fail with exactly one error.
async fn fail(field: Field, vars: Variables) -> FieldError {
    let name = field.response_key().clone();
    let output = run_field(field, vars).await;

    assert_eq!(output.errors.len(), 1, "errors: {:?}", output.errors);
    assert_eq!(output.errors[0].path(), [PathSegment::from(name.as_str())]);
    output.errors[0].error().clone()
}

fn var(name: &str, value: impl Into<InputValue>) -> Variables {
    Variables::from([(name.into(), value.into())])
}

#[tokio::test]
async fn inline_values() {
    let field = Field::new("nullableString").argument("input", "foo");

    assert_eq!(resolve(field, Variables::new()).await, graphql_value!("foo"));
}

#[tokio::test]
async fn nullable_inputs_may_be_omitted_or_null() {
    let omitted = Field::new("nullableString");
    let null = Field::new("nullableString").argument("input", InputValue::null());

    assert_eq!(resolve(omitted, Variables::new()).await, graphql_value!("<absent>"));
    assert_eq!(resolve(null, Variables::new()).await, graphql_value!(null));
}

#[tokio::test]
async fn variables() {
    let field = || Field::new("nullableString").argument("input", InputValue::variable("value"));

    assert_eq!(resolve(field(), var("value", "bar")).await, graphql_value!("bar"));
    assert_eq!(
        resolve(field(), var("value", InputValue::null())).await,
        graphql_value!(null),
    );
    assert_eq!(resolve(field(), Variables::new()).await, graphql_value!("<absent>"));
}

#[tokio::test]
async fn default_values() {
    let omitted = Field::new("defaulted");
    let from_absent_variable =
        Field::new("defaulted").argument("input", InputValue::variable("value"));
    let null = Field::new("defaulted").argument("input", InputValue::null());

    assert_eq!(resolve(omitted, Variables::new()).await, graphql_value!("Hello World"));
    assert_eq!(
        resolve(from_absent_variable, Variables::new()).await,
        graphql_value!("Hello World"),
    );
    assert_eq!(resolve(null, Variables::new()).await, graphql_value!(null));
}

#[tokio::test]
async fn missing_non_null_argument() {
    let err = fail(Field::new("nonNullString"), Variables::new()).await;

    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert_eq!(
        err.message(),
        "Field \"nonNullString\" argument \"input\" of type \"String!\" is required, but it \
         was not provided",
    );
}

#[tokio::test]
async fn null_non_null_argument() {
    let inline = Field::new("nonNullString").argument("input", InputValue::null());
    let variable = Field::new("nonNullString").argument("input", InputValue::variable("value"));

    for err in [
        fail(inline, Variables::new()).await,
        fail(variable, var("value", InputValue::null())).await,
    ] {
        assert_eq!(err.kind(), ErrorKind::NullArgument);
        assert_eq!(
            err.message(),
            "Invalid value for argument \"input\": Expected non-nullable type \"String!\" not \
             to be null",
        );
    }
}

#[tokio::test]
async fn argument_errors_bubble_from_non_null_fields() {
    let operation = Operation::query([
        Field::new("nullableString").argument("input", "foo"),
        Field::new("required"),
    ]);

    let output = run(&schema(), &operation, &Value::null(), &Variables::new()).await;

    assert_eq!(output.data, graphql_value!(null));
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].error().kind(), ErrorKind::MissingRequiredArgument);
}

#[tokio::test]
async fn unknown_argument() {
    let field = Field::new("nullableString")
        .argument("input", "foo")
        .argument("other", "bar");

    let output = run_field(field, Variables::new()).await;

    assert_eq!(
        output,
        ExecutionOutput {
            data: graphql_value!({"nullableString": null}),
            errors: vec![ExecutionError::new(
                ["nullableString".into()],
                FieldError::of_kind(
                    ErrorKind::UnknownArgument,
                    "Unknown argument \"other\" on field \"nullableString\"",
                ),
            )],
        },
    );
}

#[tokio::test]
async fn lists() {
    let single = Field::new("list").argument("input", "one");
    let with_null = Field::new("list").argument(
        "input",
        InputValue::list(vec!["a".into(), InputValue::null()]),
    );
    let from_variable = Field::new("list").argument(
        "input",
        InputValue::list(vec!["a".into(), InputValue::variable("absent")]),
    );

    assert_eq!(resolve(single, Variables::new()).await, graphql_value!(["one"]));
    assert_eq!(resolve(with_null, Variables::new()).await, graphql_value!(["a", null]));
    assert_eq!(resolve(from_variable, Variables::new()).await, graphql_value!(["a", null]));
}

#[tokio::test]
async fn lists_of_non_null() {
    let valid = Field::new("nonNullListOfNonNull")
        .argument("input", InputValue::list(vec!["a".into(), "b".into()]));
    let with_null = Field::new("nonNullListOfNonNull").argument(
        "input",
        InputValue::list(vec!["a".into(), InputValue::null()]),
    );

    assert_eq!(resolve(valid, Variables::new()).await, graphql_value!(["a", "b"]));

    let err = fail(with_null, Variables::new()).await;
    assert_eq!(err.kind(), ErrorKind::NullArgument);
    assert_eq!(
        err.message(),
        "Invalid value for argument \"input\": Expected non-nullable type \"String!\" not to be \
         null",
    );
}

#[tokio::test]
async fn enums() {
    let literal = Field::new("episode").argument("input", InputValue::enum_value("EMPIRE"));
    let variable = Field::new("episode").argument("input", InputValue::variable("episode"));

    assert_eq!(resolve(literal, Variables::new()).await, graphql_value!(5));
    assert_eq!(resolve(variable, var("episode", "JEDI")).await, graphql_value!(6));
}

#[tokio::test]
async fn invalid_enum_values() {
    let unknown = Field::new("episode").argument("input", InputValue::enum_value("PHANTOM"));
    let err = fail(unknown, Variables::new()).await;
    assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);
    assert_eq!(
        err.message(),
        "Invalid value for argument \"input\": Value \"PHANTOM\" does not exist in \"Episode\" \
         enum",
    );

    let string_literal = Field::new("episode").argument("input", "EMPIRE");
    let err = fail(string_literal, Variables::new()).await;
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn numeric_coercion() {
    let int_to_float = Field::new("float").argument("input", 1);
    assert_eq!(resolve(int_to_float, Variables::new()).await, graphql_value!(1.0));

    let float_to_int = Field::new("int").argument("input", 1.5);
    let err = fail(float_to_int, Variables::new()).await;
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
