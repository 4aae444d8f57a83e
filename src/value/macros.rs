/// Construct JSON-like [`Value`]s by using JSON syntax.
///
/// Mostly used for runtime data handed to resolvers, error extensions and
/// expected results in tests.
///
/// # Example
///
/// ```rust
/// # use juniper_dynamic::{graphql_value, Value};
/// #
/// # let _: Value =
/// graphql_value!(null);
/// # let _: Value =
/// graphql_value!(1234);
/// # let _: Value =
/// graphql_value!("test");
/// # let _: Value =
/// graphql_value!([1234, "test", true]);
/// # let _: Value =
/// graphql_value!({"key": "value", "foo": 1234});
/// ```
///
/// [`Value`]: crate::Value
#[macro_export]
macro_rules! graphql_value {
    ///////////
    // Array //
    ///////////

    (@array [$($elems:expr,)*]) => {
        $crate::Value::list(vec![$($elems),*])
    };

    (@array [$($elems:expr,)*] null $(, $($rest:tt)*)?) => {
        $crate::graphql_value!(
            @array [$($elems,)* $crate::Value::null(),] $($($rest)*)?
        )
    };

    (@array [$($elems:expr,)*] [$($array:tt)*] $(, $($rest:tt)*)?) => {
        $crate::graphql_value!(
            @array [$($elems,)* $crate::graphql_value!([$($array)*]),] $($($rest)*)?
        )
    };

    (@array [$($elems:expr,)*] {$($map:tt)*} $(, $($rest:tt)*)?) => {
        $crate::graphql_value!(
            @array [$($elems,)* $crate::graphql_value!({$($map)*}),] $($($rest)*)?
        )
    };

    (@array [$($elems:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::graphql_value!(
            @array [$($elems,)* $crate::Value::from($next),] $($($rest)*)?
        )
    };

    ////////////
    // Object //
    ////////////

    (@object $object:ident) => {};

    (@object $object:ident $key:literal : null $(, $($rest:tt)*)?) => {
        let _ = $object.add_field($key, $crate::Value::null());
        $crate::graphql_value!(@object $object $($($rest)*)?);
    };

    (@object $object:ident $key:literal : [$($array:tt)*] $(, $($rest:tt)*)?) => {
        let _ = $object.add_field($key, $crate::graphql_value!([$($array)*]));
        $crate::graphql_value!(@object $object $($($rest)*)?);
    };

    (@object $object:ident $key:literal : {$($map:tt)*} $(, $($rest:tt)*)?) => {
        let _ = $object.add_field($key, $crate::graphql_value!({$($map)*}));
        $crate::graphql_value!(@object $object $($($rest)*)?);
    };

    (@object $object:ident $key:literal : $value:expr $(, $($rest:tt)*)?) => {
        let _ = $object.add_field($key, $crate::Value::from($value));
        $crate::graphql_value!(@object $object $($($rest)*)?);
    };

    //////////////
    // Defaults //
    //////////////

    ([ $($arr:tt)* ]) => {
        $crate::graphql_value!(@array [] $($arr)*)
    };

    ({}) => {
        $crate::Value::object($crate::Object::with_capacity(0))
    };

    ({ $($map:tt)+ }) => {
        $crate::Value::object({
            let mut object = $crate::Object::with_capacity(0);
            $crate::graphql_value!(@object object $($map)*);
            object
        })
    };

    (null) => ($crate::Value::null());

    ($e:expr) => ($crate::Value::from($e));
}
