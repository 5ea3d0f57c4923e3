#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare catalog groups as a compact table.
///
/// ```text
/// catalog! {
///     "Container" => [
///         ("Image", Last),
///         ("Volume", All, many),   // `many` marks a repeatable key
///     ],
/// }
/// ```
#[macro_export]
macro_rules! catalog {
    (@many many) => { true };
    (@many) => { false };
    (
        $( $group:literal => [ $( ($key:literal, $mode:ident $(, $many:ident)?) ),* $(,)? ] ),* $(,)?
    ) => {{
        let mut fields: Vec<$crate::Field> = Vec::new();
        $(
            $(
                fields.push($crate::Field::new(
                    $group,
                    $key,
                    $crate::LookupMode::$mode,
                    $crate::catalog!(@many $($many)?),
                ));
            )*
        )*
        $crate::Catalog::from_fields(fields)
    }};
}

/// Build a boxed rule list for one field.
#[macro_export]
macro_rules! rules {
    ($($rule:expr),* $(,)?) => {
        vec![ $( Box::new($rule) as Box<dyn $crate::Rule> ),* ]
    };
}
