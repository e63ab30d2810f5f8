/// Builds a [`Shape`](crate::Shape) from a struct-like declaration.
///
/// Scalar fields are written `name: Kind` with a [`ScalarKind`](crate::ScalarKind)
/// variant; nested records are written `name => shape_expression`.
///
/// ```rust
/// use serde_qdn::{shape, Shape, ScalarKind};
///
/// let point = shape!(Point { X: I32, Y: I32 });
/// let line = shape!(Line { Start => point.clone(), End => point.clone() });
///
/// assert_eq!(
///     point,
///     Shape::new("Point")
///         .with_scalar("X", ScalarKind::I32)
///         .with_scalar("Y", ScalarKind::I32)
/// );
/// assert_eq!(line.fields()[1].name, "End");
/// ```
#[macro_export]
macro_rules! shape {
    ($name:ident { $($body:tt)* }) => {
        $crate::shape!(@fields $crate::Shape::new(stringify!($name)); $($body)*)
    };

    (@fields $acc:expr;) => {
        $acc
    };

    // Scalar field
    (@fields $acc:expr; $field:ident : $kind:ident $(, $($rest:tt)*)?) => {
        $crate::shape!(
            @fields $acc.with_scalar(stringify!($field), $crate::ScalarKind::$kind);
            $($($rest)*)?
        )
    };

    // Nested record field
    (@fields $acc:expr; $field:ident => $nested:expr $(, $($rest:tt)*)?) => {
        $crate::shape!(
            @fields $acc.with_record(stringify!($field), $nested);
            $($($rest)*)?
        )
    };
}
