/// DSL macros for building test schedules.
///
/// Produces `Vec<Step<&'static str, &'static str>>`.
///
/// # Syntax
///
/// ```ignore
/// schedule! {
///     [w(T1, A), _],          // one step, `_` is a gap
///     [_, r(T3, A)],
///     [w(T3, B), w(T1, A)],
/// }
/// ```
///
/// - `w(txn, item)` -> `Operation::write("txn", "item")`
/// - `r(txn, item)` -> `Operation::read("txn", "item")`
/// - `_`            -> no operation in this column
///
/// Build a single cell.
#[macro_export]
macro_rules! cell {
    (_) => {
        None
    };
    (w($txn:ident, $item:ident)) => {
        Some(sercheck_core::schedule::types::Operation::<&'static str, &'static str>::write(
            stringify!($txn),
            stringify!($item),
        ))
    };
    (r($txn:ident, $item:ident)) => {
        Some(sercheck_core::schedule::types::Operation::<&'static str, &'static str>::read(
            stringify!($txn),
            stringify!($item),
        ))
    };
}

/// Build one step from comma-separated cells.
#[macro_export]
macro_rules! step {
    ($($kind:tt $(( $($args:tt)* ))?),* $(,)?) => {{
        let step: sercheck_core::schedule::types::Step<&'static str, &'static str> =
            vec![$($crate::cell!($kind $(( $($args)* ))?)),*];
        step
    }};
}

/// Build a full schedule: steps are `[ ... ]` blocks.
#[macro_export]
macro_rules! schedule {
    ($( [ $($cells:tt)* ] ),* $(,)?) => {{
        let schedule: Vec<sercheck_core::schedule::types::Step<&'static str, &'static str>> =
            vec![$($crate::step!($($cells)*)),*];
        schedule
    }};
}
