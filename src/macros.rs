/// Builds a `MonthAmounts` from `month => decimal literal` pairs.
#[macro_export]
macro_rules! month_amounts {
    ($($m:literal => $num:literal),* $(,)?) => {
        [$(($m, $crate::amount::Amount::new(::rust_decimal::dec!($num)))),*]
            .into_iter()
            .collect::<$crate::month_amounts::MonthAmounts>()
    };
}

/// Builds an `Amount` from a decimal literal.
#[macro_export]
macro_rules! amount {
    ($num:literal) => {
        $crate::amount::Amount::new(::rust_decimal::dec!($num))
    };
}
