#[macro_export]
macro_rules! assert_debug_string {
    ($expected:expr, $value:expr) => {{
        match (&$expected, &$value) {
            (expected_val, val) => assert_eq!(*expected_val, format!("{:?}", val)),
        }
    }};
    ($expected:expr, $value:expr ,) => {
        $crate::assert_debug_string!($expected, $value)
    };
}

#[macro_export]
macro_rules! assert_equivalent {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => assert!(
                left_val.is_formula_equivalent(right_val),
                "`{}` is not formula-equivalent to `{}`",
                left_val,
                right_val
            ),
        }
    }};
    ($left:expr, $right:expr ,) => {
        $crate::assert_equivalent!($left, $right)
    };
}
