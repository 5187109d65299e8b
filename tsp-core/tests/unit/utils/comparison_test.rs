use super::*;

parameterized_test! {can_compare_floats, (a, b, expected), {
    assert_eq!(compare_floats(a, b), expected);
}}

can_compare_floats! {
    case_01_less: (1., 2., Ordering::Less),
    case_02_greater: (2., 1., Ordering::Greater),
    case_03_equal: (1., 1., Ordering::Equal),
    case_04_nan_left: (Float::NAN, 1., Ordering::Greater),
    case_05_nan_right: (1., Float::NAN, Ordering::Less),
    case_06_nan_both: (Float::NAN, Float::NAN, Ordering::Equal),
}

parameterized_test! {can_detect_integral_values, (value, expected), {
    assert_eq!(is_integral(value, 1E-6), expected);
}}

can_detect_integral_values! {
    case_01_zero: (0., true),
    case_02_one: (1., true),
    case_03_near_one: (1. - 1E-8, true),
    case_04_near_zero: (1E-7, true),
    case_05_fraction: (0.5, false),
    case_06_slightly_off: (1E-4, false),
}
