use graph_result::Scalar;
use proptest::prelude::*;

proptest! {
    #[test]
    fn integer_accessors_agree(v in any::<i64>()) {
        let s = Scalar::Integer(v);
        prop_assert_eq!(s.to_string(), v.to_string());
        prop_assert_eq!(s.int(), v as isize);
        prop_assert_eq!(s.bool(), v != 0);
        prop_assert_eq!(s.float64(), v as f64);
        prop_assert!(!s.is_nil());
    }

    #[test]
    fn text_never_faults(text in ".*") {
        let s = Scalar::Text(text.clone());
        prop_assert_eq!(s.to_string(), text.clone());
        prop_assert_eq!(s.int(), 0);
        prop_assert_eq!(s.bool(), text == "true");
        let expected = text.parse::<f64>().unwrap_or(0.0);
        let got = s.float64();
        prop_assert!(got == expected || (got.is_nan() && expected.is_nan()));
    }

    #[test]
    fn formatted_floats_read_back(v in -1.0e12f64..1.0e12) {
        let s = Scalar::Text(v.to_string());
        prop_assert_eq!(s.float64(), v);
    }
}
