#[cfg(test)]
mod tests {
    use crate::fixture::{Fixture, RESERVE_SLACK};

    #[test]
    fn canonical_holds_the_fixed_values() {
        let fx = Fixture::canonical();
        assert_eq!(fx.label, "label");
        assert_eq!(fx.data1, "data1");
        assert_eq!(fx.data2, "data2");
        assert_eq!(fx.data3, "data3");
        assert_eq!(fx.delim, "delim");
    }

    #[test]
    fn canonical_is_one_shared_instance() {
        assert!(std::ptr::eq(Fixture::canonical(), Fixture::canonical()));
    }

    #[test]
    fn expected_rendering_for_canonical() {
        assert_eq!(
            Fixture::canonical().expected(),
            "Result: label: (data1,data2,data3,delim)"
        );
    }

    #[test]
    fn expected_keeps_punctuation_for_empty_values() {
        let fx = Fixture::new("", "", "", "", "");
        assert_eq!(fx.expected(), "Result: : (,,,)");
    }

    #[test]
    fn input_len_sums_the_five_values() {
        assert_eq!(Fixture::canonical().input_len(), 25);
        assert_eq!(Fixture::new("", "", "", "", "").input_len(), 0);
        assert_eq!(Fixture::with_value_len(7).input_len(), 35);
    }

    #[test]
    fn reserve_covers_the_rendered_length() {
        for fx in [
            Fixture::canonical().clone(),
            Fixture::new("", "", "", "", ""),
            Fixture::with_value_len(1),
            Fixture::with_value_len(1024),
        ] {
            let rendered = fx.expected().len();
            assert!(
                "Result: ".len() + fx.reserve_capacity() >= rendered,
                "reserve {} too small for rendering of {} bytes",
                fx.reserve_capacity(),
                rendered
            );
        }
    }

    #[test]
    fn reserve_slack_covers_the_literal_punctuation() {
        // "Result: " + ": (" + three commas + ")" is 15 bytes.
        let empty = Fixture::new("", "", "", "", "");
        assert_eq!(empty.expected().len(), 15);
        assert!(RESERVE_SLACK >= empty.expected().len() - "Result: ".len());
    }

    #[test]
    fn with_value_len_builds_distinct_sized_values() {
        let fx = Fixture::with_value_len(4);
        assert_eq!(fx.label, "llll");
        assert_eq!(fx.data1, "aaaa");
        assert_eq!(fx.data2, "bbbb");
        assert_eq!(fx.data3, "cccc");
        assert_eq!(fx.delim, "dddd");
    }
}
