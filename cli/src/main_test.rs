mod tests {
    use crate::*;

    #[test]
    fn test_cli_args_default_to_show() {
        let args = CliArgs::try_parse_from(["catbench"]).expect("should parse");
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_parse_show() {
        let args = CliArgs::try_parse_from(["catbench", "show"]).expect("should parse");
        assert!(matches!(args.command, Some(Commands::Show)));
    }

    #[test]
    fn test_cli_args_parse_verify() {
        let args = CliArgs::try_parse_from(["catbench", "verify"]).expect("should parse");
        assert!(matches!(args.command, Some(Commands::Verify)));
    }

    #[test]
    fn test_cli_args_parse_report_flags() {
        let args = CliArgs::try_parse_from([
            "catbench",
            "report",
            "--skip-bench",
            "--notes",
            "laptop on battery",
        ])
        .expect("should parse");
        assert!(matches!(args.command, Some(Commands::Report(_))));
    }

    #[test]
    fn test_cli_args_reject_unknown_subcommand() {
        assert!(CliArgs::try_parse_from(["catbench", "race"]).is_err());
    }

    #[test]
    fn show_runs_against_the_canonical_fixture() {
        show().expect("show should verify and print every strategy");
    }

    #[test]
    fn verify_covers_the_edge_fixtures() {
        verify().expect("all fixtures should verify");
    }
}
