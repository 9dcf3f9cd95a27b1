use clap::Parser;
use qbank::cli::{Cli, Commands, CrossFileArgs, VerifyArgs};

#[test]
fn verify_flag_parsing() {
    // Given
    let argv = vec!["qbank", "verify", "banks/", "--fix-labels", "--min-length", "15", "--json"];

    // When
    let cmd = Cli::parse_from(argv);

    // Then
    match cmd.command {
        Commands::Verify(VerifyArgs { inputs, fix_labels, min_length, json }) => {
            assert!(fix_labels);
            assert!(json);
            assert_eq!(min_length, Some(15));
            assert_eq!(inputs.paths.len(), 1);
        }
        _ => panic!("expected Verify command"),
    }
}

#[test]
fn cross_file_defaults_to_config_dir() {
    let cmd = Cli::parse_from(["qbank", "--config", "alt.toml", "cross-file", "--seed", "3"]);

    assert_eq!(cmd.config.as_deref(), Some(std::path::Path::new("alt.toml")));
    match cmd.command {
        Commands::CrossFile(CrossFileArgs { inputs, seed, report_only, .. }) => {
            assert!(inputs.paths.is_empty());
            assert_eq!(seed, Some(3));
            assert!(!report_only);
        }
        _ => panic!("expected CrossFile command"),
    }
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["qbank", "dedupe"]).is_err());
}
