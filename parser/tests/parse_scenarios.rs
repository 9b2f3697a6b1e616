//! End-to-end parse scenarios against small schemas.

use argschema_core::{Command, Parameter, ParameterError, Subcommand};
use argschema_parser::{HelpFormatter, ParsedValues, Parser, ParserConfig};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run_schema() -> Command {
    let run = Subcommand::new("run", "Run the job a number of times.")
        .with_parameter(Parameter::integer("count", "Number of repetitions.", 1, 10).unwrap())
        .with_parameter(
            Parameter::string("label", "Label attached to the run.", Vec::<String>::new())
                .with_default_value("x")
                .unwrap(),
        );
    let inspect = Subcommand::new("inspect", "Inspect a previous run.")
        .with_parameter(Parameter::path("report", "Report file to read.", true))
        .with_parameter(
            Parameter::string("format", "Output format.", ["json", "text"])
                .with_default_value("text")
                .unwrap(),
        );

    Command::new("tool", "Example tool with two subcommands.")
        .with_subcommand(run)
        .unwrap()
        .with_subcommand(inspect)
        .unwrap()
}

fn run_parser() -> Parser {
    Parser::new(run_schema()).unwrap()
}

fn flag_parser() -> Parser {
    let schema = Command::new("toggle", "Toggles a flag.")
        .with_parameter(Parameter::boolean("flag", "The flag to set."))
        .unwrap();
    Parser::new(schema).unwrap()
}

// ---------------------------------------------------------------------------
// Subcommand schemas
// ---------------------------------------------------------------------------

#[test]
fn test_mandatory_value_and_default() {
    let parsed = run_parser().parse(["run", "--count=5"]).unwrap();
    assert_eq!(parsed.name(), "tool");

    let run = parsed.subcommand().unwrap();
    assert_eq!(run.name(), "run");

    let count = run.integer_parameter("count").unwrap();
    assert_eq!(count.name, "count");
    assert_eq!(count.value, 5);
    assert_eq!(run.string_parameter("label").unwrap().value, "x");
}

#[test]
fn test_out_of_range_value() {
    let err = run_parser().parse(["run", "--count=11"]).unwrap_err();
    assert!(err.to_string().contains("must not be greater than 10"));

    // Scoped to the resolved subcommand.
    assert!(
        err.usage()
            .contains("Usage: tool run --count=<value> [--label=<value>]\n")
    );
    assert!(!err.usage().contains("Subcommands:"));
}

#[test]
fn test_no_subcommand() {
    let err = run_parser().parse(Vec::<&str>::new()).unwrap_err();
    assert_eq!(err.cause(), &ParameterError::NoSubcommand);
    assert!(err.usage().starts_with("Error: No subcommand found\n"));
    assert!(err.usage().contains("Usage: tool <subcommand> [<args>]\n"));
    assert!(err.usage().contains("Subcommands:\n  inspect  Inspect a previous run.\n  run      "));
}

#[test]
fn test_unknown_subcommand() {
    let err = run_parser().parse(["bogus"]).unwrap_err();
    assert!(err.to_string().contains("Unknown subcommand 'bogus'"));
}

#[test]
fn test_flag_before_subcommand_is_rejected() {
    let err = run_parser().parse(["--count=5", "run"]).unwrap_err();
    assert_eq!(
        err.cause(),
        &ParameterError::UnknownSubcommand("--count=5".into())
    );
}

#[test]
fn test_subcommand_names_are_case_sensitive() {
    assert!(run_parser().parse(["Run", "--count=5"]).is_err());
}

#[test]
fn test_parameter_of_other_subcommand_is_unknown() {
    let err = run_parser()
        .parse(["run", "--count=5", "--format=json"])
        .unwrap_err();
    assert_eq!(err.cause(), &ParameterError::UnknownParameter("format".into()));
}

#[test]
fn test_path_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.json");
    std::fs::write(&report, "{}").unwrap();
    let arg = format!("--report={}", report.display());

    let parsed = run_parser()
        .parse(["inspect", arg.as_str(), "--format=json"])
        .unwrap();
    let inspect = parsed.subcommand().unwrap();
    let path = inspect.path_parameter("report").unwrap().value;
    assert!(path.is_absolute());
    assert!(path.ends_with("report.json"));
    assert_eq!(inspect.string_parameter("format").unwrap().value, "json");

    let missing = format!("--report={}", dir.path().join("nope.json").display());
    let err = run_parser().parse(["inspect", missing.as_str()]).unwrap_err();
    assert!(matches!(err.cause(), ParameterError::PathNotFound { .. }));
}

#[test]
fn test_parsed_result_serializes_values() {
    let parsed = run_parser().parse(["run", "--count=3"]).unwrap();
    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "tool",
            "subcommand": {
                "name": "run",
                "parameters": { "count": 3, "label": "x" }
            }
        })
    );
}

// ---------------------------------------------------------------------------
// Parameter-only schemas
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_boolean() {
    let err = flag_parser().parse(["--flag=maybe"]).unwrap_err();
    assert!(matches!(err.cause(), ParameterError::InvalidBoolean { .. }));
    assert!(err.to_string().contains("boolean"));
}

#[test]
fn test_valid_boolean() {
    let parsed = flag_parser().parse(["--flag=true"]).unwrap();
    assert!(parsed.boolean_parameter("flag").unwrap().value);
    assert!(parsed.string_parameter("flag").is_none());
    assert!(parsed.boolean_parameter("other").is_none());
}

#[test]
fn test_root_usage_on_missing_flag() {
    let err = flag_parser().parse(Vec::<String>::new()).unwrap_err();
    let expected = "\
Error: Parameter 'flag' is missing

Usage: toggle --flag=<value>

Toggles a flag.

Options:
  --flag  The flag to set. Allowed values: false|true.
";
    assert_eq!(err.usage(), expected);
}

// ---------------------------------------------------------------------------
// Help rendering
// ---------------------------------------------------------------------------

#[test]
fn test_help_matches_formatter() {
    let parser = run_parser();
    assert_eq!(parser.help(), HelpFormatter::default().help(parser.schema()));
    assert!(!parser.help().contains("Error:"));
}

#[test]
fn test_wrapped_lines_fit_and_are_indented() {
    let long = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
                quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo.";
    let mut sub = Subcommand::new("sync", long);
    for name in ["alpha", "beta-parameter", "gamma", "delta", "epsilon", "zeta", "eta"] {
        sub.add_parameter(
            Parameter::string(name, long, Vec::<String>::new())
                .with_default_value("value")
                .unwrap(),
        );
    }
    let schema = Command::new("tool", long).with_subcommand(sub).unwrap();
    let parser = Parser::new(schema).unwrap();

    let err = parser.parse(["sync", "--omega=1"]).unwrap_err();
    let usage = err.usage();

    let column = "  --beta-parameter  ".len();
    let mut in_options = false;
    for line in usage.lines() {
        assert!(line.chars().count() <= 80, "line too long: {line:?}");
        if line == "Options:" {
            in_options = true;
            continue;
        }
        if in_options && !line.starts_with("  --") {
            assert!(line.starts_with(&" ".repeat(column)), "bad indent: {line:?}");
            assert!(!line[column..].starts_with(' '), "bad indent: {line:?}");
        }
    }

    // The synopsis wraps under `Usage: `.
    let synopsis: Vec<_> = usage
        .lines()
        .skip_while(|l| !l.starts_with("Usage: "))
        .take_while(|l| !l.is_empty())
        .collect();
    assert!(synopsis.len() > 1);
    for continuation in &synopsis[1..] {
        assert!(continuation.starts_with("       ["));
    }
}

#[test]
fn test_long_path_in_error_is_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("x".repeat(100)).join("report.json");
    let arg = format!("--report={}", missing.display());

    let err = run_parser().parse(["inspect", arg.as_str()]).unwrap_err();
    assert!(matches!(err.cause(), ParameterError::PathNotFound { .. }));
    for line in err.usage().lines() {
        assert!(line.chars().count() <= 80, "line too long: {line:?}");
    }

    // The split path is still complete once the line breaks are removed.
    let error_block: String = err
        .usage()
        .lines()
        .take_while(|l| !l.is_empty())
        .map(str::trim_start)
        .collect();
    assert!(error_block.contains(&"x".repeat(100)));
}

#[test]
fn test_one_sided_bounds_fit_width() {
    let json = r#"{
        "name": "tool",
        "description": "Example tool.",
        "parameters": [
            {"name": "ratio", "description": "Sampling ratio.", "type": "double", "min": 0},
            {"name": "retries", "description": "Retry limit.", "type": "integer", "max": 5}
        ]
    }"#;
    let schema: Command = serde_json::from_str(json).unwrap();
    let help = Parser::new(schema).unwrap().help();

    assert!(help.contains("--ratio    Sampling ratio. Allowed values: at least 0.\n"));
    assert!(help.contains("--retries  Retry limit. Allowed values: at most 5.\n"));
    for line in help.lines() {
        assert!(line.chars().count() <= 80, "line too long: {line:?}");
    }
}

#[test]
fn test_configured_width() {
    let config = ParserConfig::from_yaml_str("help:\n  width: 40\n").unwrap();
    let parser = Parser::with_config(run_schema(), &config).unwrap();
    for line in parser.help().lines() {
        assert!(line.chars().count() <= 40, "line too long: {line:?}");
    }
}

// ---------------------------------------------------------------------------
// Reuse
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_parses_are_independent() {
    let parser = run_parser();

    let first = parser.parse(["run", "--count=2", "--label=first"]).unwrap();
    let second = parser.parse(["run", "--count=9"]).unwrap();

    let first = first.subcommand().unwrap();
    let second = second.subcommand().unwrap();
    assert_eq!(first.string_parameter("label").unwrap().value, "first");
    assert_eq!(second.string_parameter("label").unwrap().value, "x");
    assert_eq!(second.integer_parameter("count").unwrap().value, 9);
}

#[test]
fn test_concurrent_parses_share_schema() {
    let parser = run_parser();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=10)
            .map(|count| {
                let parser = &parser;
                scope.spawn(move || {
                    let arg = format!("--count={count}");
                    let parsed = parser.parse(["run", arg.as_str()]).unwrap();
                    parsed
                        .subcommand()
                        .and_then(|s| s.integer_parameter("count"))
                        .map(|p| p.value)
                })
            })
            .collect();

        for (expected, handle) in (1..=10).zip(handles) {
            assert_eq!(handle.join().unwrap(), Some(expected));
        }
    });
}
