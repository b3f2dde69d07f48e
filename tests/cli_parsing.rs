use clap::Parser;
use std::path::PathBuf;
use taskwright::cli::commands::schedule::ScheduleCommands;
use taskwright::cli::commands::session::SessionCommands;
use taskwright::cli::{Cli, Commands};

#[test]
fn test_parse_plan() {
    let cli = Cli::try_parse_from([
        "taskwright",
        "plan",
        "--session",
        "s1",
        "--query",
        "Monitor Apple's quarterly earnings",
        "--agent",
        "ResearchAgent",
    ])
    .unwrap();

    assert!(!cli.json);
    match cli.command {
        Commands::Plan(args) => {
            assert_eq!(args.session, "s1");
            assert_eq!(args.query, "Monitor Apple's quarterly earnings");
            assert_eq!(args.agent.as_deref(), Some("ResearchAgent"));
            assert!(args.hints.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_plan_with_hints_and_defaults() {
    let cli = Cli::try_parse_from([
        "taskwright",
        "plan",
        "-q",
        "yes",
        "--hints",
        r#"{"recurring_intent": false}"#,
    ])
    .unwrap();

    match cli.command {
        Commands::Plan(args) => {
            assert_eq!(args.session, "default");
            assert_eq!(args.hints.as_deref(), Some(r#"{"recurring_intent": false}"#));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_plan_requires_query() {
    assert!(Cli::try_parse_from(["taskwright", "plan", "--session", "s1"]).is_err());
}

#[test]
fn test_parse_session_commands() {
    let cli = Cli::try_parse_from(["taskwright", "session", "show", "s1"]).unwrap();
    match cli.command {
        Commands::Session(args) => match args.command {
            SessionCommands::Show { session } => assert_eq!(session, "s1"),
            SessionCommands::Clear { .. } => panic!("Wrong session command"),
        },
        _ => panic!("Wrong top-level command"),
    }

    let cli = Cli::try_parse_from(["taskwright", "session", "clear", "s2"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Session(args) if matches!(&args.command, SessionCommands::Clear { session } if session == "s2")
    ));
}

#[test]
fn test_parse_schedule_check() {
    let cli = Cli::try_parse_from([
        "taskwright",
        "schedule",
        "check",
        "--interval",
        "every 30 minutes",
        "--time",
        "9 AM",
    ])
    .unwrap();

    match cli.command {
        Commands::Schedule(args) => match args.command {
            ScheduleCommands::Check { interval, time, raw } => {
                assert_eq!(interval.as_deref(), Some("every 30 minutes"));
                assert_eq!(time.as_deref(), Some("9 AM"));
                assert!(raw.is_none());
            }
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "taskwright",
        "agents",
        "--query",
        "tesla stock",
        "--json",
        "--config",
        "custom.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Agents(args) => assert_eq!(args.query.as_deref(), Some("tesla stock")),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["taskwright", "swarm", "start"]).is_err());
}
