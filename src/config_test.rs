use super::*;

fn run_args(argv: &[&str]) -> (Cli, RunArgs) {
    let cli = Cli::try_parse_from(argv).unwrap();
    let Command::Run(args) = &cli.command else {
        panic!("expected run command, got {:?}", cli.command);
    };
    let args = args.clone();
    (cli, args)
}

#[test]
fn run_defaults() {
    let (cli, args) = run_args(&["kinematic", "run", "p1"]);
    let cfg = SessionConfig::from_args(&cli.rest_url, &cli.ws_url, &args).unwrap();
    assert_eq!(cfg.rest_url, DEFAULT_REST_URL);
    assert_eq!(cfg.ws_url, DEFAULT_WS_URL);
    assert_eq!(cfg.project, "p1");
    assert_eq!(cfg.viewport, (1280.0, 720.0));
    assert_eq!(cfg.capability, Capability::View);
    assert!(!cfg.save);
    assert_eq!(cfg.step.as_micros(), 16_666);
    assert_eq!(cfg.redraw_period.as_micros(), 16_666);
}

#[test]
fn run_overrides() {
    let (cli, args) = run_args(&[
        "kinematic",
        "--rest-url",
        "https://store.test/api/",
        "--ws-url",
        "wss://store.test/api",
        "run",
        "p2",
        "--step-ms",
        "100",
        "--redraw-hz",
        "30",
        "--viewport",
        "800x600",
        "--edit",
        "--save",
    ]);
    let cfg = SessionConfig::from_args(&cli.rest_url, &cli.ws_url, &args).unwrap();
    assert_eq!(cfg.rest_url, "https://store.test/api");
    assert_eq!(cfg.ws_url, "wss://store.test/api");
    assert_eq!(cfg.step, Duration::from_millis(100));
    assert_eq!(cfg.redraw_period.as_micros(), 33_333);
    assert_eq!(cfg.viewport, (800.0, 600.0));
    assert_eq!(cfg.capability, Capability::Edit);
    assert!(cfg.save);
}

#[test]
fn global_urls_accepted_after_subcommand() {
    let cli = Cli::try_parse_from(["kinematic", "projects", "--rest-url", "http://h:1"]).unwrap();
    assert_eq!(cli.rest_url, "http://h:1");
    assert!(matches!(cli.command, Command::Projects));
}

#[test]
fn blank_project_rejected() {
    let (cli, args) = run_args(&["kinematic", "run", "  "]);
    assert_eq!(
        SessionConfig::from_args(&cli.rest_url, &cli.ws_url, &args),
        Err(ConfigError::EmptyProject)
    );
}

#[test]
fn wrong_scheme_rejected() {
    let err = parse_base_url("websocket url", "http://x", &["ws://", "wss://"]).unwrap_err();
    assert_eq!(err, ConfigError::Url { name: "websocket url", url: "http://x".into() });
    assert!(parse_base_url("rest url", "http://", &["http://"]).is_err());
}

#[test]
fn viewport_parsing() {
    assert_eq!(parse_viewport("1024x768"), Ok((1024.0, 768.0)));
    assert_eq!(parse_viewport(" 640 X 480 "), Ok((640.0, 480.0)));
    assert!(parse_viewport("1024").is_err());
    assert!(parse_viewport("0x10").is_err());
    assert!(parse_viewport("-5x10").is_err());
    assert!(parse_viewport("axb").is_err());
}

#[test]
fn step_and_rate_must_be_positive() {
    assert_eq!(parse_step(0.0), Err(ConfigError::Step(0.0)));
    assert!(parse_step(f64::NAN).is_err());
    assert_eq!(parse_redraw_rate(-1.0), Err(ConfigError::RedrawRate(-1.0)));
    assert_eq!(parse_redraw_rate(4.0), Ok(Duration::from_millis(250)));
}

#[test]
fn out_of_range_durations_are_errors() {
    assert_eq!(parse_step(1e300), Err(ConfigError::Step(1e300)));
    assert_eq!(parse_redraw_rate(1e-310), Err(ConfigError::RedrawRate(1e-310)));
}
