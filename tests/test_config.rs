use std::io::Write;

use negotiator::config::{CONFIG_ENV, Config, ConfigError, LISTEN_ENV, ProcessorKind};
use negotiator::http::response::{Response, StatusCode};
use negotiator::negotiation::NegotiationError;
use serde::Serialize;

#[derive(Serialize)]
struct User {
    first_name: &'static str,
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_name)
    }
}

const USER: User = User { first_name: "Joe" };

// All environment handling lives in one test so parallel tests never race on it.
#[test]
fn test_config_load_from_environment() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  greeting: from file\nnegotiation:\n  processors: [text]").unwrap();

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(LISTEN_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");

    unsafe {
        std::env::set_var(CONFIG_ENV, file.path());
        std::env::set_var(LISTEN_ENV, "0.0.0.0:3000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.server.greeting, "from file");
    assert_eq!(cfg.negotiation.processors, vec![ProcessorKind::Text]);

    unsafe {
        std::env::set_var(CONFIG_ENV, "/nonexistent/negotiator.yaml");
    }
    assert!(matches!(Config::load(), Err(ConfigError::Read { .. })));

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(LISTEN_ENV);
    }
}

#[test]
fn test_config_empty_file_is_default() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert_eq!(Config::from_file(file.path()).unwrap(), Config::default());
}

#[test]
fn test_config_full_yaml() {
    let yaml = r#"
server:
  listen_addr: "0.0.0.0:9000"
  greeting: hi
negotiation:
  processors: [text, json]
  json_indent: "  "
  ajax_responder: json
logging:
  level: debug
"#;
    let cfg = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.negotiation.processors, vec![ProcessorKind::Text, ProcessorKind::Json]);
    assert_eq!(cfg.negotiation.json_indent.as_deref(), Some("  "));
    assert_eq!(cfg.negotiation.ajax_responder, Some(ProcessorKind::Json));
    assert_eq!(cfg.logging.level, "debug");
}

#[test]
fn test_build_negotiator_keeps_order() {
    let cfg = Config::from_yaml_str("negotiation:\n  processors: [text, json]\n").unwrap();
    let negotiator = cfg.build_negotiator::<User>().unwrap();

    let mut response = Response::new(StatusCode::Ok);
    negotiator.negotiate(&mut response, "*/*", Some(&USER)).unwrap();

    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.body, b"Joe\n".to_vec());
}

#[test]
fn test_build_negotiator_applies_indent_and_ajax() {
    let yaml = "negotiation:\n  processors: [text, json]\n  json_indent: \"  \"\n  ajax_responder: json\n";
    let negotiator = Config::from_yaml_str(yaml)
        .unwrap()
        .build_negotiator::<User>()
        .unwrap();

    let mut response = Response::new(StatusCode::Ok);
    negotiator
        .negotiate_ajax(&mut response, "text/plain", true, Some(&USER))
        .unwrap();

    assert_eq!(
        String::from_utf8(response.body).unwrap(),
        "{\n  \"first_name\": \"Joe\"\n}\n"
    );
}

#[test]
fn test_build_negotiator_text_only_rejects_json() {
    let cfg = Config::from_yaml_str("negotiation:\n  processors: [text]\n").unwrap();
    let negotiator = cfg.build_negotiator::<User>().unwrap();

    let mut response = Response::new(StatusCode::Ok);
    let result = negotiator.negotiate(&mut response, "application/json", Some(&USER));

    assert!(matches!(result, Err(NegotiationError::NotAcceptable)));
    assert_eq!(response.status, StatusCode::NotAcceptable);
}

#[test]
fn test_build_negotiator_requires_processors() {
    let cfg = Config::from_yaml_str("negotiation:\n  processors: []\n").unwrap();
    assert!(matches!(
        cfg.build_negotiator::<User>(),
        Err(ConfigError::NoProcessors)
    ));
}
