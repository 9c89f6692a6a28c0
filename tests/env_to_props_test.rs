//! Tests for the env_to_props property mapping

use rstest::rstest;

use sdub::domain::{env_to_props, escape_prop, EnvSnapshot};

fn kafka_env() -> EnvSnapshot {
    EnvSnapshot::from_pairs([
        ("KAFKA_BROKER_ID", "1"),
        ("KAFKA_LOG_DIRS", "/var/lib/kafka"),
        ("KAFKA_LOG~RETENTION_HOURS", "168"),
        ("KAFKA_HEAP_OPTS", "-Xmx1G"),
        ("KAFKAESQUE", "nope"),
        ("ZOOKEEPER_CONNECT", "zk:2181"),
    ])
}

#[rstest]
#[case("KAFKA_BROKER_ID", "KAFKA_", "broker.id")]
#[case("KAFKA_LOG~RETENTION_HOURS", "KAFKA_", "log_retention.hours")]
#[case("APP_DB_HOST", "APP_", "db.host")]
#[case("APP_", "APP_", "")]
#[case("APP_MIXED_Case", "APP_", "mixed.case")]
#[case("APP_A~~B", "APP_", "a__b")]
#[case("APP_APP_NAME", "APP_", "name")]
#[case("KAFKA_LISTENER_KAFKA_PORT", "KAFKA_", "listener.port")]
fn given_name_when_escaping_then_expected_key(
    #[case] name: &str,
    #[case] prefix: &str,
    #[case] expected: &str,
) {
    assert_eq!(escape_prop(name, prefix), expected);
}

#[test]
fn given_prefix_when_collecting_then_only_matching_names_transformed() {
    // Arrange
    let env = kafka_env();

    // Act
    let props = env_to_props(&env, "KAFKA_", &[]);

    // Assert
    let keys: Vec<&str> = props.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["broker.id", "heap.opts", "log.dirs", "log_retention.hours"]
    );
    assert_eq!(props["log.dirs"], "/var/lib/kafka");
    assert_eq!(props["log_retention.hours"], "168");
}

#[test]
fn given_exclude_list_when_collecting_then_excluded_names_skipped() {
    // Arrange
    let env = kafka_env();
    let exclude = vec!["KAFKA_HEAP_OPTS".to_string()];

    // Act
    let props = env_to_props(&env, "KAFKA_", &exclude);

    // Assert
    assert!(!props.contains_key("heap.opts"));
    assert_eq!(props.len(), 3);
}

#[test]
fn given_empty_prefix_when_collecting_then_every_variable_included() {
    let env = kafka_env();

    let props = env_to_props(&env, "", &[]);

    assert_eq!(props.len(), env.len());
    assert_eq!(props["zookeeper.connect"], "zk:2181");
}

#[test]
fn given_no_match_when_collecting_then_empty_mapping() {
    let env = kafka_env();

    let props = env_to_props(&env, "CONNECT_", &[]);

    assert!(props.is_empty());
}

#[test]
fn given_colliding_keys_when_collecting_then_last_name_wins() {
    // Arrange: both map to "a.b"
    let env = EnvSnapshot::from_pairs([("P_A_B", "underscore"), ("P_a_b", "lower")]);

    // Act
    let props = env_to_props(&env, "P_", &[]);

    // Assert
    assert_eq!(props.len(), 1);
    assert_eq!(props["a.b"], "lower");
}

#[test]
fn given_prefix_inside_name_when_collecting_then_every_occurrence_removed() {
    // Arrange
    let env = EnvSnapshot::from_pairs([
        ("KAFKA_LISTENER_KAFKA_PORT", "9092"),
        ("APP_APP_NAME", "x"),
    ]);

    // Act
    let kafka = env_to_props(&env, "KAFKA_", &[]);
    let app = env_to_props(&env, "APP_", &[]);

    // Assert
    assert_eq!(kafka.get("listener.port").map(String::as_str), Some("9092"));
    assert_eq!(app.get("name").map(String::as_str), Some("x"));
    assert_eq!(app.len(), 1);
}
