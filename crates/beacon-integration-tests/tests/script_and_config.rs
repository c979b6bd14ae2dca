//! Host wiring: configuration file, logging and Lua scripts together.

use std::collections::HashMap;
use std::io::Write;

use beacon_config::Config;
use beacon_events::{EntityId, Event};
use beacon_lua::ScriptEvents;
use beacon_telemetry::LogFormat;
use beacon_test::{CollectingReporter, hit_event, spawn_event, test_player};

fn script_events(config: &Config, reporter: &CollectingReporter) -> ScriptEvents {
    let events =
        ScriptEvents::with_reporter(mlua::Lua::new(), config.registry.clone(), reporter.clone());
    events.install().unwrap();
    events
}

#[test]
fn config_file_drives_the_registry() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[logging]\nformat = \"json\"\n\n[registry]\ninitial_capacity = 16"
    )
    .unwrap();
    let env: HashMap<String, String> =
        [("BEACON_CATCH_PANICS".to_string(), "false".to_string())].into();

    let config = Config::load_with_env(Some(file.path()), &env).unwrap();

    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.registry.initial_capacity, 16);
    assert!(!config.registry.catch_panics);

    let reporter = CollectingReporter::new();
    let events = script_events(&config, &reporter);
    assert_eq!(events.registry().config(), &config.registry);
}

#[test]
fn lua_spawn_and_hit_scenario() {
    let reporter = CollectingReporter::new();
    let events = script_events(&Config::default(), &reporter);

    events
        .exec(
            r#"
            log = {}
            events.listen("spawn", 5, function(weapon)
                table.insert(log, "persistent:" .. weapon)
            end)
            events.once("spawn", 5, function(weapon)
                table.insert(log, "once:" .. weapon)
            end)

            local h
            h = events.once("hit", 7, function(damage)
                table.insert(log, "hit:" .. damage)
                h:clear()
            end)
            "#,
            "scenario",
        )
        .unwrap();

    events.dispatch(&spawn_event(test_player(), "rifle"));
    events.dispatch(&spawn_event(test_player(), "rifle"));
    let hit = events.dispatch(&hit_event(EntityId::new(7), 10));

    let log: Vec<String> = events
        .lua()
        .globals()
        .get::<mlua::Table>("log")
        .unwrap()
        .sequence_values::<String>()
        .map(Result::unwrap)
        .collect();

    assert_eq!(
        log,
        vec![
            "persistent:rifle",
            "once:rifle",
            "persistent:rifle",
            "hit:10"
        ]
    );
    assert_eq!(hit.invoked, 1);
    assert!(hit.is_clean());
    assert!(reporter.is_empty());
    assert_eq!(events.registry().len(), 1);
}

#[test]
fn lua_listener_removing_another_mid_dispatch() {
    let reporter = CollectingReporter::new();
    let events = script_events(&Config::default(), &reporter);

    events
        .exec(
            r#"
            log = {}
            local second
            events.listen("hit", 1, function()
                table.insert(log, "first")
                second:clear()
            end)
            second = events.listen("hit", 1, function()
                table.insert(log, "second")
            end)
            "#,
            "remove_other",
        )
        .unwrap();

    let report = events.dispatch(&Event::new("hit", &EntityId::new(1)));

    let count: i64 = events.lua().load("return #log").eval().unwrap();
    assert_eq!(count, 1);
    assert_eq!(report.matched, 2);
    assert_eq!(report.invoked, 1);
}
