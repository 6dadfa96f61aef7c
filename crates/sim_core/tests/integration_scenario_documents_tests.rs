use std::fs;

use sim_core::scenario::{ConfigEmitter, ScenarioConfig, ScenarioParams, XmlConfigEmitter};

fn config_in(dir: &std::path::Path) -> ScenarioConfig {
    ScenarioConfig {
        edges_file: dir.join("ramp.edg.xml"),
        routes_file: dir.join("ramp.rou.xml"),
        flow_begin_s: 0,
        flow_end_s: 900,
    }
}

#[test]
fn emitted_documents_describe_the_merge_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let emitter = XmlConfigEmitter::new(config_in(dir.path()));
    let params = ScenarioParams {
        highway_speed: 31.5,
        ramp_speed: 12.0,
        mainline_vehs_per_hour: 2100,
        ramp_vehs_per_hour: 450,
    };

    let emitted = emitter.emit(&params).unwrap();

    let edges_text = fs::read_to_string(&emitted.edges_file).unwrap();
    let edges = roxmltree::Document::parse(&edges_text).unwrap();
    let speeds: Vec<(&str, &str, &str)> = edges
        .descendants()
        .filter(|n| n.has_tag_name("edge"))
        .map(|n| {
            (
                n.attribute("id").unwrap(),
                n.attribute("numLanes").unwrap(),
                n.attribute("speed").unwrap(),
            )
        })
        .collect();
    assert_eq!(
        speeds,
        vec![
            ("main_0", "2", "31.5"),
            ("main_1a", "3", "31.5"),
            ("main_1b", "2", "31.5"),
            ("ramp_0", "1", "12.0"),
        ]
    );

    let routes_text = fs::read_to_string(&emitted.routes_file).unwrap();
    let routes = roxmltree::Document::parse(&routes_text).unwrap();
    let flows: Vec<_> = routes
        .descendants()
        .filter(|n| n.has_tag_name("flow"))
        .collect();
    assert_eq!(flows.len(), 2);
    assert_eq!(flows[0].attribute("vehsPerHour"), Some("2100"));
    assert_eq!(flows[1].attribute("vehsPerHour"), Some("450"));
    assert!(flows.iter().all(|f| f.attribute("end") == Some("900")));

    let ramp_route = flows[1]
        .children()
        .find(|n| n.has_tag_name("route"))
        .and_then(|n| n.attribute("edges"));
    assert_eq!(ramp_route, Some("ramp_0 main_1a main_1b"));

    let vtype = routes
        .descendants()
        .find(|n| n.has_tag_name("vType"))
        .unwrap();
    assert_eq!(vtype.attribute("id"), Some("car"));
    assert_eq!(vtype.attribute("lcKeepRight"), Some("1.5"));
}

#[test]
fn second_emission_replaces_the_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let emitter = XmlConfigEmitter::new(config_in(dir.path()));
    let mut params = ScenarioParams {
        highway_speed: 30.0,
        ramp_speed: 10.0,
        mainline_vehs_per_hour: 1000,
        ramp_vehs_per_hour: 100,
    };
    emitter.emit(&params).unwrap();

    params.ramp_speed = 20.0;
    let emitted = emitter.emit(&params).unwrap();

    let edges = fs::read_to_string(emitted.edges_file).unwrap();
    assert!(edges.contains(r#"id="ramp_0" from="R0" to="N1" priority="1" numLanes="1" speed="20.0""#));
    assert!(!edges.contains(r#"speed="10.0""#));
}
