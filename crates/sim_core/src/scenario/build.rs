use crate::format::decimal;
use crate::scenario::params::{
    ScenarioConfig, ScenarioParams, CAR_TYPE_ATTRIBUTES, RAMP_EDGES, RAMP_FLOWS, VEHICLE_TYPE_ID,
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Minimal indented XML writer for the two scenario documents.
struct XmlDocument {
    out: String,
}

impl XmlDocument {
    fn new(root: &str) -> Self {
        let mut out = String::with_capacity(1024);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        out.push_str(&format!("<{root}>\n"));
        Self { out }
    }

    fn comment(&mut self, depth: usize, text: &str) {
        self.indent(depth);
        self.out
            .push_str(&format!("<!--{}-->\n", text.replace("--", "- -")));
    }

    fn start(&mut self, depth: usize, name: &str, attrs: &[(&str, String)], empty: bool) {
        self.indent(depth);
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out
                .push_str(&format!(" {key}=\"{}\"", escape_attribute(value)));
        }
        self.out.push_str(if empty { "/>\n" } else { ">\n" });
    }

    fn end(&mut self, depth: usize, name: &str) {
        self.indent(depth);
        self.out.push_str(&format!("</{name}>\n"));
    }

    fn finish(mut self, root: &str) -> String {
        self.end(0, root);
        self.out
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the edge document: mainline edges carry the highway speed, the
/// on-ramp carries the ramp speed.
pub fn render_edges_xml(params: &ScenarioParams) -> String {
    let mut doc = XmlDocument::new("edges");
    for edge in &RAMP_EDGES {
        doc.comment(1, edge.comment);
        doc.start(
            1,
            "edge",
            &[
                ("id", edge.id.to_string()),
                ("from", edge.from.to_string()),
                ("to", edge.to.to_string()),
                ("priority", edge.priority.to_string()),
                ("numLanes", edge.num_lanes.to_string()),
                ("speed", decimal(params.speed_for(edge.class))),
            ],
            true,
        );
    }
    doc.finish("edges")
}

/// Render the route document: one vehicle type and one flow per entry point.
pub fn render_routes_xml(params: &ScenarioParams, config: &ScenarioConfig) -> String {
    let mut doc = XmlDocument::new("routes");

    doc.comment(1, "Vehicle type with default LC2013 lane-change model");
    let mut vtype = vec![("id", VEHICLE_TYPE_ID.to_string())];
    vtype.extend(
        CAR_TYPE_ATTRIBUTES
            .iter()
            .map(|(key, value)| (*key, value.to_string())),
    );
    doc.start(1, "vType", &vtype, true);

    for flow in &RAMP_FLOWS {
        doc.comment(1, flow.comment);
        doc.start(
            1,
            "flow",
            &[
                ("id", flow.id.to_string()),
                ("type", VEHICLE_TYPE_ID.to_string()),
                ("begin", config.flow_begin_s.to_string()),
                ("end", config.flow_end_s.to_string()),
                ("vehsPerHour", params.vehs_per_hour_for(flow.class).to_string()),
                ("departLane", "free".to_string()),
                ("departSpeed", "max".to_string()),
            ],
            false,
        );
        doc.start(2, "route", &[("edges", flow.route_edges.to_string())], true);
        doc.end(1, "flow");
    }

    doc.finish("routes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ScenarioParams {
        ScenarioParams {
            highway_speed: 30.0,
            ramp_speed: 12.5,
            mainline_vehs_per_hour: 1800,
            ramp_vehs_per_hour: 400,
        }
    }

    #[test]
    fn edges_document_matches_expected_layout() {
        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<edges>
  <!--Highway, 2 lanes, higher priority-->
  <edge id="main_0" from="N0" to="N1" priority="3" numLanes="2" speed="30.0"/>
  <!--Highway segment WITH acceleration lane (3 lanes right after the merge)-->
  <edge id="main_1a" from="N1" to="N1A" priority="3" numLanes="3" speed="30.0"/>
  <!--Highway segment AFTER acceleration lane ends (back to 2 lanes)-->
  <edge id="main_1b" from="N1A" to="N2" priority="3" numLanes="2" speed="30.0"/>
  <!--Driveway / on-ramp, 1 lane, lower priority-->
  <edge id="ramp_0" from="R0" to="N1" priority="1" numLanes="1" speed="12.5"/>
</edges>
"#;
        assert_eq!(render_edges_xml(&params()), expected);
    }

    #[test]
    fn routes_document_carries_distinct_flow_rates() {
        let xml = render_routes_xml(&params(), &ScenarioConfig::default());

        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(
            r#"<vType id="car" accel="2.6" decel="4.5" length="5.0" maxSpeed="38.0" sigma="0.5" lcStrategic="1.0" lcCooperative="1.0" lcSpeedGain="1.0" lcKeepRight="1.5"/>"#
        ));
        assert!(xml.contains(
            r#"  <flow id="mainFlow" type="car" begin="0" end="600" vehsPerHour="1800" departLane="free" departSpeed="max">
    <route edges="main_0 main_1a main_1b"/>
  </flow>"#
        ));
        assert!(xml.contains(
            r#"  <flow id="rampFlow" type="car" begin="0" end="600" vehsPerHour="400" departLane="free" departSpeed="max">
    <route edges="ramp_0 main_1a main_1b"/>
  </flow>"#
        ));
        assert!(xml.ends_with("</routes>\n"));
    }

    #[test]
    fn flow_window_comes_from_config() {
        let config = ScenarioConfig {
            flow_begin_s: 60,
            flow_end_s: 1200,
            ..ScenarioConfig::default()
        };
        let xml = render_routes_xml(&params(), &config);
        assert!(xml.contains(r#"begin="60" end="1200""#));
    }

    #[test]
    fn writer_nests_elements_and_defuses_comment_terminators() {
        let mut doc = XmlDocument::new("routes");
        doc.comment(1, "mainline -- steady");
        doc.start(1, "flow", &[("id", "f".to_string())], false);
        doc.start(2, "route", &[("edges", "a b".to_string())], true);
        doc.end(1, "flow");

        assert_eq!(
            doc.finish("routes"),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <routes>\n\
             \x20\x20<!--mainline - - steady-->\n\
             \x20\x20<flow id=\"f\">\n\
             \x20\x20\x20\x20<route edges=\"a b\"/>\n\
             \x20\x20</flow>\n\
             </routes>\n"
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(escape_attribute(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn rendered_documents_are_well_formed() {
        let edges = render_edges_xml(&params());
        let routes = render_routes_xml(&params(), &ScenarioConfig::default());
        let edges_doc = roxmltree::Document::parse(&edges).expect("edges should parse");
        let routes_doc = roxmltree::Document::parse(&routes).expect("routes should parse");

        assert_eq!(
            edges_doc
                .root_element()
                .children()
                .filter(|node| node.has_tag_name("edge"))
                .count(),
            4
        );
        assert_eq!(
            routes_doc
                .root_element()
                .children()
                .filter(|node| node.has_tag_name("flow"))
                .count(),
            2
        );
    }
}
