//! Artifact Meta-Data (AMD): Savant's per-artifact XML descriptor, built in
//! `downloadAndProcess` (§4.5 step 4) from a node's Savant dependency groups
//! and the artifact's licenses. `AMDSerializer.toXML` is the external
//! interface named in §6; this module is its concrete implementation,
//! written with the same `quick-xml` event-writer style this crate's POM
//! parser uses for reading.

use std::collections::BTreeMap;
use std::io::Cursor;

use bridge_util::errors::BridgeError;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::license::License;

#[derive(Debug, Clone)]
pub struct AmdDependency {
    pub group: String,
    pub project: String,
    pub name: String,
    pub version: String,
    pub r#type: String,
}

/// Dependency groups keyed by `scope + (optional ? "-optional" : "")`,
/// created lazily on first use per §4.5's "Savant dependencies projection".
#[derive(Debug, Clone, Default)]
pub struct Amd {
    pub dependency_groups: BTreeMap<String, Vec<AmdDependency>>,
    pub licenses: Vec<License>,
}

impl Amd {
    pub fn add_dependency(&mut self, group_name: impl Into<String>, dep: AmdDependency) {
        self.dependency_groups.entry(group_name.into()).or_default().push(dep);
    }
}

pub fn to_xml(amd: &Amd) -> miette::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Start(BytesStart::new("amd")))
        .map_err(xml_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("licenses")))
        .map_err(xml_err)?;
    for license in &amd.licenses {
        let mut el = BytesStart::new("license");
        el.push_attribute(("identifier", license.0.as_str()));
        writer.write_event(Event::Empty(el)).map_err(xml_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("licenses")))
        .map_err(xml_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("dependencies")))
        .map_err(xml_err)?;
    for (group_name, deps) in &amd.dependency_groups {
        let mut group_el = BytesStart::new("group");
        group_el.push_attribute(("name", group_name.as_str()));
        writer.write_event(Event::Start(group_el)).map_err(xml_err)?;
        for dep in deps {
            let mut el = BytesStart::new("dependency");
            el.push_attribute(("group", dep.group.as_str()));
            el.push_attribute(("project", dep.project.as_str()));
            el.push_attribute(("name", dep.name.as_str()));
            el.push_attribute(("version", dep.version.as_str()));
            el.push_attribute(("type", dep.r#type.as_str()));
            writer.write_event(Event::Empty(el)).map_err(xml_err)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("group")))
            .map_err(xml_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("dependencies")))
        .map_err(xml_err)?;

    writer.write_event(Event::End(BytesEnd::new("amd"))).map_err(xml_err)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| BridgeError::io_failure(e.to_string()).into())
}

fn xml_err(e: std::io::Error) -> miette::Report {
    BridgeError::io_failure(format!("failed writing AMD XML: {e}")).into()
}
