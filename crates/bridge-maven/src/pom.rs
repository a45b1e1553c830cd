//! C2 POM Parser: parses one POM into a structured record, tolerant of XML
//! namespaces and the `&oslash;` entity. Grounded on this codebase's
//! event-based `quick-xml` parser (path-stack + string-joined context
//! matching), generalized to the bridge's field set — see SPEC_FULL.md §4.2.

use std::collections::BTreeMap;
use std::path::Path;

use bridge_util::errors::BridgeError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed POM. `parent` starts `None` and is filled in lazily by the
/// graph walker as it follows `parent_coord` up the chain (§4.5 step 7).
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub name: Option<String>,

    pub parent_coord: Option<ParentRef>,
    pub parent: Option<Box<Pom>>,

    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,

    /// `"group:id"` for every dependency declaring `<exclusions>`, per
    /// §4.2's warning rule. Exclusions are parsed but never honored; the
    /// graph walker decides whether to print these (suppressed when
    /// prompts are disabled) since only it knows the prompt mode.
    pub exclusion_warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A dependency declaration. Every field but `group_id`/`artifact_id` is
/// nullable until the property resolver (C3) enriches it.
#[derive(Debug, Clone)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    /// Tri-state per the data model: `None` (unspecified), `Some("true")`,
    /// or `Some("false")` — not a bare bool.
    pub optional: Option<String>,
    pub classifier: Option<String>,
    pub type_: Option<String>,
    pub exclusions: Vec<PomExclusion>,
}

#[derive(Debug, Clone)]
pub struct PomExclusion {
    pub group_id: String,
    pub artifact_id: Option<String>,
}

impl Pom {
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or_else(|| self.parent_coord.as_ref().map(|p| p.group_id.as_str()))
    }

    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or_else(|| self.parent_coord.as_ref().map(|p| p.version.as_str()))
    }

    /// `replace(value, props)`: a single pass substituting every `${k}` with
    /// `props[k]` for each key in `properties`, per §4.3's substitution
    /// rule. Bounded-iteration version lives in `properties::substitute`;
    /// this is the one-pass primitive it calls repeatedly.
    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" | "groupId" => {
                self.effective_group_id().map(str::to_string)
            }
            "project.artifactId" | "pom.artifactId" | "artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" | "version" => {
                self.effective_version().map(str::to_string)
            }
            "project.packaging" | "pom.packaging" => self.packaging.clone(),
            "project.parent.groupId" => self.parent_coord.as_ref().map(|p| p.group_id.clone()),
            "project.parent.version" => self.parent_coord.as_ref().map(|p| p.version.clone()),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// The effective property map seeded with invariant 4's aliases
    /// (`project.version`/`pom.version`/`version`, etc.) on top of the
    /// parsed `<properties>` block. Called once before the parent merge.
    pub fn seed_aliases(&mut self) {
        let mut seed = |key: &str, value: Option<String>| {
            if let Some(v) = value {
                self.properties.entry(key.to_string()).or_insert(v);
            }
        };
        seed("project.groupId", self.group_id.clone());
        seed("pom.groupId", self.group_id.clone());
        seed("groupId", self.group_id.clone());
        seed("project.artifactId", self.artifact_id.clone());
        seed("pom.artifactId", self.artifact_id.clone());
        seed("artifactId", self.artifact_id.clone());
        seed("project.version", self.version.clone());
        seed("pom.version", self.version.clone());
        seed("version", self.version.clone());
    }

    pub fn resolve_one(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find("${") {
            let Some(end) = rest[start..].find('}') else {
                out.push_str(rest);
                return out;
            };
            let key = &rest[start + 2..start + end];
            out.push_str(&rest[..start]);
            match self.resolve_property(key) {
                Some(v) => out.push_str(&v),
                None => out.push_str(&rest[start..start + end + 1]),
            }
            rest = &rest[start + end + 1..];
        }
        out.push_str(rest);
        out
    }

    /// Search `dependencyManagement` for `{group, id}`, recursing into
    /// `parent` if not found locally (§4.2).
    pub fn resolve_dependency_version(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        self.dependency_management
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .and_then(|d| d.version.clone())
            .or_else(|| {
                self.parent
                    .as_ref()
                    .and_then(|p| p.resolve_dependency_version(group_id, artifact_id))
            })
    }

    pub fn resolve_dependency_scope(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        self.dependency_management
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .and_then(|d| d.scope.clone())
            .or_else(|| {
                self.parent
                    .as_ref()
                    .and_then(|p| p.resolve_dependency_scope(group_id, artifact_id))
            })
    }

    pub fn resolve_dependency_optional(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        self.dependency_management
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .and_then(|d| d.optional.clone())
            .or_else(|| {
                self.parent
                    .as_ref()
                    .and_then(|p| p.resolve_dependency_optional(group_id, artifact_id))
            })
    }
}

/// Replace the literal `&oslash;` entity with `O`, rewriting the file if a
/// replacement occurred. Per §4.2: "observed in the wild; the parser
/// otherwise rejects the entity."
pub fn sanitize_file(path: &Path) -> miette::Result<String> {
    let content = std::fs::read_to_string(path).map_err(BridgeError::Io)?;
    if content.contains("&oslash;") {
        let sanitized = content.replace("&oslash;", "O");
        std::fs::write(path, &sanitized).map_err(BridgeError::Io)?;
        Ok(sanitized)
    } else {
        Ok(content)
    }
}

/// Sanitize, parse, and on failure write a quarantine copy under
/// `quarantine_dir` named after the file's own name.
pub fn parse_pom_file(path: &Path, quarantine_dir: &Path) -> miette::Result<Pom> {
    let xml = sanitize_file(path)?;
    match parse_pom(&xml) {
        Ok(pom) => Ok(pom),
        Err(e) => {
            std::fs::create_dir_all(quarantine_dir).map_err(BridgeError::Io)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown.pom".to_string());
            let quarantine_path = quarantine_dir.join(name);
            let _ = std::fs::write(&quarantine_path, &xml);
            Err(BridgeError::PomParse {
                path: path.display().to_string(),
                quarantine_path: quarantine_path.display().to_string(),
                message: e.to_string(),
            }
            .into())
        }
    }
}

/// Parse a POM XML document into a `Pom`. Element lookups use
/// [`quick_xml`]'s `local_name()`, which strips any namespace prefix —
/// the same tolerance the spec asks for without tracking `xmlns` URIs by
/// hand, since Maven POMs overwhelmingly use a single default namespace.
pub fn parse_pom(xml: &str) -> miette::Result<Pom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut current_dep: Option<PomDependency> = None;
    let mut current_exclusion: Option<PomExclusion> = None;
    let mut current_parent: Option<ParentRef> = None;
    let mut in_dep_mgmt = false;
    let mut exclusion_warned_for: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                path.push(tag);
                text_buf.clear();
                let ctx = path_context(&path);

                match ctx.as_str() {
                    "project>dependencyManagement>dependencies>dependency"
                    | "project>dependencies>dependency" => {
                        in_dep_mgmt = ctx.contains("dependencyManagement");
                        current_dep = Some(PomDependency {
                            group_id: String::new(),
                            artifact_id: String::new(),
                            version: None,
                            scope: None,
                            optional: None,
                            classifier: None,
                            type_: None,
                            exclusions: Vec::new(),
                        });
                    }
                    _ if ctx.ends_with(">exclusion") && current_dep.is_some() => {
                        current_exclusion = Some(PomExclusion {
                            group_id: String::new(),
                            artifact_id: None,
                        });
                    }
                    "project>parent" => {
                        current_parent = Some(ParentRef {
                            group_id: String::new(),
                            artifact_id: String::new(),
                            version: String::new(),
                        });
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().trim().to_string();
            }
            Ok(Event::End(ref e)) => {
                let _ = e;
                let ctx = path_context(&path);
                let depth = path.len();

                if depth == 3 && path.first().map(String::as_str) == Some("project")
                    && path.get(1).map(String::as_str) == Some("properties")
                {
                    let prop_name = path.last().cloned().unwrap_or_default();
                    pom.properties.insert(prop_name, text_buf.clone());
                }

                if let Some(ref mut dep) = current_dep {
                    if let Some(ref mut excl) = current_exclusion {
                        match path.last().map(String::as_str) {
                            Some("groupId") => excl.group_id = text_buf.clone(),
                            Some("artifactId") => excl.artifact_id = Some(text_buf.clone()),
                            _ => {}
                        }
                        if ctx.ends_with(">exclusion") {
                            if let Some(excl) = current_exclusion.take() {
                                let owner = format!("{}:{}", dep.group_id, dep.artifact_id);
                                if !exclusion_warned_for.contains(&owner) {
                                    exclusion_warned_for.push(owner);
                                }
                                dep.exclusions.push(excl);
                            }
                        }
                    } else {
                        match path.last().map(String::as_str) {
                            Some("groupId") if ctx.ends_with(">dependency>groupId") => {
                                dep.group_id = text_buf.clone();
                            }
                            Some("artifactId") if ctx.ends_with(">dependency>artifactId") => {
                                dep.artifact_id = text_buf.clone();
                            }
                            Some("version") if ctx.ends_with(">dependency>version") => {
                                dep.version = Some(text_buf.clone());
                            }
                            Some("scope") if ctx.ends_with(">dependency>scope") => {
                                dep.scope = Some(text_buf.clone());
                            }
                            Some("optional") if ctx.ends_with(">dependency>optional") => {
                                dep.optional = Some(text_buf.clone());
                            }
                            Some("classifier") if ctx.ends_with(">dependency>classifier") => {
                                dep.classifier = Some(text_buf.clone());
                            }
                            Some("type") if ctx.ends_with(">dependency>type") => {
                                dep.type_ = Some(text_buf.clone());
                            }
                            _ => {}
                        }
                    }

                    if ctx == "project>dependencies>dependency"
                        || ctx == "project>dependencyManagement>dependencies>dependency"
                    {
                        if let Some(dep) = current_dep.take() {
                            if in_dep_mgmt {
                                pom.dependency_management.push(dep);
                            } else {
                                pom.dependencies.push(dep);
                            }
                        }
                        in_dep_mgmt = false;
                    }
                }

                if let Some(ref mut parent) = current_parent {
                    match path.last().map(String::as_str) {
                        Some("groupId") if ctx == "project>parent>groupId" => {
                            parent.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx == "project>parent>artifactId" => {
                            parent.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx == "project>parent>version" => {
                            parent.version = text_buf.clone();
                        }
                        _ => {}
                    }
                    if ctx == "project>parent" {
                        pom.parent_coord = current_parent.take();
                    }
                }

                if depth == 2 && path.first().map(String::as_str) == Some("project") {
                    match path.last().map(String::as_str) {
                        Some("groupId") => pom.group_id = Some(text_buf.clone()),
                        Some("artifactId") => pom.artifact_id = Some(text_buf.clone()),
                        Some("version") => pom.version = Some(text_buf.clone()),
                        Some("packaging") => pom.packaging = Some(text_buf.clone()),
                        Some("name") => pom.name = Some(text_buf.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BridgeError::validation(format!("failed to parse POM XML: {e}")).into());
            }
            _ => {}
        }
    }

    pom.seed_aliases();
    for owner in &exclusion_warned_for {
        tracing::warn!(owner = %owner, "dependency declares exclusions; exclusions are never honored");
    }
    pom.exclusion_warnings = exclusion_warned_for;

    Ok(pom)
}

fn path_context(path: &[String]) -> String {
    path.join(">")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.example</groupId>
    <artifactId>my-lib</artifactId>
    <version>1.0.0</version>
    <packaging>jar</packaging>

    <properties>
        <lib.ver>4.5.1</lib.ver>
    </properties>

    <dependencies>
        <dependency>
            <groupId>org.demo</groupId>
            <artifactId>lib</artifactId>
            <version>${lib.ver}</version>
        </dependency>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.13.2</version>
            <scope>test</scope>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn parse_simple_pom() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.group_id.as_deref(), Some("org.example"));
        assert_eq!(pom.artifact_id.as_deref(), Some("my-lib"));
        assert_eq!(pom.version.as_deref(), Some("1.0.0"));
        assert_eq!(pom.dependencies.len(), 2);
        assert_eq!(pom.properties.get("lib.ver").unwrap(), "4.5.1");
    }

    #[test]
    fn aliases_seeded_per_invariant_4() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.properties.get("project.version").unwrap(), "1.0.0");
        assert_eq!(pom.properties.get("pom.groupId").unwrap(), "org.example");
        assert_eq!(pom.properties.get("artifactId").unwrap(), "my-lib");
    }

    #[test]
    fn single_pass_substitution() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.resolve_one("${lib.ver}"), "4.5.1");
    }

    #[test]
    fn dependency_management_and_managed_version() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>com.x</groupId>
    <artifactId>parent</artifactId>
    <version>1.0</version>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>com.y</groupId>
                <artifactId>util</artifactId>
                <version>3.0</version>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert_eq!(pom.dependency_management.len(), 1);
        assert_eq!(
            pom.resolve_dependency_version("com.y", "util"),
            Some("3.0".to_string())
        );
    }

    #[test]
    fn parent_ref_parsing() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent-pom</artifactId>
        <version>2.0.0</version>
    </parent>
    <artifactId>child</artifactId>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert!(pom.parent_coord.is_some());
        assert_eq!(pom.effective_group_id(), Some("org.example"));
        assert_eq!(pom.effective_version(), Some("2.0.0"));
    }

    #[test]
    fn exclusion_parsing_without_honoring() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency>
            <groupId>com.example</groupId>
            <artifactId>lib</artifactId>
            <version>1.0</version>
            <exclusions>
                <exclusion>
                    <groupId>commons-logging</groupId>
                    <artifactId>commons-logging</artifactId>
                </exclusion>
            </exclusions>
        </dependency>
    </dependencies>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert_eq!(pom.dependencies[0].exclusions.len(), 1);
        assert_eq!(pom.dependencies[0].exclusions[0].group_id, "commons-logging");
        assert_eq!(pom.exclusion_warnings, vec!["com.example:lib".to_string()]);
    }

    #[test]
    fn oslash_sanitization_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pom");
        std::fs::write(
            &path,
            r#"<project><groupId>org.n&oslash;rdic</groupId><artifactId>a</artifactId><version>1.0</version></project>"#,
        )
        .unwrap();
        let xml = sanitize_file(&path).unwrap();
        assert!(xml.contains("org.nOrdic"));
        let reread = std::fs::read_to_string(&path).unwrap();
        assert!(reread.contains("org.nOrdic"));
    }

    #[test]
    fn malformed_pom_is_quarantined() {
        let dir = tempfile::tempdir().unwrap();
        let quarantine = dir.path().join("quarantine");
        let path = dir.path().join("bad.pom");
        std::fs::write(&path, "<project><a></b></project>").unwrap();
        let err = parse_pom_file(&path, &quarantine);
        assert!(err.is_err());
        assert!(quarantine.join("bad.pom").exists());
    }
}
