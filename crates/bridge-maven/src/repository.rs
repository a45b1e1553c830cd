//! Maven Central URL layout. The bridge only ever talks to one repository
//! (no credentials, no alternates) — see SPEC_FULL.md §4.1.

/// The only base URL this bridge supports. Historical `http://` mirrors are
/// deliberately not modeled.
pub const MAVEN_CENTRAL_URL: &str = "https://repo1.maven.org/maven2";

/// Standard Maven layout path for a coordinate:
/// `org.jetbrains.kotlinx:kotlinx-coroutines-core:1.8.0` becomes
/// `org/jetbrains/kotlinx/kotlinx-coroutines-core/1.8.0`.
pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
    format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
}

/// Full URL to a specific file within the coordinate's directory.
pub fn file_url(group: &str, artifact: &str, version: &str, filename: &str) -> String {
    format!(
        "{}/{}/{}",
        MAVEN_CENTRAL_URL,
        coordinate_path(group, artifact, version),
        filename
    )
}

pub fn pom_url(group: &str, artifact: &str, version: &str) -> String {
    file_url(group, artifact, version, &format!("{artifact}-{version}.pom"))
}

pub fn main_url(group: &str, artifact: &str, version: &str, packaging: &str) -> String {
    file_url(
        group,
        artifact,
        version,
        &format!("{artifact}-{version}.{packaging}"),
    )
}

pub fn sources_url(group: &str, artifact: &str, version: &str, packaging: &str) -> String {
    file_url(
        group,
        artifact,
        version,
        &format!("{artifact}-{version}-sources.{packaging}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_path_replaces_dots() {
        let path = coordinate_path("org.jetbrains.kotlinx", "kotlinx-coroutines-core", "1.8.0");
        assert_eq!(path, "org/jetbrains/kotlinx/kotlinx-coroutines-core/1.8.0");
    }

    #[test]
    fn pom_url_format() {
        let url = pom_url("com.example", "widget", "1.2.3");
        assert_eq!(
            url,
            "https://repo1.maven.org/maven2/com/example/widget/1.2.3/widget-1.2.3.pom"
        );
    }

    #[test]
    fn sources_url_format() {
        let url = sources_url("com.example", "widget", "1.2.3", "jar");
        assert!(url.ends_with("widget-1.2.3-sources.jar"));
    }
}
