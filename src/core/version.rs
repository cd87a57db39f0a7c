//! Version number substitution in OSGi, Maven and p2 metadata files.

use std::fmt;
use std::str::FromStr;

use lazy_regex::{lazy_regex, Lazy, Regex};
use regex::NoExpand;

use crate::error::CliError;

static MANIFEST_VERSION: Lazy<Regex> = lazy_regex!(r"Bundle-Version: [0-9]+\.[0-9]+\.[0-9]+\.qualifier");
static FEATURE_VERSION: Lazy<Regex> = lazy_regex!(r#"version="[0-9]+\.[0-9]+\.[0-9]+\.qualifier""#);
static POM_VERSION: Lazy<Regex> = lazy_regex!(r"<version>[0-9]+\.[0-9]+\.[0-9]+-SNAPSHOT</version>");
static QUALIFIED_VERSION: Lazy<Regex> = lazy_regex!(r"[0-9]+\.[0-9]+\.[0-9]+\.qualifier");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    First,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    Manifest,
    Feature,
    Pom,
    Category,
}

impl VersionKind {
    /// Order in which the kinds are processed by `update-version`.
    pub const ALL: [VersionKind; 4] = [
        VersionKind::Manifest,
        VersionKind::Feature,
        VersionKind::Pom,
        VersionKind::Category,
    ];

    pub fn file_pattern(&self) -> &'static str {
        match self {
            Self::Manifest => "MANIFEST.MF",
            Self::Feature => "feature.xml",
            Self::Pom => "pom.xml",
            Self::Category => "category.xml",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Manifest => "bundle manifests",
            Self::Feature => "feature descriptors",
            Self::Pom => "Maven poms",
            Self::Category => "p2 categories",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::Manifest => &*MANIFEST_VERSION,
            Self::Feature => &*FEATURE_VERSION,
            Self::Pom => &*POM_VERSION,
            Self::Category => &*QUALIFIED_VERSION,
        }
    }

    fn replacement(&self, version: &TargetVersion) -> String {
        match self {
            Self::Manifest => format!("Bundle-Version: {version}.qualifier"),
            Self::Feature => format!("version=\"{version}.qualifier\""),
            Self::Pom => format!("<version>{version}-SNAPSHOT</version>"),
            Self::Category => format!("{version}.qualifier"),
        }
    }

    /// Manifests, features and poms carry a single version field; categories
    /// reference the version once per listed feature.
    pub fn mode(&self) -> ReplaceMode {
        match self {
            Self::Category => ReplaceMode::All,
            _ => ReplaceMode::First,
        }
    }
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A plain `MAJOR.MINOR.PATCH` release number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetVersion(semver::Version);

impl FromStr for TargetVersion {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let version =
            semver::Version::parse(s).map_err(|_| CliError::InvalidVersion(s.to_string()))?;
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(CliError::InvalidVersion(s.to_string()));
        }
        Ok(TargetVersion(version))
    }
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rewrites the version field(s) of `kind` in `content`. Returns `None` when
/// nothing matched or the file already carries `target`.
pub fn substitute(content: &str, kind: VersionKind, target: &TargetVersion) -> Option<String> {
    let pattern = kind.pattern();
    if !pattern.is_match(content) {
        return None;
    }

    let replacement = kind.replacement(target);
    let updated = match kind.mode() {
        ReplaceMode::First => pattern.replace(content, NoExpand(&replacement)),
        ReplaceMode::All => pattern.replace_all(content, NoExpand(&replacement)),
    };

    if updated == content {
        None
    } else {
        Some(updated.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> TargetVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_target_version_rejects_non_release() {
        assert!("2.0.0".parse::<TargetVersion>().is_ok());
        assert!(" 2.0.0 ".parse::<TargetVersion>().is_ok());
        assert!("2.0".parse::<TargetVersion>().is_err());
        assert!("2.0.0-rc1".parse::<TargetVersion>().is_err());
        assert!("2.0.0+build".parse::<TargetVersion>().is_err());
        assert!("two".parse::<TargetVersion>().is_err());
    }

    #[test]
    fn test_manifest_only_version_changes() {
        let content = "Manifest-Version: 1.0\r\nBundle-Name: Core\r\nBundle-Version: 1.2.3.qualifier\r\nBundle-Vendor: Example\r\n";
        let updated = substitute(content, VersionKind::Manifest, &v("2.0.0")).unwrap();
        assert_eq!(
            updated,
            "Manifest-Version: 1.0\r\nBundle-Name: Core\r\nBundle-Version: 2.0.0.qualifier\r\nBundle-Vendor: Example\r\n"
        );
    }

    #[test]
    fn test_substitution_is_idempotent() {
        let content = "Bundle-Version: 1.2.3.qualifier\n";
        let once = substitute(content, VersionKind::Manifest, &v("2.0.0")).unwrap();
        assert_eq!(substitute(&once, VersionKind::Manifest, &v("2.0.0")), None);
    }

    #[test]
    fn test_feature_replaces_first_only() {
        let content = r#"<feature id="org.example" version="0.9.0.qualifier">
   <includes id="org.other" version="0.9.0.qualifier"/>
   <plugin id="org.example.core" version="0.0.0"/>
</feature>
"#;
        let updated = substitute(content, VersionKind::Feature, &v("1.0.0")).unwrap();
        assert_eq!(
            updated,
            content.replacen(r#"version="0.9.0.qualifier""#, r#"version="1.0.0.qualifier""#, 1)
        );
    }

    #[test]
    fn test_pom_snapshot_version() {
        let content = "<project>\n  <artifactId>core</artifactId>\n  <version>0.3.0-SNAPSHOT</version>\n</project>\n";
        let updated = substitute(content, VersionKind::Pom, &v("0.4.0")).unwrap();
        assert_eq!(
            updated,
            "<project>\n  <artifactId>core</artifactId>\n  <version>0.4.0-SNAPSHOT</version>\n</project>\n"
        );
    }

    #[test]
    fn test_pom_release_version_untouched() {
        let content = "<version>1.0.0</version>\n";
        assert_eq!(substitute(content, VersionKind::Pom, &v("2.0.0")), None);
    }

    #[test]
    fn test_category_replaces_every_occurrence() {
        let content = r#"<site>
   <feature url="features/a_1.0.0.qualifier.jar" id="a" version="1.0.0.qualifier"/>
   <feature url="features/b_1.0.0.qualifier.jar" id="b" version="1.0.0.qualifier"/>
   <bundle id="c" version="1.0.0.qualifier"/>
</site>
"#;
        let updated = substitute(content, VersionKind::Category, &v("1.1.0")).unwrap();
        assert_eq!(updated.matches("1.1.0.qualifier").count(), 5);
        assert!(!updated.contains("1.0.0.qualifier"));
        assert_eq!(updated, content.replace("1.0.0.qualifier", "1.1.0.qualifier"));
    }

    #[test]
    fn test_dots_are_literal() {
        let content = "Bundle-Version: 1x2x3.qualifier\n";
        assert_eq!(substitute(content, VersionKind::Manifest, &v("2.0.0")), None);
    }

    #[test]
    fn test_only_ascii_digits_match() {
        let content = "Bundle-Version: \u{0661}.\u{0662}.\u{0663}.qualifier\n";
        assert_eq!(substitute(content, VersionKind::Manifest, &v("2.0.0")), None);
        let category = "<bundle version=\"\u{0967}.0.0.qualifier\"/>\n";
        assert_eq!(substitute(category, VersionKind::Category, &v("2.0.0")), None);
    }

    #[test]
    fn test_no_match_is_none() {
        assert_eq!(substitute("nothing here", VersionKind::Category, &v("1.0.0")), None);
    }
}
