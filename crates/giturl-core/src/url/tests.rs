//! Tests for the url module.

use super::*;

mod parse_tests {
    use super::*;

    #[test]
    fn parse_https_url() {
        let parsed = ParsedUrl::parse("https://github.com/org/repo.git").unwrap();
        assert_eq!(parsed.protocol.as_deref(), Some("https"));
        assert_eq!(parsed.resource.as_deref(), Some("github.com"));
        assert_eq!(parsed.pathname.as_deref(), Some("/org/repo.git"));
        assert_eq!(parsed.name.as_deref(), Some("repo"));
        assert_eq!(parsed.user, None);
        assert_eq!(parsed.port, None);
        assert_eq!(parsed.rev, None);
    }

    #[test]
    fn parse_git_plus_ssh_with_port_and_rev() {
        let parsed = ParsedUrl::parse("git+ssh://git@github.com:22/org/repo.git@v1.0").unwrap();
        assert_eq!(parsed.protocol.as_deref(), Some("ssh"));
        assert_eq!(parsed.user.as_deref(), Some("git"));
        assert_eq!(parsed.resource.as_deref(), Some("github.com"));
        assert_eq!(parsed.port.as_deref(), Some("22"));
        assert_eq!(parsed.pathname.as_deref(), Some("/org/repo.git"));
        assert_eq!(parsed.name.as_deref(), Some("repo"));
        assert_eq!(parsed.rev.as_deref(), Some("v1.0"));
    }

    #[test]
    fn parse_colon_path_is_not_a_port() {
        let parsed = ParsedUrl::parse("git+ssh://git@github.com:org/repo.git").unwrap();
        assert_eq!(parsed.port, None);
        assert_eq!(parsed.pathname.as_deref(), Some(":org/repo.git"));
    }

    #[test]
    fn parse_file_url_has_no_resource() {
        let parsed = ParsedUrl::parse("file:///srv/repos/repo.git").unwrap();
        assert_eq!(parsed.protocol.as_deref(), Some("file"));
        assert_eq!(parsed.resource, None);
        assert_eq!(parsed.pathname.as_deref(), Some("/srv/repos/repo.git"));
        assert_eq!(parsed.name.as_deref(), Some("repo"));
    }

    #[test]
    fn parse_trailing_separator_leaves_name_empty() {
        let parsed = ParsedUrl::parse("https://github.com/org/repo/").unwrap();
        assert_eq!(parsed.pathname.as_deref(), Some("/org/repo/"));
        assert_eq!(parsed.name, None);
    }

    #[test]
    fn parse_scp_like() {
        let (kind, parsed) = classify("git@github.com:org/repo.git").unwrap();
        assert_eq!(kind, GrammarKind::ScpLike);
        assert_eq!(parsed.protocol, None);
        assert_eq!(parsed.user.as_deref(), Some("git"));
        assert_eq!(parsed.resource.as_deref(), Some("github.com"));
        assert_eq!(parsed.pathname.as_deref(), Some(":org/repo.git"));
        assert_eq!(parsed.name.as_deref(), Some("repo"));
    }

    #[test]
    fn parse_scp_like_with_hash_rev() {
        let parsed = ParsedUrl::parse("git@github.com:org/repo.git#feature/x").unwrap();
        assert_eq!(parsed.pathname.as_deref(), Some(":org/repo.git"));
        assert_eq!(parsed.rev.as_deref(), Some("feature/x"));
    }

    #[test]
    fn parse_bare_shorthand() {
        let (kind, parsed) = classify("git@github.com:repo.git").unwrap();
        assert_eq!(kind, GrammarKind::Shorthand);
        assert_eq!(parsed.user.as_deref(), Some("git"));
        assert_eq!(parsed.resource.as_deref(), Some("github.com"));
        assert_eq!(parsed.pathname.as_deref(), Some("repo.git"));
    }

    #[test]
    fn parse_uncommon_scheme() {
        let (kind, parsed) = classify("hg://hg.example.com/org/repo").unwrap();
        assert_eq!(kind, GrammarKind::AnyProtocol);
        assert_eq!(parsed.protocol.as_deref(), Some("hg"));
        assert_eq!(parsed.resource.as_deref(), Some("hg.example.com"));
        assert_eq!(parsed.pathname.as_deref(), Some("/org/repo"));
    }

    #[test]
    fn explicit_protocol_wins_over_shorthand() {
        // Also accepted by the scp-like and shorthand grammars with "ssh" as host.
        let (kind, parsed) = classify("ssh://host.example.com/org/repo").unwrap();
        assert_eq!(kind, GrammarKind::Protocol);
        assert_eq!(parsed.protocol.as_deref(), Some("ssh"));
        assert_eq!(parsed.resource.as_deref(), Some("host.example.com"));
        assert_eq!(parsed.pathname.as_deref(), Some("/org/repo"));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = ParsedUrl::parse("not a url at all").unwrap_err();
        assert_eq!(err.url(), "not a url at all");
        assert_eq!(err.to_string(), "Invalid git url \"not a url at all\"");
    }

    #[test]
    fn serializes_absent_fields_as_null() {
        let parsed = ParsedUrl::parse("git@github.com:org/repo.git").unwrap();
        let value = serde_json::to_value(&parsed).unwrap();

        assert_eq!(value["protocol"], serde_json::Value::Null);
        assert_eq!(value["user"], "git");
        assert_eq!(serde_json::to_value(GrammarKind::ScpLike).unwrap(), "scp-like");
    }

    #[test]
    fn parse_requires_full_match() {
        assert!(ParsedUrl::parse("https://github.com/org/repo.git trailing").is_err());
        assert!(ParsedUrl::parse("").is_err());
    }
}

mod format_tests {
    use super::*;

    #[test]
    fn format_strips_colon_separator() {
        let parsed = ParsedUrl::parse("git+ssh://git@github.com:/org/repo.git").unwrap();
        assert_eq!(parsed.format(), "ssh://git@github.com/org/repo.git");
    }

    #[test]
    fn format_keeps_port() {
        let parsed = ParsedUrl::parse("ssh://foo:22/some/path").unwrap();
        assert_eq!(parsed.format(), "ssh://foo:22/some/path");
        assert_eq!(parsed.to_string(), parsed.format());
    }

    #[test]
    fn format_without_protocol() {
        let parsed = ParsedUrl::parse("git@github.com:org/repo").unwrap();
        assert_eq!(parsed.format(), "git@github.com/org/repo");
    }

    #[test]
    fn format_never_doubles_separators() {
        let inputs = [
            "https://github.com/org/repo.git",
            "git+ssh://git@github.com:/org/repo.git",
            "git+https://user@hostname:project/blah.git",
            "file:///srv/repos/repo.git",
            "git@github.com:/abs/path.git",
            "git@github.com:org/repo",
            "github.com:repo.git",
        ];
        for input in inputs {
            let rendered = ParsedUrl::parse(input).unwrap().format();
            let tail = rendered
                .split_once("://")
                .map(|(_, rest)| rest)
                .unwrap_or(&rendered);
            assert!(!tail.contains("//"), "{input} rendered as {rendered}");
        }
    }
}

mod normalize_tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn normalize_extracts_hash_revision() {
        let url = normalize("https://example.com/org/repo.git#deadbeef").unwrap();
        assert_eq!(url, GitUrl::new("https://example.com/org/repo.git", Some("deadbeef".into())));
    }

    #[test]
    fn normalize_reduces_ssh_colon_form() {
        let url = normalize("git+ssh://git@github.com:org/repo.git").unwrap();
        assert_eq!(url.url, "git@github.com:org/repo.git");
        assert_eq!(url.revision, None);
    }

    #[test]
    fn normalize_strips_at_revision_from_rewritten_url() {
        let url = normalize("git+ssh://git@github.com:org/repo.git@v2").unwrap();
        assert_eq!(url.url, "git@github.com:org/repo.git");
        assert_eq!(url.revision.as_deref(), Some("v2"));
    }

    #[test]
    fn normalize_propagates_parse_error() {
        let err = normalize("not a url at all").unwrap_err();
        assert_eq!(err, ParseError::new("not a url at all"));
    }

    #[test]
    fn from_str_normalizes() {
        let url: GitUrl = "git+https://github.com/org/repo@main".parse().unwrap();
        assert_eq!(url.url, "https://github.com/org/repo");
        assert_eq!(url.revision.as_deref(), Some("main"));
    }

    #[test]
    fn display_appends_revision() {
        let url = GitUrl::new("git@github.com:org/repo.git", Some("v1".into()));
        assert_eq!(url.to_string(), "git@github.com:org/repo.git#v1");
        let url = GitUrl::new("https://github.com/org/repo", None);
        assert_eq!(url.to_string(), "https://github.com/org/repo");
    }

    #[test]
    fn cache_dir_shared_by_equivalent_spellings() {
        let state_dir = Path::new("/tmp/giturl");
        let a = normalize("git+https://github.com/org/repo#v1").unwrap();
        let b = normalize("https://github.com/org/repo").unwrap();
        let c = normalize("https://github.com/other/repo").unwrap();

        assert_eq!(a.cache_dir(state_dir), b.cache_dir(state_dir));
        assert_ne!(a.cache_dir(state_dir), c.cache_dir(state_dir));
        assert!(a.cache_dir(state_dir).to_string_lossy().ends_with(".git"));
    }
}
