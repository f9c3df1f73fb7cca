use std::fs;
use std::path::Path;

use tempfile::{TempDir, tempdir};
use umbra_fs::LineEnding;
use umbra_mirror::{Error, MirrorBuilder, TraversalPolicy};
use umbra_package::Descriptor;
use umbra_platform::{Arch, OS, PlatformTag, RuntimeVersion};

fn tag() -> PlatformTag { PlatformTag::new(OS::Linux, Arch::X86_64, RuntimeVersion::new(8, 1)) }

fn policy() -> TraversalPolicy { TraversalPolicy::new().line_ending(LineEnding::Preserve) }

fn put(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

struct Fixture {
    _dir:   TempDir,
    source: std::path::PathBuf,
    shadow: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let source = dir.path().join("project");
    let shadow = dir.path().join("shadow");
    fs::create_dir_all(&source).unwrap();
    put(&source, "index.js", "require('alpha');\n");
    Fixture {
        _dir: dir,
        source,
        shadow,
    }
}

#[test]
fn test_public_package_is_mirrored() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"name":"alpha","version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "module.exports = 'alpha';\n");

    let (tag, policy) = (tag(), policy());
    MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert_eq!(
        fs::read_to_string(fx.shadow.join("node_modules/alpha/index.js")).unwrap(),
        "module.exports = 'alpha';\n"
    );
    let cached = Descriptor::load(fx.shadow.join("node_modules/alpha/package.json")).unwrap();
    assert_eq!(cached.version.as_deref(), Some("1.0.0"));
}

#[test]
fn test_project_sources_stay_out() {
    let fx = fixture();
    let (tag, policy) = (tag(), policy());
    MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert!(!fx.shadow.join("index.js").exists());
}

#[test]
fn test_descriptorless_dir_inherits_visibility() {
    let fx = fixture();
    put(&fx.source, "package.json", r#"{"name":"project","version":"0.0.1","private":true}"#);
    put(&fx.source, "node_modules/loose/util.js", "inherits private");
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "public");

    let (tag, policy) = (tag(), policy());
    MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert!(!fx.shadow.join("package.json").exists());
    assert!(!fx.shadow.join("node_modules/loose/util.js").exists());
    assert!(fx.shadow.join("node_modules/alpha/index.js").is_file());
}

#[test]
fn test_private_package_depends_on_depth() {
    let fx = fixture();
    let private = r#"{"name":"alpha","version":"1.0.0","private":true}"#;
    put(&fx.source, "node_modules/alpha/package.json", private);
    put(&fx.source, "node_modules/alpha/index.js", "shallow");

    put(&fx.source, "node_modules/a/package.json", r#"{"name":"a","version":"1.0.0"}"#);
    put(&fx.source, "node_modules/a/node_modules/b/package.json", r#"{"name":"b","version":"1.0.0"}"#);
    let deep = "node_modules/a/node_modules/b/node_modules/alpha";
    put(&fx.source, &format!("{deep}/package.json"), private);
    put(&fx.source, &format!("{deep}/index.js"), "deep");

    let (tag, policy) = (tag(), policy());
    MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert!(!fx.shadow.join("node_modules/alpha/index.js").exists());
    assert!(!fx.shadow.join("node_modules/alpha/package.json").exists());
    assert_eq!(fs::read_to_string(fx.shadow.join(deep).join("index.js")).unwrap(), "deep");
    assert!(fx.shadow.join(deep).join("package.json").is_file());
}

#[test]
fn test_native_artifact_goes_to_binary_zone() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"name":"alpha","version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/native.node", [0x7f, b'E', b'L', b'F', b'\r', b'\n']);

    let (tag, policy) = (tag(), policy().line_ending(LineEnding::Lf));
    let report = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    let cached = fx.shadow.join("linux-x64-rt-8.1/node_modules/alpha/native.node");
    assert_eq!(fs::read(&cached).unwrap(), vec![0x7f, b'E', b'L', b'F', b'\r', b'\n']);
    assert!(!fx.shadow.join("node_modules/alpha/native.node").exists());
    assert_eq!(report.binary_written, 1);
}

#[test]
fn test_private_package_native_artifact_is_mirrored() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"name":"alpha","version":"1.0.0","private":true}"#);
    put(&fx.source, "node_modules/alpha/index.js", "shallow");
    put(&fx.source, "node_modules/alpha/native.node", [0x7f, b'E', b'L', b'F']);

    let (tag, policy) = (tag(), policy());
    let report = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert!(fx.shadow.join("linux-x64-rt-8.1/node_modules/alpha/native.node").is_file());
    assert!(!fx.shadow.join("node_modules/alpha/index.js").exists());
    assert_eq!(report.binary_written, 1);
}

#[test]
fn test_qualified_artifact_stays_portable() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/bin/linux-x64-rt-8.1/binding.node", "bin");

    let (tag, policy) = (tag(), policy());
    MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert!(fx
        .shadow
        .join("node_modules/alpha/bin/linux-x64-rt-8.1/binding.node")
        .is_file());
}

#[test]
fn test_second_pass_writes_nothing() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "a");
    put(&fx.source, "node_modules/alpha/native.node", "n");
    put(&fx.source, "node_modules/loose/util.js", "no descriptor");

    let (tag, policy) = (tag(), policy());
    let builder = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy);

    let first = builder.run().unwrap();
    assert_eq!(first.writes(), 4);
    let descriptor = fx.shadow.join("node_modules/alpha/package.json");
    let stamp = fs::metadata(&descriptor).unwrap().modified().unwrap();

    let second = builder.run().unwrap();
    assert_eq!(second.writes(), 0);
    assert_eq!(second.unchanged, first.writes());
    assert_eq!(fs::metadata(&descriptor).unwrap().modified().unwrap(), stamp);
}

#[test]
fn test_version_bump_refreshes_package() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "old");

    let (tag, policy) = (tag(), policy());
    let builder = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy);
    builder.run().unwrap();

    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.1.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "new");
    let report = builder.run().unwrap();

    assert_eq!(report.portable_written, 1);
    assert_eq!(report.descriptors_written, 1);
    assert_eq!(fs::read_to_string(fx.shadow.join("node_modules/alpha/index.js")).unwrap(), "new");
    let cached = Descriptor::load(fx.shadow.join("node_modules/alpha/package.json")).unwrap();
    assert_eq!(cached.version.as_deref(), Some("1.1.0"));
}

#[test]
fn test_versioned_package_trusts_version() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "old");

    let (tag, policy) = (tag(), policy());
    let builder = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy);
    builder.run().unwrap();

    put(&fx.source, "node_modules/alpha/index.js", "patched in place");
    let report = builder.run().unwrap();

    assert_eq!(report.writes(), 0);
    assert_eq!(fs::read_to_string(fx.shadow.join("node_modules/alpha/index.js")).unwrap(), "old");
}

#[test]
fn test_unversioned_files_compare_content() {
    let fx = fixture();
    put(&fx.source, "node_modules/loose/util.js", "one");

    let (tag, policy) = (tag(), policy());
    let builder = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy);
    builder.run().unwrap();

    put(&fx.source, "node_modules/loose/util.js", "two");
    let report = builder.run().unwrap();

    assert_eq!(report.portable_written, 1);
    assert_eq!(fs::read_to_string(fx.shadow.join("node_modules/loose/util.js")).unwrap(), "two");
}

#[test]
fn test_unparsable_cached_descriptor_counts_as_changed() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "a");

    let (tag, policy) = (tag(), policy());
    let builder = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy);
    builder.run().unwrap();

    put(&fx.shadow, "node_modules/alpha/package.json", "{ truncated");
    let report = builder.run().unwrap();

    assert_eq!(report.descriptors_written, 1);
    assert!(Descriptor::load(fx.shadow.join("node_modules/alpha/package.json")).is_some());
}

#[test]
fn test_excluded_directories_are_not_walked() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/.git/config.yml", "vcs");
    put(&fx.source, "node_modules/node-gyp/lib/build.js", "tooling");
    put(&fx.source, "node_modules/alpha/logo.png", "png");

    let (tag, policy) = (tag(), policy().exclude(["^node-gyp$"]).unwrap());
    let report = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert!(!fx.shadow.join("node_modules/alpha/.git").exists());
    assert!(!fx.shadow.join("node_modules/node-gyp").exists());
    assert!(!fx.shadow.join("node_modules/alpha/logo.png").exists());
    assert!(report.skipped >= 1);
}

#[test]
fn test_shadow_inside_source_is_not_walked() {
    let fx = fixture();
    let shadow = fx.source.join("node_modules/.cache/umbra");
    put(&fx.source, "node_modules/alpha/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/alpha/index.js", "a");

    let (tag, policy) = (tag(), policy());
    let builder = MirrorBuilder::new(&fx.source, &shadow, &tag, &policy);
    builder.run().unwrap();
    let second = builder.run().unwrap();

    assert_eq!(second.writes(), 0);
    assert!(shadow.join("node_modules/alpha/index.js").is_file());
    assert!(!shadow.join("node_modules/.cache").exists());
}

#[test]
fn test_line_endings_normalized_for_text() {
    let fx = fixture();
    put(&fx.source, "node_modules/alpha/index.js", "a\r\nb\r\n");

    let (tag, policy) = (tag(), policy().line_ending(LineEnding::Lf));
    MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert_eq!(fs::read(fx.shadow.join("node_modules/alpha/index.js")).unwrap(), b"a\nb\n");
}

#[test]
fn test_missing_source_is_fatal() {
    let dir = tempdir().unwrap();
    let (tag, policy) = (tag(), policy());
    let err = MirrorBuilder::new(dir.path().join("nope"), dir.path().join("shadow"), &tag, &policy)
        .run()
        .unwrap_err();
    assert!(matches!(err, Error::NoSource(_)));
}

#[test]
fn test_shadow_above_source_is_refused() {
    let fx = fixture();
    let shadow = fx.source.parent().unwrap();

    let (tag, policy) = (tag(), policy());
    let err = MirrorBuilder::new(&fx.source, shadow, &tag, &policy).run().unwrap_err();
    assert!(matches!(err, Error::ShadowContainsSource { .. }));
    assert!(fx.source.join("index.js").is_file());
}

#[test]
fn test_unreadable_descriptor_aborts_pass() {
    let fx = fixture();
    let broken = fx.source.join("node_modules/alpha/package.json");
    fs::create_dir_all(&broken).unwrap();
    put(&fx.source, "node_modules/alpha/index.js", "alpha");

    let (tag, policy) = (tag(), policy());
    let err = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap_err();
    assert!(matches!(err, Error::Package(_)));
    assert!(err.to_string().contains(&broken.display().to_string()));
}

#[test]
fn test_longest_path_is_reported() {
    let fx = fixture();
    put(&fx.source, "node_modules/a/package.json", r#"{"version":"1.0.0"}"#);
    put(&fx.source, "node_modules/a/node_modules/bbbbbbbb/deeply/nested/file.js", "x");

    let (tag, policy) = (tag(), policy());
    let report = MirrorBuilder::new(&fx.source, &fx.shadow, &tag, &policy).run().unwrap();

    assert_eq!(
        report.longest_path,
        Some(fx.shadow.join("node_modules/a/node_modules/bbbbbbbb/deeply/nested/file.js"))
    );
}
