//! End-to-end resolution scenarios through the public API.
//!
//! Mirrors an analysis run: entry points resolve through a chain, every
//! discovered in-document reference resolves against its containing
//! document, and the resulting canonical URLs key the visited set.

use docspace::resolver::{
    IndirectUrlResolver, IndirectionTable, PackageUrlResolver, Platform, ResolveError,
    ResolverChain, UrlResolver,
};
use docspace::{FileRelativeUrl, PackageRelativeUrl, ResolvedUrl};
use rustc_hash::FxHashSet;

fn fixture_resolver() -> IndirectUrlResolver {
    IndirectUrlResolver::new(
        "/root",
        "/root/sub/package",
        IndirectionTable::from_pairs([
            ("/components/foo/foo.html", "sub/package/foo/foo.html"),
            ("/components/foo/foo.css", "sub/package/foo/foo.css"),
            ("/components/bar/bar.html", "different/x/y/bar.html"),
            ("/components/bar/bar.css", "different/x/y/bar.css"),
        ]),
    )
}

#[test]
fn indirect_analysis_walk() {
    // foo.html pulls in ../bar/bar.html and foo.css; bar.html pulls in
    // ./bar.css. Walking those references visits four distinct documents.
    let resolver = fixture_resolver();

    let foo = resolver
        .resolve(&PackageRelativeUrl::new("foo/foo.html"))
        .unwrap();
    assert_eq!(foo, "sub/package/foo/foo.html");

    let bar = resolver
        .resolve_file_url(&FileRelativeUrl::new("../bar/bar.html"), &foo)
        .unwrap();
    assert_eq!(bar, "different/x/y/bar.html");

    let foo_css = resolver
        .resolve_file_url(&FileRelativeUrl::new("foo.css"), &foo)
        .unwrap();
    assert_eq!(foo_css, "sub/package/foo/foo.css");

    let bar_css = resolver
        .resolve_file_url(&FileRelativeUrl::new("./bar.css"), &bar)
        .unwrap();
    assert_eq!(bar_css, "different/x/y/bar.css");

    let visited: FxHashSet<ResolvedUrl> =
        [foo, bar, foo_css, bar_css].into_iter().collect();
    assert_eq!(visited.len(), 4);
}

#[test]
fn indirect_missing_mapping_aborts() {
    let resolver = fixture_resolver();
    let foo = resolver
        .resolve(&PackageRelativeUrl::new("foo/foo.html"))
        .unwrap();

    let err = resolver
        .resolve_file_url(&FileRelativeUrl::new("../baz/baz.html"), &foo)
        .unwrap_err();
    assert!(err.is_config_defect());
    assert!(matches!(err, ResolveError::UnmappedUrl { .. }));
}

#[test]
fn indirect_resolve_never_escapes_source_root() {
    let resolver = fixture_resolver();
    for reference in [
        "foo/foo.html",
        "/foo/foo.html",
        "../outside.html",
        "../../../../outside.html",
        "/../outside.html",
    ] {
        let resolved = resolver
            .resolve(&PackageRelativeUrl::new(reference))
            .unwrap();
        assert!(!resolved.as_str().starts_with('/'), "escaped: {resolved}");
        assert!(!resolved.as_str().starts_with("../"), "escaped: {resolved}");
    }
}

#[test]
fn package_sibling_remap_round_trip() {
    let resolver = PackageUrlResolver::new("/root/pkg").with_platform(Platform::Posix);

    let target = resolver
        .resolve(&PackageRelativeUrl::new("../sibling/x.html"))
        .unwrap();
    assert_eq!(target, "file:///root/pkg/components/sibling/x.html");

    let text = resolver.relative(&resolver.package_url(), &target).unwrap();
    assert_eq!(text, "../sibling/x.html");

    let back = resolver
        .resolve(&PackageRelativeUrl::new(text.as_str()))
        .unwrap();
    assert_eq!(back, target);
}

#[test]
fn resolution_is_deterministic() {
    let resolver = fixture_resolver();
    let reference = PackageRelativeUrl::new("foo/foo.html");
    let first = resolver.resolve(&reference).unwrap();
    for _ in 0..3 {
        assert_eq!(resolver.resolve(&reference).unwrap(), first);
    }
}

#[test]
fn chain_routes_between_strategies() {
    let chain = ResolverChain::new([
        fixture_resolver().into(),
        PackageUrlResolver::new("/root/pkg")
            .with_platform(Platform::Posix)
            .into(),
    ]);

    // Scheme-less references go to the indirection table
    let foo = chain
        .resolve(&PackageRelativeUrl::new("foo/foo.html"))
        .unwrap();
    assert_eq!(foo, "sub/package/foo/foo.html");

    // file: URLs fall through to the convention resolver
    let local = chain
        .resolve(&PackageRelativeUrl::new("file:///root/pkg/a.html"))
        .unwrap();
    assert_eq!(local, "file:///root/pkg/a.html");

    // Network schemes are nobody's to resolve
    assert!(!chain.can_resolve("https://example.com/a.html"));
    assert!(
        chain
            .resolve(&PackageRelativeUrl::new("https://example.com/a.html"))
            .is_none()
    );
}

#[test]
fn chain_relative_routes_on_target() {
    let chain = ResolverChain::new([
        fixture_resolver().into(),
        PackageUrlResolver::new("/root/pkg")
            .with_platform(Platform::Posix)
            .into(),
    ]);

    let foo = chain
        .resolve(&PackageRelativeUrl::new("foo/foo.html"))
        .unwrap();
    let bar = chain
        .resolve_file_url(&FileRelativeUrl::new("../bar/bar.html"), &foo)
        .unwrap();

    let text = chain.relative(&foo, &bar).unwrap();
    assert_eq!(text, "../bar/bar.html");
    assert_eq!(chain.resolve_file_url(&text, &foo).unwrap(), bar);
}
