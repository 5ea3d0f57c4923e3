use crate::{Catalog, CatalogError, ErrorCategory, Field, Linter, Location, LookupMode, Options, Severity, Source};

fn findings_with(sources: &[(&str, &str)], options: &Options, target: &str) -> Vec<(ErrorCategory, Location)> {
    let sources: Vec<Source> = sources.iter().map(|(p, t)| Source::new(*p, *t)).collect();
    let report = Linter::builtin().lint(&sources, options);
    let file = report.file(target).unwrap();
    assert!(file.parse_errors.is_empty(), "{target}: {:?}", file.parse_errors);
    file.findings.iter().map(|f| (f.category, f.location)).collect()
}

fn findings(path: &str, text: &str) -> Vec<(ErrorCategory, Location)> {
    findings_with(&[(path, text)], &Options::default(), path)
}

fn categories(path: &str, text: &str) -> Vec<ErrorCategory> {
    findings(path, text).into_iter().map(|(c, _)| c).collect()
}

use ErrorCategory::*;

#[test]
fn builtin_tables_bind_to_builtin_catalog() {
    let linter = Linter::new(Catalog::builtin()).unwrap();
    let names: Vec<&str> = linter.validators().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["container", "volume", "kube", "network", "image", "build", "pod"]);
}

#[test]
fn tables_fail_on_catalog_without_their_fields() {
    let catalog = Catalog::from_fields([Field::new("Container", "Image", LookupMode::Last, false)]);
    assert!(matches!(Linter::new(&catalog), Err(CatalogError::UnknownField { .. })));
}

#[test]
fn container_scenarios() {
    let cases: Vec<(&str, Vec<ErrorCategory>)> = vec![
        ("[Container]\nImage=quay.io/x/y\n", vec![]),
        ("[Container]\nImage=fedora\n", vec![AmbiguousImageName]),
        ("[Container]\nRootfs=x\nImage=quay.io/y\n", vec![KeyConflict]),
        ("[Container]\nRootfs=/srv/root\n", vec![]),
        ("[Container]\nExec=/bin/sh\n", vec![RequiredKey]),
        ("[Container]\nImage=quay.io/a\nFoo=bar\n", vec![UnknownKey]),
        ("[Container]\nImage=quay.io/a\nPull=sometimes\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nPull=newer\nAutoUpdate=registry\n", vec![]),
        ("[Container]\nImage=quay.io/a\nHealthOnFailure=explode\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nPod=web\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nStartWithPod=true\n", vec![UnsatisfiedDependency]),
        ("[Container]\nImage=quay.io/a\nPod=web.pod\nStartWithPod=true\n", vec![]),
        ("[Container]\nImage=quay.io/a\nHealthStartupCmd=/ok\n", vec![UnsatisfiedDependency]),
        ("[Container]\nImage=quay.io/a\nHealthCmd=/ok\nHealthStartupCmd=/ok\nHealthStartupRetries=3\n", vec![]),
        ("[Container]\nImage=quay.io/a\nRemapUsers=auto\n", vec![DeprecatedKey]),
        ("[Container]\nImage=quay.io/a\nRemapUsers=auto\nUserNS=auto\n", vec![DeprecatedKey, KeyConflict]),
        ("[Container]\nImage=quay.io/a\nPublishPort=8080:80\nExposeHostPort=9000-9010\n", vec![]),
        ("[Container]\nImage=quay.io/a\nPublishPort=http\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nExposeHostPort=1:2\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nPod=web.pod\nPublishPort=80\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nReadOnlyTmpfs=true\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nReadOnly=yes\nReadOnlyTmpfs=true\n", vec![]),
        ("[Container]\nImage=quay.io/a\nNetworkAlias=web\n", vec![UnsatisfiedDependency]),
        ("[Container]\nImage=quay.io/a\nNetwork=host\nNetworkAlias=web\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nNetwork=app.network\nNetworkAlias=web\n", vec![]),
        ("[Container]\nImage=quay.io/a\nReadOnly=maybe\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nPidsLimit=many\n", vec![InvalidValue]),
        ("[Container]\nImage=quay.io/a\nPidsLimit=0x100\nStopTimeout=-1\n", vec![]),
        ("[Container]\nImage=quay.io/a\nPodmanArgs=--log-level \"debug\n", vec![]),
        ("[Container]\nImage=quay.io/a\nSysctl=net.ipv4.ip_forward=1 \"open\n", vec![InvalidValue]),
    ];
    for (text, expected) in cases {
        assert_eq!(categories("web.container", text), expected, "{text}");
    }
}

#[test]
fn scenario_locations() {
    assert_eq!(findings("web.container", "[Container]\nImage=fedora\n"), vec![(AmbiguousImageName, Location::new(2, 6))]);
    assert_eq!(
        findings("web.container", "[Container]\nImage=quay.io/a\n  Foo=bar\n"),
        vec![(UnknownKey, Location::new(3, 2))]
    );
    assert_eq!(findings("web.container", "[Container]\nExec=/bin/sh\n"), vec![(RequiredKey, Location::new(1, 0))]);
    assert_eq!(findings("web.container", "[Service]\nRestart=always\n"), vec![(RequiredKey, Location::new(0, 0))]);
}

#[test]
fn conflict_names_both_keys() {
    let sources = [Source::new("web.container", "[Container]\nRootfs=x\nImage=quay.io/y\n")];
    let report = Linter::builtin().lint(&sources, &Options::default());
    let finding = &report.file("web.container").unwrap().findings[0];
    assert!(finding.message.contains("Image") && finding.message.contains("Rootfs"), "{}", finding.message);
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.validator, "container");
}

#[test]
fn other_unit_types() {
    let cases: Vec<(&str, &str, Vec<ErrorCategory>)> = vec![
        ("data.volume", "[Volume]\nDriver=image\n", vec![InvalidValue]),
        ("data.volume", "[Volume]\nDriver=image\nImage=quay.io/x\n", vec![]),
        ("data.volume", "[Volume]\nImage=busybox\n", vec![AmbiguousImageName]),
        ("data.volume", "[Volume]\nType=tmpfs\n", vec![UnsatisfiedDependency]),
        ("data.volume", "[Volume]\nCopy=nah\n", vec![InvalidValue]),
        ("app.kube", "[Kube]\nYaml=app.yaml\n", vec![]),
        ("app.kube", "[Kube]\nPublishPort=80\n", vec![RequiredKey]),
        ("app.kube", "[Kube]\nYaml=app.yaml\nExitCodePropagation=some\n", vec![InvalidValue]),
        ("app.kube", "[Kube]\nYaml=app.yaml\nSetWorkingDirectory=unit\n", vec![]),
        ("app.network", "[Network]\nDriver=bridge\nSubnet=10.0.0.0/24\nGateway=10.0.0.1\n", vec![]),
        ("app.network", "[Network]\nDriver=overlay\n", vec![InvalidValue]),
        ("app.network", "[Network]\nIPAMDriver=dhcp\nIPRange=10.0.0.0/28\n", vec![UnsatisfiedDependency]),
        ("app.network", "[Network]\nDisableDNS=true\nDNS=1.1.1.1\n", vec![InvalidValue]),
        ("app.network", "[Network]\nDisableDNS=false\nDNS=1.1.1.1\n", vec![]),
        ("base.image", "[Image]\nImage=docker.io/library/alpine\n", vec![]),
        ("base.image", "[Image]\nImage=alpine\n", vec![AmbiguousImageName]),
        ("base.image", "[Image]\nArch=arm64\n", vec![RequiredKey]),
        ("app.build", "[Build]\nImageTag=localhost/app\nFile=Containerfile\n", vec![]),
        ("app.build", "[Build]\nImageTag=localhost/app\nSetWorkingDirectory=unit\n", vec![]),
        ("app.build", "[Build]\nFile=Containerfile\n", vec![RequiredKey]),
        ("app.build", "[Build]\nImageTag=localhost/app\n", vec![RequiredKey]),
        ("app.build", "[Build]\nImageTag=localhost/app\nFile=x\nPull=often\n", vec![InvalidValue]),
        ("web.pod", "[Pod]\nPodName=web\nPublishPort=8080:80\n", vec![]),
        ("web.pod", "[Pod]\nPublishPort=eighty\n", vec![InvalidValue]),
        ("web.pod", "[Pod]\nNetworkAlias=web\n", vec![UnsatisfiedDependency]),
    ];
    for (path, text, expected) in cases {
        assert_eq!(categories(path, text), expected, "{path}: {text}");
    }
}

#[test]
fn references_are_checked_only_when_enabled() {
    let web = ("web.container", "[Container]\nImage=app.build\nVolume=db.volume:/data\nNetwork=app.network:ip=10.0.0.2\n");
    assert!(findings_with(&[web], &Options::default(), "web.container").is_empty());

    let enabled = Options { check_references: true };
    let missing = findings_with(&[web], &enabled, "web.container");
    assert_eq!(
        missing,
        vec![
            (InvalidReference, Location::new(2, 6)),
            (InvalidReference, Location::new(3, 7)),
            (InvalidReference, Location::new(4, 8)),
        ]
    );

    let all = [
        web,
        ("app.build", "[Build]\nImageTag=localhost/app\nFile=Containerfile\n"),
        ("db.volume", "[Volume]\n"),
        ("app.network", "[Network]\n"),
    ];
    assert!(findings_with(&all, &enabled, "web.container").is_empty());
}

#[test]
fn references_check_every_listed_unit_type() {
    let enabled = Options { check_references: true };
    let image = findings_with(&[("web.container", "[Container]\nImage=base.image\n")], &enabled, "web.container");
    assert_eq!(image, vec![(InvalidReference, Location::new(2, 6))]);

    let build = findings_with(&[("web.container", "[Container]\nImage=app.build\n")], &enabled, "web.container");
    assert_eq!(build, vec![(InvalidReference, Location::new(2, 6))]);
}

#[test]
fn plain_values_are_not_references() {
    let enabled = Options { check_references: true };
    let text = "[Container]\nImage=quay.io/a\nVolume=/srv:/data\nNetwork=host\n";
    assert!(findings_with(&[("web.container", text)], &enabled, "web.container").is_empty());
}
