use super::predicates::{is_empty, is_not_true, valid_expose_ports, valid_publish_ports};
use crate::{
    AllowedValues, Always, CanReference, Catalog, CatalogError, ConflictsWith, DependsOn, Deprecated, FieldEquals, Flag,
    HasSuffix, ImageNotAmbiguous, Not, Present, RequiredIfNotPresent, UnitType, Validator, ValuesMust,
};

pub(crate) fn get(catalog: &Catalog) -> Result<Validator, CatalogError> {
    let field = |key: &str| catalog.require("Container", key);
    let rootfs = field("Rootfs")?;
    let pod = field("Pod")?;
    let network = field("Network")?;
    let health_cmd = field("HealthCmd")?;
    let health_startup_cmd = field("HealthStartupCmd")?;

    let mut v = Validator::new("container", UnitType::Container, catalog);
    v.attach(
        "Image",
        rules![
            RequiredIfNotPresent(rootfs.clone()),
            ConflictsWith(vec![rootfs]),
            ImageNotAmbiguous,
            CanReference(vec![UnitType::Image, UnitType::Build]),
        ],
    )?
    .attach("Pull", rules![AllowedValues(vec!["always", "missing", "never", "newer"])])?
    .attach("AutoUpdate", rules![AllowedValues(vec!["registry", "local"])])?
    .attach("HealthOnFailure", rules![AllowedValues(vec!["none", "kill", "restart", "stop"])])?
    .attach("Network", rules![CanReference(vec![UnitType::Network])])?
    .attach(
        "NetworkAlias",
        rules![
            DependsOn(network.clone()),
            ValuesMust::new(
                is_empty,
                FieldEquals(network, vec!["host", "none"]),
                "NetworkAlias has no effect with Network=host or Network=none",
            ),
        ],
    )?
    .attach("Pod", rules![HasSuffix(UnitType::Pod.extension()), CanReference(vec![UnitType::Pod])])?
    .attach("StartWithPod", rules![DependsOn(pod.clone())])?
    .attach("Volume", rules![CanReference(vec![UnitType::Volume])])?
    .attach(
        "PublishPort",
        rules![
            ValuesMust::new(valid_publish_ports, Always, "invalid port format in PublishPort"),
            ValuesMust::new(is_empty, Present(pod), "PublishPort must not be set for containers that run in a pod"),
        ],
    )?
    .attach(
        "ExposeHostPort",
        rules![ValuesMust::new(valid_expose_ports, Always, "invalid port format in ExposeHostPort")],
    )?
    .attach(
        "ReadOnlyTmpfs",
        rules![ValuesMust::new(
            is_not_true,
            Not(Box::new(Flag(field("ReadOnly")?))),
            "ReadOnlyTmpfs=true requires ReadOnly=true",
        )],
    )?
    .attach("HealthStartupCmd", rules![DependsOn(health_cmd)])?
    .attach("HealthStartupInterval", rules![DependsOn(health_startup_cmd.clone())])?
    .attach("HealthStartupRetries", rules![DependsOn(health_startup_cmd.clone())])?
    .attach("HealthStartupSuccess", rules![DependsOn(health_startup_cmd.clone())])?
    .attach("HealthStartupTimeout", rules![DependsOn(health_startup_cmd)])?
    .attach("RemapUsers", rules![Deprecated])?
    .attach("RemapUid", rules![Deprecated])?
    .attach("RemapGid", rules![Deprecated])?
    .attach("RemapUidSize", rules![Deprecated])?
    .attach("UserNS", rules![ConflictsWith(vec![field("RemapUsers")?])])?;
    Ok(v)
}
