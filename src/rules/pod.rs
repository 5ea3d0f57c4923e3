use super::predicates::valid_publish_ports;
use crate::{Always, CanReference, Catalog, CatalogError, DependsOn, UnitType, Validator, ValuesMust};

pub(crate) fn get(catalog: &Catalog) -> Result<Validator, CatalogError> {
    let mut v = Validator::new("pod", UnitType::Pod, catalog);
    v.attach("Network", rules![CanReference(vec![UnitType::Network])])?
        .attach("NetworkAlias", rules![DependsOn(catalog.require("Pod", "Network")?)])?
        .attach("Volume", rules![CanReference(vec![UnitType::Volume])])?
        .attach("PublishPort", rules![ValuesMust::new(valid_publish_ports, Always, "invalid port format in PublishPort")])?;
    Ok(v)
}
