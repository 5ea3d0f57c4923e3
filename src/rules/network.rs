use super::predicates::is_empty;
use crate::{AllowedValues, Catalog, CatalogError, DependsOn, Flag, UnitType, Validator, ValuesMust};

pub(crate) fn get(catalog: &Catalog) -> Result<Validator, CatalogError> {
    let field = |key: &str| catalog.require("Network", key);
    let subnet = field("Subnet")?;

    let mut v = Validator::new("network", UnitType::Network, catalog);
    v.attach("Driver", rules![AllowedValues(vec!["bridge", "macvlan", "ipvlan"])])?
        .attach("IPAMDriver", rules![AllowedValues(vec!["host-local", "dhcp", "none"])])?
        .attach("Gateway", rules![DependsOn(subnet.clone())])?
        .attach("IPRange", rules![DependsOn(subnet)])?
        .attach("DNS", rules![ValuesMust::new(is_empty, Flag(field("DisableDNS")?), "key DNS cannot be used with DisableDNS=true")])?;
    Ok(v)
}
