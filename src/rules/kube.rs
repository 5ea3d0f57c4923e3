use crate::{AllowedValues, CanReference, Catalog, CatalogError, Required, UnitType, Validator};

pub(crate) fn get(catalog: &Catalog) -> Result<Validator, CatalogError> {
    let mut v = Validator::new("kube", UnitType::Kube, catalog);
    v.attach("Yaml", rules![Required])?
        .attach("ExitCodePropagation", rules![AllowedValues(vec!["all", "any", "none"])])?
        .attach("SetWorkingDirectory", rules![AllowedValues(vec!["yaml", "unit"])])?
        .attach("Network", rules![CanReference(vec![UnitType::Network])])?;
    Ok(v)
}
