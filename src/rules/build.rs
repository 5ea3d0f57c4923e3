use crate::{AllowedValues, CanReference, Catalog, CatalogError, Required, RequiredIfNotPresent, UnitType, Validator};

pub(crate) fn get(catalog: &Catalog) -> Result<Validator, CatalogError> {
    let field = |key: &str| catalog.require("Build", key);

    let mut v = Validator::new("build", UnitType::Build, catalog);
    v.attach("ImageTag", rules![Required])?
        .attach("File", rules![RequiredIfNotPresent(field("SetWorkingDirectory")?)])?
        .attach("Pull", rules![AllowedValues(vec!["always", "missing", "never", "newer"])])?
        .attach("Network", rules![CanReference(vec![UnitType::Network])])?
        .attach("Volume", rules![CanReference(vec![UnitType::Volume])])?;
    Ok(v)
}
