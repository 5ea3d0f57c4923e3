use super::predicates::is_set;
use crate::{CanReference, Catalog, CatalogError, DependsOn, FieldEquals, ImageNotAmbiguous, UnitType, Validator, ValuesMust};

pub(crate) fn get(catalog: &Catalog) -> Result<Validator, CatalogError> {
    let field = |key: &str| catalog.require("Volume", key);

    let mut v = Validator::new("volume", UnitType::Volume, catalog);
    v.attach(
        "Image",
        rules![
            ImageNotAmbiguous,
            CanReference(vec![UnitType::Image, UnitType::Build]),
            ValuesMust::new(is_set, FieldEquals(field("Driver")?, vec!["image"]), "key Image is required when Driver=image"),
        ],
    )?
    .attach("Type", rules![DependsOn(field("Device")?)])?;
    Ok(v)
}
