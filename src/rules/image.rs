use crate::{Catalog, CatalogError, ImageNotAmbiguous, Required, UnitType, Validator};

pub(crate) fn get(catalog: &Catalog) -> Result<Validator, CatalogError> {
    let mut v = Validator::new("image", UnitType::Image, catalog);
    v.attach("Image", rules![Required, ImageNotAmbiguous])?;
    Ok(v)
}
