//! Built-in rule tables, one validator per unit type.
//!
//! Each table module exposes `get(catalog)`, which binds its rules to the
//! fields of an injected [`Catalog`]. A table naming a field the catalog
//! lacks fails with [`CatalogError::UnknownField`].

mod build;
mod container;
mod image;
mod kube;
mod network;
mod pod;
mod predicates;
#[cfg(test)]
mod tests;
mod volume;

use crate::{Catalog, CatalogError, LookupMode, ValidBoolean, ValidInteger, Validator};

type Table = fn(&Catalog) -> Result<Validator, CatalogError>;

const TABLES: [Table; 7] = [container::get, volume::get, kube::get, network::get, image::get, build::get, pod::get];

/// Every built-in validator, with boolean and integer fields type-checked.
pub(crate) fn builtin(catalog: &Catalog) -> Result<Vec<Validator>, CatalogError> {
    TABLES.iter().map(|get| get(catalog).and_then(with_value_checks)).collect()
}

fn with_value_checks(mut v: Validator) -> Result<Validator, CatalogError> {
    let typed: Vec<(String, LookupMode)> = v
        .fields()
        .iter()
        .filter(|f| matches!(f.field.mode, LookupMode::Boolean | LookupMode::Int))
        .map(|f| (f.field.key.clone(), f.field.mode))
        .collect();
    for (key, mode) in typed {
        match mode {
            LookupMode::Boolean => v.attach(&key, rules![ValidBoolean])?,
            _ => v.attach(&key, rules![ValidInteger])?,
        };
    }
    Ok(v)
}
