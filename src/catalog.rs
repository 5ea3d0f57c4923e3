//! Field catalog.
//!
//! The catalog maps `(group, key)` to a [`Field`]: the lookup mode used to
//! read the key and whether the key may repeat. It is produced outside this
//! crate (by mining the upstream Quadlet sources) and consumed read-only.
//!
//! Two ways to obtain one:
//!
//! - [`Catalog::builtin`]: the table compiled into this crate, built lazily
//!   once per process.
//! - [`Catalog::from_json`]: the generator's JSON shape,
//!   `{ "Container": { "Image": { "lookupMode": "Last", "multiple": false } } }`.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

static BUILTIN: Lazy<Catalog> = Lazy::new(builtin_table);

/// How a field's value(s) are read from a unit file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum LookupMode {
    /// Last occurrence, untouched.
    LastRaw,
    /// Last occurrence with continuation markers spliced out.
    Last,
    /// `Last`, trailing whitespace trimmed, one layer of double quotes removed.
    Base,
    /// `Base` coerced to a boolean.
    Boolean,
    /// `Base` parsed like C `strtol` with base 0.
    Int,
    /// Every occurrence; an empty occurrence clears the ones before it.
    AllRaw,
    /// `AllRaw` with continuation markers spliced out.
    All,
    /// `All`, each value split into words without unescaping.
    AllStrv,
    /// `All`, each value split exec-style.
    AllArgs,
    /// `Last`, split exec-style.
    LastArgs,
    /// `AllArgs`, each word cut into `KEY=VALUE`.
    AllKeyVal,
}

/// Catalog entry for one `(group, key)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub group: String,
    pub key: String,
    pub mode: LookupMode,
    /// The key may repeat with cumulative meaning.
    pub multiple: bool,
}

impl Field {
    pub fn new(group: impl Into<String>, key: impl Into<String>, mode: LookupMode, multiple: bool) -> Self {
        Self { group: group.into(), key: key.into(), mode, multiple }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.key)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no field {group}.{key}")]
    UnknownField { group: String, key: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    lookup_mode: LookupMode,
    #[serde(default)]
    multiple: bool,
}

/// Immutable `(group, key) → Field` table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fields: Vec<Field>,
    groups: Vec<String>,
    index: HashMap<String, HashMap<String, usize>>,
}

impl Catalog {
    /// The catalog compiled into this crate.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a catalog from fields. A later duplicate `(group, key)` replaces
    /// an earlier one.
    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut catalog = Catalog::default();
        for field in fields {
            if !catalog.index.contains_key(&field.group) {
                catalog.groups.push(field.group.clone());
            }
            let keys = catalog.index.entry(field.group.clone()).or_default();
            match keys.get(&field.key) {
                Some(&idx) => catalog.fields[idx] = field,
                None => {
                    keys.insert(field.key.clone(), catalog.fields.len());
                    catalog.fields.push(field);
                }
            }
        }
        catalog
    }

    /// Load the generator's JSON shape.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, BTreeMap<String, Entry>> = serde_json::from_str(json)?;
        let fields = raw.into_iter().flat_map(|(group, keys)| {
            keys.into_iter().map(move |(key, e)| Field::new(group.clone(), key, e.lookup_mode, e.multiple))
        });
        Ok(Self::from_fields(fields))
    }

    pub fn field(&self, group: &str, key: &str) -> Option<&Field> {
        self.index.get(group).and_then(|keys| keys.get(key)).map(|&i| &self.fields[i])
    }

    /// Like [`field`](Self::field) but an error when absent.
    pub fn require(&self, group: &str, key: &str) -> Result<Field, CatalogError> {
        self.field(group, key)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownField { group: group.to_string(), key: key.to_string() })
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.index.contains_key(group)
    }

    /// Group names in first-declared order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Fields of `group` in declaration order.
    pub fn group_fields<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.group == group)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn builtin_table() -> Catalog {
    catalog! {
        "Container" => [
            ("AddCapability", AllStrv, many),
            ("AddDevice", All, many),
            ("AddHost", All, many),
            ("Annotation", AllKeyVal, many),
            ("AutoUpdate", Last),
            ("CgroupsMode", Last),
            ("ContainerName", Last),
            ("ContainersConfModule", All, many),
            ("DNS", All, many),
            ("DNSOption", All, many),
            ("DNSSearch", All, many),
            ("DropCapability", AllStrv, many),
            ("Entrypoint", Last),
            ("Environment", AllKeyVal, many),
            ("EnvironmentFile", All, many),
            ("EnvironmentHost", Boolean),
            ("Exec", LastArgs),
            ("ExposeHostPort", All, many),
            ("GIDMap", All, many),
            ("GlobalArgs", AllArgs, many),
            ("Group", Last),
            ("GroupAdd", All, many),
            ("HealthCmd", Last),
            ("HealthInterval", Last),
            ("HealthOnFailure", Last),
            ("HealthRetries", Int),
            ("HealthStartPeriod", Last),
            ("HealthStartupCmd", Last),
            ("HealthStartupInterval", Last),
            ("HealthStartupRetries", Int),
            ("HealthStartupSuccess", Int),
            ("HealthStartupTimeout", Last),
            ("HealthTimeout", Last),
            ("HostName", Last),
            ("IP", Last),
            ("IP6", Last),
            ("Image", Last),
            ("Label", AllKeyVal, many),
            ("LogDriver", Last),
            ("LogOpt", AllStrv, many),
            ("Mask", Last),
            ("Mount", All, many),
            ("Network", All, many),
            ("NetworkAlias", All, many),
            ("NoNewPrivileges", Boolean),
            ("Notify", Last),
            ("PidsLimit", Int),
            ("Pod", Last),
            ("PodmanArgs", AllArgs, many),
            ("PublishPort", All, many),
            ("Pull", Last),
            ("ReadOnly", Boolean),
            ("ReadOnlyTmpfs", Boolean),
            ("RemapGid", All, many),
            ("RemapUid", All, many),
            ("RemapUidSize", Int),
            ("RemapUsers", Last),
            ("Rootfs", Last),
            ("RunInit", Boolean),
            ("SeccompProfile", Last),
            ("Secret", AllArgs, many),
            ("SecurityLabelDisable", Boolean),
            ("SecurityLabelFileType", Last),
            ("SecurityLabelLevel", Last),
            ("SecurityLabelNested", Boolean),
            ("SecurityLabelType", Last),
            ("ShmSize", Last),
            ("StartWithPod", Boolean),
            ("StopSignal", Last),
            ("StopTimeout", Int),
            ("SubGIDMap", Last),
            ("SubUIDMap", Last),
            ("Sysctl", AllStrv, many),
            ("Timezone", Last),
            ("Tmpfs", All, many),
            ("UIDMap", All, many),
            ("Ulimit", All, many),
            ("Unmask", Last),
            ("User", Last),
            ("UserNS", Last),
            ("Volume", All, many),
            ("WorkingDir", Last),
        ],
        "Volume" => [
            ("ContainersConfModule", All, many),
            ("Copy", Boolean),
            ("Device", Last),
            ("Driver", Last),
            ("GlobalArgs", AllArgs, many),
            ("Group", Last),
            ("Image", Last),
            ("Label", AllKeyVal, many),
            ("Options", Last),
            ("PodmanArgs", AllArgs, many),
            ("Type", Last),
            ("User", Last),
            ("VolumeName", Last),
        ],
        "Kube" => [
            ("AutoUpdate", All, many),
            ("ConfigMap", All, many),
            ("ContainersConfModule", All, many),
            ("ExitCodePropagation", Last),
            ("GlobalArgs", AllArgs, many),
            ("KubeDownForce", Boolean),
            ("LogDriver", Last),
            ("Network", All, many),
            ("PodmanArgs", AllArgs, many),
            ("PublishPort", All, many),
            ("SetWorkingDirectory", Last),
            ("UserNS", Last),
            ("Yaml", Last),
        ],
        "Network" => [
            ("ContainersConfModule", All, many),
            ("DisableDNS", Boolean),
            ("DNS", All, many),
            ("Driver", Last),
            ("Gateway", All, many),
            ("GlobalArgs", AllArgs, many),
            ("IPAMDriver", Last),
            ("IPRange", All, many),
            ("IPv6", Boolean),
            ("Internal", Boolean),
            ("Label", AllKeyVal, many),
            ("NetworkName", Last),
            ("Options", Last),
            ("PodmanArgs", AllArgs, many),
            ("Subnet", All, many),
        ],
        "Image" => [
            ("AllTags", Boolean),
            ("Arch", Last),
            ("AuthFile", Last),
            ("CertDir", Last),
            ("ContainersConfModule", All, many),
            ("Creds", Last),
            ("DecryptionKey", Last),
            ("GlobalArgs", AllArgs, many),
            ("Image", Last),
            ("ImageTag", Last),
            ("OS", Last),
            ("PodmanArgs", AllArgs, many),
            ("TLSVerify", Boolean),
            ("Variant", Last),
        ],
        "Build" => [
            ("Annotation", AllKeyVal, many),
            ("Arch", Last),
            ("AuthFile", Last),
            ("ContainersConfModule", All, many),
            ("DNS", All, many),
            ("DNSOption", All, many),
            ("DNSSearch", All, many),
            ("Environment", AllKeyVal, many),
            ("File", Last),
            ("ForceRM", Boolean),
            ("GlobalArgs", AllArgs, many),
            ("GroupAdd", All, many),
            ("ImageTag", All, many),
            ("Label", AllKeyVal, many),
            ("Network", All, many),
            ("PodmanArgs", AllArgs, many),
            ("Pull", Last),
            ("Secret", AllArgs, many),
            ("SetWorkingDirectory", Last),
            ("Target", Last),
            ("TLSVerify", Boolean),
            ("Variant", Last),
            ("Volume", All, many),
        ],
        "Pod" => [
            ("AddHost", All, many),
            ("ContainersConfModule", All, many),
            ("DNS", All, many),
            ("DNSOption", All, many),
            ("DNSSearch", All, many),
            ("GIDMap", All, many),
            ("GlobalArgs", AllArgs, many),
            ("IP", Last),
            ("IP6", Last),
            ("Network", All, many),
            ("NetworkAlias", All, many),
            ("PodName", Last),
            ("PodmanArgs", AllArgs, many),
            ("PublishPort", All, many),
            ("ServiceName", Last),
            ("ShmSize", Last),
            ("SubGIDMap", Last),
            ("SubUIDMap", Last),
            ("UIDMap", All, many),
            ("UserNS", Last),
            ("Volume", All, many),
        ],
    }
}
