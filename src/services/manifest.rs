//! Builder for the pack identity document (`manifest.json`).

use uuid::Uuid;

use crate::models::{Manifest, ManifestHeader, ManifestModule};

/// Manifest format understood by the Bedrock skin pack importer
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// Version stamped on both the header and the module
pub const PACK_VERSION: [u32; 3] = [1, 0, 0];

const MODULE_TYPE_SKIN_PACK: &str = "skin_pack";

/// Builds a manifest for a pack with the given display name.
///
/// Every call mints a fresh header UUID and module UUID, so regenerating the
/// same textures produces a pack the client treats as new rather than as an
/// update to an installed one.
pub fn build_manifest(pack_name: &str) -> Manifest {
    Manifest {
        format_version: MANIFEST_FORMAT_VERSION,
        header: ManifestHeader {
            name: pack_name.to_string(),
            description: String::new(),
            version: PACK_VERSION,
            uuid: Uuid::new_v4().to_string(),
        },
        modules: vec![ManifestModule {
            module_type: MODULE_TYPE_SKIN_PACK.to_string(),
            uuid: Uuid::new_v4().to_string(),
            version: PACK_VERSION,
        }],
    }
}
