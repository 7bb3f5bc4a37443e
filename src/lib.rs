//! assetprov - versioned extraction of bundled auxiliary assets
//!
//! On every startup the [`AssetProvisioner`] decides, per resource, whether the copy
//! in the writable extraction directories is missing or older than the one shipped
//! in the read-only asset bundle, and re-extracts it when needed. The
//! [`VirtualFileResolver`] then serves those files to the consuming engine through
//! the [`FileSystemAccess`] trait.
//!
//! Resources come from one of two channels:
//! - **official**: numeric versions, upgraded automatically
//! - **custom**: user-supplied builds, never overwritten unless forced

pub mod bundle;
pub mod config;
pub mod decision;
pub mod error;
pub mod extractor;
pub mod provisioner;
pub mod resolver;
pub mod resource;
pub mod version;

pub use bundle::{AssetBundle, DirBundle, MemoryBundle};
pub use config::ProvisionConfig;
pub use error::{ProvisionError, Result};
pub use provisioner::{AssetProvisioner, ExtractionOutcome, ProvisionReport};
pub use resolver::{FileSystemAccess, VirtualFileResolver};
pub use resource::ResourceDescriptor;
pub use version::VersionMarker;
