//! Startup provisioning of all managed resources
//!
//! Each resource is decided and extracted on its own. A failure is logged and
//! recorded in the [`ProvisionReport`], and the next resource is still attempted:
//! stale or missing auxiliary data degrades the consumer, it does not stop it.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::bundle::{AssetBundle, Prefixed};
use crate::config::ProvisionConfig;
use crate::decision::{Decision, should_extract};
use crate::error::{ProvisionError, Result};
use crate::extractor::{Decompressor, Extractor, Gzip};
use crate::resource::{self, ResourceDescriptor};
use crate::version::{OnDiskState, VersionMarker, VersionStore};

/// Result of provisioning one resource
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// Extracted and stamped with this version
    Extracted(VersionMarker),
    /// Nothing to do
    UpToDate,
    /// Provisioning failed; retried on the next run
    Failed(ProvisionError),
}

impl ExtractionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractionOutcome::Failed(_))
    }
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionOutcome::Extracted(version) => write!(f, "extracted (version {version})"),
            ExtractionOutcome::UpToDate => f.write_str("up to date"),
            ExtractionOutcome::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Per-resource outcomes of one provisioning run
#[derive(Debug, Default)]
pub struct ProvisionReport {
    pub entries: Vec<(&'static str, ExtractionOutcome)>,
}

impl ProvisionReport {
    pub fn outcome(&self, name: &str) -> Option<&ExtractionOutcome> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn extracted(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ExtractionOutcome::Extracted(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_failure())
            .count()
    }
}

/// What `status` shows for one resource
#[derive(Debug)]
pub struct ResourceStatus {
    pub descriptor: ResourceDescriptor,
    pub dir: PathBuf,
    pub on_disk: OnDiskState,
    pub bundled: Result<VersionMarker>,
    pub pending: Result<bool>,
}

/// Orchestrates decision and extraction for the fixed resource set
pub struct AssetProvisioner {
    config: ProvisionConfig,
    bundle: Box<dyn AssetBundle>,
    decompressor: Box<dyn Decompressor>,
}

impl AssetProvisioner {
    /// Create a provisioner reading entries under `config.bundle_prefix`
    pub fn new<B: AssetBundle + 'static>(config: ProvisionConfig, bundle: B) -> Self {
        let bundle = Prefixed::new(bundle, config.bundle_prefix.clone());
        Self {
            config,
            bundle: Box::new(bundle),
            decompressor: Box::new(Gzip),
        }
    }

    #[must_use]
    pub fn with_decompressor<D: Decompressor + 'static>(mut self, decompressor: D) -> Self {
        self.decompressor = Box::new(decompressor);
        self
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Provision every managed resource without forcing
    pub fn provision_all(&self, use_official_channel: bool) -> ProvisionReport {
        self.provision_all_with(use_official_channel, false)
    }

    /// Provision every managed resource
    pub fn provision_all_with(&self, use_official_channel: bool, force: bool) -> ProvisionReport {
        let mut report = ProvisionReport::default();

        for descriptor in &resource::ALL {
            let outcome = match self.provision(descriptor, use_official_channel, force) {
                Ok(Some(version)) => ExtractionOutcome::Extracted(version),
                Ok(None) => ExtractionOutcome::UpToDate,
                Err(e) => {
                    log::warn!("Extract {} failed: {}", descriptor.name, e);
                    ExtractionOutcome::Failed(e)
                }
            };
            report.entries.push((descriptor.name, outcome));
        }

        log::info!(
            "Provisioned assets: {} extracted, {} failed",
            report.extracted(),
            report.failed()
        );
        report
    }

    /// Provision a single resource by name
    pub fn provision_resource(
        &self,
        name: &str,
        force: bool,
        use_official_channel: bool,
    ) -> Result<ExtractionOutcome> {
        let descriptor = ResourceDescriptor::find(name)?;
        Ok(self
            .provision(&descriptor, use_official_channel, force)?
            .map_or(ExtractionOutcome::UpToDate, ExtractionOutcome::Extracted))
    }

    /// Current state of every resource, without extracting anything
    pub fn status(&self, use_official_channel: bool) -> Vec<ResourceStatus> {
        resource::ALL
            .iter()
            .map(|descriptor| {
                let dir = descriptor.target_dir(&self.config).to_path_buf();
                let on_disk = VersionStore::new(&dir).inspect(descriptor);
                let bundled = self.bundle_marker(descriptor);
                let pending = should_extract(
                    descriptor,
                    &on_disk,
                    use_official_channel,
                    false,
                    || match &bundled {
                        Ok(marker) => Ok(marker.clone()),
                        Err(_) => self.bundle_marker(descriptor),
                    },
                )
                .map(|decision| decision.should_extract());

                ResourceStatus {
                    descriptor: *descriptor,
                    dir,
                    on_disk,
                    bundled,
                    pending,
                }
            })
            .collect()
    }

    fn provision(
        &self,
        descriptor: &ResourceDescriptor,
        use_official_channel: bool,
        force: bool,
    ) -> Result<Option<VersionMarker>> {
        let dir = descriptor.target_dir(&self.config);
        let store = VersionStore::new(dir);
        let on_disk = store.inspect(descriptor);

        let decision = should_extract(descriptor, &on_disk, use_official_channel, force, || {
            self.bundle_marker(descriptor)
        })?;

        let Decision::Extract {
            bundle_marker,
            discard_marker,
        } = decision
        else {
            return Ok(None);
        };

        if discard_marker {
            store.discard(descriptor);
        }

        let marker = match bundle_marker {
            Some(marker) => marker,
            None => self.bundle_marker(descriptor)?,
        };

        self.extractor().extract(descriptor, dir, &marker)?;
        Ok(Some(marker))
    }

    fn extractor(&self) -> Extractor<'_> {
        Extractor::new(self.bundle.as_ref(), self.decompressor.as_ref())
    }

    fn bundle_marker(&self, descriptor: &ResourceDescriptor) -> Result<VersionMarker> {
        self.bundle
            .read_to_string(descriptor.version_marker_name)
            .map(VersionMarker::new)
    }

    /// Directory a resource is extracted into
    pub fn target_dir(&self, descriptor: &ResourceDescriptor) -> &Path {
        descriptor.target_dir(&self.config)
    }
}
