//! Extraction policy
//!
//! Decides whether a resource must be (re)extracted from the bundle. The policy is
//! pure: everything on disk is captured up front in an [`OnDiskState`], and the
//! bundle's marker is fetched through a loader that is only called when the
//! comparison actually needs it.

use crate::error::Result;
use crate::resource::ResourceDescriptor;
use crate::version::{MarkerState, OnDiskState, VersionMarker};

/// Outcome of the extraction policy for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Leave the resource alone
    Skip,
    /// Extract the resource
    Extract {
        /// Bundle marker, if the policy already had to load it
        bundle_marker: Option<VersionMarker>,
        /// The on-disk marker could not be read and should be removed
        discard_marker: bool,
    },
}

impl Decision {
    pub fn should_extract(&self) -> bool {
        matches!(self, Decision::Extract { .. })
    }

    fn extract(bundle_marker: Option<VersionMarker>) -> Self {
        Decision::Extract {
            bundle_marker,
            discard_marker: false,
        }
    }

    fn extract_if(condition: bool, bundle_marker: Option<VersionMarker>) -> Self {
        if condition {
            Self::extract(bundle_marker)
        } else {
            Decision::Skip
        }
    }
}

/// Decide whether `descriptor` must be extracted
///
/// Precedence:
/// 1. No marker on disk: extract when the resource file is missing too, or when forced.
///    A file without a marker may have been supplied by the user and is kept.
/// 2. Official channel, or a non-replaceable resource: extract when the marker is
///    unreadable, when the bundle marker supersedes it, or when forced. A bundle
///    marker that cannot be loaded fails this resource.
/// 3. Replaceable resource on the custom channel: extract only when forced.
pub fn should_extract<F>(
    descriptor: &ResourceDescriptor,
    state: &OnDiskState,
    use_official_channel: bool,
    force: bool,
    load_bundle_marker: F,
) -> Result<Decision>
where
    F: FnOnce() -> Result<VersionMarker>,
{
    let follows_official = use_official_channel || !descriptor.replaceable;

    let installed = match &state.marker {
        MarkerState::Absent => {
            return Ok(Decision::extract_if(
                !state.resource_present || force,
                None,
            ));
        }
        _ if !follows_official => {
            return Ok(Decision::extract_if(force, None));
        }
        MarkerState::Unreadable(reason) => {
            log::debug!(
                "Marker for {} is unreadable ({}), re-extracting",
                descriptor.name,
                reason
            );
            return Ok(Decision::Extract {
                bundle_marker: None,
                discard_marker: true,
            });
        }
        MarkerState::Present(installed) => installed,
    };

    let bundled = load_bundle_marker()?;
    let outdated = bundled.supersedes(installed);
    if outdated {
        log::debug!(
            "{} is outdated: bundle has {}, disk has {}",
            descriptor.name,
            bundled,
            installed
        );
    }

    Ok(Decision::extract_if(outdated || force, Some(bundled)))
}
