//! Common test utilities for assetprov integration tests

use std::io::Write;
use std::path::PathBuf;

use assetprov::ProvisionConfig;
use assetprov::resource::{self, ResourceDescriptor};
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// A bundle directory plus internal and external extraction directories
#[allow(dead_code)]
pub struct TestEnv {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to the environment root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new empty environment
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        std::fs::create_dir_all(path.join("bundle")).expect("Failed to create bundle directory");
        Self { temp, path }
    }

    pub fn bundle_dir(&self) -> PathBuf {
        self.path.join("bundle")
    }

    pub fn internal_dir(&self) -> PathBuf {
        self.path.join("internal")
    }

    pub fn external_dir(&self) -> PathBuf {
        self.path.join("external")
    }

    /// Configuration pointing at this environment
    pub fn config(&self) -> ProvisionConfig {
        ProvisionConfig {
            bundle_dir: self.bundle_dir(),
            internal_dir: self.internal_dir(),
            external_dir: self.external_dir(),
            ..ProvisionConfig::default()
        }
    }

    /// Write the configuration as YAML and return its path
    pub fn write_config(&self, official_channel: bool) -> PathBuf {
        let config = ProvisionConfig {
            official_channel,
            ..self.config()
        };
        let path = self.path.join("assetprov.yaml");
        std::fs::write(&path, config.to_yaml().expect("Failed to serialize config"))
            .expect("Failed to write config");
        path
    }

    /// Put every managed resource into the bundle at `version`
    pub fn bundle_all(&self, version: &str) {
        for descriptor in &resource::ALL {
            self.bundle_resource(descriptor, version);
        }
    }

    /// Put one resource into the bundle; its content names the version
    pub fn bundle_resource(&self, descriptor: &ResourceDescriptor, version: &str) {
        let content = content_for(descriptor, version);
        std::fs::write(
            self.bundle_dir().join(format!("{}.gz", descriptor.name)),
            gzip(content.as_bytes()),
        )
        .expect("Failed to write bundle entry");
        std::fs::write(
            self.bundle_dir().join(descriptor.version_marker_name),
            version,
        )
        .expect("Failed to write bundle marker");
    }

    /// Put a raw (uncompressed) entry into the bundle
    pub fn bundle_raw(&self, name: &str, content: &str) {
        std::fs::write(self.bundle_dir().join(name), content)
            .expect("Failed to write bundle entry");
    }

    /// Directory a resource is extracted into
    pub fn target_dir(&self, descriptor: &ResourceDescriptor) -> PathBuf {
        descriptor.target_dir(&self.config()).to_path_buf()
    }

    /// Extracted file path for a resource
    pub fn extracted(&self, descriptor: &ResourceDescriptor) -> PathBuf {
        descriptor.resource_path(&self.target_dir(descriptor))
    }

    /// Installed marker for a resource, if any
    pub fn installed_marker(&self, descriptor: &ResourceDescriptor) -> Option<String> {
        std::fs::read_to_string(descriptor.marker_path(&self.target_dir(descriptor))).ok()
    }

    /// Overwrite the installed marker for a resource
    pub fn set_installed_marker(&self, descriptor: &ResourceDescriptor, version: &str) {
        let dir = self.target_dir(descriptor);
        std::fs::create_dir_all(&dir).expect("Failed to create target directory");
        std::fs::write(descriptor.marker_path(&dir), version).expect("Failed to write marker");
    }

    /// Installed content for a resource, if any
    pub fn installed_content(&self, descriptor: &ResourceDescriptor) -> Option<String> {
        std::fs::read_to_string(self.extracted(descriptor)).ok()
    }

    /// Write a file relative to the environment root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Command running the assetprov binary against this environment
    #[allow(deprecated)]
    pub fn cmd(&self, official_channel: bool) -> assert_cmd::Command {
        let config = self.write_config(official_channel);
        let mut cmd = assert_cmd::Command::cargo_bin("assetprov").expect("binary exists");
        cmd.current_dir(&self.path)
            .env_remove("ASSETPROV_CONFIG")
            .env_remove("ASSETPROV_INTERNAL_DIR")
            .env_remove("ASSETPROV_EXTERNAL_DIR")
            .env_remove("ASSETPROV_BUNDLE_DIR")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(config);
        cmd
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Content stored for a resource at a version
#[allow(dead_code)]
pub fn content_for(descriptor: &ResourceDescriptor, version: &str) -> String {
    format!("{}@{}", descriptor.name, version)
}

#[allow(dead_code)]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("Failed to compress");
    encoder.finish().expect("Failed to compress")
}
