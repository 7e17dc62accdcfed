//! Test fixtures for the ifacemock pipeline
//!
//! Provides small, representative loader output without checking in full
//! package dumps

pub mod builder;
pub mod scenarios;

use std::fs;
use std::path::PathBuf;

use ifacemock_core::Package;

pub use builder::PackageBuilder;

/// Test fixture categories
#[derive(Debug, Clone, Copy)]
pub enum FixtureType {
    /// Three sources writing to one sink file with colliding imports
    Sink,
    Generic,
    Diamond,
    /// A package whose type-check failed
    Broken,
    MyInterface,
}

impl FixtureType {
    pub fn packages(self) -> Vec<Package> {
        match self {
            FixtureType::Sink => vec![scenarios::sink_package()],
            FixtureType::Generic => vec![scenarios::generic_package()],
            FixtureType::Diamond => vec![scenarios::diamond_package()],
            FixtureType::Broken => vec![scenarios::broken_package()],
            FixtureType::MyInterface => vec![scenarios::my_interface_package()],
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            FixtureType::Sink => "sink",
            FixtureType::Generic => "generic",
            FixtureType::Diamond => "diamond",
            FixtureType::Broken => "broken",
            FixtureType::MyInterface => "my_interface",
        }
    }
}

/// Main test fixtures provider
pub struct TestFixtures {
    temp_dir: Option<tempfile::TempDir>,
}

impl Default for TestFixtures {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixtures {
    pub fn new() -> Self {
        Self { temp_dir: None }
    }

    fn dir(&mut self) -> PathBuf {
        self.temp_dir
            .get_or_insert_with(|| tempfile::tempdir().unwrap())
            .path()
            .to_path_buf()
    }

    /// Write the fixture's packages as JSON into the temp dir, returning the
    /// file path
    pub fn setup(&mut self, fixture_type: FixtureType) -> PathBuf {
        let path = self.dir().join(format!("{}.json", fixture_type.file_stem()));
        let json = serde_json::to_string_pretty(&fixture_type.packages()).unwrap();
        fs::write(&path, json).unwrap();
        path
    }

    /// Same as [`TestFixtures::setup`], as YAML
    pub fn setup_yaml(&mut self, fixture_type: FixtureType) -> PathBuf {
        let path = self.dir().join(format!("{}.yaml", fixture_type.file_stem()));
        let yaml = serde_yaml::to_string(&fixture_type.packages()).unwrap();
        fs::write(&path, yaml).unwrap();
        path
    }

    /// Write an arbitrary file (configuration, malformed input) into the
    /// temp dir
    pub fn write(&mut self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}
