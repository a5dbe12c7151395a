// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides job template builders and temporary test environments

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

pub struct TestJobBuilder {
    name: String,
    job_type: String,
    fields: Vec<(String, String)>,
    tags: Vec<String>,
    tasks: Vec<TestTask>,
}

pub struct TestTask {
    pub command: String,
    pub name: String,
    pub options: Vec<(String, String)>,
}

impl TestJobBuilder {
    pub fn new(name: &str, job_type: &str) -> Self {
        Self {
            name: name.to_string(),
            job_type: job_type.to_string(),
            fields: Vec::new(),
            tags: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn add_task(mut self, command: &str, name: &str, options: &[(&str, &str)]) -> Self {
        self.tasks.push(TestTask {
            command: command.to_string(),
            name: name.to_string(),
            options: options
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        self
    }

    pub fn generate_yaml(&self) -> String {
        let mut yaml = format!(
            "job:\n  name: {}\n  type: {}\n",
            self.name, self.job_type
        );

        for (key, value) in &self.fields {
            yaml.push_str(&format!("  {}: {}\n", key, value));
        }

        if !self.tags.is_empty() {
            yaml.push_str("  tags:\n");
            for tag in &self.tags {
                yaml.push_str(&format!("  - {}\n", tag));
            }
        }

        yaml.push_str("  tasks:\n");
        for task in &self.tasks {
            yaml.push_str(&format!("  - {}:\n", task.command));
            yaml.push_str(&format!("    - name: {}\n", task.name));
            for (key, value) in &task.options {
                yaml.push_str(&format!("    - {}: {}\n", key, value));
            }
        }

        yaml
    }

    pub async fn write_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, self.generate_yaml()).await?;
        Ok(())
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn template_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.yml", name))
    }

    pub async fn create_template_file(&self, name: &str, builder: &TestJobBuilder) -> PathBuf {
        let template_file = self.template_file(name);
        builder
            .write_to_file(&template_file)
            .await
            .expect("Failed to write template file");
        template_file
    }

    pub async fn write_file(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.path().join(file_name);
        fs::write(&path, content)
            .await
            .expect("Failed to write file");
        path
    }
}

pub fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Push-translations template as stored by the application
pub const PUSH_TRANS_JSON: &str = r#"{"job":{"ci_pipeline":"%PIPELINE_UUID%","exception":"raise","execution":"sequential","name":"push translations","package":"%PACKAGE_NAME%","return_type":"json","tasks":[{"clone":[{"name":"git repo"},{"type":"%REPO_TYPE%"},{"branch":"%REPO_BRANCH%"},{"recursive":false}]},{"filter":[{"name":"files"},{"ext":"PO"}]},{"upload":[{"name":"Push files"},{"target_langs":"%TARGET_LANGS%"},{"prehook":"skip"},{"posthook":"skip"},{"update":false}]}],"type":"pushtrans"}}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let yaml = TestJobBuilder::new("upstream stats", "syncupstream")
            .with_field("package", "%PACKAGE_NAME%")
            .with_tag("%BUILD_TAG%")
            .add_task("clone", "git repo", &[("branch", "main")])
            .generate_yaml();

        assert!(yaml.contains("name: upstream stats"));
        assert!(yaml.contains("package: %PACKAGE_NAME%"));
        assert!(yaml.contains("  - %BUILD_TAG%"));
        assert!(yaml.contains("  - clone:"));
        assert!(yaml.contains("    - branch: main"));
    }

    #[test]
    fn test_environment_setup() {
        let env = TestEnvironment::new();
        assert!(env.path().exists());
        assert!(env
            .template_file("job")
            .to_string_lossy()
            .ends_with("job.yml"));
    }
}
