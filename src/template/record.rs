// ABOUTME: Stored job template records and their conversion into YAML job text
// ABOUTME: Binds positional job parameters to upper-cased placeholder names

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{Result, TemplateError};
use super::preprocessor::YmlPreProcessor;

/// A named job template as it is persisted: a JSON job document with
/// `%PARAM%` placeholders and the ordered list of parameters that fill them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTemplate {
    #[serde(rename = "type")]
    pub template_type: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<String>,
    pub json: serde_json::Value,
}

impl JobTemplate {
    /// Build a template from its stored JSON string
    pub fn from_json_str(
        template_type: &str,
        name: &str,
        params: Vec<String>,
        json_str: &str,
    ) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(json_str)?;
        if !json.is_object() {
            return Err(TemplateError::Invalid(format!(
                "template '{}' must be a JSON object",
                name
            )));
        }

        Ok(Self {
            template_type: template_type.to_string(),
            name: name.to_string(),
            description: None,
            params,
            json,
        })
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Decode a parameter list literal such as `{package_name,repo_type}`
    pub fn parse_params(literal: &str) -> Vec<String> {
        literal
            .trim()
            .trim_start_matches('{')
            .trim_end_matches('}')
            .split(',')
            .map(str::trim)
            .filter(|param| !param.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Render the JSON document as block YAML with single quotes removed, so
    /// quoted placeholders end up as bare whitespace-separated tokens.
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(&self.json)?;
        Ok(yaml.replace('\'', ""))
    }

    /// Pair declared parameters with positional values, keyed by upper-cased name
    pub fn bind(&self, values: &[String]) -> Result<HashMap<String, String>> {
        if values.len() != self.params.len() {
            return Err(TemplateError::ParamCountMismatch {
                template: self.name.clone(),
                expected: self.params.len(),
                actual: values.len(),
            });
        }

        Ok(self
            .params
            .iter()
            .zip(values)
            .map(|(param, value)| (param.to_uppercase(), value.clone()))
            .collect())
    }

    /// Prepare the template for substitution with the given positional values
    pub fn preprocessor(&self, values: &[String]) -> Result<YmlPreProcessor> {
        let bound = self.bind(values)?;
        Ok(YmlPreProcessor::new(self.to_yaml()?, bound))
    }
}

const SYNC_UPSTREAM_JSON: &str = r#"{"job":{"name":"upstream stats","type":"syncupstream","buildsys":"%BUILD_SYSTEM%","exception":"raise","execution":"sequential","package":"%PACKAGE_NAME%","return_type":"json","tags":["%BUILD_TAG%"],"tasks":[{"clone":"latest git branch"}]}}"#;

const SYNC_DOWNSTREAM_JSON: &str = r#"{"job":{"name":"downstream stats","type":"syncdownstream","buildsys":"%BUILD_SYSTEM%","exception":"raise","execution":"sequential","package":"%PACKAGE_NAME%","return_type":"json","tags":["%BUILD_TAG%"],"tasks":[{"get":"latest build info"}]}}"#;

const PUSH_TRANS_JSON: &str = r#"{"job":{"ci_pipeline":"%PIPELINE_UUID%","exception":"raise","execution":"sequential","name":"push translations","package":"%PACKAGE_NAME%","return_type":"json","tasks":[{"clone":[{"name":"git repo"},{"type":"%REPO_TYPE%"},{"branch":"%REPO_BRANCH%"},{"recursive":false}]},{"filter":[{"name":"files"},{"ext":"PO"}]},{"upload":[{"name":"Push files"},{"target_langs":"%TARGET_LANGS%"},{"prehook":"skip"},{"posthook":"skip"},{"update":false}]}],"type":"pushtrans"}}"#;

/// Templates that ship with the application
pub fn builtin_templates() -> Result<Vec<JobTemplate>> {
    Ok(vec![
        JobTemplate::from_json_str(
            "syncupstream",
            "Clone Upstream Repo",
            JobTemplate::parse_params("{package_name,build_system,build_tag}"),
            SYNC_UPSTREAM_JSON,
        )?
        .with_description("Clone Package Upstream GIT Repository"),
        JobTemplate::from_json_str(
            "syncdownstream",
            "Latest Build Info",
            JobTemplate::parse_params("{package_name,build_system,build_tag}"),
            SYNC_DOWNSTREAM_JSON,
        )?
        .with_description("Get latest build info from build system"),
        JobTemplate::from_json_str(
            "pushtrans",
            "Push Translations",
            JobTemplate::parse_params(
                "{package_name,repo_type,repo_branch,pipeline_uuid,target_langs}",
            ),
            PUSH_TRANS_JSON,
        )?
        .with_description(
            "Clone package source repository, filter translations and upload to the CI platform.",
        ),
    ])
}

/// Look up a built-in template by its type
pub fn builtin_template(template_type: &str) -> Result<Option<JobTemplate>> {
    Ok(builtin_templates()?
        .into_iter()
        .find(|template| template.template_type == template_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        assert_eq!(
            JobTemplate::parse_params("{package_name, repo_type,repo_branch}"),
            vec!["package_name", "repo_type", "repo_branch"]
        );
        assert!(JobTemplate::parse_params("{}").is_empty());
        assert_eq!(JobTemplate::parse_params("package_name"), vec!["package_name"]);
    }

    #[test]
    fn test_to_yaml_exposes_placeholders() {
        let template = builtin_template("syncdownstream").unwrap().unwrap();
        let yaml = template.to_yaml().unwrap();

        assert!(yaml.contains("package: %PACKAGE_NAME%"));
        assert!(yaml.contains("- %BUILD_TAG%"));
        assert!(!yaml.contains('\''));
    }

    #[test]
    fn test_bind_upper_cases_param_names() {
        let template = builtin_template("syncupstream").unwrap().unwrap();
        let bound = template
            .bind(&[
                "anaconda".to_string(),
                "koji".to_string(),
                "f39".to_string(),
            ])
            .unwrap();

        assert_eq!(bound.get("PACKAGE_NAME"), Some(&"anaconda".to_string()));
        assert_eq!(bound.get("BUILD_SYSTEM"), Some(&"koji".to_string()));
        assert_eq!(bound.get("BUILD_TAG"), Some(&"f39".to_string()));
    }

    #[test]
    fn test_bind_rejects_wrong_count() {
        let template = builtin_template("pushtrans").unwrap().unwrap();
        let result = template.bind(&["anaconda".to_string()]);

        match result {
            Err(TemplateError::ParamCountMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 5);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_json_str_rejects_bad_json() {
        let result = JobTemplate::from_json_str("x", "broken", Vec::new(), "{\"job\":");
        assert!(matches!(result, Err(TemplateError::Json(_))));

        let result = JobTemplate::from_json_str("x", "list", Vec::new(), "[1, 2]");
        assert!(matches!(result, Err(TemplateError::Invalid(_))));
    }

    #[test]
    fn test_builtin_templates() {
        let templates = builtin_templates().unwrap();
        let types: Vec<&str> = templates
            .iter()
            .map(|t| t.template_type.as_str())
            .collect();
        assert_eq!(types, vec!["syncupstream", "syncdownstream", "pushtrans"]);
        assert!(builtin_template("nosuchtype").unwrap().is_none());
    }
}
