// ABOUTME: Typed lookup of a named service's REST metadata
// ABOUTME: Resolves resource path, method, media types and builds request URLs

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::error::{Result, ServiceError};
use super::resources::{
    Endpoint, HttpMethod, MediaType, ResourceGroup, Service, MIDDLE_URL,
};

/// Resolved configuration for one service. No network I/O happens here;
/// callers issue the request with what this describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    service: Service,
    group: ResourceGroup,
    mount_point: &'static str,
    endpoint: &'static Endpoint,
}

/// Serializable summary of a service configuration
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    pub service: String,
    pub resource_group: String,
    pub mount_point: String,
    pub resource: String,
    pub http_method: HttpMethod,
    pub path_params: Vec<String>,
    pub query_params: Vec<String>,
    pub request_media_type: Option<MediaType>,
    pub response_media_type: Option<MediaType>,
    pub mount_points: Vec<String>,
}

impl ServiceConfig {
    /// Resolve a service by its symbolic name
    pub fn new(name: &str) -> Result<Self> {
        let service: Service = name.parse()?;
        Self::for_service(service)
    }

    pub fn for_service(service: Service) -> Result<Self> {
        let (group, mount_point, method) = service.binding();
        let endpoint = group
            .mount_point(mount_point)
            .and_then(|m| m.endpoint(method))
            .ok_or_else(|| ServiceError::MissingEndpoint {
                service: service.to_string(),
                mount_point: mount_point.to_string(),
                method: method.to_string(),
            })?;

        debug!(
            "Resolved service '{}' to {} {}",
            service, method, mount_point
        );

        Ok(Self {
            service,
            group,
            mount_point,
            endpoint,
        })
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn resource_group(&self) -> ResourceGroup {
        self.group
    }

    pub fn mount_point(&self) -> &'static str {
        self.mount_point
    }

    /// Every mount point registered for this service's resource group
    pub fn mount_points(&self) -> Vec<&'static str> {
        self.group.mount_points().iter().map(|m| m.path).collect()
    }

    /// Full resource path, API prefix included
    pub fn resource(&self) -> String {
        format!("{}{}", MIDDLE_URL, self.mount_point)
    }

    pub fn http_method(&self) -> HttpMethod {
        self.endpoint.method
    }

    pub fn path_params(&self) -> &'static [&'static str] {
        self.endpoint.path_params
    }

    pub fn query_params(&self) -> &'static [&'static str] {
        self.endpoint.query_params
    }

    pub fn request_media_type(&self) -> Option<MediaType> {
        self.endpoint.request_media_type
    }

    pub fn response_media_type(&self) -> Option<MediaType> {
        self.endpoint.response_media_type
    }

    /// Build the request URL: base without a trailing slash, the resource path
    /// with every `{param}` filled in, then the optional extension.
    pub fn url(
        &self,
        base_url: &str,
        path_args: &HashMap<String, String>,
        ext: Option<&str>,
    ) -> Result<String> {
        let mut resource = self.resource();
        for param in self.path_params() {
            let value = path_args
                .get(*param)
                .ok_or_else(|| ServiceError::MissingPathParam {
                    service: self.service.to_string(),
                    param: param.to_string(),
                })?;
            resource = resource.replace(&format!("{{{}}}", param), value);
        }

        let base = base_url.strip_suffix('/').unwrap_or(base_url);
        Ok(format!("{}{}{}", base, resource, ext.unwrap_or_default()))
    }

    pub fn describe(&self) -> ServiceDescriptor {
        ServiceDescriptor {
            service: self.service.to_string(),
            resource_group: self.group.to_string(),
            mount_point: self.mount_point.to_string(),
            resource: self.resource(),
            http_method: self.http_method(),
            path_params: self.path_params().iter().map(|p| p.to_string()).collect(),
            query_params: self.query_params().iter().map(|p| p.to_string()).collect(),
            request_media_type: self.request_media_type(),
            response_media_type: self.response_media_type(),
            mount_points: self.mount_points().iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Configurations for every known service, in declaration order
pub fn all_services() -> Result<Vec<ServiceConfig>> {
    Service::ALL
        .iter()
        .map(|service| ServiceConfig::for_service(*service))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_list_projects() {
        let config = ServiceConfig::new("list_projects").unwrap();

        assert_eq!(config.http_method(), HttpMethod::Get);
        assert_eq!(config.resource(), "/seam/resource/restv1/projects");
        assert_eq!(config.resource_group(), ResourceGroup::Projects);
        assert_eq!(config.mount_points(), vec!["/projects"]);
        assert!(config.path_params().is_empty());
        assert_eq!(config.response_media_type(), Some(MediaType::Projects));
        assert_eq!(config.request_media_type(), None);
    }

    #[test]
    fn test_invalid_service() {
        let result = ServiceConfig::new("delete_everything");
        assert_eq!(
            result,
            Err(ServiceError::InvalidService("delete_everything".to_string()))
        );
    }

    #[test]
    fn test_mount_points_of_shared_group() {
        let config = ServiceConfig::new("retrieve_template").unwrap();

        assert_eq!(config.resource_group(), ResourceGroup::SourceDoc);
        assert_eq!(
            config.mount_points(),
            vec![
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r",
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r/{id}",
            ]
        );
        assert_eq!(config.path_params(), &["projectSlug", "iterationSlug", "id"]);
    }

    #[test]
    fn test_project_config_uses_xml() {
        let config = ServiceConfig::new("project_config").unwrap();
        assert_eq!(config.request_media_type(), Some(MediaType::Xml));
        assert_eq!(config.response_media_type(), Some(MediaType::Xml));
    }

    #[test]
    fn test_url_building() {
        let config = ServiceConfig::new("proj_trans_stats").unwrap();
        let url = config
            .url(
                "https://translate.example.org/",
                &args(&[("projectSlug", "anaconda"), ("iterationSlug", "master")]),
                Some("?detail=true"),
            )
            .unwrap();

        assert_eq!(
            url,
            "https://translate.example.org/seam/resource/restv1/stats/proj/anaconda/iter/master?detail=true"
        );
    }

    #[test]
    fn test_url_missing_path_param() {
        let config = ServiceConfig::new("get_iteration").unwrap();
        let result = config.url(
            "https://translate.example.org",
            &args(&[("projectSlug", "anaconda")]),
            None,
        );

        assert_eq!(
            result,
            Err(ServiceError::MissingPathParam {
                service: "get_iteration".to_string(),
                param: "iterationSlug".to_string(),
            })
        );
    }

    #[test]
    fn test_all_services_resolve() {
        let services = all_services().unwrap();
        assert_eq!(services.len(), 12);
        assert!(services
            .iter()
            .all(|config| config.http_method() == HttpMethod::Get));
    }
}
