// ABOUTME: Static REST resource tables for the translation platform API
// ABOUTME: Defines HTTP methods, media types, resource groups, endpoints and named services

use serde::Serialize;
use std::str::FromStr;

use super::error::ServiceError;

/// Prefix every mount point is served under
pub const MIDDLE_URL: &str = "/seam/resource/restv1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Json,
    Projects,
    Version,
    ProjectIteration,
    Glossary,
    ProjectLocales,
    Xml,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Projects => "application/vnd.zanata.projects+json",
            MediaType::Version => "application/vnd.zanata.Version+json",
            MediaType::ProjectIteration => "application/vnd.zanata.project.iteration+json",
            MediaType::Glossary => "application/vnd.zanata.glossary+json",
            MediaType::ProjectLocales => "application/vnd.zanata.project.locales+json",
            MediaType::Xml => "application/xml",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for MediaType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Protocol metadata for one method on one mount point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path_params: &'static [&'static str],
    pub query_params: &'static [&'static str],
    pub request_media_type: Option<MediaType>,
    pub response_media_type: Option<MediaType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountPoint {
    pub path: &'static str,
    pub endpoints: &'static [Endpoint],
}

impl MountPoint {
    pub fn endpoint(&self, method: HttpMethod) -> Option<&'static Endpoint> {
        self.endpoints.iter().find(|e| e.method == method)
    }
}

const fn get(path_params: &'static [&'static str], response: MediaType) -> Endpoint {
    Endpoint {
        method: HttpMethod::Get,
        path_params,
        query_params: &[],
        request_media_type: None,
        response_media_type: Some(response),
    }
}

const fn with_body(
    method: HttpMethod,
    path_params: &'static [&'static str],
    request: MediaType,
    response: MediaType,
) -> Endpoint {
    Endpoint {
        method,
        path_params,
        query_params: &[],
        request_media_type: Some(request),
        response_media_type: Some(response),
    }
}

const fn delete(path_params: &'static [&'static str], response: MediaType) -> Endpoint {
    Endpoint {
        method: HttpMethod::Delete,
        path_params,
        query_params: &[],
        request_media_type: None,
        response_media_type: Some(response),
    }
}

const PROJECT: &[&str] = &["projectSlug"];
const ITERATION: &[&str] = &["projectSlug", "iterationSlug"];
const DOCUMENT: &[&str] = &["projectSlug", "iterationSlug", "id"];
const DOC_STATS: &[&str] = &["projectSlug", "iterationSlug", "docId"];
const TRANSLATION: &[&str] = &["projectSlug", "iterationSlug", "id", "locale"];

const GLOSSARY: &[MountPoint] = &[MountPoint {
    path: "/glossary",
    endpoints: &[
        with_body(HttpMethod::Put, &[], MediaType::Json, MediaType::Glossary),
        delete(&[], MediaType::Glossary),
    ],
}];

const PROJECT_ITERATION_LOCALES: &[MountPoint] = &[MountPoint {
    path: "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/locales",
    endpoints: &[get(ITERATION, MediaType::ProjectLocales)],
}];

const PROJECT_ITERATION: &[MountPoint] = &[
    MountPoint {
        path: "/projects/p/{projectSlug}/iterations/i/{iterationSlug}",
        endpoints: &[
            get(ITERATION, MediaType::ProjectIteration),
            with_body(
                HttpMethod::Put,
                ITERATION,
                MediaType::ProjectIteration,
                MediaType::Json,
            ),
        ],
    },
    MountPoint {
        path: "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/config",
        endpoints: &[Endpoint {
            method: HttpMethod::Get,
            path_params: ITERATION,
            query_params: &[],
            request_media_type: Some(MediaType::Xml),
            response_media_type: Some(MediaType::Xml),
        }],
    },
];

const PROJECT_LOCALES: &[MountPoint] = &[MountPoint {
    path: "/projects/p/{projectSlug}/locales",
    endpoints: &[get(PROJECT, MediaType::ProjectLocales)],
}];

const PROJECT_RESOURCE: &[MountPoint] = &[MountPoint {
    path: "/projects/p/{projectSlug}",
    endpoints: &[
        get(PROJECT, MediaType::Json),
        with_body(HttpMethod::Put, PROJECT, MediaType::Json, MediaType::Json),
    ],
}];

const PROJECTS: &[MountPoint] = &[MountPoint {
    path: "/projects",
    endpoints: &[get(&[], MediaType::Projects)],
}];

const SOURCE_DOC: &[MountPoint] = &[
    MountPoint {
        path: "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r",
        endpoints: &[
            get(ITERATION, MediaType::Json),
            with_body(HttpMethod::Post, ITERATION, MediaType::Json, MediaType::Json),
        ],
    },
    MountPoint {
        path: "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r/{id}",
        endpoints: &[
            get(DOCUMENT, MediaType::Json),
            with_body(HttpMethod::Put, DOCUMENT, MediaType::Json, MediaType::Json),
            delete(DOCUMENT, MediaType::Json),
        ],
    },
];

const STATISTICS: &[MountPoint] = &[
    MountPoint {
        path: "/stats/proj/{projectSlug}/iter/{iterationSlug}",
        endpoints: &[get(ITERATION, MediaType::Json)],
    },
    MountPoint {
        path: "/stats/proj/{projectSlug}/iter/{iterationSlug}/doc/{docId}",
        endpoints: &[get(DOC_STATS, MediaType::Json)],
    },
];

const TRANSLATED_DOC: &[MountPoint] = &[MountPoint {
    path: "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r/{id}/translations/{locale}",
    endpoints: &[
        get(TRANSLATION, MediaType::Json),
        with_body(HttpMethod::Put, TRANSLATION, MediaType::Json, MediaType::Json),
    ],
}];

const VERSION: &[MountPoint] = &[MountPoint {
    path: "/version",
    endpoints: &[get(&[], MediaType::Version)],
}];

/// REST resource groups exposed by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceGroup {
    Account,
    AsynchronousProcess,
    CopyTrans,
    File,
    Glossary,
    ProjectIterationLocales,
    ProjectIteration,
    ProjectLocales,
    Project,
    Projects,
    SourceDoc,
    Statistics,
    TranslatedDoc,
    TranslationMemory,
    Version,
}

impl ResourceGroup {
    pub const ALL: [ResourceGroup; 15] = [
        ResourceGroup::Account,
        ResourceGroup::AsynchronousProcess,
        ResourceGroup::CopyTrans,
        ResourceGroup::File,
        ResourceGroup::Glossary,
        ResourceGroup::ProjectIterationLocales,
        ResourceGroup::ProjectIteration,
        ResourceGroup::ProjectLocales,
        ResourceGroup::Project,
        ResourceGroup::Projects,
        ResourceGroup::SourceDoc,
        ResourceGroup::Statistics,
        ResourceGroup::TranslatedDoc,
        ResourceGroup::TranslationMemory,
        ResourceGroup::Version,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceGroup::Account => "AccountResource",
            ResourceGroup::AsynchronousProcess => "AsynchronousProcessResource",
            ResourceGroup::CopyTrans => "CopyTransResource",
            ResourceGroup::File => "FileResource",
            ResourceGroup::Glossary => "GlossaryResource",
            ResourceGroup::ProjectIterationLocales => "ProjectIterationLocalesResource",
            ResourceGroup::ProjectIteration => "ProjectIterationResource",
            ResourceGroup::ProjectLocales => "ProjectLocalesResource",
            ResourceGroup::Project => "ProjectResource",
            ResourceGroup::Projects => "ProjectsResource",
            ResourceGroup::SourceDoc => "SourceDocResource",
            ResourceGroup::Statistics => "StatisticsResource",
            ResourceGroup::TranslatedDoc => "TranslatedDocResource",
            ResourceGroup::TranslationMemory => "TranslationMemoryResource",
            ResourceGroup::Version => "VersionResource",
        }
    }

    /// Mount points registered for the group, in declaration order
    pub fn mount_points(&self) -> &'static [MountPoint] {
        match self {
            ResourceGroup::Account
            | ResourceGroup::AsynchronousProcess
            | ResourceGroup::CopyTrans
            | ResourceGroup::File
            | ResourceGroup::TranslationMemory => &[],
            ResourceGroup::Glossary => GLOSSARY,
            ResourceGroup::ProjectIterationLocales => PROJECT_ITERATION_LOCALES,
            ResourceGroup::ProjectIteration => PROJECT_ITERATION,
            ResourceGroup::ProjectLocales => PROJECT_LOCALES,
            ResourceGroup::Project => PROJECT_RESOURCE,
            ResourceGroup::Projects => PROJECTS,
            ResourceGroup::SourceDoc => SOURCE_DOC,
            ResourceGroup::Statistics => STATISTICS,
            ResourceGroup::TranslatedDoc => TRANSLATED_DOC,
            ResourceGroup::Version => VERSION,
        }
    }

    pub fn mount_point(&self, path: &str) -> Option<&'static MountPoint> {
        self.mount_points().iter().find(|m| m.path == path)
    }
}

impl std::fmt::Display for ResourceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named operations the application consumes from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    ServerVersion,
    ListProjects,
    ListProject,
    GetIteration,
    ListFiles,
    RetrieveTemplate,
    RetrieveTranslation,
    ProjectLocales,
    IterationLocales,
    ProjTransStats,
    DocTransStats,
    ProjectConfig,
}

impl Service {
    pub const ALL: [Service; 12] = [
        Service::ServerVersion,
        Service::ListProjects,
        Service::ListProject,
        Service::GetIteration,
        Service::ListFiles,
        Service::RetrieveTemplate,
        Service::RetrieveTranslation,
        Service::ProjectLocales,
        Service::IterationLocales,
        Service::ProjTransStats,
        Service::DocTransStats,
        Service::ProjectConfig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::ServerVersion => "server_version",
            Service::ListProjects => "list_projects",
            Service::ListProject => "list_project",
            Service::GetIteration => "get_iteration",
            Service::ListFiles => "list_files",
            Service::RetrieveTemplate => "retrieve_template",
            Service::RetrieveTranslation => "retrieve_translation",
            Service::ProjectLocales => "project_locales",
            Service::IterationLocales => "iteration_locales",
            Service::ProjTransStats => "proj_trans_stats",
            Service::DocTransStats => "doc_trans_stats",
            Service::ProjectConfig => "project_config",
        }
    }

    /// Resource group, mount point and method the service is bound to
    pub fn binding(&self) -> (ResourceGroup, &'static str, HttpMethod) {
        use HttpMethod::Get;

        match self {
            Service::ServerVersion => (ResourceGroup::Version, "/version", Get),
            Service::ListProjects => (ResourceGroup::Projects, "/projects", Get),
            Service::ListProject => (ResourceGroup::Project, "/projects/p/{projectSlug}", Get),
            Service::GetIteration => (
                ResourceGroup::ProjectIteration,
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}",
                Get,
            ),
            Service::ListFiles => (
                ResourceGroup::SourceDoc,
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r",
                Get,
            ),
            Service::RetrieveTemplate => (
                ResourceGroup::SourceDoc,
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r/{id}",
                Get,
            ),
            Service::RetrieveTranslation => (
                ResourceGroup::TranslatedDoc,
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/r/{id}/translations/{locale}",
                Get,
            ),
            Service::ProjectLocales => (
                ResourceGroup::ProjectLocales,
                "/projects/p/{projectSlug}/locales",
                Get,
            ),
            Service::IterationLocales => (
                ResourceGroup::ProjectIterationLocales,
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/locales",
                Get,
            ),
            Service::ProjTransStats => (
                ResourceGroup::Statistics,
                "/stats/proj/{projectSlug}/iter/{iterationSlug}",
                Get,
            ),
            Service::DocTransStats => (
                ResourceGroup::Statistics,
                "/stats/proj/{projectSlug}/iter/{iterationSlug}/doc/{docId}",
                Get,
            ),
            Service::ProjectConfig => (
                ResourceGroup::ProjectIteration,
                "/projects/p/{projectSlug}/iterations/i/{iterationSlug}/config",
                Get,
            ),
        }
    }
}

impl FromStr for Service {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| ServiceError::InvalidService(s.to_string()))
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
