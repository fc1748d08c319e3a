//! Descriptors for the deployable Liferay Portal image variants.
//!
//! Each variant is one alternative of a closed set. The container name is a
//! pure function of the variant, so two descriptors of the same variant
//! always address the same container.

/// Label key attached to every container owned by this tool.
pub const LPN_TYPE_LABEL: &str = "lpn-type";

const NIGHTLY_REPOSITORY: &str = "mdelapenya/liferay-portal-nightlies";
const RELEASE_REPOSITORY: &str = "mdelapenya/liferay-portal";
const CE_REPOSITORY: &str = "liferay/portal";
const COMMERCE_REPOSITORY: &str = "liferay/commerce";
const DXP_REPOSITORY: &str = "liferay/dxp";

/// The closed set of portal flavors this tool can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Portal {
    Ce,
    Commerce,
    Dxp,
    Nightly,
    Release,
}

impl Portal {
    /// Value of the `lpn-type` ownership label for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Portal::Ce => "ce",
            Portal::Commerce => "commerce",
            Portal::Dxp => "dxp",
            Portal::Nightly => "nightly",
            Portal::Release => "release",
        }
    }

    /// Canonical container name, derived from the variant and nothing else.
    pub fn container_name(&self) -> String {
        format!("lpn-{}", self.type_name())
    }

    pub fn repository(&self) -> &'static str {
        match self {
            Portal::Ce => CE_REPOSITORY,
            Portal::Commerce => COMMERCE_REPOSITORY,
            Portal::Dxp => DXP_REPOSITORY,
            Portal::Nightly => NIGHTLY_REPOSITORY,
            Portal::Release => RELEASE_REPOSITORY,
        }
    }

    pub fn default_tag(&self) -> &'static str {
        match self {
            Portal::Ce => "7.2.1-ga2",
            Portal::Commerce => "2.0.7",
            Portal::Dxp => "7.2.10-ga1",
            Portal::Nightly => "latest",
            Portal::Release => "latest",
        }
    }

    /// Docker Hub repository path used when listing available tags.
    pub fn tags_repository(&self) -> &'static str {
        self.repository()
    }

    /// Auto-deploy folder inside the container.
    pub fn deploy_folder(&self) -> &'static str {
        match self {
            Portal::Ce | Portal::Commerce | Portal::Dxp => "/opt/liferay/deploy",
            Portal::Nightly | Portal::Release => "/liferay/deploy",
        }
    }

    /// OS user owning the deployed files inside the container.
    pub fn user(&self) -> &'static str {
        "liferay"
    }

    /// Name of the environment variable that switches the JVM into debug
    /// mode. The official images and the nightly/release ones disagree on
    /// the name, which is the one behavior that genuinely differs between
    /// variants.
    pub fn debug_env_var(&self) -> &'static str {
        match self {
            Portal::Ce | Portal::Commerce | Portal::Dxp | Portal::Nightly => {
                "LIFERAY_JPDA_ENABLED"
            }
            Portal::Release => "DEBUG_MODE",
        }
    }
}

/// An immutable description of one deployable portal image: a variant plus
/// the tag to run.
#[derive(Debug, Clone)]
pub struct PortalImage {
    portal: Portal,
    tag: Option<String>,
}

impl PortalImage {
    /// Builds a descriptor. An empty or missing tag falls back to the
    /// variant's default.
    pub fn new(portal: Portal, tag: Option<String>) -> Self {
        let tag = tag.filter(|t| !t.is_empty());
        Self { portal, tag }
    }

    pub fn portal(&self) -> Portal {
        self.portal
    }

    pub fn tag(&self) -> &str {
        self.tag
            .as_deref()
            .unwrap_or_else(|| self.portal.default_tag())
    }

    pub fn container_name(&self) -> String {
        self.portal.container_name()
    }

    /// Fully qualified image reference (`repository:tag`).
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.portal.repository(), self.tag())
    }
}
