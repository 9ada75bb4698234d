//! Path building shared by the resource services.

/// Base path of one resource family, either scoped to a tenant or mounted at
/// the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    prefix: String,
}

impl ResourcePath {
    /// `/api/tenant/{tenant_id}/{base}`
    pub fn tenant(tenant_id: &str, base: &str) -> Self {
        Self {
            prefix: format!("/api/tenant/{}/{}", tenant_id, base.trim_matches('/')),
        }
    }

    /// `/{base}`
    pub fn root(base: &str) -> Self {
        Self {
            prefix: format!("/{}", base.trim_matches('/')),
        }
    }

    /// The resource's collection path.
    pub fn base(&self) -> &str {
        &self.prefix
    }

    /// Join `rest` onto the base path. An empty `rest` yields the base path.
    pub fn join(&self, rest: &str) -> String {
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            self.prefix.clone()
        } else {
            format!("{}/{}", self.prefix, rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_paths() {
        let path = ResourcePath::tenant("acme", "workflows");
        assert_eq!(path.base(), "/api/tenant/acme/workflows");
        assert_eq!(path.join(""), "/api/tenant/acme/workflows");
        assert_eq!(path.join("wf_1"), "/api/tenant/acme/workflows/wf_1");
        assert_eq!(
            path.join("/wf_1/activate"),
            "/api/tenant/acme/workflows/wf_1/activate"
        );
    }

    #[test]
    fn test_root_paths() {
        let path = ResourcePath::root("api-keys");
        assert_eq!(path.base(), "/api-keys");
        assert_eq!(path.join("key_9/rotate"), "/api-keys/key_9/rotate");

        let path = ResourcePath::root("/invitations/");
        assert_eq!(path.join(""), "/invitations");
    }
}
