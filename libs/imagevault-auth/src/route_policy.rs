use std::collections::HashMap;

use axum::http::Method;

use imagevault_security::Capability;

/// Whether a route requires authentication, and which capability bit the
/// authenticated subject must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// No authentication required (public route).
    None,
    /// Authentication required; optionally a capability the subject needs.
    Required(Option<Capability>),
}

/// One route's security declaration, as published by a module.
///
/// Capability requirements are route configuration, not middleware code: the
/// exact bit an operation needs is data supplied here, so deployments can
/// remap operation classes without touching the evaluator.
#[derive(Debug, Clone)]
pub struct RouteSecurity {
    pub method: Method,
    /// Path pattern in `{param}` syntax, e.g. `/images/v1/images/{id}`.
    pub path: String,
    pub requirement: AuthRequirement,
}

impl RouteSecurity {
    #[must_use]
    pub fn authenticated(
        method: Method,
        path: impl Into<String>,
        capability: Capability,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            requirement: AuthRequirement::Required(Some(capability)),
        }
    }

    #[must_use]
    pub fn public(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            requirement: AuthRequirement::None,
        }
    }
}

/// A route pattern could not be inserted into the matcher.
#[derive(Debug, thiserror::Error)]
#[error("failed to insert route pattern '{path}': {source}")]
pub struct RoutePolicyError {
    path: String,
    #[source]
    source: matchit::InsertError,
}

/// Resolves `(method, path)` to an [`AuthRequirement`] using per-method
/// pattern matchers.
pub struct RouteCapabilityPolicy {
    route_matchers: HashMap<Method, matchit::Router<Option<Capability>>>,
    public_matchers: HashMap<Method, matchit::Router<()>>,
    require_auth_by_default: bool,
}

impl RouteCapabilityPolicy {
    /// Builds the policy from the modules' route security tables.
    pub fn build(
        routes: impl IntoIterator<Item = RouteSecurity>,
        require_auth_by_default: bool,
    ) -> Result<Self, RoutePolicyError> {
        let mut route_matchers: HashMap<Method, matchit::Router<Option<Capability>>> =
            HashMap::new();
        let mut public_matchers: HashMap<Method, matchit::Router<()>> = HashMap::new();

        for route in routes {
            match route.requirement {
                AuthRequirement::Required(capability) => {
                    route_matchers
                        .entry(route.method)
                        .or_insert_with(matchit::Router::new)
                        .insert(&route.path, capability)
                        .map_err(|source| RoutePolicyError {
                            path: route.path.clone(),
                            source,
                        })?;
                }
                AuthRequirement::None => {
                    public_matchers
                        .entry(route.method)
                        .or_insert_with(matchit::Router::new)
                        .insert(&route.path, ())
                        .map_err(|source| RoutePolicyError {
                            path: route.path.clone(),
                            source,
                        })?;
                }
            }
        }

        Ok(Self {
            route_matchers,
            public_matchers,
            require_auth_by_default,
        })
    }

    /// Resolve the authentication requirement for a given `(method, path)`.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> AuthRequirement {
        if let Some(matcher) = self.route_matchers.get(method)
            && let Ok(found) = matcher.at(path)
        {
            return AuthRequirement::Required(*found.value);
        }

        let is_public = self
            .public_matchers
            .get(method)
            .is_some_and(|matcher| matcher.at(path).is_ok());

        if self.require_auth_by_default && !is_public {
            AuthRequirement::Required(None)
        } else {
            AuthRequirement::None
        }
    }
}
