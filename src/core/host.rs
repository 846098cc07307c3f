//! Host collaborators bundled for the model
//!
//! `Host` carries the project plus every external capability the model
//! consults: container initializers, the resource store, the conventions
//! validator and the deprecation oracle. It is cheap to clone.

use std::sync::Arc;

use crate::core::container::{ContainerInitializer, InitializerRegistry};
use crate::core::project::Project;
use crate::core::resources::{InMemoryResources, ResourceStore};
use crate::core::validation::{
    ConventionsValidator, DeprecationOracle, NoDeprecations, StandardConventions,
};

#[derive(Clone)]
pub struct Host {
    project: Project,
    initializers: InitializerRegistry,
    resources: Arc<dyn ResourceStore>,
    conventions: Arc<dyn ConventionsValidator>,
    deprecations: Arc<dyn DeprecationOracle>,
}

impl Host {
    /// Host with an empty resource store, no containers, standard conventions
    /// and no deprecated variables
    pub fn new(project: Project) -> Self {
        let resources = InMemoryResources::new().with_project(project.path().clone());
        Self {
            project,
            initializers: InitializerRegistry::new(),
            resources: Arc::new(resources),
            conventions: Arc::new(StandardConventions),
            deprecations: Arc::new(NoDeprecations),
        }
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceStore>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_initializer(
        mut self,
        segment: impl Into<String>,
        initializer: Arc<dyn ContainerInitializer>,
    ) -> Self {
        self.initializers.register(segment, initializer);
        self
    }

    pub fn with_conventions(mut self, conventions: Arc<dyn ConventionsValidator>) -> Self {
        self.conventions = conventions;
        self
    }

    pub fn with_deprecations(mut self, deprecations: Arc<dyn DeprecationOracle>) -> Self {
        self.deprecations = deprecations;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn initializers(&self) -> &InitializerRegistry {
        &self.initializers
    }

    pub fn initializers_mut(&mut self) -> &mut InitializerRegistry {
        &mut self.initializers
    }

    pub fn resources(&self) -> &dyn ResourceStore {
        self.resources.as_ref()
    }

    pub fn conventions(&self) -> &dyn ConventionsValidator {
        self.conventions.as_ref()
    }

    pub fn deprecations(&self) -> &dyn DeprecationOracle {
        self.deprecations.as_ref()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("project", &self.project)
            .field("initializers", &self.initializers)
            .finish_non_exhaustive()
    }
}
