use serde::Serialize;

pub const PROJECT_VAR: &str = "APP_PROJECT";
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Precedence of a layer. Later ranks override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Base,
    Project,
    Environment,
}

/// Deployment identifiers that select override layers.
///
/// The environment only matters when a project is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    project: Option<String>,
    environment: Option<String>,
}

impl ExecutionContext {
    pub fn new(project: Option<&str>, environment: Option<&str>) -> Self {
        Self {
            project: non_empty(project),
            environment: non_empty(environment),
        }
    }

    /// Read `APP_PROJECT` and `APP_ENV` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let project = lookup(PROJECT_VAR);
        let environment = lookup(ENVIRONMENT_VAR);
        Self::new(project.as_deref(), environment.as_deref())
    }

    pub fn with_project(mut self, project: Option<&str>) -> Self {
        if let Some(p) = non_empty(project) {
            self.project = Some(p);
        }
        self
    }

    pub fn with_environment(mut self, environment: Option<&str>) -> Self {
        if let Some(e) = non_empty(environment) {
            self.environment = Some(e);
        }
        self
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Layer names eligible for `prefix`, lowest precedence first.
    pub fn layer_names(&self, prefix: &str) -> Vec<(Rank, String)> {
        let mut names = vec![(Rank::Base, prefix.to_string())];
        if let Some(project) = self.project() {
            names.push((Rank::Project, format!("{prefix}.{project}")));
            if let Some(env) = self.environment() {
                names.push((Rank::Environment, format!("{prefix}.{project}.{env}")));
            }
        }
        names
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
