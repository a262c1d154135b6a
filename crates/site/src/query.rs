use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{Error, Project, Result, SiteCatalog};

/// Sections of the catalog that are served as-is.
#[derive(EnumString, Display, VariantArray, Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    Personal,
    Social,
    Skills,
    Experience,
    Education,
    Contact,
    Seo,
}

impl Section {
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value).map_err(|_| Error::UnknownSection(value.to_owned()))
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectParams {
    pub featured: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectFilter {
    pub featured_only: bool,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl TryFrom<ProjectParams> for ProjectFilter {
    type Error = Error;

    fn try_from(params: ProjectParams) -> Result<Self> {
        let limit = match params.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<usize>().map_err(|_| {
                Error::InvalidArgument(format!("Invalid limit value: {value}"))
            })?),
        };

        Ok(Self {
            featured_only: params.featured.as_deref() == Some("true"),
            category: params.category.filter(|c| !c.is_empty()),
            limit,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    pub results: Vec<&'a Project>,
    pub total: usize,
    pub query: SearchQuery,
}

fn same_category(project: &Project, category: &str) -> bool {
    project.category.to_lowercase() == category.to_lowercase()
}

fn uses_tech(project: &Project, term: &str) -> bool {
    project
        .tech_stack
        .iter()
        .any(|t| t.to_lowercase().contains(term))
}

impl SiteCatalog {
    pub fn projects(&self, filter: &ProjectFilter) -> Vec<&Project> {
        let projects = self
            .projects
            .iter()
            .filter(|p| !filter.featured_only || p.featured)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| same_category(p, c))
            });

        match filter.limit {
            Some(limit) => projects.take(limit).collect(),
            None => projects.collect(),
        }
    }

    pub fn project(&self, id: &str) -> Result<&Project> {
        let id = id.parse::<u32>().map_err(|_| Error::ProjectNotFound)?;

        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(Error::ProjectNotFound)
    }

    /// Distinct project categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = vec![];
        for project in &self.projects {
            if !categories.contains(&project.category.as_str()) {
                categories.push(&project.category);
            }
        }

        categories
    }

    pub fn search(&self, query: SearchQuery) -> SearchResults<'_> {
        let q = query
            .q
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase);
        let tech = query
            .tech
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase);
        let category = query.category.as_deref().filter(|v| !v.is_empty());

        let results = self
            .projects
            .iter()
            .filter(|p| {
                q.as_deref().is_none_or(|q| {
                    p.title.to_lowercase().contains(q)
                        || p.description.to_lowercase().contains(q)
                        || p.short_description.to_lowercase().contains(q)
                        || uses_tech(p, q)
                })
            })
            .filter(|p| tech.as_deref().is_none_or(|t| uses_tech(p, t)))
            .filter(|p| category.is_none_or(|c| same_category(p, c)))
            .collect::<Vec<_>>();

        SearchResults {
            total: results.len(),
            results,
            query,
        }
    }
}
