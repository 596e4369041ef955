use anyhow::{bail, Context, Result};
use juniper::GraphQLObject;
use serde::Deserialize;
use std::collections::HashSet;

use super::embedded::embedded_text;

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub tagline: String,
    pub summary: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDetail {
    pub id: String,
    /// Accent colour for the detail page
    pub color: String,
    pub overview: String,
    pub sections: Vec<DetailSection>,
    pub stats: Vec<Stat>,
    pub process: Vec<ProcessStep>,
}

#[derive(Debug, Clone, Deserialize, GraphQLObject)]
pub struct DetailSection {
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, GraphQLObject)]
pub struct Stat {
    /// Display figure, e.g. "500+"
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, GraphQLObject)]
pub struct ProcessStep {
    pub step: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, GraphQLObject)]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub company: String,
    pub text: String,
    /// 1 to 5 stars
    pub rating: i32,
}

#[derive(Debug, Clone, Deserialize, GraphQLObject)]
pub struct ClientCategory {
    pub name: String,
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, GraphQLObject)]
pub struct CaseStudy {
    pub title: String,
    pub company: String,
    pub challenge: String,
    pub solution: String,
    pub result: String,
    pub badge: String,
}

#[derive(Debug, Clone, Deserialize, GraphQLObject)]
#[serde(rename_all = "camelCase")]
pub struct Clients {
    pub categories: Vec<ClientCategory>,
    pub case_studies: Vec<CaseStudy>,
}

#[derive(Deserialize)]
struct ServicesFile {
    services: Vec<Service>,
    details: Vec<ServiceDetail>,
}

/// Static site content, loaded once at startup
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    services: Vec<Service>,
    details: Vec<ServiceDetail>,
    testimonials: Vec<Testimonial>,
    clients: Clients,
}

impl ContentCatalog {
    /// Load and validate the embedded content files
    pub fn load() -> Result<Self> {
        Self::from_json(
            &embedded_text("services.json")?,
            &embedded_text("testimonials.json")?,
            &embedded_text("clients.json")?,
        )
    }

    pub fn from_json(services: &str, testimonials: &str, clients: &str) -> Result<Self> {
        let services_file: ServicesFile =
            serde_json::from_str(services).context("Invalid services content")?;
        let testimonials: Vec<Testimonial> =
            serde_json::from_str(testimonials).context("Invalid testimonials content")?;
        let clients: Clients = serde_json::from_str(clients).context("Invalid clients content")?;

        let catalog = Self {
            services: services_file.services,
            details: services_file.details,
            testimonials,
            clients,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if !seen.insert(service.id.as_str()) {
                bail!("Duplicate service id {}", service.id);
            }
            if self.detail(&service.id).is_none() {
                bail!("Service {} has no detail entry", service.id);
            }
        }

        if let Some(t) = self.testimonials.iter().find(|t| !(1..=5).contains(&t.rating)) {
            bail!("Testimonial {} has rating {} outside 1-5", t.id, t.rating);
        }

        Ok(())
    }

    fn detail(&self, id: &str) -> Option<&ServiceDetail> {
        self.details.iter().find(|d| d.id == id)
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// A service with its detail page content
    pub fn service(&self, id: &str) -> Option<(&Service, &ServiceDetail)> {
        let service = self.services.iter().find(|s| s.id == id)?;
        Some((service, self.detail(id)?))
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn clients(&self) -> &Clients {
        &self.clients
    }
}
